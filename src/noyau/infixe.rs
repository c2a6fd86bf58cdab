// src/noyau/infixe.rs
//
// RPN (postfixe) -> infixe avec parenthésage minimal.
//
// Chaque fragment de la pile garde la précédence de son opérateur le plus externe ;
// c’est elle qui décide des parenthèses quand le fragment devient un enfant.
// Les atomes (nombres, variables, jetons inconnus) et les appels de fonction ont la
// précédence maximale : ils ne sont jamais entourés.
//
// Le résultat final, s’il est une opération binaire, est entouré d’une paire de
// parenthèses : "x y +" -> "(x + y)".

use tracing::debug;

use super::erreur::ErreurInfixe;
use super::jetons::{jetons_postfixes, Associativite, Operateur, FONCTIONS_RECONSTRUCTION};

/// Précédence d’un atome ou d’un appel de fonction.
const PRECEDENCE_ATOME: u8 = u8::MAX;

#[derive(Clone, Debug)]
struct Fragment {
    texte: String,
    prec: u8,
}

impl Fragment {
    fn atome(texte: &str) -> Self {
        Self {
            texte: texte.to_string(),
            prec: PRECEDENCE_ATOME,
        }
    }

    fn entoure_si(self, parens: bool) -> String {
        if parens {
            format!("({})", self.texte)
        } else {
            self.texte
        }
    }
}

fn est_fonction_reconstruction(tok: &str) -> bool {
    FONCTIONS_RECONSTRUCTION.contains(&tok)
}

/// Assemble `gauche op droite` en ne parenthésant que les côtés qui l’exigent.
fn combine(op: Operateur, gauche: Fragment, droite: Fragment) -> Fragment {
    let p = op.precedence();

    let (parens_g, parens_d) = match op.associativite() {
        Associativite::Droite => (gauche.prec <= p, droite.prec < p),
        Associativite::Gauche => (gauche.prec < p, droite.prec <= p),
    };

    Fragment {
        texte: format!(
            "{} {} {}",
            gauche.entoure_si(parens_g),
            op.symbole(),
            droite.entoure_si(parens_d)
        ),
        prec: p,
    }
}

/// API publique : postfixe -> infixe.
///
/// Échoue (sans résultat partiel) si un opérateur ou une fonction manque d’opérandes,
/// ou s’il ne reste pas exactement un fragment à la fin.
pub fn postfix_to_infix(expression: &str) -> Result<String, ErreurInfixe> {
    let mut st: Vec<Fragment> = Vec::new();

    for (i, tok) in jetons_postfixes(expression).enumerate() {
        let manque = || ErreurInfixe::OperandesManquants {
            jeton: tok.to_string(),
            position: i + 1,
        };

        if let Some(op) = Operateur::depuis_jeton(tok) {
            // droite d’abord : c’est une pile
            let droite = st.pop().ok_or_else(manque)?;
            let gauche = st.pop().ok_or_else(manque)?;
            st.push(combine(op, gauche, droite));
        } else if est_fonction_reconstruction(tok) {
            let arg = st.pop().ok_or_else(manque)?;
            st.push(Fragment {
                texte: format!("{tok}({})", arg.texte),
                prec: PRECEDENCE_ATOME,
            });
        } else {
            // nombre, variable, ou tout autre jeton : opérande atomique
            st.push(Fragment::atome(tok));
        }
    }

    if st.len() != 1 {
        return Err(ErreurInfixe::PileFinale {
            profondeur: st.len(),
        });
    }

    let racine = st.pop().ok_or(ErreurInfixe::PileFinale { profondeur: 0 })?;
    let binaire = racine.prec != PRECEDENCE_ATOME;
    let texte = racine.entoure_si(binaire);
    debug!(entree = expression, infixe = %texte, "postfixe -> infixe");
    Ok(texte)
}
