//! Noyau — pipeline complet (ce que fait l’interface à chaque validation)
//!
//! Mode 1 : infixe -> postfixe, puis évaluation de la postfixe GÉNÉRÉE.
//! Mode 2 : postfixe -> infixe, puis évaluation de la postfixe SAISIE.
//!
//! Une conversion ratée (mode 2) n’est pas évaluée.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::erreur::{ErreurEval, ErreurPipeline};
use super::eval::evaluer_postfixe;
use super::infixe::postfix_to_infix;
use super::jetons::{format_tokens, tokenize};
use super::rpn::infix_to_postfix;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    InfixeVersPostfixe,
    PostfixeVersInfixe,
}

impl Mode {
    pub fn libelle(self) -> &'static str {
        match self {
            Mode::InfixeVersPostfixe => "Infixe → Postfixe",
            Mode::PostfixeVersInfixe => "Postfixe → Infixe",
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub postfixe: String,
}

#[derive(Clone, Debug)]
pub struct Resultat {
    /// Forme convertie (postfixe en mode 1, infixe en mode 2).
    pub forme: String,
    /// Valeur de la postfixe ; NaN si l’évaluation échoue.
    pub valeur: f32,
    /// Raison du NaN quand elle est structurelle (jeton inconnu, division par zéro…).
    pub raison: Option<ErreurEval>,
    pub demarche: DemarcheNoyau,
}

/// Une seule évaluation ; la raison n’est gardée que si la valeur finale est NaN.
fn evalue(postfixe: &str) -> (f32, Option<ErreurEval>) {
    match evaluer_postfixe(postfixe) {
        Ok(ev) => {
            let valeur = ev.valeur_publique();
            let raison = if valeur.is_nan() { ev.alerte } else { None };
            (valeur, raison)
        }
        Err(e) => {
            debug!(entree = postfixe, erreur = %e, "évaluation postfixe impossible");
            (f32::NAN, Some(e))
        }
    }
}

/// API publique : exécute un mode sur une saisie.
pub fn execute(mode: Mode, entree: &str) -> Result<Resultat, ErreurPipeline> {
    let s = entree.trim();
    if s.is_empty() {
        return Err(ErreurPipeline::EntreeVide);
    }

    let res = match mode {
        Mode::InfixeVersPostfixe => {
            let jetons = format_tokens(&tokenize(s));
            let postfixe = infix_to_postfix(s);
            let (valeur, raison) = evalue(&postfixe);
            Resultat {
                forme: postfixe.clone(),
                valeur,
                raison,
                demarche: DemarcheNoyau { jetons, postfixe },
            }
        }
        Mode::PostfixeVersInfixe => {
            let infixe = postfix_to_infix(s)?;
            let (valeur, raison) = evalue(s);
            Resultat {
                forme: infixe,
                valeur,
                raison,
                demarche: DemarcheNoyau {
                    jetons: String::new(),
                    postfixe: s.to_string(),
                },
            }
        }
    };

    debug!(?mode, forme = %res.forme, valeur = res.valeur, "pipeline exécuté");
    Ok(res)
}
