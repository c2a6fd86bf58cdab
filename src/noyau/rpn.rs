// src/noyau/rpn.rs
//
// Shunting-yard : infixe -> RPN (postfixe)
//
// Règles:
// - Num / variable : sortie directe
// - fonction : empilée, sortie juste après la parenthèse fermante de son argument
// - opérateur : dépile tant que le sommet (opérateur ou fonction) a une précédence
//   plus forte, ou égale si l’opérateur courant est associatif à gauche
// - fin : on vide la pile, les '(' orphelines sont jetées sans erreur
//
// NOTE: une ')' sans '(' vide toute la pile (comme si elle fermait un groupe).
// Aucun signalement : c’est l’évaluation / la reconstruction qui verra l’incohérence.

use tracing::debug;

use super::jetons::{
    format_tokens, tokenize, Associativite, Operateur, Role, Tok, PRECEDENCE_FONCTION,
};

/// Contenu possible de la pile d’opérateurs.
#[derive(Clone, Debug, PartialEq, Eq)]
enum EntreePile {
    Op(Operateur),
    Fonction(String),
    LPar,
}

impl EntreePile {
    /// Précédence pour la comparaison de dépilement ; None pour '(' (bloque).
    fn precedence(&self) -> Option<u8> {
        match self {
            EntreePile::Op(op) => Some(op.precedence()),
            EntreePile::Fonction(_) => Some(PRECEDENCE_FONCTION),
            EntreePile::LPar => None,
        }
    }

    fn en_jeton(self) -> Option<Tok> {
        match self {
            EntreePile::Op(op) => Some(Tok::Op(op)),
            EntreePile::Fonction(nom) => Some(Tok::Ident(nom, Role::Fonction)),
            EntreePile::LPar => None,
        }
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin", Fonction), LPar, Num(30), RPar]
///   rpn:    [Num(30), Ident("sin", Fonction)]
pub fn to_rpn(tokens: &[Tok]) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<EntreePile> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Ident(_, Role::Variable) => out.push(tok),

            Tok::Ident(nom, Role::Fonction) => ops.push(EntreePile::Fonction(nom)),

            Tok::LPar => ops.push(EntreePile::LPar),

            Tok::RPar => {
                // dépile jusqu’à '(' (la '(' est jetée)
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if top == EntreePile::LPar {
                        ouvrante = true;
                        break;
                    }
                    out.extend(top.en_jeton());
                }
                if !ouvrante {
                    debug!("')' sans '(' correspondante : pile d’opérateurs vidée");
                }

                // fonction au sommet => elle s’attache à l’argument qu’on vient de fermer
                if matches!(ops.last(), Some(EntreePile::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.extend(f.en_jeton());
                    }
                }
            }

            Tok::Op(op) => {
                while let Some(p_top) = ops.last().and_then(EntreePile::precedence) {
                    let p_op = op.precedence();
                    let doit_pop = p_top > p_op
                        || (p_top == p_op && op.associativite() == Associativite::Gauche);
                    if !doit_pop {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.extend(top.en_jeton());
                    }
                }
                ops.push(EntreePile::Op(op));
            }
        }
    }

    // vide la pile ops ; '(' orphelines ignorées
    while let Some(top) = ops.pop() {
        if top == EntreePile::LPar {
            debug!("'(' non fermée ignorée");
            continue;
        }
        out.extend(top.en_jeton());
    }

    out
}

/// API publique : infixe -> postfixe (jetons séparés par un espace).
/// Ne peut pas échouer : une entrée vide donne "".
pub fn infix_to_postfix(expression: &str) -> String {
    let jetons = tokenize(expression);
    let rpn = to_rpn(&jetons);
    let texte = format_tokens(&rpn);
    debug!(entree = expression, postfixe = %texte, "infixe -> postfixe");
    texte
}
