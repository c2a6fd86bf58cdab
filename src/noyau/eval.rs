//! Noyau — évaluation d’une expression postfixe
//!
//! Pile de valeurs en double précision ; le résultat public est réduit en `f32`.
//! Toute erreur (syntaxe OU domaine) devient NaN à la frontière publique
//! `evaluate_postfix` ; `evaluer_postfixe` garde la raison pour la trace.
//!
//! Division / modulo par zéro : NaN est EMPILÉ et l’évaluation continue
//! (`0 ^ ...` peut l’absorber) ; l’incident reste noté dans `Evaluation::alerte`.

use std::str::FromStr;

use num_traits::Float;
use tracing::debug;

use super::erreur::ErreurEval;
use super::jetons::{jetons_postfixes, Operateur, FONCTIONS_EVALUATION, FONCTIONS_RECONSTRUCTION};

/// Valeur finale + premier incident non bloquant rencontré en route.
#[derive(Clone, Debug)]
pub struct Evaluation<F> {
    pub valeur: F,
    pub alerte: Option<ErreurEval>,
}

impl Evaluation<f64> {
    /// Valeur réduite au type public.
    pub fn valeur_publique(&self) -> f32 {
        self.valeur as f32
    }
}

fn est_division_par_zero<F: Float>(op: Operateur, b: F) -> bool {
    matches!(op, Operateur::Division | Operateur::Modulo) && b == F::zero()
}

fn applique_binaire<F: Float>(op: Operateur, a: F, b: F) -> F {
    match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        _ if est_division_par_zero(op, b) => F::nan(),
        Operateur::Division => a / b,
        // reste flottant : signe du dividende (fmod)
        Operateur::Modulo => a % b,
        // base négative + exposant fractionnaire => NaN, accepté
        Operateur::Puissance => a.powf(b),
    }
}

/// Fonctions unaires ; trigonométrie en DEGRÉS.
fn applique_fonction<F: Float>(nom: &str, x: F) -> F {
    match nom {
        "sin" | "sen" => x.to_radians().sin(),
        "cos" => x.to_radians().cos(),
        "tan" | "tg" => x.to_radians().tan(),
        "log" => x.log10(),
        "sqrt" | "raiz" => x.sqrt(),
        _ => F::nan(),
    }
}

/// Plus long préfixe décimal du jeton :
/// `[+-]? chiffres* ('.' chiffres*)? ([eE] [+-]? chiffres+)?`, au moins un chiffre
/// dans la mantisse. Un exposant incomplet ("1e") n’est pas pris.
fn prefixe_decimal(tok: &str) -> Option<&str> {
    let b = tok.as_bytes();
    let chiffres_depuis = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let debut = i;
    i = chiffres_depuis(i);
    let mut n_chiffres = i - debut;

    if b.get(i) == Some(&b'.') {
        let apres_point = i + 1;
        i = chiffres_depuis(apres_point);
        n_chiffres += i - apres_point;
    }
    if n_chiffres == 0 {
        return None;
    }

    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let fin = chiffres_depuis(j);
        if fin > j {
            i = fin;
        }
    }

    Some(&tok[..i])
}

/// Lecture d’un nombre : jeton entier d’abord (inf, nan compris), sinon son préfixe
/// décimal ("1.2.3" -> 1.2, "4x" -> 4).
fn lit_nombre<F: FromStr>(tok: &str) -> Option<F> {
    tok.parse::<F>()
        .ok()
        .or_else(|| prefixe_decimal(tok)?.parse::<F>().ok())
}

/// Évalue une suite postfixe dans le type flottant `F`.
pub fn evaluer_avec<F: Float + FromStr>(expression: &str) -> Result<Evaluation<F>, ErreurEval> {
    let mut st: Vec<F> = Vec::with_capacity(64);
    let mut alerte = None;

    for tok in jetons_postfixes(expression) {
        if let Some(op) = Operateur::depuis_jeton(tok) {
            let manque = || ErreurEval::OperandesManquants {
                jeton: tok.to_string(),
            };
            let b = st.pop().ok_or_else(manque)?;
            let a = st.pop().ok_or_else(manque)?;
            if alerte.is_none() && est_division_par_zero(op, b) {
                alerte = Some(ErreurEval::DivisionParZero {
                    jeton: tok.to_string(),
                });
            }
            st.push(applique_binaire(op, a, b));
            continue;
        }

        if FONCTIONS_EVALUATION.contains(&tok) {
            let x = st.pop().ok_or_else(|| ErreurEval::OperandesManquants {
                jeton: tok.to_string(),
            })?;
            st.push(applique_fonction(tok, x));
            continue;
        }

        match lit_nombre::<F>(tok) {
            Some(v) => st.push(v),
            None if FONCTIONS_RECONSTRUCTION.contains(&tok) => {
                return Err(ErreurEval::FonctionNonEvaluable(tok.to_string()))
            }
            None => return Err(ErreurEval::JetonInconnu(tok.to_string())),
        }
    }

    match st.as_slice() {
        [v] => Ok(Evaluation { valeur: *v, alerte }),
        _ => Err(ErreurEval::PileFinale {
            profondeur: st.len(),
        }),
    }
}

/// Évaluation détaillée en double précision.
pub fn evaluer_postfixe(expression: &str) -> Result<Evaluation<f64>, ErreurEval> {
    evaluer_avec::<f64>(expression)
}

/// API publique : valeur de l’expression postfixe, ou NaN en cas d’échec.
pub fn evaluate_postfix(expression: &str) -> f32 {
    match evaluer_postfixe(expression) {
        Ok(ev) => {
            if let Some(alerte) = &ev.alerte {
                debug!(entree = expression, alerte = %alerte, "évaluation postfixe");
            }
            ev.valeur_publique()
        }
        Err(e) => {
            debug!(entree = expression, erreur = %e, "évaluation postfixe impossible");
            f32::NAN
        }
    }
}
