//! Noyau RPN
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation + descripteurs d’opérateurs + vocabulaire des fonctions
//! - rpn.rs      : shunting-yard (infixe -> postfixe)
//! - infixe.rs   : postfixe -> infixe (parenthésage minimal)
//! - eval.rs     : évaluation postfixe (f64 interne, NaN en sortie si échec)
//! - format.rs   : affichage des valeurs façon %g
//! - erreur.rs   : erreurs typées
//! - pipeline.rs : les deux modes de l’interface
//!
//! Toutes les opérations sont pures : aucun état partagé entre deux appels.

pub mod erreur;
pub mod eval;
pub mod format;
pub mod infixe;
pub mod jetons;
pub mod pipeline;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{evaluate_postfix, evaluer_postfixe, Evaluation};
pub use format::format_valeur;
pub use infixe::postfix_to_infix;
pub use pipeline::{execute, Mode, Resultat};
pub use rpn::infix_to_postfix;
