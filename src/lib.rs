//! Calculatrice RPN — bibliothèque
//!
//! Le noyau (tokenisation, shunting-yard, reconstruction infixe, évaluation)
//! est exposé ici ; l’interface eframe (src/main.rs + src/app/) n’en est qu’un appelant.

pub mod noyau;

pub use noyau::{evaluate_postfix, infix_to_postfix, postfix_to_infix};
