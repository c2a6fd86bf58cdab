// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - Reconstruction infixe : échec explicite (pas de résultat partiel).
// - Évaluation : raison détaillée ; l’API publique `evaluate_postfix` la replie en NaN.

use thiserror::Error;

/// Échec de la reconstruction postfixe -> infixe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurInfixe {
    #[error("opérandes manquants pour « {jeton} » (jeton n°{position})")]
    OperandesManquants { jeton: String, position: usize },

    #[error("expression postfixe mal formée : {profondeur} fragment(s) restant(s) au lieu de 1")]
    PileFinale { profondeur: usize },
}

/// Échec de l’évaluation postfixe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurEval {
    #[error("jeton inconnu : « {0} »")]
    JetonInconnu(String),

    /// Fonction reconnue par la reconstruction infixe mais pas par l’évaluation (ln, exp).
    #[error("fonction non évaluable : « {0} »")]
    FonctionNonEvaluable(String),

    #[error("opérandes manquants pour « {jeton} »")]
    OperandesManquants { jeton: String },

    /// Non bloquante : portée par `Evaluation::alerte`, jamais renvoyée en `Err`.
    #[error("division par zéro (« {jeton} »)")]
    DivisionParZero { jeton: String },

    #[error("expression postfixe mal formée : {profondeur} valeur(s) restante(s) au lieu de 1")]
    PileFinale { profondeur: usize },
}

/// Échec du pipeline complet (entrée utilisateur -> conversion -> valeur).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurPipeline {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("conversion impossible : {0}")]
    Conversion(#[from] ErreurInfixe),
}
