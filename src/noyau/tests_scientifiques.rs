//! Tests scientifiques (campagne) : propriétés du pipeline complet.
//!
//! - précédence, associativité, fonctions (degrés)
//! - division / modulo par zéro -> NaN
//! - aller-retour infixe -> postfixe -> infixe : même valeur
//! - entrées mal formées : échec signalé, jamais de panique
//! - stress borné (profondeur, longueur) sous budget temps

use std::time::{Duration, Instant};

use super::{evaluate_postfix, infix_to_postfix, postfix_to_infix};

fn valeur_infixe(expr: &str) -> f32 {
    evaluate_postfix(&infix_to_postfix(expr))
}

/// Égalité stricte, NaN == NaN.
fn meme_valeur(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn assert_aller_retour(expr: &str) {
    let postfixe = infix_to_postfix(expr);
    let infixe = postfix_to_infix(&postfixe)
        .unwrap_or_else(|e| panic!("expr={expr:?} postfixe={postfixe:?} err={e}"));
    let v0 = evaluate_postfix(&postfixe);
    let v1 = valeur_infixe(&infixe);
    assert!(
        meme_valeur(v0, v1),
        "expr={expr:?} infixe={infixe:?} v0={v0} v1={v1}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de base ------------------------ */

#[test]
fn sci_precedence() {
    assert_eq!(infix_to_postfix("3 + 4 * 2"), "3 4 2 * +");
    assert_eq!(evaluate_postfix("3 4 2 * +"), 11.0);
    assert_eq!(valeur_infixe("(3 + 4) * 2"), 14.0);
    assert_eq!(valeur_infixe("10 - 4 % 3"), 9.0);
}

#[test]
fn sci_associativite_droite() {
    assert_eq!(infix_to_postfix("2 ^ 3 ^ 2"), "2 3 2 ^ ^");
    assert_eq!(evaluate_postfix("2 3 2 ^ ^"), 512.0);
    assert_eq!(valeur_infixe("(2 ^ 3) ^ 2"), 64.0);
}

#[test]
fn sci_associativite_gauche() {
    assert_eq!(valeur_infixe("100 / 10 / 5"), 2.0);
    assert_eq!(valeur_infixe("10 - 3 - 2"), 5.0);
}

#[test]
fn sci_fonctions_degres() {
    assert_eq!(infix_to_postfix("sin(30)"), "30 sin");
    assert_eq!(evaluate_postfix("30 sin"), 0.5);
    assert!((valeur_infixe("cos(60) + sen(30)") - 1.0).abs() < 1e-6);
    assert!((valeur_infixe("raiz(9) * log(100)") - 6.0).abs() < 1e-6);
}

#[test]
fn sci_division_modulo_par_zero() {
    assert!(evaluate_postfix("5 0 /").is_nan());
    assert!(evaluate_postfix("5 0 %").is_nan());
    assert!(valeur_infixe("1 / (2 - 2)").is_nan());
    // NaN empilé puis absorbé par la puissance
    assert_eq!(valeur_infixe("(5 / 0) ^ 0"), 1.0);
}

#[test]
fn sci_variables_passent() {
    assert_eq!(infix_to_postfix("x + y"), "x y +");
    assert_eq!(postfix_to_infix("x y +").as_deref(), Ok("(x + y)"));
}

#[test]
fn sci_mal_forme_detecte() {
    assert!(postfix_to_infix("+ 3").is_err());
    assert!(postfix_to_infix("1 2 3 +").is_err());
    assert!(evaluate_postfix("+ 3").is_nan());
}

#[test]
fn sci_ln_exp_reconstruits_mais_non_evalues() {
    assert_eq!(infix_to_postfix("ln(2) + exp(1)"), "2 ln 1 exp +");
    assert_eq!(
        postfix_to_infix("2 ln 1 exp +").as_deref(),
        Ok("(ln(2) + exp(1))")
    );
    assert!(evaluate_postfix("2 ln 1 exp +").is_nan());
}

/* ------------------------ Aller-retour ------------------------ */

#[test]
fn sci_aller_retour_valeur_preservee() {
    for expr in [
        "1 + 2 + 3",
        "1 - (2 - 3)",
        "1 - 2 - 3",
        "2 * (3 + 4)",
        "8 / (4 / 2)",
        "8 / 4 / 2",
        "(1 + 2) * (3 - 4) / 5",
        "7 - 2 * 3 + 9 / 3",
        "2 ^ 3 ^ 2",
        "(2 ^ 3) ^ 2",
        "sqrt(16) * (1 + 2)",
        "10 % 4 * 3",
        "10 % (4 * 3)",
    ] {
        assert_aller_retour(expr);
    }
}

#[test]
fn sci_aller_retour_stable_au_second_tour() {
    // une fois reconstruite, la forme infixe ne bouge plus
    let p = infix_to_postfix("(1 - (2 - 3)) * 4 ^ (5 - 6)");
    let i1 = postfix_to_infix(&p).expect("ok");
    let i2 = postfix_to_infix(&infix_to_postfix(&i1)).expect("ok");
    assert_eq!(i1, i2);
    assert_eq!(i1, "((1 - (2 - 3)) * 4 ^ (5 - 6))");
}

#[test]
fn sci_evaluation_deterministe() {
    let e = "sin(30) * 3.7 / 1.3 - 2 ^ 0.5 + 17 % 5";
    let v0 = valeur_infixe(e);
    for _ in 0..50 {
        assert!(meme_valeur(valeur_infixe(e), v0));
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let expr = vec!["1"; 2000].join(" + ");
    budget(t0, max);

    assert_eq!(valeur_infixe(&expr), 2000.0);
    assert_aller_retour(&expr);
    budget(t0, max);
}

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    // (((...(1 + 1) + 1)...) + 1) : pas de récursion dans le noyau
    let mut expr = "1".to_string();
    for _ in 0..500 {
        expr = format!("({expr} + 1)");
    }
    budget(t0, max);

    assert_eq!(valeur_infixe(&expr), 501.0);
    budget(t0, max);
}

#[test]
fn sci_stress_fonctions_imbriquees() {
    let mut expr = "0".to_string();
    for _ in 0..200 {
        expr = format!("cos({expr})");
    }
    let v = valeur_infixe(&expr);
    assert!(v.is_finite());
    assert!(postfix_to_infix(&infix_to_postfix(&expr)).is_ok());
}
