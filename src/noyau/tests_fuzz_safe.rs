//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : infixe -> postfixe -> infixe -> postfixe garde la même valeur

use std::time::{Duration, Instant};

use super::erreur::ErreurInfixe;
use super::{evaluate_postfix, evaluer_postfixe, infix_to_postfix, postfix_to_infix};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // 0 inclus : les divisions par zéro doivent apparaître
    let n = rng.pick(10);
    if rng.pick(4) == 0 {
        format!("{n}.{}", rng.pick(10))
    } else {
        format!("{n}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => format!("sqrt({})", gen_nombre(rng)),
        1 => format!("sin({})", gen_nombre(rng)),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let op = match rng.pick(6) {
        0 => "+",
        1 => "-",
        2 => "*",
        3 => "/",
        4 => "%",
        _ => "^",
    };
    // arbre déséquilibré : le côté gauche descend parfois plus vite
    let depth_a = if depth > 1 && rng.coin() {
        depth - 2
    } else {
        depth - 1
    };
    let a = gen_expr(rng, depth_a);
    let b = gen_expr(rng, depth - 1);

    // parenthèses aléatoires : certaines redondantes, d’autres nécessaires
    if rng.coin() {
        format!("({a} {op} {b})")
    } else {
        format!("{a} {op} {b}")
    }
}

/// Soupe de caractères (y compris inconnus) : aucune structure garantie.
fn gen_soupe(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '7', '.', '+', '-', '*', '/', '%', '^', '(', ')', ' ', 'x', 's', 'i', 'n', '$',
        'é', '\t',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn meme_valeur(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_aller_retour_valeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus_finis = 0usize;
    let mut vus_nan = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let postfixe = infix_to_postfix(&expr);
        let infixe = postfix_to_infix(&postfixe)
            .unwrap_or_else(|e| panic!("expr={expr:?} postfixe={postfixe:?} err={e}"));
        let postfixe2 = infix_to_postfix(&infixe);

        // même arbre => même suite postfixe
        assert_eq!(postfixe, postfixe2, "expr={expr:?} infixe={infixe:?}");

        let v0 = evaluate_postfix(&postfixe);
        let v1 = evaluate_postfix(&postfixe2);
        assert!(meme_valeur(v0, v1), "expr={expr:?} v0={v0} v1={v1}");

        if v0.is_nan() {
            vus_nan += 1;
        } else {
            vus_finis += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(vus_finis > 30, "trop peu de valeurs: {vus_finis}");
    assert!(vus_nan > 0, "aucun NaN vu: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_soupe_sans_panique_et_deterministe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let len = rng.pick(40) as usize;
        let soupe = gen_soupe(&mut rng, len);

        let p1 = infix_to_postfix(&soupe);
        let p2 = infix_to_postfix(&soupe);
        assert_eq!(p1, p2, "soupe={soupe:?}");

        // la postfixe produite ne contient jamais de parenthèse
        assert!(!p1.contains('(') && !p1.contains(')'), "soupe={soupe:?} p={p1:?}");

        // reconstruction : succès ou échec signalé, jamais de panique
        match postfix_to_infix(&p1) {
            Ok(infixe) => assert!(!infixe.is_empty()),
            Err(ErreurInfixe::OperandesManquants { position, .. }) => assert!(position >= 1),
            Err(ErreurInfixe::PileFinale { profondeur }) => assert_ne!(profondeur, 1),
        }

        // évaluation : NaN <=> erreur structurelle OU domaine
        let v = evaluate_postfix(&p1);
        match evaluer_postfixe(&p1) {
            Ok(ev) => assert!(meme_valeur(v, ev.valeur_publique()), "soupe={soupe:?}"),
            Err(_) => assert!(v.is_nan(), "soupe={soupe:?}"),
        }
    }
}

#[test]
fn fuzz_safe_postfixe_aleatoire() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);
    const JETONS: &[&str] = &["1", "2", "0", "x", "+", "-", "*", "/", "%", "^", "sin", "ln"];

    for _ in 0..300 {
        budget(t0, max);

        let n = rng.pick(12) as usize;
        let postfixe = (0..n)
            .map(|_| JETONS[rng.pick(JETONS.len() as u32) as usize])
            .collect::<Vec<_>>()
            .join(" ");

        let reconstruction = postfix_to_infix(&postfixe);
        match &reconstruction {
            Ok(infixe) => assert!(!infixe.is_empty(), "postfixe={postfixe:?}"),
            Err(ErreurInfixe::OperandesManquants { position, .. }) => {
                assert!((1..=n).contains(position), "postfixe={postfixe:?}")
            }
            Err(ErreurInfixe::PileFinale { profondeur }) => {
                assert_ne!(*profondeur, 1, "postfixe={postfixe:?}")
            }
        }

        // même discipline de pile : une reconstruction ratée ne s’évalue jamais
        let v = evaluate_postfix(&postfixe);
        match evaluer_postfixe(&postfixe) {
            Ok(ev) => {
                assert!(reconstruction.is_ok(), "postfixe={postfixe:?}");
                assert!(meme_valeur(v, ev.valeur_publique()), "postfixe={postfixe:?}");
                if ev.alerte.is_some() {
                    assert!(v.is_nan() || postfixe.contains('^'), "postfixe={postfixe:?} v={v}");
                }
            }
            Err(_) => assert!(v.is_nan(), "postfixe={postfixe:?}"),
        }
    }
}
