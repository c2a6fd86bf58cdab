// src/noyau/format.rs
//
// Affichage d’une valeur numérique, façon printf("%g") :
// 6 chiffres significatifs, zéros finaux retirés, forme exponentielle
// si l’exposant décimal est < -4 ou >= 6.

/// Chiffres significatifs affichés.
const PRECISION: i32 = 6;

fn retire_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Texte d’une valeur évaluée ; NaN s’affiche "nan".
pub fn format_valeur(v: f32) -> String {
    let x = f64::from(v);

    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // L’exposant se lit APRÈS arrondi à PRECISION chiffres (999999.7 -> 1e+06).
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let Some((mantisse, exp)) = sci
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e)))
    else {
        return sci.clone();
    };

    if exp < -4 || exp >= PRECISION {
        let signe = if exp < 0 { '-' } else { '+' };
        format!("{}e{signe}{:02}", retire_zeros(mantisse), exp.abs())
    } else {
        let decimales = (PRECISION - 1 - exp) as usize;
        retire_zeros(&format!("{x:.decimales$}")).to_string()
    }
}
