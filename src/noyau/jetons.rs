// src/noyau/jetons.rs

/// Précédence synthétique d’une fonction sur la pile d’opérateurs
/// (au-dessus de tout opérateur binaire).
pub const PRECEDENCE_FONCTION: u8 = 4;

/// Fonctions unaires reconnues par la reconstruction infixe (postfixe -> infixe).
pub const FONCTIONS_RECONSTRUCTION: &[&str] = &[
    "sin", "sen", "cos", "tan", "tg", "log", "ln", "exp", "sqrt", "raiz",
];

/// Fonctions unaires reconnues par l’évaluation.
/// NOTE: ln et exp n’y sont pas ; voir `ErreurEval::FonctionNonEvaluable`.
pub const FONCTIONS_EVALUATION: &[&str] =
    &["sin", "sen", "cos", "tan", "tg", "log", "sqrt", "raiz"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Opérateur binaire (un seul caractère).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Division,
    Modulo,
    Puissance, // ^
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' => Some(Self::Fois),
            '/' => Some(Self::Division),
            '%' => Some(Self::Modulo),
            '^' => Some(Self::Puissance),
            _ => None,
        }
    }

    /// Reconnaît un jeton postfixe d’exactement un caractère opérateur.
    pub fn depuis_jeton(tok: &str) -> Option<Self> {
        let mut chars = tok.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::depuis_char(c),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Moins => '-',
            Self::Fois => '*',
            Self::Division => '/',
            Self::Modulo => '%',
            Self::Puissance => '^',
        }
    }

    /// 1 = additif, 2 = multiplicatif, 3 = puissance.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Moins => 1,
            Self::Fois | Self::Division | Self::Modulo => 2,
            Self::Puissance => 3,
        }
    }

    pub fn associativite(self) -> Associativite {
        match self {
            Self::Puissance => Associativite::Droite,
            _ => Associativite::Gauche,
        }
    }
}

/// Rôle d’un identifiant, décidé par le caractère qui le suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Fonction, // suivi de '('
    Variable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Chiffres et '.' (aucune validation du nombre de points).
    Num(String),
    Ident(String, Role),
    Op(Operateur),
    LPar,
    RPar,
}

impl Tok {
    pub fn texte(&self) -> String {
        match self {
            Tok::Num(s) | Tok::Ident(s, _) => s.clone(),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        }
    }
}

/// Tokenize une chaîne infixe en jetons.
/// Supporte:
/// - nombres : suite maximale de chiffres et de '.' (ex: 12, 3.14)
/// - identifiants : suite maximale de lettres ASCII ; fonction si le prochain
///   caractère non blanc est '(' , variable sinon
/// - opérateurs + - * / % ^
/// - parenthèses ( )
///
/// Les caractères inconnus sont ignorés en silence.
pub fn tokenize(s: &str) -> Vec<Tok> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            out.push(Tok::Num(chars[start..i].iter().collect()));
            continue;
        }

        // Identifiant : fonction ou variable selon le regard en avant
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let nom: String = chars[start..i].iter().collect();

            let mut k = i;
            while k < chars.len() && chars[k].is_whitespace() {
                k += 1;
            }
            let role = if k < chars.len() && chars[k] == '(' {
                Role::Fonction
            } else {
                Role::Variable
            };

            out.push(Tok::Ident(nom, role));
            continue;
        }

        match c {
            '(' => out.push(Tok::LPar),
            ')' => out.push(Tok::RPar),
            _ => {
                if let Some(op) = Operateur::depuis_char(c) {
                    out.push(Tok::Op(op));
                }
                // sinon : caractère inattendu, ignoré
            }
        }
        i += 1;
    }

    out
}

/// Format utilitaire (trace) : liste de jetons en texte, séparés par un espace.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens.iter().map(Tok::texte).collect::<Vec<_>>().join(" ")
}

/// Découpe un texte postfixe sur l’espace ; les espaces répétés ne produisent pas de jeton vide.
pub fn jetons_postfixes(s: &str) -> impl Iterator<Item = &str> {
    s.split(' ').filter(|t| !t.is_empty())
}
