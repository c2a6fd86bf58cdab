//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (mode, entrée, forme convertie, valeur,
//! erreur, démarche, historique) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Persistance : mode, dernière entrée et historique sont sérialisés dans le
//! stockage eframe ; le reste est recalculé.

use std::collections::VecDeque;

use calculatrice_rpn::noyau::Mode;
use serde::{Deserialize, Serialize};

/// Garde-fou : nombre maximal d’entrées conservées dans l’historique.
pub const HISTORIQUE_MAX: usize = 50;

/// Noms retirés d’un bloc par DEL (appel infixe d’abord, puis jeton postfixe).
const NOMS_EFFACABLES: [&str; 10] = [
    "sqrt(", "sin(", "cos(", "tan(", "log(", "sqrt", "sin", "cos", "tan", "log",
];

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub postfixe: String,
}

/// Une conversion passée (la plus récente en tête).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub mode: Mode,
    pub entree: String,
    pub forme: String,
    pub valeur: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCalc {
    // --- paramètres ---
    pub mode: Mode,

    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    #[serde(skip)]
    pub forme: String, // postfixe (mode 1) ou infixe (mode 2)
    #[serde(skip)]
    pub valeur: String, // valeur affichée (%g) ou raison de l’échec
    #[serde(skip)]
    pub valeur_dispo: bool, // false si NaN / rien à lire
    #[serde(skip)]
    pub erreur: String, // conversion impossible

    // --- démarche (panneau d’explication) ---
    #[serde(skip)]
    pub demarche: Demarche,

    pub historique: VecDeque<EntreeHistorique>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    #[serde(skip)]
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            entree: String::new(),
            forme: String::new(),
            valeur: String::new(),
            valeur_dispo: false, // au démarrage : rien à lire
            erreur: String::new(),
            demarche: Demarche::default(),
            historique: VecDeque::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /// Restaure l’état persistant s’il existe (sinon défauts).
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.storage
            .and_then(|s| eframe::get_value::<Self>(s, eframe::APP_KEY))
            .map(|mut app| {
                app.focus_entree = true;
                app
            })
            .unwrap_or_default()
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + historique + mode par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.historique.clear();
        self.mode = Mode::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.forme.clear();
        self.valeur.clear();
        self.erreur.clear();
        self.valeur_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Changer de mode invalide les résultats affichés (ils ne parlent plus de la même chose).
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear_resultats();
        }
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur de conversion.
    ///
    /// Rien n’est évalué après une conversion ratée : forme, valeur et démarche sont vidées.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.clear_resultats();
        self.erreur = msg.into();
    }

    /// Utilitaire : déposer un résultat complet (forme + valeur optionnelle + démarche).
    /// `valeur` : Ok(texte) si évaluable, Err(message) sinon.
    pub fn set_resultats(
        &mut self,
        forme: impl Into<String>,
        valeur: Result<String, String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.forme = forme.into();
        self.demarche = demarche;

        match valeur {
            Ok(v) => {
                self.valeur_dispo = true;
                self.valeur = v;
            }
            Err(msg) => {
                self.valeur_dispo = false;
                self.valeur = msg;
            }
        }

        self.focus_entree = true;
    }

    /// Ajoute en tête de l’historique ; borne à HISTORIQUE_MAX.
    pub fn ajoute_historique(&mut self, e: EntreeHistorique) {
        // même conversion deux fois de suite : une seule ligne
        if self.historique.front() == Some(&e) {
            return;
        }
        self.historique.push_front(e);
        self.historique.truncate(HISTORIQUE_MAX);
    }

    /// DEL : retire d’un coup un nom de fonction complet, sinon un caractère.
    /// Les espaces de fin (séparateurs postfixes) partent avec.
    pub fn efface_dernier(&mut self) {
        let garde = self.entree.trim_end_matches(' ').len();
        self.entree.truncate(garde);

        match NOMS_EFFACABLES.iter().find(|nom| self.entree.ends_with(*nom)) {
            Some(nom) => {
                let garde = self.entree.len() - nom.len();
                self.entree.truncate(garde);
            }
            None => {
                self.entree.pop();
            }
        }
        self.focus_entree = true;
    }

    /// Insère un jeton dans l’entrée.
    ///
    /// En mode postfixe, tout ce qui n’est pas un chiffre est isolé par des espaces ;
    /// les chiffres restent collés pour former un nombre.
    pub fn insere(&mut self, jeton: &str) {
        let separe = self.mode == Mode::PostfixeVersInfixe
            && !jeton.chars().all(|c| c.is_ascii_digit() || c == '.');

        if separe && !self.entree.is_empty() && !self.entree.ends_with(' ') {
            self.entree.push(' ');
        }
        // la touche espace ne fait que séparer
        let jeton = if separe { jeton.trim() } else { jeton };
        if !jeton.is_empty() {
            self.entree.push_str(jeton);
            if separe {
                self.entree.push(' ');
            }
        }
        self.focus_entree = true;
    }

    /// Fonction telle qu’insérée par son bouton : appel en infixe, jeton en postfixe.
    pub fn forme_fonction(&self, nom: &str) -> String {
        match self.mode {
            Mode::InfixeVersPostfixe => format!("{nom}("),
            Mode::PostfixeVersInfixe => nom.to_string(),
        }
    }

    /// Recharge une entrée de l’historique dans le champ de saisie (avec son mode).
    pub fn rappelle(&mut self, index: usize) {
        if let Some(e) = self.historique.get(index).cloned() {
            self.set_mode(e.mode);
            self.entree = e.entree;
            self.focus_entree = true;
        }
    }
}
