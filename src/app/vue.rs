// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter convertit (quand le champ est focus)
// - Tactile : boutons d’insertion, focus redonné après clic (focus_entree)
// - Historique cliquable : recharge l’entrée et son mode

use calculatrice_rpn::noyau::erreur::ErreurPipeline;
use calculatrice_rpn::noyau::{execute, format_valeur, Mode};
use eframe::egui;
use tracing::warn;

use super::etat::{AppCalc, Demarche, EntreeHistorique};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_mode(ui);
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
                self.ui_historique(ui);
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Mode :");
            for mode in [Mode::InfixeVersPostfixe, Mode::PostfixeVersInfixe] {
                if ui
                    .selectable_label(self.mode == mode, mode.libelle())
                    .clicked()
                {
                    self.set_mode(mode);
                }
            }
        });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        let (libelle, indice) = match self.mode {
            Mode::InfixeVersPostfixe => ("Expression infixe :", "Ex: 3 + 4 * 2, sin(30) ^ 2, (x + y) / 2"),
            Mode::PostfixeVersInfixe => ("Expression postfixe :", "Ex: 3 4 2 * +, 30 sin 2 ^"),
        };
        ui.label(libelle);

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text(indice)
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter convertit (seulement si le champ est focus)
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.convertir_via_noyau();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        // C = entrée seulement ; CLR = résultats seulement ; AC = tout
        ui.horizontal(|ui| {
            for (libelle, bulle, action) in ACTIONS {
                let resp = ui
                    .add_sized([56.0, 30.0], egui::Button::new(libelle))
                    .on_hover_text(bulle);
                if resp.clicked() {
                    self.applique(action);
                }
            }
        });

        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            for jeton in ["(", ")", "+", "-", "*", "/", "%", "^"] {
                self.touche(ui, jeton, jeton);
            }
            ui.separator();
            for nom in FONCTIONS_CLAVIER {
                let jeton = self.forme_fonction(nom);
                self.touche(ui, nom, &jeton);
            }
            ui.separator();
            for var in ["x", "y"] {
                self.touche(ui, var, var);
            }

            ui.add_space(10.0);
            if ui.add_sized([64.0, 32.0], egui::Button::new("=")).clicked() {
                self.convertir_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        egui::Grid::new("pave_numerique_rpn")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for jeton in rangee {
                        let libelle = if jeton == " " { "␣" } else { jeton };
                        self.touche(ui, libelle, jeton);
                    }
                    ui.end_row();
                }
            });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn applique(&mut self, action: Action) {
        match action {
            Action::ClearEntree => self.clear_entree(),
            Action::ClearResultats => self.clear_resultats(),
            Action::ResetTotal => self.reset_total(),
            Action::Backspace => self.efface_dernier(),
        }
        self.focus_entree = true;
    }

    fn touche(&mut self, ui: &mut egui::Ui, libelle: &str, jeton: &str) {
        if ui.add_sized([46.0, 28.0], egui::Button::new(libelle)).clicked() {
            self.insere(jeton);
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        let titre = match self.mode {
            Mode::InfixeVersPostfixe => "Postfixe :",
            Mode::PostfixeVersInfixe => "Infixe :",
        };
        ui.label(titre);
        Self::champ_monospace(ui, "forme_out", &self.forme, 1);

        ui.add_space(6.0);

        ui.label("Valeur :");
        if self.valeur_dispo {
            Self::champ_monospace(ui, "valeur_out", &self.valeur, 1);
        } else if !self.valeur.is_empty() {
            ui.colored_label(ui.visuals().warn_fg_color, &self.valeur);
        } else {
            ui.monospace("indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                if !self.demarche.jetons.is_empty() {
                    Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                }
                Self::champ_demarche(ui, "Postfixe évaluée", "demarche_postfixe", &self.demarche.postfixe);
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut rappel = None;

        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .default_open(true)
            .show(ui, |ui| {
                for (i, e) in self.historique.iter().enumerate() {
                    let texte = format!("{}  |  {}  ⇒  {}  =  {}", e.mode.libelle(), e.entree, e.forme, e.valeur);
                    if ui
                        .add(egui::Label::new(egui::RichText::new(texte).monospace()).sense(egui::Sense::click()))
                        .on_hover_text("Recharger cette entrée")
                        .clicked()
                    {
                        rappel = Some(i);
                    }
                }
            });

        if let Some(i) = rappel {
            self.rappelle(i);
        }
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    /// Exécute le mode courant via le noyau, puis dépose forme/valeur/démarche dans l’état UI.
    fn convertir_via_noyau(&mut self) {
        let mode = self.mode;
        let entree = self.entree.trim().to_string();

        match execute(mode, &entree) {
            Ok(r) => {
                let valeur = if r.valeur.is_nan() {
                    let msg = match &r.raison {
                        Some(raison) => format!("erreur lors de l’évaluation : {raison}"),
                        None => "erreur lors de l’évaluation".to_string(),
                    };
                    warn!(entree = %entree, "{msg}");
                    Err(msg)
                } else {
                    Ok(format_valeur(r.valeur))
                };

                self.ajoute_historique(EntreeHistorique {
                    mode,
                    entree,
                    forme: r.forme.clone(),
                    valeur: format_valeur(r.valeur),
                });

                let d_ui = Demarche {
                    jetons: r.demarche.jetons,
                    postfixe: r.demarche.postfixe,
                };
                self.set_resultats(r.forme, valeur, d_ui);
            }
            // Ligne vide : ignorée, comme une validation sans rien taper.
            Err(ErreurPipeline::EntreeVide) => {
                self.focus_entree = true;
            }
            Err(e @ ErreurPipeline::Conversion(_)) => {
                warn!(entree = %entree, erreur = %e, "conversion impossible");
                self.set_erreur(format!("Erreur : {e}"));
            }
        }
    }
}

const FONCTIONS_CLAVIER: [&str; 5] = ["sin", "cos", "tan", "log", "sqrt"];

const PAVE: [[&str; 4]; 3] = [["7", "8", "9", "."], ["4", "5", "6", " "], ["1", "2", "3", "0"]];

const ACTIONS: [(&str, &str, Action); 4] = [
    ("C", "Efface seulement l’entrée", Action::ClearEntree),
    ("CLR", "Efface résultats + erreur + démarche", Action::ClearResultats),
    ("AC", "Remise à zéro totale (historique compris)", Action::ResetTotal),
    ("DEL", "Efface le dernier symbole", Action::Backspace),
];

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}
