//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de l’évaluateur (entrée, valeur, type, erreur, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de découpe, pas de réduction).
//! - Actions déterministes, sans effet de bord caché.

use evaluateur_jee::noyau::{DemarcheNoyau, Valeur};

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Demarche {
    pub sequence: String,
    pub elements: String,
    pub etapes: String,
    pub note: String,
}

impl From<DemarcheNoyau> for Demarche {
    fn from(d: DemarcheNoyau) -> Self {
        Self {
            sequence: d.sequence,
            elements: d.elements,
            etapes: d.etapes,
            note: d.note,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,       // valeur rendue (5, 2.5, inf…)
    pub type_resultat: String,  // étiquette de type (INT, DOUBLE…)
    pub erreur: String,         // message d’erreur (si découpe/réduction échoue)
    pub resultat_dispo: bool,   // false tant qu’aucune évaluation n’a réussi

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            type_resultat: String::new(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.type_resultat.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Place une erreur.
    ///
    /// On CONSERVE le dernier résultat pour ne pas “effacer l’écran” sur une faute ;
    /// la démarche, elle, ne correspond plus à rien et disparaît.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet (valeur + type + démarche).
    pub fn set_resultat(&mut self, valeur: &Valeur, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = valeur.to_string();
        self.type_resultat = valeur.type_valeur().to_string();
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
