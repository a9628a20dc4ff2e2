// src/noyau/registre.rs
//
// Registre = configuration de l’évaluateur (opérateurs + fonctions).
// - Valeur possédée par l’appelant, passée par référence à l’évaluation.
// - Mutable seulement pendant la phase de démarrage (&mut self) ; ensuite lecture seule,
//   partageable entre threads (Send + Sync).
// - Doublons refusés : l’original reste en place.
// - Casse : une seule règle pour symboles et noms, repli ASCII (A-Z ~ a-z, le reste tel quel).

use std::collections::HashMap;
use std::sync::OnceLock;

use log::debug;

use super::erreur::{ErreurEval, Resultat};
use super::fonctions::{fonctions_integrees, Fonction};
use super::operateurs::{operateurs_integres, Operateur};

#[derive(Clone, Debug, Default)]
pub struct Registre {
    // trié par longueur de symbole décroissante (stable sur l’ordre d’enregistrement)
    operateurs: Vec<Operateur>,
    // clé = nom en minuscules ASCII
    fonctions: HashMap<String, Fonction>,
}

impl Registre {
    /// Registre vide : aucun opérateur, aucune fonction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registre pré-rempli : + - * / et abs, sqr, min, max.
    /// Les intégrés sont valides et distincts : insertion directe.
    pub fn standard() -> Self {
        let mut r = Self::new();
        for op in operateurs_integres() {
            r.inserer_operateur(op);
        }
        for f in fonctions_integrees() {
            r.inserer_fonction(f);
        }
        r
    }

    pub fn enregistrer_operateur(&mut self, op: Operateur) -> Resultat<()> {
        let symbole = op.symbole();
        if symbole.is_empty() {
            return Err(ErreurEval::Enregistrement("symbole d’opérateur vide".into()));
        }
        if symbole
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ','))
        {
            return Err(ErreurEval::Enregistrement(format!(
                "symbole d’opérateur invalide '{symbole}'"
            )));
        }
        if self.operateur(symbole).is_some() {
            return Err(ErreurEval::Enregistrement(format!(
                "opérateur '{symbole}' déjà enregistré"
            )));
        }

        self.inserer_operateur(op);
        Ok(())
    }

    fn inserer_operateur(&mut self, op: Operateur) {
        debug!("opérateur '{}' enregistré (priorité {})", op.symbole(), op.priorite());

        // insertion après tous les symboles de longueur >= (stabilité)
        let len = op.symbole().len();
        let pos = self
            .operateurs
            .iter()
            .position(|o| o.symbole().len() < len)
            .unwrap_or(self.operateurs.len());
        self.operateurs.insert(pos, op);
    }

    pub fn enregistrer_fonction(&mut self, f: Fonction) -> Resultat<()> {
        let nom = f.nom();
        if nom.is_empty()
            || nom
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ','))
        {
            return Err(ErreurEval::Enregistrement(format!(
                "nom de fonction invalide '{nom}'"
            )));
        }
        if f.min_args() > f.max_args() {
            return Err(ErreurEval::Enregistrement(format!(
                "fonction '{nom}' : min_args {} > max_args {}",
                f.min_args(),
                f.max_args()
            )));
        }

        if self.fonction(nom).is_some() {
            return Err(ErreurEval::Enregistrement(format!(
                "fonction '{nom}' déjà enregistrée"
            )));
        }

        self.inserer_fonction(f);
        Ok(())
    }

    fn inserer_fonction(&mut self, f: Fonction) {
        debug!(
            "fonction '{}' enregistrée ({}..={} arguments)",
            f.nom(),
            f.min_args(),
            f.max_args()
        );
        self.fonctions.insert(f.nom().to_ascii_lowercase(), f);
    }

    /// Opérateurs, symboles les plus longs d’abord.
    pub fn operateurs(&self) -> &[Operateur] {
        &self.operateurs
    }

    pub fn operateur(&self, symbole: &str) -> Option<&Operateur> {
        self.operateurs
            .iter()
            .find(|o| o.symbole().eq_ignore_ascii_case(symbole))
    }

    pub fn fonction(&self, nom: &str) -> Option<&Fonction> {
        self.fonctions.get(&nom.to_ascii_lowercase())
    }

    /// Opérateurs groupés par priorité, de la plus haute à la plus basse.
    pub fn par_priorite(&self) -> Vec<(i32, Vec<&Operateur>)> {
        let mut groupes: Vec<(i32, Vec<&Operateur>)> = Vec::new();
        for op in &self.operateurs {
            match groupes.iter_mut().find(|(p, _)| *p == op.priorite()) {
                Some((_, ops)) => ops.push(op),
                None => groupes.push((op.priorite(), vec![op])),
            }
        }
        groupes.sort_by(|a, b| b.0.cmp(&a.0));
        groupes
    }
}

static REGISTRE_STANDARD: OnceLock<Registre> = OnceLock::new();

/// Registre standard partagé (construit une seule fois, ensuite lecture seule).
pub fn registre_standard() -> &'static Registre {
    REGISTRE_STANDARD.get_or_init(Registre::standard)
}
