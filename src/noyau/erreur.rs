// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - Tout échoue vite : aucune reprise interne, aucun résultat partiel.
// - Le message nomme toujours le jeton / symbole / nombre fautif.

use thiserror::Error;

/// Résultat de toute opération du noyau.
pub type Resultat<T> = Result<T, ErreurEval>;

/// Défaut d’équilibre des parenthèses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurParentheses {
    /// `)` sans `(` correspondante.
    #[error("')' sans '(' à la position {position}")]
    Sousdebordement { position: usize },

    /// Imbrication au-delà du plafond.
    #[error("imbrication au-delà de {plafond} niveaux")]
    Debordement { plafond: usize },

    /// `(` jamais refermée.
    #[error("{ouvertes} '(' non refermée(s)")]
    NonFermee { ouvertes: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurEval {
    /// Littéral malformé, opérande vide, appel de fonction mal formé, espace dans un identifiant.
    #[error("syntaxe : {0}")]
    Syntaxe(String),

    #[error("parenthèses : {0}")]
    Parentheses(#[from] ErreurParentheses),

    /// Ni littéral, ni opérateur, ni fonction (pas d’environnement de variables).
    #[error("nom inconnu : '{0}'")]
    NomInconnu(String),

    /// Symboles restés accrochés après tous les niveaux de priorité.
    #[error("opérateur(s) non résolu(s) : {}", .0.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(", "))]
    OperateurNonResolu(Vec<String>),

    /// Symbole ou nom déjà enregistré, ou invalide.
    #[error("enregistrement : {0}")]
    Enregistrement(String),

    /// `max == usize::MAX` : pas de borne haute.
    #[error("fonction '{nom}' : {recu} argument(s) reçu(s), attendu {}", bornes_arite(*min, *max))]
    Arite {
        nom: String,
        min: usize,
        max: usize,
        recu: usize,
    },

    /// Opération numérique sur une valeur non numérique.
    #[error("type : {0}")]
    Type(String),

    /// Division entière par zéro.
    #[error("arithmétique : {0}")]
    Arithmetique(String),
}

fn bornes_arite(min: usize, max: usize) -> String {
    if max == usize::MAX {
        format!("au moins {min}")
    } else if min == max {
        format!("exactement {min}")
    } else {
        format!("entre {min} et {max}")
    }
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }

    pub fn type_invalide(msg: impl Into<String>) -> Self {
        ErreurEval::Type(msg.into())
    }
}
