//! Noyau d’évaluation typé
//!
//! Organisation interne :
//! - valeur.rs     : valeurs typées + ordre d’élargissement BYTE < SHORT < INT < LONG < FLOAT < DOUBLE
//! - erreur.rs     : taxonomie des erreurs
//! - operateurs.rs : opérateurs binaires (symbole, priorité) + intégrés + - * /
//! - fonctions.rs  : fonctions nommées (arité) + intégrées abs, sqr, min, max
//! - registre.rs   : registre explicite (configuration de l’évaluateur)
//! - lecture.rs    : littéraux (suffixes f l s b)
//! - decoupe.rs    : séquence aplatie (parenthèses, signes, appels)
//! - reduction.rs  : réduction par priorité décroissante
//! - eval.rs       : pipeline complet

pub mod decoupe;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod lecture;
pub mod operateurs;
pub mod reduction;
pub mod registre;
pub mod valeur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{evaluer, evaluer_avec_demarche, DemarcheNoyau};
pub use registre::{registre_standard, Registre};
pub use valeur::{TypeValeur, Valeur};
