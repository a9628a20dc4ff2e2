// src/lib.rs
//
// Bibliothèque : le noyau d’évaluation, sans interface.
// L’application egui (src/main.rs) l’utilise comme n’importe quel appelant :
//   evaluateur_jee::noyau::{evaluer, Registre, Valeur, ...}

pub mod noyau;
