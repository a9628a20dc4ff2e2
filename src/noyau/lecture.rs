// src/noyau/lecture.rs
//
// Lecture d’un littéral (résolution différée, au moment de `resoudre()`).
//
// Règles :
// - on retire d’abord les parenthèses extérieures équilibrées,
// - classe [0-9.flsb]+ => nombre :
//     suffixe f => FLOAT, l => LONG, s => SHORT, b => BYTE,
//     sinon '.' => DOUBLE, sinon INT,
// - espace dans le texte => identifiant invalide (Syntaxe),
// - tout le reste => nom inconnu (aucun environnement de variables).

use std::str::FromStr;

use super::decoupe::retirer_parentheses;
use super::erreur::{ErreurEval, Resultat};
use super::valeur::Valeur;

fn est_numerique(texte: &str) -> bool {
    !texte.is_empty()
        && texte
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'f' | 'l' | 's' | 'b'))
}

fn nombre<T: FromStr>(chiffres: &str, texte: &str, genre: &str) -> Resultat<T> {
    chiffres
        .parse::<T>()
        .map_err(|_| ErreurEval::syntaxe(format!("littéral {genre} invalide '{texte}'")))
}

/// Convertit un littéral en valeur.
pub fn lire_litteral(brut: &str) -> Resultat<Valeur> {
    let texte = retirer_parentheses(brut.trim());

    if est_numerique(texte) {
        // suffixe ASCII : découpe sûre sur le dernier octet
        let (corps, suffixe) = texte.split_at(texte.len() - 1);
        return match suffixe {
            "f" => Ok(Valeur::Float(nombre(corps, texte, "FLOAT")?)),
            "l" => Ok(Valeur::Long(nombre(corps, texte, "LONG")?)),
            "s" => Ok(Valeur::Short(nombre(corps, texte, "SHORT")?)),
            "b" => Ok(Valeur::Byte(nombre(corps, texte, "BYTE")?)),
            _ if texte.contains('.') => Ok(Valeur::Double(nombre(texte, texte, "DOUBLE")?)),
            _ => Ok(Valeur::Int(nombre(texte, texte, "INT")?)),
        };
    }

    if texte.is_empty() {
        return Err(ErreurEval::syntaxe("littéral vide"));
    }
    if texte.chars().any(char::is_whitespace) {
        return Err(ErreurEval::syntaxe(format!(
            "identifiant invalide '{texte}'"
        )));
    }
    Err(ErreurEval::NomInconnu(texte.to_string()))
}
