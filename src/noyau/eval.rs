//! Noyau — évaluation (pipeline réel)
//!
//! texte -> vérification des parenthèses -> découpe (séquence aplatie)
//!       -> réduction par priorité décroissante -> valeur typée
//!
//! Le registre est passé explicitement : aucune configuration cachée.

use log::debug;

use super::decoupe::{decouper, Element, Sequence};
use super::erreur::{ErreurEval, Resultat};
use super::reduction::Reduction;
use super::registre::Registre;
use super::valeur::Valeur;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    /// Séquence aplatie, reconstruite en texte.
    pub sequence: String,
    /// Un élément par ligne, avec son opérateur de queue.
    pub elements: String,
    /// Une étape de réduction par ligne.
    pub etapes: String,
    pub note: String,
}

/// API publique : évalue une expression avec le registre donné.
pub fn evaluer(expr_str: &str, registre: &Registre) -> Resultat<Valeur> {
    evaluer_avec_demarche(expr_str, registre).map(|(valeur, _d)| valeur)
}

/// Comme `evaluer`, avec la démarche (séquence, éléments, étapes).
pub fn evaluer_avec_demarche(
    expr_str: &str,
    registre: &Registre,
) -> Resultat<(Valeur, DemarcheNoyau)> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe("entrée vide"));
    }
    debug!("évaluation de '{s}'");

    // 1) Découpe
    let sequence = decouper(s, registre)?;
    debug!("séquence : {} ({} élément(s))", sequence, sequence.len());

    // 2) Réduction
    let mut moteur = Reduction::new(registre);
    let valeur = moteur.reduire(&sequence)?;
    debug!("'{s}' = {valeur} ({})", valeur.type_valeur());

    // 3) Démarche
    let d = DemarcheNoyau {
        sequence: sequence.to_string(),
        elements: decrire_elements(&sequence),
        etapes: moteur.into_etapes().join("\n"),
        note: "Pipeline: parenthèses → découpe → réduction par priorité décroissante → valeur typée."
            .into(),
    };

    Ok((valeur, d))
}

fn genre(element: &Element) -> &'static str {
    match element {
        Element::Litteral(_) => "littéral",
        Element::Constante(_) => "constante",
        Element::Appel { .. } => "appel",
        Element::Groupe(_) => "groupe",
    }
}

fn decrire_elements(sequence: &Sequence) -> String {
    sequence
        .maillons()
        .iter()
        .enumerate()
        .map(|(i, m)| match &m.operateur {
            Some(op) => format!("[{i}] {} {}  {op}", genre(&m.element), m.element),
            None => format!("[{i}] {} {}", genre(&m.element), m.element),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
