// src/noyau/decoupe.rs
//
// Découpe : chaîne brute -> séquence aplatie d’éléments reliés par leur opérateur de queue.
//
// Pas de jetons ni d’AST ici : la découpe garantit seulement un aplatissement fidèle
// (ordre conservé) ; la priorité des opérateurs est entièrement gérée par la réduction.
//
// Règles :
// - parenthèses extérieures équilibrées retirées (tant qu’elles englobent tout),
// - coupe à chaque opérateur de niveau 0 (symbole le plus long d’abord, insensible à la casse),
// - opérande entièrement parenthésée => Groupe (ou élément seul si un seul élément),
// - `nom(args)` => Appel (arguments gardés bruts, découpés à la résolution),
// - sinon => Littéral (lu à la résolution),
// - signe de tête (+/-) sans opérande gauche => zéro littéral inséré,
// - signe après un autre opérateur (2*-3) => Groupe (0 ± opérande), lié à l’opérande suivante.
//
// Garde-fou : imbrication bornée à PROFONDEUR_MAX (la récursion ne descend que dans les parenthèses).

use std::fmt;

use super::erreur::{ErreurEval, ErreurParentheses, Resultat};
use super::registre::Registre;
use super::valeur::Valeur;

/// Plafond d’imbrication des parenthèses.
pub const PROFONDEUR_MAX: usize = 255;

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Texte brut, lu à la résolution.
    Litteral(String),
    /// Valeur déjà calculée (résultat d’une réduction).
    Constante(Valeur),
    Appel { nom: String, arguments: String },
    Groupe(Sequence),
}

/// Un élément + l’opérateur qui le suit (None pour le dernier).
#[derive(Clone, Debug, PartialEq)]
pub struct Maillon {
    pub element: Element,
    pub operateur: Option<String>,
}

impl Maillon {
    pub fn new(element: Element, operateur: Option<&str>) -> Self {
        Self {
            element,
            operateur: operateur.map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    maillons: Vec<Maillon>,
}

impl Sequence {
    pub fn maillons(&self) -> &[Maillon] {
        &self.maillons
    }

    pub fn len(&self) -> usize {
        self.maillons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maillons.is_empty()
    }
}

impl From<Vec<Maillon>> for Sequence {
    fn from(maillons: Vec<Maillon>) -> Self {
        Self { maillons }
    }
}

/* ------------------------ Rendu (reconstruction du texte) ------------------------ */

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Litteral(t) => f.write_str(t),
            Element::Constante(v) => write!(f, "{v}"),
            Element::Appel { nom, arguments } => write!(f, "{nom}({arguments})"),
            Element::Groupe(seq) => write!(f, "({seq})"),
        }
    }
}

impl fmt::Display for Maillon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element)?;
        if let Some(op) = &self.operateur {
            f.write_str(op)?;
        }
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.maillons {
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

/* ------------------------ Parenthèses ------------------------ */

/// Vérifie l’équilibre : jamais négatif, jamais au-delà du plafond, tout refermé.
pub fn verifier_parentheses(texte: &str) -> Resultat<()> {
    let mut niveau: usize = 0;
    for (i, c) in texte.char_indices() {
        match c {
            '(' => {
                niveau += 1;
                if niveau > PROFONDEUR_MAX {
                    return Err(ErreurParentheses::Debordement {
                        plafond: PROFONDEUR_MAX,
                    }
                    .into());
                }
            }
            ')' => {
                niveau = niveau
                    .checked_sub(1)
                    .ok_or(ErreurParentheses::Sousdebordement { position: i })?;
            }
            _ => {}
        }
    }
    if niveau != 0 {
        return Err(ErreurParentheses::NonFermee { ouvertes: niveau }.into());
    }
    Ok(())
}

/// Position de la ')' qui ferme la '(' située à `ouvrante` (octet).
fn fermante(texte: &str, ouvrante: usize) -> Option<usize> {
    let mut niveau: usize = 0;
    for (i, c) in texte[ouvrante..].char_indices() {
        match c {
            '(' => niveau += 1,
            ')' => {
                niveau = niveau.checked_sub(1)?;
                if niveau == 0 {
                    return Some(ouvrante + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn entierement_parenthese(texte: &str) -> bool {
    texte.starts_with('(') && fermante(texte, 0) == Some(texte.len() - 1)
}

/// Retire les parenthèses extérieures tant qu’une paire équilibrée englobe tout le texte.
pub fn retirer_parentheses(texte: &str) -> &str {
    let mut t = texte.trim();
    while entierement_parenthese(t) {
        t = t[1..t.len() - 1].trim();
    }
    t
}

/* ------------------------ Découpe ------------------------ */

/// Symbole enregistré qui commence à l’octet `i` (le plus long gagne : le registre est trié).
fn symbole_en<'r>(texte: &str, i: usize, registre: &'r Registre) -> Option<&'r str> {
    registre
        .operateurs()
        .iter()
        .map(|op| op.symbole())
        .find(|s| {
            texte
                .get(i..i + s.len())
                .is_some_and(|t| t.eq_ignore_ascii_case(s))
        })
}

/// Coupe le texte à chaque opérateur de niveau 0.
/// Chaque segment = (opérande brute, opérateur qui la suit).
fn segmenter<'t, 'r>(texte: &'t str, registre: &'r Registre) -> Vec<(&'t str, Option<&'r str>)> {
    let octets = texte.as_bytes();
    let mut segments = Vec::new();
    let mut niveau: usize = 0;
    let mut debut = 0;
    let mut i = 0;

    while i < octets.len() {
        match octets[i] {
            b'(' => niveau += 1,
            b')' => niveau = niveau.saturating_sub(1),
            _ => {}
        }
        if niveau == 0 {
            if let Some(symbole) = symbole_en(texte, i, registre) {
                segments.push((&texte[debut..i], Some(symbole)));
                i += symbole.len();
                debut = i;
                continue;
            }
        }
        i += 1;
    }

    segments.push((&texte[debut..], None));
    segments
}

fn est_signe(symbole: &str) -> bool {
    symbole == "+" || symbole == "-"
}

/// Deux signes consécutifs se combinent en un seul.
fn combiner_signes<'a>(precedent: Option<&'a str>, signe: &'a str) -> &'a str {
    match precedent {
        None => signe,
        Some(p) if p == signe => "+",
        Some(_) => "-",
    }
}

/// Point d’entrée : vérifie les parenthèses puis découpe.
pub fn decouper(texte: &str, registre: &Registre) -> Resultat<Sequence> {
    let brut = texte.trim();
    verifier_parentheses(brut)?;
    decouper_equilibre(brut, registre)
}

/// Découpe un texte déjà équilibré.
fn decouper_equilibre(texte: &str, registre: &Registre) -> Resultat<Sequence> {
    let interieur = retirer_parentheses(texte);
    if interieur.is_empty() {
        return Err(ErreurEval::syntaxe(format!("expression vide '{texte}'")));
    }

    let segments = segmenter(interieur, registre);
    let mut maillons = Vec::with_capacity(segments.len());
    let mut signe: Option<&str> = None;

    for (idx, (operande, operateur)) in segments.into_iter().enumerate() {
        let operande = operande.trim();

        if operande.is_empty() {
            let symbole = match operateur {
                Some(s) => s,
                None => {
                    return Err(ErreurEval::syntaxe(format!(
                        "opérande manquante en fin de '{interieur}'"
                    )))
                }
            };
            if !est_signe(symbole) {
                return Err(ErreurEval::syntaxe(format!(
                    "opérande gauche vide avant '{symbole}' dans '{interieur}'"
                )));
            }
            if idx == 0 {
                maillons.push(Maillon::new(Element::Litteral("0".into()), Some(symbole)));
            } else {
                signe = Some(combiner_signes(signe, symbole));
            }
            continue;
        }

        let mut element = element_operande(operande, registre)?;
        // Signe après un opérateur : (0 ± x) ne couvre que l’opérande suivante,
        // et non tout le reste du texte comme un découpage au premier opérateur.
        // 2*-3 = 2*(0-3) = -6 (et non -3) ; 2*-3+1 = -5.
        if let Some(s) = signe.take() {
            element = Element::Groupe(Sequence::from(vec![
                Maillon::new(Element::Litteral("0".into()), Some(s)),
                Maillon::new(element, None),
            ]));
        }
        maillons.push(Maillon::new(element, operateur));
    }

    Ok(Sequence { maillons })
}

/// Opérande sans opérateur de niveau 0.
fn element_operande(operande: &str, registre: &Registre) -> Resultat<Element> {
    if entierement_parenthese(operande) {
        let mut seq = decouper_equilibre(operande, registre)?;
        if seq.maillons.len() == 1 {
            if let Some(seul) = seq.maillons.pop() {
                return Ok(seul.element);
            }
        }
        return Ok(Element::Groupe(seq));
    }
    element_simple(operande)
}

/// `nom(args)` => Appel ; sinon Littéral.
fn element_simple(texte: &str) -> Resultat<Element> {
    if let Some(ouvrante) = texte.find('(') {
        let nom = texte[..ouvrante].trim();
        if !nom.is_empty() {
            if fermante(texte, ouvrante) != Some(texte.len() - 1) {
                return Err(ErreurEval::syntaxe(format!(
                    "paramètres de fonction invalides '{texte}'"
                )));
            }
            return Ok(Element::Appel {
                nom: nom.to_string(),
                arguments: texte[ouvrante + 1..texte.len() - 1].to_string(),
            });
        }
    }
    Ok(Element::Litteral(texte.to_string()))
}

/// Sépare les arguments bruts d’un appel sur les virgules de niveau 0.
/// Texte vide => aucun argument.
pub fn separer_arguments(arguments: &str) -> Resultat<Vec<&str>> {
    if arguments.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let mut niveau: usize = 0;
    let mut debut = 0;
    for (i, c) in arguments.char_indices() {
        match c {
            '(' => niveau += 1,
            ')' => niveau = niveau.saturating_sub(1),
            ',' if niveau == 0 => {
                out.push(&arguments[debut..i]);
                debut = i + 1;
            }
            _ => {}
        }
    }
    out.push(&arguments[debut..]);

    if out.iter().any(|a| a.trim().is_empty()) {
        return Err(ErreurEval::syntaxe(format!(
            "argument vide dans '({arguments})'"
        )));
    }
    Ok(out.into_iter().map(str::trim).collect())
}
