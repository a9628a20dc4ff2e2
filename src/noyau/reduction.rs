// src/noyau/reduction.rs
//
// Réduction d’une séquence aplatie, par priorité décroissante.
//
// Pour chaque niveau de priorité (du plus fort au plus faible) :
// - balayage de gauche à droite,
// - dès qu’un élément porte un opérateur du niveau courant :
//     résolution des deux voisins, application, fusion en une constante
//     qui hérite de l’opérateur de queue du voisin droit, puis on reste sur place.
//
// La séquence d’entrée n’est jamais modifiée : on travaille sur une copie paresseuse (Cow).
// Un opérateur restant après tous les niveaux => OperateurNonResolu.

use std::borrow::Cow;

use log::trace;

use super::decoupe::{decouper, separer_arguments, Element, Sequence};
use super::erreur::{ErreurEval, Resultat};
use super::lecture::lire_litteral;
use super::registre::Registre;
use super::valeur::Valeur;

pub struct Reduction<'r> {
    registre: &'r Registre,
    etapes: Vec<String>,
}

impl<'r> Reduction<'r> {
    pub fn new(registre: &'r Registre) -> Self {
        Self {
            registre,
            etapes: Vec::new(),
        }
    }

    /// Étapes de calcul, dans l’ordre où elles ont eu lieu.
    pub fn into_etapes(self) -> Vec<String> {
        self.etapes
    }

    fn noter(&mut self, etape: String) {
        trace!("{etape}");
        self.etapes.push(etape);
    }

    pub fn reduire(&mut self, sequence: &Sequence) -> Resultat<Valeur> {
        let registre = self.registre;

        let mut travail: Vec<(Cow<'_, Element>, Option<&str>)> = sequence
            .maillons()
            .iter()
            .map(|m| (Cow::Borrowed(&m.element), m.operateur.as_deref()))
            .collect();

        if travail.is_empty() {
            return Err(ErreurEval::syntaxe("séquence vide"));
        }

        for (priorite, ops) in registre.par_priorite() {
            let mut i = 0;
            while i + 1 < travail.len() {
                let op = travail[i]
                    .1
                    .and_then(|s| ops.iter().find(|o| o.symbole().eq_ignore_ascii_case(s)));
                let Some(op) = op else {
                    i += 1;
                    continue;
                };

                let gauche = travail[i].0.resoudre(self)?;
                let droite = travail[i + 1].0.resoudre(self)?;
                let resultat = op.appliquer(&gauche, &droite)?;
                self.noter(format!(
                    "{gauche} {} {droite} = {resultat} ({}) [priorité {priorite}]",
                    op.symbole(),
                    resultat.type_valeur()
                ));

                let (_, suivant) = travail.remove(i + 1);
                travail[i] = (Cow::Owned(Element::Constante(resultat)), suivant);
            }
        }

        let restants: Vec<String> = travail
            .iter()
            .filter_map(|(_, op)| op.map(str::to_string))
            .collect();
        if !restants.is_empty() {
            return Err(ErreurEval::OperateurNonResolu(restants));
        }

        match travail.pop() {
            Some((element, _)) => element.resoudre(self),
            None => Err(ErreurEval::syntaxe("séquence vide")),
        }
    }

    /// Appel de fonction : arité vérifiée avant d’évaluer les arguments.
    fn appeler(&mut self, nom: &str, arguments: &str) -> Resultat<Valeur> {
        let registre = self.registre;
        let fonction = registre
            .fonction(nom)
            .ok_or_else(|| ErreurEval::NomInconnu(nom.to_string()))?;

        let bruts = separer_arguments(arguments)?;
        fonction.verifier_arite(bruts.len())?;

        let mut valeurs = Vec::with_capacity(bruts.len());
        for brut in bruts {
            let seq = decouper(brut, registre)?;
            valeurs.push(self.reduire(&seq)?);
        }

        let resultat = fonction.appeler(&valeurs)?;
        let liste: Vec<String> = valeurs.iter().map(Valeur::to_string).collect();
        self.noter(format!(
            "{}({}) = {resultat} ({})",
            fonction.nom(),
            liste.join(", "),
            resultat.type_valeur()
        ));
        Ok(resultat)
    }
}

impl Element {
    /// Valeur de l’élément (littéral lu, groupe réduit, fonction appelée).
    pub fn resoudre(&self, moteur: &mut Reduction<'_>) -> Resultat<Valeur> {
        match self {
            Element::Constante(v) => Ok(v.clone()),
            Element::Litteral(texte) => lire_litteral(texte),
            Element::Groupe(seq) => moteur.reduire(seq),
            Element::Appel { nom, arguments } => moteur.appeler(nom, arguments),
        }
    }
}
