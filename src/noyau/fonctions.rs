// src/noyau/fonctions.rs
//
// Fonctions nommées : nom + bornes d’arité + application variadique.
//
// Fonctions numériques génériques (`CalculNumerique`) :
// - on choisit le type le plus large parmi TOUS les arguments,
// - on convertit chaque argument à cette largeur,
// - on calcule à cette largeur, et le résultat garde ce type.

use std::fmt;
use std::sync::Arc;

use num_traits::Float;

use super::erreur::{ErreurEval, Resultat};
use super::operateurs::Entier;
use super::valeur::{TypeValeur, Valeur};

/// Calcul variadique décliné par largeur (`args` jamais vide).
pub trait CalculNumerique: Send + Sync + 'static {
    fn entier<T: Entier>(&self, args: &[T]) -> T;
    fn decimal<T: Float>(&self, args: &[T]) -> T;
}

type FnVariadique = dyn Fn(&[Valeur]) -> Resultat<Valeur> + Send + Sync;

#[derive(Clone)]
pub struct Fonction {
    nom: String,
    min_args: usize,
    max_args: usize,
    appliquer: Arc<FnVariadique>,
}

impl Fonction {
    pub fn new<F>(nom: impl Into<String>, min_args: usize, max_args: usize, appliquer: F) -> Self
    where
        F: Fn(&[Valeur]) -> Resultat<Valeur> + Send + Sync + 'static,
    {
        Self {
            nom: nom.into(),
            min_args,
            max_args,
            appliquer: Arc::new(appliquer),
        }
    }

    /// Fonction numérique avec promotion au type le plus large.
    pub fn numerique<C: CalculNumerique>(
        nom: impl Into<String>,
        min_args: usize,
        max_args: usize,
        calcul: C,
    ) -> Self {
        let nom = nom.into();
        let etiquette = nom.clone();
        Self::new(nom, min_args, max_args, move |args| {
            appliquer_numerique(&etiquette, &calcul, args)
        })
    }

    pub fn nom(&self) -> &str {
        &self.nom
    }

    pub fn min_args(&self) -> usize {
        self.min_args
    }

    pub fn max_args(&self) -> usize {
        self.max_args
    }

    pub fn verifier_arite(&self, recu: usize) -> Resultat<()> {
        if recu < self.min_args || recu > self.max_args {
            return Err(ErreurEval::Arite {
                nom: self.nom.clone(),
                min: self.min_args,
                max: self.max_args,
                recu,
            });
        }
        Ok(())
    }

    /// Vérifie l’arité puis applique.
    pub fn appeler(&self, args: &[Valeur]) -> Resultat<Valeur> {
        self.verifier_arite(args.len())?;
        (self.appliquer)(args)
    }
}

impl fmt::Debug for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fonction")
            .field("nom", &self.nom)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

fn convertir<T>(args: &[Valeur], vers: fn(&Valeur) -> Resultat<T>) -> Resultat<Vec<T>> {
    args.iter().map(vers).collect()
}

fn appliquer_numerique<C: CalculNumerique>(
    nom: &str,
    calcul: &C,
    args: &[Valeur],
) -> Resultat<Valeur> {
    let large = TypeValeur::le_plus_large(args.iter().map(Valeur::type_valeur)).ok_or_else(|| {
        let types: Vec<&str> = args.iter().map(|a| a.type_valeur().nom()).collect();
        ErreurEval::type_invalide(format!(
            "{nom}() attend des arguments numériques, reçu [{}]",
            types.join(", ")
        ))
    })?;

    Ok(match large {
        TypeValeur::Byte => Valeur::Byte(calcul.entier(&convertir(args, Valeur::as_byte)?)),
        TypeValeur::Short => Valeur::Short(calcul.entier(&convertir(args, Valeur::as_short)?)),
        TypeValeur::Int => Valeur::Int(calcul.entier(&convertir(args, Valeur::as_int)?)),
        TypeValeur::Long => Valeur::Long(calcul.entier(&convertir(args, Valeur::as_long)?)),
        TypeValeur::Float => Valeur::Float(calcul.decimal(&convertir(args, Valeur::as_float)?)),
        TypeValeur::Double => {
            Valeur::Double(calcul.decimal(&convertir(args, Valeur::as_double)?))
        }
        TypeValeur::Chaine | TypeValeur::Null => {
            return Err(ErreurEval::type_invalide(format!(
                "{nom}() : type {large} non numérique"
            )))
        }
    })
}

/* ------------------------ Fonctions intégrées ------------------------ */

pub struct Abs;
pub struct Sqr;
pub struct Min;
pub struct Max;

impl CalculNumerique for Abs {
    fn entier<T: Entier>(&self, args: &[T]) -> T {
        // abs(MIN) s’enroule sur MIN
        if args[0] < T::zero() {
            args[0].wrapping_neg()
        } else {
            args[0]
        }
    }
    fn decimal<T: Float>(&self, args: &[T]) -> T {
        args[0].abs()
    }
}

impl CalculNumerique for Sqr {
    fn entier<T: Entier>(&self, args: &[T]) -> T {
        args[0].wrapping_mul(&args[0])
    }
    fn decimal<T: Float>(&self, args: &[T]) -> T {
        args[0] * args[0]
    }
}

impl CalculNumerique for Min {
    fn entier<T: Entier>(&self, args: &[T]) -> T {
        args.iter().copied().fold(args[0], Ord::min)
    }
    fn decimal<T: Float>(&self, args: &[T]) -> T {
        args.iter().copied().fold(args[0], Float::min)
    }
}

impl CalculNumerique for Max {
    fn entier<T: Entier>(&self, args: &[T]) -> T {
        args.iter().copied().fold(args[0], Ord::max)
    }
    fn decimal<T: Float>(&self, args: &[T]) -> T {
        args.iter().copied().fold(args[0], Float::max)
    }
}

/// abs et sqr : un argument ; min et max : un ou plus, sans borne haute.
pub fn fonctions_integrees() -> Vec<Fonction> {
    vec![
        Fonction::numerique("sqr", 1, 1, Sqr),
        Fonction::numerique("abs", 1, 1, Abs),
        Fonction::numerique("min", 1, usize::MAX, Min),
        Fonction::numerique("max", 1, usize::MAX, Max),
    ]
}
