// src/noyau/operateurs.rs
//
// Opérateurs binaires : symbole + priorité + application.
// Priorités (plus haut = lie plus fort) :
// - ligne  (+ -) = 5
// - point  (* /) = 10
// - carré / fonction : niveaux réservés pour des opérateurs ajoutés par l’appelant
//
// Les opérateurs numériques intégrés passent par `CalculBinaire` :
// on promeut les deux opérandes au plus large des deux types, puis on calcule à cette largeur.

use std::fmt;
use std::sync::Arc;

use num_traits::{Float, PrimInt, Signed, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};

use super::erreur::{ErreurEval, Resultat};
use super::valeur::{TypeValeur, Valeur};

pub const PRIORITE_LIGNE: i32 = 5;
pub const PRIORITE_POINT: i32 = 10;
pub const PRIORITE_CARRE: i32 = 15;
pub const PRIORITE_FONCTION: i32 = 20;

/// Entiers signés supportés (i8..i64) : arithmétique en complément à deux (débordement = enroulement).
pub trait Entier: PrimInt + Signed + WrappingAdd + WrappingSub + WrappingMul + WrappingNeg {}

impl<T> Entier for T where T: PrimInt + Signed + WrappingAdd + WrappingSub + WrappingMul + WrappingNeg
{}

/// Calcul binaire décliné par largeur.
pub trait CalculBinaire: Send + Sync + 'static {
    fn entier<T: Entier>(&self, a: T, b: T) -> Resultat<T>;
    fn decimal<T: Float>(&self, a: T, b: T) -> T;
}

type FnBinaire = dyn Fn(&Valeur, &Valeur) -> Resultat<Valeur> + Send + Sync;

#[derive(Clone)]
pub struct Operateur {
    symbole: String,
    priorite: i32,
    appliquer: Arc<FnBinaire>,
}

impl Operateur {
    pub fn new<F>(symbole: impl Into<String>, priorite: i32, appliquer: F) -> Self
    where
        F: Fn(&Valeur, &Valeur) -> Resultat<Valeur> + Send + Sync + 'static,
    {
        Self {
            symbole: symbole.into(),
            priorite,
            appliquer: Arc::new(appliquer),
        }
    }

    /// Opérateur numérique avec promotion automatique.
    pub fn numerique<C: CalculBinaire>(symbole: impl Into<String>, priorite: i32, calcul: C) -> Self {
        let symbole = symbole.into();
        let nom = symbole.clone();
        Self::new(symbole, priorite, move |a, b| {
            appliquer_numerique(&nom, &calcul, a, b)
        })
    }

    pub fn symbole(&self) -> &str {
        &self.symbole
    }

    pub fn priorite(&self) -> i32 {
        self.priorite
    }

    pub fn appliquer(&self, a: &Valeur, b: &Valeur) -> Resultat<Valeur> {
        (self.appliquer)(a, b)
    }
}

impl fmt::Debug for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operateur")
            .field("symbole", &self.symbole)
            .field("priorite", &self.priorite)
            .finish_non_exhaustive()
    }
}

/// Promotion au plus large des deux types puis calcul à cette largeur.
fn appliquer_numerique<C: CalculBinaire>(
    symbole: &str,
    calcul: &C,
    a: &Valeur,
    b: &Valeur,
) -> Resultat<Valeur> {
    let large = a
        .type_valeur()
        .elargir(b.type_valeur())
        .ok_or_else(|| {
            ErreurEval::type_invalide(format!(
                "'{symbole}' ne s’applique pas à {} et {}",
                a.type_valeur(),
                b.type_valeur()
            ))
        })?;

    Ok(match large {
        TypeValeur::Byte => Valeur::Byte(calcul.entier(a.as_byte()?, b.as_byte()?)?),
        TypeValeur::Short => Valeur::Short(calcul.entier(a.as_short()?, b.as_short()?)?),
        TypeValeur::Int => Valeur::Int(calcul.entier(a.as_int()?, b.as_int()?)?),
        TypeValeur::Long => Valeur::Long(calcul.entier(a.as_long()?, b.as_long()?)?),
        TypeValeur::Float => Valeur::Float(calcul.decimal(a.as_float()?, b.as_float()?)),
        TypeValeur::Double => Valeur::Double(calcul.decimal(a.as_double()?, b.as_double()?)),
        // elargir() ne rend que des types numériques
        TypeValeur::Chaine | TypeValeur::Null => {
            return Err(ErreurEval::type_invalide(format!(
                "'{symbole}' : type {large} non numérique"
            )))
        }
    })
}

/* ------------------------ Opérateurs intégrés ------------------------ */

pub struct Addition;
pub struct Soustraction;
pub struct Multiplication;
pub struct Division;

impl CalculBinaire for Addition {
    fn entier<T: Entier>(&self, a: T, b: T) -> Resultat<T> {
        Ok(a.wrapping_add(&b))
    }
    fn decimal<T: Float>(&self, a: T, b: T) -> T {
        a + b
    }
}

impl CalculBinaire for Soustraction {
    fn entier<T: Entier>(&self, a: T, b: T) -> Resultat<T> {
        Ok(a.wrapping_sub(&b))
    }
    fn decimal<T: Float>(&self, a: T, b: T) -> T {
        a - b
    }
}

impl CalculBinaire for Multiplication {
    fn entier<T: Entier>(&self, a: T, b: T) -> Resultat<T> {
        Ok(a.wrapping_mul(&b))
    }
    fn decimal<T: Float>(&self, a: T, b: T) -> T {
        a * b
    }
}

impl CalculBinaire for Division {
    fn entier<T: Entier>(&self, a: T, b: T) -> Resultat<T> {
        if b.is_zero() {
            return Err(ErreurEval::Arithmetique("division entière par zéro".into()));
        }
        // seul débordement possible : MIN / -1, qui s’enroule sur MIN (= a)
        Ok(a.checked_div(&b).unwrap_or(a))
    }
    fn decimal<T: Float>(&self, a: T, b: T) -> T {
        // IEEE : jamais d’erreur (inf / NaN possibles)
        a / b
    }
}

/// Les quatre opérateurs de base, dans l’ordre d’enregistrement.
pub fn operateurs_integres() -> Vec<Operateur> {
    vec![
        Operateur::numerique("+", PRIORITE_LIGNE, Addition),
        Operateur::numerique("-", PRIORITE_LIGNE, Soustraction),
        Operateur::numerique("*", PRIORITE_POINT, Multiplication),
        Operateur::numerique("/", PRIORITE_POINT, Division),
    ]
}
