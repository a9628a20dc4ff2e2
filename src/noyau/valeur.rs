// src/noyau/valeur.rs
//
// Valeur typée + hiérarchie de types.
// - TypeValeur : étiquette fermée (8 cas), chacune rattachée à une ClasseType.
// - Ordre d’élargissement (étroit → large) : BYTE < SHORT < INT < LONG < FLOAT < DOUBLE.
// - Les accesseurs numériques refusent TEXTE / NULL (ErreurEval::Type), jamais de coercition muette.

use std::fmt;

use num_traits::AsPrimitive;

use super::erreur::{ErreurEval, Resultat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClasseType {
    Texte,
    Nombre,
    NombreDecimal,
    Null,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeValeur {
    Chaine,
    Float,
    Double,
    Long,
    Int,
    Short,
    Byte,
    Null,
}

impl TypeValeur {
    pub fn classe(self) -> ClasseType {
        match self {
            TypeValeur::Chaine => ClasseType::Texte,
            TypeValeur::Float | TypeValeur::Double => ClasseType::NombreDecimal,
            TypeValeur::Long | TypeValeur::Int | TypeValeur::Short | TypeValeur::Byte => {
                ClasseType::Nombre
            }
            TypeValeur::Null => ClasseType::Null,
        }
    }

    pub fn est_numerique(self) -> bool {
        matches!(
            self.classe(),
            ClasseType::Nombre | ClasseType::NombreDecimal
        )
    }

    /// Rang dans l’ordre d’élargissement (None si non numérique).
    fn rang(self) -> Option<u8> {
        match self {
            TypeValeur::Byte => Some(0),
            TypeValeur::Short => Some(1),
            TypeValeur::Int => Some(2),
            TypeValeur::Long => Some(3),
            TypeValeur::Float => Some(4),
            TypeValeur::Double => Some(5),
            TypeValeur::Chaine | TypeValeur::Null => None,
        }
    }

    /// Le plus large des deux types numériques.
    pub fn elargir(self, autre: TypeValeur) -> Option<TypeValeur> {
        let (a, b) = (self.rang()?, autre.rang()?);
        Some(if b > a { autre } else { self })
    }

    /// Le plus large de tous (None si la liste est vide ou contient un non-numérique).
    pub fn le_plus_large(types: impl IntoIterator<Item = TypeValeur>) -> Option<TypeValeur> {
        let mut it = types.into_iter();
        let premier = it.next()?;
        premier.rang()?;
        it.try_fold(premier, |acc, t| acc.elargir(t))
    }

    pub fn nom(self) -> &'static str {
        match self {
            TypeValeur::Chaine => "STRING",
            TypeValeur::Float => "FLOAT",
            TypeValeur::Double => "DOUBLE",
            TypeValeur::Long => "LONG",
            TypeValeur::Int => "INT",
            TypeValeur::Short => "SHORT",
            TypeValeur::Byte => "BYTE",
            TypeValeur::Null => "NULL",
        }
    }
}

impl fmt::Display for TypeValeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/// Valeur : la charge utile correspond toujours à l’étiquette (garanti par l’enum).
#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Chaine(String),
    Float(f32),
    Double(f64),
    Long(i64),
    Int(i32),
    Short(i16),
    Byte(i8),
    Null,
}

impl Valeur {
    pub fn type_valeur(&self) -> TypeValeur {
        match self {
            Valeur::Chaine(_) => TypeValeur::Chaine,
            Valeur::Float(_) => TypeValeur::Float,
            Valeur::Double(_) => TypeValeur::Double,
            Valeur::Long(_) => TypeValeur::Long,
            Valeur::Int(_) => TypeValeur::Int,
            Valeur::Short(_) => TypeValeur::Short,
            Valeur::Byte(_) => TypeValeur::Byte,
            Valeur::Null => TypeValeur::Null,
        }
    }

    fn non_numerique(&self) -> ErreurEval {
        ErreurEval::type_invalide(format!(
            "{} n’est pas numérique ({})",
            self.type_valeur(),
            self.as_string()
        ))
    }

    /// Conversion numérique à la largeur demandée (sémantique `as` :
    /// troncature vers zéro, saturation flottant → entier, NaN → 0).
    fn nombre<T>(&self) -> Resultat<T>
    where
        T: Copy + 'static,
        i8: AsPrimitive<T>,
        i16: AsPrimitive<T>,
        i32: AsPrimitive<T>,
        i64: AsPrimitive<T>,
        f32: AsPrimitive<T>,
        f64: AsPrimitive<T>,
    {
        match *self {
            Valeur::Byte(v) => Ok(v.as_()),
            Valeur::Short(v) => Ok(v.as_()),
            Valeur::Int(v) => Ok(v.as_()),
            Valeur::Long(v) => Ok(v.as_()),
            Valeur::Float(v) => Ok(v.as_()),
            Valeur::Double(v) => Ok(v.as_()),
            Valeur::Chaine(_) | Valeur::Null => Err(self.non_numerique()),
        }
    }

    pub fn as_byte(&self) -> Resultat<i8> {
        self.nombre()
    }

    pub fn as_short(&self) -> Resultat<i16> {
        self.nombre()
    }

    pub fn as_int(&self) -> Resultat<i32> {
        self.nombre()
    }

    pub fn as_long(&self) -> Resultat<i64> {
        self.nombre()
    }

    pub fn as_float(&self) -> Resultat<f32> {
        self.nombre()
    }

    pub fn as_double(&self) -> Resultat<f64> {
        self.nombre()
    }

    /// Rendu texte par défaut de la charge utile.
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Chaine(s) => f.write_str(s),
            // Debug garde la partie fractionnaire : 5.0, inf, NaN
            Valeur::Float(v) => write!(f, "{v:?}"),
            Valeur::Double(v) => write!(f, "{v:?}"),
            Valeur::Long(v) => write!(f, "{v}"),
            Valeur::Int(v) => write!(f, "{v}"),
            Valeur::Short(v) => write!(f, "{v}"),
            Valeur::Byte(v) => write!(f, "{v}"),
            Valeur::Null => f.write_str("null"),
        }
    }
}
