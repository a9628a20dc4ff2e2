//! Tests scientifiques (campagne) : propriétés + limites contrôlées.
//!
//! But : vérifier le contrat observable de `evaluer` de bout en bout.
//! - priorités, associativité, signes
//! - suffixes de littéraux + élargissement
//! - fonctions (intégrées, multi-arguments, imbriquées)
//! - erreurs : chaque famille avec son cas typique
//! - reconstruction du texte depuis la séquence aplatie
//! - stress borné (profondeur, longueur, budget temps)

use std::time::{Duration, Instant};

use super::decoupe::{decouper, PROFONDEUR_MAX};
use super::erreur::{ErreurEval, ErreurParentheses};
use super::fonctions::Fonction;
use super::operateurs::{Operateur, PRIORITE_CARRE, PRIORITE_LIGNE};
use super::{evaluer, registre_standard, Registre, TypeValeur, Valeur};

fn eval_ok(expr: &str) -> Valeur {
    evaluer(expr, registre_standard()).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_err(expr: &str) -> ErreurEval {
    match evaluer(expr, registre_standard()) {
        Ok(v) => panic!("expr={expr:?} : erreur attendue, obtenu {v:?}"),
        Err(e) => e,
    }
}

fn assert_val(expr: &str, attendu: Valeur) {
    assert_eq!(eval_ok(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Priorités, associativité, signes ------------------------ */

#[test]
fn sci_priorites() {
    assert_val("1+2*3", Valeur::Int(7));
    assert_val("(1+2)*3", Valeur::Int(9));
    assert_val("2*(3+4)*5", Valeur::Int(70));
    assert_val("((2))*((3))", Valeur::Int(6));
}

#[test]
fn sci_gauche_a_droite() {
    assert_val("10-3-2", Valeur::Int(5));
    assert_val("100/10/5", Valeur::Int(2));
    assert_val("1-2+3-4+5", Valeur::Int(3));
    assert_val("2*6/3", Valeur::Int(4));
}

#[test]
fn sci_signes() {
    assert_val("-5+3", Valeur::Int(-2));
    assert_val("+5", Valeur::Int(5));
    assert_val("-(2+3)", Valeur::Int(-5));
    assert_val("2*-3", Valeur::Int(-6));
    assert_val("2*-3+1", Valeur::Int(-5));
    assert_val("2--3", Valeur::Int(5));
    assert_val("-2*-2", Valeur::Int(4));
    assert_val("--5", Valeur::Int(5));
    assert_val("-1.5", Valeur::Double(-1.5));
}

/* ------------------------ Littéraux + élargissement ------------------------ */

#[test]
fn sci_suffixes() {
    assert_val("5b", Valeur::Byte(5));
    assert_val("5s", Valeur::Short(5));
    assert_val("5l", Valeur::Long(5));
    assert_val("5f", Valeur::Float(5.0));
    assert_val("5.0", Valeur::Double(5.0));
    assert_val("5", Valeur::Int(5));
}

#[test]
fn sci_elargissement() {
    assert_val("1+1.5", Valeur::Double(2.5));
    assert_val("1+1l", Valeur::Long(2));
    assert_val("1b+1b", Valeur::Byte(2));
    assert_val("1b+1s", Valeur::Short(2));
    assert_val("1l*2f", Valeur::Float(2.0));
    assert_val("0.5f+0.25", Valeur::Double(0.75));

    let v = eval_ok("2s*3b");
    assert_eq!(v.type_valeur(), TypeValeur::Short);
}

#[test]
fn sci_enroulement() {
    assert_val("127b+1b", Valeur::Byte(-128));
    assert_val("2147483647+1", Valeur::Int(i32::MIN));
    assert_val("2147483647+1l", Valeur::Long(2_147_483_648));
}

/* ------------------------ Fonctions ------------------------ */

#[test]
fn sci_fonctions_integrees() {
    assert_val("abs(-5)", Valeur::Int(5));
    assert_val("sqr(3.0)", Valeur::Double(9.0));
    assert_val("sqr(-4s)", Valeur::Short(16));
    assert_val("min(3, 1, 2)", Valeur::Int(1));
    assert_val("max(3, 1.5, 2l)", Valeur::Double(3.0));
    assert_val("1+abs(2-5)*2", Valeur::Int(7));
    assert_val("max(abs(-7), sqr(2), min(9, 8))", Valeur::Int(8));
}

#[test]
fn sci_fonctions_imbriquees_profondes() {
    let n = 40;
    let expr = format!("{}-3{}", "abs(".repeat(n), ")".repeat(n));
    assert_val(&expr, Valeur::Int(3));
}

#[test]
fn sci_arite() {
    assert!(matches!(
        eval_err("abs(1,2)"),
        ErreurEval::Arite { ref nom, recu: 2, min: 1, max: 1 } if nom == "abs"
    ));
    assert!(matches!(eval_err("sqr()"), ErreurEval::Arite { recu: 0, .. }));
    assert!(matches!(eval_err("max()"), ErreurEval::Arite { recu: 0, .. }));
}

#[test]
fn sci_min_max_nombreux_arguments() {
    let liste: Vec<String> = (1..=100).map(|i| i.to_string()).collect();
    let liste = liste.join(",");
    assert_val(&format!("max({liste})"), Valeur::Int(100));
    assert_val(&format!("min({liste})"), Valeur::Int(1));
    assert_val(&format!("max({liste},101l)"), Valeur::Long(101));
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert!(matches!(eval_err("1/0"), ErreurEval::Arithmetique(_)));
    assert!(matches!(eval_err("5l/(2l-2l)"), ErreurEval::Arithmetique(_)));
    assert_val("1.0/0", Valeur::Double(f64::INFINITY));
    assert_val("-1.0/0", Valeur::Double(f64::NEG_INFINITY));
    assert_val("1f/0", Valeur::Float(f32::INFINITY));
}

#[test]
fn sci_nom_inconnu() {
    assert_eq!(eval_err("x+1"), ErreurEval::NomInconnu("x".into()));
    assert_eq!(eval_err("2*pi"), ErreurEval::NomInconnu("pi".into()));
    assert_eq!(eval_err("sin(1)"), ErreurEval::NomInconnu("sin".into()));
}

#[test]
fn sci_syntaxe() {
    for s in ["", "1+", "*2", "1 2", "1.2.3", "300b", "abs(1)2", "max(1,,2)", "()"] {
        assert!(
            matches!(eval_err(s), ErreurEval::Syntaxe(_)),
            "expr={s:?} devrait être une erreur de syntaxe"
        );
    }
}

#[test]
fn sci_parentheses() {
    assert!(matches!(
        eval_err("(1+2"),
        ErreurEval::Parentheses(ErreurParentheses::NonFermee { ouvertes: 1 })
    ));
    assert!(matches!(
        eval_err("1+2)"),
        ErreurEval::Parentheses(ErreurParentheses::Sousdebordement { .. })
    ));
    assert!(matches!(
        eval_err(")("),
        ErreurEval::Parentheses(ErreurParentheses::Sousdebordement { position: 0 })
    ));

    let n = 300;
    let profond = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert!(matches!(
        eval_err(&profond),
        ErreurEval::Parentheses(ErreurParentheses::Debordement { plafond: PROFONDEUR_MAX })
    ));
}

#[test]
fn sci_type_non_numerique() {
    let mut r = Registre::standard();
    r.enregistrer_fonction(Fonction::new("texte", 0, 0, |_| {
        Ok(Valeur::Chaine("abc".into()))
    }))
    .unwrap();
    assert!(matches!(evaluer("texte()+1", &r), Err(ErreurEval::Type(_))));
    assert!(matches!(evaluer("abs(texte())", &r), Err(ErreurEval::Type(_))));
    assert_eq!(evaluer("texte()", &r), Ok(Valeur::Chaine("abc".into())));
}

/* ------------------------ Registre ------------------------ */

#[test]
fn sci_enregistrement_doublon() {
    let mut r = Registre::standard();
    assert!(matches!(
        r.enregistrer_operateur(Operateur::new("*", PRIORITE_LIGNE, |_, _| Ok(Valeur::Null))),
        Err(ErreurEval::Enregistrement(_))
    ));
    assert!(matches!(
        r.enregistrer_fonction(Fonction::new("Sqr", 1, 1, |_| Ok(Valeur::Null))),
        Err(ErreurEval::Enregistrement(_))
    ));
    // les originaux restent utilisables
    assert_eq!(evaluer("1+2*3", &r), Ok(Valeur::Int(7)));
    assert_eq!(evaluer("sqr(3)", &r), Ok(Valeur::Int(9)));
}

#[test]
fn sci_symbole_long_prioritaire() {
    let mut r = Registre::standard();
    r.enregistrer_operateur(Operateur::new("**", PRIORITE_CARRE, |a, b| {
        let (base, exp) = (a.as_long()?, b.as_int()?);
        Ok(Valeur::Long(base.wrapping_pow(exp.max(0) as u32)))
    }))
    .unwrap();
    assert_eq!(evaluer("2**10", &r), Ok(Valeur::Long(1024)));
    assert_eq!(evaluer("3*2**3", &r), Ok(Valeur::Long(24)));
    assert_eq!(evaluer("2*3", &r), Ok(Valeur::Int(6)));
}

#[test]
fn sci_registres_independants() {
    let vide = Registre::new();
    assert_eq!(evaluer("42", &vide), Ok(Valeur::Int(42)));
    // sans opérateur enregistré, "1+2" n’est qu’un identifiant inconnu
    assert_eq!(
        evaluer("1+2", &vide),
        Err(ErreurEval::NomInconnu("1+2".into()))
    );
    assert_eq!(evaluer("1+2", registre_standard()), Ok(Valeur::Int(3)));
}

#[test]
fn sci_registre_partage_entre_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || evaluer(&format!("{i}*10+max({i}, 2)"), registre_standard()))
        })
        .collect();
    let resultats: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    assert_eq!(
        resultats,
        vec![
            Ok(Valeur::Int(2)),
            Ok(Valeur::Int(12)),
            Ok(Valeur::Int(22)),
            Ok(Valeur::Int(33)),
        ]
    );
}

/* ------------------------ Reconstruction ------------------------ */

#[test]
fn sci_reconstruction() {
    let r = registre_standard();
    for s in [
        "1+2*3",
        "(1+2)*3",
        "abs(-5)+sqr(2.0)",
        "max(1,min(2,3))*(4l-5b)",
        "((1+2)/(3-4))*5f",
    ] {
        let seq = decouper(s, r).unwrap_or_else(|e| panic!("expr={s:?} err={e}"));
        assert_eq!(seq.to_string(), s);
    }
    // parenthèses extérieures retirées
    let seq = decouper("((7*8))", r).unwrap();
    assert_eq!(seq.to_string(), "7*8");
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_longue_chaine_plate() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["1"; 2000].join("+");
    assert_val(&expr, Valeur::Int(2000));
    budget(t0, max);

    let expr = vec!["2"; 20].join("*");
    assert_val(&expr, Valeur::Int(1 << 20));
    budget(t0, max);
}

#[test]
fn sci_imbrication_au_plafond() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // groupes réellement imbriqués : (1+(1+(1+...)))
    let n = 100;
    let expr = format!("{}1{}", "(1+".repeat(n), ")".repeat(n));
    assert_val(&expr, Valeur::Int(n as i32 + 1));
    budget(t0, max);

    let plafond = format!(
        "{}1{}",
        "(".repeat(PROFONDEUR_MAX),
        ")".repeat(PROFONDEUR_MAX)
    );
    assert_val(&plafond, Valeur::Int(1));
    budget(t0, max);
}
