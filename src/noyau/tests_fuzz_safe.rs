//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - seules les erreurs attendues sont tolérées (division entière par zéro)
//! - invariant clé : la séquence aplatie se relit à l’identique

use std::time::{Duration, Instant};

use super::decoupe::{decouper, retirer_parentheses};
use super::erreur::ErreurEval;
use super::{evaluer, registre_standard};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurEval) -> bool {
    // Liste blanche : le générateur ne produit que des expressions bien formées,
    // seule la division entière par zéro est normale.
    matches!(e, ErreurEval::Arithmetique(_))
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_litteral(rng: &mut Rng) -> String {
    let n = rng.pick(10);
    match rng.pick(7) {
        0 => format!("{n}b"),
        1 => format!("{n}s"),
        2 => format!("{n}l"),
        3 => format!("{n}.{}f", rng.pick(10)),
        4 => format!("{n}.{}", rng.pick(100)),
        _ => format!("{n}"),
    }
}

fn gen_operateur(rng: &mut Rng) -> &'static str {
    match rng.pick(4) {
        0 => "+",
        1 => "-",
        2 => "*",
        _ => "/",
    }
}

/// `libre` : autorise les signes et les parenthèses redondantes.
fn gen_expr(rng: &mut Rng, depth: usize, libre: bool) -> String {
    if depth == 0 {
        return gen_litteral(rng);
    }

    let e = match rng.pick(if libre { 8 } else { 7 }) {
        0 => gen_litteral(rng),
        1 => format!(
            "({}{}{})",
            gen_expr(rng, depth - 1, libre),
            gen_operateur(rng),
            gen_expr(rng, depth - 1, libre)
        ),
        2 => format!(
            "{}{}{}",
            gen_expr(rng, depth - 1, libre),
            gen_operateur(rng),
            gen_expr(rng, depth - 1, libre)
        ),
        3 => format!("abs({})", gen_expr(rng, depth - 1, libre)),
        4 => format!("sqr({})", gen_expr(rng, depth - 1, libre)),
        5 => format!(
            "min({},{})",
            gen_expr(rng, depth - 1, libre),
            gen_expr(rng, depth - 1, libre)
        ),
        6 => format!(
            "max({},{},{})",
            gen_expr(rng, depth - 1, libre),
            gen_expr(rng, depth - 1, libre),
            gen_expr(rng, depth - 1, libre)
        ),
        _ => format!("(({}))", gen_expr(rng, depth - 1, libre)),
    };

    if libre && rng.pick(4) == 0 {
        let signe = if rng.coin() { "-" } else { "+" };
        format!("{signe}{e}")
    } else {
        e
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_erreurs_attendues_seulement() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, true);

        match evaluer(&expr, registre_standard()) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties.
    // Comparaison sur le texte Debug : NaN != NaN sinon.
    let passe = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        (0..80)
            .map(|_| {
                let expr = gen_expr(&mut rng, 4, true);
                format!("{expr} => {:?}", evaluer(&expr, registre_standard()))
            })
            .collect()
    };

    let a = passe(0xBADC0DE_u64);
    budget(t0, max);
    let b = passe(0xBADC0DE_u64);
    budget(t0, max);
    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_reconstruction() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let r = registre_standard();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..150 {
        budget(t0, max);

        // sans signe ni parenthèses redondantes : le texte rendu est exactement l’entrée sans ses parenthèses extérieures
        let expr = gen_expr(&mut rng, 4, false);
        let seq = decouper(&expr, r).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        let rendu = seq.to_string();
        let attendu = retirer_parentheses(&expr);
        assert_eq!(rendu, attendu, "expr={expr:?}");

        // avec signes : relire le rendu redonne la même séquence
        let signee = gen_expr(&mut rng, 4, true);
        let seq = decouper(&signee, r).unwrap_or_else(|e| panic!("expr={signee:?} err={e}"));
        let relue = decouper(&seq.to_string(), r)
            .unwrap_or_else(|e| panic!("rendu={:?} err={e}", seq.to_string()));
        assert_eq!(relue, seq, "expr={signee:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1b", 800);
    budget(t0, max);

    // 800 mod 256 = 32 : l’addition BYTE s’enroule
    assert_eq!(
        evaluer(&expr, registre_standard()),
        Ok(super::Valeur::Byte(32))
    );

    let expr = somme_balancee("0.5", 800);
    assert_eq!(
        evaluer(&expr, registre_standard()),
        Ok(super::Valeur::Double(400.0))
    );
    budget(t0, max);
}
