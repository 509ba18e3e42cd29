use rand::{Rng, RngCore};

use crate::question_engine::{
    helpers::{draft, rand_between, steps},
    models::{QuestionDraft, Tier},
};

/// Squares only up to tier 4; tiers 5-6 mix in cubes with a smaller base.
pub fn power(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let (base, exponent): (i64, u32) = match tier.get() {
        1 | 2 => (rand_between(rng, 2, 5), 2),
        3     => (rand_between(rng, 2, 9), 2),
        4     => (rand_between(rng, 2, 12), 2),
        5 => if rng.gen_bool(0.6) {
            (rand_between(rng, 2, 15), 2)
        } else {
            (rand_between(rng, 2, 5), 3)
        },
        _ => if rng.gen_bool(0.5) {
            (rand_between(rng, 5, 20), 2)
        } else {
            (rand_between(rng, 2, 8), 3)
        },
    };

    let answer = base.pow(exponent);
    let (symbol, expanded) = if exponent == 3 {
        ("³", format!("{base} × {base} × {base}"))
    } else {
        ("²", format!("{base} × {base}"))
    };
    let working = if exponent == 3 {
        format!("{base} × {base} = {}, then × {base}", base * base)
    } else {
        format!("{base} × {base}")
    };

    draft(
        format!("{base}{symbol}"),
        answer,
        vec![base, exponent as i64],
        format!("{base}{symbol} = {expanded}."),
        steps(&[
            format!("DEFINITION: Exponent {exponent} means multiplying the base {exponent} times."),
            format!("ACTION: {expanded} = ?"),
            format!("WORKING: {working}."),
            format!("RESULT: {answer}."),
        ]),
    )
}

/// Largest root offered per tier.
fn max_root(tier: Tier) -> i64 {
    match tier.get() {
        1 | 2 => 5,
        3     => 9,
        4     => 12,
        5     => 15,
        _     => 20,
    }
}

/// Built backward from the root: radicand = root².
pub fn square_root(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let root = rand_between(rng, 2, max_root(tier));
    let radicand = root * root;
    let below = root - 1;

    draft(
        format!("√{radicand}"),
        root,
        vec![radicand],
        format!("Which number times itself = {radicand}?"),
        steps(&[
            format!("INVESTIGATE: Which number² = {radicand}?"),
            format!("TEST: {below}² = {}, {root}² = {radicand}.", below * below),
            format!("CONFIRM: {root} × {root} = {radicand}."),
            format!("ANSWER: √{radicand} = {root}."),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn low_tiers_only_square() {
        let mut rng = StdRng::seed_from_u64(1);
        for tier in [1, 2, 3, 4].map(Tier::new) {
            for _ in 0..200 {
                let q = power(&mut rng, tier);
                assert_eq!(q.values[1], 2, "{} at {tier}", q.text);
                assert!(q.text.ends_with('²'));
            }
        }
    }

    #[test]
    fn top_tier_mixes_squares_and_cubes() {
        let mut rng = StdRng::seed_from_u64(2);
        let exponents: Vec<i64> = (0..300).map(|_| power(&mut rng, Tier::new(6)).values[1]).collect();
        assert!(exponents.contains(&2));
        assert!(exponents.contains(&3));
    }

    #[test]
    fn cubes_use_small_bases() {
        let mut rng = StdRng::seed_from_u64(4);
        for tier in [5, 6].map(Tier::new) {
            for _ in 0..300 {
                let q = power(&mut rng, tier);
                if q.values[1] == 3 {
                    assert!(q.values[0] <= 8, "{}", q.text);
                }
            }
        }
    }

    #[test]
    fn root_respects_tier_maximum() {
        let mut rng = StdRng::seed_from_u64(3);
        for tier in Tier::all() {
            for _ in 0..200 {
                let q = square_root(&mut rng, tier);
                assert!((2..=max_root(tier)).contains(&q.answer));
                assert_eq!(q.text, format!("√{}", q.values[0]));
            }
        }
    }
}
