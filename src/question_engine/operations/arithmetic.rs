use rand::RngCore;

use crate::question_engine::{
    helpers::{draft, rand_between, steps},
    models::{QuestionDraft, Tier},
};

/// Operand range per tier for addition and subtraction.
const SUM_RANGES: [(i64, i64); 6] = [
    (1, 20),
    (10, 50),
    (20, 100),
    (50, 300),
    (100, 500),
    (100, 999),
];

pub fn addition(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let (min, max) = SUM_RANGES[tier.index()];
    let a = rand_between(rng, min, max);
    let b = rand_between(rng, min, max);
    let answer = a + b;

    draft(
        format!("{a} + {b}"),
        answer,
        vec![a, b],
        "Round to the nearest ten, then adjust.",
        steps(&[
            "ROUNDING: Round numbers are easy to add.".to_string(),
            format!("ACTION: Move {a} or {b} to the nearest ten."),
            "ADJUST: Correct for the amount you rounded by.".to_string(),
            format!("SOLUTION: {a} + {b} = {answer}."),
        ]),
    )
}

/// Minuend is drawn from the upper two thirds of the range so the result
/// is always at least 1.
pub fn subtraction(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let (min, max) = SUM_RANGES[tier.index()];
    let a = rand_between(rng, min + (max - min) / 3, max);
    let b = rand_between(rng, min, a - 1);
    let answer = a - b;
    let next_ten = (b + 9) / 10 * 10;

    draft(
        format!("{a} - {b}"),
        answer,
        vec![a, b],
        format!("How far is it from {b} up to {a}?"),
        steps(&[
            format!("DISTANCE: How much is missing from {b} to {a}?"),
            format!("STEP 1: Climb from {b} to the next ten ({next_ten})."),
            format!("STEP 2: Keep going up to {a}."),
            format!("SOLUTION: {a} - {b} = {answer}."),
        ]),
    )
}

pub fn multiplication(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    // (a range, b range): times tables first, then two-digit operands.
    let ((a_min, a_max), (b_min, b_max)) = match tier.get() {
        1 => ((2, 5), (2, 5)),
        2 => ((2, 9), (2, 9)),
        3 => ((2, 12), (2, 12)),
        4 => ((10, 25), (2, 9)),
        5 => ((10, 50), (2, 12)),
        _ => ((10, 99), (10, 25)),
    };
    let a = rand_between(rng, a_min, a_max);
    let b = rand_between(rng, b_min, b_max);
    let answer = a * b;

    if a < 10 {
        return draft(
            format!("{a} × {b}"),
            answer,
            vec![a, b],
            format!("Count up the {b} times table {a} times."),
            steps(&[
                format!("TABLE: {a} × {b} is in the {b} times table."),
                format!("RECALL: {a} groups of {b}."),
                format!("CHECK: {b} × {a} gives the same result."),
                format!("SOLUTION: {a} × {b} = {answer}."),
            ]),
        );
    }

    let (tens, units) = (a / 10 * 10, a % 10);
    draft(
        format!("{a} × {b}"),
        answer,
        vec![a, b],
        format!("Break {a} into {tens} + {units}."),
        steps(&[
            format!("DECOMPOSE: {a} = {tens} + {units}."),
            format!("STEP 1: {tens} × {b} = {}.", tens * b),
            format!("STEP 2: {units} × {b} = {}.", units * b),
            format!("STEP 3: Add the results = {answer}."),
        ]),
    )
}

/// Built backward from the quotient: dividend = divisor × quotient.
pub fn division(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let ((d_min, d_max), (q_min, q_max)) = match tier.get() {
        1 => ((2, 5), (1, 10)),
        2 => ((2, 9), (2, 12)),
        3 => ((2, 12), (2, 15)),
        4 => ((3, 12), (5, 20)),
        5 => ((5, 15), (5, 30)),
        _ => ((5, 25), (10, 50)),
    };
    let divisor = rand_between(rng, d_min, d_max);
    let quotient = rand_between(rng, q_min, q_max);
    let dividend = divisor * quotient;

    draft(
        format!("{dividend} ÷ {divisor}"),
        quotient,
        vec![dividend, divisor],
        format!("In the {divisor} times table, what × {divisor} = {dividend}?"),
        steps(&[
            "INVERT: Think of it as multiplication in reverse.".to_string(),
            format!("QUESTION: {divisor} × ? = {dividend}."),
            format!("TEST: Try multiples of {divisor} close to {dividend}."),
            format!("ANSWER: {divisor} × {quotient} = {dividend}."),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn subtraction_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(11);
        for tier in Tier::all() {
            for _ in 0..500 {
                let q = subtraction(&mut rng, tier);
                assert!(q.values[0] > q.values[1], "{}", q.text);
                assert!(q.answer >= 1);
            }
        }
    }

    #[test]
    fn tier_one_multiplication_stays_in_small_tables() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let q = multiplication(&mut rng, Tier::new(1));
            assert!(q.values.iter().all(|v| (2..=5).contains(v)), "{}", q.text);
        }
    }

    #[test]
    fn tier_six_multiplication_caps_second_operand() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..500 {
            let q = multiplication(&mut rng, Tier::new(6));
            assert!((10..=99).contains(&q.values[0]));
            assert!((10..=25).contains(&q.values[1]));
        }
    }

    #[test]
    fn single_digit_products_use_times_tables() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in [1, 2, 3].map(Tier::new) {
            for _ in 0..300 {
                let q = multiplication(&mut rng, tier);
                if q.values[0] < 10 {
                    assert!(q.explanation.starts_with("TABLE:"), "{}: {}", q.text, q.explanation);
                    assert!(!q.explanation.contains("tens"));
                }
            }
        }
    }

    #[test]
    fn two_digit_products_split_into_tens_and_units() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..300 {
            let q = multiplication(&mut rng, Tier::new(5));
            let (a, b) = (q.values[0], q.values[1]);
            let tens = a / 10 * 10;
            assert!(q.explanation.contains(&format!("{tens} × {b} = {}", tens * b)), "{}", q.explanation);
            assert!(q.explanation.ends_with(&format!("= {}.", q.answer)));
        }
    }

    #[test]
    fn division_text_shows_dividend_then_divisor() {
        let mut rng = StdRng::seed_from_u64(8);
        let q = division(&mut rng, Tier::new(3));
        assert_eq!(q.text, format!("{} ÷ {}", q.values[0], q.values[1]));
        assert_eq!(q.values[0], q.values[1] * q.answer);
    }
}
