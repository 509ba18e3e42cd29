use rand::{Rng, RngCore};

use crate::question_engine::{
    helpers::{draft, rand_between, steps},
    models::{QuestionDraft, Tier},
};

/// Render `coefficient·x + constant = result` the way a student writes it:
/// `x + 4 = 9`, `x - 3 = 2`, `5x = 35`, `3x - 2 = 13`.
pub fn equation_text(coefficient: i64, constant: i64, result: i64) -> String {
    let lhs = x_term(coefficient);
    match constant {
        0          => format!("{lhs} = {result}"),
        c if c > 0 => format!("{lhs} + {c} = {result}"),
        c          => format!("{lhs} - {} = {result}", -c),
    }
}

/// Linear equation in one unknown, built backward from the solution `x`.
///
/// The form escalates by tier: `x + a = b`, then `x ± a = b`, `a·x = b`,
/// `a·x + c = b` and finally `a·x ± c = b` with larger numbers.
pub fn linear_equation(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let (x, coefficient, constant) = match tier.get() {
        1 | 2 => (rand_between(rng, 1, 15), 1, rand_between(rng, 1, 10)),
        3 => {
            let x = rand_between(rng, 5, 30);
            let a = rand_between(rng, 3, 15);
            (x, 1, if rng.gen_bool(0.5) { a } else { -a })
        }
        4 => (rand_between(rng, 2, 12), rand_between(rng, 2, 9), 0),
        5 => {
            let x = rand_between(rng, 2, 15);
            (x, rand_between(rng, 2, 6), rand_between(rng, 1, 10))
        }
        _ => {
            let x = rand_between(rng, 3, 20);
            let a = rand_between(rng, 2, 8);
            let c = rand_between(rng, 2, 15);
            (x, a, if rng.gen_bool(0.5) { c } else { -c })
        }
    };
    let result = coefficient * x + constant;
    let text = equation_text(coefficient, constant, result);
    let isolated = result - constant;

    let mut parts = vec!["GOAL: Get x alone on one side.".to_string()];
    if constant > 0 {
        parts.push(format!("STEP 1: Subtract {constant} from both sides: {} = {isolated}.", x_term(coefficient)));
    } else if constant < 0 {
        parts.push(format!("STEP 1: Add {} to both sides: {} = {isolated}.", -constant, x_term(coefficient)));
    }
    if coefficient != 1 {
        parts.push(format!("STEP {}: Divide both sides by {coefficient}: x = {isolated} ÷ {coefficient}.", parts.len()));
    }
    parts.push(format!("SOLUTION: x = {x}."));

    draft(
        text,
        x,
        vec![coefficient, constant, result],
        "Move everything except x to the other side.",
        steps(&parts),
    )
}

fn x_term(coefficient: i64) -> String {
    if coefficient == 1 { "x".to_string() } else { format!("{coefficient}x") }
}
