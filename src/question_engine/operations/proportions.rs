//! Percentage and fraction-of questions.
//!
//! Both are constructed backward: the base is always a multiple of the
//! denominator the percent or fraction implies, so the amount is an exact
//! integer.

use rand::{Rng, RngCore};

use crate::question_engine::{
    helpers::{draft, gcd, pick, rand_between, steps},
    models::{QuestionDraft, Tier},
};

/// Percent choices and base multiplier per tier.
fn percent_table(tier: Tier) -> (&'static [i64], i64) {
    match tier.get() {
        1 => (&[10, 50], 10),
        2 => (&[10, 25, 50], 10),
        3 => (&[10, 20, 25, 50, 75], 20),
        4 => (&[5, 10, 15, 20, 25, 50, 75], 20),
        5 => (&[5, 10, 15, 20, 25, 30, 40, 50, 75], 40),
        _ => (&[5, 10, 12, 15, 20, 25, 30, 33, 40, 50, 60, 75], 60),
    }
}

/// Smallest base for which `percent × base / 100` is an integer.
pub fn required_divisor(percent: i64) -> i64 {
    100 / gcd(percent, 100)
}

pub fn percentage(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let (percents, multiplier) = percent_table(tier);
    let p = pick(rng, percents);
    let divisor = required_divisor(p);
    // At least two bases per percent, even for coarse ones like 33%.
    let factor = rand_between(rng, 1, (multiplier / divisor).max(2));
    let base = factor * divisor;
    let answer = p * base / 100;

    let explanation = match p {
        50 => steps(&[
            "CONCEPT: 50% = half.".to_string(),
            format!("OPERATION: {base} ÷ 2."),
            format!("ANSWER: {answer}."),
        ]),
        10 => steps(&[
            "TRICK: 10% = shift the decimal point one place.".to_string(),
            format!("ACTION: {base} ÷ 10."),
            format!("ANSWER: {answer}."),
        ]),
        25 => steps(&[
            "STRATEGY: 25% = half of a half.".to_string(),
            format!("STEP 1: {base} ÷ 2 = {}.", base / 2),
            format!("STEP 2: {} ÷ 2 = {answer}.", base / 2),
        ]),
        75 => steps(&[
            "TIP: 75% = 50% + 25%.".to_string(),
            format!("STEP 1: 50% of {base} = {}.", base / 2),
            format!("STEP 2: 25% of {base} = {}.", base / 4),
            format!("SUM: {} + {} = {answer}.", base / 2, base / 4),
        ]),
        _ => steps(&[
            format!("ANALYSIS: {p}% = {p}/100."),
            format!("WORKING: {base} × {p} ÷ 100."),
            "TIP: Split it into easy parts (e.g. 10% + 5%).".to_string(),
            format!("ANSWER: {answer}."),
        ]),
    };

    draft(
        format!("{p}% of {base}"),
        answer,
        vec![p, base],
        format!("Break {p}% into simpler percentages."),
        explanation,
    )
}

/// Denominator choices, non-unit probability, numerator cap and base factor
/// range per tier.
struct FractionPlan {
    denominators: &'static [i64],
    non_unit_chance: f64,
    numerator_cap: i64,
    factor: (i64, i64),
}

fn fraction_plan(tier: Tier) -> FractionPlan {
    match tier.get() {
        1 | 2 => FractionPlan { denominators: &[2, 4, 5], non_unit_chance: 0.0, numerator_cap: 1, factor: (1, 8) },
        3 => FractionPlan { denominators: &[2, 3, 4, 5, 10], non_unit_chance: 0.0, numerator_cap: 1, factor: (2, 10) },
        4 => FractionPlan { denominators: &[2, 3, 4, 5, 6, 8, 10], non_unit_chance: 0.5, numerator_cap: i64::MAX, factor: (2, 12) },
        5 => FractionPlan { denominators: &[2, 3, 4, 5, 6, 8, 10, 12], non_unit_chance: 0.6, numerator_cap: 5, factor: (3, 15) },
        _ => FractionPlan { denominators: &[2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 15], non_unit_chance: 0.7, numerator_cap: 7, factor: (3, 20) },
    }
}

pub fn fraction_of(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft {
    let plan = fraction_plan(tier);
    let denominator = pick(rng, plan.denominators);
    // A halves denominator has no proper non-unit numerator.
    let numerator = if denominator > 2 && rng.gen_bool(plan.non_unit_chance) {
        rand_between(rng, 2, (denominator - 1).min(plan.numerator_cap))
    } else {
        1
    };
    let base = denominator * rand_between(rng, plan.factor.0, plan.factor.1);

    let g = gcd(numerator, denominator);
    let (num, den) = (numerator / g, denominator / g);
    let part = base / den;
    let answer = part * num;
    let fraction = format!("{num}/{den}");

    let mut parts = vec![
        if num > 1 {
            format!("CONCEPT: {fraction} of {base} = split into {den} parts and take {num}.")
        } else {
            format!("CONCEPT: {fraction} of {base} = split into {den} parts.")
        },
        format!("STEP 1: {base} ÷ {den} = {part}."),
    ];
    if num > 1 {
        parts.push(format!("STEP 2: {part} × {num} = {answer}."));
    }
    parts.push(format!("ANSWER: {answer}."));

    let hint = if num > 1 {
        format!("Divide {base} by {den}, then multiply by {num}.")
    } else {
        format!("Divide {base} by {den}.")
    };

    draft(format!("{fraction} of {base}"), answer, vec![num, den, base], hint, steps(&parts))
}
