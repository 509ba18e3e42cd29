//! Shared arithmetic and builder helpers used by every operation generator.
//!
//! Generators take `&mut dyn RngCore` so they fit one function-pointer type;
//! the helpers here accept any `Rng + ?Sized` so they work with both trait
//! objects and concrete generators in tests.

use rand::Rng;

use crate::question_engine::models::QuestionDraft;

/// Greatest common divisor (Euclid). Always non-negative; `gcd(a, 0) == |a|`.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Uniform integer in `[min, max]`, inclusive. Swapped bounds are tolerated.
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(lo..=hi)
}

/// Uniform pick from a non-empty slice of copyable values.
pub fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Join explanation steps with the `|` delimiter clients split on.
pub fn steps<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join("|")
}

/// Assemble a [`QuestionDraft`]. Last call in every generator.
pub fn draft(
    text: String, answer: i64, values: Vec<i64>,
    hint: impl Into<String>, explanation: String,
) -> QuestionDraft {
    QuestionDraft {
        text,
        answer,
        values,
        hint: hint.into(),
        explanation,
    }
}
