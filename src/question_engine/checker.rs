//! Reference evaluation of an operation over its operands, and numeric
//! grading of player input.

use crate::question_engine::models::{OperationKind, Question};

/// Evaluate `kind` over `values` using the operand layout documented on
/// [`QuestionDraft::values`](crate::question_engine::models::QuestionDraft).
///
/// Returns `None` when the operands are malformed (wrong arity, division by
/// zero) or the result is not an exact integer.
pub fn evaluate(kind: OperationKind, values: &[i64]) -> Option<i64> {
    match (kind, values) {
        (OperationKind::Add, &[a, b]) => a.checked_add(b),
        (OperationKind::Sub, &[a, b]) => a.checked_sub(b),
        (OperationKind::Mul, &[a, b]) => a.checked_mul(b),
        (OperationKind::Div, &[dividend, divisor]) => exact_div(dividend, divisor),
        (OperationKind::Power, &[base, exponent]) => {
            u32::try_from(exponent).ok().and_then(|e| base.checked_pow(e))
        }
        (OperationKind::Sqrt, &[radicand]) => exact_sqrt(radicand),
        (OperationKind::Percentage, &[percent, base]) => exact_div(percent.checked_mul(base)?, 100),
        (OperationKind::Fraction, &[numerator, denominator, base]) => {
            exact_div(numerator.checked_mul(base)?, denominator)
        }
        (OperationKind::Equation, &[coefficient, constant, result]) => {
            exact_div(result.checked_sub(constant)?, coefficient)
        }
        _ => None,
    }
}

fn exact_div(n: i64, d: i64) -> Option<i64> {
    if d == 0 || n % d != 0 {
        return None;
    }
    Some(n / d)
}

fn exact_sqrt(n: i64) -> Option<i64> {
    if n < 0 {
        return None;
    }
    let root = (n as f64).sqrt().round() as i64;
    (root.checked_mul(root) == Some(n)).then_some(root)
}

/// Numeric equality between the player's input and the answer.
///
/// Input is trimmed and parsed as a decimal number, so `"12"`, `" 12 "` and
/// `"12.0"` all match 12. Anything unparseable is simply wrong.
pub fn is_correct(question: &Question, input: &str) -> bool {
    match input.trim().parse::<f64>() {
        Ok(value) => value == question.answer as f64,
        Err(_) => false,
    }
}
