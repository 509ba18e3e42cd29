//! Per-operation generators, grouped by family.
//!
//! Every generator has the same shape:
//!
//! ```ignore
//! pub fn <name>(rng: &mut dyn RngCore, tier: Tier) -> QuestionDraft
//! ```
//!
//! The orchestrator reaches them through [`generator_for`].

use rand::RngCore;

use crate::question_engine::models::{OperationKind, QuestionDraft, Tier};

/// add, sub, mul, div
pub mod arithmetic;
/// power, sqrt
pub mod powers;
/// percentage, fraction-of
pub mod proportions;
/// linear equation
pub mod algebra;

pub type GeneratorFn = fn(&mut dyn RngCore, Tier) -> QuestionDraft;

/// Lookup from operation kind to its generator.
pub fn generator_for(kind: OperationKind) -> GeneratorFn {
    match kind {
        OperationKind::Add        => arithmetic::addition,
        OperationKind::Sub        => arithmetic::subtraction,
        OperationKind::Mul        => arithmetic::multiplication,
        OperationKind::Div        => arithmetic::division,
        OperationKind::Power      => powers::power,
        OperationKind::Sqrt       => powers::square_root,
        OperationKind::Percentage => proportions::percentage,
        OperationKind::Equation   => algebra::linear_equation,
        OperationKind::Fraction   => proportions::fraction_of,
    }
}
