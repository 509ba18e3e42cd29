use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Operation kinds
// ---------------------------------------------------------------------------

/// The nine kinds of question the engine can generate.
///
/// Serialised (and parsed) by op-code: `"+"`, `"-"`, `"*"`, `"/"`, `"power"`,
/// `"sqrt"`, `"percentage"`, `"equation"`, `"fraction"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "power")]
    Power,
    #[serde(rename = "sqrt")]
    Sqrt,
    #[serde(rename = "percentage")]
    Percentage,
    #[serde(rename = "equation")]
    Equation,
    #[serde(rename = "fraction")]
    Fraction,
}

impl OperationKind {
    pub const ALL: [OperationKind; 9] = [
        OperationKind::Add,
        OperationKind::Sub,
        OperationKind::Mul,
        OperationKind::Div,
        OperationKind::Power,
        OperationKind::Sqrt,
        OperationKind::Percentage,
        OperationKind::Equation,
        OperationKind::Fraction,
    ];

    /// Stable op-code used by level tables, user filters and clients.
    pub fn code(self) -> &'static str {
        match self {
            OperationKind::Add        => "+",
            OperationKind::Sub        => "-",
            OperationKind::Mul        => "*",
            OperationKind::Div        => "/",
            OperationKind::Power      => "power",
            OperationKind::Sqrt       => "sqrt",
            OperationKind::Percentage => "percentage",
            OperationKind::Equation   => "equation",
            OperationKind::Fraction   => "fraction",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation code: {0:?}")]
pub struct ParseOperationError(pub String);

impl FromStr for OperationKind {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.code() == s.trim())
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Difficulty tier
// ---------------------------------------------------------------------------

/// Difficulty bucket 1..=6 controlling operand ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(u8);

impl Tier {
    pub const MIN: Tier = Tier(1);
    pub const MAX: Tier = Tier(6);

    /// Build a tier, clamping into 1..=6.
    pub fn new(value: u8) -> Self {
        Tier(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-tier tables.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::MIN.0..=Self::MAX.0).map(Tier)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A finished question, ready for display and grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answer: i64,
    #[serde(rename = "opType")]
    pub op_type: OperationKind,
    /// Operands in the per-kind order documented on [`QuestionDraft::values`].
    pub values: Vec<i64>,
    pub hint: Option<String>,
    /// `|`-delimited solution steps.
    pub explanation: Option<String>,
}

impl Question {
    /// Explanation split into its ordered steps (empty when absent).
    pub fn explanation_steps(&self) -> Vec<&str> {
        self.explanation
            .as_deref()
            .map(|e| e.split('|').collect())
            .unwrap_or_default()
    }
}

/// What a per-operation generator produces: a question minus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub answer: i64,
    /// Operand layout by kind:
    ///
    /// | Kind       | `values`                                  |
    /// |------------|-------------------------------------------|
    /// | add/sub/mul| `[a, b]`                                  |
    /// | div        | `[dividend, divisor]`                     |
    /// | power      | `[base, exponent]`                        |
    /// | sqrt       | `[radicand]`                              |
    /// | percentage | `[percent, base]`                         |
    /// | fraction   | `[numerator, denominator, base]`          |
    /// | equation   | `[coefficient, constant, result]`         |
    pub values: Vec<i64>,
    pub hint: String,
    pub explanation: String,
}

impl QuestionDraft {
    pub fn into_question(self, op_type: OperationKind) -> Question {
        Question {
            text: self.text,
            answer: self.answer,
            op_type,
            values: self.values,
            hint: Some(self.hint),
            explanation: Some(self.explanation),
        }
    }
}

// ---------------------------------------------------------------------------
// Level configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u8,
    pub name: String,
    /// Operations unlocked at this level, in unlock order.
    pub operations: Vec<OperationKind>,
    /// Legacy numeric bound. Operand ranges come from the tier; this is
    /// passed through for clients that still display it.
    pub range: (i64, i64),
    /// Seconds allowed per question.
    pub time_per_question: u32,
    pub total_questions: u32,
}
