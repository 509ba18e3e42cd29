//! Question engine: operand synthesis, tiering, anti-repetition, dispatch.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: operation kinds, tiers, questions, level configs |
//! | `helpers`    | gcd, bounded random integers, step joining, draft builder |
//! | `tier`       | Level / training counter to difficulty tier |
//! | `history`    | Bounded FIFO set of recently emitted question texts |
//! | `levels`     | The static 30-level table |
//! | `checker`    | Reference evaluation and numeric grading |
//! | `generator`  | `generate_question()` and the seedable `QuestionEngine` |
//! | `operations` | Nine per-operation generators grouped by family |

pub mod checker;
pub mod generator;
pub mod helpers;
pub mod history;
pub mod levels;
pub mod models;
pub mod operations;
pub mod tier;

pub use checker::{evaluate, is_correct};
pub use generator::{generate_question, generate_question_with, QuestionEngine, QuestionRequest, MAX_ATTEMPTS};
pub use history::HistoryTracker;
pub use levels::{level, level_or_first, level_table};
pub use models::{LevelConfig, OperationKind, ParseOperationError, Question, QuestionDraft, Tier};
