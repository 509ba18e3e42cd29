//! # math_drill_gen
//!
//! An offline, deterministic generator of mental-math practice questions,
//! plus the game rules around it (lives, timer, scoring, streaks, progress).
//!
//! Questions cover nine operation kinds (addition, subtraction,
//! multiplication, division, powers, square roots, percentages, linear
//! equations and fractions of a number) across 30 levels grouped into six
//! difficulty tiers. Every question has an exact integer answer, a one-line
//! hint and a `|`-delimited step-by-step explanation.
//!
//! ## How it works
//!
//! 1. Pick a [`LevelConfig`] from [`level_table`] (or build your own).
//! 2. Wrap it in a [`QuestionRequest`], optionally narrowing the operations or
//!    passing a training counter for adaptive difficulty.
//! 3. Call [`QuestionEngine::next_question`]. The engine resolves the tier,
//!    picks an operation, builds the operands backward from the answer, and
//!    skips texts it has shown recently.
//!
//! ## Key features
//!
//! - **Deterministic**: `QuestionEngine::seeded(u64)` replays the exact same
//!   question sequence, which is what the tests rely on.
//! - **Exact answers**: division, roots, percentages, fractions and equations
//!   are constructed from the intended answer, never validated after the fact.
//! - **No global state**: anti-repetition history belongs to the engine (or to
//!   whatever [`HistoryTracker`] you pass to [`generate_question`]).
//!
//! ## Quick start
//!
//! ```rust
//! use math_drill_gen::{level_or_first, OperationKind, QuestionEngine, QuestionRequest};
//!
//! let mut engine = QuestionEngine::seeded(42);
//!
//! // Level 12 unlocks + - * /; tier 3.
//! let q = engine.next_question(&QuestionRequest::new(level_or_first(12)));
//! println!("{} = {}", q.text, q.answer);
//!
//! // Only square roots, adaptive tier after 17 correct answers (tier 4):
//! let ops = [OperationKind::Sqrt];
//! let q = engine.next_question(
//!     &QuestionRequest::new(level_or_first(1)).with_operations(&ops).training(17),
//! );
//! assert_eq!(q.answer * q.answer, q.values[0]);
//!
//! // New level: forget what was shown.
//! engine.clear_history();
//! ```

pub mod client_adapter;
pub mod progress;
pub mod question_engine;
pub mod rules;
pub mod session;
pub mod tutor;

// Convenience re-exports so callers can use `math_drill_gen::QuestionEngine`
// directly without reaching into `question_engine::`.
pub use client_adapter::{to_client_payload, to_client_state};
pub use progress::{Progress, ProgressError, Settings};
pub use question_engine::{
    evaluate, generate_question, is_correct, level, level_or_first, level_table,
    HistoryTracker, LevelConfig, OperationKind, Question, QuestionEngine, QuestionRequest, Tier,
};
pub use rules::{ConfigError, GameRules};
pub use session::{AnswerOutcome, GameSession, Mode, Phase, SessionStats};
pub use tutor::{explain_mistake, Explainer, MistakeReport, StaticExplainer, TutorError};
