use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::question_engine::{
    helpers::pick,
    history::HistoryTracker,
    models::{LevelConfig, OperationKind, Question, Tier},
    operations::generator_for,
};

/// Attempts at finding a question not in history before giving up on
/// uniqueness.
pub const MAX_ATTEMPTS: usize = 50;

/// What the caller wants a question for.
#[derive(Debug, Clone, Copy)]
pub struct QuestionRequest<'a> {
    pub config: &'a LevelConfig,
    /// Player's operation filter; empty means "use the level's operations".
    pub selected_ops: &'a [OperationKind],
    /// Correct answers so far in a training run. Present only in adaptive mode.
    pub training_count: Option<u32>,
}

impl<'a> QuestionRequest<'a> {
    pub fn new(config: &'a LevelConfig) -> Self {
        QuestionRequest { config, selected_ops: &[], training_count: None }
    }

    pub fn with_operations(mut self, ops: &'a [OperationKind]) -> Self {
        self.selected_ops = ops;
        self
    }

    pub fn training(mut self, correct_count: u32) -> Self {
        self.training_count = Some(correct_count);
        self
    }

    pub fn tier(&self) -> Tier {
        Tier::resolve(self.config.level, self.training_count)
    }

    /// The operations to draw from: the filter, else the level's set, else
    /// addition alone.
    pub fn available_ops(&self) -> &'a [OperationKind] {
        if !self.selected_ops.is_empty() {
            self.selected_ops
        } else if !self.config.operations.is_empty() {
            &self.config.operations
        } else {
            &[OperationKind::Add]
        }
    }
}

/// Generate one question, avoiding texts already in `history`.
///
/// Gives up on uniqueness after `max_attempts` candidates: history is cleared
/// and the last candidate is accepted, so this always returns.
pub fn generate_question_with<R: Rng>(
    rng: &mut R,
    history: &mut HistoryTracker,
    request: &QuestionRequest<'_>,
    max_attempts: usize,
) -> Question {
    let tier = request.tier();
    let ops = request.available_ops();
    let max_attempts = max_attempts.max(1);

    let mut attempts = 0;
    let question = loop {
        let kind = pick(rng, ops);
        let candidate = generator_for(kind)(&mut *rng, tier).into_question(kind);
        attempts += 1;

        if !history.contains(&candidate.text) {
            break candidate;
        }
        if attempts >= max_attempts {
            debug!(
                target: "question_engine",
                attempts, %tier, history_len = history.len(),
                "no unseen question found; clearing history"
            );
            history.clear();
            break candidate;
        }
    };

    history.record(&question.text);
    trace!(target: "question_engine", op = %question.op_type, %tier, text = %question.text, attempts, "question accepted");
    question
}

/// [`generate_question_with`] using [`MAX_ATTEMPTS`].
pub fn generate_question<R: Rng>(
    rng: &mut R,
    history: &mut HistoryTracker,
    request: &QuestionRequest<'_>,
) -> Question {
    generate_question_with(rng, history, request, MAX_ATTEMPTS)
}

// ---------------------------------------------------------------------------
// Engine: RNG + history bundled for a single owner
// ---------------------------------------------------------------------------

/// A seedable generator with its own anti-repetition history.
///
/// One per game session or training run; nothing is shared between engines.
#[derive(Debug, Clone)]
pub struct QuestionEngine {
    rng: StdRng,
    history: HistoryTracker,
    max_attempts: usize,
}

impl QuestionEngine {
    /// Deterministic engine: same seed, same question sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None       => Self::from_entropy(),
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        QuestionEngine { rng, history: HistoryTracker::new(), max_attempts: MAX_ATTEMPTS }
    }

    pub fn with_history(mut self, history: HistoryTracker) -> Self {
        self.history = history;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn next_question(&mut self, request: &QuestionRequest<'_>) -> Question {
        generate_question_with(&mut self.rng, &mut self.history, request, self.max_attempts)
    }

    /// Forget every remembered question. Call when a new level or training
    /// run starts.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }
}
