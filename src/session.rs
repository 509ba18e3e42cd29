//! A single player's run: level play with lives, timer and scoring, or an
//! open-ended training run whose difficulty follows the player's streak of
//! correct answers.
//!
//! The session owns its [`QuestionEngine`], so anti-repetition history is
//! per-session and is cleared whenever a level or training run starts.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    progress::Progress,
    question_engine::{
        checker::is_correct,
        history::HistoryTracker,
        levels::level_or_first,
        OperationKind, Question, QuestionEngine, QuestionRequest,
    },
    rules::GameRules,
    tutor::MistakeReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Level,
    Training,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No level or training run started yet.
    Idle,
    AwaitingAnswer,
    /// The current question has been graded; call [`GameSession::advance`].
    Answered,
    LevelComplete,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    /// `None` in training mode (unlimited).
    pub lives: Option<u32>,
    pub current_level: u8,
    pub question_index: u32,
    pub correct_in_level: u32,
    pub perfect_level: bool,
    pub streak: u32,
    pub best_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct {
        points: u32,
        speed_bonus: bool,
        streak_bonus: bool,
    },
    Wrong {
        correct_answer: i64,
        /// `None` in training mode.
        lives_left: Option<u32>,
        mistake: MistakeReport,
    },
    /// Nothing is awaiting an answer right now.
    Ignored,
}

#[derive(Debug)]
pub struct GameSession {
    rules: GameRules,
    engine: QuestionEngine,
    selected_ops: Vec<OperationKind>,
    mode: Mode,
    phase: Phase,
    stats: SessionStats,
    current: Option<Question>,
    progress: Progress,
}

impl GameSession {
    /// `seed: None` draws questions from entropy.
    pub fn new(rules: GameRules, seed: Option<u64>) -> Self {
        let engine = QuestionEngine::new(seed)
            .with_history(HistoryTracker::with_capacity(rules.history_capacity))
            .with_max_attempts(rules.max_attempts);
        let stats = SessionStats {
            score: 0,
            lives: Some(rules.initial_lives),
            current_level: 1,
            question_index: 0,
            correct_in_level: 0,
            perfect_level: true,
            streak: 0,
            best_streak: 0,
        };
        GameSession {
            rules,
            engine,
            selected_ops: Vec::new(),
            mode: Mode::Level,
            phase: Phase::Idle,
            stats,
            current: None,
            progress: Progress::default(),
        }
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.selected_ops = progress.selected_ops.clone();
        self.progress = progress;
        self
    }

    /// Player's operation filter. Empty means "whatever the level unlocks".
    pub fn set_operations(&mut self, ops: Vec<OperationKind>) {
        self.progress.selected_ops = ops.clone();
        self.selected_ops = ops;
    }

    /// Start `level` from scratch with a fresh score. Unknown levels fall
    /// back to level 1.
    pub fn new_game(&mut self, level: u8) {
        self.stats.score = 0;
        self.start_level(level);
    }

    /// Start (or restart) `level`, carrying the current score over.
    pub fn start_level(&mut self, level: u8) {
        let config = level_or_first(level);
        self.mode = Mode::Level;
        self.reset_run(config.level, Some(self.rules.initial_lives));
        info!(target: "session", level = config.level, name = %config.name, "level started");
        self.next_question();
    }

    /// Start an adaptive training run: no timer, no lives, tier climbs with
    /// correct answers.
    pub fn start_training(&mut self) {
        self.mode = Mode::Training;
        self.reset_run(1, None);
        info!(target: "session", "training started");
        self.next_question();
    }

    fn reset_run(&mut self, level: u8, lives: Option<u32>) {
        self.engine.clear_history();
        self.stats.lives = lives;
        self.stats.current_level = level;
        self.stats.question_index = 0;
        self.stats.correct_in_level = 0;
        self.stats.perfect_level = true;
        self.stats.streak = 0;
    }

    fn next_question(&mut self) {
        let config = level_or_first(self.stats.current_level);
        let mut request = QuestionRequest::new(config).with_operations(&self.selected_ops);
        if self.mode == Mode::Training {
            request = request.training(self.stats.correct_in_level);
        }
        self.current = Some(self.engine.next_question(&request));
        self.phase = Phase::AwaitingAnswer;
    }

    /// Seconds allowed for the current question; `None` in training.
    pub fn time_budget(&self) -> Option<u32> {
        match self.mode {
            Mode::Level    => Some(level_or_first(self.stats.current_level).time_per_question),
            Mode::Training => None,
        }
    }

    /// Grade `input` against the current question.
    ///
    /// `elapsed_secs` is how long the player took; it only matters for the
    /// speed bonus.
    pub fn submit_answer(&mut self, input: &str, elapsed_secs: f32) -> AnswerOutcome {
        if self.phase != Phase::AwaitingAnswer {
            return AnswerOutcome::Ignored;
        }
        let Some(question) = self.current.as_ref() else {
            return AnswerOutcome::Ignored;
        };
        self.progress.add_play_time(elapsed_secs);

        if is_correct(question, input) {
            self.stats.correct_in_level += 1;
            self.stats.streak += 1;
            self.stats.best_streak = self.stats.best_streak.max(self.stats.streak);
            self.phase = Phase::Answered;

            if self.mode == Mode::Training {
                debug!(target: "session", correct = self.stats.correct_in_level, "training answer correct");
                return AnswerOutcome::Correct { points: 0, speed_bonus: false, streak_bonus: false };
            }

            let speed_bonus = self
                .time_budget()
                .is_some_and(|t| elapsed_secs <= t as f32 * self.rules.speed_bonus_fraction);
            let streak_bonus = self.rules.streak_bonus_every > 0
                && self.stats.streak % self.rules.streak_bonus_every == 0;

            let mut points = self.rules.base_correct_points;
            if speed_bonus {
                points += self.rules.speed_bonus_points;
            }
            if streak_bonus {
                points += self.rules.streak_bonus_points;
            }
            self.stats.score = self.stats.score.saturating_add(points);
            debug!(target: "session", points, speed_bonus, streak_bonus, score = self.stats.score, "answer correct");
            AnswerOutcome::Correct { points, speed_bonus, streak_bonus }
        } else {
            let correct_answer = question.answer;
            let mistake = MistakeReport::new(question, input);
            self.stats.streak = 0;
            self.phase = Phase::Answered;

            if self.mode == Mode::Level {
                self.stats.perfect_level = false;
                self.stats.score = self.stats.score.saturating_sub(self.rules.wrong_penalty);
                let left = self.stats.lives.unwrap_or(0).saturating_sub(1);
                self.stats.lives = Some(left);
                if left == 0 {
                    self.game_over("out of lives");
                }
            }
            debug!(target: "session", %correct_answer, input, lives = ?self.stats.lives, "answer wrong");
            AnswerOutcome::Wrong { correct_answer, lives_left: self.stats.lives, mistake }
        }
    }

    /// The question timer ran out. Ends a level run; ignored in training.
    pub fn time_expired(&mut self) -> Phase {
        if self.mode == Mode::Level && self.phase == Phase::AwaitingAnswer {
            self.game_over("time expired");
        }
        self.phase
    }

    /// Move past an answered question: either the next question or, after
    /// the level's last question, `LevelComplete`.
    pub fn advance(&mut self) -> Phase {
        if self.phase != Phase::Answered {
            return self.phase;
        }
        let config = level_or_first(self.stats.current_level);
        if self.mode == Mode::Level && self.stats.question_index + 1 >= config.total_questions {
            self.progress.record_level_complete(config.level, self.stats.score);
            self.phase = Phase::LevelComplete;
            self.current = None;
            info!(
                target: "session",
                level = config.level, score = self.stats.score,
                perfect = self.stats.perfect_level, "level complete"
            );
            return self.phase;
        }
        self.stats.question_index += 1;
        self.next_question();
        self.phase
    }

    fn game_over(&mut self, reason: &str) {
        self.phase = Phase::GameOver;
        info!(
            target: "session",
            level = self.stats.current_level, score = self.stats.score,
            reason, "game over"
        );
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(GameRules::default(), Some(42))
    }

    fn answer_of(s: &GameSession) -> String {
        s.current_question().unwrap().answer.to_string()
    }

    #[test]
    fn starts_idle_and_ignores_answers() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.submit_answer("1", 1.0), AnswerOutcome::Ignored);
    }

    #[test]
    fn correct_fast_answer_earns_speed_bonus() {
        let mut s = session();
        s.new_game(1);
        let a = answer_of(&s);
        let outcome = s.submit_answer(&a, 1.0);
        assert_eq!(outcome, AnswerOutcome::Correct { points: 150, speed_bonus: true, streak_bonus: false });
        assert_eq!(s.stats().score, 150);
        assert_eq!(s.phase(), Phase::Answered);
    }

    #[test]
    fn slow_answer_earns_base_points_only() {
        let mut s = session();
        s.new_game(1);
        let a = answer_of(&s);
        assert_eq!(
            s.submit_answer(&a, 29.0),
            AnswerOutcome::Correct { points: 100, speed_bonus: false, streak_bonus: false }
        );
    }

    #[test]
    fn fifth_consecutive_correct_pays_streak_bonus() {
        let mut s = session();
        s.new_game(1);
        let mut last = AnswerOutcome::Ignored;
        for _ in 0..5 {
            let a = answer_of(&s);
            last = s.submit_answer(&a, 20.0);
            s.advance();
        }
        assert_eq!(last, AnswerOutcome::Correct { points: 150, speed_bonus: false, streak_bonus: true });
        assert_eq!(s.stats().best_streak, 5);
    }

    #[test]
    fn wrong_answers_cost_lives_then_end_the_game() {
        let mut s = session();
        s.new_game(1);
        for expected_left in [2, 1, 0] {
            let a = answer_of(&s);
            let wrong = format!("{}1", a);
            match s.submit_answer(&wrong, 1.0) {
                AnswerOutcome::Wrong { lives_left, mistake, .. } => {
                    assert_eq!(lives_left, Some(expected_left));
                    assert_eq!(mistake.user_answer, wrong);
                }
                other => panic!("expected wrong, got {other:?}"),
            }
            if expected_left > 0 {
                assert_eq!(s.advance(), Phase::AwaitingAnswer);
            }
        }
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(!s.stats().perfect_level);
        assert_eq!(s.advance(), Phase::GameOver);
    }

    #[test]
    fn penalty_never_drops_score_below_zero() {
        let mut s = session();
        s.new_game(1);
        s.submit_answer("not a number", 1.0);
        assert_eq!(s.stats().score, 0);
    }

    #[test]
    fn ten_answers_complete_the_level_and_unlock_the_next() {
        let mut s = session();
        s.new_game(3);
        for _ in 0..10 {
            let a = answer_of(&s);
            s.submit_answer(&a, 1.0);
            s.advance();
        }
        assert_eq!(s.phase(), Phase::LevelComplete);
        assert!(s.stats().perfect_level);
        assert_eq!(s.progress().unlocked_level, 4);
        assert_eq!(s.progress().high_score(3), Some(s.stats().score));
        assert!(s.current_question().is_none());
    }

    #[test]
    fn timer_expiry_ends_level_but_not_training() {
        let mut s = session();
        s.new_game(2);
        assert_eq!(s.time_expired(), Phase::GameOver);

        s.start_training();
        assert_eq!(s.time_budget(), None);
        assert_eq!(s.time_expired(), Phase::AwaitingAnswer);
    }

    #[test]
    fn training_never_loses_lives_and_climbs_tiers() {
        let mut s = session();
        s.set_operations(vec![OperationKind::Sqrt]);
        s.start_training();
        assert_eq!(s.mode(), Mode::Training);

        s.submit_answer("-1", 1.0);
        assert_eq!(s.stats().lives, None);
        s.advance();

        for _ in 0..25 {
            let a = answer_of(&s);
            assert_eq!(s.submit_answer(&a, 1.0), AnswerOutcome::Correct { points: 0, speed_bonus: false, streak_bonus: false });
            s.advance();
        }
        assert_eq!(s.phase(), Phase::AwaitingAnswer);
        // 25 correct answers reach tier 6, where roots go up to 20.
        let q = s.current_question().unwrap();
        assert_eq!(q.op_type, OperationKind::Sqrt);
        assert!(q.answer <= 20);
        assert_eq!(s.stats().score, 0);
    }

    #[test]
    fn operation_filter_is_honoured_and_remembered() {
        let mut s = session();
        s.set_operations(vec![OperationKind::Percentage]);
        s.new_game(1);
        for _ in 0..5 {
            assert_eq!(s.current_question().unwrap().op_type, OperationKind::Percentage);
            let a = answer_of(&s);
            s.submit_answer(&a, 1.0);
            s.advance();
        }
        assert_eq!(s.progress().selected_ops, vec![OperationKind::Percentage]);
    }

    #[test]
    fn restored_progress_keeps_level_operations() {
        let mut s = session();
        s.new_game(1);
        for _ in 0..10 {
            let a = answer_of(&s);
            s.submit_answer(&a, 3.0);
            s.advance();
        }
        assert_eq!(s.phase(), Phase::LevelComplete);
        assert_eq!(s.progress().total_time_played, 30);

        let saved = s.progress().to_json().unwrap();
        let restored = Progress::from_json(&saved).unwrap();
        let mut s = GameSession::new(GameRules::default(), Some(43)).with_progress(restored);
        assert_eq!(s.progress().unlocked_level, 2);
        s.new_game(1);
        for _ in 0..10 {
            let op = s.current_question().unwrap().op_type;
            assert!(matches!(op, OperationKind::Add | OperationKind::Sub), "level 1 produced {op}");
            let a = answer_of(&s);
            s.submit_answer(&a, 3.0);
            s.advance();
        }
    }

    #[test]
    fn restarting_a_level_restores_lives() {
        let mut s = session();
        s.new_game(1);
        s.submit_answer("nope", 1.0);
        assert_eq!(s.stats().lives, Some(2));
        s.start_level(1);
        assert_eq!(s.stats().lives, Some(3));
        assert_eq!(s.phase(), Phase::AwaitingAnswer);
    }
}
