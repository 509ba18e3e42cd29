//! The static 30-level progression table.
//!
//! Operations unlock cumulatively (`+ -` from level 1, `*` after 5, `/` after
//! 10, fractions after 20) and the time budget shrinks by three quarters of a
//! second per level, never below 8 seconds.

use std::sync::OnceLock;

use crate::question_engine::models::{LevelConfig, OperationKind};

pub const LEVEL_COUNT: u8 = 30;
pub const QUESTIONS_PER_LEVEL: u32 = 10;

const LEVEL_NAMES: [&str; LEVEL_COUNT as usize] = [
    "Rookie", "Freshman", "Junior", "Agent", "Pilot",
    "Ninja", "Samurai", "Sage", "Wizard", "Elite",
    "Titan", "Cyborg", "Phoenix", "Dragon", "Lord",
    "Alpha", "Omega", "Galactic", "Cosmic", "Divine",
    "Quantum", "Matrix", "Oracle", "Infinite", "Eternal",
    "Legend", "Myth", "Deity", "Zen", "MASTER",
];

fn build_level(level: u8) -> LevelConfig {
    let mut operations = vec![OperationKind::Add, OperationKind::Sub];
    if level > 5 {
        operations.push(OperationKind::Mul);
    }
    if level > 10 {
        operations.push(OperationKind::Div);
    }
    if level > 20 {
        operations.push(OperationKind::Fraction);
    }

    let range = match level {
        11..=15      => (1, 12),
        26..=u8::MAX => (1, 200),
        _            => (1, 10 + level as i64 * 5),
    };
    // 30 - floor(level * 0.75), floored at 8 seconds.
    let time = 30u32.saturating_sub(level as u32 * 3 / 4).max(8);

    LevelConfig {
        level,
        name: LEVEL_NAMES[(level - 1) as usize].to_string(),
        operations,
        range,
        time_per_question: time,
        total_questions: QUESTIONS_PER_LEVEL,
    }
}

/// All levels, 1 through 30, built once.
pub fn level_table() -> &'static [LevelConfig] {
    static LEVELS: OnceLock<Vec<LevelConfig>> = OnceLock::new();
    LEVELS.get_or_init(|| (1..=LEVEL_COUNT).map(build_level).collect())
}

pub fn level(number: u8) -> Option<&'static LevelConfig> {
    level_table().get((number as usize).checked_sub(1)?)
}

/// Level lookup that falls back to level 1 for out-of-range numbers.
pub fn level_or_first(number: u8) -> &'static LevelConfig {
    level(number).unwrap_or(&level_table()[0])
}
