//! Tier resolution: level number (static mode) or correct-answer count
//! (adaptive training mode) to a difficulty tier.

use crate::question_engine::models::Tier;

/// Correct answers needed to climb one tier in training mode.
pub const TRAINING_STEP: u32 = 5;

impl Tier {
    /// Static mode: five levels per tier.
    pub fn for_level(level: u8) -> Tier {
        match level {
            0..=5   => Tier::new(1),
            6..=10  => Tier::new(2),
            11..=15 => Tier::new(3),
            16..=20 => Tier::new(4),
            21..=25 => Tier::new(5),
            _       => Tier::new(6),
        }
    }

    /// Adaptive mode: +1 tier per [`TRAINING_STEP`] correct answers, capped at 6.
    pub fn for_training(correct_count: u32) -> Tier {
        let raw = (correct_count / TRAINING_STEP).saturating_add(1).min(6);
        Tier::new(raw as u8)
    }

    /// A training counter, when present, overrides the level.
    pub fn resolve(level: u8, training_count: Option<u32>) -> Tier {
        match training_count {
            Some(count) => Tier::for_training(count),
            None        => Tier::for_level(level),
        }
    }
}
