//! Game rules: lives, scoring and generator limits, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! initial_lives = 5
//! wrong_penalty = 0
//! ```
//!
//! `MATH_DRILL_RULES` may point at such a file; see [`GameRules::from_env`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::question_engine::{generator::MAX_ATTEMPTS, history::DEFAULT_CAPACITY};

pub const RULES_PATH_ENV: &str = "MATH_DRILL_RULES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rules: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub initial_lives: u32,
    pub base_correct_points: u32,
    /// Extra points for answering within `speed_bonus_fraction` of the budget.
    pub speed_bonus_points: u32,
    pub speed_bonus_fraction: f32,
    /// Points removed on a wrong answer (score never drops below zero).
    pub wrong_penalty: u32,
    /// A streak bonus is paid every this many consecutive correct answers.
    pub streak_bonus_every: u32,
    pub streak_bonus_points: u32,
    pub history_capacity: usize,
    pub max_attempts: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            base_correct_points: 100,
            speed_bonus_points: 50,
            speed_bonus_fraction: 0.5,
            wrong_penalty: 20,
            streak_bonus_every: 5,
            streak_bonus_points: 50,
            history_capacity: DEFAULT_CAPACITY,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl GameRules {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let rules: GameRules = toml::from_str(s)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Rules from the file named by `MATH_DRILL_RULES`, or defaults when the
    /// variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(RULES_PATH_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(rules) => {
                info!(target: "rules", %path, "loaded game rules");
                rules
            }
            Err(e) => {
                error!(target: "rules", %path, error = %e, "unusable rules file; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_lives == 0 {
            return Err(ConfigError::Invalid("initial_lives must be at least 1".into()));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if !(self.speed_bonus_fraction > 0.0 && self.speed_bonus_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "speed_bonus_fraction must be in (0, 1], got {}",
                self.speed_bonus_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_game() {
        let r = GameRules::default();
        assert_eq!(r.initial_lives, 3);
        assert_eq!(r.base_correct_points, 100);
        assert_eq!(r.speed_bonus_points, 50);
        assert_eq!(r.wrong_penalty, 20);
        assert_eq!(r.history_capacity, 100);
        assert_eq!(r.max_attempts, 50);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let r = GameRules::from_toml_str("initial_lives = 5\nwrong_penalty = 0\n").unwrap();
        assert_eq!(r.initial_lives, 5);
        assert_eq!(r.wrong_penalty, 0);
        assert_eq!(r.base_correct_points, 100);
    }

    #[test]
    fn rejects_zero_lives() {
        let err = GameRules::from_toml_str("initial_lives = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(err.to_string(), "invalid rules: initial_lives must be at least 1");
    }

    #[test]
    fn rejects_bad_speed_fraction() {
        assert!(GameRules::from_toml_str("speed_bonus_fraction = 0.0").is_err());
        assert!(GameRules::from_toml_str("speed_bonus_fraction = 1.5").is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameRules::from_toml_str("initial_lives = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameRules::load("/definitely/not/here/rules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
