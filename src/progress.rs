//! Player progress: the record a persistence layer stores and restores.
//!
//! Storage itself (local or cloud) lives outside this crate; this module only
//! owns the shape, the update rules and the JSON encoding.
//!
//! Loading is forgiving: keys missing from a stored record take their default
//! values, so records written by older versions still load. Importing a
//! user-supplied backup is strict and requires a `version` field.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::question_engine::{levels::LEVEL_COUNT, OperationKind};

/// Format version written into every record.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("progress JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("imported progress is not a JSON object")]
    NotAnObject,

    #[error("imported progress has no version")]
    MissingVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { sound_enabled: true, music_enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub version: u32,
    pub unlocked_level: u8,
    /// Best score per completed level.
    pub high_scores: BTreeMap<u8, u32>,
    /// Seconds spent answering questions, across all runs.
    pub total_time_played: u64,
    pub settings: Settings,
    /// RFC 3339 timestamp of the last finished level, if any.
    pub last_played: Option<String>,
    /// The player's operation filter. Empty means "whatever the level
    /// unlocks".
    pub selected_ops: Vec<OperationKind>,
}

impl Default for Progress {
    fn default() -> Self {
        Progress {
            version: SAVE_VERSION,
            unlocked_level: 1,
            high_scores: BTreeMap::new(),
            total_time_played: 0,
            settings: Settings::default(),
            last_played: None,
            selected_ops: Vec::new(),
        }
    }
}

impl Progress {
    /// Unlock the next level (never past the last one) and keep the best
    /// score for `level`.
    pub fn record_level_complete(&mut self, level: u8, score: u32) {
        let next = level.saturating_add(1).min(LEVEL_COUNT);
        self.unlocked_level = self.unlocked_level.max(next);
        let best = self.high_scores.entry(level).or_insert(0);
        *best = (*best).max(score);
        self.touch();
    }

    pub fn add_play_time(&mut self, secs: f32) {
        let secs = secs.max(0.0).round() as u64;
        self.total_time_played = self.total_time_played.saturating_add(secs);
    }

    /// Stamp `last_played` with the current time.
    pub fn touch(&mut self) {
        self.last_played = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    pub fn high_score(&self, level: u8) -> Option<u32> {
        self.high_scores.get(&level).copied()
    }

    pub fn is_unlocked(&self, level: u8) -> bool {
        level >= 1 && level <= self.unlocked_level
    }

    pub fn to_json(&self) -> Result<String, ProgressError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored record over the defaults. An unlocked level of 0 is
    /// repaired to 1.
    pub fn from_json(s: &str) -> Result<Self, ProgressError> {
        let progress: Progress = serde_json::from_str(s)?;
        Ok(progress.repaired())
    }

    /// Human-readable backup of the whole record.
    pub fn export_json(&self) -> Result<String, ProgressError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a backup produced by [`Progress::export_json`].
    ///
    /// Unlike [`Progress::from_json`], the input must be an object carrying a
    /// non-zero `version`.
    pub fn import_json(s: &str) -> Result<Self, ProgressError> {
        let value: Value = serde_json::from_str(s)?;
        let Some(fields) = value.as_object() else {
            return Err(ProgressError::NotAnObject);
        };
        match fields.get("version").and_then(Value::as_u64) {
            Some(v) if v > 0 => {}
            _ => return Err(ProgressError::MissingVersion),
        }
        let progress: Progress = serde_json::from_value(value)?;
        Ok(progress.repaired())
    }

    fn repaired(mut self) -> Self {
        self.unlocked_level = self.unlocked_level.clamp(1, LEVEL_COUNT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_a_level_unlocks_the_next() {
        let mut p = Progress::default();
        p.record_level_complete(1, 800);
        assert_eq!(p.unlocked_level, 2);
        assert!(p.is_unlocked(2));
        assert!(!p.is_unlocked(3));
        assert!(p.last_played.is_some());
    }

    #[test]
    fn replaying_an_old_level_never_relocks() {
        let mut p = Progress::default();
        p.record_level_complete(7, 500);
        p.record_level_complete(2, 300);
        assert_eq!(p.unlocked_level, 8);
    }

    #[test]
    fn high_score_keeps_the_best() {
        let mut p = Progress::default();
        p.record_level_complete(3, 400);
        p.record_level_complete(3, 250);
        assert_eq!(p.high_score(3), Some(400));
        assert_eq!(p.high_score(4), None);
    }

    #[test]
    fn last_level_stays_capped() {
        let mut p = Progress::default();
        p.record_level_complete(30, 1000);
        assert_eq!(p.unlocked_level, 30);
    }

    #[test]
    fn default_has_no_operation_filter() {
        let p = Progress::default();
        assert!(p.selected_ops.is_empty());
        assert_eq!(p.version, SAVE_VERSION);
        assert_eq!(p.settings, Settings { sound_enabled: true, music_enabled: true });
    }

    #[test]
    fn play_time_accumulates_whole_seconds() {
        let mut p = Progress::default();
        p.add_play_time(4.4);
        p.add_play_time(2.6);
        p.add_play_time(-3.0);
        assert_eq!(p.total_time_played, 7);
    }

    #[test]
    fn json_round_trip_and_repair() {
        let mut p = Progress::default();
        p.record_level_complete(4, 900);
        p.settings.music_enabled = false;
        let back = Progress::from_json(&p.to_json().unwrap()).unwrap();
        assert_eq!(back, p);

        let repaired = Progress::from_json(r#"{"unlockedLevel":0}"#).unwrap();
        assert_eq!(repaired.unlocked_level, 1);
        assert!(repaired.high_scores.is_empty());

        assert!(Progress::from_json("not json").is_err());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let p = Progress::from_json(r#"{"unlockedLevel":5,"settings":{"soundEnabled":false}}"#).unwrap();
        assert_eq!(p.unlocked_level, 5);
        assert_eq!(p.version, SAVE_VERSION);
        assert_eq!(p.total_time_played, 0);
        assert!(!p.settings.sound_enabled);
        assert!(p.settings.music_enabled);
        assert_eq!(p.last_played, None);
    }

    #[test]
    fn export_then_import_restores_the_record() {
        let mut p = Progress::default();
        p.record_level_complete(9, 1200);
        p.add_play_time(95.0);
        let backup = p.export_json().unwrap();
        assert!(backup.contains('\n'));
        assert_eq!(Progress::import_json(&backup).unwrap(), p);
    }

    #[test]
    fn import_requires_a_versioned_object() {
        assert!(matches!(
            Progress::import_json(r#"{"unlockedLevel":3}"#),
            Err(ProgressError::MissingVersion)
        ));
        assert!(matches!(
            Progress::import_json(r#"{"version":0,"unlockedLevel":3}"#),
            Err(ProgressError::MissingVersion)
        ));
        assert!(matches!(Progress::import_json("[1,2]"), Err(ProgressError::NotAnObject)));
        assert!(matches!(Progress::import_json("{"), Err(ProgressError::Json(_))));

        let p = Progress::import_json(r#"{"version":1,"unlockedLevel":3}"#).unwrap();
        assert_eq!(p.unlocked_level, 3);
        assert!(p.settings.sound_enabled);
    }
}
