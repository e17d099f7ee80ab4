//! High score table
//!
//! Fixed-size records appended when a session ends, persisted as JSON.
//! Load is best-effort: a missing or malformed file degrades to an empty
//! table, never an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of records kept
pub const MAX_RECORDS: usize = 100;
/// Fixed text field sizes; longer input is truncated on append
pub const NICKNAME_LEN: usize = 16;
pub const EMAIL_LEN: usize = 48;

/// A single leaderboard record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub points: i32,
    pub nickname: String,
    pub email: String,
}

/// The leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub records: Vec<HighScoreRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, truncating text fields to their fixed sizes.
    /// Once the table is full further records are dropped.
    pub fn append(&mut self, points: i32, nickname: &str, email: &str) {
        if self.records.len() >= MAX_RECORDS {
            log::warn!("high score table full; record dropped");
            return;
        }
        self.records.push(HighScoreRecord {
            points,
            nickname: truncate(nickname, NICKNAME_LEN),
            email: truncate(email, EMAIL_LEN),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Points column, for the host's histogram display
    pub fn points(&self) -> impl Iterator<Item = i32> {
        self.records.iter().map(|r| r.points)
    }

    /// Bucket counts over [min, max) for the histogram display; points
    /// outside the range land in the nearest edge bucket
    pub fn histogram(&self, min: i32, max: i32, buckets: usize) -> Vec<u32> {
        let mut counts = vec![0u32; buckets];
        if buckets == 0 || max <= min {
            return counts;
        }
        let span = (max - min) as f32;
        for points in self.points() {
            let t = (points - min) as f32 / span;
            let index = ((t * buckets as f32) as isize).clamp(0, buckets as isize - 1);
            counts[index as usize] += 1;
        }
        counts
    }

    /// Load the table from disk; malformed or missing data starts fresh
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high score records", scores.len());
                    scores
                }
                Err(err) => {
                    log::warn!("malformed high score file, starting fresh: {err}");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no high score file, starting fresh");
                Self::new()
            }
        }
    }

    /// Best-effort save; failures are logged and dropped
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save high scores: {err}");
                } else {
                    log::info!("saved {} high score records", self.len());
                }
            }
            Err(err) => log::warn!("failed to encode high scores: {err}"),
        }
    }
}

/// Truncate on a character boundary
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_truncates_fixed_fields() {
        let mut scores = HighScores::new();
        let long_name = "x".repeat(NICKNAME_LEN + 10);
        let long_email = "y".repeat(EMAIL_LEN + 10);
        scores.append(7, &long_name, &long_email);

        assert_eq!(scores.records[0].points, 7);
        assert_eq!(scores.records[0].nickname.len(), NICKNAME_LEN);
        assert_eq!(scores.records[0].email.len(), EMAIL_LEN);
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for i in 0..(MAX_RECORDS + 5) {
            scores.append(i as i32, "a", "a@b.c");
        }
        assert_eq!(scores.len(), MAX_RECORDS);
    }

    #[test]
    fn test_histogram_buckets() {
        let mut scores = HighScores::new();
        for points in [-5, -1, 0, 0, 3, 9, 42] {
            scores.append(points, "a", "a@b.c");
        }
        let counts = scores.histogram(-10, 10, 4);
        assert_eq!(counts.len(), 4);
        // Buckets of width 5: [-5, -1] | [0, 0, 3] | [9, 42-clamped]
        assert_eq!(counts, vec![0, 2, 3, 2]);
    }

    #[test]
    fn test_load_missing_file_starts_fresh() {
        let scores = HighScores::load(Path::new("/nonexistent/highscores.json"));
        assert!(scores.is_empty());
    }

    #[test]
    fn test_load_malformed_file_starts_fresh() {
        let path = std::env::temp_dir().join("tether_drone_malformed_scores.json");
        fs::write(&path, "{not json").unwrap();
        let scores = HighScores::load(&path);
        assert!(scores.is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = std::env::temp_dir().join("tether_drone_scores_roundtrip.json");
        let mut scores = HighScores::new();
        scores.append(-2, "pilot", "pilot@example.com");
        scores.append(11, "ace", "ace@example.com");
        scores.save(&path);

        let loaded = HighScores::load(&path);
        assert_eq!(loaded.records, scores.records);
        let _ = fs::remove_file(&path);
    }
}
