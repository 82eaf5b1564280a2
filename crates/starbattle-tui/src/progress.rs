//! Persistent per-altar progress: which puzzles were solved and how.
//!
//! This is the piece of state that outlives a grid: the engine forgets
//! everything on rebuild, the progress file does not.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Record of solves for one altar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRecord {
    pub times_solved: usize,
    pub best_time_secs: Option<u64>,
    pub best_moves: Option<usize>,
    /// Unix timestamp of the most recent solve
    pub last_solved_at: u64,
}

/// Loads, updates, and saves the progress file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressManager {
    records: HashMap<String, SolveRecord>,
}

impl ProgressManager {
    /// Get the save file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("starbattle_progress.json")
    }

    /// Load progress from file, or start empty
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save progress to file
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(Self::save_path(), json);
        }
    }

    /// Record a solve, keeping the best time and move count
    pub fn record_solve(&mut self, altar: &str, time_secs: u64, moves: usize) {
        let record = self.records.entry(altar.to_string()).or_default();
        record.times_solved += 1;
        record.best_time_secs = Some(match record.best_time_secs {
            Some(best) => best.min(time_secs),
            None => time_secs,
        });
        record.best_moves = Some(match record.best_moves {
            Some(best) => best.min(moves),
            None => moves,
        });
        record.last_solved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
    }

    pub fn record(&self, altar: &str) -> Option<&SolveRecord> {
        self.records.get(altar)
    }

    pub fn is_solved(&self, altar: &str) -> bool {
        self.records.contains_key(altar)
    }

    pub fn solved_count(&self) -> usize {
        self.records.len()
    }
}

/// Format seconds as mm:ss
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_solve_keeps_best() {
        let mut progress = ProgressManager::default();
        progress.record_solve("Altar of Dawn", 90, 12);
        progress.record_solve("Altar of Dawn", 60, 20);
        progress.record_solve("Altar of Dawn", 120, 7);

        let record = progress.record("Altar of Dawn").unwrap();
        assert_eq!(record.times_solved, 3);
        assert_eq!(record.best_time_secs, Some(60));
        assert_eq!(record.best_moves, Some(7));
    }

    #[test]
    fn unsolved_altar_has_no_record() {
        let progress = ProgressManager::default();
        assert!(!progress.is_solved("Altar of Stars"));
        assert!(progress.record("Altar of Stars").is_none());
        assert_eq!(progress.solved_count(), 0);
    }

    #[test]
    fn serde_round_trip() {
        let mut progress = ProgressManager::default();
        progress.record_solve("Altar of Tides", 45, 9);

        let json = serde_json::to_string(&progress).unwrap();
        let back: ProgressManager = serde_json::from_str(&json).unwrap();
        assert_eq!(back.record("Altar of Tides").unwrap().best_moves, Some(9));
    }

    #[test]
    fn format_time_is_mm_ss() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "60:00");
    }
}
