//! Lifetime run statistics
//!
//! Persisted to LocalStorage, updated when a run starts and when it ends.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Totals across every run played in this browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStats {
    /// Runs started, including ones abandoned mid-fall
    pub runs: u32,
    pub wins: u32,
    pub collisions: u32,
    /// Fewest ticks needed for a win
    pub best_win_ticks: Option<u64>,
    /// Most rows cleared before a collision
    pub deepest_row: usize,
}

impl RunStats {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gap_runner_stats";

    pub fn new() -> Self {
        Self::default()
    }

    /// Count a newly started run
    pub fn record_start(&mut self) {
        self.runs += 1;
    }

    /// Runs that reached a terminal outcome
    pub fn finished(&self) -> u32 {
        self.wins + self.collisions
    }

    /// Fold a finished run into the totals
    ///
    /// Returns `true` if the run set a new best win time.
    pub fn record(&mut self, outcome: Outcome, ticks: u64, rows_cleared: usize) -> bool {
        match outcome {
            Outcome::Collision => {
                self.collisions += 1;
                self.deepest_row = self.deepest_row.max(rows_cleared);
                false
            }
            Outcome::Win => {
                self.wins += 1;
                let best = self.best_win_ticks.is_none_or(|b| ticks < b);
                if best {
                    self.best_win_ticks = Some(ticks);
                }
                best
            }
        }
    }

    /// Share of finished runs that ended at the finish line (0 with none)
    pub fn win_rate(&self) -> f32 {
        match self.finished() {
            0 => 0.0,
            finished => self.wins as f32 / finished as f32,
        }
    }

    /// One-line HUD summary
    pub fn summary(&self) -> String {
        let best = self.best_win_ticks.map_or_else(|| "-".to_string(), format_ticks);
        format!(
            "Runs {} · Wins {} ({:.0}%) · Best {}",
            self.runs,
            self.wins,
            self.win_rate() * 100.0,
            best
        )
    }

    /// Load stats from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(stats) = serde_json::from_str::<RunStats>(&json) {
                    log::info!("Loaded stats ({} runs)", stats.runs);
                    return stats;
                }
            }
        }

        log::info!("No stats found, starting fresh");
        Self::new()
    }

    /// Save stats to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Stats saved ({} runs)", self.runs);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Format a tick count as seconds at the simulation rate
pub fn format_ticks(ticks: u64) -> String {
    let secs = ticks as f32 * crate::consts::SIM_DT;
    format!("{:.1}s", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_collision() {
        let mut stats = RunStats::new();
        assert!(!stats.record(Outcome::Collision, 200, 3));
        assert!(!stats.record(Outcome::Collision, 100, 1));
        assert_eq!(stats.finished(), 2);
        assert_eq!(stats.collisions, 2);
        assert_eq!(stats.deepest_row, 3);
        assert_eq!(stats.best_win_ticks, None);
    }

    #[test]
    fn test_record_best_win() {
        let mut stats = RunStats::new();
        assert!(stats.record(Outcome::Win, 900, 7));
        assert!(!stats.record(Outcome::Win, 950, 7));
        assert!(stats.record(Outcome::Win, 880, 7));
        assert_eq!(stats.best_win_ticks, Some(880));
        assert_eq!(stats.wins, 3);
    }

    #[test]
    fn test_runs_count_starts_not_outcomes() {
        let mut stats = RunStats::new();
        stats.record_start();
        stats.record(Outcome::Collision, 120, 0);
        stats.record_start();
        stats.record_start();
        stats.record(Outcome::Win, 900, 7);

        // The third run is still falling
        assert_eq!(stats.runs, 3);
        assert_eq!(stats.finished(), 2);
        assert_eq!(stats.win_rate(), 0.5);
    }

    #[test]
    fn test_win_rate() {
        let mut stats = RunStats::new();
        assert_eq!(stats.win_rate(), 0.0);
        stats.record(Outcome::Win, 900, 7);
        stats.record(Outcome::Collision, 100, 0);
        assert_eq!(stats.win_rate(), 0.5);
    }

    #[test]
    fn test_summary() {
        let mut stats = RunStats::new();
        assert_eq!(stats.summary(), "Runs 0 · Wins 0 (0%) · Best -");

        for _ in 0..4 {
            stats.record_start();
        }
        stats.record(Outcome::Win, 90, 7);
        stats.record(Outcome::Collision, 30, 1);
        stats.record(Outcome::Collision, 45, 2);
        assert_eq!(stats.summary(), "Runs 4 · Wins 1 (33%) · Best 1.5s");
    }

    #[test]
    fn test_format_ticks() {
        assert_eq!(format_ticks(90), "1.5s");
    }

    #[test]
    fn test_stats_round_trip_through_json() {
        let mut stats = RunStats::new();
        stats.record(Outcome::Win, 841, 7);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(serde_json::from_str::<RunStats>(&json).unwrap(), stats);
    }
}
