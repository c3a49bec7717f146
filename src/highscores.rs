//! High score and lifetime statistics
//!
//! Persisted as part of the save file, see `persistence`.

use serde::{Deserialize, Serialize};

/// Lifetime play counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub games_played: u64,
    pub total_collectibles: u64,
    pub total_score: u64,
    /// Longest run of collectibles without letting one drop
    pub max_combo: u64,
    /// Obstacles that passed close to the player without touching
    pub game_near_misses: u64,
}

/// Totals from one finished round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u64,
    pub collectibles: u64,
    pub best_combo: u64,
    pub near_misses: u64,
}

/// Best score ever achieved plus the lifetime counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScoreRecord {
    pub highscore: u64,
    pub stats: Stats,
}

impl HighScoreRecord {
    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.highscore
    }

    /// Raise the best score if `score` beats it. Returns whether it did.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.highscore = score;
        true
    }

    /// Fold a finished round into the counters
    ///
    /// Only rounds ended by an obstacle count as played games.
    pub fn record_round(&mut self, round: &RoundSummary, game_over: bool) {
        let stats = &mut self.stats;
        stats.total_collectibles = stats.total_collectibles.saturating_add(round.collectibles);
        stats.max_combo = stats.max_combo.max(round.best_combo);
        stats.game_near_misses = stats.game_near_misses.saturating_add(round.near_misses);
        if game_over {
            stats.games_played = stats.games_played.saturating_add(1);
            stats.total_score = stats.total_score.saturating_add(round.score);
        }
    }
}
