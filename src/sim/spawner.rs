//! Procedural item spawning and score-driven difficulty

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{FallingItem, ItemKind};
use crate::consts::SCREEN_WIDTH;
use crate::tuning::{SpawnPolicy, Tuning};

/// Fall speed for a score: `min(cap, base + score * increment)`
pub fn item_speed(score: u64, tuning: &Tuning) -> f32 {
    let speed = tuning.item_speed_start + score as f32 * tuning.speed_increment_per_score;
    speed.min(tuning.max_item_speed)
}

/// Seconds between spawns for a score
pub fn spawn_interval(score: u64, tuning: &Tuning) -> f32 {
    let base = tuning.base_spawn_interval();
    match tuning.spawn_policy {
        SpawnPolicy::Fixed => base,
        SpawnPolicy::ScoreScaled => {
            let floor = tuning.min_spawn_interval.min(base);
            (base - score as f32 * tuning.spawn_interval_step).max(floor)
        }
    }
}

/// Chance that the next spawn is a collectible
pub fn collectible_probability(score: u64, tuning: &Tuning) -> f32 {
    let base = tuning.collectible_probability;
    match tuning.spawn_policy {
        SpawnPolicy::Fixed => base,
        SpawnPolicy::ScoreScaled => {
            let floor = tuning.min_collectible_probability.min(base);
            (base - score as f32 * tuning.collectible_probability_step).max(floor)
        }
    }
}

/// Seeded item factory plus the spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Seconds since the last spawn
    pub timer: f32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            timer: 0.0,
        }
    }

    /// Advance the timer; true (and reset) once `interval` has elapsed
    pub fn due(&mut self, dt: f32, interval: f32) -> bool {
        self.timer += dt;
        if self.timer >= interval {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Create one item just above the screen at a random column
    pub fn spawn(&mut self, id: u32, collectible_probability: f32) -> FallingItem {
        let kind = if self.rng.random::<f32>() < collectible_probability {
            ItemKind::Collectible
        } else {
            ItemKind::Obstacle
        };
        let half = kind.size() / 2.0;
        let x = self.rng.random_range(half..=SCREEN_WIDTH - half);
        let pulse_phase = self.rng.random_range(0.0..std::f32::consts::TAU);
        FallingItem::new(id, kind, x, pulse_phase)
    }
}
