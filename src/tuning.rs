//! Data-driven game balance
//!
//! All per-frame values are expressed at `REFERENCE_FPS` and scaled by the
//! simulation's frame delta, so tuning stays frame-rate independent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FPS;
use crate::error::{GameError, GameResult};

/// How spawn rate and item mix respond to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Constant spawn interval and collectible probability
    #[default]
    Fixed,
    /// Interval and collectible probability shrink as score grows
    ScoreScaled,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed (px per reference frame)
    pub player_speed: f32,
    /// Downward acceleration (px per reference frame²)
    pub gravity: f32,
    /// Initial vertical velocity on jump (negative is up)
    pub jump_power: f32,

    /// Item fall speed at score 0 (px per reference frame)
    pub item_speed_start: f32,
    /// Fall speed added per point
    pub speed_increment_per_score: f32,
    /// Fall speed ceiling
    pub max_item_speed: f32,

    /// Reference frames between spawns
    pub spawn_base_rate: f32,
    /// Chance that a spawned item is a collectible
    pub collectible_probability: f32,
    pub spawn_policy: SpawnPolicy,
    /// ScoreScaled: seconds removed from the interval per point
    pub spawn_interval_step: f32,
    /// ScoreScaled: shortest interval (seconds)
    pub min_spawn_interval: f32,
    /// ScoreScaled: probability removed per point
    pub collectible_probability_step: f32,
    /// ScoreScaled: lowest collectible probability
    pub min_collectible_probability: f32,

    /// Collectible pulse (radians per second)
    pub pulse_speed: f32,
    /// Collectible pulse scale amplitude
    pub pulse_amount: f32,
    /// Points between milestone shakes
    pub score_milestone: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 9.0,
            gravity: 0.8,
            jump_power: -15.0,

            item_speed_start: 4.0,
            speed_increment_per_score: 0.08,
            max_item_speed: 15.0,

            spawn_base_rate: 25.0,
            collectible_probability: 0.60,
            spawn_policy: SpawnPolicy::Fixed,
            spawn_interval_step: 0.005,
            min_spawn_interval: 0.15,
            collectible_probability_step: 0.005,
            min_collectible_probability: 0.35,

            pulse_speed: 4.0,
            pulse_amount: 0.08,
            score_milestone: 10,
        }
    }
}

impl Tuning {
    /// Base spawn interval in seconds
    pub fn base_spawn_interval(&self) -> f32 {
        self.spawn_base_rate / REFERENCE_FPS
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> GameResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults
    ///
    /// A missing file is normal; an unreadable or invalid one is logged.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(GameError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot handle
    pub fn validate(&self) -> GameResult<()> {
        positive("player_speed", self.player_speed)?;
        positive("gravity", self.gravity)?;
        if !(self.jump_power.is_finite() && self.jump_power < 0.0) {
            return Err(GameError::InvalidTuning {
                name: "jump_power",
                value: self.jump_power,
                expected: "(-inf, 0)",
            });
        }
        positive("item_speed_start", self.item_speed_start)?;
        non_negative("speed_increment_per_score", self.speed_increment_per_score)?;
        if !(self.max_item_speed.is_finite() && self.max_item_speed >= self.item_speed_start) {
            return Err(GameError::InvalidTuning {
                name: "max_item_speed",
                value: self.max_item_speed,
                expected: ">= item_speed_start",
            });
        }
        positive("spawn_base_rate", self.spawn_base_rate)?;
        probability("collectible_probability", self.collectible_probability)?;
        non_negative("spawn_interval_step", self.spawn_interval_step)?;
        positive("min_spawn_interval", self.min_spawn_interval)?;
        non_negative(
            "collectible_probability_step",
            self.collectible_probability_step,
        )?;
        probability(
            "min_collectible_probability",
            self.min_collectible_probability,
        )?;
        non_negative("pulse_speed", self.pulse_speed)?;
        non_negative("pulse_amount", self.pulse_amount)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value,
            expected: "(0, inf)",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value,
            expected: "[0, inf)",
        })
    }
}

fn probability(name: &'static str, value: f32) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            name,
            value,
            expected: "[0, 1]",
        })
    }
}
