//! Dodge Master - a single-screen dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (player physics, spawning, collisions)
//! - `app`: Menu / round / game-over state machine with fade transitions
//! - `persistence`: High score and statistics save file
//! - `tuning`: Data-driven game balance
//! - `effects`, `audio`, `platform`: Presentation-side glue

pub mod app;
pub mod audio;
pub mod autopilot;
pub mod effects;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::{App, AppControl, Phase, Screen};
pub use error::{GameError, GameResult};
pub use highscores::{HighScoreRecord, RoundSummary, Stats};
pub use persistence::{FileStorage, SaveData, ScoreStore, Storage};
pub use settings::Settings;
pub use tuning::{SpawnPolicy, Tuning};

/// Game configuration constants
pub mod consts {
    use crate::sim::Rgb;

    /// Reference frame rate all per-frame tuning values are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;

    /// Player triangle footprint
    pub const PLAYER_BASE: f32 = 45.0;
    pub const PLAYER_HEIGHT: f32 = 35.0;
    pub const PLAYER_GROUND_Y_OFFSET: f32 = 20.0;
    /// Line the player's bottom edge rests on
    pub const PLAYER_GROUND_Y: f32 = SCREEN_HEIGHT - PLAYER_HEIGHT - PLAYER_GROUND_Y_OFFSET;
    /// Seconds the player flashes after a hit
    pub const PLAYER_HIT_FLASH_DURATION: f32 = 0.15;

    /// Item footprints (square)
    pub const ITEM_SIZE_COLLECTIBLE: f32 = 30.0;
    pub const ITEM_SIZE_OBSTACLE: f32 = 35.0;
    /// Items are culled once their top edge passes SCREEN_HEIGHT + this
    pub const ITEM_OFFSCREEN_MARGIN: f32 = 50.0;
    /// Obstacles passing this close without touching count as near misses
    pub const NEAR_MISS_DISTANCE: f32 = 10.0;

    /// Fade transition speed (progress units per second, per half)
    pub const TRANSITION_SPEED: f32 = 3.0;

    /// Feedback effects
    pub const SCREEN_SHAKE_DURATION: f32 = 0.12;
    pub const SCREEN_SHAKE_INTENSITY: f32 = 3.0;
    pub const HIT_SHAKE_DURATION: f32 = 0.3;
    pub const HIT_SHAKE_INTENSITY: f32 = 8.0;
    pub const MILESTONE_SHAKE_DURATION: f32 = 0.1;
    pub const COLLECT_PARTICLE_COUNT: u32 = 5;
    pub const POPUP_DURATION_FRAMES: f32 = 35.0;
    pub const POPUP_SPEED: f32 = 2.0;

    pub const WHITE: Rgb = [255, 255, 255];
    pub const RED: Rgb = [220, 50, 50];
    pub const GREEN: Rgb = [50, 220, 50];
    pub const BLUE: Rgb = [100, 150, 255];
    pub const YELLOW: Rgb = [255, 215, 0];
}
