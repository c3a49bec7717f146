//! Round state and core simulation types
//!
//! Everything a single round mutates lives here. A `RoundState` is created
//! fresh when a round starts and dropped when it ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use crate::consts::*;
use crate::highscores::RoundSummary;
use crate::tuning::Tuning;

/// An RGB color handed to the presentation layer
pub type Rgb = [u8; 3];

/// Sound cues the core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Collectible picked up
    Collect,
    /// Player hit an obstacle
    Hit,
}

/// Fire-and-forget requests for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundEffect),
    ParticleBurst { pos: Vec2, color: Rgb, count: u32 },
    ScorePopup { pos: Vec2, text: String, color: Rgb },
    ScreenShake { duration: f32, intensity: f32 },
}

/// The player's triangular avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub is_jumping: bool,
    /// Seconds of hit flash remaining
    pub flash_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, PLAYER_GROUND_Y - PLAYER_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            on_ground: true,
            is_jumping: false,
            flash_timer: 0.0,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_BASE, PLAYER_HEIGHT)
    }

    pub fn top(&self) -> f32 {
        self.pos.y - PLAYER_HEIGHT / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_HEIGHT / 2.0
    }

    /// Set horizontal velocity from held keys (both or neither cancel out)
    pub fn steer(&mut self, left: bool, right: bool, speed: f32) {
        self.vel.x = match (left, right) {
            (true, false) => -speed,
            (false, true) => speed,
            _ => 0.0,
        };
    }

    /// Start a jump if standing on the ground. Returns whether it jumped.
    pub fn jump(&mut self, power: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = power;
        self.is_jumping = true;
        self.on_ground = false;
        true
    }

    /// Apply gravity and velocity, then resolve walls, ground and ceiling
    ///
    /// `frames` is the frame delta expressed in reference frames.
    pub fn integrate(&mut self, gravity: f32, frames: f32) {
        self.vel.y += gravity * frames;
        self.pos += self.vel * frames;

        let half_width = PLAYER_BASE / 2.0;
        self.pos.x = self.pos.x.clamp(half_width, SCREEN_WIDTH - half_width);

        // Resting center when the bottom edge sits on the ground line
        let ground_center = PLAYER_GROUND_Y - PLAYER_HEIGHT / 2.0;
        if self.pos.y > ground_center || (self.pos.y >= ground_center && self.vel.y >= 0.0) {
            self.pos.y = ground_center;
            self.vel.y = 0.0;
            self.is_jumping = false;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        if self.top() < 0.0 {
            self.pos.y = PLAYER_HEIGHT / 2.0;
            self.vel.y = self.vel.y.max(0.0);
        }
    }

    pub fn flash(&mut self, duration: f32) {
        self.flash_timer = duration;
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    pub fn update_flash(&mut self, dt: f32) {
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
    }
}

/// What a falling item does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Ends the round
    Obstacle,
    /// Worth one point
    Collectible,
}

impl ItemKind {
    /// Side length of the item's square footprint
    pub fn size(self) -> f32 {
        match self {
            ItemKind::Obstacle => ITEM_SIZE_OBSTACLE,
            ItemKind::Collectible => ITEM_SIZE_COLLECTIBLE,
        }
    }
}

/// An obstacle or collectible falling from the top of the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Center of the square footprint
    pub pos: Vec2,
    pub size: f32,
    /// Cosmetic pulse phase (radians), collectibles only
    pub pulse_phase: f32,
    /// Cosmetic draw scale derived from the pulse
    #[serde(skip, default = "unit_scale")]
    pub draw_scale: f32,
    /// Obstacle came within near-miss distance of the player
    #[serde(default)]
    pub grazed: bool,
}

fn unit_scale() -> f32 {
    1.0
}

impl FallingItem {
    /// New item whose top edge sits at `-size`, fully above the screen
    pub fn new(id: u32, kind: ItemKind, x: f32, pulse_phase: f32) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            pos: Vec2::new(x, -size / 2.0),
            size,
            pulse_phase,
            draw_scale: 1.0,
            grazed: false,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size / 2.0
    }

    pub fn fall(&mut self, distance: f32) {
        self.pos.y += distance;
    }

    /// Advance the cosmetic pulse
    pub fn pulse(&mut self, dt: f32, speed: f32, amount: f32) {
        if self.kind != ItemKind::Collectible {
            return;
        }
        self.pulse_phase = (self.pulse_phase + speed * dt) % std::f32::consts::TAU;
        self.draw_scale = 1.0 + self.pulse_phase.sin() * amount;
    }

    pub fn is_offscreen(&self) -> bool {
        self.top() > SCREEN_HEIGHT + ITEM_OFFSCREEN_MARGIN
    }
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Seed the round was created with
    pub seed: u64,
    pub tuning: Tuning,
    pub spawner: Spawner,
    pub player: Player,
    /// Live items (sorted by id for determinism)
    pub items: Vec<FallingItem>,
    pub score: u64,
    /// Current fall speed (px per reference frame)
    pub item_speed: f32,
    /// Current seconds between spawns
    pub spawn_interval: f32,
    /// Current chance a spawn is a collectible
    pub collectible_probability: f32,
    /// Simulation tick counter
    pub frames: u64,
    /// Simulated seconds
    pub elapsed: f32,
    pub paused: bool,
    /// False once an obstacle has been hit
    pub alive: bool,
    /// Collectibles taken this round
    pub collectibles: u64,
    /// Current run of collectibles without missing one
    pub combo: u64,
    pub best_combo: u64,
    pub near_misses: u64,
    next_id: u32,
}

impl RoundState {
    /// Create a fresh round with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            spawner: Spawner::new(seed),
            player: Player::new(),
            items: Vec::new(),
            score: 0,
            item_speed: tuning.item_speed_start,
            spawn_interval: tuning.base_spawn_interval(),
            collectible_probability: tuning.collectible_probability,
            frames: 0,
            elapsed: 0.0,
            paused: false,
            alive: true,
            collectibles: 0,
            combo: 0,
            best_combo: 0,
            near_misses: 0,
            next_id: 1,
            tuning,
        };
        state.refresh_difficulty();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Recompute speed, spawn interval and item mix from the score
    pub fn refresh_difficulty(&mut self) {
        self.item_speed = super::spawner::item_speed(self.score, &self.tuning);
        self.spawn_interval = super::spawner::spawn_interval(self.score, &self.tuning);
        self.collectible_probability =
            super::spawner::collectible_probability(self.score, &self.tuning);
    }

    /// Totals handed to the score store when the round ends
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.score,
            collectibles: self.collectibles,
            best_combo: self.best_combo,
            near_misses: self.near_misses,
        }
    }
}
