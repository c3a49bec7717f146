//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the caller, clamped
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounded, Collisions, resolve_collisions};
pub use spawner::{Spawner, collectible_probability, item_speed, spawn_interval};
pub use state::{FallingItem, GameEvent, ItemKind, Player, Rgb, RoundState, SoundEffect};
pub use tick::{RoundOutcome, TickInput, tick};
