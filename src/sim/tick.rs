//! Per-frame round update
//!
//! Core game loop that advances one round deterministically.

use super::collision::{Bounded, resolve_collisions};
use super::state::{GameEvent, ItemKind, RoundState, SoundEffect};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump pressed this tick
    pub jump: bool,
    /// Pause toggle pressed this tick
    pub pause: bool,
    /// Window closed / quit key
    pub quit: bool,
    /// Return to menu (honored while paused, and on the game-over screen)
    pub menu: bool,
    /// Menu select (start a round)
    pub select: bool,
    /// Replay from the game-over screen
    pub replay: bool,
    /// Fullscreen toggle pressed this tick (handled by the app in every phase)
    pub toggle_fullscreen: bool,
}

/// How a tick left the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Keep ticking
    Continue,
    /// Exit the program
    Quit,
    /// Leave the paused round for the menu
    ReturnToMenu,
    /// An obstacle was hit
    GameOver { score: u64 },
}

/// Advance the round by one frame
///
/// `dt` is clamped to `[0, MAX_FRAME_DT]`; presentation requests are pushed
/// onto `events`.
pub fn tick(
    state: &mut RoundState,
    input: &TickInput,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> RoundOutcome {
    if input.quit {
        return RoundOutcome::Quit;
    }
    if !state.alive {
        return RoundOutcome::GameOver { score: state.score };
    }

    if input.pause {
        state.paused = !state.paused;
    }
    if state.paused {
        return if input.menu {
            RoundOutcome::ReturnToMenu
        } else {
            RoundOutcome::Continue
        };
    }

    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    let frames = dt * REFERENCE_FPS;
    state.frames += 1;
    state.elapsed += dt;

    // Player
    let tuning = &state.tuning;
    state.player.steer(input.left, input.right, tuning.player_speed);
    if input.jump {
        state.player.jump(tuning.jump_power);
    }
    state.player.integrate(tuning.gravity, frames);
    state.player.update_flash(dt);

    // Difficulty follows the score
    state.refresh_difficulty();

    // Spawn
    if state.spawner.due(dt, state.spawn_interval) {
        let id = state.next_entity_id();
        let item = state.spawner.spawn(id, state.collectible_probability);
        state.items.push(item);
    }

    // Fall
    let fall = state.item_speed * frames;
    for item in &mut state.items {
        item.fall(fall);
        item.pulse(dt, state.tuning.pulse_speed, state.tuning.pulse_amount);
    }

    // Collisions
    let hits = resolve_collisions(&state.player.bounds(), &state.items, NEAR_MISS_DISTANCE);
    for &index in &hits.grazed {
        state.items[index].grazed = true;
    }

    let mut consumed: Vec<u32> = Vec::new();
    if let Some(index) = hits.fatal {
        consumed.push(state.items[index].id);
        state.alive = false;
        state.player.flash(PLAYER_HIT_FLASH_DURATION);
        events.push(GameEvent::Sound(SoundEffect::Hit));
        events.push(GameEvent::ScreenShake {
            duration: HIT_SHAKE_DURATION,
            intensity: HIT_SHAKE_INTENSITY,
        });
    } else {
        for &index in &hits.collected {
            let item = &state.items[index];
            consumed.push(item.id);
            collect(state, index, events);
        }
    }

    // Cull consumed and off-screen items
    let alive = state.alive;
    let mut missed_collectible = false;
    let mut near_misses = 0;
    state.items.retain(|item| {
        if consumed.contains(&item.id) {
            return false;
        }
        if !item.is_offscreen() {
            return true;
        }
        match item.kind {
            ItemKind::Collectible => missed_collectible = true,
            ItemKind::Obstacle if item.grazed && alive => near_misses += 1,
            ItemKind::Obstacle => {}
        }
        false
    });
    if missed_collectible {
        state.combo = 0;
    }
    state.near_misses += near_misses;

    if state.alive {
        RoundOutcome::Continue
    } else {
        RoundOutcome::GameOver { score: state.score }
    }
}

/// Credit one collectible and emit its feedback
fn collect(state: &mut RoundState, index: usize, events: &mut Vec<GameEvent>) {
    let pos = state.items[index].pos;
    let milestone = state.tuning.score_milestone;
    let before = state.score;
    state.score += 1;
    state.collectibles += 1;
    state.combo += 1;
    state.best_combo = state.best_combo.max(state.combo);

    events.push(GameEvent::Sound(SoundEffect::Collect));
    events.push(GameEvent::ScorePopup {
        pos,
        text: "+1".to_string(),
        color: YELLOW,
    });
    events.push(GameEvent::ParticleBurst {
        pos,
        color: GREEN,
        count: COLLECT_PARTICLE_COUNT,
    });

    if milestone > 0 && state.score / milestone > before / milestone {
        events.push(GameEvent::ScreenShake {
            duration: MILESTONE_SHAKE_DURATION,
            intensity: SCREEN_SHAKE_INTENSITY,
        });
    }
}
