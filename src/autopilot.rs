//! Idle/demo mode - the computer plays the game
//!
//! Produces a `TickInput` per frame from the visible state only, so the
//! whole application can run unattended (headless runs, smoke tests).

use crate::app::{App, Phase};
use crate::consts::{PLAYER_BASE, SCREEN_WIDTH};
use crate::persistence::Storage;
use crate::platform::Display;
use crate::sim::{Bounded, ItemKind, RoundState, TickInput};

/// How far above the player falling obstacles are considered a threat
const THREAT_LOOKAHEAD: f32 = 260.0;
/// Extra horizontal clearance kept around obstacles
const THREAT_MARGIN: f32 = 12.0;

/// Demo driver that plays a fixed number of rounds, then quits
#[derive(Debug, Clone)]
pub struct Autopilot {
    rounds_left: u32,
    /// Rounds longer than this are abandoned through the pause menu
    max_round_frames: u64,
}

impl Autopilot {
    pub fn new(rounds: u32, max_round_frames: u64) -> Self {
        Self {
            rounds_left: rounds,
            max_round_frames,
        }
    }

    pub fn rounds_left(&self) -> u32 {
        self.rounds_left
    }

    /// Decide this frame's input
    pub fn input<S: Storage, D: Display>(&mut self, app: &App<S, D>) -> TickInput {
        match app.phase() {
            Phase::Menu => self.start_or_quit(|input| input.select = true),
            Phase::GameOver => self.start_or_quit(|input| input.replay = true),
            Phase::Playing => match app.round() {
                Some(round) if round.frames >= self.max_round_frames => TickInput {
                    pause: true,
                    ..Default::default()
                },
                Some(round) => steer(round),
                None => TickInput::default(),
            },
            Phase::Paused => TickInput {
                menu: true,
                ..Default::default()
            },
            Phase::TransitionOut { .. } | Phase::TransitionIn { .. } => TickInput::default(),
        }
    }

    fn start_or_quit(&mut self, start: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        if self.rounds_left == 0 {
            input.quit = true;
        } else {
            self.rounds_left -= 1;
            start(&mut input);
        }
        input
    }
}

/// Dodge the nearest obstacle above the player, otherwise chase collectibles
fn steer(round: &RoundState) -> TickInput {
    let player = round.player.bounds();
    let x = round.player.pos.x;
    let mut input = TickInput::default();

    let threat = round
        .items
        .iter()
        .filter(|item| item.kind == ItemKind::Obstacle)
        .map(|item| (item, item.bounds()))
        .filter(|(_, b)| {
            b.max.y > player.min.y - THREAT_LOOKAHEAD
                && b.min.y < player.max.y
                && b.max.x + THREAT_MARGIN > player.min.x
                && b.min.x - THREAT_MARGIN < player.max.x
        })
        .max_by(|(_, a), (_, b)| a.max.y.total_cmp(&b.max.y));

    if let Some((item, _)) = threat {
        // Run to the side with more room, away from the obstacle
        let go_left = if item.pos.x > x {
            x - PLAYER_BASE > 0.0
        } else {
            x + PLAYER_BASE > SCREEN_WIDTH
        };
        input.left = go_left;
        input.right = !go_left;
        return input;
    }

    let target = round
        .items
        .iter()
        .filter(|item| item.kind == ItemKind::Collectible && item.pos.y < player.max.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(item) = target {
        let dx = item.pos.x - x;
        let deadzone = round.tuning.player_speed;
        input.left = dx < -deadzone;
        input.right = dx > deadzone;
        // Reach for collectibles just overhead
        let overhead = item.bounds().max.y > player.min.y - 120.0;
        input.jump = dx.abs() <= deadzone && overhead && item.pos.y < player.min.y;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::ScoreStore;
    use crate::persistence::memory::MemoryStorage;
    use crate::platform::HeadlessDisplay;
    use crate::sim::FallingItem;
    use crate::tuning::Tuning;
    use crate::AppControl;

    #[test]
    fn test_dodges_obstacle_overhead() {
        let mut round = RoundState::new(1, Tuning::default());
        let id = round.next_entity_id();
        let mut item = FallingItem::new(id, ItemKind::Obstacle, round.player.pos.x + 5.0, 0.0);
        item.pos.y = round.player.pos.y - 150.0;
        round.items.push(item);

        let input = steer(&round);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_chases_collectible() {
        let mut round = RoundState::new(1, Tuning::default());
        let id = round.next_entity_id();
        let mut item = FallingItem::new(id, ItemKind::Collectible, 700.0, 0.0);
        item.pos.y = 300.0;
        round.items.push(item);

        let input = steer(&round);
        assert!(input.right);
        assert!(!input.jump);
    }

    #[test]
    fn test_plays_rounds_then_quits() {
        let store = ScoreStore::open(MemoryStorage::default());
        let mut app = App::new(Tuning::default(), store, HeadlessDisplay::default(), 11);
        let mut pilot = Autopilot::new(2, 600);

        let mut exited = false;
        for _ in 0..20_000 {
            let input = pilot.input(&app);
            if app.update(&input, 1.0 / 60.0) == AppControl::Exit {
                exited = true;
                break;
            }
        }

        assert!(exited);
        assert_eq!(pilot.rounds_left(), 0);
        let stats = &app.store().record().stats;
        assert!(stats.games_played <= 2);
    }
}
