//! Application state machine
//!
//! Sequences menu → round → game over → menu. Every screen change goes
//! through a fade: an "out" half on the old screen, the target's entry
//! action, then an "in" half on the new screen.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_DT, TRANSITION_SPEED};
use crate::error::GameResult;
use crate::persistence::{ScoreStore, Storage};
use crate::platform::{self, Display, HeadlessDisplay, WindowMode};
use crate::sim::{GameEvent, RoundOutcome, RoundState, TickInput, tick};
use crate::tuning::Tuning;

/// A concrete screen a transition can start from or land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

/// Current application phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    /// Round in progress but frozen
    Paused,
    GameOver,
    /// Fading out of `from`; `target`'s entry action runs at the end
    TransitionOut { from: Screen, target: Screen },
    /// Fading in to `target`
    TransitionIn { target: Screen },
}

impl Phase {
    pub fn is_transitioning(&self) -> bool {
        matches!(
            self,
            Phase::TransitionOut { .. } | Phase::TransitionIn { .. }
        )
    }
}

/// Whether the process should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Top-level game: owns the score store, the display and the current round
#[derive(Debug)]
pub struct App<S: Storage, D: Display = HeadlessDisplay> {
    tuning: Tuning,
    store: ScoreStore<S>,
    display: D,
    rng: Pcg32,
    phase: Phase,
    /// Progress of the current fade half (0.0 - 1.0)
    progress: f32,
    round: Option<RoundState>,
    last_score: u64,
    new_best: bool,
    events: Vec<GameEvent>,
}

impl<S: Storage, D: Display> App<S, D> {
    /// `display` is expected to be open already (see `platform::open_display`)
    pub fn new(tuning: Tuning, store: ScoreStore<S>, display: D, seed: u64) -> Self {
        Self {
            tuning,
            store,
            display,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Menu,
            progress: 0.0,
            round: None,
            last_score: 0,
            new_best: false,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fade progress of the current transition half
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn store(&self) -> &ScoreStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScoreStore<S> {
        &mut self.store
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Score of the most recently finished round
    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    /// The last game over set a new high score
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    /// Take the presentation requests produced since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput, dt: f32) -> AppControl {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        if input.toggle_fullscreen && self.toggle_fullscreen().is_err() {
            return self.exit();
        }

        match self.phase {
            Phase::Menu => {
                if input.quit {
                    return self.exit();
                }
                if input.select {
                    self.start_transition(Screen::Menu, Screen::Playing);
                }
            }
            Phase::GameOver => {
                if input.quit {
                    return self.exit();
                }
                if input.replay {
                    self.start_transition(Screen::GameOver, Screen::Playing);
                } else if input.menu {
                    self.start_transition(Screen::GameOver, Screen::Menu);
                }
            }
            Phase::Playing | Phase::Paused => return self.update_round(input, dt),
            Phase::TransitionOut { .. } | Phase::TransitionIn { .. } => {
                if input.quit {
                    return self.exit();
                }
                self.update_transition(dt);
            }
        }
        AppControl::Continue
    }

    /// Persist everything before the process ends
    pub fn shutdown(&mut self) {
        self.store.save();
    }

    fn update_round(&mut self, input: &TickInput, dt: f32) -> AppControl {
        if self.round.is_none() {
            let round = self.new_round();
            self.round = Some(round);
        }
        let Some(round) = self.round.as_mut() else {
            return AppControl::Continue;
        };

        match tick(round, input, dt, &mut self.events) {
            RoundOutcome::Continue => {
                self.phase = if round.paused {
                    Phase::Paused
                } else {
                    Phase::Playing
                };
            }
            RoundOutcome::Quit => {
                let summary = round.summary();
                self.store.record_round(&summary, false);
                return self.exit();
            }
            RoundOutcome::ReturnToMenu => {
                let summary = round.summary();
                self.store.record_round(&summary, false);
                self.start_transition(Screen::Playing, Screen::Menu);
            }
            RoundOutcome::GameOver { score } => {
                let summary = round.summary();
                log::info!(
                    "Round over: score {}, {} collectibles",
                    score,
                    summary.collectibles
                );
                self.store.record_round(&summary, true);
                self.last_score = score;
                self.start_transition(Screen::Playing, Screen::GameOver);
            }
        }
        AppControl::Continue
    }

    fn exit(&mut self) -> AppControl {
        // A finished round still fading out has not been offered yet
        if let Phase::TransitionOut {
            target: Screen::GameOver,
            ..
        } = self.phase
        {
            self.enter(Screen::GameOver);
        }
        self.shutdown();
        AppControl::Exit
    }

    /// Flip the fullscreen preference, persist it and apply it
    ///
    /// A mode the display rejects falls back to windowed, and that is
    /// persisted instead. Fails only if no mode can be set at all.
    fn toggle_fullscreen(&mut self) -> GameResult<WindowMode> {
        let previous = self.store.settings().fullscreen;
        self.store.set_fullscreen(!previous);
        let wanted = self.store.settings().window_mode();

        match platform::open_display(&mut self.display, wanted) {
            Ok(mode) => {
                if mode != wanted {
                    self.store.set_fullscreen(false);
                }
                log::info!("Display now {}", mode.as_str());
                Ok(mode)
            }
            Err(e) => {
                self.store.set_fullscreen(previous);
                Err(e)
            }
        }
    }

    fn new_round(&mut self) -> RoundState {
        RoundState::new(self.rng.random(), self.tuning.clone())
    }

    fn start_transition(&mut self, from: Screen, target: Screen) {
        if self.phase.is_transitioning() {
            return;
        }
        log::debug!("Transition {:?} -> {:?}", from, target);
        self.phase = Phase::TransitionOut { from, target };
        self.progress = 0.0;
    }

    fn update_transition(&mut self, dt: f32) {
        self.progress += TRANSITION_SPEED * dt;
        if self.progress < 1.0 {
            return;
        }

        match self.phase {
            Phase::TransitionOut { target, .. } => {
                self.enter(target);
                self.phase = Phase::TransitionIn { target };
                self.progress = 0.0;
            }
            Phase::TransitionIn { target } => {
                self.progress = 0.0;
                self.phase = match target {
                    Screen::Menu => Phase::Menu,
                    Screen::Playing => Phase::Playing,
                    Screen::GameOver => Phase::GameOver,
                };
            }
            _ => {}
        }
    }

    /// Entry action, run once the old screen has faded out
    fn enter(&mut self, target: Screen) {
        match target {
            Screen::Playing => {
                let round = self.new_round();
                self.round = Some(round);
            }
            Screen::GameOver => {
                self.new_best = self.store.submit_score(self.last_score);
            }
            Screen::Menu => {
                self.round = None;
            }
        }
    }
}
