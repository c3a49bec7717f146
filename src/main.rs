//! Dodge Master entry point
//!
//! Runs the game headless with the autopilot at the controls. A windowed
//! front end drives the same `App` with real input and draws from the
//! round state and `Effects`.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use dodge_master::audio::{AudioManager, SOUND_DIR};
use dodge_master::autopilot::Autopilot;
use dodge_master::consts::REFERENCE_FPS;
use dodge_master::effects::Effects;
use dodge_master::platform::{self, HeadlessDisplay};
use dodge_master::sim::GameEvent;
use dodge_master::{App, AppControl, FileStorage, Phase, ScoreStore, Tuning};

const TUNING_PATH: &str = "data/tuning.json";
/// Rounds the demo plays before quitting
const DEMO_ROUNDS: u32 = 3;
/// Demo rounds are abandoned after two minutes of play
const DEMO_ROUND_FRAMES: u64 = 2 * 60 * 60;
/// Hard stop for the demo loop
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn main() {
    platform::init_logging();
    log::info!("Dodge Master (headless) starting...");

    let mut store = ScoreStore::open(FileStorage::default());

    let preferred = store.settings().window_mode();
    let mut display = HeadlessDisplay::default();
    match platform::open_display(&mut display, preferred) {
        Ok(mode) if mode != preferred => store.set_fullscreen(false),
        Ok(_) => {}
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }

    let tuning = Tuning::load_or_default(Path::new(TUNING_PATH));
    let mut audio = AudioManager::load(Path::new(SOUND_DIR), store.settings().sound_enabled);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut effects = Effects::new(seed);
    let mut app = App::new(tuning, store, display, seed);
    let mut pilot = Autopilot::new(DEMO_ROUNDS, DEMO_ROUND_FRAMES);

    let dt = 1.0 / REFERENCE_FPS;
    let mut last_phase = app.phase();
    let mut frames = 0u64;

    loop {
        let input = pilot.input(&app);
        let control = app.update(&input, dt);

        for event in app.drain_events() {
            match event {
                GameEvent::Sound(effect) => {
                    audio.play(effect);
                }
                other => effects.apply(&other),
            }
        }
        effects.update(dt);

        let phase = app.phase();
        if phase != last_phase {
            if phase == Phase::Playing && matches!(last_phase, Phase::TransitionIn { .. }) {
                effects.clear();
            }
            if phase == Phase::GameOver {
                log::info!(
                    "Final score {} (best {}){}",
                    app.last_score(),
                    app.store().highscore(),
                    if app.is_new_best() { " - new high score!" } else { "" }
                );
            }
            last_phase = phase;
        }

        if control == AppControl::Exit {
            break;
        }

        frames += 1;
        if frames >= MAX_FRAMES {
            log::warn!("Demo ran {} frames without finishing, stopping", frames);
            app.shutdown();
            break;
        }
    }

    let stats = &app.store().record().stats;
    log::info!(
        "Played {} games, {} collectibles, best combo {}, {} cues played",
        stats.games_played,
        stats.total_collectibles,
        stats.max_combo,
        audio.played()
    );
}
