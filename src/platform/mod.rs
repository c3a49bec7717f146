//! Platform abstraction layer
//!
//! Handles the process-level concerns around the core:
//! - Logging backend
//! - Window mode selection with a windowed fallback

use crate::error::{GameError, GameResult};

/// Initialize the logger (`RUST_LOG` overrides the default `info` filter)
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A second init (tests, embedding) is harmless
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// How the game window is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Windowed,
    Fullscreen,
}

impl WindowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::Windowed => "windowed",
            WindowMode::Fullscreen => "fullscreen",
        }
    }
}

/// A surface the game presents frames to
pub trait Display {
    fn set_mode(&mut self, mode: WindowMode) -> GameResult<()>;
}

/// Display that accepts any mode and draws nothing
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    mode: Option<WindowMode>,
}

impl HeadlessDisplay {
    pub fn mode(&self) -> Option<WindowMode> {
        self.mode
    }
}

impl Display for HeadlessDisplay {
    fn set_mode(&mut self, mode: WindowMode) -> GameResult<()> {
        log::debug!("Headless display in {} mode", mode.as_str());
        self.mode = Some(mode);
        Ok(())
    }
}

/// Open the display in the preferred mode, falling back to windowed once
///
/// Returns the mode actually in use.
pub fn open_display<D: Display>(display: &mut D, preferred: WindowMode) -> GameResult<WindowMode> {
    let first = match display.set_mode(preferred) {
        Ok(()) => return Ok(preferred),
        Err(e) => e,
    };
    log::warn!("{}. Trying default windowed.", first);

    match display.set_mode(WindowMode::Windowed) {
        Ok(()) => Ok(WindowMode::Windowed),
        Err(e) => {
            log::error!("Could not set any display mode: {}", e);
            Err(GameError::Display {
                mode: WindowMode::Windowed.as_str(),
                reason: e.to_string(),
            })
        }
    }
}
