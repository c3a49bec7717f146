//! Player preferences
//!
//! Stored in the same save file as the high score.

use serde::{Deserialize, Serialize};

use crate::platform::WindowMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play sound cues
    pub sound_enabled: bool,
    /// Start in fullscreen
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            fullscreen: false,
        }
    }
}

impl Settings {
    /// Preferred window mode
    pub fn window_mode(&self) -> WindowMode {
        if self.fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Windowed
        }
    }
}
