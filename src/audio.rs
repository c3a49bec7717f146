//! Sound cue sink
//!
//! Resolves the core's sound requests against the files on disk. A missing
//! sound file only silences that cue; a disabled sink silences everything.

use std::path::{Path, PathBuf};

use crate::sim::SoundEffect;

/// Default sound directory, relative to the working directory
pub const SOUND_DIR: &str = "assets/sounds";

fn file_name(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Collect => "collect.wav",
        SoundEffect::Hit => "hit.wav",
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    collect: Option<PathBuf>,
    hit: Option<PathBuf>,
    enabled: bool,
    played: u64,
}

impl AudioManager {
    /// Look up every cue under `dir`; missing files are logged and skipped
    pub fn load(dir: &Path, enabled: bool) -> Self {
        let find = |effect: SoundEffect| {
            let path = dir.join(file_name(effect));
            if path.is_file() {
                Some(path)
            } else {
                log::warn!(
                    "Could not load sound '{}'. Running without it.",
                    path.display()
                );
                None
            }
        };
        let manager = Self {
            collect: find(SoundEffect::Collect),
            hit: find(SoundEffect::Hit),
            enabled,
            played: 0,
        };
        if manager.collect.is_some() && manager.hit.is_some() {
            log::info!("Sounds loaded.");
        }
        manager
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cues actually issued so far
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Play a sound effect. Returns whether a cue was issued.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        if !self.enabled {
            return false;
        }
        let source = match effect {
            SoundEffect::Collect => &self.collect,
            SoundEffect::Hit => &self.hit,
        };
        let Some(path) = source else { return false };
        log::debug!("Playing {}", path.display());
        self.played += 1;
        true
    }
}
