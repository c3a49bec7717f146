//! Save file persistence
//!
//! Features:
//! - Flat JSON record (high score, settings, stats)
//! - Missing fields take fresh-record defaults, unknown fields are ignored
//! - Corrupt or unreadable saves reset to defaults and are rewritten
//! - Best-effort writes: failures are logged, never fatal

pub mod file;
#[cfg(test)]
pub(crate) mod memory;

pub use file::FileStorage;

use serde::{Deserialize, Serialize};

use crate::error::GameResult;
use crate::highscores::{HighScoreRecord, RoundSummary};
use crate::settings::Settings;

/// On-disk layout of the save file
///
/// ```json
/// { "highscore": 42, "sound_enabled": true, "fullscreen": false,
///   "stats": { "games_played": 3, "total_collectibles": 60, ... } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(flatten)]
    pub record: HighScoreRecord,
    #[serde(flatten)]
    pub settings: Settings,
}

impl SaveData {
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Backend holding the raw save text
pub trait Storage {
    /// Read the save; `Ok(None)` when nothing has been saved yet
    fn read(&self) -> GameResult<Option<String>>;

    /// Replace the save
    fn write(&mut self, contents: &str) -> GameResult<()>;

    /// Where the save lives (for logging)
    fn describe(&self) -> String;
}

/// Owns the save data and keeps it in sync with a `Storage`
#[derive(Debug)]
pub struct ScoreStore<S: Storage> {
    storage: S,
    data: SaveData,
}

impl<S: Storage> ScoreStore<S> {
    /// Load the save, creating or repairing it as needed
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            data: SaveData::default(),
        };

        match store.storage.read() {
            Ok(None) => {
                log::info!(
                    "No save file at {}, using defaults",
                    store.storage.describe()
                );
                store.save();
            }
            Ok(Some(json)) => match SaveData::from_json(&json) {
                Ok(data) => {
                    log::info!("Loaded save from {}", store.storage.describe());
                    store.data = data;
                }
                Err(e) => {
                    log::warn!("Error loading save data: {}. Using default values.", e);
                    store.save();
                }
            },
            Err(e) => {
                log::warn!("Could not read save data: {}. Using default values.", e);
                store.save();
            }
        }

        store
    }

    pub fn data(&self) -> &SaveData {
        &self.data
    }

    pub fn record(&self) -> &HighScoreRecord {
        &self.data.record
    }

    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn highscore(&self) -> u64 {
        self.data.record.highscore
    }

    /// Offer a finished round's score; saves and returns true on a new best
    pub fn submit_score(&mut self, score: u64) -> bool {
        if !self.data.record.submit(score) {
            return false;
        }
        log::info!("New high score: {}", score);
        self.save();
        true
    }

    /// Add a finished round to the lifetime stats and save
    pub fn record_round(&mut self, round: &RoundSummary, game_over: bool) {
        self.data.record.record_round(round, game_over);
        self.save();
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.data.settings.fullscreen = fullscreen;
        self.save();
    }

    /// Write the save, logging (and swallowing) any failure
    pub fn save(&mut self) {
        if let Err(e) = self.try_save() {
            log::warn!("Error saving game data to {}: {}", self.storage.describe(), e);
        }
    }

    /// Write the save
    pub fn try_save(&mut self) -> GameResult<()> {
        let json = self.data.to_json()?;
        self.storage.write(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStorage;
    use super::*;
    use crate::highscores::Stats;
    use proptest::prelude::*;

    #[test]
    fn test_missing_stats_default() {
        let data = SaveData::from_json(r#"{ "highscore": 42, "fullscreen": true }"#).unwrap();
        assert_eq!(data.record.highscore, 42);
        assert_eq!(data.record.stats, Stats::default());
        assert!(data.settings.fullscreen);
        assert!(data.settings.sound_enabled);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let data =
            SaveData::from_json(r#"{ "highscore": 3, "achievements": {}, "played_before": true }"#)
                .unwrap();
        assert_eq!(data.record.highscore, 3);
    }

    #[test]
    fn test_wire_layout_is_flat() {
        let json = SaveData::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["highscore"], 0);
        assert_eq!(value["sound_enabled"], true);
        assert_eq!(value["fullscreen"], false);
        assert_eq!(value["stats"]["games_played"], 0);
        assert_eq!(value["stats"]["game_near_misses"], 0);
    }

    #[test]
    fn test_open_creates_missing_save() {
        let store = ScoreStore::open(MemoryStorage::default());
        assert_eq!(store.highscore(), 0);
        assert!(store.storage().contents().is_some());
    }

    #[test]
    fn test_open_loads_existing() {
        let storage = MemoryStorage::with_contents(r#"{ "highscore": 42 }"#);
        let store = ScoreStore::open(storage);
        assert_eq!(store.highscore(), 42);
        assert_eq!(store.record().stats, Stats::default());
    }

    #[test]
    fn test_corrupt_save_resets_and_rewrites() {
        let storage = MemoryStorage::with_contents("{ this is not json");
        let store = ScoreStore::open(storage);
        assert_eq!(store.data(), &SaveData::default());

        let rewritten = store.storage().contents().unwrap();
        assert_eq!(SaveData::from_json(rewritten).unwrap(), SaveData::default());
    }

    #[test]
    fn test_negative_highscore_is_corrupt() {
        let store = ScoreStore::open(MemoryStorage::with_contents(r#"{ "highscore": -5 }"#));
        assert_eq!(store.highscore(), 0);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut storage = MemoryStorage::default();
        storage.fail_writes = true;
        let mut store = ScoreStore::open(storage);
        assert!(store.submit_score(10));
        assert_eq!(store.highscore(), 10);
        assert!(store.try_save().is_err());
    }

    #[test]
    fn test_submit_persists_only_improvements() {
        let mut store = ScoreStore::open(MemoryStorage::default());
        assert!(store.submit_score(8));
        let saved = SaveData::from_json(store.storage().contents().unwrap()).unwrap();
        assert_eq!(saved.record.highscore, 8);
        assert!(!store.submit_score(3));
        assert_eq!(store.highscore(), 8);
    }

    #[test]
    fn test_settings_saved_immediately() {
        let mut store = ScoreStore::open(MemoryStorage::default());
        store.set_fullscreen(true);
        let saved = SaveData::from_json(store.storage().contents().unwrap()).unwrap();
        assert!(saved.settings.sound_enabled);
        assert!(saved.settings.fullscreen);
    }

    proptest! {
        #[test]
        fn prop_save_round_trip(
            highscore in any::<u32>(),
            sound_enabled in any::<bool>(),
            fullscreen in any::<bool>(),
            counters in prop::array::uniform5(any::<u32>()),
        ) {
            let data = SaveData {
                record: HighScoreRecord {
                    highscore: highscore as u64,
                    stats: Stats {
                        games_played: counters[0] as u64,
                        total_collectibles: counters[1] as u64,
                        total_score: counters[2] as u64,
                        max_combo: counters[3] as u64,
                        game_near_misses: counters[4] as u64,
                    },
                },
                settings: Settings { sound_enabled, fullscreen },
            };

            let mut store = ScoreStore::open(MemoryStorage::default());
            store.data = data.clone();
            store.try_save().unwrap();

            let reloaded = ScoreStore::open(store.storage().clone());
            prop_assert_eq!(reloaded.data(), &data);
        }
    }
}
