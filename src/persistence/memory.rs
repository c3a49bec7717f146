//! In-memory storage for tests

use super::Storage;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
    /// Make every write fail with an I/O error
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn with_contents(json: &str) -> Self {
        Self {
            contents: Some(json.to_string()),
            fail_writes: false,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> GameResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> GameResult<()> {
        if self.fail_writes {
            return Err(GameError::Io(std::io::Error::other("read-only")));
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
