//! High score persistence
//!
//! A single integer record, overwritten wholesale on every update. Stores
//! report errors; the session treats them as best-effort and never fails a
//! run because of them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where the record lives
pub trait HighScoreStore {
    /// Read the stored record. Missing or unreadable records are errors; the
    /// caller decides on the default.
    fn load(&self) -> Result<u32>;
    /// Overwrite the stored record
    fn save(&mut self, score: u32) -> Result<()>;

    /// Load, falling back to 0
    fn load_or_default(&self) -> u32 {
        match self.load() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(err) => {
                log::warn!("No high score loaded ({err:#}), starting at 0");
                0
            }
        }
    }
}

fn parse_record(text: &str) -> Result<u32> {
    text.trim()
        .parse::<u32>()
        .with_context(|| format!("invalid high score record {:?}", text.trim()))
}

/// Plain text file holding the decimal score
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "highscore.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading {}", self.path.display()))?;
        parse_record(&text)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("failed writing {}", self.path.display()))
    }
}

/// In-memory record. `fail_saves` makes every save error out.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub value: Option<u32>,
    pub fail_saves: bool,
    /// Every value that was successfully written, in order
    pub writes: Vec<u32>,
}

impl MemoryHighScoreStore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32> {
        self.value
            .ok_or_else(|| anyhow::anyhow!("no high score recorded"))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if self.fail_saves {
            anyhow::bail!("storage unavailable");
        }
        self.value = Some(score);
        self.writes.push(score);
        Ok(())
    }
}

/// Browser LocalStorage record (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageHighScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScoreStore {
    const STORAGE_KEY: &'static str = "spike_dash_highscore";

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("LocalStorage unavailable"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScoreStore {
    fn load(&self) -> Result<u32> {
        let text = Self::storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| anyhow::anyhow!("LocalStorage read failed: {e:?}"))?
            .ok_or_else(|| anyhow::anyhow!("no high score recorded"))?;
        parse_record(&text)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|e| anyhow::anyhow!("LocalStorage write failed: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_round_trip_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileHighScoreStore::new(dir.path().join("highscore.txt"));

        store.save(12).unwrap();
        store.save(7).unwrap();
        assert_eq!(store.load().unwrap(), 7);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "7");
    }

    #[test]
    fn test_missing_file_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHighScoreStore::new(dir.path().join("nope.txt"));
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), 0);
    }

    #[test]
    fn test_garbage_file_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        std::fs::write(&path, "not a number").unwrap();
        let store = FileHighScoreStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), 0);
    }

    #[test]
    fn test_record_tolerates_whitespace() {
        assert_eq!(parse_record(" 42\n").unwrap(), 42);
        assert!(parse_record("-3").is_err());
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileHighScoreStore::new(dir.path().join("missing_dir").join("hs.txt"));
        assert!(store.save(3).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScoreStore::default();
        assert_eq!(store.load_or_default(), 0);
        store.save(5).unwrap();
        assert_eq!(store.load().unwrap(), 5);

        store.fail_saves = true;
        assert!(store.save(9).is_err());
        assert_eq!(store.load().unwrap(), 5);
        assert_eq!(store.writes, vec![5]);
    }
}
