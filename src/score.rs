use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

/// Key under which the best score is stored.
pub const GAME_KEY: &str = "y2k-snake";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine a data directory for the score file")]
    NoHomeDir,
}

/// Current session score plus the best score seen across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreStore {
    current: u32,
    best: u32,
}

impl ScoreStore {
    pub fn new(best: u32) -> Self {
        Self { current: 0, best }
    }

    pub fn record_points(&mut self, n: u32) {
        self.current = self.current.saturating_add(n);
    }

    pub fn current_score(&self) -> u32 {
        self.current
    }

    pub fn best_score(&self) -> u32 {
        self.best
    }

    /// Applies `best = max(best, current)` and returns the new best.
    pub fn finalize_session(&mut self) -> u32 {
        self.best = self.best.max(self.current);
        self.best
    }

    /// Raises the best score to `value` if it is higher. Never lowers it.
    pub fn raise_best(&mut self, value: u32) {
        self.best = self.best.max(value);
    }

    pub(crate) fn start_session(&mut self) {
        self.current = 0;
    }
}

/// Where the best score lives between runs.
pub trait BestScoreStore {
    fn load(&mut self) -> Result<u32, StoreError>;
    fn save(&mut self, best: u32) -> Result<(), StoreError>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load(&mut self) -> Result<u32, StoreError> {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        (**self).save(best)
    }
}

/// Keeps the best score in memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    pub fn value(&self) -> u32 {
        self.best
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.best = best;
        Ok(())
    }
}

/// JSON object of `game key -> best score`. Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// `scores.json` in the platform data directory.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = ProjectDirs::from("", "", GAME_KEY).ok_or(StoreError::NoHomeDir)?;
        Ok(dirs.data_dir().join("scores.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.read_table()?.get(&self.key).copied().unwrap_or(0))
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        let mut table = match self.read_table() {
            Ok(table) => table,
            Err(StoreError::Json { .. }) => {
                log::warn!("overwriting unreadable score file {}", self.path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        table.insert(self.key.clone(), best);

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&table).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(io_err)
    }
}
