use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{Coord, Direction, Grid, Point};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    /// Head cell of a fresh snake.
    pub start: Point,
    /// Initial snake length (>= 1), trailing behind `start`.
    pub initial_len: usize,
    pub start_direction: Direction,
    pub points_per_food: u32,
    /// The tick interval shortens each time the score crosses a multiple of this.
    pub speed_threshold: u32,
    pub base_tick_ms: u64,
    pub tick_step_ms: u64,
    pub min_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            start: Point::new(5, 5),
            initial_len: 1,
            start_direction: Direction::Right,
            points_per_food: 10,
            speed_threshold: 50,
            base_tick_ms: 150,
            tick_step_ms: 10,
            min_tick_ms: 50,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    pub fn tick_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if self.width < 2 || self.height < 2 {
            return invalid(format!(
                "grid must be at least 2x2, got {}x{}",
                self.width, self.height
            ));
        }
        if self.initial_len == 0 {
            return invalid("initial_len must be at least 1".into());
        }
        let grid = self.grid();
        let behind = self.start_direction.opposite();
        let mut cell = self.start;
        for _ in 0..self.initial_len {
            if !grid.is_inside(cell) {
                return invalid(format!(
                    "starting snake does not fit: cell ({}, {}) is outside the grid",
                    cell.x, cell.y
                ));
            }
            cell = cell.step(behind);
        }
        if self.initial_len >= grid.cell_count() {
            return invalid("starting snake leaves no room for food".into());
        }
        if self.points_per_food == 0 {
            return invalid("points_per_food must be positive".into());
        }
        if self.speed_threshold == 0 {
            return invalid("speed_threshold must be positive".into());
        }
        if self.min_tick_ms == 0 {
            return invalid("min_tick_ms must be positive".into());
        }
        if self.base_tick_ms < self.min_tick_ms {
            return invalid(format!(
                "base_tick_ms ({}) is below min_tick_ms ({})",
                self.base_tick_ms, self.min_tick_ms
            ));
        }
        Ok(())
    }

    /// Reads a YAML config. A missing file gives the defaults; anything else
    /// that goes wrong is an error.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let cfg = Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::Yaml { source, .. } => ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(cfg)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml_ng::from_str(content).map_err(|source| ConfigError::Yaml {
            path: PathBuf::new(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}
