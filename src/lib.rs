//! Grid snake engine: discrete ticks, wall and self collisions, scoring with
//! speed progression, and a start/pause/game-over state machine.
//!
//! The engine never draws or sleeps. A host calls [`Game::tick`] on a timer,
//! forwards player intents with [`Game::handle`], and renders [`Snapshot`]s.

pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod score;
pub mod snake;

pub use collision::CollisionResult;
pub use config::{ConfigError, GameConfig};
pub use food::FoodPlacer;
pub use game::{Game, GameOverReason, GameState, Snapshot, TickResult};
pub use grid::{Coord, Direction, Grid, Point};
pub use input::{Input, ParseInputError};
pub use score::{BestScoreStore, JsonFileStore, MemoryStore, ScoreStore, StoreError};
pub use snake::SnakeBody;
