use std::time::Duration;

use log::{debug, info, warn};

use crate::collision::{self, CollisionResult};
use crate::config::{ConfigError, GameConfig};
use crate::food::FoodPlacer;
use crate::grid::{Direction, Grid, Point};
use crate::input::Input;
use crate::score::{BestScoreStore, MemoryStore, ScoreStore};
use crate::snake::SnakeBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Wall,
    SelfHit,
    /// The snake filled every cell; there is nowhere left for food.
    BoardFull,
}

/// UI-agnostic result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub ate_food: bool,
    /// The tick interval got shorter on this tick.
    pub sped_up: bool,
    pub state: GameState,
    pub score: u32,
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Head first.
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub best_score: u32,
    pub state: GameState,
    pub direction: Direction,
    pub tick_interval: Duration,
    pub game_over_reason: Option<GameOverReason>,
}

/// The snake game state machine.
///
/// Single-threaded: the host calls [`Game::tick`] every [`Game::tick_interval`]
/// and feeds intents through [`Game::handle`] in between. Direction changes are
/// buffered and only take effect at the start of the next tick.
///
/// A tick never touches the best-score store. A raised best is held until the
/// host calls [`Game::save_best_score`] (or the next session starts).
#[derive(Debug)]
pub struct Game<S = MemoryStore> {
    cfg: GameConfig,
    grid: Grid,
    snake: SnakeBody,
    dir: Direction,
    /// Applied at the start of the next tick. Last accepted intent wins.
    pending_dir: Option<Direction>,
    food: Option<Point>,
    placer: FoodPlacer,
    state: GameState,
    scores: ScoreStore,
    store: S,
    interval: Duration,
    over_reason: Option<GameOverReason>,
    /// Best score raised at game over and not yet written to `store`.
    unsaved_best: Option<u32>,
}

impl<S: BestScoreStore> Game<S> {
    /// Create a new game with non-deterministic food placement.
    pub fn new(cfg: GameConfig, store: S) -> Result<Self, ConfigError> {
        Self::with_placer(cfg, FoodPlacer::from_os_rng(), store)
    }

    /// Create a new game with deterministic food placement from `seed`.
    pub fn with_seed(cfg: GameConfig, seed: u64, store: S) -> Result<Self, ConfigError> {
        Self::with_placer(cfg, FoodPlacer::with_seed(seed), store)
    }

    /// Fails if `cfg` does not validate.
    pub fn with_placer(cfg: GameConfig, placer: FoodPlacer, store: S) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let grid = cfg.grid();
        let snake = SnakeBody::new(cfg.start, cfg.start_direction, cfg.initial_len);
        let mut game = Self {
            grid,
            snake,
            dir: cfg.start_direction,
            pending_dir: None,
            food: None,
            placer,
            state: GameState::NotStarted,
            scores: ScoreStore::default(),
            store,
            interval: cfg.base_interval(),
            over_reason: None,
            unsaved_best: None,
            cfg,
        };
        // Shown behind the "press a key" screen; replaced when the session starts.
        game.food = game.placer.place(&game.grid, game.snake.occupied());
        game.load_best();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.scores.current_score()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best_score()
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn tick_interval(&self) -> Duration {
        self.interval
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.over_reason
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn snake_segments(&self) -> impl Iterator<Item = &Point> {
        self.snake.segments()
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when a raised best score is waiting for [`Game::save_best_score`].
    pub fn has_unsaved_best(&self) -> bool {
        self.unsaved_best.is_some()
    }

    /// Writes a best score raised by the last session to the store. Failures are
    /// logged and dropped; the in-memory best is unaffected.
    pub fn save_best_score(&mut self) {
        if let Some(best) = self.unsaved_best.take() {
            match self.store.save(best) {
                Ok(()) => debug!("saved best score {best}"),
                Err(e) => warn!("could not save best score: {e}"),
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score(),
            best_score: self.best_score(),
            state: self.state,
            direction: self.dir,
            tick_interval: self.interval,
            game_over_reason: self.over_reason,
        }
    }

    /// Applies a player intent. Intents that make no sense in the current
    /// state are ignored.
    pub fn handle(&mut self, input: Input) {
        match (self.state, input) {
            (GameState::NotStarted, Input::Steer(dir)) => {
                self.start_session();
                self.queue_direction(dir);
            }
            (GameState::NotStarted | GameState::GameOver, Input::Restart) => {
                self.start_session();
            }
            (GameState::Running, Input::Steer(dir)) => self.queue_direction(dir),
            (GameState::Running, Input::TogglePause) => {
                debug!("paused at score {}", self.score());
                self.state = GameState::Paused;
            }
            (GameState::Paused, Input::TogglePause) => {
                debug!("resumed");
                self.state = GameState::Running;
            }
            (state, input) => debug!("ignoring {input:?} while {state:?}"),
        }
    }

    /// Parses and applies a textual intent. Unrecognised tokens change nothing.
    pub fn handle_token(&mut self, token: &str) {
        match token.parse::<Input>() {
            Ok(input) => self.handle(input),
            Err(e) => debug!("{e}"),
        }
    }

    /// Advance the game by one tick. Does nothing unless running.
    pub fn tick(&mut self) -> TickResult {
        if self.state != GameState::Running {
            return self.result(false, false);
        }

        if let Some(next) = self.pending_dir.take() {
            if !next.is_opposite(self.dir) {
                self.dir = next;
            }
        }

        let candidate = self.snake.propose_move(self.dir);
        let grow = self.food == Some(candidate);

        match collision::check(candidate, &self.grid, &self.snake, grow) {
            CollisionResult::Ok => {}
            CollisionResult::WallHit => {
                return self.end_session(GameOverReason::Wall, false, false);
            }
            CollisionResult::SelfHit => {
                return self.end_session(GameOverReason::SelfHit, false, false);
            }
        }

        self.snake.advance(candidate, grow);
        if !grow {
            return self.result(false, false);
        }

        let before = self.scores.current_score();
        self.scores.record_points(self.cfg.points_per_food);
        let after = self.scores.current_score();
        debug!("ate food at ({}, {}), score {}", candidate.x, candidate.y, after);

        let sped_up = self.maybe_speed_up(before, after);

        self.food = self.placer.place(&self.grid, self.snake.occupied());
        if self.food.is_none() {
            return self.end_session(GameOverReason::BoardFull, true, sped_up);
        }

        self.result(true, sped_up)
    }

    /// Request a direction change for the next tick. A reversal of the
    /// current heading is dropped.
    fn queue_direction(&mut self, dir: Direction) {
        if dir.is_opposite(self.dir) {
            debug!("rejecting reversal {:?} -> {:?}", self.dir, dir);
            return;
        }
        self.pending_dir = Some(dir);
    }

    /// Shortens the interval by one step when the score crosses a threshold
    /// multiple. Never goes below the floor.
    fn maybe_speed_up(&mut self, before: u32, after: u32) -> bool {
        let threshold = self.cfg.speed_threshold.max(1);
        let floor = self.cfg.min_interval();
        if after / threshold <= before / threshold || self.interval <= floor {
            return false;
        }
        self.interval = self.interval.saturating_sub(self.cfg.tick_step()).max(floor);
        debug!("speed up: tick interval now {:?}", self.interval);
        true
    }

    fn start_session(&mut self) {
        self.save_best_score();
        self.load_best();
        self.scores.start_session();
        self.snake = SnakeBody::new(self.cfg.start, self.cfg.start_direction, self.cfg.initial_len);
        self.dir = self.cfg.start_direction;
        self.pending_dir = None;
        self.interval = self.cfg.base_interval();
        self.over_reason = None;
        self.food = self.placer.place(&self.grid, self.snake.occupied());
        self.state = GameState::Running;
        info!("session started, best score {}", self.best_score());
    }

    fn end_session(&mut self, reason: GameOverReason, ate_food: bool, sped_up: bool) -> TickResult {
        self.state = GameState::GameOver;
        self.over_reason = Some(reason);
        let previous = self.scores.best_score();
        let best = self.scores.finalize_session();
        info!(
            "game over ({reason:?}): score {}, best {}",
            self.scores.current_score(),
            best
        );
        if best > previous {
            self.unsaved_best = Some(best);
        }
        self.result(ate_food, sped_up)
    }

    fn load_best(&mut self) {
        match self.store.load() {
            Ok(best) => self.scores.raise_best(best),
            Err(e) => warn!("could not load best score, keeping {}: {e}", self.best_score()),
        }
    }

    fn result(&self, ate_food: bool, sped_up: bool) -> TickResult {
        TickResult {
            ate_food,
            sped_up,
            state: self.state,
            score: self.scores.current_score(),
        }
    }
}
