//! Randomised play through the public API, checking the engine's invariants
//! after every input and tick.

use std::collections::HashSet;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use y2k_snake::{Direction, Game, GameConfig, GameState, Input, MemoryStore, Point};

fn random_input(rng: &mut ChaCha8Rng) -> Input {
    match rng.random_range(0..10) {
        0..=6 => Input::Steer(Direction::ALL[rng.random_range(0..4)]),
        7 => Input::TogglePause,
        _ => Input::Restart,
    }
}

fn check_invariants(game: &Game) {
    let cells: Vec<Point> = game.snake_segments().copied().collect();
    assert!(!cells.is_empty());
    let distinct: HashSet<Point> = cells.iter().copied().collect();
    assert_eq!(distinct.len(), cells.len(), "snake overlaps itself: {cells:?}");
    for p in &cells {
        assert!(game.grid().is_inside(*p), "{p:?} outside the grid");
    }
    for pair in cells.windows(2) {
        assert_eq!(pair[0].manhattan(pair[1]), 1, "gap in body {cells:?}");
    }
    if let Some(food) = game.food() {
        assert!(!distinct.contains(&food), "food {food:?} on the snake");
    }
    let cfg = game.config();
    assert!(game.tick_interval() >= Duration::from_millis(cfg.min_tick_ms));
    assert!(game.tick_interval() <= Duration::from_millis(cfg.base_tick_ms));
}

fn play(seed: u64, cfg: GameConfig, steps: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = Game::with_seed(cfg, seed, MemoryStore::default()).unwrap();
    let mut best = game.best_score();

    for _ in 0..steps {
        let state_before = game.state();
        let score_before = game.score();
        let len_before = game.snake_segments().count();

        if rng.random_bool(0.3) {
            game.handle(random_input(&mut rng));
            if game.state() == GameState::Running && state_before == GameState::Running {
                assert_eq!(game.score(), score_before, "input changed the score");
            }
        } else {
            let res = game.tick();
            game.save_best_score();
            let len_after = game.snake_segments().count();
            if state_before != GameState::Running {
                assert_eq!(len_after, len_before);
                assert_eq!(game.score(), score_before);
            } else if res.ate_food {
                assert_eq!(len_after, len_before + 1);
                assert_eq!(game.score(), score_before + game.config().points_per_food);
            } else {
                assert_eq!(len_after, len_before);
                assert_eq!(game.score(), score_before);
            }
        }

        check_invariants(&game);
        assert!(game.best_score() >= best, "best score went down");
        best = game.best_score();
        if game.state() == GameState::GameOver {
            assert!(game.best_score() >= game.score());
            assert_eq!(game.store().value(), game.best_score());
        }
    }
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..20 {
        play(seed, GameConfig::default(), 2_000);
    }
}

#[test]
fn random_play_on_a_tiny_board() {
    let cfg = GameConfig {
        width: 4,
        height: 3,
        start: Point::new(1, 1),
        ..GameConfig::default()
    };
    for seed in 0..50 {
        play(seed, cfg.clone(), 500);
    }
}

#[test]
fn best_score_survives_sessions() {
    let mut game = Game::with_seed(GameConfig::default(), 11, MemoryStore::new(25)).unwrap();
    assert_eq!(game.best_score(), 25);

    // Run straight into the right wall without eating.
    game.handle(Input::Restart);
    while game.state() == GameState::Running {
        game.tick();
    }
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.best_score(), 25);
    assert_eq!(game.store().value(), 25);

    game.handle(Input::Restart);
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.best_score(), 25);
}

#[test]
fn snapshot_reflects_the_game() {
    let mut game = Game::with_seed(GameConfig::default(), 4, MemoryStore::default()).unwrap();
    game.handle_token("right");
    let snap = game.snapshot();
    assert_eq!(snap.state, GameState::Running);
    assert_eq!(snap.snake, vec![Point::new(5, 5)]);
    assert_eq!(snap.direction, Direction::Right);
    assert_eq!(snap.tick_interval, Duration::from_millis(150));
    assert_eq!(snap.food, game.food());
    assert_eq!(snap.score, 0);
}
