use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{Config, WriteLogger};

use y2k_snake::render::{board_size, overlay, render_board};
use y2k_snake::score::GAME_KEY;
use y2k_snake::{
    BestScoreStore, Direction, Game, GameConfig, GameState, Input, JsonFileStore, MemoryStore,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::Stylize,
    widgets::{Block, Borders, Clear, Paragraph},
};

type Store = Box<dyn BestScoreStore>;

#[derive(Parser)]
#[command(name = "y2k-snake", about = "Y2K Snake in your terminal")]
struct Args {
    /// YAML game config (grid size, speeds, scoring)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
    /// Best score file (defaults to the platform data directory)
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Keep the best score in memory only
    #[arg(long)]
    no_save: bool,
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args)?;

    let cfg = match &args.config {
        Some(path) => GameConfig::from_yaml_file(path)?,
        None => GameConfig::default(),
    };
    let store = open_store(&args);
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(cfg, seed, store)?,
        None => Game::new(cfg, store)?,
    };

    // --- Init terminal ---
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;
    terminal.clear()?;

    let res = run(&mut terminal, &mut game);

    // --- Restore terminal even on error ---
    if let Err(err) = disable_raw_mode() {
        error!("failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        error!("failed to leave alternate screen: {err}");
    }
    terminal.show_cursor().ok();

    game.save_best_score();
    info!("exiting, best score {}", game.best_score());
    res
}

fn init_logger(args: &Args) -> Result<()> {
    let path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("y2k-snake.log"));
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("failed to initialize logger")?;
    info!("starting y2k-snake");
    Ok(())
}

fn open_store(args: &Args) -> Store {
    if args.no_save {
        return Box::new(MemoryStore::default());
    }
    let path = match args.scores.clone().map(Ok).unwrap_or_else(JsonFileStore::default_path) {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}; best score will not be saved");
            return Box::new(MemoryStore::default());
        }
    };
    let store = JsonFileStore::new(path, GAME_KEY);
    info!("best score file: {}", store.path().display());
    Box::new(store)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game<Store>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // --- Input (non-blocking) ---
        let tick_rate = game.tick_interval();
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(game, key) {
                    return Ok(());
                }
            }
        }

        // --- Tick ---
        if game.state() != GameState::Running {
            // Nothing to simulate; don't let a paused clock fire an instant tick on resume.
            last_tick = Instant::now();
        } else if last_tick.elapsed() >= game.tick_interval() {
            let res = game.tick();
            if res.state == GameState::GameOver {
                info!("final score {}", res.score);
            }
            // Between ticks, never inside one.
            game.save_best_score();
            last_tick = Instant::now();
        }

        // --- Render ---
        let snap = game.snapshot();
        let grid = *game.grid();
        terminal.draw(|f| {
            let area = f.area();

            let title = format!(
                " Y2K Snake • score: {} • hi-score: {} ",
                snap.score, snap.best_score
            );
            let block = Block::default().borders(Borders::ALL).title(title.bold());

            // Block adds a 1-char border around the board.
            let (cols, rows) = board_size(&grid);
            let outer_w = cols.saturating_add(2).min(area.width);
            let outer_h = rows.saturating_add(2).min(area.height);
            let x = area.x.saturating_add(area.width.saturating_sub(outer_w) / 2);
            let y = area.y.saturating_add(area.height.saturating_sub(outer_h) / 2);
            let frame_area = Rect::new(x, y, outer_w, outer_h);

            let board = Paragraph::new(render_board(&snap, &grid)).block(block);
            f.render_widget(board, frame_area);

            if let Some(lines) = overlay(&snap) {
                let h = (lines.len() as u16).saturating_add(2).min(outer_h);
                let w = outer_w.saturating_sub(4).max(1);
                let popup = Rect::new(
                    frame_area.x + (outer_w.saturating_sub(w)) / 2,
                    frame_area.y + (outer_h.saturating_sub(h)) / 2,
                    w,
                    h,
                );
                f.render_widget(Clear, popup);
                f.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .block(Block::default().borders(Borders::ALL)),
                    popup,
                );
            }
        })?;
    }
}

/// Returns true if the caller should quit.
fn handle_key(game: &mut Game<Store>, key: KeyEvent) -> bool {
    let input = match key.code {
        // Quit keys
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Input::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Input::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Input::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Input::Steer(Direction::Right)
        }

        // Space pauses, and plays again once the game is over.
        KeyCode::Char(' ') if game.state() == GameState::GameOver => Input::Restart,
        KeyCode::Char(' ') | KeyCode::Char('p') => Input::TogglePause,
        KeyCode::Char('r') | KeyCode::Enter => Input::Restart,

        _ => return false,
    };
    game.handle(input);
    false
}
