use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::game::{GameOverReason, GameState, Snapshot};
use crate::grid::{Direction, Grid, Point};

const HEAD: Color = Color::Rgb(0xff, 0x33, 0xcc);
const BODY: Color = Color::Rgb(0x99, 0x33, 0xff);
const FOOD: Color = Color::Rgb(0x33, 0xcc, 0xff);
const GRID: Color = Color::Rgb(0x33, 0x33, 0x33);

/// Terminal columns per grid cell; keeps cells roughly square.
pub const CELL_COLS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

fn layout(snap: &Snapshot, grid: &Grid) -> Vec<Vec<Cell>> {
    let mut cells = vec![vec![Cell::Empty; grid.width() as usize]; grid.height() as usize];
    let mut put = |p: Point, c: Cell| {
        if grid.is_inside(p) {
            cells[p.y as usize][p.x as usize] = c;
        }
    };
    if let Some(food) = snap.food {
        put(food, Cell::Food);
    }
    for (i, &p) in snap.snake.iter().enumerate().rev() {
        put(p, if i == 0 { Cell::Head } else { Cell::Body });
    }
    cells
}

fn head_glyph(dir: Direction) -> &'static str {
    match dir {
        Direction::Up => "▲▲",
        Direction::Down => "▼▼",
        Direction::Left => "◀◀",
        Direction::Right => "▶▶",
    }
}

/// Board as styled terminal text, one line per grid row.
pub fn render_board(snap: &Snapshot, grid: &Grid) -> Text<'static> {
    let lines: Vec<Line<'static>> = layout(snap, grid)
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|cell| match cell {
                    Cell::Empty => Span::styled("··", Style::default().fg(GRID)),
                    Cell::Head => Span::styled(
                        head_glyph(snap.direction),
                        Style::default().fg(Color::White).bg(HEAD),
                    ),
                    Cell::Body => Span::styled("██", Style::default().fg(BODY)),
                    Cell::Food => Span::styled(
                        "★ ",
                        Style::default().fg(FOOD).add_modifier(Modifier::BOLD),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    Text::from(lines)
}

/// Board in plain characters: `@` head, `o` body, `*` food, `.` empty.
#[cfg(test)]
fn board_to_str(snap: &Snapshot, grid: &Grid) -> String {
    layout(snap, grid)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Head => '@',
                    Cell::Body => 'o',
                    Cell::Food => '*',
                })
                .collect::<String>()
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Message drawn over the board, if the state calls for one.
pub fn overlay(snap: &Snapshot) -> Option<Vec<Line<'static>>> {
    let title = |s: &'static str, c: Color| {
        Line::from(Span::styled(s, Style::default().fg(c).add_modifier(Modifier::BOLD)))
    };
    let plain = |s: String| Line::from(Span::raw(s));

    match snap.state {
        GameState::Running => None,
        GameState::NotStarted => Some(vec![
            title("Y2K SNAKE", FOOD),
            Line::default(),
            Line::from(Span::styled("Press any arrow key to start", Style::default().fg(HEAD))),
            plain("arrows / hjkl / wasd to move".into()),
            plain("space to pause, q to quit".into()),
        ]),
        GameState::Paused => Some(vec![
            title("PAUSED", FOOD),
            Line::default(),
            plain("Press SPACE to continue".into()),
        ]),
        GameState::GameOver => {
            let why = match snap.game_over_reason {
                Some(GameOverReason::Wall) => "hit the wall",
                Some(GameOverReason::SelfHit) => "bit yourself",
                Some(GameOverReason::BoardFull) => "board cleared!",
                None => "",
            };
            Some(vec![
                title("GAME OVER!", HEAD),
                plain(why.into()),
                Line::from(Span::styled(
                    format!("Score: {}", snap.score),
                    Style::default().fg(FOOD),
                )),
                plain(format!("Hi-Score: {}", snap.best_score)),
                Line::default(),
                plain("Press SPACE to play again".into()),
            ])
        }
    }
}

/// Terminal size of the board, borders excluded.
pub fn board_size(grid: &Grid) -> (u16, u16) {
    let cols = (grid.width().max(0) as u16).saturating_mul(CELL_COLS);
    let rows = grid.height().max(0) as u16;
    (cols, rows)
}
