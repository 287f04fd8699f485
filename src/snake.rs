use std::collections::{HashSet, VecDeque};

use crate::grid::{Direction, Point};

/// The snake's cells, head first. Owns its sequence; `advance` is the only mutator.
#[derive(Debug, Clone)]
pub struct SnakeBody {
    cells: VecDeque<Point>,
    // Mirror of `cells` for O(1) membership checks.
    occupied: HashSet<Point>,
}

impl SnakeBody {
    /// Lays out `len` cells starting at `head` and trailing away from `heading`.
    pub fn new(head: Point, heading: Direction, len: usize) -> Self {
        let behind = heading.opposite();
        let mut cell = head;
        let mut cells = Vec::with_capacity(len.max(1));
        for _ in 0..len.max(1) {
            cells.push(cell);
            cell = cell.step(behind);
        }
        Self::from_cells(cells)
    }

    /// Builds a body from explicit cells, head first. `cells` must be non-empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Point>) -> Self {
        let cells: VecDeque<Point> = cells.into_iter().collect();
        assert!(!cells.is_empty(), "snake needs at least one cell");
        let occupied = cells.iter().copied().collect();
        Self { cells, occupied }
    }

    pub fn head(&self) -> Point {
        *self.cells.front().expect("snake is non-empty")
    }

    pub fn tail(&self) -> Point {
        *self.cells.back().expect("snake is non-empty")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.occupied.contains(&p)
    }

    pub fn occupied(&self) -> &HashSet<Point> {
        &self.occupied
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.cells.iter()
    }

    /// Where the head would go next; does not move the snake.
    pub fn propose_move(&self, dir: Direction) -> Point {
        self.head().step(dir)
    }

    /// Pushes `new_head` to the front. Without `grow` the tail cell is dropped.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        if !grow {
            if let Some(tail) = self.cells.pop_back() {
                self.occupied.remove(&tail);
            }
        }
        self.cells.push_front(new_head);
        self.occupied.insert(new_head);
    }
}
