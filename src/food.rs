use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Grid, Point};

/// Picks food cells uniformly at random among the free cells of a grid.
#[derive(Debug, Clone)]
pub struct FoodPlacer {
    rng: ChaCha8Rng,
}

impl FoodPlacer {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(ChaCha8Rng::from_os_rng())
    }

    /// Returns a free cell, or `None` when `occupied` covers the whole grid.
    ///
    /// Rejection sampling first; on a crowded board it gives up after a bounded
    /// number of draws and picks directly from the remaining free cells, which
    /// keeps the choice uniform and the call finite.
    pub fn place(&mut self, grid: &Grid, occupied: &HashSet<Point>) -> Option<Point> {
        let cells = grid.cell_count();
        if cells == 0 {
            return None;
        }

        let max_attempts = cells.saturating_mul(2).max(8);
        for _ in 0..max_attempts {
            let x = self.rng.random_range(0..grid.width());
            let y = self.rng.random_range(0..grid.height());
            let p = Point::new(x, y);
            if !occupied.contains(&p) {
                return Some(p);
            }
        }

        let free: Vec<Point> = grid.cells().filter(|p| !occupied.contains(p)).collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_lands_on_occupied() {
        let grid = Grid::new(20, 20);
        let occupied: HashSet<Point> = (0..20).map(|x| Point::new(x, 5)).collect();
        let mut placer = FoodPlacer::with_seed(7);
        for _ in 0..500 {
            let p = placer.place(&grid, &occupied).unwrap();
            assert!(grid.is_inside(p));
            assert!(!occupied.contains(&p));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let grid = Grid::new(4, 4);
        let hole = Point::new(2, 3);
        let occupied: HashSet<Point> = grid.cells().filter(|&p| p != hole).collect();
        let mut placer = FoodPlacer::with_seed(1);
        assert_eq!(placer.place(&grid, &occupied), Some(hole));
    }

    #[test]
    fn full_grid_yields_none() {
        let grid = Grid::new(3, 3);
        let occupied: HashSet<Point> = grid.cells().collect();
        let mut placer = FoodPlacer::with_seed(1);
        assert_eq!(placer.place(&grid, &occupied), None);
    }

    #[test]
    fn same_seed_same_sequence() {
        let grid = Grid::new(20, 20);
        let occupied = HashSet::new();
        let mut a = FoodPlacer::with_seed(99);
        let mut b = FoodPlacer::with_seed(99);
        for _ in 0..20 {
            assert_eq!(a.place(&grid, &occupied), b.place(&grid, &occupied));
        }
    }

    #[test]
    fn spreads_over_the_grid() {
        let grid = Grid::new(4, 4);
        let occupied = HashSet::new();
        let mut placer = FoodPlacer::with_seed(3);
        let seen: HashSet<Point> = (0..400)
            .filter_map(|_| placer.place(&grid, &occupied))
            .collect();
        assert_eq!(seen.len(), grid.cell_count());
    }
}
