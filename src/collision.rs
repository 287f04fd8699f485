use crate::grid::{Grid, Point};
use crate::snake::SnakeBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    Ok,
    WallHit,
    SelfHit,
}

/// Checks a candidate head against the walls, then against the body.
///
/// When `grow` is false the tail cell is about to be vacated and is not a
/// collision target.
pub fn check(candidate: Point, grid: &Grid, body: &SnakeBody, grow: bool) -> CollisionResult {
    if !grid.is_inside(candidate) {
        return CollisionResult::WallHit;
    }
    if body.contains(candidate) && (grow || candidate != body.tail()) {
        return CollisionResult::SelfHit;
    }
    CollisionResult::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn loop_body() -> SnakeBody {
        // Head at (5,5); tail at (6,5) right next to it.
        SnakeBody::from_cells([
            Point::new(5, 5),
            Point::new(5, 6),
            Point::new(6, 6),
            Point::new(6, 5),
        ])
    }

    #[test]
    fn free_cell_is_ok() {
        let grid = Grid::new(20, 20);
        let body = SnakeBody::new(Point::new(5, 5), Direction::Right, 1);
        assert_eq!(check(Point::new(6, 5), &grid, &body, false), CollisionResult::Ok);
    }

    #[test]
    fn outside_is_wall_hit() {
        let grid = Grid::new(20, 20);
        let body = SnakeBody::new(Point::new(19, 5), Direction::Right, 1);
        assert_eq!(check(Point::new(20, 5), &grid, &body, false), CollisionResult::WallHit);
        assert_eq!(check(Point::new(5, -1), &grid, &body, false), CollisionResult::WallHit);
    }

    #[test]
    fn wall_checked_before_body() {
        // A cell that is both outside and (artificially) in the body reports the wall.
        let grid = Grid::new(5, 5);
        let body = SnakeBody::from_cells([Point::new(4, 0), Point::new(5, 0), Point::new(6, 0)]);
        assert_eq!(check(Point::new(5, 0), &grid, &body, false), CollisionResult::WallHit);
    }

    #[test]
    fn tail_cell_is_free_when_shrinking() {
        let grid = Grid::new(20, 20);
        assert_eq!(check(Point::new(6, 5), &grid, &loop_body(), false), CollisionResult::Ok);
    }

    #[test]
    fn tail_cell_blocks_when_growing() {
        let grid = Grid::new(20, 20);
        assert_eq!(check(Point::new(6, 5), &grid, &loop_body(), true), CollisionResult::SelfHit);
    }

    #[test]
    fn body_cell_is_self_hit() {
        let grid = Grid::new(20, 20);
        assert_eq!(check(Point::new(6, 6), &grid, &loop_body(), false), CollisionResult::SelfHit);
        assert_eq!(check(Point::new(5, 6), &grid, &loop_body(), false), CollisionResult::SelfHit);
    }
}
