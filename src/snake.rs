use std::collections::VecDeque;

use crate::grid::{Direction, Grid, Point};

/// Who steers a snake. Only the front end cares (colours, labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Ai,
}

#[derive(Debug, Clone)]
pub struct Snake {
    role: Role,
    /// Head at the front, tail at the back.
    body: VecDeque<Point>,
    heading: Direction,
    growth_pending: bool,
    score: u32,
}

impl Snake {
    /// A fresh length-1 snake.
    pub fn new(role: Role, head: Point, heading: Direction) -> Self {
        Self::from_body(role, [head], heading)
    }

    /// Builds a snake from explicit segments, head first.
    ///
    /// # Panics
    ///
    /// If `segments` is empty.
    pub fn from_body(
        role: Role,
        segments: impl IntoIterator<Item = Point>,
        heading: Direction,
    ) -> Self {
        let body: VecDeque<Point> = segments.into_iter().collect();
        assert!(!body.is_empty(), "snake needs at least one segment");
        Self {
            role,
            body,
            heading,
            growth_pending: false,
            score: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake is non-empty")
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    /// Turns the snake unless `dir` would reverse it onto its own neck.
    pub fn change_heading(&mut self, dir: Direction) {
        if !dir.is_opposite(self.heading) {
            self.heading = dir;
        }
    }

    pub fn grow(&mut self) {
        self.growth_pending = true;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Moves one cell along the heading. Returns `false` when the snake hits
    /// a wall or its own body; the body is left untouched in that case.
    ///
    /// The collision check runs against the whole pre-move body, tail
    /// included, even though the tail would move off this tick.
    pub fn advance(&mut self, grid: &Grid) -> bool {
        let next = self.head().step(self.heading);
        if !grid.in_bounds(next) || self.body.contains(&next) {
            return false;
        }

        self.body.push_front(next);
        if self.growth_pending {
            self.growth_pending = false;
        } else {
            self.body.pop_back();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10, 8).unwrap()
    }

    #[test]
    fn head_moves_along_heading() {
        let mut s = Snake::new(Role::Player, Point::new(2, 2), Direction::Right);
        assert!(s.advance(&grid()));
        assert_eq!(s.head(), Point::new(3, 2));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn change_heading_blocks_180() {
        let mut s = Snake::new(Role::Player, Point::new(2, 2), Direction::Right);
        s.change_heading(Direction::Left);
        assert_eq!(s.heading(), Direction::Right);
        s.change_heading(Direction::Left);
        assert_eq!(s.heading(), Direction::Right);
        s.change_heading(Direction::Up);
        assert_eq!(s.heading(), Direction::Up);
    }

    #[test]
    fn growth_is_deferred_to_next_move() {
        let mut s = Snake::new(Role::Ai, Point::new(2, 2), Direction::Down);
        s.grow();
        assert_eq!(s.len(), 1, "grow alone does not lengthen");
        assert!(s.advance(&grid()));
        assert_eq!(s.len(), 2);
        assert!(!s.growth_pending());
        assert!(s.advance(&grid()));
        assert_eq!(s.len(), 2, "no pending growth keeps length");
        assert_eq!(
            s.segments().copied().collect::<Vec<_>>(),
            vec![Point::new(2, 4), Point::new(2, 3)]
        );
    }

    #[test]
    fn wall_collision_kills() {
        let mut s = Snake::new(Role::Player, Point::new(9, 1), Direction::Right);
        assert!(!s.advance(&grid()));
        assert_eq!(s.head(), Point::new(9, 1), "failed move is not committed");
    }

    #[test]
    fn self_collision_kills() {
        // Head at (2,2) facing up into its own segment.
        let mut s = Snake::from_body(
            Role::Player,
            [
                Point::new(2, 2),
                Point::new(3, 2),
                Point::new(3, 1),
                Point::new(2, 1),
            ],
            Direction::Up,
        );
        assert!(!s.advance(&grid()));
    }

    #[test]
    fn tail_cell_still_counts_as_occupied() {
        // A 2x2 loop: the next cell is the tail, which would vacate this tick.
        let mut s = Snake::from_body(
            Role::Player,
            [
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(3, 2),
            ],
            Direction::Right,
        );
        assert!(!s.advance(&grid()));
    }

    #[test]
    fn scores_accumulate() {
        let mut s = Snake::new(Role::Ai, Point::new(0, 0), Direction::Right);
        s.add_score(3);
        s.add_score(10);
        assert_eq!(s.score(), 13);
    }
}
