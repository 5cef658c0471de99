use std::collections::HashSet;
use std::time::Duration;

use rand::RngCore;

use crate::grid::{Grid, Point};

/// Value of the fruit that is always on the board.
pub const ORDINARY_POINTS: u32 = 1;

/// A fruit that replaces the current one once per episode when play time
/// reaches `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialFruit {
    pub at: Duration,
    pub points: u32,
}

pub const SPECIAL_FRUITS: [SpecialFruit; 3] = [
    SpecialFruit {
        at: Duration::from_secs(30),
        points: 3,
    },
    SpecialFruit {
        at: Duration::from_secs(60),
        points: 5,
    },
    SpecialFruit {
        at: Duration::from_secs(90),
        points: 10,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fruit {
    pub position: Point,
    pub points: u32,
    /// Play time at which this fruit appeared.
    pub spawned_at: Duration,
}

impl Fruit {
    /// Places a new fruit, steering clear of `occupied` on a best-effort
    /// basis (see [`place`]).
    pub fn spawn(
        grid: &Grid,
        occupied: &HashSet<Point>,
        attempts: u32,
        points: u32,
        spawned_at: Duration,
        rng: &mut dyn RngCore,
    ) -> Self {
        Self {
            position: place(grid, occupied, attempts, rng),
            points,
            spawned_at,
        }
    }
}

/// Picks a uniformly random cell. A cell in `occupied` is redrawn up to
/// `attempts` times; after that the last draw is accepted even if taken.
pub fn place(
    grid: &Grid,
    occupied: &HashSet<Point>,
    attempts: u32,
    rng: &mut dyn RngCore,
) -> Point {
    let mut candidate = grid.random_cell(rng);
    let mut tries = 0;
    while occupied.contains(&candidate) && tries < attempts {
        candidate = grid.random_cell(rng);
        tries += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn avoids_occupied_cells_when_possible() {
        let grid = Grid::new(3, 1).unwrap();
        let occupied: HashSet<Point> = [Point::new(0, 0), Point::new(1, 0)].into();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(place(&grid, &occupied, 200, &mut rng), Point::new(2, 0));
        }
    }

    #[test]
    fn accepts_occupied_cell_once_attempts_run_out() {
        let grid = Grid::new(2, 1).unwrap();
        let occupied: HashSet<Point> = [Point::new(0, 0), Point::new(1, 0)].into();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let p = place(&grid, &occupied, 10, &mut rng);
        assert!(occupied.contains(&p));
    }

    #[test]
    fn draws_exactly_one_cell_plus_each_retry() {
        let grid = Grid::new(4, 4).unwrap();
        let occupied: HashSet<Point> = (0..4)
            .flat_map(|x| (0..4).map(move |y| Point::new(x, y)))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut replay = rng.clone();

        let p = place(&grid, &occupied, 10, &mut rng);

        let draws: Vec<Point> = (0..11).map(|_| grid.random_cell(&mut replay)).collect();
        assert_eq!(p, draws[10]);
        // Nothing beyond the eleventh draw was consumed.
        assert_eq!(rng.next_u64(), replay.next_u64());
    }

    #[test]
    fn stops_drawing_at_the_first_free_cell() {
        let grid = Grid::new(4, 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut replay = rng.clone();

        let p = place(&grid, &HashSet::new(), 10, &mut rng);

        assert_eq!(p, grid.random_cell(&mut replay));
        assert_eq!(rng.next_u64(), replay.next_u64());
    }

    #[test]
    fn spawn_keeps_points_and_time() {
        let grid = Grid::new(5, 5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let f = Fruit::spawn(
            &grid,
            &HashSet::new(),
            10,
            5,
            Duration::from_secs(60),
            &mut rng,
        );
        assert_eq!(f.points, 5);
        assert_eq!(f.spawned_at, Duration::from_secs(60));
        assert!(grid.in_bounds(f.position));
    }

    #[test]
    fn special_marks_escalate() {
        let points: Vec<u32> = SPECIAL_FRUITS.iter().map(|s| s.points).collect();
        assert_eq!(points, vec![3, 5, 10]);
        assert!(SPECIAL_FRUITS.windows(2).all(|w| w[0].at < w[1].at));
    }
}
