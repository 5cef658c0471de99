use std::collections::{HashSet, VecDeque};

use crate::grid::{Direction, Grid, Point};

/// Breadth-first search from `start` to `target` over the 4-connected grid.
///
/// Cells in `obstacles` are never entered; `start` itself is not checked.
/// Returns the steps of a shortest path, or `None` when the target cannot be
/// reached. Neighbours are expanded in [`Direction::SCAN_ORDER`], so among
/// equally short paths the result is always the same one.
pub fn find_path(
    grid: &Grid,
    start: Point,
    target: Point,
    obstacles: &HashSet<Point>,
) -> Option<Vec<Direction>> {
    if start == target {
        return Some(Vec::new());
    }
    if !grid.in_bounds(start) || !grid.in_bounds(target) {
        return None;
    }

    // Direction used to first reach each cell.
    let mut came_from: Vec<Option<Direction>> = vec![None; grid.cell_count()];
    let mut visited = vec![false; grid.cell_count()];
    visited[grid.index(start)] = true;

    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for dir in Direction::SCAN_ORDER {
            let next = current.step(dir);
            if !grid.in_bounds(next) || obstacles.contains(&next) {
                continue;
            }
            let idx = grid.index(next);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            came_from[idx] = Some(dir);

            if next == target {
                return Some(walk_back(grid, &came_from, start, target));
            }
            queue.push_back(next);
        }
    }
    None
}

fn walk_back(
    grid: &Grid,
    came_from: &[Option<Direction>],
    start: Point,
    target: Point,
) -> Vec<Direction> {
    let mut steps = Vec::new();
    let mut at = target;
    while at != start {
        let Some(dir) = came_from[grid.index(at)] else {
            break;
        };
        steps.push(dir);
        at = at.step(dir.opposite());
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow(start: Point, path: &[Direction]) -> Point {
        path.iter().fold(start, |p, &d| p.step(d))
    }

    #[test]
    fn straight_line() {
        let grid = Grid::new(10, 10).unwrap();
        let path = find_path(&grid, Point::new(7, 5), Point::new(5, 5), &HashSet::new()).unwrap();
        assert_eq!(path, vec![Direction::Left, Direction::Left]);
    }

    #[test]
    fn ties_follow_scan_order() {
        // Down comes before Right in the scan, so the path goes down first.
        let grid = Grid::new(5, 5).unwrap();
        let path = find_path(&grid, Point::new(0, 0), Point::new(2, 2), &HashSet::new()).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], Direction::Down);
        assert_eq!(follow(Point::new(0, 0), &path), Point::new(2, 2));
    }

    #[test]
    fn routes_around_a_wall() {
        let grid = Grid::new(5, 5).unwrap();
        // Vertical wall at x = 2 with a gap at the bottom.
        let wall: HashSet<Point> = (0..4).map(|y| Point::new(2, y)).collect();
        let path = find_path(&grid, Point::new(0, 0), Point::new(4, 0), &wall).unwrap();
        assert_eq!(path.len(), 12);
        let mut p = Point::new(0, 0);
        for d in &path {
            p = p.step(*d);
            assert!(!wall.contains(&p));
        }
        assert_eq!(p, Point::new(4, 0));
    }

    #[test]
    fn enclosed_target_is_not_found() {
        let grid = Grid::new(6, 6).unwrap();
        let ring: HashSet<Point> = [
            Point::new(3, 2),
            Point::new(5, 2),
            Point::new(4, 1),
            Point::new(4, 3),
        ]
        .into();
        assert_eq!(find_path(&grid, Point::new(0, 0), Point::new(4, 2), &ring), None);
    }

    #[test]
    fn occupied_target_is_not_found() {
        let grid = Grid::new(6, 6).unwrap();
        let obstacles: HashSet<Point> = [Point::new(3, 3)].into();
        assert_eq!(
            find_path(&grid, Point::new(0, 0), Point::new(3, 3), &obstacles),
            None
        );
    }

    #[test]
    fn start_on_target_is_empty_path() {
        let grid = Grid::new(3, 3).unwrap();
        let p = Point::new(1, 1);
        assert_eq!(find_path(&grid, p, p, &HashSet::new()), Some(vec![]));
    }
}
