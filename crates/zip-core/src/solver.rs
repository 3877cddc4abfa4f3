//! Solvability and solution-counting searches.
//!
//! Both searches are exhaustive backtracking DFS over an immutable grid,
//! starting at waypoint 1 and visiting waypoints in strictly increasing
//! order. Direction order is fixed: verification wants determinism, so the
//! generator's randomized ordering is deliberately not shared here.

use crate::{Cell, Grid, Position, VisitedMask};

/// Fixed trial order: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Unit struct solver — stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Whether any valid ordered path through all waypoints exists.
    pub fn has_solution(&self, grid: &Grid) -> bool {
        let start = match grid.find_waypoint(1) {
            Some(pos) => pos,
            None => return false,
        };

        let mut visited = VisitedMask::new(grid.height(), grid.width());
        visited.mark(start);
        solve_dfs(grid, &mut visited, start, 2)
    }

    /// Count distinct solution paths, stopping early at `max_solutions`.
    ///
    /// Returns a value in `[0, max_solutions]`; `0` without searching when
    /// the grid has no waypoint 1.
    pub fn count_solutions(&self, grid: &Grid, max_solutions: usize) -> usize {
        if max_solutions == 0 {
            return 0;
        }
        let start = match grid.find_waypoint(1) {
            Some(pos) => pos,
            None => return 0,
        };

        let mut visited = VisitedMask::new(grid.height(), grid.width());
        visited.mark(start);
        let mut count = 0;
        count_dfs(grid, &mut visited, start, 2, &mut count, max_solutions);
        count
    }

    /// Whether the puzzle has exactly one solution.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }
}

/// Step one cell in a direction, or `None` when it leaves the grid.
pub(crate) fn step(grid: &Grid, pos: Position, delta: (isize, isize)) -> Option<Position> {
    let row = pos.row.checked_add_signed(delta.0)?;
    let col = pos.col.checked_add_signed(delta.1)?;
    let next = Position::new(row, col);
    if grid.in_bounds(next) {
        Some(next)
    } else {
        None
    }
}

/// Whether the search may enter `pos` while expecting `next_number`.
fn is_valid_move(grid: &Grid, visited: &VisitedMask, pos: Position, next_number: u32) -> bool {
    if visited.is_visited(pos) {
        return false;
    }
    match grid.cell(pos) {
        Cell::Wall => false,
        Cell::Empty => true,
        Cell::Waypoint(n) => n == next_number,
    }
}

fn solve_dfs(grid: &Grid, visited: &mut VisitedMask, pos: Position, next_number: u32) -> bool {
    if next_number > grid.max_number() {
        return true;
    }

    for delta in DIRECTIONS {
        let next = match step(grid, pos, delta) {
            Some(p) => p,
            None => continue,
        };
        if !is_valid_move(grid, visited, next, next_number) {
            continue;
        }

        let next_next = match grid.cell(next) {
            Cell::Waypoint(_) => next_number + 1,
            _ => next_number,
        };

        visited.mark(next);
        if solve_dfs(grid, visited, next, next_next) {
            return true;
        }
        visited.unmark(next);
    }

    false
}

fn count_dfs(
    grid: &Grid,
    visited: &mut VisitedMask,
    pos: Position,
    next_number: u32,
    count: &mut usize,
    max_solutions: usize,
) {
    if *count >= max_solutions {
        return;
    }

    if next_number > grid.max_number() {
        // Unlike the existence search, record the solution and backtrack
        // to keep enumerating.
        *count += 1;
        return;
    }

    for delta in DIRECTIONS {
        let next = match step(grid, pos, delta) {
            Some(p) => p,
            None => continue,
        };
        if !is_valid_move(grid, visited, next, next_number) {
            continue;
        }

        let next_next = match grid.cell(next) {
            Cell::Waypoint(_) => next_number + 1,
            _ => next_number,
        };

        visited.mark(next);
        count_dfs(grid, visited, next, next_next, count, max_solutions);
        visited.unmark(next);

        if *count >= max_solutions {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5 board, walled border, straight numbered path across the middle
    /// row with the flanking rows walled so no detour exists.
    fn straight_line_grid() -> Grid {
        let mut grid = Grid::new(5, 5);
        for row in 0..5 {
            for col in 0..5 {
                if row != 2 || col == 0 || col == 4 {
                    grid.set_wall(Position::new(row, col));
                }
            }
        }
        for (i, col) in (1..4).enumerate() {
            grid.set_waypoint(Position::new(2, col), (i + 1) as u32);
        }
        grid
    }

    /// 4x5 board with two disjoint valid routes from 1 to 2:
    ///
    /// ```text
    /// # # # # #
    /// # 1 . 2 #
    /// # . . . #
    /// # # # # #
    /// ```
    fn two_path_grid() -> Grid {
        let mut grid = Grid::new(4, 5);
        let open = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)];
        for row in 0..4 {
            for col in 0..5 {
                if !open.contains(&(row, col)) {
                    grid.set_wall(Position::new(row, col));
                }
            }
        }
        grid.set_waypoint(Position::new(1, 1), 1);
        grid.set_waypoint(Position::new(1, 3), 2);
        grid
    }

    #[test]
    fn test_straight_line_is_unique() {
        let grid = straight_line_grid();
        let solver = Solver::new();

        assert!(solver.has_solution(&grid));
        assert_eq!(solver.count_solutions(&grid, 2), 1);
        assert!(solver.has_unique_solution(&grid));
    }

    #[test]
    fn test_two_disjoint_paths_count_two() {
        let grid = two_path_grid();
        let solver = Solver::new();

        assert!(solver.has_solution(&grid));
        assert_eq!(solver.count_solutions(&grid, 2), 2);
        assert!(!solver.has_unique_solution(&grid));
    }

    #[test]
    fn test_count_never_exceeds_bound() {
        let grid = two_path_grid();
        let solver = Solver::new();

        assert_eq!(solver.count_solutions(&grid, 1), 1);
        assert!(solver.count_solutions(&grid, 5) <= 5);
        assert_eq!(solver.count_solutions(&grid, 0), 0);
    }

    #[test]
    fn test_no_waypoint_one() {
        let mut grid = Grid::new(5, 5);
        grid.set_waypoint(Position::new(2, 2), 2);
        let solver = Solver::new();

        assert!(!solver.has_solution(&grid));
        assert_eq!(solver.count_solutions(&grid, 2), 0);
    }

    #[test]
    fn test_wall_blocks_only_route() {
        let mut grid = straight_line_grid();
        grid.set_wall(Position::new(2, 2));
        let solver = Solver::new();

        assert!(!solver.has_solution(&grid));
        assert_eq!(solver.count_solutions(&grid, 2), 0);
    }

    #[test]
    fn test_out_of_order_waypoint_blocks_entry() {
        // 1 3 2 in a walled corridor: reaching 2 means crossing 3 first,
        // which the ordering rule forbids.
        let mut grid = Grid::new(3, 5);
        for row in 0..3 {
            for col in 0..5 {
                if row != 1 || col == 0 || col == 4 {
                    grid.set_wall(Position::new(row, col));
                }
            }
        }
        grid.set_waypoint(Position::new(1, 1), 1);
        grid.set_waypoint(Position::new(1, 2), 3);
        grid.set_waypoint(Position::new(1, 3), 2);

        let solver = Solver::new();
        assert!(!solver.has_solution(&grid));
    }

    #[test]
    fn test_empty_grid_trivially_solved_only_with_start() {
        // max_number 0 with no waypoint 1 is "no puzzle", not "solved".
        let grid = Grid::new(5, 5);
        let solver = Solver::new();
        assert!(!solver.has_solution(&grid));
    }
}
