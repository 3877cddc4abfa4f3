use zip_core::{Cell, Grid, Position, VisitedMask};

/// A movement direction on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// One undoable step (for the LIFO undo stack).
#[derive(Debug, Clone, Copy)]
struct GameMove {
    /// Where the player stood before the step.
    from: Position,
    /// Expected number before the step.
    next_number: u32,
}

/// Interactive play state over an immutable puzzle grid.
///
/// The grid itself is never mutated; the player position, the next expected
/// waypoint number, and the visitation mask are the only moving parts, so
/// the solver invariants proven at generation time keep holding.
pub struct Game {
    grid: Grid,
    player: Position,
    next_number: u32,
    visited: VisitedMask,
    undo_stack: Vec<GameMove>,
}

impl Game {
    /// Start a game on a puzzle, placing the player on waypoint 1.
    ///
    /// Returns `None` when the grid carries no waypoint 1.
    pub fn new(grid: Grid) -> Option<Self> {
        let start = grid.find_waypoint(1)?;
        let mut visited = VisitedMask::new(grid.height(), grid.width());
        visited.mark(start);

        Some(Self {
            grid,
            player: start,
            next_number: 2,
            visited,
            undo_stack: Vec::new(),
        })
    }

    /// The underlying puzzle grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current player position.
    pub fn player(&self) -> Position {
        self.player
    }

    /// Next waypoint number the player must reach.
    pub fn next_number(&self) -> u32 {
        self.next_number
    }

    /// Whether the player already walked over a cell.
    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.is_visited(pos)
    }

    /// Number of steps taken so far.
    pub fn moves_made(&self) -> usize {
        self.undo_stack.len()
    }

    /// Whether every waypoint has been reached in order.
    pub fn is_won(&self) -> bool {
        self.next_number > self.grid.max_number()
    }

    /// Try to step one cell in a direction.
    ///
    /// A step is legal when the target is on the board, not a wall, not yet
    /// visited, and — if numbered — carries exactly the next expected
    /// number. Returns `false` and changes nothing on an illegal step.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let (dr, dc) = direction.delta();
        let target = match (
            self.player.row.checked_add_signed(dr),
            self.player.col.checked_add_signed(dc),
        ) {
            (Some(row), Some(col)) => Position::new(row, col),
            _ => return false,
        };

        if !self.grid.in_bounds(target) || self.visited.is_visited(target) {
            return false;
        }
        match self.grid.cell(target) {
            Cell::Wall => return false,
            Cell::Waypoint(n) if n != self.next_number => return false,
            _ => {}
        }

        self.undo_stack.push(GameMove {
            from: self.player,
            next_number: self.next_number,
        });

        if matches!(self.grid.cell(target), Cell::Waypoint(_)) {
            self.next_number += 1;
        }
        self.visited.mark(target);
        self.player = target;
        true
    }

    /// Undo the last step. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(game_move) => {
                self.visited.unmark(self.player);
                self.player = game_move.from;
                self.next_number = game_move.next_number;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walled 3x5 corridor: # 1 . 2 #.
    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 5);
        for row in 0..3 {
            for col in 0..5 {
                if row != 1 || col == 0 || col == 4 {
                    grid.set_wall(Position::new(row, col));
                }
            }
        }
        grid.set_waypoint(Position::new(1, 1), 1);
        grid.set_waypoint(Position::new(1, 3), 2);
        grid
    }

    #[test]
    fn test_starts_on_waypoint_one() {
        let game = Game::new(corridor()).unwrap();
        assert_eq!(game.player(), Position::new(1, 1));
        assert_eq!(game.next_number(), 2);
        assert!(game.is_visited(Position::new(1, 1)));
    }

    #[test]
    fn test_no_start_waypoint() {
        let grid = Grid::new(5, 5);
        assert!(Game::new(grid).is_none());
    }

    #[test]
    fn test_walls_and_revisits_block_moves() {
        let mut game = Game::new(corridor()).unwrap();

        assert!(!game.try_move(Direction::Up));
        assert!(!game.try_move(Direction::Left));
        assert!(game.try_move(Direction::Right));
        // Stepping back onto the start cell would revisit it.
        assert!(!game.try_move(Direction::Left));
    }

    #[test]
    fn test_win_after_ordered_walk() {
        let mut game = Game::new(corridor()).unwrap();

        assert!(game.try_move(Direction::Right));
        assert!(!game.is_won());
        assert!(game.try_move(Direction::Right));
        assert!(game.is_won());
        assert_eq!(game.next_number(), 3);
    }

    #[test]
    fn test_out_of_order_waypoint_refused() {
        let mut grid = corridor();
        grid.set_waypoint(Position::new(1, 2), 3);
        let mut game = Game::new(grid).unwrap();

        // The adjacent cell now carries 3 while 2 is expected.
        assert!(!game.try_move(Direction::Right));
    }

    #[test]
    fn test_undo_restores_state() {
        let mut game = Game::new(corridor()).unwrap();

        assert!(!game.undo());

        assert!(game.try_move(Direction::Right));
        assert!(game.try_move(Direction::Right));
        assert_eq!(game.moves_made(), 2);

        assert!(game.undo());
        assert_eq!(game.player(), Position::new(1, 2));
        assert_eq!(game.next_number(), 2);
        assert!(!game.is_visited(Position::new(1, 3)));

        assert!(game.undo());
        assert_eq!(game.player(), Position::new(1, 1));
        assert!(!game.undo());
    }
}
