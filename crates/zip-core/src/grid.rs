use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Contents of a single grid cell.
///
/// A cell is exactly one of empty, wall, or numbered waypoint — a waypoint
/// can never also be a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Walkable empty cell.
    Empty,
    /// Impassable wall.
    Wall,
    /// Numbered waypoint that must be reached in order.
    Waypoint(u32),
}

impl Cell {
    /// Whether this cell is a wall.
    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// The waypoint number, if this cell carries one.
    pub fn waypoint(&self) -> Option<u32> {
        match self {
            Cell::Waypoint(n) => Some(*n),
            _ => None,
        }
    }
}

/// An immutable-once-built puzzle board.
///
/// The generator is the only writer; every search treats the grid as
/// read-only and owns its own [`VisitedMask`], so any number of solver
/// runs may share one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    max_number: u32,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
            max_number: 0,
        }
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Highest waypoint number placed so far (0 when none).
    pub fn max_number(&self) -> u32 {
        self.max_number
    }

    /// Number of cells inside the one-cell border.
    pub fn interior_area(&self) -> usize {
        self.height.saturating_sub(2) * self.width.saturating_sub(2)
    }

    /// Whether a position lies on the grid at all.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Whether a position lies strictly inside the border.
    pub fn in_interior(&self, pos: Position) -> bool {
        pos.row > 0 && pos.row < self.height - 1 && pos.col > 0 && pos.col < self.width - 1
    }

    /// Read a cell. Callers guarantee bounds.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row * self.width + pos.col]
    }

    /// Turn a cell into a wall, clearing any waypoint on it.
    pub fn set_wall(&mut self, pos: Position) {
        self.cells[pos.row * self.width + pos.col] = Cell::Wall;
    }

    /// Place a numbered waypoint, raising `max_number` when needed.
    pub fn set_waypoint(&mut self, pos: Position, number: u32) {
        self.cells[pos.row * self.width + pos.col] = Cell::Waypoint(number);
        if number > self.max_number {
            self.max_number = number;
        }
    }

    /// Locate the cell carrying waypoint `number`, scanning row-major.
    pub fn find_waypoint(&self, number: u32) -> Option<Position> {
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);
                if self.cell(pos).waypoint() == Some(number) {
                    return Some(pos);
                }
            }
        }
        None
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                match self.cell(Position::new(row, col)) {
                    Cell::Wall => write!(f, " #")?,
                    Cell::Empty => write!(f, " .")?,
                    Cell::Waypoint(n) => write!(f, "{:2}", n)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-search visitation tracking.
///
/// Created fresh for each search invocation and discarded afterwards;
/// never shared between concurrent searches over the same grid.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    width: usize,
    visited: Vec<bool>,
}

impl VisitedMask {
    /// Create an all-unvisited mask for a grid of the given size.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            visited: vec![false; height * width],
        }
    }

    /// Whether a position has been visited.
    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited[pos.row * self.width + pos.col]
    }

    /// Mark a position visited.
    pub fn mark(&mut self, pos: Position) {
        self.visited[pos.row * self.width + pos.col] = true;
    }

    /// Unmark a position on backtrack.
    pub fn unmark(&mut self, pos: Position) {
        self.visited[pos.row * self.width + pos.col] = false;
    }
}
