//! Unique-solution puzzle generation.
//!
//! Path-first pipeline: carve one random simple path through the interior,
//! stamp sequential waypoints along it, scatter walls off-path, then accept
//! the board only if the counting solver proves the solution unique. Each
//! attempt runs on its own deterministic seed so retries are reproducible.

use crate::{Cell, Grid, Position, Solver};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Per-attempt cap on path-carving tries before the attempt is abandoned.
const MAX_CARVE_TRIES: usize = 10;

/// Why generation produced no puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerateError {
    /// Rows/cols below 5, `path_ratio` outside (0, 1], or `wall_ratio`
    /// outside [0, 1]. Rejected before any attempt runs.
    InvalidParams,
    /// No uniquely-solvable puzzle within the attempt budget.
    AttemptsExhausted,
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidParams => write!(f, "invalid generation parameters"),
            GenerateError::AttemptsExhausted => {
                write!(f, "no unique puzzle found within the attempt budget")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Attempt accounting for a successful generation.
///
/// `accepted_seed` is the per-attempt seed the accepted board came from;
/// restarting a seed sequence at any earlier value replays boards already
/// served, so callers continuing a sequence must advance past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Attempts consumed, including the accepted one.
    pub attempts: usize,
    /// Seed of the accepted attempt (`base_seed + attempts - 1`).
    pub accepted_seed: u64,
}

/// Configuration for puzzle generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Board height including the walled border.
    pub rows: usize,
    /// Board width including the walled border.
    pub cols: usize,
    /// Fraction of the interior the carved path should cover, in (0, 1].
    pub path_ratio: f32,
    /// Probability that an off-path interior cell becomes a wall, in [0, 1].
    pub wall_ratio: f32,
    /// Attempt budget before giving up; 0 means unlimited.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            path_ratio: 0.4,
            wall_ratio: 0.35,
            max_attempts: 100,
        }
    }
}

impl GeneratorConfig {
    /// Whether the parameters are inside the supported ranges.
    pub fn is_valid(&self) -> bool {
        self.rows >= 5
            && self.cols >= 5
            && self.path_ratio > 0.0
            && self.path_ratio <= 1.0
            && (0.0..=1.0).contains(&self.wall_ratio)
    }

    /// Target path length: `max(3, round(interior_area * path_ratio))`.
    pub fn target_length(&self) -> usize {
        let interior = (self.rows - 2) * (self.cols - 2);
        ((interior as f32 * self.path_ratio).round() as usize).max(3)
    }
}

/// Zip puzzle generator.
pub struct Generator {
    config: GeneratorConfig,
    base_seed: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator with default configuration and a random seed.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            base_seed: entropy_seed(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            base_seed: seed,
        }
    }

    /// Create a generator with custom configuration and a random seed.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            base_seed: entropy_seed(),
        }
    }

    /// Set the base seed, returning the generator for chaining.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Generate a puzzle with a provably unique solution.
    ///
    /// Attempt `k` seeds its RNG with `base_seed + k`, so identical
    /// configuration and seed reproduce an identical board. Candidate
    /// boards whose solution count is not exactly 1 are discarded and the
    /// next seed is tried.
    pub fn generate_unique(&self) -> Result<Grid, GenerateError> {
        self.generate_unique_with_stats().map(|(grid, _)| grid)
    }

    /// Like [`Generator::generate_unique`], also reporting which attempt
    /// was accepted so callers can continue the seed sequence past it.
    pub fn generate_unique_with_stats(
        &self,
    ) -> Result<(Grid, GenerationStats), GenerateError> {
        if !self.config.is_valid() {
            return Err(GenerateError::InvalidParams);
        }

        let solver = Solver::new();
        let mut attempt: usize = 0;

        while self.config.max_attempts == 0 || attempt < self.config.max_attempts {
            let seed = self.base_seed.wrapping_add(attempt as u64);
            attempt += 1;

            let mut rng = SimpleRng::with_seed(seed);
            let grid = match self.construct_candidate(&mut rng) {
                Some(grid) => grid,
                None => {
                    // Path carving exhausted its tries; legitimate outcome,
                    // not an error. Move on to the next seed.
                    debug!("attempt {}: no path of target length (seed {})", attempt, seed);
                    continue;
                }
            };

            match solver.count_solutions(&grid, 2) {
                1 => {
                    debug!("attempt {}: unique puzzle accepted (seed {})", attempt, seed);
                    return Ok((
                        grid,
                        GenerationStats {
                            attempts: attempt,
                            accepted_seed: seed,
                        },
                    ));
                }
                0 => {
                    // The carved path is always left open, so a zero count
                    // signals a latent generator defect.
                    warn!("attempt {}: generated unsolvable puzzle (seed {})", attempt, seed);
                }
                _ => {
                    debug!("attempt {}: ambiguous puzzle rejected (seed {})", attempt, seed);
                }
            }
        }

        Err(GenerateError::AttemptsExhausted)
    }

    /// Build one candidate board: borders, carved path, waypoints, walls.
    fn construct_candidate(&self, rng: &mut SimpleRng) -> Option<Grid> {
        let (rows, cols) = (self.config.rows, self.config.cols);
        let mut grid = Grid::new(rows, cols);

        for col in 0..cols {
            grid.set_wall(Position::new(0, col));
            grid.set_wall(Position::new(rows - 1, col));
        }
        for row in 0..rows {
            grid.set_wall(Position::new(row, 0));
            grid.set_wall(Position::new(row, cols - 1));
        }

        let path = carve_path(&grid, self.config.target_length(), rng)?;

        for (i, &pos) in path.iter().enumerate() {
            grid.set_waypoint(pos, (i + 1) as u32);
        }

        // Walls only land off-path, so the carved solution stays open.
        for row in 1..rows - 1 {
            for col in 1..cols - 1 {
                let pos = Position::new(row, col);
                if grid.cell(pos) == Cell::Empty && rng.next_f32() < self.config.wall_ratio {
                    grid.set_wall(pos);
                }
            }
        }

        Some(grid)
    }
}

/// Carve a random simple path of exactly `target_length` cells through the
/// grid interior. Each of the up-to-10 tries starts over with a fresh
/// visited mask, a fresh path, and a fresh random start cell.
fn carve_path(grid: &Grid, target_length: usize, rng: &mut SimpleRng) -> Option<Vec<Position>> {
    for _ in 0..MAX_CARVE_TRIES {
        let mut visited = vec![false; grid.height() * grid.width()];
        let mut path = Vec::with_capacity(target_length);

        let start = Position::new(
            1 + rng.next_usize(grid.height() - 2),
            1 + rng.next_usize(grid.width() - 2),
        );

        if carve_dfs(grid, start, target_length, &mut visited, &mut path, rng) {
            return Some(path);
        }
    }
    None
}

/// Randomized DFS step. The cell is appended on entry and popped (and
/// unmarked) when every shuffled direction dead-ends, so the accumulated
/// path is always a simple connected path and the length target is exact.
fn carve_dfs(
    grid: &Grid,
    pos: Position,
    target_length: usize,
    visited: &mut [bool],
    path: &mut Vec<Position>,
    rng: &mut SimpleRng,
) -> bool {
    visited[pos.row * grid.width() + pos.col] = true;
    path.push(pos);

    if path.len() >= target_length {
        return true;
    }

    let mut directions: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    rng.shuffle(&mut directions);

    for delta in directions {
        let next = match crate::solver::step(grid, pos, delta) {
            Some(p) => p,
            None => continue,
        };
        if !grid.in_interior(next) || visited[next.row * grid.width() + next.col] {
            continue;
        }
        if carve_dfs(grid, next, target_length, visited, path, rng) {
            return true;
        }
    }

    visited[pos.row * grid.width() + pos.col] = false;
    path.pop();
    false
}

/// Convenience wrapper matching the pipeline entry point signature.
pub fn generate_unique(
    rows: usize,
    cols: usize,
    path_ratio: f32,
    wall_ratio: f32,
    seed: u64,
    max_attempts: usize,
) -> Result<Grid, GenerateError> {
    Generator::with_config(GeneratorConfig {
        rows,
        cols,
        path_ratio,
        wall_ratio,
        max_attempts,
    })
    .seeded(seed)
    .generate_unique()
}

/// Draw a seed from system entropy, falling back to a process-local counter.
fn entropy_seed() -> u64 {
    let mut seed_bytes = [0u8; 8];
    getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
        static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
        let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        seed_bytes = counter.to_le_bytes();
    });
    u64::from_le_bytes(seed_bytes)
}

/// Simple seedable PRNG (PCG-style) so seeded generation stays stable
/// across toolchain and dependency versions.
pub(crate) struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    /// Uniform float in [0, 1).
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() & 0xFF_FFFF) as f32 / (1 << 24) as f32
    }

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_puzzle_is_unique() {
        // Unlimited attempt budget: rejection of ambiguous candidates is
        // expected along the way, acceptance is what matters.
        let puzzle = generate_unique(8, 8, 0.4, 0.45, 42, 0).unwrap();
        let solver = Solver::new();

        assert!(solver.has_solution(&puzzle));
        assert_eq!(solver.count_solutions(&puzzle, 2), 1);
    }

    #[test]
    fn test_determinism() {
        let a = generate_unique(9, 9, 0.35, 0.45, 7, 0).unwrap();
        let b = generate_unique(9, 9, 0.35, 0.45, 7, 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_waypoint_numbering_is_contiguous() {
        let puzzle = generate_unique(8, 10, 0.4, 0.45, 11, 0).unwrap();
        assert!(puzzle.max_number() >= 3);

        let mut prev = puzzle.find_waypoint(1).expect("waypoint 1 must exist");
        for n in 2..=puzzle.max_number() {
            let pos = puzzle
                .find_waypoint(n)
                .unwrap_or_else(|| panic!("waypoint {} missing", n));
            // Consecutive waypoints are stamped along the carved path, so
            // they sit on orthogonally adjacent cells.
            let dr = prev.row.abs_diff(pos.row);
            let dc = prev.col.abs_diff(pos.col);
            assert_eq!(dr + dc, 1, "waypoints {} and {} not adjacent", n - 1, n);
            prev = pos;
        }
    }

    #[test]
    fn test_rows_below_minimum_rejected() {
        assert_eq!(
            generate_unique(4, 10, 0.4, 0.2, 1, 10),
            Err(GenerateError::InvalidParams)
        );
    }

    #[test]
    fn test_bad_ratios_rejected() {
        assert_eq!(
            generate_unique(8, 8, 0.0, 0.2, 1, 10),
            Err(GenerateError::InvalidParams)
        );
        assert_eq!(
            generate_unique(8, 8, 1.5, 0.2, 1, 10),
            Err(GenerateError::InvalidParams)
        );
        assert_eq!(
            generate_unique(8, 8, 0.4, 1.5, 1, 10),
            Err(GenerateError::InvalidParams)
        );
    }

    #[test]
    fn test_full_coverage_path_is_unique_without_walls() {
        // path_ratio 1.0 fills the whole interior; with no scattered walls
        // the numbered path itself is the only route.
        let puzzle = generate_unique(6, 6, 1.0, 0.0, 3, 10).unwrap();
        let solver = Solver::new();

        assert_eq!(puzzle.max_number() as usize, puzzle.interior_area());
        assert_eq!(solver.count_solutions(&puzzle, 2), 1);
    }

    #[test]
    fn test_target_length_floor() {
        let config = GeneratorConfig {
            rows: 5,
            cols: 5,
            path_ratio: 0.01,
            wall_ratio: 0.0,
            max_attempts: 10,
        };
        assert_eq!(config.target_length(), 3);
    }

    #[test]
    fn test_accepted_seed_replays_the_same_board() {
        let config = GeneratorConfig {
            rows: 8,
            cols: 8,
            path_ratio: 0.4,
            wall_ratio: 0.45,
            max_attempts: 0,
        };

        let (grid, stats) = Generator::with_config(config.clone())
            .seeded(0)
            .generate_unique_with_stats()
            .unwrap();
        assert!(stats.attempts >= 1);
        assert_eq!(stats.accepted_seed, (stats.attempts - 1) as u64);

        // Restarting the sequence at the accepted seed replays the
        // identical board on the first attempt, which is why callers
        // continuing a seed sequence must advance past `accepted_seed`
        // rather than just bumping their base by one.
        let (replay, replay_stats) = Generator::with_config(config)
            .seeded(stats.accepted_seed)
            .generate_unique_with_stats()
            .unwrap();
        assert_eq!(grid, replay);
        assert_eq!(replay_stats.attempts, 1);
        assert_eq!(replay_stats.accepted_seed, stats.accepted_seed);
    }

    #[test]
    fn test_seeds_differ() {
        let a = generate_unique(8, 8, 0.4, 0.45, 100, 0).unwrap();
        let b = generate_unique(8, 8, 0.4, 0.45, 200, 0).unwrap();
        // Different base seeds should explore different boards. Not a hard
        // guarantee, but with these parameters a collision means the seed
        // plumbing broke.
        assert_ne!(a, b);
    }
}
