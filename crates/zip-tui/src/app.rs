use crate::game::{Direction, Game};
use crossterm::event::{KeyCode, KeyEvent};
use zip_core::{GenerateError, GenerationStats, Generator, GeneratorConfig};

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state.
pub struct App {
    /// Current game.
    pub game: Game,
    /// Generation parameters, reused for every new puzzle.
    config: GeneratorConfig,
    /// Base seed of the current puzzle.
    pub seed: u64,
    /// Seed of the attempt that produced the current puzzle. New puzzles
    /// continue past it: the attempt sequence of base `b` overlaps the
    /// sequences of every base below `b + attempts`, so a smaller stride
    /// would replay an already-served board.
    accepted_seed: u64,
    /// Transient status message.
    pub message: Option<String>,
}

impl App {
    /// Generate the first puzzle and start a game on it.
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self, GenerateError> {
        let (game, stats) = Self::new_game(&config, seed)?;
        Ok(Self {
            game,
            config,
            seed,
            accepted_seed: stats.accepted_seed,
            message: None,
        })
    }

    fn new_game(
        config: &GeneratorConfig,
        mut seed: u64,
    ) -> Result<(Game, GenerationStats), GenerateError> {
        loop {
            let (grid, stats) = Generator::with_config(config.clone())
                .seeded(seed)
                .generate_unique_with_stats()?;
            match Game::new(grid) {
                Some(game) => return Ok((game, stats)),
                None => {
                    // Accepted puzzles always carry waypoint 1; a miss is a
                    // generator defect. Log it and keep going on fresh seeds.
                    log::error!(
                        "accepted puzzle missing waypoint 1 (seed {})",
                        stats.accepted_seed
                    );
                    seed = stats.accepted_seed.wrapping_add(1);
                }
            }
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return AppAction::Quit,

            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => self.step(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => self.step(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => self.step(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.step(Direction::Right)
            }

            KeyCode::Char('u') | KeyCode::Char('U') => {
                if !self.game.undo() {
                    self.message = Some("Nothing to undo".into());
                }
            }

            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.next_puzzle(),

            _ => {}
        }

        AppAction::Continue
    }

    fn step(&mut self, direction: Direction) {
        if self.game.is_won() {
            return;
        }
        if !self.game.try_move(direction) {
            self.message = Some("Invalid move".into());
        } else if self.game.is_won() {
            self.message = Some("Solved! Press N for a new puzzle".into());
        }
    }

    /// Replay the current puzzle from the start.
    fn restart(&mut self) {
        if let Some(game) = Game::new(self.game.grid().clone()) {
            self.game = game;
            self.message = Some("Restarted".into());
        }
    }

    /// Generate a fresh puzzle, continuing past the seed the current
    /// puzzle was accepted on.
    fn next_puzzle(&mut self) {
        let seed = self.accepted_seed.wrapping_add(1);
        match Self::new_game(&self.config, seed) {
            Ok((game, stats)) => {
                self.game = game;
                self.seed = seed;
                self.accepted_seed = stats.accepted_seed;
            }
            Err(err) => {
                log::warn!("regeneration failed (seed {}): {}", seed, err);
                self.message = Some(format!("Generation failed: {}", err));
            }
        }
    }
}
