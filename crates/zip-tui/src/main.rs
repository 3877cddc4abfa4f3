mod app;
mod game;
mod render;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::Rng;
use std::io::{self, Write};
use zip_core::GeneratorConfig;

/// Zip puzzle: reach the numbered waypoints in order without revisiting a cell.
#[derive(Parser, Debug)]
#[command(name = "zip", version, about)]
struct Args {
    /// Board height including the border
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Board width including the border
    #[arg(long, default_value_t = 10)]
    cols: usize,

    /// Fraction of the interior covered by the solution path, in (0, 1]
    #[arg(long, default_value_t = 0.4)]
    path_ratio: f32,

    /// Probability that an off-path cell becomes a wall, in [0, 1]
    #[arg(long, default_value_t = 0.35)]
    wall_ratio: f32,

    /// Base seed for reproducible puzzles (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Generation attempt budget (0 = unlimited)
    #[arg(long, default_value_t = 100)]
    max_attempts: usize,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = GeneratorConfig {
        rows: args.rows,
        cols: args.cols,
        path_ratio: args.path_ratio,
        wall_ratio: args.wall_ratio,
        max_attempts: args.max_attempts,
    };
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    // Generate before touching the terminal so failures print normally.
    let mut app = match App::new(config, seed) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    loop {
        render::render(stdout, app)?;
        stdout.flush()?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Handle Ctrl+C
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                break;
            }

            match app.handle_key(key) {
                AppAction::Continue => {}
                AppAction::Quit => break,
            }
        }
    }

    Ok(())
}
