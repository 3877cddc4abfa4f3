use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io;
use zip_core::{Cell, Position};

/// Draw the full screen: header, board, status, controls.
pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    execute!(stdout, Hide, Clear(ClearType::All), MoveTo(0, 0))?;

    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("=== ZIP PUZZLE ==="),
        ResetColor
    )?;

    let grid = app.game.grid();
    execute!(
        stdout,
        MoveTo(0, 1),
        Print(format!(
            "Next number: {} / {}    Moves: {}    Seed: {}",
            app.game.next_number().min(grid.max_number()),
            grid.max_number(),
            app.game.moves_made(),
            app.seed
        ))
    )?;

    let top: u16 = 3;
    for row in 0..grid.height() {
        execute!(stdout, MoveTo(0, top + row as u16))?;
        for col in 0..grid.width() {
            let pos = Position::new(row, col);
            if pos == app.game.player() {
                execute!(stdout, SetForegroundColor(Color::Yellow), Print(" @"), ResetColor)?;
            } else if app.game.is_visited(pos) {
                execute!(stdout, SetForegroundColor(Color::Green), Print(" *"), ResetColor)?;
            } else {
                match grid.cell(pos) {
                    Cell::Wall => execute!(stdout, Print(" #"))?,
                    Cell::Empty => execute!(stdout, SetForegroundColor(Color::DarkGrey), Print(" ."), ResetColor)?,
                    Cell::Waypoint(n) => execute!(
                        stdout,
                        SetForegroundColor(Color::Magenta),
                        Print(format!("{:2}", n)),
                        ResetColor
                    )?,
                }
            }
        }
    }

    let status_y = top + grid.height() as u16 + 1;
    if app.game.is_won() {
        execute!(
            stdout,
            MoveTo(0, status_y),
            SetForegroundColor(Color::Green),
            Print("*** SOLVED! ***"),
            ResetColor
        )?;
    }
    if let Some(ref message) = app.message {
        execute!(stdout, MoveTo(0, status_y + 1), Print(message))?;
    }

    execute!(
        stdout,
        MoveTo(0, status_y + 3),
        SetForegroundColor(Color::DarkGrey),
        Print("Arrows/WASD move | U undo | R restart | N new puzzle | Q quit"),
        ResetColor,
        Show
    )?;

    Ok(())
}
