//! Terminal rendering for the altar hub and the puzzle grid.

use crate::app::{App, ScreenState};
use crate::progress::format_time;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;

const CELL_WIDTH: u16 = 4;
const GRID_TOP: u16 = 3;
const GRID_LEFT: u16 = 4;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen {
        ScreenState::AltarSelect => {
            execute!(stdout, Clear(ClearType::All))?;
            render_altar_select(stdout, app)?;
        }
        ScreenState::Playing => {
            execute!(stdout, Clear(ClearType::All))?;
            render_game_screen(stdout, app)?;
        }
        ScreenState::Solved => {
            // Redraws everything each frame; clearing would flicker
            render_game_screen(stdout, app)?;
            render_solved_overlay(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_altar_select(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;

    execute!(
        stdout,
        MoveTo(GRID_LEFT, 1),
        SetForegroundColor(theme.fg),
        Print("STAR BATTLE — choose an altar"),
    )?;

    for (i, level) in app.levels.iter().enumerate() {
        let row = GRID_TOP + 1 + i as u16;
        let solved = app.progress.is_solved(&level.name);
        let marker = if solved { "✓" } else { " " };
        let pointer = if i == app.selection { "▶" } else { " " };

        execute!(
            stdout,
            MoveTo(GRID_LEFT, row),
            SetForegroundColor(if i == app.selection { theme.key } else { theme.fg }),
            Print(format!(
                "{} {} {}  ({}x{})",
                pointer, marker, level.name, level.grid_size, level.grid_size
            )),
        )?;

        if let Some(record) = app.progress.record(&level.name) {
            execute!(
                stdout,
                SetForegroundColor(theme.info),
                Print(format!(
                    "   best {} in {} moves",
                    record
                        .best_time_secs
                        .map(format_time)
                        .unwrap_or_else(|| "--:--".to_string()),
                    record.best_moves.unwrap_or(0)
                )),
            )?;
        }
    }

    execute!(
        stdout,
        MoveTo(GRID_LEFT, GRID_TOP + 3 + app.levels.len() as u16),
        SetForegroundColor(theme.info),
        Print(format!(
            "{}/{} altars solved",
            app.progress.solved_count(),
            app.levels.len()
        )),
        MoveTo(GRID_LEFT, GRID_TOP + 5 + app.levels.len() as u16),
        SetForegroundColor(theme.key),
        Print("↑↓ select   Enter activate   t theme   q quit"),
    )?;

    Ok(())
}

fn render_game_screen(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let Some(session) = app.session.as_ref() else {
        return Ok(());
    };
    let Some(grid) = session.engine().grid() else {
        return Ok(());
    };
    let size = grid.size();

    execute!(
        stdout,
        MoveTo(GRID_LEFT, 1),
        SetForegroundColor(theme.fg),
        Print(&session.level().name),
        SetForegroundColor(theme.info),
        Print(format!(
            "   {}   queens {}/{}   moves {}",
            format_time(session.elapsed().as_secs()),
            session.queens_placed(),
            size,
            session.moves()
        )),
    )?;

    for row in 0..size {
        for col in 0..size {
            let pos = starbattle_core::Position::new(row, col);
            let cell = grid.cell(pos).expect("iterating in bounds");

            let bg = if pos == session.cursor() {
                theme.selected_bg
            } else {
                theme.region_bg(cell.region_id())
            };
            let (glyph, fg) = if cell.has_queen() {
                (" ♛ ", theme.queen)
            } else if cell.is_marked() {
                (" · ", theme.mark)
            } else {
                ("   ", theme.fg)
            };

            execute!(
                stdout,
                MoveTo(GRID_LEFT + col as u16 * CELL_WIDTH, GRID_TOP + row as u16),
                SetBackgroundColor(bg),
                SetForegroundColor(fg),
                Print(glyph),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|"),
            )?;
        }
    }

    let below = GRID_TOP + size as u16 + 1;
    if let Some(ref message) = app.message {
        execute!(
            stdout,
            MoveTo(GRID_LEFT, below),
            SetForegroundColor(theme.error),
            Print(message),
        )?;
    }

    execute!(
        stdout,
        MoveTo(GRID_LEFT, below + 2),
        SetForegroundColor(theme.key),
        Print("arrows move   Space place   x remove   m mark   ? hint   c clear   Esc hub   q quit"),
    )?;

    Ok(())
}

fn render_solved_overlay(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    if let Some(ref confetti) = app.confetti {
        for p in confetti.particles() {
            if p.is_visible(term_width, term_height) {
                execute!(
                    stdout,
                    MoveTo(p.x as u16, p.y as u16),
                    SetForegroundColor(p.color),
                    Print(p.char),
                )?;
            }
        }
    }

    let banner = "★  ALTAR SOLVED  ★";
    let x = (term_width.saturating_sub(banner.len() as u16)) / 2;
    let y = term_height / 2;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.success),
        Print(banner),
    )?;

    if let Some(session) = app.session.as_ref() {
        let stats = format!(
            "{} in {} moves",
            format_time(session.elapsed().as_secs()),
            session.moves()
        );
        let x = (term_width.saturating_sub(stats.len() as u16)) / 2;
        execute!(
            stdout,
            MoveTo(x, y + 2),
            SetForegroundColor(theme.info),
            Print(stats),
        )?;
    }

    let prompt = "Enter: back to the hub";
    let x = (term_width.saturating_sub(prompt.len() as u16)) / 2;
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.key),
        Print(prompt),
    )?;

    Ok(())
}
