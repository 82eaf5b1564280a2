//! Canvas rendering for the Star Battle UI

use crate::game::{GameState, ScreenState};
use crate::theme::Theme;
use starbattle_core::Position;
use web_sys::CanvasRenderingContext2d;

/// Render the complete game to canvas
pub fn render_game(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    height: u32,
    cell_size: f64,
    font_size: f64,
) {
    // Clear background
    ctx.set_fill_style_str(&theme.background.as_css());
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

    match state.screen() {
        ScreenState::AltarSelect => {
            render_altar_select(ctx, state, theme, width, font_size);
        }
        ScreenState::Playing => {
            render_grid(ctx, state, theme, cell_size, font_size);
            render_info_panel(ctx, state, theme, cell_size, font_size);
        }
        ScreenState::Solved => {
            render_grid(ctx, state, theme, cell_size, font_size);
            render_solved_overlay(ctx, state, theme, width, height, font_size);
        }
    }
}

/// Pixel origin of the grid
pub fn grid_origin() -> (f64, f64) {
    (40.0, 70.0)
}

/// Map a canvas pixel to a cell, if it falls inside the grid
pub fn cell_at_pixel(state: &GameState, cell_size: f64, x: f64, y: f64) -> Option<(usize, usize)> {
    let size = state.size()?;
    let (gx, gy) = grid_origin();
    if x < gx || y < gy {
        return None;
    }
    let col = ((x - gx) / cell_size) as usize;
    let row = ((y - gy) / cell_size) as usize;
    if row < size && col < size {
        Some((row, col))
    } else {
        None
    }
}

fn render_altar_select(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    font_size: f64,
) {
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!("bold {}px monospace", font_size * 1.2));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    let _ = ctx.fill_text("STAR BATTLE — choose an altar", 40.0, 48.0);

    ctx.set_font(&format!("{}px monospace", font_size));
    let line = font_size * 1.8;
    for (i, level) in state.levels().iter().enumerate() {
        let y = 110.0 + i as f64 * line;
        let selected = i == state.selection();

        if selected {
            ctx.set_fill_style_str(&theme.cursor.as_css_alpha(0.25));
            ctx.fill_rect(30.0, y - line * 0.45, width as f64 - 60.0, line * 0.9);
        }

        let marker = if state.is_altar_solved(&level.name) {
            "✓"
        } else {
            " "
        };
        let color = if selected {
            theme.message_text
        } else {
            theme.info_text
        };
        ctx.set_fill_style_str(&color.as_css());
        let _ = ctx.fill_text(
            &format!(
                "{} {}  ({}x{})",
                marker, level.name, level.grid_size, level.grid_size
            ),
            40.0,
            y,
        );
    }

    ctx.set_fill_style_str(&theme.info_text.as_css());
    ctx.set_font(&format!("{}px monospace", font_size * 0.75));
    let y = 110.0 + state.levels().len() as f64 * line + 40.0;
    let _ = ctx.fill_text("↑↓ select   Enter activate   click to play", 40.0, y);
}

fn render_grid(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    cell_size: f64,
    font_size: f64,
) {
    let Some(grid) = state.engine().grid() else {
        return;
    };
    let size = grid.size();
    let (gx, gy) = grid_origin();

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            let Some(cell) = grid.cell(pos) else { continue };
            let x = gx + col as f64 * cell_size;
            let y = gy + row as f64 * cell_size;

            // Region fill
            ctx.set_fill_style_str(&theme.region_fill(cell.region_id()).as_css());
            ctx.fill_rect(x, y, cell_size, cell_size);

            // Grid line
            ctx.set_stroke_style_str(&theme.grid_lines.as_css());
            ctx.set_line_width(1.0);
            ctx.stroke_rect(x, y, cell_size, cell_size);

            // Contents
            if cell.has_queen() {
                ctx.set_fill_style_str(&theme.queen.as_css());
                ctx.set_font(&format!("{}px serif", font_size * 1.1));
                let _ = ctx.fill_text("♛", x + cell_size / 2.0, y + cell_size / 2.0);
            } else if cell.is_marked() {
                ctx.set_fill_style_str(&theme.mark.as_css());
                ctx.set_font(&format!("{}px monospace", font_size));
                let _ = ctx.fill_text("·", x + cell_size / 2.0, y + cell_size / 2.0);
            }
        }
    }

    // Cursor outline on top
    let cursor = state.cursor();
    ctx.set_stroke_style_str(&theme.cursor.as_css());
    ctx.set_line_width(3.0);
    ctx.stroke_rect(
        gx + cursor.col as f64 * cell_size + 1.5,
        gy + cursor.row as f64 * cell_size + 1.5,
        cell_size - 3.0,
        cell_size - 3.0,
    );
}

fn render_info_panel(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    cell_size: f64,
    font_size: f64,
) {
    let Some(size) = state.size() else { return };
    let (gx, gy) = grid_origin();
    let panel_x = gx + size as f64 * cell_size + 40.0;

    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!("bold {}px monospace", font_size));
    ctx.set_fill_style_str(&theme.title_text.as_css());
    if let Some(level) = state.level() {
        let _ = ctx.fill_text(&level.name, panel_x, gy + 10.0);
    }

    ctx.set_font(&format!("{}px monospace", font_size * 0.8));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let queens = state
        .engine()
        .grid()
        .map(|grid| grid.queen_count())
        .unwrap_or(0);
    let lines = [
        format!("time   {}", state.elapsed_string()),
        format!("queens {}/{}", queens, size),
        format!("moves  {}", state.moves()),
    ];
    for (i, text) in lines.iter().enumerate() {
        let _ = ctx.fill_text(text, panel_x, gy + 50.0 + i as f64 * font_size * 1.4);
    }

    ctx.set_font(&format!("{}px monospace", font_size * 0.65));
    let help = [
        "click/Space  place or remove",
        "right-click/m  mark",
        "?  hint     c  clear",
        "Esc  back to the hub",
    ];
    for (i, text) in help.iter().enumerate() {
        let _ = ctx.fill_text(
            text,
            panel_x,
            gy + 50.0 + 4.0 * font_size * 1.4 + i as f64 * font_size,
        );
    }

    // Transient rejection / hint message under the grid
    if let Some(message) = state.message() {
        ctx.set_font(&format!("{}px monospace", font_size * 0.8));
        ctx.set_fill_style_str(&theme.message_text.as_css());
        let _ = ctx.fill_text(message, gx, gy + size as f64 * cell_size + 30.0);
    }
}

fn render_solved_overlay(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    // Dim the board
    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.75));
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    // Gentle pulse on the banner
    let pulse = 1.0 + 0.08 * ((state.frame() as f64) * 0.1).sin();

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_font(&format!("bold {}px monospace", font_size * 1.8 * pulse));
    ctx.set_fill_style_str(&theme.win_color.as_css());
    let _ = ctx.fill_text("★ ALTAR SOLVED ★", cx, cy - font_size);

    ctx.set_font(&format!("{}px monospace", font_size * 0.9));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text(
        &format!("{} in {} moves", state.elapsed_string(), state.moves()),
        cx,
        cy + font_size,
    );

    ctx.set_fill_style_str(&theme.message_text.as_css());
    let _ = ctx.fill_text("Enter: back to the hub", cx, cy + font_size * 3.0);
}
