mod animations;
mod app;
mod game;
mod progress;
mod render;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use starbattle_core::LevelSpec;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use theme::Theme;

/// Star Battle puzzles in the terminal
#[derive(Parser)]
#[command(name = "starbattle", version, about)]
struct Args {
    /// Jump straight into altar N (1-based), skipping the hub
    #[arg(short, long)]
    level: Option<usize>,

    /// List the bundled altars and exit
    #[arg(long)]
    list: bool,

    /// Color theme: dark, light, or contrast
    #[arg(short, long, default_value = "dark")]
    theme: String,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.list {
        for (i, level) in LevelSpec::catalog().iter().enumerate() {
            println!(
                "{}. {} ({}x{})",
                i + 1,
                level.name,
                level.grid_size,
                level.grid_size
            );
        }
        return Ok(());
    }

    let (theme, theme_index) = match args.theme.as_str() {
        "light" => (Theme::light(), 1),
        "contrast" => (Theme::high_contrast(), 2),
        _ => (Theme::dark(), 0),
    };
    let start_level = args.level.map(|n| n.saturating_sub(1));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, App::new(theme, theme_index, start_level));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &mut app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        // Tick the message timer and celebration
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
