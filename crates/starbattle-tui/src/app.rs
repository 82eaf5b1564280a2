//! Application state and key handling.

use crate::animations::Confetti;
use crate::game::Session;
use crate::progress::ProgressManager;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use starbattle_core::{LevelSpec, PlaceOutcome};
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// The hub: pick an altar to activate
    AltarSelect,
    /// Grid interaction on the active altar
    Playing,
    /// Blocking solved acknowledgment with celebration
    Solved,
}

/// The main application state
pub struct App {
    /// Bundled altar layouts
    pub levels: Vec<LevelSpec>,
    /// Highlighted altar on the select screen
    pub selection: usize,
    /// Active play session, if an altar is activated
    pub session: Option<Session>,
    /// Color theme
    pub theme: Theme,
    theme_index: usize,
    /// Solve history (persisted)
    pub progress: ProgressManager,
    /// Transient message line
    pub message: Option<String>,
    message_timer: u32,
    /// Current screen
    pub screen: ScreenState,
    /// Win celebration
    pub confetti: Option<Confetti>,
}

impl App {
    pub fn new(theme: Theme, theme_index: usize, start_level: Option<usize>) -> Self {
        let levels = LevelSpec::catalog();
        let mut app = Self {
            levels,
            selection: 0,
            session: None,
            theme,
            theme_index,
            progress: ProgressManager::load(),
            message: None,
            message_timer: 0,
            screen: ScreenState::AltarSelect,
            confetti: None,
        };
        if let Some(index) = start_level {
            if index < app.levels.len() {
                app.selection = index;
                app.activate_selected();
            }
        }
        app
    }

    /// How often to tick; faster while the celebration animates
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen {
            ScreenState::Solved => Duration::from_millis(33),
            _ => Duration::from_millis(250),
        }
    }

    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        if let Some(ref mut confetti) = self.confetti {
            confetti.update(50);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen {
            ScreenState::AltarSelect => self.handle_select_key(key),
            ScreenState::Playing => self.handle_playing_key(key),
            ScreenState::Solved => self.handle_solved_key(key),
        }
    }

    fn handle_select_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selection = self.selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selection + 1 < self.levels.len() {
                    self.selection += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> AppAction {
        let Some(session) = self.session.as_mut() else {
            self.screen = ScreenState::AltarSelect;
            return AppAction::Continue;
        };

        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => {
                self.session = None;
                self.screen = ScreenState::AltarSelect;
            }
            KeyCode::Up | KeyCode::Char('k') => session.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => session.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => session.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => session.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.place_at_cursor(),
            KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                if !session.remove() {
                    self.show_message("No queen here");
                }
            }
            KeyCode::Char('m') => session.toggle_mark(),
            KeyCode::Char('c') => {
                session.clear();
                self.show_message("Grid cleared");
            }
            KeyCode::Char('?') => {
                if session.hint().is_some() {
                    self.show_message("Hint: try the highlighted cell");
                } else {
                    self.show_message("No way forward - remove a queen");
                }
            }
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_solved_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Esc => {
                // Back to the hub, pre-selecting the next altar
                if self.selection + 1 < self.levels.len() {
                    self.selection += 1;
                }
                self.session = None;
                self.confetti = None;
                self.screen = ScreenState::AltarSelect;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn activate_selected(&mut self) {
        let level = self.levels[self.selection].clone();
        self.session = Some(Session::new(level, self.selection));
        self.screen = ScreenState::Playing;
        self.message = None;
    }

    fn place_at_cursor(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.place() {
            PlaceOutcome::Placed => {}
            PlaceOutcome::Rejected(reason) => {
                self.show_message(&format!("Cannot place: {}", reason));
            }
            PlaceOutcome::Solved => {
                let secs = session.elapsed().as_secs();
                let moves = session.moves();
                let name = session.level().name.clone();
                self.progress.record_solve(&name, secs, moves);
                self.progress.save();
                self.screen = ScreenState::Solved;
                self.confetti = Some(Confetti::new(120, 50));
            }
        }
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % 3;
        self.theme = match self.theme_index {
            0 => Theme::dark(),
            1 => Theme::light(),
            _ => Theme::high_contrast(),
        };
    }

    fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 12; // ~3 seconds at the playing tick rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn starts_on_altar_select() {
        let app = App::new(Theme::dark(), 0, None);
        assert_eq!(app.screen, ScreenState::AltarSelect);
        assert_eq!(app.levels.len(), 6);
        assert!(app.session.is_none());
    }

    #[test]
    fn enter_activates_the_selected_altar() {
        let mut app = App::new(Theme::dark(), 0, None);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, ScreenState::Playing);
        assert_eq!(app.session.as_ref().unwrap().level_index(), 1);
    }

    #[test]
    fn start_level_flag_skips_the_hub() {
        let app = App::new(Theme::dark(), 0, Some(2));
        assert_eq!(app.screen, ScreenState::Playing);
        assert_eq!(app.session.as_ref().unwrap().level_index(), 2);
    }

    #[test]
    fn escape_returns_to_the_hub() {
        let mut app = App::new(Theme::dark(), 0, Some(0));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen, ScreenState::AltarSelect);
        assert!(app.session.is_none());
    }

    #[test]
    fn rejection_shows_a_message() {
        let mut app = App::new(Theme::dark(), 0, Some(0));
        app.handle_key(key(KeyCode::Enter)); // place at (0,0)
        app.handle_key(key(KeyCode::Enter)); // occupied
        assert!(app.message.as_ref().unwrap().contains("occupied"));
    }

    #[test]
    fn solving_reaches_the_solved_screen() {
        let mut app = App::new(Theme::dark(), 0, Some(0));
        // Altar of Dawn solution: (0,1),(1,3),(2,0),(3,2),(4,4)
        let moves = [
            (KeyCode::Right, true),
            (KeyCode::Down, false),
            (KeyCode::Right, false),
            (KeyCode::Right, true),
            (KeyCode::Down, false),
            (KeyCode::Left, false),
            (KeyCode::Left, false),
            (KeyCode::Left, true),
            (KeyCode::Down, false),
            (KeyCode::Right, false),
            (KeyCode::Right, true),
            (KeyCode::Down, false),
            (KeyCode::Right, false),
            (KeyCode::Right, true),
        ];
        for (code, place) in moves {
            app.handle_key(key(code));
            if place {
                app.handle_key(key(KeyCode::Char(' ')));
            }
        }
        assert_eq!(app.screen, ScreenState::Solved);
        assert!(app.progress.is_solved("Altar of Dawn"));
    }
}
