//! Game state management for the WASM Star Battle frontend

use serde::{Deserialize, Serialize};
use starbattle_core::{LevelSpec, PlaceOutcome, Position, PuzzleEngine, Solver};

/// Screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenState {
    /// The hub: pick an altar to activate
    AltarSelect,
    Playing,
    Solved,
}

/// Serializable game state for save/load (localStorage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableState {
    pub selection: usize,
    pub level_index: Option<usize>,
    pub screen: ScreenState,
    pub queens: Vec<(usize, usize)>,
    pub marks: Vec<(usize, usize)>,
    pub solved_altars: Vec<String>,
    pub elapsed_secs: u32,
    pub moves: usize,
}

/// The game state
pub struct GameState {
    /// Bundled altar layouts
    levels: Vec<LevelSpec>,
    /// Highlighted altar on the select screen
    selection: usize,
    /// Index of the active level, if one is activated
    level_index: Option<usize>,
    /// The rules engine
    engine: PuzzleEngine,
    /// Cursor position
    cursor: Position,
    /// Current screen
    screen: ScreenState,
    /// Start timestamp (ms since epoch)
    start_time: f64,
    /// Elapsed time frozen at the solve
    solved_elapsed: Option<f64>,
    /// Moves made on the active grid
    moves: usize,
    /// Altars solved this browser (persisted via save/load)
    solved_altars: Vec<String>,
    /// Current message to display
    message: Option<String>,
    /// Message timer (ticks remaining)
    message_timer: u32,
    /// Animation frame counter
    frame: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            levels: LevelSpec::catalog(),
            selection: 0,
            level_index: None,
            engine: PuzzleEngine::new(),
            cursor: Position::new(0, 0),
            screen: ScreenState::AltarSelect,
            start_time: Self::now(),
            solved_elapsed: None,
            moves: 0,
            solved_altars: Vec::new(),
            message: None,
            message_timer: 0,
            frame: 0,
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Get elapsed time in seconds
    pub fn elapsed_secs(&self) -> u32 {
        let elapsed = self
            .solved_elapsed
            .unwrap_or_else(|| Self::now() - self.start_time);
        (elapsed / 1000.0) as u32
    }

    /// Get formatted elapsed time
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Update game state (called each frame)
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Handle keyboard input, returns true if game should continue
    pub fn handle_key(&mut self, key: &str, _shift: bool, _ctrl: bool) -> bool {
        match self.screen {
            ScreenState::AltarSelect => self.handle_select_key(key),
            ScreenState::Playing => self.handle_playing_key(key),
            ScreenState::Solved => self.handle_solved_key(key),
        }
    }

    fn handle_select_key(&mut self, key: &str) -> bool {
        match key {
            "q" | "Escape" => return false,
            "ArrowUp" | "k" => self.selection = self.selection.saturating_sub(1),
            "ArrowDown" | "j" => {
                if self.selection + 1 < self.levels.len() {
                    self.selection += 1;
                }
            }
            "Enter" | " " => self.activate(self.selection),
            _ => {}
        }
        true
    }

    fn handle_playing_key(&mut self, key: &str) -> bool {
        match key {
            "q" => return false,
            "Escape" => {
                self.deactivate();
            }
            "ArrowUp" | "k" => self.move_cursor(-1, 0),
            "ArrowDown" | "j" => self.move_cursor(1, 0),
            "ArrowLeft" | "h" => self.move_cursor(0, -1),
            "ArrowRight" | "l" => self.move_cursor(0, 1),
            "Enter" | " " => self.place_at_cursor(),
            "x" | "Delete" | "Backspace" => self.remove_at_cursor(),
            "m" => self.mark_at_cursor(),
            "c" => self.clear_grid(),
            "?" => self.show_hint(),
            _ => {}
        }
        true
    }

    fn handle_solved_key(&mut self, key: &str) -> bool {
        match key {
            "q" => return false,
            "Enter" | " " | "n" | "Escape" => {
                if self.selection + 1 < self.levels.len() {
                    self.selection += 1;
                }
                self.deactivate();
            }
            _ => {}
        }
        true
    }

    /// Activate an altar: build its grid fresh
    pub fn activate(&mut self, index: usize) {
        if index >= self.levels.len() {
            return;
        }
        if self.engine.build_grid(&self.levels[index]).is_err() {
            return;
        }
        self.selection = index;
        self.level_index = Some(index);
        self.cursor = Position::new(0, 0);
        self.screen = ScreenState::Playing;
        self.start_time = Self::now();
        self.solved_elapsed = None;
        self.moves = 0;
        self.message = None;
    }

    /// Back to the hub; the grid is discarded
    fn deactivate(&mut self) {
        self.engine.reset_grid();
        self.level_index = None;
        self.screen = ScreenState::AltarSelect;
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let Some(size) = self.size() else { return };
        let max = (size - 1) as i32;
        let row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(row, col);
    }

    /// Handle a click on a cell: place a queen, or remove one that is
    /// already there. Right-click toggles the planning mark.
    pub fn click_cell(&mut self, row: usize, col: usize, right: bool) {
        if self.screen != ScreenState::Playing {
            return;
        }
        let Some(size) = self.size() else { return };
        if row >= size || col >= size {
            return;
        }
        self.cursor = Position::new(row, col);
        if right {
            self.mark_at_cursor();
        } else if self.cell_has_queen(row, col) {
            self.remove_at_cursor();
        } else {
            self.place_at_cursor();
        }
    }

    fn cell_has_queen(&self, row: usize, col: usize) -> bool {
        self.engine
            .grid()
            .and_then(|g| g.cell(Position::new(row, col)))
            .is_some_and(|cell| cell.has_queen())
    }

    fn place_at_cursor(&mut self) {
        let Ok(outcome) = self.engine.place_queen(self.cursor.row, self.cursor.col) else {
            return;
        };
        match outcome {
            PlaceOutcome::Placed => self.moves += 1,
            PlaceOutcome::Rejected(reason) => {
                self.show_message(&format!("Cannot place: {}", reason));
            }
            PlaceOutcome::Solved => {
                self.moves += 1;
                self.solved_elapsed = Some(Self::now() - self.start_time);
                if let Some(index) = self.level_index {
                    let name = self.levels[index].name.clone();
                    if !self.solved_altars.contains(&name) {
                        self.solved_altars.push(name);
                    }
                }
                self.screen = ScreenState::Solved;
            }
        }
    }

    fn remove_at_cursor(&mut self) {
        if let Ok(true) = self.engine.remove_queen(self.cursor.row, self.cursor.col) {
            self.moves += 1;
        }
    }

    fn mark_at_cursor(&mut self) {
        let _ = self.engine.toggle_mark(self.cursor.row, self.cursor.col);
    }

    fn clear_grid(&mut self) {
        if let Some(index) = self.level_index {
            let level = self.levels[index].clone();
            if self.engine.build_grid(&level).is_ok() {
                self.moves = 0;
                self.show_message("Grid cleared");
            }
        }
    }

    fn show_hint(&mut self) {
        let hint = self.engine.grid().and_then(|grid| Solver::new().hint(grid));
        match hint {
            Some(pos) => {
                self.cursor = pos;
                self.show_message("Hint: try the highlighted cell");
            }
            None => self.show_message("No way forward - remove a queen"),
        }
    }

    fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 90; // ~3 seconds at 30fps
    }

    // Getters
    pub fn levels(&self) -> &[LevelSpec] {
        &self.levels
    }
    pub fn selection(&self) -> usize {
        self.selection
    }
    pub fn level(&self) -> Option<&LevelSpec> {
        self.level_index.map(|i| &self.levels[i])
    }
    pub fn engine(&self) -> &PuzzleEngine {
        &self.engine
    }
    pub fn cursor(&self) -> Position {
        self.cursor
    }
    pub fn screen(&self) -> ScreenState {
        self.screen
    }
    pub fn moves(&self) -> usize {
        self.moves
    }
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
    pub fn frame(&self) -> u32 {
        self.frame
    }
    pub fn solved_altars(&self) -> &[String] {
        &self.solved_altars
    }
    pub fn is_altar_solved(&self, name: &str) -> bool {
        self.solved_altars.iter().any(|n| n == name)
    }

    pub fn size(&self) -> Option<usize> {
        self.engine.grid().map(|grid| grid.size())
    }

    pub fn is_solved(&self) -> bool {
        self.engine.is_puzzle_solved()
    }

    /// Convert to serializable format
    pub fn to_serializable(&self) -> SerializableState {
        let (queens, marks) = match self.engine.grid() {
            Some(grid) => {
                let mut queens = Vec::new();
                let mut marks = Vec::new();
                for row in 0..grid.size() {
                    for col in 0..grid.size() {
                        let cell = grid.cell(Position::new(row, col));
                        if let Some(cell) = cell {
                            if cell.has_queen() {
                                queens.push((row, col));
                            }
                            if cell.is_marked() {
                                marks.push((row, col));
                            }
                        }
                    }
                }
                (queens, marks)
            }
            None => (Vec::new(), Vec::new()),
        };

        SerializableState {
            selection: self.selection,
            level_index: self.level_index,
            screen: self.screen,
            queens,
            marks,
            solved_altars: self.solved_altars.clone(),
            elapsed_secs: self.elapsed_secs(),
            moves: self.moves,
        }
    }

    /// Create from serializable format. Queens are replayed through the
    /// engine, so a tampered save cannot produce an illegal grid.
    pub fn from_serializable(state: SerializableState) -> Self {
        let mut game = Self::new();
        game.selection = state.selection.min(game.levels.len().saturating_sub(1));
        game.solved_altars = state.solved_altars;

        if let Some(index) = state.level_index {
            game.activate(index);
            if game.level_index.is_some() {
                for (row, col) in state.queens {
                    let _ = game.engine.place_queen(row, col);
                }
                for (row, col) in state.marks {
                    let _ = game.engine.toggle_mark(row, col);
                }
                game.moves = state.moves;
                game.start_time = Self::now() - (state.elapsed_secs as f64 * 1000.0);
                game.screen = if game.engine.is_puzzle_solved() {
                    ScreenState::Solved
                } else {
                    ScreenState::Playing
                };
            }
        }
        game
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
