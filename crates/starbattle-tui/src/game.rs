//! One play session: the engine plus cursor, timing, and move count.

use starbattle_core::{LevelSpec, PlaceOutcome, Position, PuzzleEngine, Solver};
use std::time::{Duration, Instant};

/// A single altar being played
pub struct Session {
    level: LevelSpec,
    level_index: usize,
    engine: PuzzleEngine,
    cursor: Position,
    moves: usize,
    start: Instant,
    solved_in: Option<Duration>,
    hints_used: usize,
}

impl Session {
    pub fn new(level: LevelSpec, level_index: usize) -> Self {
        let mut engine = PuzzleEngine::new();
        engine
            .build_grid(&level)
            .expect("bundled levels are well formed");
        Self {
            level,
            level_index,
            engine,
            cursor: Position::new(0, 0),
            moves: 0,
            start: Instant::now(),
            solved_in: None,
            hints_used: 0,
        }
    }

    pub fn level(&self) -> &LevelSpec {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn engine(&self) -> &PuzzleEngine {
        &self.engine
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn size(&self) -> usize {
        self.level.grid_size
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn is_solved(&self) -> bool {
        self.solved_in.is_some()
    }

    /// Elapsed play time; frozen at the moment of the solve
    pub fn elapsed(&self) -> Duration {
        self.solved_in.unwrap_or_else(|| self.start.elapsed())
    }

    pub fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = (self.size() - 1) as i32;
        let row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(row, col);
    }

    /// Place a queen at the cursor
    pub fn place(&mut self) -> PlaceOutcome {
        let outcome = self
            .engine
            .place_queen(self.cursor.row, self.cursor.col)
            .expect("cursor stays in bounds");
        if outcome.is_placed() {
            self.moves += 1;
        }
        if outcome == PlaceOutcome::Solved {
            self.solved_in = Some(self.start.elapsed());
        }
        outcome
    }

    /// Remove the queen at the cursor, if any
    pub fn remove(&mut self) -> bool {
        let removed = self
            .engine
            .remove_queen(self.cursor.row, self.cursor.col)
            .expect("cursor stays in bounds");
        if removed {
            self.moves += 1;
        }
        removed
    }

    /// Toggle the planning mark at the cursor
    pub fn toggle_mark(&mut self) {
        self.engine
            .toggle_mark(self.cursor.row, self.cursor.col)
            .expect("cursor stays in bounds");
    }

    /// Rebuild the grid, clearing all queens and marks
    pub fn clear(&mut self) {
        self.engine
            .build_grid(&self.level)
            .expect("bundled levels are well formed");
        self.moves = 0;
        self.solved_in = None;
    }

    /// Ask the solver for the next placeable cell and move the cursor
    /// there. None when the current placement is a dead end.
    pub fn hint(&mut self) -> Option<Position> {
        let grid = self.engine.grid()?;
        let hint = Solver::new().hint(grid)?;
        self.hints_used += 1;
        self.cursor = hint;
        Some(hint)
    }

    pub fn queens_placed(&self) -> usize {
        self.engine
            .grid()
            .map(|grid| grid.queen_count())
            .unwrap_or(0)
    }
}
