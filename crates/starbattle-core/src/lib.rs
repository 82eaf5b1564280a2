//! Core Star Battle engine: grid state, placement rules, win detection.
//!
//! The engine is pure state + rules. It knows nothing about rendering,
//! input devices, or persistence; frontends drive it through the
//! mutation API and read back cell state for display.

use serde::{Deserialize, Serialize};

mod engine;
mod grid;
mod level;
mod solver;

pub use engine::{PlaceOutcome, PuzzleEngine};
pub use grid::{Cell, Grid};
pub use level::LevelSpec;
pub use solver::Solver;

/// A cell coordinate, zero-based, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True if `other` touches this position diagonally (one row and
    /// one column apart). Orthogonal neighbors are not adjacent in the
    /// Star Battle sense; the row/column rules already cover them.
    pub fn is_diagonal_neighbor(&self, other: Position) -> bool {
        self.row.abs_diff(other.row) == 1 && self.col.abs_diff(other.col) == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Why a queen placement was refused.
///
/// Rejections are the expected player-input path: frequent, local, and
/// immediately retryable. They never indicate a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Target cell already holds a queen
    Occupied,
    /// Another queen in the same row
    RowConflict,
    /// Another queen in the same column
    ColumnConflict,
    /// Another queen in the same region
    RegionConflict,
    /// A queen in a diagonally touching cell
    AdjacencyConflict,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Occupied => write!(f, "occupied"),
            Rejection::RowConflict => write!(f, "row conflict"),
            Rejection::ColumnConflict => write!(f, "column conflict"),
            Rejection::RegionConflict => write!(f, "region conflict"),
            Rejection::AdjacencyConflict => write!(f, "adjacency conflict"),
        }
    }
}

/// Integration errors: caller bugs, not player actions.
///
/// These fail loudly (as a typed error) instead of masquerading as a
/// placement rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A mutation or lookup was attempted before `build_grid`
    GridNotBuilt,
    /// Coordinates outside the active grid
    OutOfBounds { row: usize, col: usize, size: usize },
    /// The level's region matrix is not a well-formed puzzle
    MalformedLevel(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::GridNotBuilt => write!(f, "no grid has been built"),
            EngineError::OutOfBounds { row, col, size } => {
                write!(f, "cell ({}, {}) out of bounds for {}x{} grid", row, col, size, size)
            }
            EngineError::MalformedLevel(reason) => write!(f, "malformed level: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}
