//! The puzzle engine: one active grid plus the mutation/query surface
//! frontends drive.

use crate::{EngineError, Grid, LevelSpec, Position, Rejection};

/// Result of a `place_queen` call, returned synchronously.
///
/// This doubles as the engine's event stream: `Placed` is the
/// queen-placed notification, `Solved` is the puzzle-solved
/// notification (emitted exactly once, on the winning placement), and
/// `Rejected` is the invalid-placement notification with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Queen placed; the puzzle is not yet solved
    Placed,
    /// Queen placed and the grid is now solved
    Solved,
    /// Placement refused; the grid is unchanged
    Rejected(Rejection),
}

impl PlaceOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlaceOutcome::Placed | PlaceOutcome::Solved)
    }
}

/// Owns the active grid and enforces the placement rules.
///
/// Single-threaded and synchronous: every operation runs to completion
/// before returning, and either fully applies or fully rejects.
#[derive(Debug, Clone, Default)]
pub struct PuzzleEngine {
    grid: Option<Grid>,
}

impl PuzzleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh grid from a level layout, discarding any prior
    /// grid state. Calling again is an idempotent replacement.
    pub fn build_grid(&mut self, level: &LevelSpec) -> Result<(), EngineError> {
        self.grid = Some(Grid::from_level(level)?);
        Ok(())
    }

    /// Drop the active grid, returning the engine to the unbuilt state.
    pub fn reset_grid(&mut self) {
        self.grid = None;
    }

    pub fn is_built(&self) -> bool {
        self.grid.is_some()
    }

    /// The active grid, for read-only display iteration.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Attempt to place a queen. The grid mutates only on success; the
    /// win check runs on the mutation itself, so `Solved` fires on the
    /// winning placement rather than on a later poll.
    pub fn place_queen(&mut self, row: usize, col: usize) -> Result<PlaceOutcome, EngineError> {
        let grid = Self::checked(&mut self.grid, row, col)?;

        match grid.validate_placement(row, col) {
            Ok(()) => {
                grid.set_queen(row, col, true);
                if grid.is_solved() {
                    Ok(PlaceOutcome::Solved)
                } else {
                    Ok(PlaceOutcome::Placed)
                }
            }
            Err(reason) => Ok(PlaceOutcome::Rejected(reason)),
        }
    }

    /// Remove a queen. Returns false (a silent no-op) when the cell
    /// holds none; removal of a present queen is always legal.
    pub fn remove_queen(&mut self, row: usize, col: usize) -> Result<bool, EngineError> {
        let grid = Self::checked(&mut self.grid, row, col)?;
        if !grid
            .cell(Position::new(row, col))
            .is_some_and(|cell| cell.has_queen())
        {
            return Ok(false);
        }
        grid.set_queen(row, col, false);
        Ok(true)
    }

    /// Flip the planning mark on a cell. Marks never affect validation.
    pub fn toggle_mark(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        let grid = Self::checked(&mut self.grid, row, col)?;
        grid.toggle_mark(row, col);
        Ok(())
    }

    /// Full solved check. False when no grid is built.
    pub fn is_puzzle_solved(&self) -> bool {
        self.grid.as_ref().is_some_and(Grid::is_solved)
    }

    /// Row-major snapshot of queen-holding cells; empty when unbuilt.
    pub fn solution_state(&self) -> Vec<Position> {
        self.grid.as_ref().map(Grid::queens).unwrap_or_default()
    }

    fn checked<'a>(
        grid: &'a mut Option<Grid>,
        row: usize,
        col: usize,
    ) -> Result<&'a mut Grid, EngineError> {
        let grid = grid.as_mut().ok_or(EngineError::GridNotBuilt)?;
        let size = grid.size();
        if row >= size || col >= size {
            return Err(EngineError::OutOfBounds { row, col, size });
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LevelSpec;

    /// The 5x5 reference layout; regions {0, 1, 2, 3, 6}, solved by
    /// (0,1), (1,3), (2,0), (3,2), (4,4).
    fn reference_level() -> LevelSpec {
        LevelSpec::new(
            "test",
            5,
            vec![
                vec![0, 0, 2, 2, 2],
                vec![0, 0, 2, 2, 2],
                vec![3, 1, 1, 6, 6],
                vec![3, 1, 1, 6, 6],
                vec![3, 3, 1, 1, 6],
            ],
        )
    }

    fn built_engine() -> PuzzleEngine {
        let mut engine = PuzzleEngine::new();
        engine.build_grid(&reference_level()).unwrap();
        engine
    }

    const SOLUTION: [(usize, usize); 5] = [(0, 1), (1, 3), (2, 0), (3, 2), (4, 4)];

    #[test]
    fn place_before_build_fails_loudly() {
        let mut engine = PuzzleEngine::new();
        assert_eq!(engine.place_queen(0, 0), Err(EngineError::GridNotBuilt));
        assert_eq!(engine.remove_queen(0, 0), Err(EngineError::GridNotBuilt));
        assert_eq!(engine.toggle_mark(0, 0), Err(EngineError::GridNotBuilt));
        assert!(!engine.is_puzzle_solved());
        assert!(engine.solution_state().is_empty());
    }

    #[test]
    fn out_of_bounds_fails_loudly() {
        let mut engine = built_engine();
        assert_eq!(
            engine.place_queen(5, 0),
            Err(EngineError::OutOfBounds {
                row: 5,
                col: 0,
                size: 5
            })
        );
        assert_eq!(
            engine.place_queen(0, 7),
            Err(EngineError::OutOfBounds {
                row: 0,
                col: 7,
                size: 5
            })
        );
    }

    #[test]
    fn malformed_level_is_not_built() {
        let mut engine = built_engine();
        let bad = LevelSpec::new("bad", 2, vec![vec![0, 0], vec![0, 0]]);
        assert!(matches!(
            engine.build_grid(&bad),
            Err(EngineError::MalformedLevel(_))
        ));
    }

    #[test]
    fn occupied_rejection() {
        let mut engine = built_engine();
        assert_eq!(engine.place_queen(0, 1).unwrap(), PlaceOutcome::Placed);
        assert_eq!(
            engine.place_queen(0, 1).unwrap(),
            PlaceOutcome::Rejected(Rejection::Occupied)
        );
    }

    #[test]
    fn row_conflict_rejection() {
        let mut engine = built_engine();
        engine.place_queen(0, 0).unwrap();
        // Same row, different column, different region, not adjacent
        assert_eq!(
            engine.place_queen(0, 3).unwrap(),
            PlaceOutcome::Rejected(Rejection::RowConflict)
        );
    }

    #[test]
    fn column_conflict_rejection() {
        let mut engine = built_engine();
        engine.place_queen(0, 0).unwrap();
        // Same column, different row and region, not adjacent
        assert_eq!(
            engine.place_queen(3, 0).unwrap(),
            PlaceOutcome::Rejected(Rejection::ColumnConflict)
        );
    }

    #[test]
    fn region_conflict_rejection() {
        let mut engine = built_engine();
        // (0,2) and (1,4) share region 2 but neither row, column, nor a diagonal
        engine.place_queen(0, 2).unwrap();
        assert_eq!(
            engine.place_queen(1, 4).unwrap(),
            PlaceOutcome::Rejected(Rejection::RegionConflict)
        );
    }

    #[test]
    fn region_checked_before_adjacency() {
        let mut engine = built_engine();
        // (0,0) and (1,1) are diagonal neighbors in the same region;
        // the region rule wins because it is checked first
        engine.place_queen(0, 0).unwrap();
        assert_eq!(
            engine.place_queen(1, 1).unwrap(),
            PlaceOutcome::Rejected(Rejection::RegionConflict)
        );
    }

    #[test]
    fn adjacency_conflict_rejection() {
        let mut engine = built_engine();
        engine.place_queen(2, 2).unwrap();
        // Diagonal neighbor across a region boundary
        assert_eq!(
            engine.place_queen(3, 3).unwrap(),
            PlaceOutcome::Rejected(Rejection::AdjacencyConflict)
        );
        assert_eq!(engine.solution_state(), vec![Position::new(2, 2)]);
    }

    #[test]
    fn rejection_leaves_grid_untouched() {
        let mut engine = built_engine();
        engine.place_queen(2, 2).unwrap();
        engine.toggle_mark(4, 4).unwrap();
        let before = engine.solution_state();

        engine.place_queen(3, 3).unwrap(); // adjacency
        engine.place_queen(2, 2).unwrap(); // occupied
        engine.place_queen(2, 4).unwrap(); // row

        assert_eq!(engine.solution_state(), before);
        let grid = engine.grid().unwrap();
        assert!(grid.cell(Position::new(4, 4)).unwrap().is_marked());
        assert_eq!(grid.queen_count(), 1);
    }

    #[test]
    fn remove_missing_queen_is_noop() {
        let mut engine = built_engine();
        assert!(!engine.remove_queen(0, 0).unwrap());
        engine.place_queen(0, 0).unwrap();
        assert!(engine.remove_queen(0, 0).unwrap());
        assert!(!engine.remove_queen(0, 0).unwrap());
    }

    #[test]
    fn remove_then_replace_always_succeeds() {
        let mut engine = built_engine();
        for &(row, col) in SOLUTION.iter().take(4) {
            assert!(engine.place_queen(row, col).unwrap().is_placed());
        }
        assert!(engine.remove_queen(1, 3).unwrap());
        assert_eq!(engine.place_queen(1, 3).unwrap(), PlaceOutcome::Placed);
    }

    #[test]
    fn marks_never_affect_validation() {
        let mut engine = built_engine();
        engine.toggle_mark(0, 1).unwrap();
        assert_eq!(engine.place_queen(0, 1).unwrap(), PlaceOutcome::Placed);
        // Mark survives the placement and toggles back off
        let grid = engine.grid().unwrap();
        assert!(grid.cell(Position::new(0, 1)).unwrap().is_marked());
        engine.toggle_mark(0, 1).unwrap();
        let grid = engine.grid().unwrap();
        assert!(!grid.cell(Position::new(0, 1)).unwrap().is_marked());
    }

    #[test]
    fn solved_exactly_on_fifth_placement() {
        let mut engine = built_engine();
        for (i, &(row, col)) in SOLUTION.iter().enumerate() {
            let outcome = engine.place_queen(row, col).unwrap();
            if i < 4 {
                assert_eq!(outcome, PlaceOutcome::Placed);
                assert!(!engine.is_puzzle_solved());
            } else {
                assert_eq!(outcome, PlaceOutcome::Solved);
                assert!(engine.is_puzzle_solved());
            }
        }
        assert_eq!(engine.solution_state().len(), 5);
    }

    #[test]
    fn solved_requires_exact_queen_count() {
        let mut engine = built_engine();
        for &(row, col) in &SOLUTION {
            engine.place_queen(row, col).unwrap();
        }
        assert!(engine.is_puzzle_solved());

        engine.remove_queen(2, 0).unwrap();
        assert!(!engine.is_puzzle_solved());

        assert_eq!(engine.place_queen(2, 0).unwrap(), PlaceOutcome::Solved);
        assert!(engine.is_puzzle_solved());
    }

    #[test]
    fn rebuild_resets_queen_count() {
        let mut engine = built_engine();
        for &(row, col) in SOLUTION.iter().take(3) {
            engine.place_queen(row, col).unwrap();
        }
        assert_eq!(engine.solution_state().len(), 3);

        engine.build_grid(&reference_level()).unwrap();
        assert_eq!(engine.solution_state().len(), 0);
        assert_eq!(engine.grid().unwrap().queen_count(), 0);
    }

    #[test]
    fn reset_returns_to_unbuilt() {
        let mut engine = built_engine();
        engine.place_queen(0, 1).unwrap();
        engine.reset_grid();
        assert!(!engine.is_built());
        assert_eq!(engine.place_queen(0, 1), Err(EngineError::GridNotBuilt));
    }

    #[test]
    fn solution_state_is_row_major() {
        let mut engine = built_engine();
        engine.place_queen(4, 4).unwrap();
        engine.place_queen(0, 1).unwrap();
        engine.place_queen(2, 0).unwrap();
        assert_eq!(
            engine.solution_state(),
            vec![
                Position::new(0, 1),
                Position::new(2, 0),
                Position::new(4, 4)
            ]
        );
    }
}
