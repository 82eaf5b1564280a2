//! Backtracking solver for Star Battle layouts.
//!
//! One queen per row lets the search walk rows in order, choosing a
//! column per row. Column and region uniqueness are tracked in used
//! sets; diagonal adjacency only needs the previous row's choice.

use crate::{Grid, LevelSpec, Position};

pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Find one solution for a layout, or None if unsolvable.
    pub fn solve(&self, level: &LevelSpec) -> Option<Vec<Position>> {
        let search = Search::from_level(level)?;
        search.run(1).into_iter().next()
    }

    /// Find one solution consistent with the queens already on the
    /// grid. Returns None when the current partial placement is a
    /// dead end.
    pub fn solve_from(&self, grid: &Grid) -> Option<Vec<Position>> {
        let search = Search::from_grid(grid);
        search.run(1).into_iter().next()
    }

    /// Count solutions, stopping once `limit` is reached.
    pub fn count_solutions(&self, level: &LevelSpec, limit: usize) -> usize {
        match Search::from_level(level) {
            Some(search) => search.run(limit).len(),
            None => 0,
        }
    }

    /// Suggest the next placement: a queen-less cell taken from a
    /// solution consistent with the current grid.
    pub fn hint(&self, grid: &Grid) -> Option<Position> {
        if grid.queen_count() == grid.size() {
            return None;
        }
        let solution = self.solve_from(grid)?;
        solution
            .into_iter()
            .find(|&pos| !grid.cell(pos).is_some_and(|cell| cell.has_queen()))
    }
}

/// Flattened search state shared by the level and grid entry points.
struct Search {
    size: usize,
    /// Region id per cell, row-major
    regions: Vec<u8>,
    /// Column forced by an existing queen, per row
    fixed: Vec<Option<usize>>,
}

impl Search {
    fn from_level(level: &LevelSpec) -> Option<Self> {
        level.validate().ok()?;
        Some(Self {
            size: level.grid_size,
            regions: level.regions.iter().flatten().copied().collect(),
            fixed: vec![None; level.grid_size],
        })
    }

    fn from_grid(grid: &Grid) -> Self {
        let size = grid.size();
        let mut regions = Vec::with_capacity(size * size);
        let mut fixed = vec![None; size];
        for row in 0..size {
            for col in 0..size {
                let cell = grid.cell(Position::new(row, col)).unwrap();
                regions.push(cell.region_id());
                if cell.has_queen() {
                    fixed[row] = Some(col);
                }
            }
        }
        Self {
            size,
            regions,
            fixed,
        }
    }

    fn region_at(&self, row: usize, col: usize) -> usize {
        self.regions[row * self.size + col] as usize
    }

    fn run(&self, limit: usize) -> Vec<Vec<Position>> {
        let max_region = self.regions.iter().copied().max().unwrap_or(0) as usize;
        let mut used_cols = vec![false; self.size];
        let mut used_regions = vec![false; max_region + 1];
        let mut cols = Vec::with_capacity(self.size);
        let mut found = Vec::new();
        self.descend(
            0,
            &mut used_cols,
            &mut used_regions,
            &mut cols,
            &mut found,
            limit,
        );
        found
    }

    fn descend(
        &self,
        row: usize,
        used_cols: &mut [bool],
        used_regions: &mut [bool],
        cols: &mut Vec<usize>,
        found: &mut Vec<Vec<Position>>,
        limit: usize,
    ) {
        if found.len() >= limit {
            return;
        }
        if row == self.size {
            found.push(
                cols.iter()
                    .enumerate()
                    .map(|(r, &c)| Position::new(r, c))
                    .collect(),
            );
            return;
        }

        let candidates: Vec<usize> = match self.fixed[row] {
            Some(col) => vec![col],
            None => (0..self.size).collect(),
        };

        for col in candidates {
            if used_cols[col] || used_regions[self.region_at(row, col)] {
                continue;
            }
            if let Some(&prev) = cols.last() {
                if prev.abs_diff(col) == 1 {
                    continue;
                }
            }

            used_cols[col] = true;
            used_regions[self.region_at(row, col)] = true;
            cols.push(col);

            self.descend(row + 1, used_cols, used_regions, cols, found, limit);

            cols.pop();
            used_regions[self.region_at(row, col)] = false;
            used_cols[col] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlaceOutcome, PuzzleEngine};

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

    #[test]
    fn solves_the_reference_layout() {
        let solver = Solver::new();
        let solution = solver.solve(&reference_level()).unwrap();
        assert_eq!(solution.len(), 5);

        // The solution must be accepted by the engine, ending in Solved
        let mut engine = PuzzleEngine::new();
        engine.build_grid(&reference_level()).unwrap();
        for (i, pos) in solution.iter().enumerate() {
            let outcome = engine.place_queen(pos.row, pos.col).unwrap();
            if i < 4 {
                assert_eq!(outcome, PlaceOutcome::Placed);
            } else {
                assert_eq!(outcome, PlaceOutcome::Solved);
            }
        }
    }

    #[test]
    fn every_catalog_level_is_solvable() {
        let solver = Solver::new();
        for level in LevelSpec::catalog() {
            let solution = solver.solve(&level);
            assert!(solution.is_some(), "{} has no solution", level.name);
            assert_eq!(solution.unwrap().len(), level.grid_size);
        }
    }

    #[test]
    fn count_respects_limit() {
        let solver = Solver::new();
        assert_eq!(solver.count_solutions(&reference_level(), 1), 1);
        assert!(solver.count_solutions(&reference_level(), 50) >= 1);
    }

    #[test]
    fn malformed_level_has_no_solutions() {
        let solver = Solver::new();
        let bad = LevelSpec::new("bad", 2, vec![vec![0, 0], vec![0, 0]]);
        assert!(solver.solve(&bad).is_none());
        assert_eq!(solver.count_solutions(&bad, 10), 0);
    }

    #[test]
    fn solve_from_honors_placed_queens() {
        let solver = Solver::new();
        let mut engine = PuzzleEngine::new();
        engine.build_grid(&reference_level()).unwrap();
        engine.place_queen(0, 1).unwrap();

        let solution = solver.solve_from(engine.grid().unwrap()).unwrap();
        assert!(solution.contains(&Position::new(0, 1)));
    }

    #[test]
    fn dead_end_is_detected() {
        // A queen at (0,0) forces row 1 into region 2, and no
        // completion exists from there
        let solver = Solver::new();
        let mut engine = PuzzleEngine::new();
        engine.build_grid(&reference_level()).unwrap();
        engine.place_queen(0, 0).unwrap();

        assert!(solver.solve_from(engine.grid().unwrap()).is_none());
        assert!(solver.hint(engine.grid().unwrap()).is_none());
    }

    #[test]
    fn hint_suggests_an_empty_cell() {
        let solver = Solver::new();
        let mut engine = PuzzleEngine::new();
        engine.build_grid(&reference_level()).unwrap();
        engine.place_queen(0, 1).unwrap();

        let hint = solver.hint(engine.grid().unwrap()).unwrap();
        assert_ne!(hint, Position::new(0, 1));
        let outcome = engine.place_queen(hint.row, hint.col).unwrap();
        assert!(outcome.is_placed());
    }

    #[test]
    fn hint_on_solved_grid_is_none() {
        let solver = Solver::new();
        let mut engine = PuzzleEngine::new();
        engine.build_grid(&reference_level()).unwrap();
        for &(row, col) in &[(0, 1), (1, 3), (2, 0), (3, 2), (4, 4)] {
            engine.place_queen(row, col).unwrap();
        }
        assert!(solver.hint(engine.grid().unwrap()).is_none());
    }
}
