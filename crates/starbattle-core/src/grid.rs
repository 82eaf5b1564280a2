//! Grid state and the Star Battle placement rules.

use crate::{EngineError, LevelSpec, Position, Rejection};

/// One cell of the active puzzle.
///
/// Fields are private: all mutation goes through the grid so the
/// engine's invariants (one owner, no partial mutation) hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    region: u8,
    queen: bool,
    marked: bool,
}

impl Cell {
    fn new(region: u8) -> Self {
        Self {
            region,
            queen: false,
            marked: false,
        }
    }

    /// Region this cell belongs to, fixed at grid build
    pub fn region_id(&self) -> u8 {
        self.region
    }

    pub fn has_queen(&self) -> bool {
        self.queen
    }

    /// Planning mark; cosmetic only, never consulted by validation
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// The active puzzle: size, cell matrix, and derived region membership.
///
/// Region membership is computed once at build time so validation and
/// the win check never rescan the whole matrix per region.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    /// Member positions indexed by region id; unused ids are empty
    members: Vec<Vec<Position>>,
    /// Distinct region ids present, ascending
    region_ids: Vec<u8>,
    queen_count: usize,
}

impl Grid {
    /// Build a fresh grid from a validated level layout.
    pub fn from_level(level: &LevelSpec) -> Result<Self, EngineError> {
        level.validate()?;

        let size = level.grid_size;
        let mut cells = Vec::with_capacity(size * size);
        let max_id = level
            .regions
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0) as usize;
        let mut members = vec![Vec::new(); max_id + 1];

        for (row, ids) in level.regions.iter().enumerate() {
            for (col, &id) in ids.iter().enumerate() {
                cells.push(Cell::new(id));
                members[id as usize].push(Position::new(row, col));
            }
        }

        let region_ids = (0..=max_id as u8)
            .filter(|&id| !members[id as usize].is_empty())
            .collect();

        Ok(Self {
            size,
            cells,
            members,
            region_ids,
            queen_count: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.row < self.size && pos.col < self.size {
            Some(&self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn has_queen_at(&self, row: usize, col: usize) -> bool {
        self.cells[self.idx(row, col)].queen
    }

    /// Number of queens currently on the grid
    pub fn queen_count(&self) -> usize {
        self.queen_count
    }

    /// Queen positions in row-major order
    pub fn queens(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.queen_count);
        for row in 0..self.size {
            for col in 0..self.size {
                if self.has_queen_at(row, col) {
                    out.push(Position::new(row, col));
                }
            }
        }
        out
    }

    /// Distinct region ids present in this grid, ascending
    pub fn region_ids(&self) -> &[u8] {
        &self.region_ids
    }

    /// Member cells of a region; empty for ids not used by the layout
    pub fn region_members(&self, id: u8) -> &[Position] {
        self.members
            .get(id as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check the placement rules for a queen at (row, col), in rule
    /// order: occupied, row, column, region, diagonal adjacency. The
    /// first failing rule determines the rejection.
    pub(crate) fn validate_placement(&self, row: usize, col: usize) -> Result<(), Rejection> {
        if self.has_queen_at(row, col) {
            return Err(Rejection::Occupied);
        }

        for c in 0..self.size {
            if c != col && self.has_queen_at(row, c) {
                return Err(Rejection::RowConflict);
            }
        }

        for r in 0..self.size {
            if r != row && self.has_queen_at(r, col) {
                return Err(Rejection::ColumnConflict);
            }
        }

        let region = self.cells[self.idx(row, col)].region;
        for &pos in self.region_members(region) {
            if (pos.row, pos.col) != (row, col) && self.has_queen_at(pos.row, pos.col) {
                return Err(Rejection::RegionConflict);
            }
        }

        if self.has_diagonal_queen(row, col) {
            return Err(Rejection::AdjacencyConflict);
        }

        Ok(())
    }

    fn has_diagonal_queen(&self, row: usize, col: usize) -> bool {
        for dr in [-1i64, 1] {
            for dc in [-1i64, 1] {
                let (r, c) = (row as i64 + dr, col as i64 + dc);
                if r >= 0
                    && c >= 0
                    && (r as usize) < self.size
                    && (c as usize) < self.size
                    && self.has_queen_at(r as usize, c as usize)
                {
                    return true;
                }
            }
        }
        false
    }

    pub(crate) fn set_queen(&mut self, row: usize, col: usize, present: bool) {
        let idx = self.idx(row, col);
        if self.cells[idx].queen != present {
            self.cells[idx].queen = present;
            if present {
                self.queen_count += 1;
            } else {
                self.queen_count -= 1;
            }
        }
    }

    pub(crate) fn toggle_mark(&mut self, row: usize, col: usize) {
        let idx = self.idx(row, col);
        self.cells[idx].marked = !self.cells[idx].marked;
    }

    /// Full solved check: exactly N queens, every queen independently
    /// satisfies the uniqueness and adjacency rules, and every region
    /// holds exactly one queen.
    ///
    /// The per-queen re-validation deliberately does not trust the
    /// placement history; removals are not otherwise audited.
    pub fn is_solved(&self) -> bool {
        if self.queen_count != self.size {
            return false;
        }

        for pos in self.queens() {
            if !self.queen_stands_alone(pos) {
                return false;
            }
        }

        for &id in &self.region_ids {
            let queens_in_region = self
                .region_members(id)
                .iter()
                .filter(|p| self.has_queen_at(p.row, p.col))
                .count();
            if queens_in_region != 1 {
                return false;
            }
        }

        true
    }

    /// Re-check rules 2-5 for an already-placed queen, excluding itself.
    fn queen_stands_alone(&self, pos: Position) -> bool {
        for c in 0..self.size {
            if c != pos.col && self.has_queen_at(pos.row, c) {
                return false;
            }
        }
        for r in 0..self.size {
            if r != pos.row && self.has_queen_at(r, pos.col) {
                return false;
            }
        }
        let region = self.cells[self.idx(pos.row, pos.col)].region;
        for &other in self.region_members(region) {
            if other != pos && self.has_queen_at(other.row, other.col) {
                return false;
            }
        }
        !self.has_diagonal_queen(pos.row, pos.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LevelSpec;

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
    fn builds_cells_from_region_matrix() {
        let grid = Grid::from_level(&reference_level()).unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.cell(Position::new(0, 0)).unwrap().region_id(), 0);
        assert_eq!(grid.cell(Position::new(2, 3)).unwrap().region_id(), 6);
        assert_eq!(grid.cell(Position::new(4, 2)).unwrap().region_id(), 1);
        assert!(!grid.cell(Position::new(0, 0)).unwrap().has_queen());
        assert!(!grid.cell(Position::new(0, 0)).unwrap().is_marked());
        assert_eq!(grid.queen_count(), 0);
    }

    #[test]
    fn region_ids_may_be_sparse() {
        let grid = Grid::from_level(&reference_level()).unwrap();
        assert_eq!(grid.region_ids(), &[0, 1, 2, 3, 6]);
        assert!(grid.region_members(4).is_empty());
        assert!(grid.region_members(5).is_empty());
        assert_eq!(grid.region_members(6).len(), 5);
    }

    #[test]
    fn membership_partitions_the_grid() {
        let grid = Grid::from_level(&reference_level()).unwrap();
        let total: usize = grid
            .region_ids()
            .iter()
            .map(|&id| grid.region_members(id).len())
            .sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn cell_lookup_out_of_bounds_is_none() {
        let grid = Grid::from_level(&reference_level()).unwrap();
        assert!(grid.cell(Position::new(5, 0)).is_none());
        assert!(grid.cell(Position::new(0, 5)).is_none());
        assert!(grid.cell(Position::new(4, 4)).is_some());
    }
}
