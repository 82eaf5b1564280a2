//! Level layouts: the static region matrices that define each puzzle.

use crate::EngineError;
use serde::{Deserialize, Serialize};

/// A puzzle layout: grid size plus the N×N region-id matrix.
///
/// Region ids only need to agree cell-to-cell; they do not need to be
/// dense, contiguous, or spatially connected. A layout is well formed
/// when the matrix is exactly N×N and the number of distinct ids
/// equals N (one queen per region forces this for solvability).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Display name shown by frontends
    pub name: String,
    pub grid_size: usize,
    pub regions: Vec<Vec<u8>>,
}

impl LevelSpec {
    pub fn new(name: &str, grid_size: usize, regions: Vec<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            grid_size,
            regions,
        }
    }

    /// Check well-formedness of the layout.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.grid_size == 0 {
            return Err(EngineError::MalformedLevel(
                "grid size must be at least 1".to_string(),
            ));
        }
        if self.regions.len() != self.grid_size {
            return Err(EngineError::MalformedLevel(format!(
                "expected {} rows, found {}",
                self.grid_size,
                self.regions.len()
            )));
        }
        for (row, ids) in self.regions.iter().enumerate() {
            if ids.len() != self.grid_size {
                return Err(EngineError::MalformedLevel(format!(
                    "row {} has {} columns, expected {}",
                    row,
                    ids.len(),
                    self.grid_size
                )));
            }
        }
        let distinct = self.distinct_regions().len();
        if distinct != self.grid_size {
            return Err(EngineError::MalformedLevel(format!(
                "{} distinct regions for a {}x{} grid, expected {}",
                distinct, self.grid_size, self.grid_size, self.grid_size
            )));
        }
        Ok(())
    }

    /// Distinct region ids used by the layout, ascending.
    pub fn distinct_regions(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self.regions.iter().flatten().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// The six bundled altar layouts, ordered by size.
    pub fn catalog() -> Vec<LevelSpec> {
        vec![
            LevelSpec::new(
                "Altar of Dawn",
                5,
                vec![
                    vec![0, 0, 2, 2, 2],
                    vec![0, 0, 2, 2, 2],
                    vec![3, 1, 1, 6, 6],
                    vec![3, 1, 1, 6, 6],
                    vec![3, 3, 1, 1, 6],
                ],
            ),
            LevelSpec::new(
                "Altar of Tides",
                5,
                vec![
                    vec![0, 0, 1, 1, 2],
                    vec![0, 0, 1, 1, 2],
                    vec![0, 3, 1, 2, 2],
                    vec![3, 3, 4, 4, 2],
                    vec![3, 3, 4, 4, 4],
                ],
            ),
            LevelSpec::new(
                "Altar of Embers",
                6,
                vec![
                    vec![0, 0, 1, 1, 2, 2],
                    vec![0, 0, 1, 1, 2, 2],
                    vec![3, 3, 1, 4, 2, 2],
                    vec![3, 3, 4, 4, 4, 5],
                    vec![3, 3, 4, 4, 5, 5],
                    vec![3, 4, 4, 4, 5, 5],
                ],
            ),
            LevelSpec::new(
                "Altar of Gales",
                6,
                vec![
                    vec![0, 0, 0, 1, 1, 1],
                    vec![0, 2, 1, 1, 1, 3],
                    vec![2, 2, 2, 1, 3, 3],
                    vec![4, 2, 2, 3, 3, 3],
                    vec![4, 4, 2, 5, 5, 3],
                    vec![4, 4, 5, 5, 5, 5],
                ],
            ),
            LevelSpec::new(
                "Altar of Hollows",
                7,
                vec![
                    vec![0, 0, 1, 1, 1, 2, 2],
                    vec![0, 0, 1, 1, 2, 2, 2],
                    vec![0, 4, 4, 1, 2, 2, 3],
                    vec![4, 4, 4, 5, 5, 3, 3],
                    vec![4, 4, 5, 5, 5, 3, 3],
                    vec![4, 6, 6, 5, 5, 5, 3],
                    vec![6, 6, 6, 6, 6, 6, 3],
                ],
            ),
            LevelSpec::new(
                "Altar of Stars",
                8,
                vec![
                    vec![0, 0, 1, 1, 1, 2, 2, 2],
                    vec![0, 0, 1, 1, 2, 2, 2, 3],
                    vec![0, 4, 4, 1, 2, 2, 3, 3],
                    vec![4, 4, 4, 1, 5, 5, 3, 3],
                    vec![4, 4, 5, 5, 5, 5, 3, 3],
                    vec![4, 6, 6, 5, 5, 5, 7, 7],
                    vec![6, 6, 6, 6, 6, 6, 7, 7],
                    vec![6, 6, 7, 7, 7, 7, 7, 7],
                ],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_well_formed() {
        let levels = LevelSpec::catalog();
        assert_eq!(levels.len(), 6);
        for level in &levels {
            level.validate().unwrap();
            assert_eq!(level.distinct_regions().len(), level.grid_size);
        }
    }

    #[test]
    fn catalog_sizes_and_ids() {
        let levels = LevelSpec::catalog();
        let sizes: Vec<usize> = levels.iter().map(|l| l.grid_size).collect();
        assert_eq!(sizes, vec![5, 5, 6, 6, 7, 8]);
        for level in &levels {
            assert!(level.regions.iter().flatten().all(|&id| id <= 7));
        }
    }

    #[test]
    fn wrong_row_count_is_malformed() {
        let level = LevelSpec::new("bad", 3, vec![vec![0, 1, 2], vec![0, 1, 2]]);
        assert!(matches!(
            level.validate(),
            Err(EngineError::MalformedLevel(_))
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let level = LevelSpec::new(
            "bad",
            3,
            vec![vec![0, 1, 2], vec![0, 1], vec![0, 1, 2]],
        );
        assert!(matches!(
            level.validate(),
            Err(EngineError::MalformedLevel(_))
        ));
    }

    #[test]
    fn too_few_regions_is_malformed() {
        let level = LevelSpec::new(
            "bad",
            3,
            vec![vec![0, 0, 0], vec![0, 1, 1], vec![1, 1, 1]],
        );
        assert!(matches!(
            level.validate(),
            Err(EngineError::MalformedLevel(_))
        ));
    }

    #[test]
    fn zero_size_is_malformed() {
        let level = LevelSpec::new("bad", 0, vec![]);
        assert!(matches!(
            level.validate(),
            Err(EngineError::MalformedLevel(_))
        ));
    }

    #[test]
    fn serde_round_trip() {
        let level = LevelSpec::catalog().remove(0);
        let json = serde_json::to_string(&level).unwrap();
        let back: LevelSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }

    #[test]
    fn negative_region_ids_fail_to_deserialize() {
        let json = r#"{"name":"bad","grid_size":2,"regions":[[0,-1],[0,1]]}"#;
        assert!(serde_json::from_str::<LevelSpec>(json).is_err());
    }
}
