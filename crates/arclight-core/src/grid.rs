use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A rectangular, non-empty matrix of cell values.
///
/// Grids are the common currency of the pipeline: reference task definitions,
/// recorded model attempts and candidate outputs are all grids of small
/// integer cell values. The constructor validates shape once, so downstream
/// code can rely on every row having the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    cells: Vec<Vec<u8>>,
}

impl Grid {
    /// Builds a grid from row-major cell data.
    ///
    /// Rejects empty grids, empty rows and jagged rows.
    pub fn from_rows(cells: Vec<Vec<u8>>) -> Result<Self> {
        if cells.is_empty() {
            return Err(Error::MalformedGrid {
                message: "grid has no rows".to_string(),
            });
        }
        let width = cells[0].len();
        if width == 0 {
            return Err(Error::MalformedGrid {
                message: "grid rows are empty".to_string(),
            });
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(Error::MalformedGrid {
                    message: format!("row {i} has {} cells, expected {width}", row.len()),
                });
            }
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterates rows top to bottom; each item is one row of cell values.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = Error;

    fn try_from(cells: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_rows(cells)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rectangular_cells() {
        let g = Grid::from_rows(vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.get(1, 2), Some(5));
        assert_eq!(g.get(2, 0), None);
    }

    #[test]
    fn rejects_empty_and_jagged_cells() {
        assert!(matches!(
            Grid::from_rows(vec![]),
            Err(Error::MalformedGrid { .. })
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![]]),
            Err(Error::MalformedGrid { .. })
        ));
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn deserializes_from_nested_arrays() {
        let g: Grid = serde_json::from_str("[[0,1],[2,3]]").unwrap();
        assert_eq!(g, Grid::from_rows(vec![vec![0, 1], vec![2, 3]]).unwrap());
        assert!(serde_json::from_str::<Grid>("[[0,1],[2]]").is_err());
        assert_eq!(serde_json::to_string(&g).unwrap(), "[[0,1],[2,3]]");
    }
}
