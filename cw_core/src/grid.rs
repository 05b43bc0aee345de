use getset::CopyGetters;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorMsg, Result};
use crate::{BoardDimension, Coord, OwnerId};

/// Ownership of every cell on the board.
///
/// The simulation replaces it wholesale each tick; renderers only read it.
/// Cells are stored row-major.
#[derive(Clone, CopyGetters, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<Vec<OwnerId>>", into = "Vec<Vec<OwnerId>>")]
pub struct Grid {
    #[getset(get_copy = "pub")]
    dim: BoardDimension,
    cells: Vec<OwnerId>,
}

impl Grid {
    /// A board where nothing is claimed yet.
    pub fn unclaimed(dim: BoardDimension) -> Self {
        Grid {
            dim,
            cells: vec![OwnerId::UNCLAIMED; dim.cell_count()],
        }
    }

    /// Builds a grid from rows of owners, `rows[row][col]`.
    pub fn from_rows(rows: Vec<Vec<OwnerId>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad_row) = rows.iter().position(|row| row.len() != width) {
            return format!(
                "row {} has {} cells, expected {}",
                bad_row,
                rows[bad_row].len(),
                width
            )
            .violation();
        }
        Ok(Grid {
            dim: BoardDimension::new(width as u32, height as u32),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds a grid from columns of owners, `fields[col][row]`, which is how
    /// the game store keeps the board.
    pub fn from_columns(columns: Vec<Vec<OwnerId>>) -> Result<Self> {
        let width = columns.len();
        let height = columns.first().map(Vec::len).unwrap_or(0);
        if let Some(bad_col) = columns.iter().position(|col| col.len() != height) {
            return format!(
                "column {} has {} cells, expected {}",
                bad_col,
                columns[bad_col].len(),
                height
            )
            .violation();
        }
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            cells.extend(columns.iter().map(|column| column[row]));
        }
        Ok(Grid {
            dim: BoardDimension::new(width as u32, height as u32),
            cells,
        })
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.dim
            .contains(coord)
            .then(|| coord.row as usize * self.dim.cols as usize + coord.col as usize)
    }

    pub fn get(&self, coord: Coord) -> Option<OwnerId> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Owner at `coord`, failing on coordinates off the board.
    pub fn owner(&self, coord: Coord) -> Result<OwnerId> {
        self.get(coord).ok_or_else(|| {
            format!(
                "cell ({}, {}) is outside a {}x{} grid",
                coord.col, coord.row, self.dim.cols, self.dim.rows
            )
            .violation_msg()
        })
    }

    /// Returns false if the coordinate is off the board.
    pub fn set(&mut self, coord: Coord, owner: OwnerId) -> bool {
        if let Some(i) = self.index(coord) {
            self.cells[i] = owner;
            true
        } else {
            false
        }
    }

    /// Every owner on the board, row-major.
    pub fn owners(&self) -> impl Iterator<Item = OwnerId> + '_ {
        self.cells.iter().copied()
    }

    pub fn rows(&self) -> Vec<Vec<OwnerId>> {
        if self.dim.cols == 0 {
            return vec![Vec::new(); self.dim.rows as usize];
        }
        self.cells
            .chunks(self.dim.cols as usize)
            .map(<[OwnerId]>::to_vec)
            .collect()
    }

    /// Coordinates whose owner differs between two grids of the same size,
    /// row-major. Grids of different sizes have no meaningful diff, so every
    /// coordinate of `self` is returned.
    pub fn changed_since(&self, previous: &Grid) -> Vec<Coord> {
        if self.dim != previous.dim {
            return self.dim.all_coords();
        }
        self.dim
            .all_coords()
            .into_iter()
            .zip(self.cells.iter().zip(previous.cells.iter()))
            .filter(|(_, (now, before))| now != before)
            .map(|(coord, _)| coord)
            .collect()
    }
}

impl TryFrom<Vec<Vec<OwnerId>>> for Grid {
    type Error = crate::CoreError;

    fn try_from(rows: Vec<Vec<OwnerId>>) -> Result<Self> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<OwnerId>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn owners(raw: &[&[u8]]) -> Vec<Vec<OwnerId>> {
        raw.iter()
            .map(|line| line.iter().copied().map(OwnerId).collect())
            .collect()
    }

    #[test]
    fn columns_and_rows_agree() {
        let by_rows = Grid::from_rows(owners(&[&[1, 2, 3], &[4, 5, 6]])).unwrap();
        let by_cols = Grid::from_columns(owners(&[&[1, 4], &[2, 5], &[3, 6]])).unwrap();
        assert_eq!(by_rows, by_cols);
        assert_eq!(BoardDimension::new(3, 2), by_rows.dim());
        assert_eq!(Some(OwnerId(6)), by_rows.get(Coord::new(2, 1)));
        assert_eq!(None, by_rows.get(Coord::new(3, 0)));
    }

    #[test]
    fn ragged_input_is_rejected() {
        assert!(Grid::from_rows(owners(&[&[1, 2], &[3]])).is_err());
        assert!(Grid::from_columns(owners(&[&[1], &[2, 3]])).is_err());
    }

    #[test]
    fn owner_off_the_board_is_a_violation() {
        let grid = Grid::unclaimed(BoardDimension::new(2, 2));
        assert_eq!(OwnerId::UNCLAIMED, grid.owner(Coord::new(1, 1)).unwrap());
        assert!(grid.owner(Coord::new(2, 1)).unwrap_err().is_contract_violation());
    }

    #[test]
    fn changed_since_lists_only_differing_cells() {
        let before = Grid::unclaimed(BoardDimension::new(3, 3));
        let mut after = before.clone();
        after.set(Coord::new(2, 0), OwnerId(1));
        after.set(Coord::new(0, 2), OwnerId(2));
        assert_eq!(
            vec![Coord::new(2, 0), Coord::new(0, 2)],
            after.changed_since(&before)
        );
        let bigger = Grid::unclaimed(BoardDimension::new(4, 3));
        assert_eq!(12, bigger.changed_since(&before).len());
    }

    #[test]
    fn rows_match_construction() {
        let grid = Grid::from_rows(owners(&[&[0, 1], &[2, 0]])).unwrap();
        assert_eq!(owners(&[&[0, 1], &[2, 0]]), grid.rows());
    }
}
