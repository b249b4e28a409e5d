/// Coordinate system of an n-by-n percolation grid
///
/// ```text
///   n = 3        top (0)
///              /   |   \
///             1    2    3
///             4    5    6
///             7    8    9
///              \   |   /
///             bottom (10)
/// ```
///
/// Cells are addressed row-major and 1-based: `idx = (row - 1) * n + col`.
/// The two virtual nodes sit at either end of the flat address space.
use crate::error::{PercolationError, Result};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    n: usize,
}

impl Grid {
    /// Grid of side length n; rejects n < 1 and sizes whose per-site arrays
    /// could not be indexed (more than `isize::MAX` bytes)
    pub fn new(n: usize) -> Result<Self> {
        let fits = n
            .checked_mul(n)
            .and_then(|cells| cells.checked_add(2))
            .and_then(|len| len.checked_mul(std::mem::size_of::<usize>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if n < 1 || !fits {
            return Err(PercolationError::grid_size(n));
        }
        Ok(Grid { n })
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.n
    }

    /// Number of real cells
    pub fn cells(&self) -> usize {
        self.n * self.n
    }

    /// Address space: cells plus the two virtual nodes
    pub fn address_space(&self) -> usize {
        self.cells() + 2
    }

    pub fn virtual_top(&self) -> usize {
        0
    }

    pub fn virtual_bottom(&self) -> usize {
        self.cells() + 1
    }

    pub fn top_row(&self) -> RangeInclusive<usize> {
        1..=self.n
    }

    pub fn bottom_row(&self) -> RangeInclusive<usize> {
        self.cells() - self.n + 1..=self.cells()
    }

    /// Ensure idx addresses a real cell
    pub fn check_index(&self, idx: usize) -> Result<usize> {
        if idx < 1 || idx > self.cells() {
            return Err(PercolationError::index_out_of_range(idx, 1, self.cells()));
        }
        Ok(idx)
    }

    /// Same as [`Grid::check_index`] for indices that arrive as signed text input
    pub fn index_from_signed(&self, idx: i64) -> Result<usize> {
        match usize::try_from(idx) {
            Ok(idx) => self.check_index(idx),
            Err(_) => Err(PercolationError::index_out_of_range(idx, 1, self.cells())),
        }
    }

    /// Flat index of (row, col), both 1-based
    pub fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < 1 || row > self.n {
            return Err(PercolationError::InvalidArgument(format!(
                "row {row} is not between 1 and {}",
                self.n
            )));
        }
        if col < 1 || col > self.n {
            return Err(PercolationError::InvalidArgument(format!(
                "column {col} is not between 1 and {}",
                self.n
            )));
        }
        Ok((row - 1) * self.n + col)
    }

    /// (row, col) of a flat index
    pub fn coords(&self, idx: usize) -> Result<(usize, usize)> {
        let idx = self.check_index(idx)?;
        Ok(((idx - 1) / self.n + 1, (idx - 1) % self.n + 1))
    }

    /// Orthogonal neighbours of a valid cell index, in up/down/left/right order.
    ///
    /// Left and right are tested on the column, so no edge wraps into the next row.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> {
        let n = self.n;
        let cells = self.cells();
        let up = (idx > n).then(|| idx - n);
        let down = (idx + n <= cells).then(|| idx + n);
        let left = ((idx - 1) % n != 0).then(|| idx - 1);
        let right = (idx % n != 0).then(|| idx + 1);
        [up, down, left, right].into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.address_space(), 11);
        assert_eq!(grid.virtual_top(), 0);
        assert_eq!(grid.virtual_bottom(), 10);
        assert_eq!(grid.top_row(), 1..=3);
        assert_eq!(grid.bottom_row(), 7..=9);
    }

    #[test]
    fn test_single_cell_rows_overlap() {
        let grid = Grid::new(1).unwrap();
        assert_eq!(grid.top_row(), 1..=1);
        assert_eq!(grid.bottom_row(), 1..=1);
        assert_eq!(grid.neighbors(1).count(), 0);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(Grid::new(0).is_err());
        assert!(Grid::new(usize::MAX).is_err());
        // n*n + 2 fits in usize here, but the arrays would not fit in memory
        assert!(Grid::new(1usize << 31).is_err());
        assert!(Grid::new(1usize << 30).is_err());
    }

    #[test]
    fn test_index_coords() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.index(1, 1).unwrap(), 1);
        assert_eq!(grid.index(2, 3).unwrap(), 7);
        assert_eq!(grid.index(4, 4).unwrap(), 16);
        assert_eq!(grid.coords(7).unwrap(), (2, 3));
        assert_eq!(grid.coords(16).unwrap(), (4, 4));

        assert!(grid.index(0, 1).is_err());
        assert!(grid.index(1, 5).is_err());
        assert!(grid.coords(0).is_err());
        assert!(grid.coords(17).is_err());
    }

    #[test]
    fn test_signed_indices() {
        let grid = Grid::new(2).unwrap();
        assert_eq!(grid.index_from_signed(4).unwrap(), 4);
        assert!(grid.index_from_signed(-1).is_err());
        assert!(grid.index_from_signed(0).is_err());
        assert!(grid.index_from_signed(5).is_err());
    }

    #[test]
    fn test_neighbors_do_not_wrap() {
        let grid = Grid::new(3).unwrap();
        // Corners
        assert_eq!(grid.neighbors(1).collect::<Vec<_>>(), vec![4, 2]);
        assert_eq!(grid.neighbors(3).collect::<Vec<_>>(), vec![6, 2]);
        assert_eq!(grid.neighbors(7).collect::<Vec<_>>(), vec![4, 8]);
        assert_eq!(grid.neighbors(9).collect::<Vec<_>>(), vec![6, 8]);
        // Row ends must not link to the adjacent row
        assert_eq!(grid.neighbors(4).collect::<Vec<_>>(), vec![1, 7, 5]);
        assert_eq!(grid.neighbors(6).collect::<Vec<_>>(), vec![3, 9, 5]);
        // Center
        assert_eq!(grid.neighbors(5).collect::<Vec<_>>(), vec![2, 8, 4, 6]);
    }
}
