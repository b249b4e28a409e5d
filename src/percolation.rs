/// Percolation model on an n-by-n grid
///
/// Two union-find instances share the same address space. `percolation_set`
/// links the virtual top to the first row and the virtual bottom to the last
/// row, which turns "does the system percolate" into a single `connected` call.
/// `full_set` only has the virtual top. Asking fullness through the set that
/// contains the virtual bottom would report every open cell attached to the
/// bottom row as full once the system percolates (backwash).
use crate::error::{PercolationError, Result};
use crate::grid::Grid;
use crate::union_find::DisjointSet;
use log::{debug, trace};

/// Display state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Blocked,
    /// Open but not reachable from the top
    Open,
    /// Open and connected to the top
    Full,
}

#[derive(Debug, Clone)]
pub struct PercolationModel {
    grid: Grid,
    /// Indexed by flat cell index; slots 0 and n*n+1 stay false
    open_sites: Vec<bool>,
    count_open_sites: usize,
    /// Connected to both virtual nodes; answers `percolates`
    percolation_set: DisjointSet,
    /// Connected to the virtual top only; answers `is_full`
    full_set: DisjointSet,
}

impl PercolationModel {
    /// Creates an n-by-n grid with every site blocked
    pub fn new(n: usize) -> Result<Self> {
        let grid = Grid::new(n)?;
        let length = grid.address_space();
        let top = grid.virtual_top();
        let bottom = grid.virtual_bottom();

        let mut percolation_set = DisjointSet::try_new(length)?;
        let mut full_set = DisjointSet::try_new(length)?;
        let mut open_sites = Vec::new();
        open_sites
            .try_reserve_exact(length)
            .map_err(|_| PercolationError::grid_size(n))?;
        open_sites.resize(length, false);

        for idx in grid.top_row() {
            percolation_set.union(top, idx)?;
            full_set.union(top, idx)?;
        }
        for idx in grid.bottom_row() {
            percolation_set.union(bottom, idx)?;
        }

        debug!("created {n}x{n} percolation model ({length} union-find elements)");

        Ok(PercolationModel {
            grid,
            open_sites,
            count_open_sites: 0,
            percolation_set,
            full_set,
        })
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Opens the site if it is not open already
    pub fn open(&mut self, idx: usize) -> Result<()> {
        let idx = self.grid.check_index(idx)?;
        if self.open_sites[idx] {
            return Ok(());
        }

        self.open_sites[idx] = true;
        self.count_open_sites += 1;
        trace!("opened site {idx} ({} open)", self.count_open_sites);

        let grid = self.grid;
        for neighbor in grid.neighbors(idx) {
            if self.open_sites[neighbor] {
                self.percolation_set.union(neighbor, idx)?;
                self.full_set.union(neighbor, idx)?;
                trace!("joined site {idx} with open neighbor {neighbor}");
            }
        }
        Ok(())
    }

    pub fn open_at(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = self.grid.index(row, col)?;
        self.open(idx)
    }

    pub fn is_open(&self, idx: usize) -> Result<bool> {
        let idx = self.grid.check_index(idx)?;
        Ok(self.open_sites[idx])
    }

    pub fn is_open_at(&self, row: usize, col: usize) -> Result<bool> {
        self.is_open(self.grid.index(row, col)?)
    }

    /// A site is full when it is open and reachable from the top row
    pub fn is_full(&mut self, idx: usize) -> Result<bool> {
        if !self.is_open(idx)? {
            return Ok(false);
        }
        self.full_set.connected(idx, self.grid.virtual_top())
    }

    pub fn is_full_at(&mut self, row: usize, col: usize) -> Result<bool> {
        let idx = self.grid.index(row, col)?;
        self.is_full(idx)
    }

    pub fn cell(&mut self, idx: usize) -> Result<Cell> {
        if self.is_full(idx)? {
            Ok(Cell::Full)
        } else if self.is_open(idx)? {
            Ok(Cell::Open)
        } else {
            Ok(Cell::Blocked)
        }
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.count_open_sites
    }

    /// Share of cells that are open, in [0, 1]
    pub fn open_fraction(&self) -> f64 {
        self.count_open_sites as f64 / self.grid.cells() as f64
    }

    /// Flat indices of open sites, ascending
    pub fn open_sites(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.grid.cells()).filter(move |&idx| self.open_sites[idx])
    }

    /// Flat indices of full sites, ascending
    pub fn full_sites(&mut self) -> Vec<usize> {
        let top = self.grid.virtual_top();
        let top_root = self.full_set.find_root(top);
        let open: Vec<usize> = self.open_sites().collect();
        open.into_iter()
            .filter(|&idx| self.full_set.find_root(idx) == top_root)
            .collect()
    }

    /// The system percolates when the virtual bottom is connected to the virtual top.
    ///
    /// A 1x1 grid has both virtual nodes seeded onto its only cell, so there the
    /// answer is the open flag of that cell.
    pub fn percolates(&mut self) -> bool {
        if self.grid.size() > 1 {
            let top = self.grid.virtual_top();
            let bottom = self.grid.virtual_bottom();
            self.percolation_set.find_root(top) == self.percolation_set.find_root(bottom)
        } else {
            self.open_sites[1]
        }
    }

    /// Root of every element of the fullness union-find, virtual nodes included.
    ///
    /// Returned by value; the set itself never leaves the model.
    pub fn full_set_roots(&mut self) -> Vec<usize> {
        self.full_set.roots()
    }
}
