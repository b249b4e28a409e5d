/// Plain-text views of a percolation model
///
/// `#` blocked, `.` open, `~` full. One grid row per line.
use crate::percolation::{Cell, PercolationModel};
use std::fmt;

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Blocked => '#',
            Cell::Open => '.',
            Cell::Full => '~',
        }
    }
}

/// Render the cell map of a model
pub fn render_cells(model: &mut PercolationModel) -> String {
    let n = model.size();
    let mut cells = vec![Cell::Blocked; n * n + 1];
    for idx in model.open_sites() {
        cells[idx] = Cell::Open;
    }
    for idx in model.full_sites() {
        cells[idx] = Cell::Full;
    }

    let mut out = String::with_capacity(n * (n + 1));
    for (idx, cell) in cells.iter().enumerate().skip(1) {
        out.push(cell.symbol());
        if idx % n == 0 {
            out.push('\n');
        }
    }
    out
}

/// Lay out union-find roots (as from [`PercolationModel::full_set_roots`]) as an n-by-n grid
///
/// First line is the root of the virtual top, last line the root of the virtual
/// bottom, with the grid rows in between.
pub fn render_roots(roots: &[usize], n: usize) -> String {
    if n == 0 || roots.len() != n * n + 2 {
        return String::new();
    }

    let mut lines = vec![roots[0].to_string()];
    lines.extend(roots[1..=n * n].chunks(n).map(|row| {
        row.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\t")
    }));
    lines.push(roots[n * n + 1].to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

impl fmt::Display for PercolationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display only has &self; path compression needs a scratch copy
        let mut model = self.clone();
        f.write_str(&render_cells(&mut model))
    }
}
