// Library exports for percolation
pub mod error;
pub mod grid;
pub mod percolation;
pub mod render;
pub mod script;
pub mod timing;
pub mod union_find;

pub use error::{PercolationError, Result};
pub use grid::Grid;
pub use percolation::{Cell, PercolationModel};
pub use union_find::DisjointSet;
