/// Error type shared by the union-find and the percolation model
///
/// Every rejected call is a contract violation by the caller, so there is a
/// single kind. Validation always runs before any state is touched.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercolationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl PercolationError {
    pub(crate) fn index_out_of_range(index: impl std::fmt::Display, lo: usize, hi: usize) -> Self {
        PercolationError::InvalidArgument(format!("index {index} is not between {lo} and {hi}"))
    }

    pub(crate) fn grid_size(n: usize) -> Self {
        PercolationError::InvalidArgument(format!(
            "grid size {n} must be at least 1 and small enough to address n*n + 2 sites"
        ))
    }
}

pub type Result<T> = std::result::Result<T, PercolationError>;
