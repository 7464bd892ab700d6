use thiserror::Error;

/// Errors raised by the grid model and the search engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Selector is not one of "BFS", "DFS", "A*"
    #[error("unknown algorithm '{0}' (expected one of BFS, A*, DFS)")]
    InvalidAlgorithm(String),

    /// Start/end out of bounds, equal, or placed on an unusable cell
    #[error("invalid endpoint {cell}: {reason}")]
    InvalidEndpoint { cell: usize, reason: &'static str },

    /// Cell index outside [0, size²)
    #[error("cell index {index} out of bounds for grid of {len} cells")]
    InvalidIndex { index: usize, len: usize },

    /// Grid snapshot contains a code other than 0..=3
    #[error("invalid cell code {code} at index {index}")]
    InvalidCellCode { index: usize, code: u8 },

    /// Grid snapshot length does not match size²
    #[error("grid of side {size} needs {expected} cells, got {actual}")]
    InvalidDimensions {
        size: usize,
        expected: usize,
        actual: usize,
    },
}
