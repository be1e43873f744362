use thiserror::Error;

/// Failures reported by [compute_path](crate::compute_path) and grid construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The request or grid violated a precondition; nothing was computed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The search ran out of candidate nodes before reaching the goal.
    #[error("no path found between start and goal")]
    NoPathFound,
}

pub type Result<T> = std::result::Result<T, PathError>;
