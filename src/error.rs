//! Error types.

use thiserror::Error;

/// Fit-content failure for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("node `{node_id}`: width must be explicitly set when lines = 0 or lines > 1 (lines = {line_count})")]
    InvalidConfiguration { node_id: String, line_count: u32 },
}

/// Layout session failure.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("taffy error: {0}")]
    Taffy(#[from] taffy::TaffyError),

    #[error("unknown template node: {0}")]
    UnknownNode(usize),

    #[error(transparent)]
    Fit(#[from] FitError),
}

pub type FitResult<T> = Result<T, FitError>;
pub type LayoutResult<T> = Result<T, LayoutError>;
