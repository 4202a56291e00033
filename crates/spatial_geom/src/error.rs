//! Error types shared by the spatial indexes and the tesselator

use thiserror::Error;

/// Errors raised when constructing or driving geometry structures
///
/// Out-of-bounds insertions and removals of absent points are not errors;
/// those report `false` through the operation's return value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A structure was configured with dimensions or thresholds it cannot work with
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Input geometry is too degenerate to process
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Internal bookkeeping was found in a state it should never reach
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl GeometryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Convenience result alias
pub type GeometryResult<T> = Result<T, GeometryError>;
