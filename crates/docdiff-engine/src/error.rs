//! Error types for the engine crate.

use crate::result::Side;

/// Errors that can occur before alignment starts.
///
/// Alignment, hunk building, and projection themselves never fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EngineError {
    /// An input exceeded the configured item budget.
    #[error("{side} document has {len} items, exceeding the limit of {limit}")]
    InputTooLarge { side: Side, len: usize, limit: usize },

    /// The engine configuration is unusable.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
