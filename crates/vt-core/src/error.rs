//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `vt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("tick delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),
}

/// Shorthand result type for `vt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
