//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `LgError` as one variant
//! via `From`, so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `lg-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LgError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `lg-*` crates.
pub type LgResult<T> = Result<T, LgError>;
