//! Core error type.
//!
//! Sub-crates define their own error enums; `WmError` covers the failures
//! that can happen inside `wm-core` itself.

use thiserror::Error;

/// The error type for `wm-core`.
#[derive(Debug, Error)]
pub enum WmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wm-core`.
pub type WmResult<T> = Result<T, WmError>;
