//! Shared error types used across submodules.

use thiserror::Error;

use crate::io::npz::DatasetIoError;

/// Top-level error type for the crate.
///
/// All failures are deterministic functions of malformed input; nothing here
/// is retried, and validation happens at the request boundary before any
/// random draw so bad ranges never propagate as NaN.
#[derive(Debug, Error)]
pub enum EisError {
    /// Raised when a frequency or element range cannot define a draw, or a
    /// count falls below its minimum.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// Raised when an element is evaluated outside its analytic domain.
    /// Indicates an upstream sampling bug rather than a runtime condition.
    #[error("domain error: {0}")]
    Domain(String),
    /// Raised when a circuit id outside `1..=5` is requested.
    #[error("unsupported circuit id: {0}")]
    UnsupportedCircuit(u8),
    /// Raised when matrix or tensor dimensions disagree with the contract.
    #[error("shape error: {0}")]
    Shape(String),
    /// Wraps I/O failures from writers and readers.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Wraps dataset archive failures.
    #[error(transparent)]
    Dataset(#[from] DatasetIoError),
}
