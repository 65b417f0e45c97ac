//! Error types produced by the price ledger.
//!
//! `LedgerError` is the domain error surface: every failed ledger call returns one of
//! these and leaves the ledger untouched. Each variant maps to exactly one wire-level
//! `ErrorCode`, which is how `StockService` reports it to the caller.

use stock_common::{ErrorCode, ErrorPayload};
use thiserror::Error;

/// Reasons a ledger operation was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// The security name is empty or malformed.
    #[error("Invalid security name {name:?}: {reason}")]
    InvalidName {
        /// The offending name as received.
        name: String,
        /// What made it invalid.
        reason: &'static str,
    },

    /// The price is negative, NaN or infinite.
    #[error("Invalid price {0}: must be finite and non-negative")]
    InvalidPrice(f64),

    /// Create was called for a name that is already tracked.
    #[error("Security already exists: {0}")]
    AlreadyExists(String),

    /// Update or get was called for a name that is not tracked.
    #[error("Security not found: {0}")]
    NotFound(String),
}

impl LedgerError {
    /// Wire-level error class for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::InvalidName { .. } | LedgerError::InvalidPrice(_) => {
                ErrorCode::InvalidArgument
            }
            LedgerError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            LedgerError::NotFound(_) => ErrorCode::NotFound,
        }
    }
}

impl From<&LedgerError> for ErrorPayload {
    fn from(err: &LedgerError) -> Self {
        ErrorPayload::new(err.code(), err.to_string())
    }
}
