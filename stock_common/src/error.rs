//! Error types shared between client and server.
//!
//! The `StockError` enum unifies common failure cases for I/O, serialization,
//! channel communication, and requests the server refused, allowing crates to
//! propagate a single error type.
use std::io;

use crossbeam_channel::{RecvError, SendError};
use thiserror::Error;

use crate::protocol::{ErrorCode, ErrorPayload};

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum StockError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// The server answered with a structured error.
    #[error("Request rejected ({code}): {message}")]
    Rejected {
        /// Machine-readable error class.
        code: ErrorCode,
        /// Human-readable detail from the server.
        message: String,
    },

    /// The peer closed the connection before a full frame arrived.
    #[error("Connection closed by peer")]
    ConnectionClosed,
}

impl From<ErrorPayload> for StockError {
    fn from(payload: ErrorPayload) -> Self {
        StockError::Rejected {
            code: payload.code,
            message: payload.message,
        }
    }
}

impl<T> From<SendError<T>> for StockError {
    fn from(err: SendError<T>) -> Self {
        StockError::ChannelSend(err.to_string())
    }
}

impl From<RecvError> for StockError {
    fn from(err: RecvError) -> Self {
        StockError::ChannelRecv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_mentions_code_and_message() {
        let err = StockError::from(ErrorPayload::new(ErrorCode::NotFound, "no such security: X"));
        assert_eq!(
            err.to_string(),
            "Request rejected (not_found): no such security: X"
        );
    }

    #[test]
    fn send_to_dropped_receiver_is_channel_send() {
        let (tx, rx) = crossbeam_channel::bounded::<Result<(), StockError>>(1);
        drop(rx);
        let err = StockError::from(tx.send(Ok(())).unwrap_err());
        assert!(matches!(err, StockError::ChannelSend(_)));
    }
}
