//! Wire protocol shared by client and server.
//!
//! Frames are newline-delimited JSON objects sent over a TCP connection. Each
//! request gets exactly one response, in order:
//!
//! - `{"op":"create","name":"AMC","price":1.0}` → `{"status":"ok"}`
//! - `{"op":"update","name":"AMC","price":2.0}` → `{"status":"ok"}`
//! - `{"op":"get","name":"AMC"}` → `{"status":"security","name":"AMC","history":[...]}`
//!
//! Failures come back as `{"status":"error","code":"not_found","message":"..."}`.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::security::SecuritySnapshot;

/// Payload of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    /// Security name.
    pub name: String,
    /// Price to record.
    pub price: f64,
}

impl PriceUpdate {
    /// Build an update payload.
    pub fn new(name: &str, price: f64) -> Self {
        Self {
            name: String::from(name),
            price,
        }
    }
}

/// Payload of get requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityName {
    /// Security name.
    pub name: String,
}

impl SecurityName {
    /// Build a name payload.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }
}

/// Request frame sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Register a new security with its first price.
    Create(PriceUpdate),
    /// Append a price to an existing security.
    Update(PriceUpdate),
    /// Fetch a security with its full history.
    Get(SecurityName),
}

impl Request {
    /// Name of the security the request targets.
    pub fn name(&self) -> &str {
        match self {
            Request::Create(update) | Request::Update(update) => &update.name,
            Request::Get(name) => &name.name,
        }
    }

    /// Encode as a single newline-terminated JSON frame.
    pub fn to_frame(&self) -> serde_json::Result<Vec<u8>> {
        encode_frame(self)
    }
}

/// Machine-readable error class carried in error responses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    /// Empty or malformed name, negative or non-finite price.
    InvalidArgument,
    /// Create on a name that is already tracked.
    AlreadyExists,
    /// Update or get on a name that is not tracked.
    NotFound,
    /// The frame could not be decoded into a request.
    BadRequest,
    /// The server reached a state that should be impossible.
    Internal,
}

/// Structured error returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error class.
    pub code: ErrorCode,
    /// Human-readable detail.
    pub message: String,
}

impl ErrorPayload {
    /// Build an error payload.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Response frame sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Mutation accepted; no payload.
    Ok,
    /// Result of a get request.
    Security(SecuritySnapshot),
    /// Request failed.
    Error(ErrorPayload),
}

impl Response {
    /// Shorthand for an error response.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Response::Error(ErrorPayload::new(code, message))
    }

    /// Encode as a single newline-terminated JSON frame.
    pub fn to_frame(&self) -> serde_json::Result<Vec<u8>> {
        encode_frame(self)
    }
}

fn encode_frame<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut frame = serde_json::to_vec(value)?;
    frame.push(b'\n');
    Ok(frame)
}
