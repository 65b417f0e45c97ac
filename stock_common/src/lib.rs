//!
//! Common types and utilities shared by the stock server and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `StockError` used across the workspace.
//! - `result`: handy `Result<T, StockError>` alias.
//! - `security`: price points and security snapshots exchanged on the wire.
//! - `protocol`: request/response frames exchanged between client and server.
//! - `net`: networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod protocol;
pub mod result;
pub mod security;

pub use error::StockError;
pub use protocol::{ErrorCode, ErrorPayload, PriceUpdate, Request, Response, SecurityName};
pub use result::Result;
pub use security::{PricePoint, SecuritySnapshot};
