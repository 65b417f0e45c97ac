//! Stock price ledger server.
//!
//! The server keeps named securities and their price histories in memory and
//! serves create/update/get requests over TCP. Building blocks:
//!
//! - `ledger`: `PriceLedger`, the authoritative concurrent store.
//! - `service`: `StockService`, validating requests and mapping ledger outcomes
//!   to protocol responses.
//! - `receiver`: `RequestReceiver`, the TCP accept loop with one thread per client.
//! - `seed`: optional start-up population from a JSON file.
//! - `model`: the ledger-owned `Security` record and input validation.
//! - `error`: `LedgerError`, the domain failures of the ledger.
#![warn(missing_docs)]
pub mod args;
pub mod error;
pub mod ledger;
pub mod model;
pub mod receiver;
pub mod seed;
pub mod service;

pub use error::LedgerError;
pub use ledger::PriceLedger;
pub use receiver::RequestReceiver;
pub use service::StockService;
