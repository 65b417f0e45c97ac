//! Domain models and utilities for the stock server.
//!
//! This module groups the core data types used by the ledger and the service:
//! - `security`: the ledger-owned `Security` record and its price history.
//! - `validation`: name and price checks shared by service and ledger.

pub mod security;
pub mod validation;
