//! Price history values exchanged between the ledger and its callers.
//!
//! A `SecuritySnapshot` is always a copy: the server hands these out so no caller
//! ever aliases the ledger's own records.
use serde::{Deserialize, Serialize};

/// One timestamped price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// UTC timestamp in milliseconds since Unix epoch, assigned by the server.
    pub timestamp: u64,
    /// Observed price; finite and non-negative.
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(timestamp: u64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Immutable copy of a security and its full price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySnapshot {
    /// Unique security name.
    pub name: String,
    /// Price history in chronological order.
    pub history: Vec<PricePoint>,
}

impl SecuritySnapshot {
    /// Most recent price point, if any.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.history.last()
    }

    /// Prices in chronological order, without timestamps.
    pub fn prices(&self) -> Vec<f64> {
        self.history.iter().map(|point| point.price).collect()
    }

    /// `true` if every timestamp is greater than or equal to its predecessor.
    pub fn is_chronological(&self) -> bool {
        self.history
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }
}
