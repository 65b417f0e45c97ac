//! Ledger-owned security record.
//!
//! A `Security` keeps the full price history of one name. It is only ever touched
//! through the ledger while the ledger holds the entry's lock, and it never leaves
//! the ledger: callers get a `SecuritySnapshot` copy instead.
//!
//! Design notes:
//! - The history is never empty; the only constructor takes the first price point.
//! - Timestamps are supplied by the ledger, not the client. If the wall clock
//!   steps backwards the new point is clamped to the previous timestamp, so the
//!   history stays non-decreasing.

use stock_common::{PricePoint, SecuritySnapshot};

/// Named security with its chronological price history.
#[derive(Debug, Clone)]
pub struct Security {
    name: String,
    history: Vec<PricePoint>,
}

impl Security {
    /// Create a security whose history starts with a single point.
    pub fn new(name: &str, timestamp: u64, price: f64) -> Self {
        Self {
            name: String::from(name),
            history: vec![PricePoint::new(timestamp, price)],
        }
    }

    /// Append a price observed at `timestamp` and return the stored point.
    pub fn record(&mut self, timestamp: u64, price: f64) -> PricePoint {
        let timestamp = self
            .history
            .last()
            .map_or(timestamp, |last| timestamp.max(last.timestamp));
        let point = PricePoint::new(timestamp, price);
        self.history.push(point);
        point
    }

    /// Security name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of recorded price points.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Copy of the security and its full history.
    pub fn snapshot(&self) -> SecuritySnapshot {
        SecuritySnapshot {
            name: self.name.clone(),
            history: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_point() {
        let security = Security::new("AMC", 100, 1.0);
        assert_eq!(security.name(), "AMC");
        assert_eq!(security.history_len(), 1);
        assert_eq!(security.snapshot().history, vec![PricePoint::new(100, 1.0)]);
    }

    #[test]
    fn record_appends_in_order() {
        let mut security = Security::new("AMC", 100, 1.0);
        security.record(150, 2.0);
        security.record(200, 5.0);
        assert_eq!(security.snapshot().prices(), vec![1.0, 2.0, 5.0]);
    }

    #[test]
    fn clock_step_back_is_clamped() {
        let mut security = Security::new("AMC", 1_000, 1.0);
        let point = security.record(900, 2.0);
        assert_eq!(point.timestamp, 1_000);

        let snapshot = security.snapshot();
        assert!(snapshot.is_chronological());
        assert_eq!(snapshot.prices(), vec![1.0, 2.0]);
    }
}
