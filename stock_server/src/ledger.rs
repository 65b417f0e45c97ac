//! Authoritative in-memory store of all tracked securities.
//!
//! `PriceLedger` maps a security name to its price history and owns every rule about
//! mutating it. It exposes three core operations:
//!
//! - `PriceLedger::create(name, price)`: register a new name with its first price.
//! - `PriceLedger::update(name, price)`: append a price to an existing name.
//! - `PriceLedger::get(name)`: copy out a name's full history.
//!
//! Concurrency:
//! - Records live in a `DashMap`, a hash map split into independently locked shards.
//!   Each operation holds the lock of exactly one shard for its whole critical
//!   section and never takes a second one, so operations on one name are
//!   linearizable and no deadlock is possible.
//! - Names in different shards never wait on each other. Two names that hash to the
//!   same shard contend only for the few instructions of a push or clone; there is
//!   no global lock.
//! - Create uses the entry API, so check-and-insert is a single atomic step.
//! - Update stamps the new point while holding the write lock, so insertion order
//!   and timestamp order agree.
//!
//! Every failed call leaves the ledger exactly as it was.

use crate::error::LedgerError;
use crate::model::security::Security;
use crate::model::validation::{validate_name, validate_price};
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::debug;
use stock_common::{PricePoint, SecuritySnapshot};

/// Keyed store of securities safe to share between threads (`Arc<PriceLedger>`).
#[derive(Debug, Default)]
pub struct PriceLedger {
    securities: DashMap<String, Security>,
}

impl PriceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            securities: DashMap::new(),
        }
    }

    /// Register `name` with a single price point stamped now.
    ///
    /// Fails with `AlreadyExists` if the name is tracked, or with an invalid
    /// argument error for a malformed name or price.
    pub fn create(&self, name: &str, price: f64) -> Result<PricePoint, LedgerError> {
        validate_name(name)?;
        validate_price(price)?;

        match self.securities.entry(String::from(name)) {
            Entry::Occupied(_) => Err(LedgerError::AlreadyExists(String::from(name))),
            Entry::Vacant(slot) => {
                let point = PricePoint::new(now_millis(), price);
                slot.insert(Security::new(name, point.timestamp, point.price));
                debug!("Created {} at {}", name, point.timestamp);
                Ok(point)
            }
        }
    }

    /// Append a price point stamped now to the history of `name`.
    ///
    /// Fails with `NotFound` if the name is not tracked.
    pub fn update(&self, name: &str, price: f64) -> Result<PricePoint, LedgerError> {
        validate_name(name)?;
        validate_price(price)?;

        let mut security = self
            .securities
            .get_mut(name)
            .ok_or_else(|| LedgerError::NotFound(String::from(name)))?;
        let point = security.record(now_millis(), price);
        debug!(
            "Updated {} at {} ({} points)",
            security.name(),
            point.timestamp,
            security.history_len()
        );
        Ok(point)
    }

    /// Copy of `name` with its full chronological history.
    ///
    /// Fails with `NotFound` if the name is not tracked.
    pub fn get(&self, name: &str) -> Result<SecuritySnapshot, LedgerError> {
        validate_name(name)?;

        self.securities
            .get(name)
            .map(|security| security.snapshot())
            .ok_or_else(|| LedgerError::NotFound(String::from(name)))
    }

    /// Number of tracked securities.
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    /// `true` if no security is tracked.
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

/// Current UTC time in milliseconds since Unix epoch.
fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
