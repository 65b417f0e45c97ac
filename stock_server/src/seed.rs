//! Start-up seeding of the ledger from a JSON file.
//!
//! The file holds an array of `{"name": ..., "price": ...}` objects. Each entry is
//! created through the ledger like any client request would be; entries the ledger
//! refuses (duplicates, bad names or prices) are logged and skipped.

use crate::ledger::PriceLedger;
use log::{info, warn};
use serde::Deserialize;
use stock_common::{Result, StockError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One security to create at start-up.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    /// Security name.
    pub name: String,
    /// Initial price.
    pub price: f64,
}

/// Parse seed entries from any reader.
pub fn parse_seed<R: Read>(reader: R) -> Result<Vec<SeedEntry>> {
    let entries = serde_json::from_reader(reader)?;
    Ok(entries)
}

/// Create every entry in `entries`, returning how many were accepted.
pub fn apply_seed(ledger: &PriceLedger, entries: &[SeedEntry]) -> usize {
    entries
        .iter()
        .filter(|entry| match ledger.create(&entry.name, entry.price) {
            Ok(_) => true,
            Err(e) => {
                warn!("Skipping seed entry {:?}: {}", entry.name, e);
                false
            }
        })
        .count()
}

/// Load `path` and seed `ledger` with it.
pub fn load_seed_file(ledger: &PriceLedger, path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| {
        StockError::Format(format!("Failed to open seed file {}: {}", path.display(), e))
    })?;
    let entries = parse_seed(BufReader::new(file))?;
    let created = apply_seed(ledger, &entries);
    info!(
        "Seeded {} of {} securities from {}",
        created,
        entries.len(),
        path.display()
    );
    Ok(created)
}
