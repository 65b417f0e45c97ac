//! Random-walk price feed.
//!
//! The simulator makes sure every requested security exists, then pushes one price
//! update per security per tick. Each new price is a small random step around the
//! last one, so consecutive reads of a security show a plausible price history.
use crate::sender::StockClient;
use log::info;
use rand::Rng;
use stock_common::{ErrorCode, Result, StockError};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

/// Lowest price the random walk may produce.
const MIN_PRICE: f64 = 0.01;

/// Settings for one simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Securities to drive.
    pub names: Vec<String>,
    /// Number of ticks; `0` runs until shutdown.
    pub ticks: u64,
    /// Pause between ticks.
    pub interval: Duration,
    /// Price used for securities that have to be created.
    pub start_price: f64,
}

/// Calculate the next price using a small random walk around `current_price`.
///
/// The change is sampled uniformly from `[-1%, +1%)`, rounded to cents and clamped
/// to `MIN_PRICE` so the ledger never sees a zero or negative walk result.
pub fn next_price(current_price: f64) -> f64 {
    let mut rng = rand::rng();
    let change: f64 = rng.random_range(-0.01..0.01);
    let new_price = (current_price * (1.0 + change) * 100.0).round() / 100.0;
    new_price.max(MIN_PRICE)
}

impl Simulation {
    /// Run the simulation against `client` until the tick budget is spent or
    /// `shutdown` is raised.
    pub fn run(&self, client: &mut StockClient, shutdown: &Arc<AtomicBool>) -> Result<()> {
        let mut prices = Vec::with_capacity(self.names.len());
        for name in &self.names {
            prices.push(self.ensure_exists(client, name)?);
        }

        let mut tick = 0u64;
        while !shutdown.load(Ordering::Relaxed) && (self.ticks == 0 || tick < self.ticks) {
            for (name, price) in self.names.iter().zip(prices.iter_mut()) {
                *price = next_price(*price);
                client.update(name, *price)?;
                info!("TICK {} {} Price={:.2}", tick + 1, name, price);
            }
            tick += 1;
            thread::sleep(self.interval);
        }
        info!("Simulation stopped after {} ticks", tick);
        Ok(())
    }

    /// Create `name` if needed and return its latest price.
    fn ensure_exists(&self, client: &mut StockClient, name: &str) -> Result<f64> {
        match client.create(name, self.start_price) {
            Ok(()) => {
                info!("Created {} at {:.2}", name, self.start_price);
                Ok(self.start_price)
            }
            Err(StockError::Rejected {
                code: ErrorCode::AlreadyExists,
                ..
            }) => {
                let snapshot = client.get(name)?;
                let latest = snapshot.latest().map_or(self.start_price, |point| point.price);
                info!("Continuing {} from {:.2}", name, latest);
                Ok(latest)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_price_stays_within_one_percent() {
        for _ in 0..1_000 {
            let price = next_price(100.0);
            assert!((99.0..=101.0).contains(&price), "{price}");
        }
    }

    #[test]
    fn next_price_never_drops_below_floor() {
        for _ in 0..100 {
            assert!(next_price(0.0) >= MIN_PRICE);
        }
    }
}
