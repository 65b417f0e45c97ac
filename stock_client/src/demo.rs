//! Scripted client session.
//!
//! Creates two securities, then runs rounds of updates followed by reads so the
//! growing price histories can be watched in the log.
use crate::sender::StockClient;
use crate::report::log_security;
use log::{info, warn};
use stock_common::{ErrorCode, Result, StockError};
use std::thread;
use std::time::Duration;

/// Initial prices, created once.
const OPENING: [(&str, f64); 2] = [("Gamestop", 4.0), ("AMC", 1.0)];

/// Update rounds; each round sets both securities, then reads them back.
const ROUNDS: [[(&str, f64); 2]; 7] = [
    [("Gamestop", 5.0), ("AMC", 2.0)],
    [("Gamestop", 10.0), ("AMC", 5.0)],
    [("Gamestop", 20.0), ("AMC", 8.0)],
    [("Gamestop", 30.0), ("AMC", 12.0)],
    [("Gamestop", 50.0), ("AMC", 16.0)],
    [("Gamestop", 100.0), ("AMC", 18.0)],
    [("Gamestop", 200.0), ("AMC", 25.0)],
];

/// Run the scripted session, pausing `pause` between rounds.
pub fn run_demo(client: &mut StockClient, pause: Duration) -> Result<()> {
    let separator = "--".repeat(50);

    for (name, price) in OPENING {
        info!("Create stock {} at {}", name, price);
        allow_existing(name, client.create(name, price))?;
    }
    info!("{}", separator);
    thread::sleep(pause);

    for (round, updates) in ROUNDS.iter().enumerate() {
        for (name, price) in updates {
            info!("Update stock {} to {}", name, price);
            client.update(name, *price)?;
        }
        for (name, _) in updates {
            log_security(&client.get(name)?);
        }
        info!("{}", separator);
        if round + 1 < ROUNDS.len() {
            thread::sleep(pause);
        }
    }
    Ok(())
}

/// Treat `already_exists` from a create as success so the session can be replayed
/// against a server that still holds the previous run's securities.
fn allow_existing(name: &str, outcome: Result<()>) -> Result<()> {
    match outcome {
        Err(StockError::Rejected {
            code: ErrorCode::AlreadyExists,
            message,
        }) => {
            warn!("Stock {} already exists, continuing: {}", name, message);
            Ok(())
        }
        other => other,
    }
}
