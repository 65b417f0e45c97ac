//! Stock Client: a TCP client for the stock ledger server. It can create a security,
//! push price updates, print a security's history, replay a scripted session, or
//! drive securities with a random-walk price feed.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client --server-addr 127.0.0.1:10000 create AMC 1.0
//! stock_client update AMC 2.0
//! stock_client get AMC
//! stock_client demo
//! stock_client simulate AMC Gamestop --ticks 20 --interval-ms 250
//! ```
#![warn(missing_docs)]
mod args;
mod demo;
mod report;
mod sender;
mod simulator;

use crate::args::{Action, Args};
use crate::demo::run_demo;
use crate::report::log_security;
use crate::sender::StockClient;
use crate::simulator::Simulation;
use clap::Parser;
use log::{error, info};
use stock_common::{Result, StockError};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let server_addr = args.server_addr.trim().replace('"', "");
    info!("Connecting to TCP server at {}", server_addr);
    let mut client = StockClient::connect(&server_addr)?;

    let outcome = run(&mut client, args.action);
    if let Err(e) = &outcome {
        error!("Request failed: {}", e);
    }
    outcome
}

fn run(client: &mut StockClient, action: Action) -> Result<()> {
    match action {
        Action::Create { name, price } => {
            client.create(&name, price)?;
            info!("Created {} at {}", name, price);
        }
        Action::Update { name, price } => {
            client.update(&name, price)?;
            info!("Updated {} to {}", name, price);
        }
        Action::Get { name } => log_security(&client.get(&name)?),
        Action::Demo { pause_ms } => run_demo(client, Duration::from_millis(pause_ms))?,
        Action::Simulate {
            names,
            ticks,
            interval_ms,
            start_price,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            {
                let shutdown = shutdown.clone();
                ctrlc::set_handler(move || {
                    info!("Ctrl+C received. Stopping simulation...");
                    shutdown.store(true, Ordering::SeqCst);
                })
                .map_err(|e| StockError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
            }
            let simulation = Simulation {
                names,
                ticks,
                interval: Duration::from_millis(interval_ms),
                start_price,
            };
            info!("Simulation is running. Press Ctrl+C to exit.");
            simulation.run(client, &shutdown)?;
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
