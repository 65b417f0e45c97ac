//! Stock ledger TCP server.
//!
//! This binary listens on a TCP socket and serves create/update/get requests for named
//! securities. Internally, it wires together three main building blocks:
//!
//! - `PriceLedger`: the in-memory store of every security's price history, shared by
//!   all connections through an `Arc`.
//! - `StockService`: validates each request, calls into the ledger, and turns the
//!   outcome into a response frame.
//! - `RequestReceiver`: accepts TCP connections and spawns one thread per client that
//!   reads newline-delimited JSON requests and writes responses back.
//!
//! Concurrency and shutdown:
//! - Crossbeam `select!` multiplexes a Ctrl+C signal and the receiver thread's exit.
//! - Any per-connection I/O or decoding error is logged; that connection closes
//!   without impacting other clients or the ledger.
//!
//! Network protocol (high-level):
//! - Bind address: `127.0.0.1:10000` by default (see `--bind-address`, `--port`).
//! - One JSON request per line, e.g. `{"op":"create","name":"AMC","price":1.0}`.
//! - One JSON response per request, e.g. `{"status":"ok"}`.
#![warn(missing_docs)]
use clap::Parser;
use crossbeam_channel::{bounded, select};
use log::{error, info};
use stock_common::{Result, StockError};
use stock_server::args::Args;
use stock_server::seed::load_seed_file;
use stock_server::{PriceLedger, RequestReceiver, StockService};
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let ledger = Arc::new(PriceLedger::new());
    if let Some(path) = &args.seed_file {
        load_seed_file(&ledger, path)?;
    }
    let service = Arc::new(StockService::new(Arc::clone(&ledger)));

    let receiver = RequestReceiver::new(&args.listen_addr())?;
    info!("Stock server listening on: {}", receiver.local_addr()?);

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| StockError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;

    let (done_tx, done_rx) = bounded::<Result<()>>(1);
    thread::spawn(move || {
        if let Err(e) = done_tx.send(receiver.receive_loop(service)) {
            error!("Failed to report receiver exit: {}", StockError::from(e));
        }
    });

    select! {
        recv(shutdown_rx) -> _ => {
            info!("Ctrl+C received. Shutting down with {} securities tracked.", ledger.len());
            Ok(())
        },
        recv(done_rx) -> outcome => {
            let outcome = outcome?;
            if let Err(e) = &outcome {
                error!("Receiver loop failed: {}", e);
            }
            outcome
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
