//! Command-line arguments for the stock server.
use clap::Parser;
use std::path::PathBuf;
use stock_common::net::{DEFAULT_BIND_ADDRESS, DEFAULT_PORT, addr};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// IP address to listen on.
    #[clap(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// TCP port to listen on.
    #[clap(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Optional JSON file with `[{"name": ..., "price": ...}]` entries created at start-up.
    #[clap(long)]
    pub seed_file: Option<PathBuf>,
}

impl Args {
    /// Listen address in `ip:port` form.
    pub fn listen_addr(&self) -> String {
        addr(self.bind_address.trim(), self.port)
    }
}
