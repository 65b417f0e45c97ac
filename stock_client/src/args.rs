//! Command-line arguments for the Stock Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, Subcommand};
use stock_common::net::default_server_addr;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Server address in the form `host:port`.
    #[clap(long, default_value_t = default_server_addr())]
    pub server_addr: String,

    /// Action to run against the server.
    #[command(subcommand)]
    pub action: Action,
}

/// Client actions.
#[derive(Debug, Subcommand, PartialEq)]
pub enum Action {
    /// Register a new security with its first price.
    Create {
        /// Security name.
        name: String,
        /// Initial price.
        price: f64,
    },
    /// Append a price to an existing security.
    Update {
        /// Security name.
        name: String,
        /// New price.
        price: f64,
    },
    /// Print a security with its full price history.
    Get {
        /// Security name.
        name: String,
    },
    /// Replay the scripted Gamestop/AMC session.
    Demo {
        /// Pause between rounds, in milliseconds.
        #[clap(long, default_value_t = 1000)]
        pause_ms: u64,
    },
    /// Push random-walk prices for the given securities.
    Simulate {
        /// Securities to simulate; created first if missing.
        #[clap(required = true)]
        names: Vec<String>,
        /// Number of price ticks per security (0 runs until Ctrl+C).
        #[clap(long, default_value_t = 10)]
        ticks: u64,
        /// Pause between ticks, in milliseconds.
        #[clap(long, default_value_t = 500)]
        interval_ms: u64,
        /// Price used when a security has to be created.
        #[clap(long, default_value_t = 100.0)]
        start_price: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create() {
        let args = Args::try_parse_from(["stock_client", "create", "AMC", "1.5"]).unwrap();
        assert_eq!(args.server_addr, "127.0.0.1:10000");
        assert_eq!(
            args.action,
            Action::Create {
                name: "AMC".into(),
                price: 1.5
            }
        );
    }

    #[test]
    fn parses_simulate_with_options() {
        let args = Args::try_parse_from([
            "stock_client",
            "--server-addr",
            "10.0.0.2:9000",
            "simulate",
            "AMC",
            "GME",
            "--ticks",
            "3",
        ])
        .unwrap();
        assert_eq!(args.server_addr, "10.0.0.2:9000");
        match args.action {
            Action::Simulate {
                names,
                ticks,
                interval_ms,
                ..
            } => {
                assert_eq!(names, vec!["AMC", "GME"]);
                assert_eq!(ticks, 3);
                assert_eq!(interval_ms, 500);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn simulate_requires_names() {
        assert!(Args::try_parse_from(["stock_client", "simulate"]).is_err());
    }
}
