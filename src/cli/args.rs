//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Crypto price ticker and VPN/proxy exposure checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Override config directory (default: platform config dir, honors `XDG_CONFIG_HOME`)
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        env = "NETPULSE_CONFIG_DIR",
        global = true
    )]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the spot price every few seconds until Ctrl+C
    Price,
    /// Run the VPN/proxy exposure probes once and print a report
    Check,
    /// Show config directory, log location, and effective settings
    Info,
}
