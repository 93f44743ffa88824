//! # netpulse
//!
//! Two small network utilities behind one binary:
//! - `price`: polls a public price API and prints a boxed spot price report
//!   until Ctrl+C.
//! - `check`: runs four VPN/proxy exposure heuristics once and prints a
//!   table with a final verdict.
//!
//! ## Modules
//! - [`cli`]: Command-line argument parsing and command handlers.
//! - [`config`]: Configuration management.
//! - [`core`]: HTTP transport, the ticker loop, and the exposure probes.
//! - [`logger`]: In-memory and file logging.
//! - [`platform`]: OS queries (registry, interfaces, processes).

mod cli;
mod config;
mod constants;
mod core;
mod logger;
mod platform;
mod utils;

use clap::Parser;
use cli::args::Args;
use color_eyre::Result;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments
    let args = Args::parse();

    // Determine how config_dir was provided (for `info` command)
    let config_dir_source = match &args.config_dir {
        Some(cli_val) => {
            let from_env = std::env::var_os(constants::CONFIG_DIR_ENV)
                .is_some_and(|env_val| env_val == cli_val.as_os_str());
            if from_env {
                "from NETPULSE_CONFIG_DIR"
            } else {
                "from --config-dir"
            }
        }
        None => "default",
    };

    // Resolve config directory (CLI flag > XDG > default)
    let config_dir = config::resolve_config_dir(args.config_dir.as_ref())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config directory: {e}"))?;

    // Load config.toml (or use defaults)
    let app_config = match config::load_config(&config_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Fix the file or remove it to use defaults:");
            eprintln!("  rm {}", config::config_file_path(&config_dir).display());
            std::process::exit(1);
        }
    };

    logger::configure(&app_config.log_level);
    logger::enable_file_sink(
        &config::logs_dir(&config_dir),
        app_config.log_rotation_size,
        app_config.log_retention_days,
    );
    log_info!(
        "APP",
        "{} v{} starting ({:?})",
        constants::APP_NAME,
        constants::APP_VERSION,
        args.command
    );

    cli::commands::handle_command(&args.command, &app_config, &config_dir, config_dir_source)
}
