//! CLI command handlers.

use std::path::Path;

use color_eyre::Result;

use crate::cli::args::Commands;
use crate::config::{self, AppConfig};
use crate::constants;
use crate::core::exposure::{self, DetectionConfig, ExposureChecker};
use crate::core::http::CurlClient;
use crate::core::interrupt;
use crate::core::ticker::{self, TickerConfig};
use crate::platform::{self, SysinfoInventory};

/// Dispatches a parsed subcommand.
///
/// # Errors
///
/// Returns an error if writing the ticker output to stdout fails.
pub fn handle_command(
    command: &Commands,
    app_config: &AppConfig,
    config_dir: &Path,
    config_dir_source: &str,
) -> Result<()> {
    match command {
        Commands::Price => handle_price(app_config),
        Commands::Check => {
            handle_check(app_config);
            Ok(())
        }
        Commands::Info => {
            handle_info(app_config, config_dir, config_dir_source);
            Ok(())
        }
    }
}

/// Runs the ticker until Ctrl+C.
fn handle_price(app_config: &AppConfig) -> Result<()> {
    let stop = interrupt::install();
    let ticker_config = TickerConfig::from(app_config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ticker::run(&CurlClient, &ticker_config, stop, &mut out)?;
    Ok(())
}

/// Runs every exposure probe once and prints the table and verdict.
fn handle_check(app_config: &AppConfig) {
    let detection_config = DetectionConfig::from(app_config);
    let registry = platform::default_proxy_registry();
    let checker = ExposureChecker {
        config: &detection_config,
        http: &CurlClient,
        inventory: &SysinfoInventory,
        registry: registry.as_ref(),
        env: &exposure::process_env,
    };

    let results = checker.run_all();
    print!("{}", exposure::render_report(&results));
    println!("\n{}", exposure::verdict(&results));
}

/// Prints where things live and the effective settings.
fn handle_info(app_config: &AppConfig, config_dir: &Path, config_dir_source: &str) {
    let config_file = config::config_file_path(config_dir);
    let config_state = if config_file.exists() {
        "loaded"
    } else {
        "not found, using defaults"
    };

    println!("{} v{}", constants::APP_NAME, constants::APP_VERSION);
    println!();
    println!(
        "Config dir:    {} ({config_dir_source})",
        config_dir.display()
    );
    println!("Config file:   {} ({config_state})", config_file.display());
    println!("Logs dir:      {}", config::logs_dir(config_dir).display());
    println!("Log level:     {}", app_config.log_level);
    println!();
    println!(
        "Price feed:    {} ({}/{}, every {}s)",
        app_config.price_api_url,
        app_config.asset_id,
        app_config.vs_currency,
        app_config.refresh_interval
    );
    println!(
        "IP metadata:   {} (timeout {}s)",
        app_config.ip_api_url, app_config.ip_api_timeout
    );
    println!(
        "VPN processes: {}",
        app_config.vpn_process_names.join(", ")
    );
    println!(
        "VPN ifaces:    {}",
        app_config.vpn_interface_patterns.join(", ")
    );
}
