//! Application configuration management.
//!
//! Handles config directory resolution (CLI flag > XDG > default) and loading
//! `config.toml`. Every setting has a compiled-in default from
//! [`crate::constants`], so running without a config file reproduces the
//! stock behaviour exactly.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants;

/// User-configurable application settings.
///
/// All fields have sensible defaults. Users can override any subset via
/// `config.toml` in the config directory -- missing fields use defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Price API endpoint.
    pub price_api_url: String,
    /// Asset id passed as `ids` to the price API.
    pub asset_id: String,
    /// Ticker symbol shown in the report header.
    pub asset_symbol: String,
    /// Quote currency passed as `vs_currencies`.
    pub vs_currency: String,
    /// Seconds between price polls.
    pub refresh_interval: u64,
    /// Price request timeout in seconds.
    pub price_api_timeout: u64,
    /// IP metadata endpoint used by the exposure checker.
    pub ip_api_url: String,
    /// IP metadata request timeout in seconds.
    pub ip_api_timeout: u64,
    /// Organization/ASN keywords that indicate a VPN provider.
    pub vpn_asn_keywords: Vec<String>,
    /// Process name fragments of known VPN clients.
    pub vpn_process_names: Vec<String>,
    /// Interface name fragments of VPN tunnels.
    pub vpn_interface_patterns: Vec<String>,
    /// Minimum log level written to the log (`"debug"`, `"info"`, `"warning"`, `"error"`).
    pub log_level: String,
    /// Maximum log file size in bytes before rotation.
    pub log_rotation_size: u64,
    /// Number of days to retain old log files.
    pub log_retention_days: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            price_api_url: constants::DEFAULT_PRICE_API_URL.to_string(),
            asset_id: constants::DEFAULT_ASSET_ID.to_string(),
            asset_symbol: constants::DEFAULT_ASSET_SYMBOL.to_string(),
            vs_currency: constants::DEFAULT_VS_CURRENCY.to_string(),
            refresh_interval: constants::DEFAULT_REFRESH_INTERVAL,
            price_api_timeout: constants::DEFAULT_PRICE_API_TIMEOUT,
            ip_api_url: constants::DEFAULT_IP_API_URL.to_string(),
            ip_api_timeout: constants::DEFAULT_IP_API_TIMEOUT,
            vpn_asn_keywords: to_owned_list(&constants::DEFAULT_VPN_ASN_KEYWORDS),
            vpn_process_names: to_owned_list(&constants::DEFAULT_VPN_PROCESS_NAMES),
            vpn_interface_patterns: to_owned_list(&constants::DEFAULT_VPN_INTERFACE_PATTERNS),
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
            log_rotation_size: constants::DEFAULT_LOG_ROTATION_SIZE,
            log_retention_days: constants::DEFAULT_LOG_RETENTION_DAYS,
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Resolves the config directory path.
///
/// Precedence: CLI flag / `NETPULSE_CONFIG_DIR` > `XDG_CONFIG_HOME` > `~/.config/netpulse`.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined or created.
pub fn resolve_config_dir(cli_override: Option<&PathBuf>) -> std::io::Result<PathBuf> {
    let path = if let Some(dir) = cli_override {
        // Resolve relative paths to absolute so the config dir is stable
        // regardless of the working directory.
        if dir.is_relative() {
            std::env::current_dir()?.join(dir)
        } else {
            dir.clone()
        }
    } else {
        default_config_dir()?
    };

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }

    std::fs::canonicalize(&path)
}

/// Computes the default config directory (no CLI override).
fn default_config_dir() -> std::io::Result<PathBuf> {
    // Respect XDG_CONFIG_HOME on Linux
    #[cfg(target_os = "linux")]
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let xdg_path = PathBuf::from(xdg);
        if xdg_path.is_absolute() {
            return Ok(xdg_path.join(constants::APP_NAME));
        }
    }

    let home = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;

    Ok(home.join(".config").join(constants::APP_NAME))
}

/// Path of the config file inside `config_dir`.
#[must_use]
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Path of the log directory inside `config_dir`.
#[must_use]
pub fn logs_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::LOGS_DIR_NAME)
}

/// Loads `AppConfig` from `config.toml` in the given directory.
///
/// Returns defaults if the file doesn't exist. Returns an error if the file
/// exists but is malformed.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if a
/// duration setting is out of range.
pub fn load_config(config_dir: &Path) -> Result<AppConfig, String> {
    let config_path = config_file_path(config_dir);

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {e}", config_path.display()))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| format!("Invalid config at {}: {e}", config_path.display()))?;

    validate_durations(&config)
        .map_err(|e| format!("Invalid config at {}: {e}", config_path.display()))?;
    Ok(config)
}

/// Interval and timeouts must lie in `1..=MAX_INTERVAL_SECS` seconds.
fn validate_durations(config: &AppConfig) -> Result<(), String> {
    let settings = [
        ("refresh_interval", config.refresh_interval),
        ("price_api_timeout", config.price_api_timeout),
        ("ip_api_timeout", config.ip_api_timeout),
    ];
    for (name, secs) in settings {
        if !(1..=constants::MAX_INTERVAL_SECS).contains(&secs) {
            return Err(format!(
                "{name} must be between 1 and {} seconds, got {secs}",
                constants::MAX_INTERVAL_SECS
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- AppConfig defaults ----

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.asset_id, "monero");
        assert_eq!(config.asset_symbol, "XMR");
        assert_eq!(config.vs_currency, "usd");
        assert_eq!(config.refresh_interval, 10);
        assert_eq!(config.ip_api_url, "https://ipinfo.io/json");
        assert_eq!(config.ip_api_timeout, 5);
        assert_eq!(config.vpn_asn_keywords, vec!["VPN", "PROXY", "TOR"]);
        assert_eq!(config.vpn_process_names.len(), 5);
        assert_eq!(config.vpn_interface_patterns.len(), 6);
    }

    // ---- load_config ----

    #[test]
    fn test_load_config_missing_file() {
        let dir = std::env::temp_dir().join("netpulse_test_no_config");
        let _ = std::fs::create_dir_all(&dir);
        let _ = std::fs::remove_file(dir.join("config.toml"));

        let config = load_config(&dir).unwrap();
        assert_eq!(config.refresh_interval, 10);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_partial() {
        let dir = std::env::temp_dir().join("netpulse_test_partial_config");
        let _ = std::fs::create_dir_all(&dir);
        std::fs::write(dir.join("config.toml"), "refresh_interval = 30\n").unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.asset_id, "monero"); // default preserved

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_full_toml() {
        let dir = std::env::temp_dir().join("netpulse_test_full_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let toml_content = r#"
price_api_url = "https://prices.example.com/simple"
asset_id = "bitcoin"
asset_symbol = "BTC"
vs_currency = "eur"
refresh_interval = 60
ip_api_url = "https://ip.example.com/json"
ip_api_timeout = 3
vpn_asn_keywords = ["HOSTING"]
vpn_process_names = ["mullvad"]
vpn_interface_patterns = ["tailscale"]
log_level = "debug"
"#;
        std::fs::write(dir.join("config.toml"), toml_content).unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(config.price_api_url, "https://prices.example.com/simple");
        assert_eq!(config.asset_id, "bitcoin");
        assert_eq!(config.asset_symbol, "BTC");
        assert_eq!(config.vs_currency, "eur");
        assert_eq!(config.refresh_interval, 60);
        assert_eq!(config.ip_api_url, "https://ip.example.com/json");
        assert_eq!(config.ip_api_timeout, 3);
        assert_eq!(config.vpn_asn_keywords, vec!["HOSTING"]);
        assert_eq!(config.vpn_process_names, vec!["mullvad"]);
        assert_eq!(config.vpn_interface_patterns, vec!["tailscale"]);
        assert_eq!(config.log_level, "debug");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = std::env::temp_dir().join("netpulse_test_bad_config");
        let _ = std::fs::create_dir_all(&dir);
        std::fs::write(dir.join("config.toml"), "refresh_interval = [invalid\n").unwrap();

        assert!(load_config(&dir).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_unknown_field() {
        let dir = std::env::temp_dir().join("netpulse_test_unknown_field");
        let _ = std::fs::create_dir_all(&dir);
        std::fs::write(dir.join("config.toml"), "nonexistent_field = true\n").unwrap();

        assert!(load_config(&dir).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_rejects_zero_interval() {
        let dir = std::env::temp_dir().join("netpulse_test_zero_interval");
        let _ = std::fs::create_dir_all(&dir);
        std::fs::write(dir.join("config.toml"), "refresh_interval = 0\n").unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(err.contains("refresh_interval must be between 1 and 86400"), "{err}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_rejects_huge_timeout() {
        let dir = std::env::temp_dir().join("netpulse_test_huge_timeout");
        let _ = std::fs::create_dir_all(&dir);
        std::fs::write(
            dir.join("config.toml"),
            "ip_api_timeout = 9223372036854775807\n",
        )
        .unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(err.contains("ip_api_timeout"), "{err}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_validate_durations_accepts_bounds() {
        let mut config = AppConfig {
            refresh_interval: 1,
            price_api_timeout: constants::MAX_INTERVAL_SECS,
            ..AppConfig::default()
        };
        assert!(validate_durations(&config).is_ok());

        config.price_api_timeout = constants::MAX_INTERVAL_SECS + 1;
        assert!(validate_durations(&config).is_err());
    }

    // ---- resolve_config_dir ----

    #[test]
    fn test_resolve_config_dir_with_override() {
        let custom = std::env::temp_dir().join("netpulse_test_resolve_override");
        let _ = std::fs::remove_dir_all(&custom);

        assert!(!custom.exists());

        let result = resolve_config_dir(Some(&custom)).unwrap();
        // Compare canonicalized paths (macOS: /var -> /private/var)
        let expected = std::fs::canonicalize(&custom).unwrap();
        assert_eq!(result, expected);
        assert!(custom.is_dir());

        let _ = std::fs::remove_dir_all(&custom);
    }

    #[test]
    fn test_paths_inside_config_dir() {
        let dir = PathBuf::from("/tmp/netpulse_paths");
        assert_eq!(config_file_path(&dir), dir.join("config.toml"));
        assert_eq!(logs_dir(&dir), dir.join("logs"));
    }
}
