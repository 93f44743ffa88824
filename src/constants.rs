//! Application-wide constants and configuration values.
//!
//! This module defines all static configuration values used throughout netpulse,
//! including polling intervals, API endpoints, detection lists, and console messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Price Ticker Defaults ===
// These are the compiled-in defaults. Users can override them via config.toml.
// AppConfig::default() references these so there is exactly one source of truth.

/// Default price API endpoint (`CoinGecko` simple price).
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
/// Default asset id as known to the price API.
pub const DEFAULT_ASSET_ID: &str = "monero";
/// Default ticker symbol shown in the report.
pub const DEFAULT_ASSET_SYMBOL: &str = "XMR";
/// Default quote currency.
pub const DEFAULT_VS_CURRENCY: &str = "usd";
/// Default seconds between price polls.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 10;
/// Upper bound for the poll interval and request timeouts (one day).
pub const MAX_INTERVAL_SECS: u64 = 86_400;
/// Default timeout for the price request (seconds).
pub const DEFAULT_PRICE_API_TIMEOUT: u64 = 10;

// === Exposure Checker Defaults ===

/// Default IP metadata service.
pub const DEFAULT_IP_API_URL: &str = "https://ipinfo.io/json";
/// Default timeout for the IP metadata request (seconds).
pub const DEFAULT_IP_API_TIMEOUT: u64 = 5;

/// Organization/ASN keywords typical of VPN providers (matched uppercase).
pub const DEFAULT_VPN_ASN_KEYWORDS: [&str; 3] = ["VPN", "PROXY", "TOR"];

/// Common VPN client process names (matched lowercase, substring).
pub const DEFAULT_VPN_PROCESS_NAMES: [&str; 5] =
    ["openvpn", "wireguard", "nordvpn", "expressvpn", "proxyman"];

/// Common VPN tunnel interface names (matched lowercase, substring).
pub const DEFAULT_VPN_INTERFACE_PATTERNS: [&str; 6] =
    ["tun0", "tun1", "ppp0", "ppp1", "wg0", "utun"];

/// Environment variables consulted for a system proxy.
pub const PROXY_ENV_VARS: [&str; 2] = ["http_proxy", "https_proxy"];

// === Windows Registry ===

/// Internet settings key under `HKEY_CURRENT_USER`.
pub const INTERNET_SETTINGS_KEY: &str =
    r"Software\Microsoft\Windows\CurrentVersion\Internet Settings";
/// DWORD value that is 1 when a system proxy is enabled.
pub const PROXY_ENABLE_VALUE: &str = "ProxyEnable";

// === Logging Defaults ===

/// Default minimum log level written to the log file.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log file size in bytes before rotation (5 MB).
pub const DEFAULT_LOG_ROTATION_SIZE: u64 = 5 * 1024 * 1024;
/// Default number of days to retain old log files.
pub const DEFAULT_LOG_RETENTION_DAYS: u64 = 7;

// === Path Configuration ===

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Name of the logs subdirectory.
pub const LOGS_DIR_NAME: &str = "logs";
/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "NETPULSE_CONFIG_DIR";

// === Internal Tuning ===

/// Granularity of the ticker sleep so an interrupt is noticed promptly (milliseconds).
pub const SLEEP_SLICE_MS: u64 = 100;
/// Width of the ticker report frame.
pub const TICKER_FRAME_WIDTH: usize = 40;
/// Width of each half of the checker report title bar.
pub const CHECK_FRAME_SIDE_WIDTH: usize = 40;
/// Column width of the probe category label.
pub const CHECK_LABEL_WIDTH: usize = 18;

// === Messages: Price Ticker ===

pub const MSG_TICKER_START: &str = "Price Tracker (Press Ctrl+C to stop)";
pub const MSG_TICKER_STOPPED: &str = "\nProgram stopped.";
pub const MSG_INVALID_RESPONSE: &str = "Error: Invalid response from API";
pub const MSG_FETCH_ERROR: &str = "Error fetching data: ";
/// Placeholder for a missing figure or timestamp.
pub const MSG_NOT_AVAILABLE: &str = "N/A";
pub const GLYPH_UP: &str = "▲ ";
pub const GLYPH_DOWN: &str = "▼ ";

// === Messages: Exposure Checker ===

pub const CHECK_TITLE: &str = " Network Exposure Check ";
pub const STATUS_FLAGGED: &str = "[!] Anomaly detected";
pub const STATUS_CLEAR: &str = "[√] Normal";
pub const VERDICT_EXPOSED: &str = "Warning: a proxy/VPN may be in use";
pub const VERDICT_CLEAR: &str = "No proxy/VPN detected";

pub const MSG_PROXY_ENV: &str = "Proxy configured via environment variable";
pub const MSG_PROXY_REGISTRY: &str = "Windows system proxy is enabled";
pub const MSG_PROXY_NONE: &str = "No system proxy settings detected";

pub const MSG_IFACE_FOUND: &str = "VPN network interface detected: ";
pub const MSG_IFACE_NONE: &str = "No VPN-specific interface detected";
pub const MSG_IFACE_FAILED: &str = "Interface enumeration failed: ";

pub const MSG_PROC_FOUND: &str = "VPN process detected: ";
pub const MSG_PROC_NONE: &str = "No VPN client process detected";
pub const MSG_PROC_FAILED: &str = "Process enumeration failed: ";

pub const MSG_IP_FLAGGED: &str = "IP address is flagged as VPN/proxy";
pub const MSG_IP_ASN: &str = "IP ASN may belong to a VPN provider: ";
pub const MSG_IP_PUBLIC: &str = "Public IP: ";
pub const MSG_IP_FAILED: &str = "IP check failed: ";
