//! Polling price ticker.
//!
//! Each cycle fetches one [`PriceReading`] from a `CoinGecko`-style simple price
//! endpoint, prints a boxed report (or an error line) and sleeps. Failures
//! never end the loop; only an interrupt does.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::AppConfig;
use crate::constants;
use crate::core::http::{HttpClient, HttpError};
use crate::{log_debug, log_info, log_warning};

/// Configuration subset needed by the ticker loop.
#[derive(Debug, Clone)]
pub struct TickerConfig {
    /// Price API endpoint.
    pub api_url: String,
    /// Asset id, also the expected top-level key of the response.
    pub asset_id: String,
    /// Symbol shown in the report header.
    pub asset_symbol: String,
    /// Quote currency.
    pub vs_currency: String,
    /// Delay between polls.
    pub interval: Duration,
    /// Request timeout.
    pub timeout: Duration,
}

impl From<&AppConfig> for TickerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_url: config.price_api_url.clone(),
            asset_id: config.asset_id.clone(),
            asset_symbol: config.asset_symbol.clone(),
            vs_currency: config.vs_currency.clone(),
            interval: Duration::from_secs(config.refresh_interval),
            timeout: Duration::from_secs(config.price_api_timeout),
        }
    }
}

impl TickerConfig {
    /// Response key holding the 24h change, e.g. `usd_24h_change`.
    fn change_key(&self) -> String {
        format!("{}_24h_change", self.vs_currency)
    }

    /// Pair label such as `XMR/USD`.
    fn pair_label(&self) -> String {
        format!(
            "{}/{}",
            self.asset_symbol.to_uppercase(),
            self.vs_currency.to_uppercase()
        )
    }
}

/// A single numeric field of a reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// A JSON number, kept as received so it prints exactly as the API sent it.
    Number(serde_json::Number),
    /// A non-numeric value, printed as-is.
    Text(String),
    /// Field absent or null.
    Unavailable,
}

impl Figure {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Unavailable,
            Some(Value::Number(n)) => Self::Number(n.clone()),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(other) => Self::Text(other.to_string()),
        }
    }

    /// Numeric value, if this figure is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Unavailable => f.write_str(constants::MSG_NOT_AVAILABLE),
        }
    }
}

/// One snapshot of price data from a single poll.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReading {
    pub price: Figure,
    pub change_24h: Figure,
    /// Local `YYYY-MM-DD HH:MM:SS`, or `None` when the API gave no timestamp.
    pub last_updated: Option<String>,
}

/// Errors that end a poll cycle without a reading
#[derive(Debug)]
pub enum TickerError {
    /// Transport failure
    Http(HttpError),
    /// Body was not JSON
    Json(serde_json::Error),
    /// JSON lacked the asset key
    InvalidResponse,
    /// The asset entry was not an object
    MalformedAsset,
}

impl std::fmt::Display for TickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "malformed JSON: {e}"),
            Self::InvalidResponse => f.write_str("invalid response from API"),
            Self::MalformedAsset => f.write_str("asset entry is not a JSON object"),
        }
    }
}

impl std::error::Error for TickerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidResponse | Self::MalformedAsset => None,
        }
    }
}

impl From<HttpError> for TickerError {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for TickerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Fetches and parses one reading.
///
/// # Errors
///
/// Returns a [`TickerError`] on transport failure, malformed JSON, or a
/// response without the asset key.
pub fn fetch_reading(
    client: &dyn HttpClient,
    cfg: &TickerConfig,
) -> Result<PriceReading, TickerError> {
    let query = [
        ("ids", cfg.asset_id.as_str()),
        ("vs_currencies", cfg.vs_currency.as_str()),
        ("include_24hr_change", "true"),
        ("include_last_updated_at", "true"),
    ];
    let body = client.get(&cfg.api_url, &query, cfg.timeout)?;
    parse_reading(&body, cfg)
}

/// Extracts a reading from a simple-price response body.
///
/// # Errors
///
/// Returns [`TickerError::Json`] for malformed JSON and
/// [`TickerError::InvalidResponse`] when the asset key is missing, or
/// [`TickerError::MalformedAsset`] when its value is not an object.
pub fn parse_reading(body: &str, cfg: &TickerConfig) -> Result<PriceReading, TickerError> {
    let data: Value = serde_json::from_str(body)?;
    let asset = data
        .get(cfg.asset_id.as_str())
        .ok_or(TickerError::InvalidResponse)?;
    if !asset.is_object() {
        return Err(TickerError::MalformedAsset);
    }

    let last_updated = asset
        .get("last_updated_at")
        .and_then(unix_seconds)
        .filter(|secs| *secs != 0)
        .and_then(crate::utils::format_unix_timestamp_local);

    Ok(PriceReading {
        price: Figure::from_json(asset.get(cfg.vs_currency.as_str())),
        change_24h: Figure::from_json(asset.get(cfg.change_key().as_str())),
        last_updated,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn unix_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// Formats the 24h change: `▲ 1.20%`, `▼ -2.31%`, or the raw value.
#[must_use]
pub fn format_change(change: &Figure) -> String {
    match change.as_f64() {
        Some(v) => {
            let glyph = if v >= 0.0 {
                constants::GLYPH_UP
            } else {
                constants::GLYPH_DOWN
            };
            format!("{glyph}{v:.2}%")
        }
        None => change.to_string(),
    }
}

/// Renders the boxed report for a reading.
#[must_use]
pub fn render_report(reading: &PriceReading, cfg: &TickerConfig) -> String {
    let rule = "=".repeat(constants::TICKER_FRAME_WIDTH);
    let updated = reading
        .last_updated
        .as_deref()
        .unwrap_or(constants::MSG_NOT_AVAILABLE);
    format!(
        "\n{rule}\n{} Price: ${}\n24h Change:    {}\nLast Updated:  {updated}\n{rule}\n",
        cfg.pair_label(),
        reading.price,
        format_change(&reading.change_24h),
    )
}

/// Prints the outcome of one cycle and returns the reading, if any.
fn report_cycle(
    result: Result<PriceReading, TickerError>,
    cfg: &TickerConfig,
    out: &mut dyn Write,
) -> io::Result<Option<PriceReading>> {
    match result {
        Ok(reading) => {
            log_debug!("TICKER", "price={} change={}", reading.price, reading.change_24h);
            writeln!(out, "{}", render_report(&reading, cfg))?;
            Ok(Some(reading))
        }
        Err(TickerError::InvalidResponse) => {
            log_warning!("TICKER", "response lacked key '{}'", cfg.asset_id);
            writeln!(out, "{}", constants::MSG_INVALID_RESPONSE)?;
            Ok(None)
        }
        Err(e) => {
            log_warning!("TICKER", "poll failed: {e}");
            writeln!(out, "{}{e}", constants::MSG_FETCH_ERROR)?;
            Ok(None)
        }
    }
}

/// Sleeps for `total`, waking early once `stop` is raised.
///
/// `total` is capped at [`constants::MAX_INTERVAL_SECS`].
fn sleep_unless_stopped(total: Duration, stop: &AtomicBool) {
    let total = total.min(Duration::from_secs(constants::MAX_INTERVAL_SECS));
    let slice = Duration::from_millis(constants::SLEEP_SLICE_MS);
    let started = Instant::now();
    while !stop.load(Ordering::SeqCst) {
        let elapsed = started.elapsed();
        if elapsed >= total {
            break;
        }
        thread::sleep(slice.min(total - elapsed));
    }
}

/// Polls until `stop` is raised, then prints the termination message.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run(
    client: &dyn HttpClient,
    cfg: &TickerConfig,
    stop: &AtomicBool,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(
        out,
        "Starting {} {}",
        cfg.asset_symbol.to_uppercase(),
        constants::MSG_TICKER_START
    )?;
    log_info!(
        "TICKER",
        "polling {} every {}s",
        cfg.api_url,
        cfg.interval.as_secs()
    );

    let mut cycles: u64 = 0;
    while !stop.load(Ordering::SeqCst) {
        let result = fetch_reading(client, cfg);
        // An interrupt during the request also kills curl; don't report that.
        if stop.load(Ordering::SeqCst) {
            break;
        }
        report_cycle(result, cfg, out)?;
        out.flush()?;
        cycles += 1;
        sleep_unless_stopped(cfg.interval, stop);
    }

    log_info!("TICKER", "stopped after {cycles} cycle(s)");
    writeln!(out, "{}", constants::MSG_TICKER_STOPPED)?;
    out.flush()
}
