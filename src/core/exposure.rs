//! Heuristic VPN/proxy exposure checker.
//!
//! Four independent probes each yield a [`DetectionResult`]:
//!
//! 1. system proxy settings (environment, plus the registry on Windows)
//! 2. VPN tunnel interfaces
//! 3. VPN client processes
//! 4. IP metadata from a geolocation service
//!
//! Probes never fail outward. Every error is folded into a non-flagged
//! result whose message describes what went wrong.

use std::time::Duration;

use serde_json::Value;

use crate::config::AppConfig;
use crate::constants;
use crate::core::http::HttpClient;
use crate::platform::{ProxyRegistry, SystemInventory};
use crate::utils::{find_lowercase_match, pad_right};
use crate::{log_debug, log_info, log_warning};

/// Detection lists and endpoints handed to the probes.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// IP metadata endpoint.
    pub ip_api_url: String,
    /// IP metadata request timeout.
    pub ip_api_timeout: Duration,
    /// Organization/ASN keywords that indicate a VPN provider.
    pub asn_keywords: Vec<String>,
    /// Process name fragments of VPN clients.
    pub process_names: Vec<String>,
    /// Interface name fragments of VPN tunnels.
    pub interface_patterns: Vec<String>,
}

impl From<&AppConfig> for DetectionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            ip_api_url: config.ip_api_url.clone(),
            ip_api_timeout: Duration::from_secs(config.ip_api_timeout),
            asn_keywords: config.vpn_asn_keywords.clone(),
            process_names: config.vpn_process_names.clone(),
            interface_patterns: config.vpn_interface_patterns.clone(),
        }
    }
}

/// Which heuristic produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeCategory {
    SystemProxy,
    NetworkInterface,
    Process,
    IpMetadata,
}

impl ProbeCategory {
    /// Label printed in the report table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SystemProxy => "System proxy",
            Self::NetworkInterface => "Network interface",
            Self::Process => "Running process",
            Self::IpMetadata => "IP metadata",
        }
    }
}

/// Verdict of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    pub category: ProbeCategory,
    pub flagged: bool,
    pub message: String,
}

impl DetectionResult {
    fn new(category: ProbeCategory, flagged: bool, message: impl Into<String>) -> Self {
        Self {
            category,
            flagged,
            message: message.into(),
        }
    }
}

/// Environment lookup used by the proxy probe.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads a variable from the process environment.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// === Probes ===

/// Flags a proxy set through `http_proxy`/`https_proxy` or the OS registry.
///
/// Registry failures are ignored and count as "no proxy".
pub fn check_system_proxy(env: EnvLookup<'_>, registry: &dyn ProxyRegistry) -> DetectionResult {
    let category = ProbeCategory::SystemProxy;

    if let Some(var) = constants::PROXY_ENV_VARS
        .iter()
        .find(|var| env(var).is_some_and(|v| !v.is_empty()))
    {
        log_info!("CHECK", "proxy environment variable {var} is set");
        return DetectionResult::new(
            category,
            true,
            format!("{} ({var})", constants::MSG_PROXY_ENV),
        );
    }

    match registry.proxy_enabled() {
        Ok(true) => {
            log_info!("CHECK", "system proxy enabled in registry");
            return DetectionResult::new(category, true, constants::MSG_PROXY_REGISTRY);
        }
        Ok(false) => {}
        Err(e) => log_debug!("CHECK", "registry proxy check skipped: {e}"),
    }

    DetectionResult::new(category, false, constants::MSG_PROXY_NONE)
}

/// Flags the first interface whose name contains a VPN tunnel pattern.
pub fn check_network_interfaces(
    inventory: &dyn SystemInventory,
    cfg: &DetectionConfig,
) -> DetectionResult {
    let category = ProbeCategory::NetworkInterface;

    let interfaces = match inventory.interface_names() {
        Ok(names) => names,
        Err(e) => {
            log_warning!("CHECK", "interface enumeration failed: {e}");
            return DetectionResult::new(
                category,
                false,
                format!("{}{e}", constants::MSG_IFACE_FAILED),
            );
        }
    };
    log_debug!("CHECK", "{} interface(s) found", interfaces.len());

    for iface in &interfaces {
        if let Some(pattern) = find_lowercase_match(iface, &cfg.interface_patterns) {
            log_info!("CHECK", "interface {iface} matches pattern '{pattern}'");
            return DetectionResult::new(
                category,
                true,
                format!("{}{iface}", constants::MSG_IFACE_FOUND),
            );
        }
    }

    DetectionResult::new(category, false, constants::MSG_IFACE_NONE)
}

/// Flags the first running process whose name contains a VPN client name.
///
/// Processes without a usable name are skipped rather than aborting the scan.
pub fn check_vpn_processes(
    inventory: &dyn SystemInventory,
    cfg: &DetectionConfig,
) -> DetectionResult {
    let category = ProbeCategory::Process;

    let processes = match inventory.process_names() {
        Ok(names) => names,
        Err(e) => {
            log_warning!("CHECK", "process enumeration failed: {e}");
            return DetectionResult::new(
                category,
                false,
                format!("{}{e}", constants::MSG_PROC_FAILED),
            );
        }
    };

    let mut skipped = 0usize;
    for name in &processes {
        let name = name.trim();
        if name.is_empty() {
            skipped += 1;
            continue;
        }
        if let Some(pattern) = find_lowercase_match(name, &cfg.process_names) {
            log_info!("CHECK", "process {name} matches '{pattern}'");
            return DetectionResult::new(
                category,
                true,
                format!("{}{name}", constants::MSG_PROC_FOUND),
            );
        }
    }
    if skipped > 0 {
        log_debug!("CHECK", "skipped {skipped} process(es) without a name");
    }

    DetectionResult::new(category, false, constants::MSG_PROC_NONE)
}

/// Looks the public IP up and flags explicit VPN/proxy markers or a
/// VPN-looking organization.
///
/// A failed lookup is reported as not flagged; the failure text becomes
/// the message.
pub fn check_ip_metadata(client: &dyn HttpClient, cfg: &DetectionConfig) -> DetectionResult {
    let category = ProbeCategory::IpMetadata;

    let outcome = client
        .get(&cfg.ip_api_url, &[], cfg.ip_api_timeout)
        .map_err(|e| e.to_string())
        .and_then(|body| evaluate_ip_metadata(&body, &cfg.asn_keywords));

    match outcome {
        Ok((flagged, message)) => DetectionResult::new(category, flagged, message),
        Err(e) => {
            // Inconclusive, not safe; the count still excludes it
            log_warning!("CHECK", "IP metadata probe inconclusive: {e}");
            DetectionResult::new(category, false, format!("{}{e}", constants::MSG_IP_FAILED))
        }
    }
}

/// Python-style truthiness of an optional JSON value.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Interprets an ipinfo-style response.
fn evaluate_ip_metadata(body: &str, keywords: &[String]) -> Result<(bool, String), String> {
    let data: Value = serde_json::from_str(body).map_err(|e| format!("malformed JSON: {e}"))?;
    if !data.is_object() {
        return Err("unexpected response shape".to_string());
    }

    let privacy = data.get("privacy");
    let privacy_flag = ["vpn", "proxy", "tor"]
        .iter()
        .any(|key| is_truthy(privacy.and_then(|p| p.get(key))));
    let legacy_proxy_flag = is_truthy(data.get("proxy").and_then(|p| p.get("proxy")));
    if privacy_flag || legacy_proxy_flag {
        log_info!("CHECK", "IP metadata carries an explicit VPN/proxy flag");
        return Ok((true, constants::MSG_IP_FLAGGED.to_string()));
    }

    let org = data
        .get("org")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_uppercase();
    if let Some(keyword) = keywords
        .iter()
        .find(|k| !k.is_empty() && org.contains(&k.to_uppercase()))
    {
        log_info!("CHECK", "organization '{org}' contains '{keyword}'");
        return Ok((true, format!("{}{org}", constants::MSG_IP_ASN)));
    }

    let field = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };
    Ok((
        false,
        format!(
            "{}{} ({})",
            constants::MSG_IP_PUBLIC,
            field("ip"),
            field("country")
        ),
    ))
}

// === Aggregation ===

/// Runs all four probes in a fixed order.
pub struct ExposureChecker<'a> {
    pub config: &'a DetectionConfig,
    pub http: &'a dyn HttpClient,
    pub inventory: &'a dyn SystemInventory,
    pub registry: &'a dyn ProxyRegistry,
    pub env: EnvLookup<'a>,
}

impl ExposureChecker<'_> {
    /// Results in order: system proxy, interfaces, processes, IP metadata.
    #[must_use]
    pub fn run_all(&self) -> Vec<DetectionResult> {
        log_info!("CHECK", "running exposure probes");
        let results = vec![
            check_system_proxy(self.env, self.registry),
            check_network_interfaces(self.inventory, self.config),
            check_vpn_processes(self.inventory, self.config),
            check_ip_metadata(self.http, self.config),
        ];
        log_info!(
            "CHECK",
            "{} of {} probe(s) flagged",
            risk_count(&results),
            results.len()
        );
        results
    }
}

/// Number of flagged probes.
#[must_use]
pub fn risk_count(results: &[DetectionResult]) -> usize {
    results.iter().filter(|r| r.flagged).count()
}

/// Renders the results table.
#[must_use]
pub fn render_report(results: &[DetectionResult]) -> String {
    let side = "=".repeat(constants::CHECK_FRAME_SIDE_WIDTH);
    let width = constants::CHECK_FRAME_SIDE_WIDTH * 2 + constants::CHECK_TITLE.chars().count();

    let mut report = format!("\n{side}{}{side}\n", constants::CHECK_TITLE);
    for result in results {
        let status = if result.flagged {
            constants::STATUS_FLAGGED
        } else {
            constants::STATUS_CLEAR
        };
        report.push_str(&format!(
            "{} {status} | {}\n",
            pad_right(result.category.label(), constants::CHECK_LABEL_WIDTH),
            result.message
        ));
    }
    report.push_str(&"=".repeat(width));
    report.push('\n');
    report
}

/// Final one-line verdict.
#[must_use]
pub fn verdict(results: &[DetectionResult]) -> &'static str {
    if risk_count(results) > 0 {
        constants::VERDICT_EXPOSED
    } else {
        constants::VERDICT_CLEAR
    }
}
