//! Minimal HTTP GET transport.
//!
//! Uses the `curl` command for requests to avoid heavy dependencies. Callers
//! depend on the [`HttpClient`] trait so probes and the ticker can be driven
//! by canned responses in tests.

use std::process::Command;
use std::time::Duration;

use crate::constants;
use crate::{log_debug, log_error, log_warning};

/// curl exit code: could not resolve host.
const CURL_COULDNT_RESOLVE_HOST: i32 = 6;
/// curl exit code: failed to connect to host.
const CURL_COULDNT_CONNECT: i32 = 7;
/// curl exit code: operation timed out.
const CURL_OPERATION_TIMEDOUT: i32 = 28;

/// Errors that can occur while performing a request
#[derive(Debug)]
pub enum HttpError {
    /// curl could not be started
    Spawn(std::io::Error),
    /// No response within the timeout
    Timeout(Duration),
    /// DNS lookup failed
    Resolve(String),
    /// TCP/TLS connection failed
    Connect(String),
    /// Any other transfer failure
    Failed(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "failed to run curl: {e}"),
            Self::Timeout(t) => write!(f, "request timed out after {}s", t.as_secs()),
            Self::Resolve(msg) => write!(f, "could not resolve host: {msg}"),
            Self::Connect(msg) => write!(f, "connection failed: {msg}"),
            Self::Failed(msg) => write!(f, "request failed: {msg}"),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HttpError {
    fn from(e: std::io::Error) -> Self {
        Self::Spawn(e)
    }
}

/// Blocking HTTP GET returning the response body as text.
pub trait HttpClient {
    /// Fetch `url` with `query` appended as URL-encoded parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] when the transfer does not complete.
    fn get(&self, url: &str, query: &[(&str, &str)], timeout: Duration)
        -> Result<String, HttpError>;
}

/// [`HttpClient`] backed by the system `curl` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurlClient;

impl CurlClient {
    /// Builds the curl argument list for a GET request.
    fn build_args(url: &str, query: &[(&str, &str)], timeout: Duration) -> Vec<String> {
        // -s: Silent mode
        // -S: Show errors even in silent mode
        // -L: Follow redirects
        // -G: Send --data-urlencode pairs as a query string
        let mut args = vec![
            "-s".to_string(),
            "-S".to_string(),
            "-L".to_string(),
            "--max-time".to_string(),
            timeout.as_secs().max(1).to_string(),
            "-A".to_string(),
            format!("{}/{}", constants::APP_NAME, constants::APP_VERSION),
        ];
        if !query.is_empty() {
            args.push("-G".to_string());
            for (key, value) in query {
                args.push("--data-urlencode".to_string());
                args.push(format!("{key}={value}"));
            }
        }
        args.push(url.to_string());
        args
    }
}

/// Maps a failed curl run to a typed error.
fn classify_failure(code: Option<i32>, stderr: &str, timeout: Duration) -> HttpError {
    let detail = stderr.trim().to_string();
    match code {
        Some(CURL_OPERATION_TIMEDOUT) => HttpError::Timeout(timeout),
        Some(CURL_COULDNT_RESOLVE_HOST) => HttpError::Resolve(detail),
        Some(CURL_COULDNT_CONNECT) => HttpError::Connect(detail),
        Some(code) if detail.is_empty() => HttpError::Failed(format!("curl exit code {code}")),
        _ if detail.is_empty() => HttpError::Failed("curl terminated by signal".to_string()),
        _ => HttpError::Failed(detail),
    }
}

impl HttpClient for CurlClient {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<String, HttpError> {
        log_debug!("HTTP", "GET {url}");

        let output = Command::new("curl")
            .args(Self::build_args(url, query, timeout))
            .output()
            .map_err(|e| {
                log_error!("HTTP", "Failed to execute curl: {e}");
                HttpError::from(e)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = classify_failure(output.status.code(), &stderr, timeout);
            log_warning!("HTTP", "GET {url}: {err}");
            return Err(err);
        }

        let body = String::from_utf8_lossy(&output.stdout).to_string();
        log_debug!("HTTP", "GET {url}: received {} bytes", body.len());
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_with_query() {
        let args = CurlClient::build_args(
            "https://api.example.com/price",
            &[("ids", "monero"), ("vs_currencies", "usd")],
            Duration::from_secs(10),
        );
        assert_eq!(args.last().map(String::as_str), Some("https://api.example.com/price"));
        assert!(args.windows(2).any(|w| w[0] == "--max-time" && w[1] == "10"));
        assert!(args.contains(&"-G".to_string()));
        assert!(args.contains(&"ids=monero".to_string()));
        assert!(args.contains(&"vs_currencies=usd".to_string()));
    }

    #[test]
    fn test_build_args_without_query() {
        let args = CurlClient::build_args("https://ipinfo.io/json", &[], Duration::from_secs(5));
        assert!(!args.contains(&"-G".to_string()));
        assert!(!args.contains(&"--data-urlencode".to_string()));
    }

    #[test]
    fn test_build_args_minimum_timeout() {
        let args = CurlClient::build_args("https://x", &[], Duration::from_millis(200));
        assert!(args.windows(2).any(|w| w[0] == "--max-time" && w[1] == "1"));
    }

    #[test]
    fn test_classify_failure_timeout() {
        let err = classify_failure(
            Some(28),
            "curl: (28) Operation timed out",
            Duration::from_secs(5),
        );
        assert!(matches!(err, HttpError::Timeout(t) if t == Duration::from_secs(5)));
        assert_eq!(err.to_string(), "request timed out after 5s");
    }

    #[test]
    fn test_classify_failure_resolve_and_connect() {
        let err = classify_failure(Some(6), "curl: (6) Could not resolve host: x", Duration::ZERO);
        assert!(matches!(err, HttpError::Resolve(_)));
        let err = classify_failure(Some(7), "curl: (7) Failed to connect", Duration::ZERO);
        assert!(matches!(err, HttpError::Connect(_)));
    }

    #[test]
    fn test_classify_failure_other() {
        let err = classify_failure(Some(35), "", Duration::ZERO);
        assert_eq!(err.to_string(), "request failed: curl exit code 35");
        let err = classify_failure(None, "", Duration::ZERO);
        assert!(matches!(err, HttpError::Failed(_)));
    }
}
