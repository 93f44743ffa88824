//! Centralized logging for netpulse.
//!
//! Writes every accepted entry into a date-named file under the config
//! directory, with size-based rotation and age-based cleanup. Console reports never go through here; the log carries
//! diagnostics only.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::constants;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Verbose debugging information
    Debug = 0,
    /// Informational messages about normal operation
    Info = 1,
    /// Warning messages about potential issues
    Warning = 2,
    /// Error messages about failures
    Error = 3,
}

impl LogLevel {
    /// Get the prefix string for this log level
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warning => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub category: String,
    pub message: String,
}

impl LogEntry {
    /// Format the log entry as a structured line:
    /// `[YYYY-MM-DD HH:MM:SS] [LEVEL] CATEGORY: message`
    pub fn format(&self) -> String {
        let time_str = crate::utils::format_system_time_local(self.timestamp);
        format!(
            "[{}] [{}] {}: {}",
            time_str,
            self.level.prefix(),
            self.category,
            self.message
        )
    }
}

/// File sink settings.
#[derive(Debug, Clone)]
struct FileSink {
    dir: PathBuf,
    rotation_size: u64,
    retention: Duration,
}

/// Global logger instance
pub struct Logger {
    min_level: LogLevel,
    sink: Option<FileSink>,
    writes: u32,
    /// Entries seen by unit tests.
    #[cfg(test)]
    captured: Vec<LogEntry>,
}

impl Logger {
    fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sink: None,
            writes: 0,
            #[cfg(test)]
            captured: Vec::new(),
        }
    }

    /// Add a log entry
    fn log(&mut self, level: LogLevel, category: &str, message: String) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            timestamp: SystemTime::now(),
            level,
            category: category.to_string(),
            message,
        };

        if let Some(sink) = &self.sink {
            append_to_log_file(sink, &entry.format());
            // Clean up old logs occasionally
            if self.writes % 100 == 0 {
                cleanup_old_logs(&sink.dir, sink.retention);
            }
            self.writes = self.writes.wrapping_add(1);
        }

        #[cfg(test)]
        self.captured.push(entry);
    }

    fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    #[cfg(test)]
    fn clear(&mut self) {
        self.captured.clear();
    }
}

/// Global logger instance (thread-safe)
static LOGGER: std::sync::OnceLock<Arc<Mutex<Logger>>> = std::sync::OnceLock::new();

fn get_logger() -> &'static Arc<Mutex<Logger>> {
    LOGGER.get_or_init(|| Arc::new(Mutex::new(Logger::new())))
}

/// Log a message with the specified level and category
pub fn log(level: LogLevel, category: &str, message: impl Into<String>) {
    if let Ok(mut logger) = get_logger().lock() {
        logger.log(level, category, message.into());
    }
}

/// Entries logged so far in this test process
#[cfg(test)]
pub fn get_logs() -> Vec<LogEntry> {
    get_logger()
        .lock()
        .map(|logger| logger.captured.clone())
        .unwrap_or_default()
}

/// Configure the logger from user settings.
///
/// Call once at startup after loading `AppConfig`.
/// - `log_level`: one of `"debug"`, `"info"`, `"warning"`, `"error"` (case-insensitive).
pub fn configure(log_level: &str) {
    if let Ok(mut logger) = get_logger().lock() {
        logger.set_min_level(parse_log_level(log_level));
    }
}

/// Mirror log entries into daily files under `dir`.
///
/// Files larger than `rotation_size` bytes are moved aside to `.1.log`;
/// files older than `retention_days` are removed.
pub fn enable_file_sink(dir: &Path, rotation_size: u64, retention_days: u64) {
    if let Ok(mut logger) = get_logger().lock() {
        logger.sink = Some(FileSink {
            dir: dir.to_path_buf(),
            rotation_size,
            retention: Duration::from_secs(retention_days.saturating_mul(24 * 60 * 60)),
        });
    }
}

/// Set the minimum log level.
#[cfg(test)]
pub fn set_min_level(level: LogLevel) {
    if let Ok(mut logger) = get_logger().lock() {
        logger.set_min_level(level);
    }
}

/// Parse a log level string (case-insensitive) into a `LogLevel`.
///
/// Falls back to `LogLevel::Info` for unrecognised values.
#[must_use]
pub fn parse_log_level(s: &str) -> LogLevel {
    match s.trim().to_ascii_lowercase().as_str() {
        "debug" => LogLevel::Debug,
        "warning" | "warn" => LogLevel::Warning,
        "error" | "err" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

/// Forget the entries captured for tests
#[cfg(test)]
pub fn clear_logs() {
    if let Ok(mut logger) = get_logger().lock() {
        logger.clear();
    }
}

/// Name of today's log file, e.g. `netpulse-2024-05-01.log`.
fn log_file_name(today: &str) -> String {
    format!("{}-{today}.log", constants::APP_NAME)
}

/// Append a formatted entry to today's log file, rotating it if oversized.
fn append_to_log_file(sink: &FileSink, line: &str) {
    if std::fs::create_dir_all(&sink.dir).is_err() {
        return;
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let log_file = sink.dir.join(log_file_name(&today));

    if let Ok(metadata) = std::fs::metadata(&log_file) {
        if metadata.len() > sink.rotation_size {
            let rotated = sink
                .dir
                .join(format!("{}-{today}.1.log", constants::APP_NAME));
            let _ = std::fs::rename(&log_file, rotated);
        }
    }

    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
    {
        let _ = writeln!(file, "{line}");
    }
}

/// Remove log files last modified before `retention` ago.
fn cleanup_old_logs(log_dir: &Path, retention: Duration) {
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let Ok(entries) = std::fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "log") {
            continue;
        }
        let modified = entry.metadata().and_then(|m| m.modified());
        if modified.is_ok_and(|m| m < cutoff) {
            let _ = std::fs::remove_file(&path);
        }
    }
}

// Convenience macros for easy logging
#[macro_export]
macro_rules! log_debug {
    ($category:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, $category, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, $category, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($category:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Warning, $category, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Error, $category, format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Logger tests must run serially because they share global state.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    /// Entries written by these tests; other modules log concurrently.
    fn test_logs() -> Vec<LogEntry> {
        get_logs()
            .into_iter()
            .filter(|e| e.category == "TEST")
            .collect()
    }

    #[test]
    fn test_logging() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_logs();
        set_min_level(LogLevel::Info);

        log(LogLevel::Info, "TEST", "Test message");

        let logs = test_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].category, "TEST");
        assert_eq!(logs[0].message, "Test message");
    }

    #[test]
    fn test_log_level_filtering() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_logs();
        set_min_level(LogLevel::Warning);

        log(LogLevel::Debug, "TEST", "Debug");
        log(LogLevel::Info, "TEST", "Info");
        log(LogLevel::Warning, "TEST", "Warning");
        log(LogLevel::Error, "TEST", "Error");

        let logs = test_logs();
        assert_eq!(logs.len(), 2); // Only Warning and Error

        set_min_level(LogLevel::Info);
    }

    #[test]
    fn test_configure_sets_min_level() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        clear_logs();
        configure("error");

        log(LogLevel::Warning, "TEST", "dropped");
        log(LogLevel::Error, "TEST", "kept");

        let logs = test_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "kept");

        set_min_level(LogLevel::Info);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), LogLevel::Debug);
        assert_eq!(parse_log_level(" warn "), LogLevel::Warning);
        assert_eq!(parse_log_level("error"), LogLevel::Error);
        assert_eq!(parse_log_level("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_entry_format() {
        let entry = LogEntry {
            timestamp: SystemTime::now(),
            level: LogLevel::Warning,
            category: "CHECK".to_string(),
            message: "probe inconclusive".to_string(),
        };
        let line = entry.format();
        assert!(line.contains("[WARN ] CHECK: probe inconclusive"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_append_to_log_file_writes_and_rotates() {
        let dir = std::env::temp_dir().join("netpulse_test_log_sink");
        let _ = std::fs::remove_dir_all(&dir);

        let sink = FileSink {
            dir: dir.clone(),
            rotation_size: 10,
            retention: Duration::from_secs(3600),
        };
        append_to_log_file(&sink, "first line that is long enough");
        append_to_log_file(&sink, "second");

        let files: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(files.len(), 2, "expected current and rotated file: {files:?}");
        assert!(files.iter().any(|f| f.ends_with(".1.log")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cleanup_old_logs_keeps_recent_files() {
        let dir = std::env::temp_dir().join("netpulse_test_log_cleanup");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("netpulse-recent.log"), "x").unwrap();
        std::fs::write(dir.join("notes.txt"), "x").unwrap();

        cleanup_old_logs(&dir, Duration::from_secs(3600));
        assert!(dir.join("netpulse-recent.log").exists());

        // Zero retention removes every log file but leaves other files alone
        cleanup_old_logs(&dir, Duration::ZERO);
        assert!(!dir.join("netpulse-recent.log").exists());
        assert!(dir.join("notes.txt").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
