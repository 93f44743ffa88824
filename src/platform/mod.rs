//! Platform abstraction layer for OS-specific functionality.
//!
//! This module provides trait-based abstractions for the read-only system
//! queries the exposure checker needs, with compile-time selection via
//! `#[cfg]` conditional compilation.
//!
//! - [`ProxyRegistry`]: the Windows per-user proxy switch; a no-op elsewhere.
//! - [`SystemInventory`]: network interface and process names, via `sysinfo`.

pub mod inventory;
#[cfg(windows)]
pub mod registry;

pub use inventory::SysinfoInventory;

/// Errors raised by platform queries
#[derive(Debug)]
#[cfg_attr(not(windows), allow(dead_code))]
pub enum PlatformError {
    /// Registry key or value could not be read (Win32 error code)
    Registry(u32),
    /// The OS refused to enumerate something
    Enumeration(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(code) => write!(f, "registry read failed (error {code})"),
            Self::Enumeration(msg) => write!(f, "enumeration failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

// === Platform Trait Definitions ===

/// Per-user system proxy switch.
///
/// Implementations report whether the OS-level proxy is turned on.
pub trait ProxyRegistry {
    /// `Ok(true)` when the system proxy is enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] when the setting cannot be read.
    fn proxy_enabled(&self) -> Result<bool, PlatformError>;
}

/// Read-only view of running processes and network interfaces.
pub trait SystemInventory {
    /// Names of all network interfaces.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] if interfaces cannot be listed.
    fn interface_names(&self) -> Result<Vec<String>, PlatformError>;

    /// Names of running processes. Entries may be empty when the OS
    /// withholds a name; callers skip those.
    ///
    /// # Errors
    ///
    /// Returns a [`PlatformError`] if processes cannot be listed.
    fn process_names(&self) -> Result<Vec<String>, PlatformError>;
}

/// [`ProxyRegistry`] for platforms without a registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProxyRegistry;

impl ProxyRegistry for NoProxyRegistry {
    fn proxy_enabled(&self) -> Result<bool, PlatformError> {
        Ok(false)
    }
}

/// The registry implementation for the running OS.
#[cfg(windows)]
#[must_use]
pub fn default_proxy_registry() -> Box<dyn ProxyRegistry> {
    Box::new(registry::WindowsProxyRegistry)
}

/// The registry implementation for the running OS.
#[cfg(not(windows))]
#[must_use]
pub fn default_proxy_registry() -> Box<dyn ProxyRegistry> {
    Box::new(NoProxyRegistry)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_proxy_registry_reports_disabled() {
        assert!(!NoProxyRegistry.proxy_enabled().unwrap());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_default_proxy_registry_is_noop_off_windows() {
        assert!(!default_proxy_registry().proxy_enabled().unwrap());
    }

    #[test]
    fn test_platform_error_display() {
        assert_eq!(
            PlatformError::Registry(2).to_string(),
            "registry read failed (error 2)"
        );
        assert_eq!(
            PlatformError::Enumeration("denied".into()).to_string(),
            "enumeration failed: denied"
        );
    }
}
