//! Process and interface enumeration via `sysinfo`.

use sysinfo::{Networks, ProcessRefreshKind, RefreshKind, System};

use crate::platform::{PlatformError, SystemInventory};

/// [`SystemInventory`] backed by the `sysinfo` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoInventory;

fn ensure_supported() -> Result<(), PlatformError> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(PlatformError::Enumeration(
            "sysinfo does not support this operating system".to_string(),
        ))
    }
}

impl SystemInventory for SysinfoInventory {
    fn interface_names(&self) -> Result<Vec<String>, PlatformError> {
        ensure_supported()?;
        let networks = Networks::new_with_refreshed_list();
        let mut names: Vec<String> = networks.iter().map(|(name, _)| name.clone()).collect();
        // Stable order so the first match reported is deterministic
        names.sort();
        Ok(names)
    }

    fn process_names(&self) -> Result<Vec<String>, PlatformError> {
        ensure_supported()?;
        let system = System::new_with_specifics(
            RefreshKind::new().with_processes(ProcessRefreshKind::new()),
        );
        let mut names: Vec<String> = system
            .processes()
            .values()
            .map(|process| process.name().to_string())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}
