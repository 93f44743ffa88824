//! Windows per-user proxy setting.
//!
//! Reads `HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings`
//! value `ProxyEnable` (a DWORD, 1 when the proxy is on).

use windows::core::PCWSTR;
use windows::Win32::Foundation::ERROR_SUCCESS;
use windows::Win32::System::Registry::{RegGetValueW, HKEY_CURRENT_USER, RRF_RT_REG_DWORD};

use crate::constants;
use crate::platform::{PlatformError, ProxyRegistry};

fn to_wide(s: &str) -> Vec<u16> {
    let mut wide: Vec<u16> = s.encode_utf16().collect();
    wide.push(0);
    wide
}

/// Registry-backed [`ProxyRegistry`].
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProxyRegistry;

impl ProxyRegistry for WindowsProxyRegistry {
    #[allow(unsafe_code)]
    fn proxy_enabled(&self) -> Result<bool, PlatformError> {
        let subkey = to_wide(constants::INTERNET_SETTINGS_KEY);
        let value_name = to_wide(constants::PROXY_ENABLE_VALUE);
        let mut value: u32 = 0;
        #[allow(clippy::cast_possible_truncation)]
        let mut size = std::mem::size_of::<u32>() as u32;

        // SAFETY: both name buffers are NUL-terminated and outlive the call;
        // `value`/`size` point at a correctly sized DWORD on our stack.
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                PCWSTR(subkey.as_ptr()),
                PCWSTR(value_name.as_ptr()),
                RRF_RT_REG_DWORD,
                None,
                Some(std::ptr::addr_of_mut!(value).cast()),
                Some(&mut size),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(PlatformError::Registry(status.0));
        }

        Ok(value == 1)
    }
}
