//! Ctrl+C handling for the ticker loop.
//!
//! A SIGINT handler raises a process-wide flag; the loop polls it between
//! cycles. The handler only stores an atomic, which is async-signal-safe.

use std::sync::atomic::{AtomicBool, Ordering};

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_interrupt(_signal: libc::c_int) {
    STOP_REQUESTED.store(true, Ordering::SeqCst);
}

/// Installs the SIGINT handler and returns the flag it raises.
///
/// If installation fails the default handler stays in place, so Ctrl+C
/// still terminates the process, just without the farewell message.
#[allow(unsafe_code)]
pub fn install() -> &'static AtomicBool {
    let handler = on_interrupt as extern "C" fn(libc::c_int);
    // SAFETY: `on_interrupt` has the signature the C runtime expects and
    // touches nothing but an atomic.
    let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
    #[cfg(unix)]
    if previous == libc::SIG_ERR {
        crate::log_warning!("SIGNAL", "could not install SIGINT handler");
    }
    #[cfg(not(unix))]
    let _ = previous;
    &STOP_REQUESTED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_raises_flag() {
        let flag = install();
        on_interrupt(libc::SIGINT);
        assert!(flag.load(Ordering::SeqCst));
        flag.store(false, Ordering::SeqCst);
    }
}
