//! Process-wide stderr diagnostic toggle.
//!
//! A peripheral utility, not a core ECIES concern (spec §6): the original C
//! library redirects `fprintf` through a swappable function pointer so tests
//! can silence it; the Rust port achieves the same effect with a single
//! global flag, since there is no function-pointer indirection to swap here.

use std::sync::atomic::{AtomicBool, Ordering};

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Enables the diagnostic stderr output used by [`diagnostic_eprintln`].
pub fn enable_diagnostics() {
    DIAGNOSTICS_ENABLED.store(true, Ordering::SeqCst);
}

/// Disables the diagnostic stderr output used by [`diagnostic_eprintln`].
pub fn disable_diagnostics() {
    DIAGNOSTICS_ENABLED.store(false, Ordering::SeqCst);
}

/// Returns whether diagnostic stderr output is currently enabled.
pub fn diagnostics_enabled() -> bool {
    DIAGNOSTICS_ENABLED.load(Ordering::SeqCst)
}

/// Prints to stderr only if diagnostics are enabled; a no-op otherwise.
#[macro_export]
macro_rules! diagnostic_eprintln {
    ($($arg:tt)*) => {
        if $crate::diagnostics::diagnostics_enabled() {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        enable_diagnostics();
        assert!(diagnostics_enabled());

        disable_diagnostics();
        assert!(!diagnostics_enabled());

        enable_diagnostics();
        assert!(diagnostics_enabled());
    }
}
