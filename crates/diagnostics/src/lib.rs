//! Logging facade for the retro newsletter tools.
//!
//! All crates in the workspace log through these macros so that one
//! environment variable controls verbosity for the whole run.
//!
//! Usage:
//! - Set RETRO_LOG=off (default) - no logs
//! - Set RETRO_LOG=info - pipeline progress and skip counts
//! - Set RETRO_LOG=debug - stage transitions and per-item details

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable that selects the log level.
pub const LOG_ENV: &str = "RETRO_LOG";

static INIT: Once = Once::new();

/// Initialize diagnostics based on the RETRO_LOG environment variable
///
/// This should be called once at application startup. It's safe to call
/// multiple times - subsequent calls will be ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let log_level = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let min_level = match log_level.as_str() {
            "off" => return,
            "debug" => emit::Level::Debug,
            "info" => emit::Level::Info,
            "warn" => emit::Level::Warn,
            "error" => emit::Level::Error,
            _ => {
                // Bootstrap warning - the emitter isn't running yet
                eprintln!(
                    "Warning: Unknown {} value '{}', using 'info'",
                    LOG_ENV, log_level
                );
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(min_level))
            .init();

        // The runtime lives for the whole process; flushing happens on exit.
        std::mem::forget(rt);
    });
}

/// Log pipeline progress a user might want to see in normal usage.
///
/// Examples: "Resolved content month", "Wrote draft", "Skipped 2 posts"
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (stage transitions, per-item decisions).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable conditions, such as a malformed post or bookmark
/// that was skipped.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that abort the current run.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

// Short-name versions

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

/// Re-export the init function for convenience
pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn test_macros_compile() {
        log_info!("Test message");
        log_debug!("Debug message with {value}", value: 42);
        log_warn!("Skipped {item}", item: "2025-12-01-post.md");
        log_error!("Error message");

        info!("Test message");
        debug!("Debug message with {value}", value: 42);
        warn!("Warning message");
        error!("Error message");
    }
}
