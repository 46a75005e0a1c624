//! Logging configuration
//!
//! Initializes tracing for the application.

/// Maps `-v` occurrences to a level filter
#[must_use]
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initializes logging with the specified level
///
/// `RUST_LOG` takes precedence when set. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "info");
        assert_eq!(level_for_verbosity(1), "debug");
        assert_eq!(level_for_verbosity(5), "trace");
    }

    #[test]
    fn test_init_logging() {
        // Just verify it doesn't panic
        init_logging("debug");
        init_logging("info");
    }
}
