//! Logging configuration for gradebook.
//!
//! Log output goes to stderr so it never interleaves with the grid or the
//! interactive form on stdout. Only the `gradebook` target is enabled unless
//! `RUST_LOG` says otherwise.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Tracing target of this crate.
const LOG_TARGET: &str = "gradebook";

/// How much the binary logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings, such as a data file that failed to load.
    #[default]
    Normal,
    /// Loads, saves and store changes.
    Verbose,
    /// Everything, including declined confirmations.
    Trace,
}

impl Verbosity {
    /// Map `--quiet` and the number of `-v` flags to a verbosity.
    ///
    /// `--quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Trace => Level::TRACE,
        }
    }

    /// The filter directive used when `RUST_LOG` is unset, e.g. `gradebook=warn`.
    #[must_use]
    pub fn directive(&self) -> String {
        format!(
            "{LOG_TARGET}={}",
            self.to_level_filter().as_str().to_lowercase()
        )
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
}

/// Initialize the logging system.
///
/// Call once at startup; later calls are no-ops.
///
/// # Examples
///
/// ```no_run
/// use gradebook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Route this crate's warnings to the test harness output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(Verbosity::Normal))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
    }

    #[test]
    fn test_directive() {
        assert_eq!(Verbosity::Quiet.directive(), "gradebook=error");
        assert_eq!(Verbosity::default().directive(), "gradebook=warn");
        assert_eq!(Verbosity::Verbose.directive(), "gradebook=info");
        assert_eq!(Verbosity::Trace.directive(), "gradebook=trace");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(Verbosity::Quiet);
        init_logging(Verbosity::Trace);
    }
}
