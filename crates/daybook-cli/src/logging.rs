//! Subscriber setup
//!
//! Precedence: `RUST_LOG` > `--log-level` > `--verbose` > `[logging] level`.
//! Output goes to stderr so stdout stays parseable.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Pick the level filter from the command line and config value
pub fn resolve_level(flag: Option<LogLevel>, verbose: bool, configured: &str) -> LevelFilter {
    if let Some(level) = flag {
        return level.into();
    }
    if verbose {
        return LevelFilter::DEBUG;
    }
    configured.parse().unwrap_or(LevelFilter::WARN)
}

pub fn init(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
