//! Tracing bootstrap shared by the binaries.
//!
//! Events go to stderr so stdout stays clean for view output. The filter is
//! read from `PAPER_EXPLORER_LOG` (standard `EnvFilter` directives) and falls
//! back to the caller's default.

use anyhow::{Result, anyhow};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PAPER_EXPLORER_LOG";
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once; later calls are no-ops.
///
/// # Errors
/// - The default directive does not parse.
/// - Another subscriber was installed outside this function.
pub fn init_logging(default_directive: &str) -> Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), default_directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    let _ = INSTALLED.set(());
    Ok(())
}

/// Whether `init_logging` has installed the subscriber in this process.
pub fn logging_installed() -> bool {
    INSTALLED.get().is_some()
}

// An unparsable env value falls back to the default rather than failing startup.
fn build_filter(env_value: Option<&str>, default_directive: &str) -> Result<EnvFilter> {
    if let Some(filter) = env_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
    {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directive)
        .map_err(|err| anyhow!("invalid log directive `{default_directive}`: {err}"))
}
