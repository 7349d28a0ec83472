//! Optional `tracing` subscriber for the library's own diagnostics.
//!
//! The library reports fallbacks, truncations and I/O failures through
//! `tracing`. Applications that do not install a subscriber of their own can
//! call [`init_diagnostics`] to have them printed on standard error.

use crate::{Error, LogConfig, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global stderr subscriber filtered by the effective level.
pub fn init_diagnostics(config: &LogConfig, cli_verbose: Option<u8>) -> Result<()> {
    let spec = effective_filter_spec(config, cli_verbose);
    let env_filter = EnvFilter::try_new(&spec).map_err(|e| Error::Init(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// Determine the filter, considering config and CLI overrides.
fn effective_filter_spec(config: &LogConfig, cli_verbose: Option<u8>) -> String {
    // RUST_LOG takes precedence over everything
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    if let Some(verbose) = cli_verbose {
        return match verbose {
            0 => format!("duolog={}", level_or_default(config)),
            1 => "duolog=debug".to_string(),
            _ => "duolog=trace".to_string(),
        };
    }

    format!("duolog={}", level_or_default(config))
}

fn level_or_default(config: &LogConfig) -> &str {
    if config.diagnostics.is_empty() {
        "warn"
    } else {
        &config.diagnostics
    }
}
