//! Log output on stderr
//!
//! `RUST_LOG` wins over the `-v`/`-q` flags when set.

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, LogFormat};
use crate::error::{CliError, CliResult};

/// Builds the filter for a configuration
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()))
}

/// Installs the global subscriber
pub fn init(config: &CliConfig) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::logging(e.to_string()))
}
