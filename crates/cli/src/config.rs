//! crates/cli/src/config.rs
//!
//! Logging settings taken from the environment.

use std::env;
use std::ffi::OsString;

use logging::{LogConfig, LogFormat};

/// Filter directives for the tracing subscriber, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "OC_FACL_LOG";
/// Output layout of diagnostics: `compact` or `full`.
pub const LOG_FORMAT_ENV: &str = "OC_FACL_LOG_FORMAT";

/// Reads [`LOG_ENV`] and [`LOG_FORMAT_ENV`].
///
/// Unset or blank values keep the defaults (`warn`, compact). An unknown
/// format name also falls back to compact.
#[must_use]
pub fn log_config_from_env() -> LogConfig {
    log_config_from_values(env::var_os(LOG_ENV), env::var_os(LOG_FORMAT_ENV))
}

pub(crate) fn log_config_from_values(
    directives: Option<OsString>,
    format: Option<OsString>,
) -> LogConfig {
    let config = non_blank(directives).map_or_else(LogConfig::default, LogConfig::new);
    let format = non_blank(format)
        .and_then(|value| value.parse::<LogFormat>().ok())
        .unwrap_or_default();
    config.with_format(format)
}

fn non_blank(value: Option<OsString>) -> Option<String> {
    let value = value?;
    let normalized = value.to_string_lossy();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
