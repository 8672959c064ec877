//! crates/logging/src/subscriber.rs
//! Installs the process-wide `tracing` subscriber.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{DEFAULT_DIRECTIVES, LogConfig, LogFormat};

/// Installs a registry with an `EnvFilter` and a stderr `fmt` layer.
///
/// Invalid directives fall back to `warn`. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
///
/// ```
/// use logging::{LogConfig, init_tracing};
///
/// let first = init_tracing(&LogConfig::default());
/// assert!(!init_tracing(&LogConfig::default()) || !first);
/// ```
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = build_filter(config.directives());
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format() {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Full => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
    };
    installed.is_ok()
}

fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directives_fall_back_to_default() {
        let filter = build_filter("facl::setfacl=notalevel");
        assert_eq!(filter.to_string(), DEFAULT_DIRECTIVES);
    }

    #[test]
    fn valid_directives_are_kept() {
        let filter = build_filter("facl::getfacl=debug");
        assert_eq!(filter.to_string(), "facl::getfacl=debug");
    }

    #[test]
    fn second_initialisation_is_a_no_op() {
        init_tracing(&LogConfig::default());
        assert!(!init_tracing(&LogConfig::default()));
    }
}
