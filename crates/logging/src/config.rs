//! crates/logging/src/config.rs
//! Subscriber configuration.

use std::fmt;
use std::str::FromStr;

/// Filter directives used when nothing else is configured.
pub const DEFAULT_DIRECTIVES: &str = "warn";

/// Output layout of the stderr tracing layer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Level and message only.
    #[default]
    Compact,
    /// Timestamp, level, target and fields.
    Full,
}

impl LogFormat {
    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown [`LogFormat`] name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLogFormatError(String);

impl fmt::Display for ParseLogFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log format '{}' (expected compact or full)", self.0)
    }
}

impl std::error::Error for ParseLogFormatError {}

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(ParseLogFormatError(value.to_owned())),
        }
    }
}

/// Settings for [`init_tracing`](crate::init_tracing).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    directives: String,
    format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVES)
    }
}

impl LogConfig {
    /// Creates a configuration with the given `EnvFilter` directives.
    #[must_use]
    pub fn new(directives: impl Into<String>) -> Self {
        Self {
            directives: directives.into(),
            format: LogFormat::default(),
        }
    }

    /// Selects the output layout.
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directives, e.g. `warn,facl::setfacl=debug`.
    #[must_use]
    pub fn directives(&self) -> &str {
        &self.directives
    }

    /// Output layout.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}
