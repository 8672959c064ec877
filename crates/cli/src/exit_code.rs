//! Process exit codes of the ACL tools.
//!
//! Numbering follows rsync's `errcode.h` so scripts that already understand
//! those values can reuse them.

use std::fmt;

use metadata::MetadataError;

/// Exit status of one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Every path was processed.
    Ok = 0,
    /// Bad flags, operands or ACL specification.
    Syntax = 1,
    /// The target path does not exist.
    FileSelect = 3,
    /// The backend cannot represent the requested ACL.
    Unsupported = 4,
    /// Reading or writing the ACL failed.
    FileIo = 11,
    /// Some paths of a recursive run failed.
    PartialTransfer = 23,
}

impl ExitCode {
    /// Numeric value handed to the operating system.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Short human readable meaning.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::FileSelect => "errors selecting input/output files, dirs",
            Self::Unsupported => "requested action not supported",
            Self::FileIo => "error in file IO",
            Self::PartialTransfer => "some files could not be processed",
        }
    }

    /// Maps a backend failure on a single path.
    #[must_use]
    pub const fn for_metadata_error(error: &MetadataError) -> Self {
        match error {
            MetadataError::NotFound { .. } => Self::FileSelect,
            MetadataError::Unsupported { .. } => Self::Unsupported,
            MetadataError::PermissionDenied { .. }
            | MetadataError::NotADirectory { .. }
            | MetadataError::InvalidAcl { .. }
            | MetadataError::Io { .. } => Self::FileIo,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
