//! crates/metadata/src/error.rs
//!
//! Error type shared by every ACL filesystem backend.

use std::io;
use std::path::{Path, PathBuf};

use acl::AclError;
use thiserror::Error;

/// Result type for filesystem ACL operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Failure reported by a filesystem backend for one path.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The path does not exist.
    #[error("`{}': No such file or directory", .path.display())]
    NotFound {
        /// Offending path.
        path: PathBuf,
    },
    /// The caller may not read or change the path.
    #[error("`{}': Permission denied", .path.display())]
    PermissionDenied {
        /// Offending path.
        path: PathBuf,
    },
    /// A directory operation was attempted on something else.
    #[error("`{}': Is not a directory", .path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },
    /// The requested change would produce an invalid ACL.
    #[error("`{}': {source}", .path.display())]
    InvalidAcl {
        /// Offending path.
        path: PathBuf,
        /// Rule that was violated.
        #[source]
        source: AclError,
    },
    /// The backend cannot represent the requested ACL.
    #[error("`{}': {reason}", .path.display())]
    Unsupported {
        /// Offending path.
        path: PathBuf,
        /// Human readable explanation.
        reason: String,
    },
    /// Any other I/O failure.
    #[error("`{}': {source}", .path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl MetadataError {
    /// Classifies an I/O error raised while operating on `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::Unsupported => Self::Unsupported {
                path,
                reason: String::from("Operation not supported"),
            },
            _ => Self::Io { path, source },
        }
    }

    pub(crate) fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn invalid_acl(path: &Path, source: AclError) -> Self {
        Self::InvalidAcl {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn unsupported(path: &Path, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Path the failure refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::NotADirectory { path }
            | Self::InvalidAcl { path, .. }
            | Self::Unsupported { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// Returns `true` when the path does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
