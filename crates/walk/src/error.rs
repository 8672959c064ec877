use std::path::Path;

use metadata::MetadataError;
use thiserror::Error;

/// Error returned when traversal fails.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) const fn root(source: MetadataError) -> Self {
        Self {
            kind: WalkErrorKind::Root { source },
        }
    }

    pub(crate) const fn list_directory(source: MetadataError) -> Self {
        Self {
            kind: WalkErrorKind::ListDirectory { source },
        }
    }

    /// Returns the specific failure.
    #[must_use]
    pub const fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.metadata_error().path()
    }

    /// Returns the backend failure behind this error.
    #[must_use]
    pub const fn metadata_error(&self) -> &MetadataError {
        match &self.kind {
            WalkErrorKind::Root { source } | WalkErrorKind::ListDirectory { source } => source,
        }
    }
}

/// Classification of traversal failures.
#[derive(Debug, Error)]
pub enum WalkErrorKind {
    /// The traversal root could not be inspected.
    #[error("{source}")]
    Root {
        /// Backend failure.
        source: MetadataError,
    },
    /// A directory below the root could not be listed.
    #[error("cannot list directory {source}")]
    ListDirectory {
        /// Backend failure.
        source: MetadataError,
    },
}
