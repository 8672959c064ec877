use std::path::Path;

use metadata::FileStatus;

/// One path produced by a traversal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkEntry {
    pub(crate) status: FileStatus,
}

impl WalkEntry {
    /// Path of the entry, as reported by the filesystem.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.status.path()
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.status.is_directory()
    }
}
