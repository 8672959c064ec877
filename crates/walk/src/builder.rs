use std::path::PathBuf;

use metadata::AclFileSystem;

use crate::error::WalkError;
use crate::walker::Walker;

/// Configures a traversal rooted at a specific path.
#[derive(Clone, Debug)]
pub struct WalkBuilder<F> {
    fs: F,
    root: PathBuf,
}

impl<F: AclFileSystem> WalkBuilder<F> {
    /// Creates a builder that will traverse `root` on `fs`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(fs: F, root: P) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Inspects the root and builds a [`Walker`].
    pub fn build(self) -> Result<Walker<F>, WalkError> {
        Walker::new(self.fs, &self.root)
    }
}
