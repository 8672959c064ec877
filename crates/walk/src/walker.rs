use std::path::Path;

use metadata::{AclFileSystem, FileStatus};
use tracing::trace;

use crate::entry::WalkEntry;
use crate::error::WalkError;

/// Depth-first iterator over the paths below a root.
#[derive(Debug)]
pub struct Walker<F> {
    fs: F,
    root: Option<FileStatus>,
    stack: Vec<DirectoryState>,
    pending: Option<WalkError>,
}

impl<F: AclFileSystem> Walker<F> {
    pub(crate) fn new(fs: F, root: &Path) -> Result<Self, WalkError> {
        let status = fs.file_status(root).map_err(WalkError::root)?;
        trace!(target: "facl::walk", root = %root.display(), "starting traversal");
        Ok(Self {
            fs,
            root: Some(status),
            stack: Vec::new(),
            pending: None,
        })
    }

    fn descend(&mut self, directory: &Path) {
        match self.fs.list_status(directory) {
            Ok(entries) => {
                trace!(
                    target: "facl::walk",
                    directory = %directory.display(),
                    entries = entries.len(),
                    "listed directory"
                );
                self.stack.push(DirectoryState { entries, index: 0 });
            }
            Err(error) => self.pending = Some(WalkError::list_directory(error)),
        }
    }
}

impl<F: AclFileSystem> Iterator for Walker<F> {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if root.is_directory() {
                self.descend(root.path());
            }
            return Some(Ok(WalkEntry { status: root }));
        }

        if let Some(error) = self.pending.take() {
            return Some(Err(error));
        }

        loop {
            let state = self.stack.last_mut()?;
            let Some(status) = state.next_status() else {
                self.stack.pop();
                continue;
            };

            if status.is_directory() {
                self.descend(status.path());
            }
            return Some(Ok(WalkEntry { status }));
        }
    }
}

#[derive(Clone, Debug)]
struct DirectoryState {
    entries: Vec<FileStatus>,
    index: usize,
}

impl DirectoryState {
    fn next_status(&mut self) -> Option<FileStatus> {
        let status = self.entries.get(self.index)?.clone();
        self.index += 1;
        Some(status)
    }
}
