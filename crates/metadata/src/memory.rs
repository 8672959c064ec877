//! In-memory ACL filesystem.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use acl::mode::{STICKY_BIT, minimal_entries};
use acl::{AclEntry, AclEntryScope, AclError, AclStatus, transform};
use tracing::trace;

use crate::error::{MetadataError, MetadataResult};
use crate::filesystem::{AclFileSystem, FileStatus};

const SUPERUSER: &str = "root";

#[derive(Clone, Debug)]
struct Node {
    directory: bool,
    owner: String,
    group: String,
    sticky: bool,
    entries: Vec<AclEntry>,
}

/// Hierarchical namespace that keeps full ACLs in memory.
///
/// The root directory `/` exists from the start, owned by `root:root` with
/// mode `0o755`. Every read-transform-write runs under one write lock, so
/// concurrent callers never observe a half-applied change.
#[derive(Debug)]
pub struct MemoryFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    caller: Option<String>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    /// Creates a namespace holding only `/`.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            directory: true,
            owner: String::from(SUPERUSER),
            group: String::from(SUPERUSER),
            sticky: false,
            entries: minimal_entries(0o755),
        };
        Self {
            nodes: RwLock::new(BTreeMap::from([(PathBuf::from("/"), root)])),
            caller: None,
        }
    }

    /// Restricts ACL changes to paths owned by `user`.
    ///
    /// `root` may change every path. Without a caller identity all changes
    /// are allowed.
    #[must_use]
    pub fn with_caller(mut self, user: impl Into<String>) -> Self {
        self.caller = Some(user.into());
        self
    }

    /// Creates a directory below an existing directory.
    ///
    /// The permission bits of `mode` seed the access ACL and `0o1000` sets the
    /// sticky bit. A default ACL on the parent is inherited both as the access
    /// and as the default ACL of the new directory.
    pub fn create_directory(
        &self,
        path: impl AsRef<Path>,
        owner: &str,
        group: &str,
        mode: u32,
    ) -> MetadataResult<()> {
        self.insert(path.as_ref(), true, owner, group, mode)
    }

    /// Creates a regular file below an existing directory.
    ///
    /// A default ACL on the parent becomes the access ACL of the file.
    pub fn create_file(
        &self,
        path: impl AsRef<Path>,
        owner: &str,
        group: &str,
        mode: u32,
    ) -> MetadataResult<()> {
        self.insert(path.as_ref(), false, owner, group, mode)
    }

    fn insert(
        &self,
        path: &Path,
        directory: bool,
        owner: &str,
        group: &str,
        mode: u32,
    ) -> MetadataResult<()> {
        let path = normalize(path);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        if nodes.contains_key(&path) {
            return Err(MetadataError::from_io(
                path,
                io::Error::from(io::ErrorKind::AlreadyExists),
            ));
        }

        let parent_path = path
            .parent()
            .ok_or_else(|| MetadataError::not_found(&path))?;
        let parent = nodes
            .get(parent_path)
            .ok_or_else(|| MetadataError::not_found(parent_path))?;
        if !parent.directory {
            return Err(MetadataError::NotADirectory {
                path: parent_path.to_path_buf(),
            });
        }

        let inherited: Vec<AclEntry> = parent
            .entries
            .iter()
            .filter(|entry| entry.scope() == AclEntryScope::Default)
            .cloned()
            .collect();
        let entries = if inherited.is_empty() {
            minimal_entries(mode)
        } else {
            let mut entries: Vec<AclEntry> = inherited
                .iter()
                .map(|entry| entry.with_scope(AclEntryScope::Access))
                .collect();
            if directory {
                entries.extend(inherited);
            }
            entries.sort();
            entries
        };

        trace!(target: "facl::acl", path = %path.display(), directory, "created node");
        nodes.insert(
            path,
            Node {
                directory,
                owner: owner.to_owned(),
                group: group.to_owned(),
                sticky: mode & STICKY_BIT != 0,
                entries,
            },
        );
        Ok(())
    }

    fn authorize(&self, path: &Path, node: &Node) -> MetadataResult<()> {
        match self.caller.as_deref() {
            Some(caller) if caller != SUPERUSER && caller != node.owner => {
                Err(MetadataError::PermissionDenied {
                    path: path.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }

    fn update<F>(&self, path: &Path, operation: &'static str, change: F) -> MetadataResult<()>
    where
        F: FnOnce(&[AclEntry]) -> Result<Vec<AclEntry>, AclError>,
    {
        let path = normalize(path);
        let mut nodes = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        let node = nodes
            .get_mut(&path)
            .ok_or_else(|| MetadataError::not_found(&path))?;
        self.authorize(&path, node)?;

        let entries =
            change(&node.entries).map_err(|error| MetadataError::invalid_acl(&path, error))?;
        if !node.directory && transform::has_default_entries(&entries) {
            return Err(MetadataError::invalid_acl(
                &path,
                AclError::DefaultAclOnFile,
            ));
        }

        trace!(
            target: "facl::acl",
            path = %path.display(),
            operation,
            entries = entries.len(),
            "stored ACL"
        );
        node.entries = entries;
        Ok(())
    }

    fn with_node<T>(&self, path: &Path, read: impl FnOnce(&Path, &Node) -> T) -> MetadataResult<T> {
        let path = normalize(path);
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        let node = nodes
            .get(&path)
            .ok_or_else(|| MetadataError::not_found(&path))?;
        Ok(read(&path, node))
    }
}

impl AclFileSystem for MemoryFileSystem {
    fn file_status(&self, path: &Path) -> MetadataResult<FileStatus> {
        self.with_node(path, |path, node| FileStatus::new(path, node.directory))
    }

    fn list_status(&self, path: &Path) -> MetadataResult<Vec<FileStatus>> {
        let directory = normalize(path);
        let nodes = self.nodes.read().unwrap_or_else(PoisonError::into_inner);
        match nodes.get(&directory) {
            None => return Err(MetadataError::not_found(&directory)),
            Some(node) if !node.directory => {
                return Err(MetadataError::NotADirectory { path: directory });
            }
            Some(_) => {}
        }

        Ok(nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(directory.as_path()))
            .map(|(child, node)| FileStatus::new(child.clone(), node.directory))
            .collect())
    }

    fn get_acl_status(&self, path: &Path) -> MetadataResult<AclStatus> {
        self.with_node(path, |_, node| {
            AclStatus::builder()
                .owner(node.owner.clone())
                .group(node.group.clone())
                .sticky_bit(node.sticky)
                .add_entries(node.entries.iter().cloned())
                .build()
        })
    }

    fn remove_acl(&self, path: &Path) -> MetadataResult<()> {
        self.update(path, "remove_acl", |existing| {
            Ok(transform::filter_extended_entries(existing))
        })
    }

    fn remove_default_acl(&self, path: &Path) -> MetadataResult<()> {
        self.update(path, "remove_default_acl", |existing| {
            Ok(transform::filter_default_entries(existing))
        })
    }

    fn modify_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        self.update(path, "modify_acl_entries", |existing| {
            transform::merge_entries(existing, entries)
        })
    }

    fn remove_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        self.update(path, "remove_acl_entries", |existing| {
            transform::filter_entries_by_spec(existing, entries)
        })
    }

    fn set_acl(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        self.update(path, "set_acl", |_| transform::replace_entries(entries))
    }
}

/// Drops `.` components and trailing separators so lookups are stable.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests;
