use std::path::{Path, PathBuf};

use acl::{AclEntry, AclStatus};

use crate::error::MetadataResult;

/// Type information for one path, as needed by traversal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileStatus {
    path: PathBuf,
    is_directory: bool,
}

impl FileStatus {
    /// Creates a status value.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, is_directory: bool) -> Self {
        Self {
            path: path.into(),
            is_directory,
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the path is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }
}

/// ACL capable filesystem.
///
/// Each mutating method is atomic for its path: either the whole change is
/// stored or the ACL is left as it was. Implementations report failures with
/// the offending path attached.
pub trait AclFileSystem {
    /// Returns type information for `path`.
    fn file_status(&self, path: &Path) -> MetadataResult<FileStatus>;

    /// Lists the children of the directory `path`, sorted by name.
    fn list_status(&self, path: &Path) -> MetadataResult<Vec<FileStatus>>;

    /// Returns owner, group, sticky bit and ACL entries of `path`.
    fn get_acl_status(&self, path: &Path) -> MetadataResult<AclStatus>;

    /// Removes every entry except the unnamed access user, group and other entries.
    fn remove_acl(&self, path: &Path) -> MetadataResult<()>;

    /// Removes the default ACL.
    fn remove_default_acl(&self, path: &Path) -> MetadataResult<()>;

    /// Merges `entries` into the ACL, replacing entries with the same scope, type and name.
    fn modify_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()>;

    /// Removes the entries matching the scope, type and name of `entries`.
    fn remove_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()>;

    /// Replaces the ACL with `entries`.
    fn set_acl(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()>;
}

impl<T> AclFileSystem for &T
where
    T: AclFileSystem + ?Sized,
{
    fn file_status(&self, path: &Path) -> MetadataResult<FileStatus> {
        (**self).file_status(path)
    }

    fn list_status(&self, path: &Path) -> MetadataResult<Vec<FileStatus>> {
        (**self).list_status(path)
    }

    fn get_acl_status(&self, path: &Path) -> MetadataResult<AclStatus> {
        (**self).get_acl_status(path)
    }

    fn remove_acl(&self, path: &Path) -> MetadataResult<()> {
        (**self).remove_acl(path)
    }

    fn remove_default_acl(&self, path: &Path) -> MetadataResult<()> {
        (**self).remove_default_acl(path)
    }

    fn modify_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        (**self).modify_acl_entries(path, entries)
    }

    fn remove_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        (**self).remove_acl_entries(path, entries)
    }

    fn set_acl(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        (**self).set_acl(path, entries)
    }
}
