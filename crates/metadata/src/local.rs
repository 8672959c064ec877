//! Host filesystem backend.

use std::fs;
use std::path::Path;

use acl::{AclEntry, AclError, AclStatus, transform};
use tracing::trace;

use crate::error::{MetadataError, MetadataResult};
use crate::filesystem::{AclFileSystem, FileStatus};
use crate::posix_acl;

/// [`AclFileSystem`] over the directories and files of the host.
///
/// Symbolic links are reported as non-directories by
/// [`AclFileSystem::file_status`] and [`AclFileSystem::list_status`], so a
/// recursive walk never follows them. ACL calls follow links.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn metadata(path: &Path) -> MetadataResult<fs::Metadata> {
        fs::metadata(path).map_err(|error| MetadataError::from_io(path, error))
    }

    fn update<F>(path: &Path, operation: &'static str, change: F) -> MetadataResult<()>
    where
        F: FnOnce(&[AclEntry]) -> Result<Vec<AclEntry>, AclError>,
    {
        let metadata = Self::metadata(path)?;
        let existing = posix_acl::read_entries(path, &metadata)?;
        let entries = change(&existing).map_err(|error| MetadataError::invalid_acl(path, error))?;
        if !metadata.is_dir() && transform::has_default_entries(&entries) {
            return Err(MetadataError::invalid_acl(path, AclError::DefaultAclOnFile));
        }

        trace!(
            target: "facl::acl",
            path = %path.display(),
            operation,
            entries = entries.len(),
            "writing ACL"
        );
        posix_acl::write_entries(path, &metadata, &entries)
    }
}

impl AclFileSystem for LocalFileSystem {
    fn file_status(&self, path: &Path) -> MetadataResult<FileStatus> {
        let metadata =
            fs::symlink_metadata(path).map_err(|error| MetadataError::from_io(path, error))?;
        Ok(FileStatus::new(path, metadata.is_dir()))
    }

    fn list_status(&self, path: &Path) -> MetadataResult<Vec<FileStatus>> {
        let read_dir = fs::read_dir(path).map_err(|error| MetadataError::from_io(path, error))?;
        let mut children = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|error| MetadataError::from_io(path, error))?;
            let child = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|error| MetadataError::from_io(&child, error))?;
            children.push(FileStatus::new(child, file_type.is_dir()));
        }
        children.sort_by(|left, right| left.path().cmp(right.path()));
        Ok(children)
    }

    fn get_acl_status(&self, path: &Path) -> MetadataResult<AclStatus> {
        let metadata = Self::metadata(path)?;
        let entries = posix_acl::read_entries(path, &metadata)?;
        let (owner, group, sticky) = ownership(&metadata);
        Ok(AclStatus::builder()
            .owner(owner)
            .group(group)
            .sticky_bit(sticky)
            .add_entries(entries)
            .build())
    }

    fn remove_acl(&self, path: &Path) -> MetadataResult<()> {
        Self::update(path, "remove_acl", |existing| {
            Ok(transform::filter_extended_entries(existing))
        })
    }

    fn remove_default_acl(&self, path: &Path) -> MetadataResult<()> {
        Self::update(path, "remove_default_acl", |existing| {
            Ok(transform::filter_default_entries(existing))
        })
    }

    fn modify_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        Self::update(path, "modify_acl_entries", |existing| {
            transform::merge_entries(existing, entries)
        })
    }

    fn remove_acl_entries(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        Self::update(path, "remove_acl_entries", |existing| {
            transform::filter_entries_by_spec(existing, entries)
        })
    }

    fn set_acl(&self, path: &Path, entries: &[AclEntry]) -> MetadataResult<()> {
        Self::update(path, "set_acl", |_| transform::replace_entries(entries))
    }
}

#[cfg(unix)]
fn ownership(metadata: &fs::Metadata) -> (String, String, bool) {
    use std::os::unix::fs::MetadataExt;

    use crate::id_lookup::{group_name, user_name};

    (
        user_name(metadata.uid()),
        group_name(metadata.gid()),
        metadata.mode() & acl::mode::STICKY_BIT != 0,
    )
}

#[cfg(not(unix))]
fn ownership(_metadata: &fs::Metadata) -> (String, String, bool) {
    (String::new(), String::new(), false)
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use acl::parse_acl_spec;
    use tempfile::tempdir;

    use super::*;

    fn chmod(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod");
    }

    #[test]
    fn status_mirrors_mode_bits() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        fs::write(&file, b"x").expect("write");
        chmod(&file, 0o640);

        let status = LocalFileSystem::new().get_acl_status(&file).expect("status");
        let rendered: Vec<String> = status.entries().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["user::rw-", "group::r--", "other::---"]);
        assert!(!status.is_sticky_bit());
        assert!(!status.owner().is_empty());
    }

    #[test]
    fn sticky_directory_is_reported() {
        let dir = tempdir().expect("tempdir");
        chmod(dir.path(), 0o1777);
        let status = LocalFileSystem::new()
            .get_acl_status(dir.path())
            .expect("status");
        assert!(status.is_sticky_bit());
    }

    #[test]
    fn base_only_acl_is_applied_as_mode() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        fs::write(&file, b"x").expect("write");
        chmod(&file, 0o644);

        let fs_backend = LocalFileSystem::new();
        fs_backend
            .set_acl(&file, &parse_acl_spec("user::rw-,group::---,other::---").expect("spec"))
            .expect("set");
        let mode = fs::metadata(&file).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        fs_backend.remove_acl(&file).expect("remove");
        fs_backend.remove_default_acl(&file).expect("remove default");
    }

    #[cfg(not(feature = "posix-acl"))]
    #[test]
    fn extended_entries_need_acl_support() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        fs::write(&file, b"x").expect("write");

        let error = LocalFileSystem::new()
            .modify_acl_entries(&file, &parse_acl_spec("user:nobody:r--").expect("spec"))
            .expect_err("unsupported");
        assert!(matches!(error, MetadataError::Unsupported { .. }));
    }

    #[test]
    fn default_acl_on_file_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("file");
        fs::write(&file, b"x").expect("write");

        let error = LocalFileSystem::new()
            .modify_acl_entries(&file, &parse_acl_spec("default:other::r--").expect("spec"))
            .expect_err("file");
        assert!(matches!(error, MetadataError::InvalidAcl { .. }));
    }

    #[test]
    fn listing_is_sorted_and_does_not_follow_links() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("b")).expect("dir");
        fs::write(dir.path().join("a"), b"").expect("file");
        std::os::unix::fs::symlink(dir.path().join("b"), dir.path().join("c")).expect("link");

        let listing = LocalFileSystem::new().list_status(dir.path()).expect("list");
        let summary: Vec<(String, bool)> = listing
            .iter()
            .map(|status| {
                let name = status.path().file_name().expect("name");
                (name.to_string_lossy().into_owned(), status.is_directory())
            })
            .collect();
        assert_eq!(
            summary,
            [
                (String::from("a"), false),
                (String::from("b"), true),
                (String::from("c"), false),
            ]
        );
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("missing");
        let backend = LocalFileSystem::new();
        assert!(backend.file_status(&missing).expect_err("status").is_not_found());
        assert!(backend.get_acl_status(&missing).expect_err("acl").is_not_found());
        assert!(backend.list_status(&missing).expect_err("list").is_not_found());
    }
}
