//! ACL store backed by permission bits only.
//!
//! Reads report the minimal ACL of the mode. Writes succeed only when the
//! result is made of the three base entries, which are applied with `chmod`;
//! anything else needs the `posix-acl` feature.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use acl::mode::{minimal_entries, permission_bits};
use acl::{AclEntry, transform};
use tracing::trace;

use crate::error::{MetadataError, MetadataResult};

const SPECIAL_BITS: u32 = 0o7000;

pub(crate) fn read_entries(_path: &Path, metadata: &fs::Metadata) -> MetadataResult<Vec<AclEntry>> {
    Ok(minimal_entries(metadata.permissions().mode()))
}

pub(crate) fn write_entries(
    path: &Path,
    metadata: &fs::Metadata,
    entries: &[AclEntry],
) -> MetadataResult<()> {
    if transform::has_default_entries(entries) {
        return Err(MetadataError::unsupported(
            path,
            "default ACLs require the posix-acl feature",
        ));
    }
    let Some(bits) = permission_bits(entries) else {
        return Err(MetadataError::unsupported(
            path,
            "extended ACL entries require the posix-acl feature",
        ));
    };

    let mode = (metadata.permissions().mode() & SPECIAL_BITS) | bits;
    trace!(target: "facl::acl", path = %path.display(), mode = format_args!("{mode:o}"), "chmod");
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|error| MetadataError::from_io(path, error))
}
