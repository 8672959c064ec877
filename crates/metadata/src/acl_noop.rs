//! ACL store for platforms without POSIX ACLs or permission bits.

use std::fs;
use std::path::Path;

use acl::AclEntry;

use crate::error::{MetadataError, MetadataResult};

const REASON: &str = "ACLs are not supported on this platform";

pub(crate) fn read_entries(path: &Path, _metadata: &fs::Metadata) -> MetadataResult<Vec<AclEntry>> {
    Err(MetadataError::unsupported(path, REASON))
}

pub(crate) fn write_entries(
    path: &Path,
    _metadata: &fs::Metadata,
    _entries: &[AclEntry],
) -> MetadataResult<()> {
    Err(MetadataError::unsupported(path, REASON))
}
