//! ACL mutation for `setfacl`.

use std::path::Path;

use metadata::{AclFileSystem, MetadataResult};
use tracing::debug;

use crate::options::AclOperation;

/// Applies `operation` to one path through exactly one filesystem call.
pub(crate) fn apply<F>(fs: &F, path: &Path, operation: &AclOperation) -> MetadataResult<()>
where
    F: AclFileSystem + ?Sized,
{
    debug!(
        target: "facl::setfacl",
        path = %path.display(),
        operation = operation.name(),
        entries = operation.entries().len(),
        "applying ACL change"
    );

    match operation {
        AclOperation::RemoveAll => fs.remove_acl(path),
        AclOperation::RemoveDefault => fs.remove_default_acl(path),
        AclOperation::Modify(entries) => fs.modify_acl_entries(path, entries),
        AclOperation::RemoveEntries(entries) => fs.remove_acl_entries(path, entries),
        AclOperation::Replace(entries) => fs.set_acl(path, entries),
    }
}
