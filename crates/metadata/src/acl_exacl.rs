//! ACL store backed by `exacl` on Linux and FreeBSD.

use std::fs;
use std::path::Path;

use acl::{AclEntry, AclEntryScope, AclEntryType, FsAction, transform};
use exacl::{AclEntry as RawEntry, AclEntryKind, AclOption, Flag, Perm};
use tracing::trace;

use crate::error::{MetadataError, MetadataResult};

const PERMISSIONS: [(FsAction, Perm); 3] = [
    (FsAction::READ, Perm::READ),
    (FsAction::WRITE, Perm::WRITE),
    (FsAction::EXECUTE, Perm::EXECUTE),
];

pub(crate) fn read_entries(path: &Path, metadata: &fs::Metadata) -> MetadataResult<Vec<AclEntry>> {
    let mut entries = read_scope(path, AclEntryScope::Access)?;
    if metadata.is_dir() {
        entries.extend(read_scope(path, AclEntryScope::Default)?);
    }
    entries.sort();
    trace!(target: "facl::acl", path = %path.display(), entries = entries.len(), "read ACL");
    Ok(entries)
}

pub(crate) fn write_entries(
    path: &Path,
    metadata: &fs::Metadata,
    entries: &[AclEntry],
) -> MetadataResult<()> {
    let raw: Vec<RawEntry> = entries.iter().map(to_raw).collect();
    exacl::setfacl(&[path], &raw, None).map_err(|error| MetadataError::from_io(path, error))?;

    if metadata.is_dir() && !transform::has_default_entries(entries) {
        // An empty list with DEFAULT_ACL deletes the default ACL.
        exacl::setfacl(&[path], &[], AclOption::DEFAULT_ACL)
            .map_err(|error| MetadataError::from_io(path, error))?;
    }
    Ok(())
}

fn read_scope(path: &Path, scope: AclEntryScope) -> MetadataResult<Vec<AclEntry>> {
    let option = match scope {
        AclEntryScope::Access => None,
        AclEntryScope::Default => Some(AclOption::DEFAULT_ACL),
    };
    let raw = exacl::getfacl(path, option).map_err(|error| MetadataError::from_io(path, error))?;
    Ok(raw.iter().filter_map(|entry| from_raw(entry, scope)).collect())
}

fn from_raw(raw: &RawEntry, scope: AclEntryScope) -> Option<AclEntry> {
    let entry_type = match raw.kind {
        AclEntryKind::User => AclEntryType::User,
        AclEntryKind::Group => AclEntryType::Group,
        AclEntryKind::Mask => AclEntryType::Mask,
        AclEntryKind::Other => AclEntryType::Other,
        _ => return None,
    };
    let permission = PERMISSIONS
        .iter()
        .filter(|(_, perm)| raw.perms.contains(*perm))
        .fold(FsAction::NONE, |acc, (action, _)| acc | *action);

    Some(
        AclEntry::builder(entry_type)
            .scope(scope)
            .name(raw.name.clone())
            .permission(permission)
            .build(),
    )
}

fn to_raw(entry: &AclEntry) -> RawEntry {
    let kind = match entry.entry_type() {
        AclEntryType::User => AclEntryKind::User,
        AclEntryType::Group => AclEntryKind::Group,
        AclEntryType::Mask => AclEntryKind::Mask,
        AclEntryType::Other => AclEntryKind::Other,
    };
    let perms = PERMISSIONS
        .iter()
        .filter(|(action, _)| entry.permission().implies(*action))
        .fold(Perm::empty(), |acc, (_, perm)| acc | *perm);
    let flags = match entry.scope() {
        AclEntryScope::Access => Flag::empty(),
        AclEntryScope::Default => Flag::DEFAULT,
    };

    RawEntry {
        kind,
        name: entry.name().to_owned(),
        perms,
        flags,
        allow: true,
    }
}
