//! Parser for textual ACL specifications such as `user::rwx,group:staff:r-x`.
//!
//! A specification is a comma separated list of entries. Each entry is either
//! `type:name:perm` (access scope) or `default:type:name:perm` (default
//! scope), mirroring the `setfacl` convention. Empty comma segments are
//! skipped, so `user::rwx,,other::---` yields two entries.

mod state;

use thiserror::Error;

use crate::entry::AclEntry;
use state::EntryMachine;

/// Error produced when an ACL specification cannot be parsed.
///
/// Every variant carries the offending entry text so diagnostics can point at
/// the exact fragment that failed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AclSpecError {
    /// Wrong number of fields, or a four field entry not starting with `default`.
    #[error("Invalid <aclSpec> : {0}")]
    InvalidAclSpec(String),
    /// The type field is not one of `user`, `group`, `mask` or `other`.
    #[error("Invalid type of acl in <aclSpec> :{0}")]
    InvalidAclType(String),
    /// The permission field is not a canonical `[r-][w-][x-]` triple.
    #[error("Invalid permission in <aclSpec> : {0}")]
    InvalidPermission(String),
}

impl AclSpecError {
    /// The specification fragment that failed to parse.
    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            Self::InvalidAclSpec(text)
            | Self::InvalidAclType(text)
            | Self::InvalidPermission(text) => text,
        }
    }
}

/// Parses a comma separated ACL specification into entries.
///
/// Entries are returned in input order without sorting or de-duplication.
/// A specification that contains no entries at all is rejected.
///
/// # Examples
///
/// ```
/// use acl::{AclEntryScope, AclEntryType, parse_acl_spec};
///
/// let entries = parse_acl_spec("user::rwx,default:group:foo:r-x")?;
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].scope(), AclEntryScope::Default);
/// assert_eq!(entries[1].entry_type(), AclEntryType::Group);
/// assert_eq!(entries[1].name(), "foo");
/// # Ok::<(), acl::AclSpecError>(())
/// ```
pub fn parse_acl_spec(spec: &str) -> Result<Vec<AclEntry>, AclSpecError> {
    let mut entries = Vec::new();

    for segment in spec.split(',') {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        entries.push(parse_entry(trimmed)?);
    }

    if entries.is_empty() {
        return Err(AclSpecError::InvalidAclSpec(spec.to_owned()));
    }

    tracing::trace!(target: "facl::acl", count = entries.len(), "parsed acl spec");
    Ok(entries)
}

/// Parses a single colon delimited entry.
pub(crate) fn parse_entry(text: &str) -> Result<AclEntry, AclSpecError> {
    let fields: Vec<&str> = text.split(':').collect();
    let mut machine = EntryMachine::new(text, fields.len())?;
    for field in fields {
        machine.feed(field)?;
    }
    machine.finish()
}
