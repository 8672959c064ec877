//! Conversions between permission mode bits and minimal ACLs.

use crate::action::FsAction;
use crate::entry::{AclEntry, AclEntryType};

/// Sticky bit of a file mode.
pub const STICKY_BIT: u32 = 0o1000;

/// Builds the three-entry ACL equivalent to the permission bits of `mode`.
#[must_use]
pub fn minimal_entries(mode: u32) -> Vec<AclEntry> {
    [
        (AclEntryType::User, mode >> 6),
        (AclEntryType::Group, mode >> 3),
        (AclEntryType::Other, mode),
    ]
    .into_iter()
    .map(|(entry_type, bits)| {
        AclEntry::builder(entry_type)
            .permission(FsAction::from_octal(bits))
            .build()
    })
    .collect()
}

/// Returns the `0o777` permission bits for an ACL made only of base entries.
///
/// Returns `None` when the ACL holds anything besides the unnamed access
/// `user`, `group` and `other` entries, or when one of them is missing.
#[must_use]
pub fn permission_bits(entries: &[AclEntry]) -> Option<u32> {
    let mut user = None;
    let mut group = None;
    let mut other = None;

    for entry in entries {
        if !entry.is_base() {
            return None;
        }
        let bits = Some(entry.permission().to_octal());
        match entry.entry_type() {
            AclEntryType::User => user = bits,
            AclEntryType::Group => group = bits,
            AclEntryType::Other => other = bits,
            AclEntryType::Mask => return None,
        }
    }

    Some((user? << 6) | (group? << 3) | other?)
}
