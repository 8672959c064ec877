//! Snapshot of a file's ACL as reported by a filesystem.

use crate::entry::{AclEntry, AclEntryScope, AclEntryType};
use crate::action::FsAction;

/// Owner, group, sticky bit and ACL entries of one file.
///
/// Instances are produced by the filesystem layer and are never mutated by
/// the command layer; they are only rendered.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AclStatus {
    owner: String,
    group: String,
    sticky_bit: bool,
    entries: Vec<AclEntry>,
}

impl AclStatus {
    /// Starts building a status value.
    #[must_use]
    pub fn builder() -> AclStatusBuilder {
        AclStatusBuilder::default()
    }

    /// Name of the owning user.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Name of the owning group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Whether the sticky bit is set.
    #[must_use]
    pub const fn is_sticky_bit(&self) -> bool {
        self.sticky_bit
    }

    /// Entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[AclEntry] {
        &self.entries
    }

    /// Reports whether the access `other` entry grants execute permission.
    #[must_use]
    pub fn other_can_execute(&self) -> bool {
        self.entries.iter().any(|entry| {
            entry.entry_type() == AclEntryType::Other
                && entry.scope() == AclEntryScope::Access
                && entry.permission().implies(FsAction::EXECUTE)
        })
    }
}

/// Builder for [`AclStatus`].
#[derive(Clone, Debug, Default)]
pub struct AclStatusBuilder {
    owner: String,
    group: String,
    sticky_bit: bool,
    entries: Vec<AclEntry>,
}

impl AclStatusBuilder {
    /// Sets the owning user name.
    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Sets the owning group name.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the sticky bit.
    #[must_use]
    pub const fn sticky_bit(mut self, sticky_bit: bool) -> Self {
        self.sticky_bit = sticky_bit;
        self
    }

    /// Appends one entry.
    #[must_use]
    pub fn add_entry(mut self, entry: AclEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Appends several entries, keeping their order.
    #[must_use]
    pub fn add_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = AclEntry>,
    {
        self.entries.extend(entries);
        self
    }

    /// Finishes the status value.
    #[must_use]
    pub fn build(self) -> AclStatus {
        AclStatus {
            owner: self.owner,
            group: self.group,
            sticky_bit: self.sticky_bit,
            entries: self.entries,
        }
    }
}
