//! crates/acl/src/transform.rs
//!
//! Rules that turn an existing ACL plus a requested change into the new ACL.
//!
//! Every filesystem backend applies the same five mutations: strip extended
//! entries, strip the default ACL, merge entries, remove entries and replace
//! the whole ACL. The functions here are pure; a backend reads the current
//! entries, calls one of them and stores the result atomically.
//!
//! Results are always sorted in canonical order (see [`AclEntry`]'s `Ord`)
//! and, for the three operations that accept a specification, validated:
//!
//! - every (scope, type, name) triple appears once;
//! - `mask` and `other` entries are unnamed;
//! - a scope holds at most [`MAX_ENTRIES`] entries;
//! - the access scope (and the default scope, when present) contains the
//!   unnamed `user`, `group` and `other` entries.
//!
//! A scope whose entries the operation added, changed or removed gets its
//! mask recalculated as the union of the group class, provided it holds
//! named `user`/`group` entries or a mask and the specification supplied no
//! mask for it. Masks of untouched scopes are kept as they are.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use thiserror::Error;

use crate::action::FsAction;
use crate::entry::{AclEntry, AclEntryScope, AclEntryType};

/// Maximum number of entries allowed in one scope.
pub const MAX_ENTRIES: usize = 32;

/// Types that every non-empty scope must carry as unnamed entries.
const BASE_TYPES: [AclEntryType; 3] =
    [AclEntryType::User, AclEntryType::Group, AclEntryType::Other];

/// Error produced when a requested ACL change would leave an invalid ACL.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AclError {
    /// The specification names the same (scope, type, name) twice.
    #[error("Invalid ACL: multiple entries with same scope, type and name: {0}")]
    DuplicateEntry(AclEntry),
    /// A `mask` or `other` entry carries a name.
    #[error("Invalid ACL: this entry type must not have a name: {0}")]
    NamedEntryNotAllowed(AclEntry),
    /// A scope grew beyond [`MAX_ENTRIES`].
    #[error("Invalid ACL: {scope} ACL has {count} entries, which exceeds maximum of {MAX_ENTRIES}")]
    TooManyEntries {
        /// Offending scope.
        scope: AclEntryScope,
        /// Number of entries in the scope.
        count: usize,
    },
    /// The unnamed `user`, `group` or `other` entry of a scope is missing.
    #[error("Invalid ACL: the user, group and other entries are required in the {scope} ACL")]
    MissingBaseEntries {
        /// Offending scope.
        scope: AclEntryScope,
    },
    /// Default entries were supplied for something that is not a directory.
    #[error("Invalid ACL: only directories may have a default ACL")]
    DefaultAclOnFile,
}

/// Keeps only the base entries (`setfacl -b`).
#[must_use]
pub fn filter_extended_entries(existing: &[AclEntry]) -> Vec<AclEntry> {
    sorted(existing.iter().filter(|entry| entry.is_base()).cloned())
}

/// Drops every default-scope entry (`setfacl -k`).
#[must_use]
pub fn filter_default_entries(existing: &[AclEntry]) -> Vec<AclEntry> {
    sorted(
        existing
            .iter()
            .filter(|entry| entry.scope() == AclEntryScope::Access)
            .cloned(),
    )
}

/// Merges `spec` into `existing` (`setfacl -m`).
///
/// An entry of the specification replaces the existing entry with the same
/// (scope, type, name); entries not mentioned are kept.
pub fn merge_entries(existing: &[AclEntry], spec: &[AclEntry]) -> Result<Vec<AclEntry>, AclError> {
    ensure_unique(spec)?;
    let mut acl = AclMap::from_entries(existing);
    for entry in spec {
        acl.insert(entry);
    }
    acl.finish(&explicit_mask_scopes(spec))
}

/// Removes the entries named by `spec` (`setfacl -x`).
///
/// Matching uses (scope, type, name) only; permissions in the specification
/// are ignored.
pub fn filter_entries_by_spec(
    existing: &[AclEntry],
    spec: &[AclEntry],
) -> Result<Vec<AclEntry>, AclError> {
    let mut acl = AclMap::from_entries(existing);
    for entry in spec {
        acl.remove(entry);
    }
    acl.finish(&[])
}

/// Builds a whole new ACL from `spec` (`setfacl --set`).
pub fn replace_entries(spec: &[AclEntry]) -> Result<Vec<AclEntry>, AclError> {
    ensure_unique(spec)?;
    let mut acl = AclMap::from_entries(spec);
    acl.changed.extend(AclEntryScope::ALL);
    acl.finish(&explicit_mask_scopes(spec))
}

/// Returns `true` when any entry belongs to the default scope.
#[must_use]
pub fn has_default_entries(entries: &[AclEntry]) -> bool {
    entries
        .iter()
        .any(|entry| entry.scope() == AclEntryScope::Default)
}

fn sorted(entries: impl Iterator<Item = AclEntry>) -> Vec<AclEntry> {
    let mut entries: Vec<AclEntry> = entries.collect();
    entries.sort();
    entries
}

fn ensure_unique(spec: &[AclEntry]) -> Result<(), AclError> {
    let mut seen = HashSet::with_capacity(spec.len());
    for entry in spec {
        if !seen.insert(entry.key()) {
            return Err(AclError::DuplicateEntry(entry.clone()));
        }
    }
    Ok(())
}

fn explicit_mask_scopes(spec: &[AclEntry]) -> Vec<AclEntryScope> {
    spec.iter()
        .filter(|entry| entry.entry_type() == AclEntryType::Mask)
        .map(AclEntry::scope)
        .collect()
}

type Key = (AclEntryScope, AclEntryType, String);

/// Working copy of an ACL keyed by (scope, type, name).
#[derive(Debug, Default)]
struct AclMap {
    entries: BTreeMap<Key, FsAction>,
    /// Scopes in which an entry was added, replaced or deleted.
    changed: BTreeSet<AclEntryScope>,
}

impl AclMap {
    fn from_entries(entries: &[AclEntry]) -> Self {
        let entries = entries
            .iter()
            .map(|entry| (Self::key(entry), entry.permission()))
            .collect();
        Self {
            entries,
            changed: BTreeSet::new(),
        }
    }

    fn key(entry: &AclEntry) -> Key {
        (entry.scope(), entry.entry_type(), entry.name().to_owned())
    }

    fn insert(&mut self, entry: &AclEntry) {
        let previous = self.entries.insert(Self::key(entry), entry.permission());
        if previous != Some(entry.permission()) {
            self.changed.insert(entry.scope());
        }
    }

    fn remove(&mut self, entry: &AclEntry) {
        if self.entries.remove(&Self::key(entry)).is_some() {
            self.changed.insert(entry.scope());
        }
    }

    fn unnamed(scope: AclEntryScope, entry_type: AclEntryType) -> Key {
        (scope, entry_type, String::new())
    }

    fn has_scope(&self, scope: AclEntryScope) -> bool {
        self.entries.keys().any(|(candidate, _, _)| *candidate == scope)
    }

    fn finish(mut self, explicit_masks: &[AclEntryScope]) -> Result<Vec<AclEntry>, AclError> {
        self.copy_default_base_entries();
        let stale: Vec<AclEntryScope> = self
            .changed
            .iter()
            .copied()
            .filter(|scope| !explicit_masks.contains(scope))
            .collect();
        for scope in stale {
            self.recalculate_mask(scope);
        }

        let entries = self.into_entries();
        validate(&entries)?;
        Ok(entries)
    }

    /// Fills missing unnamed default entries from their access counterparts.
    fn copy_default_base_entries(&mut self) {
        if !self.has_scope(AclEntryScope::Default) {
            return;
        }
        for entry_type in BASE_TYPES {
            let default_key = Self::unnamed(AclEntryScope::Default, entry_type);
            if self.entries.contains_key(&default_key) {
                continue;
            }
            let access_key = Self::unnamed(AclEntryScope::Access, entry_type);
            if let Some(permission) = self.entries.get(&access_key).copied() {
                self.entries.insert(default_key, permission);
                self.changed.insert(AclEntryScope::Default);
            }
        }
    }

    fn recalculate_mask(&mut self, scope: AclEntryScope) {
        let mask_key = Self::unnamed(scope, AclEntryType::Mask);
        let has_named = self.entries.keys().any(|(candidate, entry_type, name)| {
            *candidate == scope
                && matches!(entry_type, AclEntryType::User | AclEntryType::Group)
                && !name.is_empty()
        });
        if !has_named && !self.entries.contains_key(&mask_key) {
            return;
        }

        let group_class = self
            .entries
            .iter()
            .filter(|((candidate, entry_type, name), _)| {
                *candidate == scope
                    && (*entry_type == AclEntryType::Group
                        || (*entry_type == AclEntryType::User && !name.is_empty()))
            })
            .fold(FsAction::NONE, |mask, (_, permission)| mask | *permission);

        tracing::trace!(target: "facl::acl", %scope, mask = %group_class, "recalculated mask");
        self.entries.insert(mask_key, group_class);
    }

    fn into_entries(self) -> Vec<AclEntry> {
        self.entries
            .into_iter()
            .map(|((scope, entry_type, name), permission)| {
                AclEntry::builder(entry_type)
                    .scope(scope)
                    .name(name)
                    .permission(permission)
                    .build()
            })
            .collect()
    }
}

fn validate(entries: &[AclEntry]) -> Result<(), AclError> {
    let named_special = |entry: &&AclEntry| {
        !entry.is_unnamed()
            && matches!(entry.entry_type(), AclEntryType::Mask | AclEntryType::Other)
    };
    if let Some(entry) = entries.iter().find(named_special) {
        return Err(AclError::NamedEntryNotAllowed(entry.clone()));
    }

    for scope in AclEntryScope::ALL {
        let count = entries.iter().filter(|entry| entry.scope() == scope).count();
        if count == 0 && scope == AclEntryScope::Default {
            continue;
        }
        if count > MAX_ENTRIES {
            return Err(AclError::TooManyEntries { scope, count });
        }
        let complete = BASE_TYPES.iter().all(|entry_type| {
            entries.iter().any(|entry| {
                entry.scope() == scope && entry.entry_type() == *entry_type && entry.is_unnamed()
            })
        });
        if !complete {
            return Err(AclError::MissingBaseEntries { scope });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
