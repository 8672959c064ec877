//! ACL entry model: scope, subject type and the immutable [`AclEntry`] value.

use std::fmt;
use std::str::FromStr;

use crate::action::FsAction;
use crate::spec::{AclSpecError, parse_entry};

/// Literal scope token that prefixes default entries in textual form.
pub const DEFAULT_SCOPE_TOKEN: &str = "default";

/// Subject category of an ACL entry.
///
/// The declaration order is the canonical sort order of entries within a
/// scope: owner and named users, owning group and named groups, mask, other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AclEntryType {
    /// The owning user (unnamed) or a named user.
    User,
    /// The owning group (unnamed) or a named group.
    Group,
    /// Upper bound applied to the group class.
    Mask,
    /// Everyone else.
    Other,
}

/// Lowercase type names accepted by the textual grammar.
const TYPE_NAMES: [(&str, AclEntryType); 4] = [
    ("user", AclEntryType::User),
    ("group", AclEntryType::Group),
    ("mask", AclEntryType::Mask),
    ("other", AclEntryType::Other),
];

impl AclEntryType {
    /// Looks up a type by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.to_ascii_lowercase();
        TYPE_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, entry_type)| *entry_type)
    }

    /// Lowercase name used in the canonical textual form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Mask => "mask",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AclEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an entry governs the object itself or is inherited by children.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AclEntryScope {
    /// Applies to the file or directory itself.
    #[default]
    Access,
    /// Inherited by new children of a directory.
    Default,
}

impl AclEntryScope {
    /// Both scopes in canonical order.
    pub const ALL: [Self; 2] = [Self::Access, Self::Default];

    /// Lowercase scope name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Default => DEFAULT_SCOPE_TOKEN,
        }
    }
}

impl fmt::Display for AclEntryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an access control list.
///
/// Entries are values: they compare and sort by scope, type, name and
/// permission, in that order. An empty name denotes the unnamed entry of its
/// type (the file owner for `user`, the owning group for `group`).
///
/// # Examples
///
/// ```
/// use acl::{AclEntry, AclEntryScope, AclEntryType, FsAction};
///
/// let entry = AclEntry::builder(AclEntryType::Group)
///     .scope(AclEntryScope::Default)
///     .name("staff")
///     .permission(FsAction::READ_EXECUTE)
///     .build();
///
/// assert_eq!(entry.to_string(), "default:group:staff:r-x");
/// assert_eq!(entry, "default:group:staff:r-x".parse().unwrap());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AclEntry {
    scope: AclEntryScope,
    entry_type: AclEntryType,
    name: String,
    permission: FsAction,
}

impl AclEntry {
    /// Starts building an entry of the given type.
    #[must_use]
    pub fn builder(entry_type: AclEntryType) -> AclEntryBuilder {
        AclEntryBuilder::new(entry_type)
    }

    /// Scope of the entry.
    #[must_use]
    pub const fn scope(&self) -> AclEntryScope {
        self.scope
    }

    /// Subject type of the entry.
    #[must_use]
    pub const fn entry_type(&self) -> AclEntryType {
        self.entry_type
    }

    /// Subject name; empty for unnamed entries.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Granted permissions.
    #[must_use]
    pub const fn permission(&self) -> FsAction {
        self.permission
    }

    /// Returns `true` when the entry carries no subject name.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns `true` for the unnamed access `user`, `group` and `other`
    /// entries that mirror the traditional permission bits.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.scope == AclEntryScope::Access
            && self.is_unnamed()
            && self.entry_type != AclEntryType::Mask
    }

    /// Identity of the entry ignoring its permission.
    #[must_use]
    pub fn key(&self) -> EntryKey<'_> {
        EntryKey {
            scope: self.scope,
            entry_type: self.entry_type,
            name: &self.name,
        }
    }

    /// Returns a copy of the entry moved to another scope.
    #[must_use]
    pub fn with_scope(&self, scope: AclEntryScope) -> Self {
        Self {
            scope,
            ..self.clone()
        }
    }
}

impl fmt::Display for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope == AclEntryScope::Default {
            write!(f, "{DEFAULT_SCOPE_TOKEN}:")?;
        }
        write!(f, "{}:{}:{}", self.entry_type, self.name, self.permission)
    }
}

impl FromStr for AclEntry {
    type Err = AclSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_entry(s)
    }
}

/// The (scope, type, name) triple that identifies an entry within an ACL.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EntryKey<'a> {
    /// Entry scope.
    pub scope: AclEntryScope,
    /// Entry type.
    pub entry_type: AclEntryType,
    /// Entry name, empty when unnamed.
    pub name: &'a str,
}

/// Builder for [`AclEntry`].
///
/// Scope defaults to [`AclEntryScope::Access`], the name to empty and the
/// permission to [`FsAction::NONE`].
#[derive(Clone, Debug)]
pub struct AclEntryBuilder {
    scope: AclEntryScope,
    entry_type: AclEntryType,
    name: String,
    permission: FsAction,
}

impl AclEntryBuilder {
    /// Creates a builder for an entry of the given type.
    #[must_use]
    pub fn new(entry_type: AclEntryType) -> Self {
        Self {
            scope: AclEntryScope::Access,
            entry_type,
            name: String::new(),
            permission: FsAction::NONE,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub const fn scope(mut self, scope: AclEntryScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the subject name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the permission.
    #[must_use]
    pub const fn permission(mut self, permission: FsAction) -> Self {
        self.permission = permission;
        self
    }

    /// Finishes the entry.
    #[must_use]
    pub fn build(self) -> AclEntry {
        AclEntry {
            scope: self.scope,
            entry_type: self.entry_type,
            name: self.name,
            permission: self.permission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        scope: AclEntryScope,
        entry_type: AclEntryType,
        name: &str,
        perm: FsAction,
    ) -> AclEntry {
        AclEntry::builder(entry_type)
            .scope(scope)
            .name(name)
            .permission(perm)
            .build()
    }

    #[test]
    fn type_lookup_ignores_case() {
        assert_eq!(AclEntryType::from_name("USER"), Some(AclEntryType::User));
        assert_eq!(AclEntryType::from_name("Group"), Some(AclEntryType::Group));
        assert_eq!(AclEntryType::from_name("mAsK"), Some(AclEntryType::Mask));
        assert_eq!(AclEntryType::from_name("other"), Some(AclEntryType::Other));
        assert_eq!(AclEntryType::from_name("bogus"), None);
        assert_eq!(AclEntryType::from_name(""), None);
    }

    #[test]
    fn display_uses_canonical_form() {
        let access = entry(AclEntryScope::Access, AclEntryType::User, "", FsAction::ALL);
        assert_eq!(access.to_string(), "user::rwx");

        let named = entry(
            AclEntryScope::Default,
            AclEntryType::Group,
            "foo",
            FsAction::READ_EXECUTE,
        );
        assert_eq!(named.to_string(), "default:group:foo:r-x");

        let mask = entry(AclEntryScope::Access, AclEntryType::Mask, "", FsAction::READ);
        assert_eq!(mask.to_string(), "mask::r--");
    }

    #[test]
    fn builder_defaults_to_unnamed_access_entry() {
        let built = AclEntry::builder(AclEntryType::Other).build();
        assert_eq!(built.scope(), AclEntryScope::Access);
        assert!(built.is_unnamed());
        assert_eq!(built.permission(), FsAction::NONE);
    }

    #[test]
    fn ordering_follows_canonical_acl_layout() {
        let mut entries = vec![
            entry(AclEntryScope::Default, AclEntryType::User, "", FsAction::ALL),
            entry(AclEntryScope::Access, AclEntryType::Other, "", FsAction::READ),
            entry(AclEntryScope::Access, AclEntryType::Mask, "", FsAction::ALL),
            entry(AclEntryScope::Access, AclEntryType::Group, "staff", FsAction::READ),
            entry(AclEntryScope::Access, AclEntryType::Group, "", FsAction::READ),
            entry(AclEntryScope::Access, AclEntryType::User, "bruce", FsAction::ALL),
            entry(AclEntryScope::Access, AclEntryType::User, "", FsAction::ALL),
        ];
        entries.sort();

        let rendered: Vec<String> = entries.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "user::rwx",
                "user:bruce:rwx",
                "group::r--",
                "group:staff:r--",
                "mask::rwx",
                "other::r--",
                "default:user::rwx",
            ]
        );
    }

    #[test]
    fn base_entries_exclude_named_mask_and_default() {
        assert!(entry(AclEntryScope::Access, AclEntryType::User, "", FsAction::ALL).is_base());
        assert!(entry(AclEntryScope::Access, AclEntryType::Other, "", FsAction::NONE).is_base());
        let named = entry(AclEntryScope::Access, AclEntryType::User, "bruce", FsAction::ALL);
        assert!(!named.is_base());
        assert!(!entry(AclEntryScope::Access, AclEntryType::Mask, "", FsAction::ALL).is_base());
        assert!(!entry(AclEntryScope::Default, AclEntryType::Group, "", FsAction::ALL).is_base());
    }

    #[test]
    fn key_ignores_permission() {
        let first = entry(AclEntryScope::Access, AclEntryType::User, "bruce", FsAction::ALL);
        let second = entry(AclEntryScope::Access, AclEntryType::User, "bruce", FsAction::NONE);
        assert_ne!(first, second);
        assert_eq!(first.key(), second.key());
    }
}
