use crate::action::FsAction;
use crate::entry::{AclEntry, AclEntryScope, AclEntryType, DEFAULT_SCOPE_TOKEN};

use super::AclSpecError;

/// Field counts accepted for access and default entries.
const ACCESS_FIELDS: usize = 3;
const DEFAULT_FIELDS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum State {
    ExpectScopeOrType,
    ExpectType,
    ExpectName,
    ExpectPerm,
    Done,
}

/// Consumes the colon separated fields of one entry, one field at a time.
///
/// The number of fields decides up front whether the first field is a scope:
/// with four fields it must be the literal `default`, with three it is the
/// type.
#[derive(Debug)]
pub(super) struct EntryMachine<'a> {
    text: &'a str,
    field_count: usize,
    state: State,
    scope: AclEntryScope,
    entry_type: Option<AclEntryType>,
    name: &'a str,
    permission: Option<FsAction>,
}

impl<'a> EntryMachine<'a> {
    pub(super) fn new(text: &'a str, field_count: usize) -> Result<Self, AclSpecError> {
        if field_count != ACCESS_FIELDS && field_count != DEFAULT_FIELDS {
            return Err(AclSpecError::InvalidAclSpec(text.to_owned()));
        }

        Ok(Self {
            text,
            field_count,
            state: State::ExpectScopeOrType,
            scope: AclEntryScope::Access,
            entry_type: None,
            name: "",
            permission: None,
        })
    }

    #[cfg(test)]
    pub(super) const fn state(&self) -> State {
        self.state
    }

    pub(super) fn feed(&mut self, field: &'a str) -> Result<(), AclSpecError> {
        self.state = match self.state {
            State::ExpectScopeOrType if self.field_count == DEFAULT_FIELDS => {
                if field != DEFAULT_SCOPE_TOKEN {
                    return Err(self.invalid_spec());
                }
                self.scope = AclEntryScope::Default;
                State::ExpectType
            }
            State::ExpectScopeOrType | State::ExpectType => {
                let entry_type = AclEntryType::from_name(field)
                    .ok_or_else(|| AclSpecError::InvalidAclType(self.text.to_owned()))?;
                self.entry_type = Some(entry_type);
                State::ExpectName
            }
            State::ExpectName => {
                self.name = field;
                State::ExpectPerm
            }
            State::ExpectPerm => {
                let permission = FsAction::from_symbol(field)
                    .ok_or_else(|| AclSpecError::InvalidPermission(self.text.to_owned()))?;
                self.permission = Some(permission);
                State::Done
            }
            State::Done => return Err(self.invalid_spec()),
        };
        Ok(())
    }

    pub(super) fn finish(self) -> Result<AclEntry, AclSpecError> {
        match (self.state, self.entry_type, self.permission) {
            (State::Done, Some(entry_type), Some(permission)) => Ok(AclEntry::builder(entry_type)
                .scope(self.scope)
                .name(self.name)
                .permission(permission)
                .build()),
            _ => Err(self.invalid_spec()),
        }
    }

    fn invalid_spec(&self) -> AclSpecError {
        AclSpecError::InvalidAclSpec(self.text.to_owned())
    }
}
