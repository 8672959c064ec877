//! Validated, immutable invocations.
//!
//! Flag combinations are checked here once, before anything touches the
//! filesystem. The result carries exactly one [`AclOperation`], so dispatch is
//! a plain exhaustive `match`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use acl::{AclEntry, parse_acl_spec};

use crate::arguments::ParsedArgs;
use crate::error::{ACL_SPEC_OPERAND, CommandError, PATH_OPERAND, UsageError};

/// The single mutation a `setfacl` invocation performs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AclOperation {
    /// `-b`: keep only the base entries.
    RemoveAll,
    /// `-k`: drop the default ACL.
    RemoveDefault,
    /// `-m`: merge entries into the ACL.
    Modify(Vec<AclEntry>),
    /// `-x`: remove the named entries.
    RemoveEntries(Vec<AclEntry>),
    /// `--set`: replace the whole ACL.
    Replace(Vec<AclEntry>),
}

impl AclOperation {
    /// Name of the filesystem call this operation maps to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RemoveAll => "remove_acl",
            Self::RemoveDefault => "remove_default_acl",
            Self::Modify(_) => "modify_acl_entries",
            Self::RemoveEntries(_) => "remove_acl_entries",
            Self::Replace(_) => "set_acl",
        }
    }

    /// Entries parsed from `<acl_spec>`; empty for `-b` and `-k`.
    #[must_use]
    pub fn entries(&self) -> &[AclEntry] {
        match self {
            Self::RemoveAll | Self::RemoveDefault => &[],
            Self::Modify(entries) | Self::RemoveEntries(entries) | Self::Replace(entries) => {
                entries
            }
        }
    }
}

/// A validated `getfacl` invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GetfaclOptions {
    recursive: bool,
    path: PathBuf,
}

impl GetfaclOptions {
    pub(crate) fn from_parsed(parsed: ParsedArgs) -> Result<Self, CommandError> {
        let path = single_path(parsed.operands)?;
        Ok(Self {
            recursive: parsed.recursive,
            path,
        })
    }

    /// Whether descendants are listed too.
    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A validated `setfacl` invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetfaclOptions {
    recursive: bool,
    operation: AclOperation,
    path: PathBuf,
}

impl SetfaclOptions {
    pub(crate) fn from_parsed(parsed: ParsedArgs) -> Result<Self, CommandError> {
        let ParsedArgs {
            recursive,
            remove_all,
            remove_default,
            modify,
            remove_entries,
            set,
            operands,
            ..
        } = parsed;

        let both_remove = remove_all && remove_default;
        let both_modify = modify && remove_entries;
        let one_remove = remove_all || remove_default;
        let one_modify = modify || remove_entries;
        let conflicting = both_remove
            || both_modify
            || (one_remove && one_modify)
            || (set && (one_remove || one_modify));
        if conflicting {
            return Err(UsageError::ConflictingFlags.into());
        }

        let mut operands = operands.into_iter();
        let entries = if one_modify || set {
            if operands.len() < 2 {
                return Err(UsageError::MissingArgument(ACL_SPEC_OPERAND).into());
            }
            let spec = operands.next().unwrap_or_default();
            let text = spec
                .to_str()
                .ok_or(UsageError::InvalidUtf8(ACL_SPEC_OPERAND))?;
            parse_acl_spec(text)?
        } else {
            Vec::new()
        };

        let path = single_path(operands.collect())?;

        let operation = if remove_all {
            AclOperation::RemoveAll
        } else if remove_default {
            AclOperation::RemoveDefault
        } else if modify {
            AclOperation::Modify(entries)
        } else if remove_entries {
            AclOperation::RemoveEntries(entries)
        } else if set {
            AclOperation::Replace(entries)
        } else {
            return Err(UsageError::MissingOperation.into());
        };

        Ok(Self {
            recursive,
            operation,
            path,
        })
    }

    /// Whether descendants are changed too.
    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    /// The mutation to perform.
    #[must_use]
    pub const fn operation(&self) -> &AclOperation {
        &self.operation
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn single_path(operands: Vec<OsString>) -> Result<PathBuf, UsageError> {
    let mut operands = operands.into_iter();
    match (operands.next(), operands.next()) {
        (None, _) => Err(UsageError::MissingArgument(PATH_OPERAND)),
        (Some(path), None) => Ok(PathBuf::from(path)),
        (Some(_), Some(_)) => Err(UsageError::TooManyArguments),
    }
}

#[cfg(test)]
mod tests;
