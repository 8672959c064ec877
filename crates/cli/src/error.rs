//! crates/cli/src/error.rs
//!
//! Failures of one getfacl/setfacl invocation.

use std::io;

use acl::AclSpecError;
use metadata::MetadataError;
use thiserror::Error;
use walk::WalkError;

use crate::exit_code::ExitCode;

/// Operand placeholder used in "is missing" messages.
pub const PATH_OPERAND: &str = "<path>";
/// Operand placeholder used in "is missing" messages.
pub const ACL_SPEC_OPERAND: &str = "<acl_spec>";

/// Invalid flags or operands, detected before any filesystem access.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A required operand was not given.
    #[error("{0} is missing")]
    MissingArgument(&'static str),
    /// More than one path operand was given.
    #[error("Too many arguments")]
    TooManyArguments,
    /// Mutually exclusive operation flags were combined.
    #[error("Specified flags contains both remove and modify flags")]
    ConflictingFlags,
    /// `setfacl` was invoked without an operation flag.
    #[error("one of -b, -k, -m, -x or --set is required")]
    MissingOperation,
    /// An operand is not valid UTF-8.
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(&'static str),
    /// The command line could not be tokenized.
    #[error("{}", first_line(.0))]
    Parse(#[from] clap::Error),
}

fn first_line(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_owned()
}

/// Any failure of a getfacl/setfacl invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid flags or operands.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// The `<acl_spec>` operand could not be parsed.
    #[error(transparent)]
    Spec(#[from] AclSpecError),
    /// The filesystem rejected the query or change for one path.
    #[error(transparent)]
    FileSystem(#[from] MetadataError),
    /// A directory could not be traversed.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The report could not be written to stdout.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    /// Exit code reported when this error ends the invocation.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) | Self::Spec(_) => ExitCode::Syntax,
            Self::FileSystem(error) => ExitCode::for_metadata_error(error),
            Self::Walk(error) => ExitCode::for_metadata_error(error.metadata_error()),
            Self::Output(_) => ExitCode::FileIo,
        }
    }
}
