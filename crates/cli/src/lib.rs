#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command layer of `oc-getfacl` and `oc-setfacl`. It turns a
//! command line into one validated invocation, runs it against an
//! [`AclFileSystem`] and reports the outcome as a process exit code.
//!
//! # Design
//!
//! - Flags are tokenized with [`clap`] and then validated once into an
//!   immutable [`GetfaclOptions`] or [`SetfaclOptions`]. Nothing touches the
//!   filesystem before validation succeeds.
//! - [`SetfaclOptions`] carries exactly one [`AclOperation`]; each operation
//!   maps to exactly one [`AclFileSystem`] call per path.
//! - With `-R` the target is expanded by [`walk::WalkBuilder`]; each visited
//!   path is handled independently.
//! - Diagnostics go to stderr through [`logging::MessageSink`], prefixed with
//!   the program name. Structured events are emitted with [`tracing`].
//!
//! # Invariants
//!
//! - [`run_getfacl`] and [`run_setfacl`] never panic; every failure becomes a
//!   non-zero exit code.
//! - Usage errors and malformed `<acl_spec>` operands exit with `1` before any
//!   filesystem call.
//! - A recursive run keeps going after a per-path failure and exits with `23`
//!   when any path failed.
//!
//! # Errors
//!
//! See [`CommandError`] and [`ExitCode`] for the mapping from failures to exit
//! codes.
//!
//! # Examples
//!
//! ```
//! use metadata::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::new();
//! fs.create_file("/notes", "alice", "staff", 0o640)?;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run_setfacl_with(
//!     &fs,
//!     ["oc-setfacl", "-m", "user:bob:r--", "/notes"],
//!     &mut stdout,
//!     &mut stderr,
//! );
//! assert_eq!(status, 0);
//!
//! let status = cli::run_getfacl_with(&fs, ["oc-getfacl", "/notes"], &mut stdout, &mut stderr);
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout)?.contains("user:bob:r--\n"));
//! assert!(stderr.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod arguments;
pub mod config;
mod error;
mod exit_code;
mod getfacl;
mod help;
mod options;
mod runner;
mod setfacl;


use std::ffi::OsString;
use std::io::{self, Write};

use logging::MessageSink;
use metadata::{AclFileSystem, LocalFileSystem};

use crate::arguments::{parse_getfacl_args, parse_setfacl_args};

pub use error::{ACL_SPEC_OPERAND, CommandError, PATH_OPERAND, UsageError};
pub use exit_code::ExitCode;
pub use getfacl::write_acl_status;
pub use help::{GETFACL_USAGE, SETFACL_USAGE, getfacl_help, setfacl_help};
pub use options::{AclOperation, GetfaclOptions, SetfaclOptions};

/// Program name used in `getfacl` diagnostics.
pub const GETFACL_PROGRAM: &str = "oc-getfacl";
/// Program name used in `setfacl` diagnostics.
pub const SETFACL_PROGRAM: &str = "oc-setfacl";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs `getfacl` against the host filesystem.
///
/// `arguments` includes the program name. Returns the process exit code.
pub fn run_getfacl<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    run_getfacl_with(&LocalFileSystem::new(), arguments, stdout, stderr)
}

/// Runs `getfacl` against the supplied filesystem.
pub fn run_getfacl_with<F, I, S, Out, Err>(
    fs: &F,
    arguments: I,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    F: AclFileSystem + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let mut sink = MessageSink::new(stderr, GETFACL_PROGRAM);
    let parsed = match parse_getfacl_args(GETFACL_PROGRAM, arguments) {
        Ok(parsed) => parsed,
        Err(error) => return usage_failure(&mut sink, GETFACL_USAGE, &UsageError::from(error)),
    };
    if parsed.show_help {
        return print_help(stdout, &mut sink, &getfacl_help(GETFACL_PROGRAM));
    }

    let options = match GetfaclOptions::from_parsed(parsed) {
        Ok(options) => options,
        Err(error) => return usage_failure(&mut sink, GETFACL_USAGE, &error),
    };

    let outcome = runner::for_each_path(
        fs,
        options.path(),
        options.recursive(),
        &mut sink,
        |path| getfacl::show(fs, path, &mut *stdout),
    );
    if stdout.flush().is_err() {
        return ExitCode::FileIo.as_i32();
    }
    finish(&mut sink, outcome)
}

/// Runs `setfacl` against the host filesystem.
///
/// `arguments` includes the program name. Returns the process exit code.
pub fn run_setfacl<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    run_setfacl_with(&LocalFileSystem::new(), arguments, stdout, stderr)
}

/// Runs `setfacl` against the supplied filesystem.
pub fn run_setfacl_with<F, I, S, Out, Err>(
    fs: &F,
    arguments: I,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    F: AclFileSystem + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let mut sink = MessageSink::new(stderr, SETFACL_PROGRAM);
    let parsed = match parse_setfacl_args(SETFACL_PROGRAM, arguments) {
        Ok(parsed) => parsed,
        Err(error) => return usage_failure(&mut sink, SETFACL_USAGE, &UsageError::from(error)),
    };
    if parsed.show_help {
        return print_help(stdout, &mut sink, &setfacl_help(SETFACL_PROGRAM));
    }

    let options = match SetfaclOptions::from_parsed(parsed) {
        Ok(options) => options,
        Err(error) => return usage_failure(&mut sink, SETFACL_USAGE, &error),
    };

    let operation = options.operation();
    let outcome = runner::for_each_path(
        fs,
        options.path(),
        options.recursive(),
        &mut sink,
        |path| setfacl::apply(fs, path, operation).map_err(CommandError::from),
    );
    finish(&mut sink, outcome)
}

/// Installs the tracing subscriber configured by the environment.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging() -> bool {
    logging::init_tracing(&config::log_config_from_env())
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

fn usage_failure<W: Write>(
    sink: &mut MessageSink<W>,
    usage: &str,
    error: &dyn std::fmt::Display,
) -> i32 {
    tracing::debug!(program = sink.program(), "rejected command line: {error}");
    if sink.write(error).is_ok() {
        let hint = format!("usage: {} {usage}", sink.program());
        let _ = sink.write(hint);
    }
    ExitCode::Syntax.as_i32()
}

fn print_help<Out: Write, W: Write>(
    stdout: &mut Out,
    sink: &mut MessageSink<W>,
    text: &str,
) -> i32 {
    match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        Ok(()) => ExitCode::Ok.as_i32(),
        Err(error) => {
            let _ = sink.write(CommandError::Output(error));
            ExitCode::FileIo.as_i32()
        }
    }
}

fn finish<W: Write>(sink: &mut MessageSink<W>, outcome: io::Result<ExitCode>) -> i32 {
    match outcome {
        Ok(ExitCode::PartialTransfer) => {
            let _ = sink.write(ExitCode::PartialTransfer);
            ExitCode::PartialTransfer.as_i32()
        }
        Ok(code) => code.as_i32(),
        Err(error) => {
            let _ = sink.write(CommandError::Output(error));
            ExitCode::FileIo.as_i32()
        }
    }
}
