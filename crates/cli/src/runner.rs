//! Applies a per-path action to a target, or to the tree below it.

use std::io::{self, Write};
use std::path::Path;

use logging::MessageSink;
use metadata::AclFileSystem;
use tracing::warn;
use walk::WalkBuilder;

use crate::error::CommandError;
use crate::exit_code::ExitCode;

/// Runs `action` on `root` and, when `recursive`, on every descendant.
///
/// Per-path failures are written to `stderr` and do not stop the walk. A
/// failure writing the report itself aborts the run.
pub(crate) fn for_each_path<F, W, A>(
    fs: &F,
    root: &Path,
    recursive: bool,
    stderr: &mut MessageSink<W>,
    mut action: A,
) -> io::Result<ExitCode>
where
    F: AclFileSystem + ?Sized,
    W: Write,
    A: FnMut(&Path) -> Result<(), CommandError>,
{
    if !recursive {
        return match action(root) {
            Ok(()) => Ok(ExitCode::Ok),
            Err(error) => fail(stderr, root, error),
        };
    }

    let walker = match WalkBuilder::new(fs, root).build() {
        Ok(walker) => walker,
        Err(error) => {
            return fail(stderr, root, CommandError::from(error));
        }
    };

    let mut visited = 0_usize;
    let mut failures = Vec::new();
    for item in walker {
        let result = match item {
            Ok(entry) => {
                visited += 1;
                action(entry.path()).map_err(|error| (entry.path().to_path_buf(), error))
            }
            Err(error) => Err((error.path().to_path_buf(), CommandError::from(error))),
        };

        if let Err((path, error)) = result {
            failures.push(fail(stderr, &path, error)?);
        }
    }

    Ok(match failures.as_slice() {
        [] => ExitCode::Ok,
        [only] if visited == 1 => *only,
        _ => ExitCode::PartialTransfer,
    })
}

/// Reports one failed path and returns its exit code.
///
/// Output errors are fatal and returned instead.
fn fail<W: Write>(
    stderr: &mut MessageSink<W>,
    path: &Path,
    error: CommandError,
) -> io::Result<ExitCode> {
    if let CommandError::Output(source) = error {
        return Err(source);
    }
    let code = error.exit_code();
    warn!(path = %path.display(), code = code.as_i32(), "{error}");
    stderr.write(&error)?;
    Ok(code)
}
