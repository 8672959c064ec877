//! ACL listing for `getfacl`.

use std::io::{self, Write};
use std::path::Path;

use acl::AclStatus;
use metadata::AclFileSystem;
use tracing::debug;

use crate::error::CommandError;

/// Writes the listing of one path in `getfacl` layout.
///
/// The header names the file, owner and group. A `# flags:` line follows only
/// when the sticky bit is set: `--t` when the access `other` entry grants
/// execute, `--T` otherwise. Entries are written in stored order.
///
/// ```
/// use std::path::Path;
///
/// use acl::{AclStatus, parse_acl_spec};
///
/// let status = AclStatus::builder()
///     .owner("alice")
///     .group("staff")
///     .sticky_bit(true)
///     .add_entries(parse_acl_spec("user::rwx,group::r-x,other::r-x")?)
///     .build();
///
/// let mut out = Vec::new();
/// cli::write_acl_status(&mut out, Path::new("/tmp"), &status)?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "# file: /tmp\n# owner: alice\n# group: staff\n# flags: --t\n\
///      user::rwx\ngroup::r-x\nother::r-x\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_acl_status<W: Write + ?Sized>(
    out: &mut W,
    path: &Path,
    status: &AclStatus,
) -> io::Result<()> {
    writeln!(out, "# file: {}", path.display())?;
    writeln!(out, "# owner: {}", status.owner())?;
    writeln!(out, "# group: {}", status.group())?;
    if status.is_sticky_bit() {
        let flag = if status.other_can_execute() { 't' } else { 'T' };
        writeln!(out, "# flags: --{flag}")?;
    }
    for entry in status.entries() {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

/// Queries one path and writes its listing.
pub(crate) fn show<F, W>(fs: &F, path: &Path, out: &mut W) -> Result<(), CommandError>
where
    F: AclFileSystem + ?Sized,
    W: Write + ?Sized,
{
    debug!(target: "facl::getfacl", path = %path.display(), "reading ACL");
    let status = fs.get_acl_status(path)?;
    write_acl_status(out, path, &status)?;
    Ok(())
}
