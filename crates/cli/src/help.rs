//! Usage and help text.

/// Operand summary of `getfacl`.
pub const GETFACL_USAGE: &str = "[-R] <path>";

/// Operand summary of `setfacl`.
pub const SETFACL_USAGE: &str =
    "[-R] [{-b|-k} {-m|-x <acl_spec>} <path>]|[--set <acl_spec> <path>]";

const GETFACL_DESCRIPTION: &str = "\
Displays the Access Control Lists (ACLs) of files and directories. If a \
directory has a default ACL, then getfacl also displays the default ACL.
-R: List the ACLs of all files and directories recursively.
<path>: File or directory to list.
";

const SETFACL_DESCRIPTION: &str = "\
Sets Access Control Lists (ACLs) of files and directories.
Options:
-b :Remove all but the base ACL entries. The entries for user, group and \
others are retained for compatibility with permission bits.
-k :Remove the default ACL.
-R :Apply operations to all files and directories recursively.
-m :Modify ACL. New entries are added to the ACL, and existing entries are \
retained.
-x :Remove specified ACL entries. Other ACL entries are retained.
--set :Fully replace the ACL, discarding all existing entries. The \
<acl_spec> must include entries for user, group, and others for \
compatibility with permission bits.
<acl_spec>: Comma separated list of ACL entries.
<path>: File or directory to modify.
";

fn render(program: &str, usage: &str, description: &str) -> String {
    format!("Usage: {program} {usage}\n\n{description}")
}

/// Help text printed by `getfacl --help`.
#[must_use]
pub fn getfacl_help(program: &str) -> String {
    render(program, GETFACL_USAGE, GETFACL_DESCRIPTION)
}

/// Help text printed by `setfacl --help`.
#[must_use]
pub fn setfacl_help(program: &str) -> String {
    render(program, SETFACL_USAGE, SETFACL_DESCRIPTION)
}
