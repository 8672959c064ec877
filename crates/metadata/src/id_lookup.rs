//! crates/metadata/src/id_lookup.rs
//!
//! Resolves numeric owner ids to the names shown by `getfacl`.

use uzers::{get_group_by_gid, get_user_by_uid};

/// Returns the user name for `uid`, or the id itself when it has none.
pub(crate) fn user_name(uid: u32) -> String {
    get_user_by_uid(uid)
        .map(|user| user.name().to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| uid.to_string())
}

/// Returns the group name for `gid`, or the id itself when it has none.
pub(crate) fn group_name(gid: u32) -> String {
    get_group_by_gid(gid)
        .map(|group| group.name().to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| gid.to_string())
}
