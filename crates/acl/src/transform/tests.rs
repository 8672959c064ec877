use super::*;
use crate::parse_acl_spec;

fn spec(text: &str) -> Vec<AclEntry> {
    parse_acl_spec(text).expect("valid spec")
}

fn render(entries: &[AclEntry]) -> Vec<String> {
    entries.iter().map(ToString::to_string).collect()
}

fn extended_acl() -> Vec<AclEntry> {
    spec(
        "user::rwx,user:bruce:rwx,group::r-x,group:sales:rwx,mask::rwx,other::r--,\
         default:user::rwx,default:group::r-x,default:other::r--",
    )
}

#[test]
fn filter_extended_keeps_only_base_entries() {
    let result = filter_extended_entries(&extended_acl());
    assert_eq!(render(&result), ["user::rwx", "group::r-x", "other::r--"]);
}

#[test]
fn filter_default_keeps_access_scope_untouched() {
    let result = filter_default_entries(&extended_acl());
    assert_eq!(
        render(&result),
        [
            "user::rwx",
            "user:bruce:rwx",
            "group::r-x",
            "group:sales:rwx",
            "mask::rwx",
            "other::r--",
        ]
    );
}

#[test]
fn merge_replaces_matching_entries_and_keeps_others() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let result = merge_entries(&existing, &spec("other::---,user:bruce:r--")).expect("merge");
    assert_eq!(
        render(&result),
        ["user::rwx", "user:bruce:r--", "group::r-x", "mask::r-x", "other::---"]
    );
}

#[test]
fn merge_without_named_entries_adds_no_mask() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let result = merge_entries(&existing, &spec("group::rwx")).expect("merge");
    assert_eq!(render(&result), ["user::rwx", "group::rwx", "other::r--"]);
}

#[test]
fn merge_keeps_explicit_mask() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let result = merge_entries(&existing, &spec("user:bruce:rwx,mask::r--")).expect("merge");
    assert!(render(&result).contains(&"mask::r--".to_owned()));
}

#[test]
fn merge_recalculates_existing_mask() {
    let result = merge_entries(&extended_acl(), &spec("group:sales:r--,user:bruce:--x"))
        .expect("merge");
    assert!(render(&result).contains(&"mask::r-x".to_owned()));
}

#[test]
fn merge_copies_default_base_entries_from_access_scope() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let result = merge_entries(&existing, &spec("default:user:bruce:rwx")).expect("merge");
    assert_eq!(
        render(&result),
        [
            "user::rwx",
            "group::r-x",
            "other::r--",
            "default:user::rwx",
            "default:user:bruce:rwx",
            "default:group::r-x",
            "default:mask::rwx",
            "default:other::r--",
        ]
    );
}

#[test]
fn merge_rejects_duplicate_spec_entries() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let error = merge_entries(&existing, &spec("user:bruce:rwx,user:bruce:r--")).expect_err("dup");
    assert!(matches!(error, AclError::DuplicateEntry(_)));
}

#[test]
fn merge_rejects_named_mask() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let error = merge_entries(&existing, &spec("mask:bruce:rwx")).expect_err("named mask");
    assert_eq!(
        error.to_string(),
        "Invalid ACL: this entry type must not have a name: mask:bruce:rwx"
    );
}

#[test]
fn remove_deletes_by_key_and_recalculates_mask() {
    let result = filter_entries_by_spec(&extended_acl(), &spec("group:sales:---")).expect("remove");
    let rendered = render(&result);
    assert!(!rendered.iter().any(|line| line.starts_with("group:sales")));
    assert!(rendered.contains(&"mask::rwx".to_owned()));
}

#[test]
fn remove_of_unknown_entry_keeps_narrowed_mask() {
    let existing = spec("user::rwx,user:bob:rwx,group::r-x,mask::r--,other::---");
    let result = filter_entries_by_spec(&existing, &spec("user:nobody:---")).expect("remove");
    assert_eq!(result, existing);
}

#[test]
fn merge_into_default_scope_keeps_narrowed_access_mask() {
    let existing = spec(
        "user::rwx,user:bob:rwx,group::r-x,mask::r--,other::---,\
         default:user::rwx,default:group::r-x,default:other::---",
    );
    let result = merge_entries(&existing, &spec("default:user:carol:r--")).expect("merge");
    assert_eq!(
        render(&result),
        [
            "user::rwx",
            "user:bob:rwx",
            "group::r-x",
            "mask::r--",
            "other::---",
            "default:user::rwx",
            "default:user:carol:r--",
            "default:group::r-x",
            "default:mask::r-x",
            "default:other::---",
        ]
    );
}

#[test]
fn merge_of_identical_entry_keeps_narrowed_mask() {
    let existing = spec("user::rwx,user:bob:rwx,group::r-x,mask::r--,other::---");
    let result = merge_entries(&existing, &spec("user:bob:rwx")).expect("merge");
    assert_eq!(result, existing);
}

#[test]
fn remove_of_base_entry_is_rejected() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let error = filter_entries_by_spec(&existing, &spec("other::---")).expect_err("base removal");
    assert_eq!(
        error,
        AclError::MissingBaseEntries {
            scope: AclEntryScope::Access
        }
    );
}

#[test]
fn remove_of_unknown_entry_is_a_no_op() {
    let existing = spec("user::rwx,group::r-x,other::r--");
    let result = filter_entries_by_spec(&existing, &spec("user:nobody:rwx")).expect("remove");
    assert_eq!(result, existing);
}

#[test]
fn replace_uses_only_spec_entries() {
    let result = replace_entries(&spec("other::r--,group::r-x,user::rw-")).expect("replace");
    assert_eq!(render(&result), ["user::rw-", "group::r-x", "other::r--"]);
}

#[test]
fn replace_requires_base_entries() {
    let error = replace_entries(&spec("user::rwx,group::r-x")).expect_err("missing other");
    assert!(matches!(error, AclError::MissingBaseEntries { .. }));
}

#[test]
fn replace_rejects_oversized_scope() {
    let mut text = String::from("user::rwx,group::r-x,other::r--");
    for index in 0..MAX_ENTRIES {
        text.push_str(&format!(",user:u{index}:r--"));
    }
    let error = replace_entries(&spec(&text)).expect_err("too many");
    assert!(matches!(
        error,
        AclError::TooManyEntries {
            scope: AclEntryScope::Access,
            ..
        }
    ));
}

#[test]
fn default_detection() {
    assert!(has_default_entries(&extended_acl()));
    assert!(!has_default_entries(&spec("user::rwx,group::r-x,other::r--")));
}
