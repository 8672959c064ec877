use acl::AclEntryScope;

use super::*;
use crate::arguments::{parse_getfacl_args, parse_setfacl_args};
use crate::exit_code::ExitCode;

fn setfacl(args: &[&str]) -> Result<SetfaclOptions, CommandError> {
    let mut argv = vec!["oc-setfacl"];
    argv.extend_from_slice(args);
    let parsed = parse_setfacl_args("oc-setfacl", argv).expect("tokenize");
    SetfaclOptions::from_parsed(parsed)
}

fn usage_message(result: Result<SetfaclOptions, CommandError>) -> String {
    let error = result.expect_err("usage error");
    assert_eq!(error.exit_code(), ExitCode::Syntax, "{error:?}");
    error.to_string()
}

#[test]
fn getfacl_requires_exactly_one_path() {
    let none = parse_getfacl_args("oc-getfacl", ["oc-getfacl"]).expect("tokenize");
    assert_eq!(
        GetfaclOptions::from_parsed(none)
            .expect_err("missing")
            .to_string(),
        "<path> is missing"
    );

    let two = parse_getfacl_args("oc-getfacl", ["oc-getfacl", "/a", "/b"]).expect("tokenize");
    assert_eq!(
        GetfaclOptions::from_parsed(two)
            .expect_err("too many")
            .to_string(),
        "Too many arguments"
    );

    let one = parse_getfacl_args("oc-getfacl", ["oc-getfacl", "-R", "/a"]).expect("tokenize");
    let options = GetfaclOptions::from_parsed(one).expect("valid");
    assert!(options.recursive());
    assert_eq!(options.path(), Path::new("/a"));
}

#[test]
fn each_flag_selects_one_operation() {
    let remove_all = setfacl(&["-b", "/p"]).expect("valid");
    assert_eq!(remove_all.operation(), &AclOperation::RemoveAll);
    assert!(remove_all.operation().entries().is_empty());

    let remove_default = setfacl(&["-R", "-k", "/p"]).expect("valid");
    assert_eq!(remove_default.operation(), &AclOperation::RemoveDefault);
    assert!(remove_default.recursive());

    let modify = setfacl(&["-m", "user:bob:r-x", "/p"]).expect("valid");
    assert_eq!(modify.operation().name(), "modify_acl_entries");
    assert_eq!(modify.operation().entries()[0].to_string(), "user:bob:r-x");
    assert_eq!(modify.path(), Path::new("/p"));

    let remove = setfacl(&["-x", "default:user:bob:---", "/p"]).expect("valid");
    assert_eq!(remove.operation().name(), "remove_acl_entries");
    assert_eq!(
        remove.operation().entries()[0].scope(),
        AclEntryScope::Default
    );

    let replace = setfacl(&["--set", "user::rwx,group::r-x,other::---", "/p"]).expect("valid");
    assert_eq!(replace.operation().name(), "set_acl");
    assert_eq!(replace.operation().entries().len(), 3);
}

#[test]
fn conflicting_flags_are_rejected_before_operands() {
    for flags in [
        &["-b", "-k"][..],
        &["-m", "-x"],
        &["-b", "-m"],
        &["-k", "-x"],
        &["--set", "-b"],
        &["--set", "-m"],
    ] {
        let mut args = flags.to_vec();
        args.push("/p");
        assert_eq!(
            usage_message(setfacl(&args)),
            "Specified flags contains both remove and modify flags",
            "{flags:?}"
        );
    }
}

#[test]
fn spec_operand_is_required_for_entry_operations() {
    assert_eq!(usage_message(setfacl(&["-m", "/p"])), "<acl_spec> is missing");
    assert_eq!(usage_message(setfacl(&["--set"])), "<acl_spec> is missing");
}

#[cfg(unix)]
#[test]
fn non_utf8_spec_is_rejected_instead_of_replaced() {
    use std::os::unix::ffi::OsStringExt;

    let argv = vec![
        OsString::from("oc-setfacl"),
        OsString::from("-m"),
        OsString::from_vec(b"user:b\xffb:rwx".to_vec()),
        OsString::from("/project"),
    ];
    let parsed = parse_setfacl_args("oc-setfacl", argv).expect("tokenize");
    let message = usage_message(SetfaclOptions::from_parsed(parsed));
    assert_eq!(message, "<acl_spec> is not valid UTF-8");
}

#[test]
fn spec_is_parsed_before_path_count_is_checked() {
    let message = usage_message(setfacl(&["-m", "user:bob:rwz", "/a", "/b"]));
    assert_eq!(message, "Invalid permission in <aclSpec> : user:bob:rwz");

    let message = usage_message(setfacl(&["-m", "user:bob:rwx", "/a", "/b"]));
    assert_eq!(message, "Too many arguments");
}

#[test]
fn path_operand_count_is_checked() {
    assert_eq!(usage_message(setfacl(&["-b"])), "<path> is missing");
    assert_eq!(usage_message(setfacl(&["-k", "/a", "/b"])), "Too many arguments");
}

#[test]
fn missing_operation_is_a_usage_error() {
    let message = usage_message(setfacl(&["/p"]));
    assert_eq!(message, "one of -b, -k, -m, -x or --set is required");
}
