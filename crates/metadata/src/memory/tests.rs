use std::path::Path;
use std::sync::Arc;
use std::thread;

use acl::parse_acl_spec;

use super::*;

fn render(fs: &MemoryFileSystem, path: &str) -> Vec<String> {
    fs.get_acl_status(Path::new(path))
        .expect("status")
        .entries()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn spec(text: &str) -> Vec<AclEntry> {
    parse_acl_spec(text).expect("valid spec")
}

fn fixture() -> MemoryFileSystem {
    let fs = MemoryFileSystem::new();
    fs.create_directory("/data", "alice", "staff", 0o1777)
        .expect("dir");
    fs.create_file("/data/report", "alice", "staff", 0o640)
        .expect("file");
    fs
}

#[test]
fn mode_bits_seed_minimal_acl_and_sticky_bit() {
    let fs = fixture();
    let status = fs.get_acl_status(Path::new("/data")).expect("status");
    assert_eq!(status.owner(), "alice");
    assert_eq!(status.group(), "staff");
    assert!(status.is_sticky_bit());
    assert_eq!(render(&fs, "/data/report"), ["user::rw-", "group::r--", "other::---"]);
}

#[test]
fn create_requires_existing_directory_parent() {
    let fs = fixture();
    let missing = fs
        .create_file("/nowhere/file", "alice", "staff", 0o644)
        .expect_err("missing parent");
    assert!(missing.is_not_found());

    let under_file = fs
        .create_file("/data/report/inner", "alice", "staff", 0o644)
        .expect_err("file parent");
    assert!(matches!(under_file, MetadataError::NotADirectory { .. }));

    let duplicate = fs
        .create_file("/data/report", "alice", "staff", 0o644)
        .expect_err("duplicate");
    assert!(matches!(duplicate, MetadataError::Io { .. }));
}

#[test]
fn modify_then_remove_all_restores_base_entries() {
    let fs = fixture();
    let path = Path::new("/data/report");
    fs.modify_acl_entries(path, &spec("user:bob:rwx")).expect("modify");
    assert_eq!(
        render(&fs, "/data/report"),
        ["user::rw-", "user:bob:rwx", "group::r--", "mask::rwx", "other::---"]
    );

    fs.remove_acl(path).expect("remove");
    assert_eq!(render(&fs, "/data/report"), ["user::rw-", "group::r--", "other::---"]);
}

#[test]
fn default_acl_is_only_accepted_on_directories() {
    let fs = fixture();
    let error = fs
        .modify_acl_entries(Path::new("/data/report"), &spec("default:user:bob:r--"))
        .expect_err("file");
    assert!(matches!(
        error,
        MetadataError::InvalidAcl {
            source: AclError::DefaultAclOnFile,
            ..
        }
    ));
    assert_eq!(render(&fs, "/data/report"), ["user::rw-", "group::r--", "other::---"]);

    fs.modify_acl_entries(Path::new("/data"), &spec("default:user:bob:r--"))
        .expect("directory");
    fs.remove_default_acl(Path::new("/data")).expect("remove default");
    assert_eq!(render(&fs, "/data"), ["user::rwx", "group::rwx", "other::rwx"]);
}

#[test]
fn failed_change_leaves_acl_untouched() {
    let fs = fixture();
    let path = Path::new("/data/report");
    fs.modify_acl_entries(path, &spec("group:ops:r--")).expect("modify");
    let before = render(&fs, "/data/report");

    let error = fs
        .remove_acl_entries(path, &spec("other::---"))
        .expect_err("base entry");
    assert!(matches!(error, MetadataError::InvalidAcl { .. }));
    assert_eq!(render(&fs, "/data/report"), before);
}

#[test]
fn set_acl_replaces_everything() {
    let fs = fixture();
    fs.set_acl(
        Path::new("/data"),
        &spec("user::rwx,group::r-x,other::---,default:user:bob:rwx"),
    )
    .expect("set");
    assert_eq!(
        render(&fs, "/data"),
        [
            "user::rwx",
            "group::r-x",
            "other::---",
            "default:user::rwx",
            "default:user:bob:rwx",
            "default:group::r-x",
            "default:mask::rwx",
            "default:other::---",
        ]
    );
}

#[test]
fn children_inherit_default_acl() {
    let fs = fixture();
    fs.set_acl(
        Path::new("/data"),
        &spec("user::rwx,group::r-x,other::---,default:user:bob:rwx"),
    )
    .expect("set");

    fs.create_file("/data/new", "alice", "staff", 0o600).expect("file");
    fs.create_directory("/data/sub", "alice", "staff", 0o700)
        .expect("dir");

    assert_eq!(
        render(&fs, "/data/new"),
        ["user::rwx", "user:bob:rwx", "group::r-x", "mask::rwx", "other::---"]
    );
    let sub = fs.get_acl_status(Path::new("/data/sub")).expect("status");
    assert_eq!(sub.entries().len(), 10);
}

#[test]
fn caller_must_own_the_path() {
    let fs = fixture().with_caller("mallory");
    let error = fs
        .remove_acl(Path::new("/data/report"))
        .expect_err("not owner");
    assert!(matches!(error, MetadataError::PermissionDenied { .. }));

    let owner = fixture().with_caller("alice");
    owner.remove_acl(Path::new("/data/report")).expect("owner");

    let admin = fixture().with_caller("root");
    admin.remove_acl(Path::new("/data/report")).expect("root");
}

#[test]
fn listing_is_sorted_and_limited_to_children() {
    let fs = fixture();
    fs.create_directory("/data/b", "alice", "staff", 0o755).expect("b");
    fs.create_file("/data/b/deep", "alice", "staff", 0o644).expect("deep");
    fs.create_file("/data/a", "alice", "staff", 0o644).expect("a");

    let listing = fs.list_status(Path::new("/data/")).expect("list");
    let names: Vec<&Path> = listing.iter().map(FileStatus::path).collect();
    assert_eq!(
        names,
        [Path::new("/data/a"), Path::new("/data/b"), Path::new("/data/report")]
    );
    assert!(listing[1].is_directory());

    let error = fs
        .list_status(Path::new("/data/report"))
        .expect_err("not a directory");
    assert!(matches!(error, MetadataError::NotADirectory { .. }));
}

#[test]
fn missing_path_is_reported_by_every_operation() {
    let fs = fixture();
    let path = Path::new("/data/ghost");
    assert!(fs.file_status(path).expect_err("status").is_not_found());
    assert!(fs.get_acl_status(path).expect_err("acl").is_not_found());
    assert!(fs.remove_acl(path).expect_err("remove").is_not_found());
    assert!(fs.set_acl(path, &spec("user::rwx,group::---,other::---"))
        .expect_err("set")
        .is_not_found());
}

#[test]
fn concurrent_modifications_are_all_applied() {
    let fs = Arc::new(fixture());
    let handles: Vec<_> = ["u0", "u1", "u2", "u3", "u4", "u5", "u6", "u7"]
        .into_iter()
        .map(|user| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                let entries = spec(&format!("user:{user}:r--"));
                fs.modify_acl_entries(Path::new("/data/report"), &entries)
                    .expect("modify");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread");
    }

    let status = fs.get_acl_status(Path::new("/data/report")).expect("status");
    assert_eq!(status.entries().len(), 3 + 8 + 1);
}
