#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` is the filesystem side of the ACL tools. It defines the
//! [`AclFileSystem`] contract the command layer talks to and ships two
//! implementations of it:
//!
//! - [`MemoryFileSystem`], a hierarchical in-memory namespace used by tests
//!   and by embedders that keep ACLs outside the host filesystem.
//! - [`LocalFileSystem`], the host filesystem.
//!
//! # Design
//!
//! Both backends read the current entries of a path, run the matching
//! function from [`acl::transform`] and store the result, so every backend
//! shares one set of ACL rules. The local backend picks its ACL store at
//! compile time:
//!
//! - with the `posix-acl` feature on Linux and FreeBSD, extended entries go through
//!   `exacl`;
//! - on other Unix targets (or without the feature) only ACLs that collapse
//!   to permission bits are accepted and applied with `chmod`;
//! - elsewhere every ACL call reports [`MetadataError::Unsupported`].
//!
//! # Invariants
//!
//! - A stored ACL always contains the unnamed access `user`, `group` and
//!   `other` entries.
//! - Default entries are only ever stored on directories.
//! - [`AclFileSystem::list_status`] returns children sorted by path.
//!
//! # Errors
//!
//! Every failure is a [`MetadataError`] naming the offending path.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//!
//! use acl::parse_acl_spec;
//! use metadata::{AclFileSystem, MemoryFileSystem};
//!
//! let fs = MemoryFileSystem::new();
//! fs.create_file("/notes", "alice", "staff", 0o640)?;
//! fs.modify_acl_entries(Path::new("/notes"), &parse_acl_spec("user:bob:r--").unwrap())?;
//!
//! let status = fs.get_acl_status(Path::new("/notes"))?;
//! assert_eq!(status.owner(), "alice");
//! assert_eq!(status.entries().len(), 5);
//! # Ok::<(), metadata::MetadataError>(())
//! ```

mod error;
mod filesystem;
mod local;
mod memory;

#[cfg(unix)]
mod id_lookup;

#[cfg(all(
    unix,
    feature = "posix-acl",
    any(target_os = "linux", target_os = "freebsd")
))]
#[path = "acl_exacl.rs"]
mod posix_acl;

#[cfg(all(
    unix,
    not(all(feature = "posix-acl", any(target_os = "linux", target_os = "freebsd")))
))]
#[path = "acl_mode.rs"]
mod posix_acl;

#[cfg(not(unix))]
#[path = "acl_noop.rs"]
mod posix_acl;

pub use error::{MetadataError, MetadataResult};
pub use filesystem::{AclFileSystem, FileStatus};
pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
