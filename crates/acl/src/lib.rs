#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `acl` holds the POSIX ACL value model shared by the `oc-getfacl` and
//! `oc-setfacl` front-ends and by the filesystem backends. It has no I/O of
//! its own.
//!
//! # Design
//!
//! - [`FsAction`] is the `rwx` permission triple.
//! - [`AclEntry`] is an immutable (scope, type, name, permission) value built
//!   through [`AclEntryBuilder`]; its `Display` output is the canonical
//!   `[default:]type:name:perm` text and `FromStr` reads it back.
//! - [`parse_acl_spec`] turns a comma separated specification into entries
//!   using a small per-entry state machine.
//! - [`AclStatus`] is the read-only snapshot a filesystem reports.
//! - [`transform`] implements the five ACL mutations as pure functions so
//!   every backend shares the same semantics.
//!
//! # Invariants
//!
//! - Rendering an entry and parsing the text yields an equal entry.
//! - [`parse_acl_spec`] preserves input order and never de-duplicates.
//! - Transformation results are sorted canonically and contain the unnamed
//!   access `user`, `group` and `other` entries.
//!
//! # Errors
//!
//! Parsing fails with [`AclSpecError`], which always carries the offending
//! entry text. Transformations fail with [`AclError`].
//!
//! # Examples
//!
//! ```
//! use acl::{parse_acl_spec, transform};
//!
//! let existing = parse_acl_spec("user::rwx,group::r-x,other::r--")?;
//! let change = parse_acl_spec("user:bruce:rw-")?;
//! let merged = transform::merge_entries(&existing, &change).unwrap();
//!
//! let text: Vec<String> = merged.iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     text,
//!     ["user::rwx", "user:bruce:rw-", "group::r-x", "mask::rwx", "other::r--"]
//! );
//! # Ok::<(), acl::AclSpecError>(())
//! ```

mod action;
mod entry;
pub mod mode;
mod spec;
mod status;
pub mod transform;

pub use action::FsAction;
pub use entry::{
    AclEntry, AclEntryBuilder, AclEntryScope, AclEntryType, DEFAULT_SCOPE_TOKEN, EntryKey,
};
pub use spec::{AclSpecError, parse_acl_spec};
pub use status::{AclStatus, AclStatusBuilder};
pub use transform::AclError;
