#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` expands a path into the path itself plus every descendant, the way
//! `getfacl -R` and `setfacl -R` visit a tree. Traversal goes through the
//! [`metadata::AclFileSystem`] contract, so the same walker serves the
//! in-memory namespace and the host filesystem.
//!
//! # Design
//!
//! - [`WalkBuilder`] captures the filesystem and the root.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values in
//!   depth-first pre-order. Children are taken from
//!   [`metadata::AclFileSystem::list_status`], which returns them sorted, so
//!   the sequence is deterministic.
//! - [`WalkError`] wraps the [`metadata::MetadataError`] that stopped one
//!   directory from being listed.
//!
//! # Invariants
//!
//! - The root is yielded first, before any of its descendants.
//! - A directory whose listing fails yields one error right after its own
//!   entry and traversal continues with its siblings.
//! - Only directories reported by `file_status`/`list_status` are descended
//!   into; the host backend reports symbolic links as non-directories.
//!
//! # Errors
//!
//! [`WalkBuilder::build`] fails when the root cannot be inspected. Iteration
//! yields [`WalkError`] values for directories that cannot be listed.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//!
//! use metadata::MemoryFileSystem;
//! use walk::WalkBuilder;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = MemoryFileSystem::new();
//! fs.create_directory("/src", "root", "root", 0o755)?;
//! fs.create_file("/src/main.rs", "root", "root", 0o644)?;
//! fs.create_directory("/src/nested", "root", "root", 0o755)?;
//!
//! let mut seen = Vec::new();
//! for entry in WalkBuilder::new(&fs, "/src").build()? {
//!     seen.push(entry?.path().to_path_buf());
//! }
//!
//! assert_eq!(
//!     seen,
//!     [Path::new("/src"), Path::new("/src/main.rs"), Path::new("/src/nested")]
//! );
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;


pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
