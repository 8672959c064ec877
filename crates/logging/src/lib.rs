#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the two output channels of the ACL tools besides their
//! regular stdout report:
//!
//! - [`MessageSink`] writes user-facing diagnostics such as
//!   `oc-setfacl: Too many arguments`, prefixed with the program name.
//! - [`init_tracing`] installs the `tracing` subscriber that receives the
//!   developer diagnostics emitted by the other crates.
//!
//! # Design
//!
//! [`LogConfig`] holds `EnvFilter` directives and a [`LogFormat`]. It is
//! plain data; reading it from the environment is left to the front-end.
//! Initialisation uses `try_init`, so a second call, or a call after a test
//! harness installed its own subscriber, leaves the existing one in place.
//!
//! # Examples
//!
//! ```
//! use logging::{LineMode, MessageSink};
//!
//! let mut sink = MessageSink::new(Vec::new(), "oc-getfacl");
//! sink.write("<path> is missing")?;
//! sink.write_with_mode("partial", LineMode::WithoutNewline)?;
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "oc-getfacl: <path> is missing\noc-getfacl: partial");
//! # Ok::<(), std::io::Error>(())
//! ```

mod config;
mod line_mode;
mod message_sink;
mod subscriber;

pub use config::{LogConfig, LogFormat, ParseLogFormatError};
pub use line_mode::LineMode;
pub use message_sink::MessageSink;
pub use subscriber::init_tracing;
