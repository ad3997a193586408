//! # initext
//!
//! An INI-style text configuration engine: a dialect-aware tokenizer and
//! writer, an order-preserving document model, and a `${...}` value
//! expansion engine layered on top.
//!
//! ## Key Features
//!
//! - **Five dialects**: Standard, Python, Samba, MySQL, and Windows
//!   flavors differ in comment characters, assignment operators, line
//!   continuation, and quoting — all captured as plain [`Dialect`] data
//! - **Order-preserving**: sections, keys, comments, and blank lines come
//!   back out in the order they went in
//! - **Positioned errors**: malformed input reports a 1-based line and
//!   column, never a silent recovery
//! - **Value expansion**: `${key}` and `${section|key}` placeholders
//!   resolve across an ordered config tree with cycle protection
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use initext::IniDocument;
//!
//! let text = "\
//! ; application settings
//! [server]
//! host = localhost
//! port = 8080 ; default
//! ";
//!
//! let doc = IniDocument::from_str(text).unwrap();
//! let server = doc.section("server").unwrap();
//! assert_eq!(server.get("host"), Some("localhost"));
//! assert_eq!(server.get("port"), Some("8080"));
//! ```
//!
//! ## Value Expansion
//!
//! ```rust
//! use initext::{ConfigSet, IniDocument};
//!
//! let doc = IniDocument::from_str(
//!     "[paths]\nroot = /srv/app\nlogs = ${root}/logs\n",
//! ).unwrap();
//!
//! let mut configs = ConfigSet::from_document(&doc);
//! assert_eq!(
//!     configs.get_expanded("paths", "logs").unwrap(),
//!     "/srv/app/logs",
//! );
//!
//! // Or resolve everything in place:
//! configs.expand_all().unwrap();
//! assert_eq!(configs.get("paths").unwrap().get("logs"), Some("/srv/app/logs"));
//! ```
//!
//! ## Working at the Token Level
//!
//! The document model covers most uses; the [`IniReader`] and
//! [`IniWriter`] underneath are public for callers that want to stream
//! items themselves:
//!
//! ```rust
//! use initext::{Dialect, IniReader, ItemKind};
//!
//! let mut reader = IniReader::with_dialect(
//!     "# comment\nkey: value\n",
//!     Dialect::python_style(),
//! );
//! while reader.read().unwrap() {
//!     if reader.kind() == ItemKind::Key {
//!         println!("{} is {}", reader.name(), reader.value());
//!     }
//! }
//! ```
//!
//! ## Concurrency
//!
//! The crate is single-threaded and synchronous. Nothing is locked
//! internally; embed a [`IniDocument`] or [`ConfigSet`] behind your own
//! synchronization if shared across threads.

pub mod config;
pub mod dialect;
pub mod document;
pub mod error;
pub mod reader;
pub mod section;
pub mod writer;

pub use config::{Config, ConfigEvent, ConfigSet};
pub use dialect::Dialect;
pub use document::IniDocument;
pub use error::{Error, Result};
pub use reader::{IniReader, ItemKind, ReadState};
pub use section::{IniItem, IniSection};
pub use writer::{IniWriter, WriteState};
