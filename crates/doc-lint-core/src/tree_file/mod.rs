//! Serialized declaration trees.
//!
//! The front end that parses source files is an external collaborator. It
//! hands declarations over as JSON tree files:
//!
//! ```json
//! {
//!   "source": "Sources/Lib/API.swift",
//!   "declarations": [
//!     { "kind": "class", "name": "C", "access": "public", "line": 3, "column": 14,
//!       "members": [
//!         { "kind": "function", "name": "foo", "access": "public", "doc_comment": "Does foo." }
//!       ] },
//!     { "kind": "extension", "extended_type": "C",
//!       "members": [ { "kind": "deinitializer" } ] }
//!   ]
//! }
//! ```
//!
//! Loading is fail-closed: unknown kinds become [`DeclKind::Other`] and
//! unknown access modifiers resolve to `private`, so a malformed node is
//! never diagnosed instead of aborting the whole file.
//!
//! [`DeclKind::Other`]: crate::DeclKind::Other

pub mod dto;
pub mod loader;

pub use dto::{DeclDto, TreeFileDto};
pub use loader::{load, load_file, parse, LoadError};
