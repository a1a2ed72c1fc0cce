//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to the arena model via the loader.

use crate::decl::DeclKind;
use serde::Deserialize;
use std::path::PathBuf;

/// Raw JSON representation of one compilation unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeFileDto {
    /// Source file the declarations were parsed from.
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// File-scope declarations in source order.
    #[serde(default)]
    pub declarations: Vec<DeclDto>,
}

/// Raw JSON representation of a declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclDto {
    /// Declaration kind (e.g., "class", "enum_case"). Missing is malformed.
    #[serde(default)]
    pub kind: Option<DeclKind>,
    /// Simple name.
    #[serde(default)]
    pub name: String,
    /// Access modifier as written (e.g., "public").
    #[serde(default)]
    pub access: Option<String>,
    /// Attributes as written (e.g., "@_spi(Experimental)").
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Whether the front end found an attached doc comment.
    #[serde(default)]
    pub has_doc_comment: bool,
    /// Doc comment text; takes precedence over `has_doc_comment` when present.
    #[serde(default)]
    pub doc_comment: Option<String>,
    /// Line number (1-indexed).
    #[serde(default)]
    pub line: usize,
    /// Column number (1-indexed).
    #[serde(default)]
    pub column: usize,
    /// Byte offset of the name token.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Length of the name token in bytes.
    #[serde(default)]
    pub length: usize,
    /// Extended type name (extensions only).
    #[serde(default)]
    pub extended_type: Option<String>,
    /// Access of the extended type, if the front end resolved it.
    #[serde(default)]
    pub extended_access: Option<String>,
    /// Member declarations in source order.
    #[serde(default)]
    pub members: Vec<DeclDto>,
}
