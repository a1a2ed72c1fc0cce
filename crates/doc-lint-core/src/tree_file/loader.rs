//! DTO → arena conversion.

use super::dto::{DeclDto, TreeFileDto};
use crate::decl::{AccessLevel, Decl, DeclId, DeclKind, DeclTree, ExtendedType, Span};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Errors while reading a tree file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read tree file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not a valid tree document.
    #[error("Invalid tree file {path}: {message}")]
    Json {
        /// Path of the offending file.
        path: PathBuf,
        /// Deserializer message.
        message: String,
    },
}

/// Reads and converts a tree file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_file(path: &Path) -> Result<DeclTree, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, path)
}

/// Parses a tree document.
///
/// `origin` names the document in errors and is used as the source path
/// when the document does not record one.
///
/// # Errors
///
/// Returns an error if the content is not a valid tree document.
pub fn parse(content: &str, origin: &Path) -> Result<DeclTree, LoadError> {
    let dto: TreeFileDto = serde_json::from_str(content).map_err(|e| LoadError::Json {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(load(dto, origin))
}

/// Converts a parsed document into a [`DeclTree`].
///
/// Never fails: malformed nodes are kept in a shape the checker will not
/// diagnose, and a warning is logged for each.
#[must_use]
pub fn load(dto: TreeFileDto, origin: &Path) -> DeclTree {
    let source = dto.source.unwrap_or_else(|| origin.to_path_buf());
    let mut tree = DeclTree::new(source);
    for (i, decl) in dto.declarations.into_iter().enumerate() {
        insert(&mut tree, None, decl, &format!("declarations[{i}]"));
    }
    tree
}

fn insert(tree: &mut DeclTree, parent: Option<DeclId>, dto: DeclDto, context: &str) {
    let DeclDto {
        kind,
        name,
        access,
        attributes,
        has_doc_comment,
        doc_comment,
        line,
        column,
        offset,
        length,
        extended_type,
        extended_access,
        members,
    } = dto;

    let kind = kind.unwrap_or_else(|| {
        warn!("{context}: declaration has no kind, it will not be checked");
        DeclKind::Other
    });
    if kind.requires_name() && name.is_empty() {
        warn!("{context}: {kind:?} declaration has no name, it will not be checked");
    }

    let mut decl = Decl::new(kind, name)
        .with_doc_comment(doc_comment.as_deref().map_or(has_doc_comment, has_content))
        .with_span(Span {
            line,
            column,
            offset,
            length,
        });
    decl.access = access.map(|a| parse_access(&a, context));
    decl.attributes.extend(attributes);

    if kind == DeclKind::Extension {
        match extended_type {
            Some(name) => {
                decl.extended_type = Some(ExtendedType {
                    name,
                    access: extended_access.map(|a| parse_access(&a, context)),
                });
            }
            None => warn!("{context}: extension has no extended type, its members will not be checked"),
        }
    }

    let id = match parent {
        Some(parent) => tree.add_child(parent, decl),
        None => tree.add_root(decl),
    };
    for (i, member) in members.into_iter().enumerate() {
        insert(tree, Some(id), member, &format!("{context}.members[{i}]"));
    }
}

fn parse_access(raw: &str, context: &str) -> AccessLevel {
    raw.parse().unwrap_or_else(|e| {
        warn!("{context}: {e}; treating as private");
        AccessLevel::Private
    })
}

/// Returns true if a doc comment has any text beyond comment markers.
fn has_content(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        let line = line
            .strip_prefix("///")
            .or_else(|| line.strip_prefix("/**"))
            .unwrap_or(line);
        let line = line.strip_suffix("*/").unwrap_or(line);
        let line = line.trim_start_matches('*');
        !line.trim().is_empty()
    })
}
