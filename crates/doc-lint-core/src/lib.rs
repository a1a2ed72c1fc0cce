//! # doc-lint-core
//!
//! Core framework for documentation-coverage linting over declaration trees.
//!
//! This crate provides the foundational model, traits, and types:
//!
//! - [`DeclTree`] / [`Decl`] arena model of one compilation unit
//! - [`access`] evaluation of intrinsic and effective visibility
//! - [`tree_file`] loader for serialized declaration trees
//! - [`Rule`] trait for per-tree rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Diagnostic`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use doc_lint_core::Analyzer;
//! use doc_lint_rules::RequireDocComments;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./.build/decls")
//!     .rule(RequireDocComments::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
mod analyzer;
mod config;
mod context;
mod decl;
mod rule;
pub mod tree_file;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use access::{effective_access, intrinsic_access, ExtensionContext};
pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, DEFAULT_TREE_PATTERN};
pub use context::TreeContext;
pub use decl::{
    AccessLevel, Decl, DeclId, DeclKind, DeclTree, ExtendedType, ParseAccessError, Preorder, Span,
};
pub use rule::{Rule, RuleBox};
pub use types::{Diagnostic, LintResult, Location, Severity, SourceDiagnostic, Suggestion};
