//! # doc-lint-rules
//!
//! Built-in lint rules for doc-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `require-doc-comments` | Requires documentation comments on public API declarations |
//!
//! ## Usage
//!
//! ```ignore
//! use doc_lint_core::Analyzer;
//! use doc_lint_rules::{RequireDocComments, SpiPolicy};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./.build/decls")
//!     .rule(RequireDocComments::new().spi_policy(SpiPolicy::Exempt))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod doc_oracle;
mod exemption;
mod registry;
mod require_doc_comments;

pub use doc_oracle::{DocCommentOracle, PrecomputedDocs};
pub use exemption::{
    ExemptionReason, ExemptionResolver, Resolution, Scope, SpiPolicy, SPI_ATTRIBUTES,
};
pub use registry::{all_rules, configured_rules};
pub use require_doc_comments::RequireDocComments;

/// Re-export core types for convenience.
pub use doc_lint_core::{Diagnostic, Rule, Severity};
