//! Doc-comment presence.
//!
//! Whether a comment is attached is decided upstream, by the front end that
//! scans comment trivia. The checker only asks.

use doc_lint_core::{DeclId, DeclTree};

/// Answers whether a declaration has an attached documentation comment.
pub trait DocCommentOracle: Send + Sync {
    /// Returns true if `id` is documented.
    fn has_doc_comment(&self, tree: &DeclTree, id: DeclId) -> bool;
}

/// Reads the flag precomputed on each declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecomputedDocs;

impl DocCommentOracle for PrecomputedDocs {
    fn has_doc_comment(&self, tree: &DeclTree, id: DeclId) -> bool {
        tree[id].has_doc_comment
    }
}

impl<F> DocCommentOracle for F
where
    F: Fn(&DeclTree, DeclId) -> bool + Send + Sync,
{
    fn has_doc_comment(&self, tree: &DeclTree, id: DeclId) -> bool {
        self(tree, id)
    }
}
