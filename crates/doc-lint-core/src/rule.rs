//! Rule trait for defining lint rules.

use crate::context::TreeContext;
use crate::decl::DeclTree;
use crate::types::{Diagnostic, Severity};

/// A lint rule over one declaration tree.
///
/// Rules are pure functions of the tree: the same tree always yields the
/// same diagnostics in the same order.
///
/// # Example
///
/// ```ignore
/// use doc_lint_core::{DeclTree, Diagnostic, Rule, TreeContext};
///
/// pub struct NoEmptyTypes;
///
/// impl Rule for NoEmptyTypes {
///     fn name(&self) -> &'static str { "no-empty-types" }
///     fn code(&self) -> &'static str { "DL100" }
///
///     fn check(&self, ctx: &TreeContext, tree: &DeclTree) -> Vec<Diagnostic> {
///         // walk `tree.preorder()` ...
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "require-doc-comments").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks a single declaration tree.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the tree being checked
    /// * `tree` - The declarations of one compilation unit
    fn check(&self, ctx: &TreeContext, tree: &DeclTree) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Decl, DeclKind};
    use crate::types::Location;

    struct CountRoots;

    impl Rule for CountRoots {
        fn name(&self) -> &'static str {
            "count-roots"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn check(&self, ctx: &TreeContext, tree: &DeclTree) -> Vec<Diagnostic> {
            tree.roots()
                .iter()
                .map(|_| {
                    Diagnostic::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::new(ctx.relative_path.clone(), 1, 1),
                        "root",
                    )
                })
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = CountRoots;
        let mut tree = DeclTree::new("a.swift");
        tree.add_root(Decl::new(DeclKind::Class, "C"));
        let ctx = TreeContext::detached(tree.source());
        let diagnostics = rule.check(&ctx, &tree);

        assert_eq!(rule.default_severity(), Severity::Warning);
        assert_eq!(rule.description(), "");
        assert_eq!(diagnostics.len(), 1);
    }
}
