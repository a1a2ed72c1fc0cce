//! Rule to require documentation comments on public API declarations.
//!
//! # Rationale
//!
//! Every declaration an importer can reach should say what it is for. The
//! rule walks the declaration tree once, pre-order, and reports each
//! declaration that is part of the public API surface and has no attached
//! documentation comment.
//!
//! # Detected Patterns
//!
//! ```text
//! public class C {               // class 'C'
//!   public class func foo() {}   // method 'foo'
//! }
//! extension S {                  // S is public
//!   public func inExt() {}       // method 'inExt'
//! }
//! ```
//!
//! # Not Reported
//!
//! - Declarations whose effective access is below `public`
//! - Declarations nested in (or named with) a leading underscore
//! - Deinitializers, extensions themselves, and unrecognized declarations
//! - SPI declarations, only when [`SpiPolicy::Exempt`] is configured

use std::fmt;
use std::sync::Arc;

use doc_lint_core::{
    DeclId, DeclTree, Diagnostic, Location, Rule, RuleConfig, Severity, Suggestion, TreeContext,
};
use tracing::{debug, trace, warn};

use crate::doc_oracle::{DocCommentOracle, PrecomputedDocs};
use crate::exemption::{ExemptionResolver, Scope, SpiPolicy};

/// Rule code for require-doc-comments.
pub const CODE: &str = "DL001";

/// Rule name for require-doc-comments.
pub const NAME: &str = "require-doc-comments";

/// Requires documentation comments on public API declarations.
#[derive(Clone)]
pub struct RequireDocComments {
    /// Severity of reported diagnostics.
    pub severity: Severity,
    /// Treatment of SPI-attributed declarations.
    pub spi_policy: SpiPolicy,
    oracle: Arc<dyn DocCommentOracle>,
}

impl fmt::Debug for RequireDocComments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequireDocComments")
            .field("severity", &self.severity)
            .field("spi_policy", &self.spi_policy)
            .finish_non_exhaustive()
    }
}

impl Default for RequireDocComments {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireDocComments {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            spi_policy: SpiPolicy::default(),
            oracle: Arc::new(PrecomputedDocs),
        }
    }

    /// Creates the rule from its `[rules.require-doc-comments]` section.
    ///
    /// Reads the `spi` option (`"diagnose"` or `"exempt"`). Severity and
    /// enablement are applied by the analyzer.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let mut rule = Self::new();
        let Some(config) = config else {
            return rule;
        };
        if config.options.contains_key("spi") {
            match config.get_option::<SpiPolicy>("spi") {
                Some(policy) => rule.spi_policy = policy,
                None => warn!("{NAME}: invalid `spi` option, expected \"diagnose\" or \"exempt\""),
            }
        }
        rule
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the SPI policy.
    #[must_use]
    pub fn spi_policy(mut self, policy: SpiPolicy) -> Self {
        self.spi_policy = policy;
        self
    }

    /// Replaces the doc-comment presence oracle.
    #[must_use]
    pub fn oracle(mut self, oracle: impl DocCommentOracle + 'static) -> Self {
        self.oracle = Arc::new(oracle);
        self
    }

    /// Checks an in-memory tree, locating diagnostics in `tree.source()`.
    #[must_use]
    pub fn run(&self, tree: &DeclTree) -> Vec<Diagnostic> {
        self.check(&TreeContext::detached(tree.source()), tree)
    }
}

impl Rule for RequireDocComments {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires documentation comments on public API declarations"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TreeContext, tree: &DeclTree) -> Vec<Diagnostic> {
        let mut walker = CoverageWalker {
            ctx,
            rule: self,
            tree,
            resolver: ExemptionResolver::new(self.spi_policy),
            diagnostics: Vec::new(),
        };

        for &root in tree.roots() {
            walker.walk(root, Scope::FILE);
        }

        debug!(
            "{}: {} undocumented declaration(s) in {}",
            NAME,
            walker.diagnostics.len(),
            ctx.relative_path.display()
        );
        walker.diagnostics
    }
}

struct CoverageWalker<'a> {
    ctx: &'a TreeContext<'a>,
    rule: &'a RequireDocComments,
    tree: &'a DeclTree,
    resolver: ExemptionResolver,
    diagnostics: Vec<Diagnostic>,
}

impl CoverageWalker<'_> {
    /// Visits `root` and its members in pre-order, source order.
    fn walk(&mut self, root: DeclId, outer: Scope) {
        let tree = self.tree;
        let mut stack = vec![(root, outer)];

        while let Some((id, outer)) = stack.pop() {
            let decl = &tree[id];
            let resolution = self.resolver.enter(tree, id, outer);

            if let Some(reason) = resolution.reason {
                trace!("{:?} '{}' exempt: {}", decl.kind, decl.name, reason);
            } else if self.is_reportable(id) && !self.rule.oracle.has_doc_comment(tree, id) {
                self.report(id);
            }

            stack.extend(decl.children().iter().rev().map(|&child| (child, resolution.scope)));
        }
    }

    fn is_reportable(&self, id: DeclId) -> bool {
        let decl = &self.tree[id];
        if !decl.kind.is_checked() {
            return false;
        }
        if decl.kind.requires_name() && decl.name.is_empty() {
            debug!(
                "Skipping unnamed {:?} at {}:{}",
                decl.kind, decl.span.line, decl.span.column
            );
            return false;
        }
        true
    }

    fn report(&mut self, id: DeclId) {
        let decl = &self.tree[id];
        let kind = decl.kind.descriptive_name(decl.is_top_level());
        let location = Location::from_span(self.ctx.relative_path.clone(), decl.span);

        self.diagnostics.push(
            Diagnostic::new(
                CODE,
                NAME,
                self.rule.severity,
                location,
                format!("{kind} '{}' does not have a documentation comment", decl.name),
            )
            .with_suggestion(Suggestion::new(
                "Add a `///` documentation comment above the declaration",
            )),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_lint_core::{AccessLevel::Public, Decl, DeclKind};

    fn messages(tree: &DeclTree) -> Vec<String> {
        RequireDocComments::new()
            .run(tree)
            .into_iter()
            .map(|d| d.message)
            .collect()
    }

    #[test]
    fn test_detects_undocumented_public_class_and_method() {
        let mut tree = DeclTree::new("Lib.swift");
        let c = tree.add_root(Decl::new(DeclKind::Class, "C").with_access(Public).at(1, 14));
        tree.add_child(c, Decl::new(DeclKind::Function, "foo").with_access(Public).at(2, 21));

        let diagnostics = RequireDocComments::new().run(&tree);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code, CODE);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            diagnostics[0].message,
            "class 'C' does not have a documentation comment"
        );
        assert_eq!(
            diagnostics[1].message,
            "method 'foo' does not have a documentation comment"
        );
        assert_eq!((diagnostics[1].location.line, diagnostics[1].location.column), (2, 21));
        assert!(diagnostics[1].suggestion.is_some());
    }

    #[test]
    fn test_allows_documented_declarations() {
        let mut tree = DeclTree::new("Lib.swift");
        let s = tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public).documented());
        tree.add_child(s, Decl::new(DeclKind::Variable, "v").with_access(Public).documented());
        assert!(messages(&tree).is_empty());
    }

    #[test]
    fn test_documented_parent_does_not_cover_members() {
        let mut tree = DeclTree::new("Lib.swift");
        let s = tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public).documented());
        tree.add_child(s, Decl::new(DeclKind::Variable, "v").with_access(Public));
        assert_eq!(
            messages(&tree),
            ["property 'v' does not have a documentation comment"]
        );
    }

    #[test]
    fn test_extension_is_traversed_but_not_reported() {
        let mut tree = DeclTree::new("Lib.swift");
        tree.add_root(Decl::new(DeclKind::Struct, "S").with_access(Public).documented());
        let ext = tree.add_root(Decl::extension("S"));
        tree.add_child(ext, Decl::new(DeclKind::Function, "inExt").with_access(Public));
        assert_eq!(
            messages(&tree),
            ["method 'inExt' does not have a documentation comment"]
        );
    }

    #[test]
    fn test_other_kinds_are_descended_into() {
        let mut tree = DeclTree::new("Lib.swift");
        let other = tree.add_root(Decl::new(DeclKind::Other, "").with_access(Public));
        tree.add_child(other, Decl::new(DeclKind::Function, "nested").with_access(Public));
        assert_eq!(
            messages(&tree),
            ["method 'nested' does not have a documentation comment"]
        );
    }

    #[test]
    fn test_unnamed_declaration_is_skipped() {
        let mut tree = DeclTree::new("Lib.swift");
        let broken = tree.add_root(Decl::new(DeclKind::Struct, "").with_access(Public));
        tree.add_child(broken, Decl::new(DeclKind::Function, "f").with_access(Public));
        assert_eq!(messages(&tree), ["method 'f' does not have a documentation comment"]);
    }

    #[test]
    fn test_deep_nesting_keeps_preorder() {
        let mut tree = DeclTree::new("Deep.swift");
        let mut parent = tree.add_root(Decl::new(DeclKind::Struct, "Level0").with_access(Public).documented());
        for depth in 1..100_000 {
            parent = tree.add_child(
                parent,
                Decl::new(DeclKind::Struct, format!("Level{depth}"))
                    .with_access(Public)
                    .documented(),
            );
        }
        tree.add_child(parent, Decl::new(DeclKind::Function, "first").with_access(Public));
        tree.add_child(parent, Decl::new(DeclKind::Function, "second").with_access(Public));

        assert_eq!(
            messages(&tree),
            [
                "method 'first' does not have a documentation comment",
                "method 'second' does not have a documentation comment",
            ]
        );
    }

    #[test]
    fn test_custom_oracle_and_severity() {
        let mut tree = DeclTree::new("Lib.swift");
        tree.add_root(Decl::new(DeclKind::Function, "documentedElsewhere").with_access(Public));
        tree.add_root(Decl::new(DeclKind::Function, "bare").with_access(Public));

        let rule = RequireDocComments::new()
            .severity(Severity::Error)
            .oracle(|tree: &DeclTree, id: DeclId| tree[id].name == "documentedElsewhere");
        let diagnostics = rule.run(&tree);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(
            diagnostics[0].message,
            "global function 'bare' does not have a documentation comment"
        );
    }

    #[test]
    fn test_from_config_reads_spi_option() {
        let config = doc_lint_core::Config::parse(
            "[rules.require-doc-comments]\nspi = \"exempt\"\n",
        )
        .unwrap();
        let rule = RequireDocComments::from_config(config.rules.get(NAME));
        assert_eq!(rule.spi_policy, SpiPolicy::Exempt);

        let invalid = doc_lint_core::Config::parse(
            "[rules.require-doc-comments]\nspi = \"sometimes\"\n",
        )
        .unwrap();
        let rule = RequireDocComments::from_config(invalid.rules.get(NAME));
        assert_eq!(rule.spi_policy, SpiPolicy::Diagnose);

        assert_eq!(
            RequireDocComments::from_config(None).spi_policy,
            SpiPolicy::Diagnose
        );
    }

    #[test]
    fn test_rule_metadata() {
        let rule = RequireDocComments::default();
        assert_eq!(rule.name(), NAME);
        assert_eq!(rule.code(), CODE);
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert!(format!("{rule:?}").contains("Diagnose"));
    }
}
