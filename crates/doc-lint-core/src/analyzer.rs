//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, RuleConfig, DEFAULT_TREE_PATTERN};
use crate::context::TreeContext;
use crate::decl::DeclTree;
use crate::rule::{Rule, RuleBox};
use crate::tree_file::{self, LoadError};
use crate::types::{Diagnostic, LintResult};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A tree file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The worker pool could not be created.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single tree file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds an include glob pattern, relative to the root.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on unreadable tree files (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());
        if include_patterns.is_empty() {
            include_patterns.push(DEFAULT_TREE_PATTERN.to_string());
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            include_patterns,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }

    /// Analyzes all discovered tree files and returns the results.
    ///
    /// Trees are checked in parallel; diagnostics keep discovery order.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, or if a tree file cannot be
    /// loaded while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} tree files to analyze", files.len());

        let outcomes: Vec<Result<Vec<Diagnostic>, LoadError>> = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| files.par_iter().map(|f| self.analyze_file(f)).collect()),
            None => files.par_iter().map(|f| self.analyze_file(f)).collect(),
        };

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(diagnostics) => {
                    result.diagnostics.extend(diagnostics);
                    result.trees_checked += 1;
                }
                Err(e) => {
                    warn!("{e}");
                    if self.fail_on_parse_error {
                        return Err(e.into());
                    }
                }
            }
        }

        info!(
            "Analysis complete: {} diagnostics in {} trees",
            result.diagnostics.len(),
            result.trees_checked
        );

        Ok(result)
    }

    /// Runs all enabled rules over an in-memory tree.
    #[must_use]
    pub fn analyze_tree(&self, ctx: &TreeContext, tree: &DeclTree) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_diagnostics = rule.check(ctx, tree);
            diagnostics.extend(self.apply_severity_override(rule.name(), rule_diagnostics));
        }

        diagnostics
    }

    /// Loads and analyzes a single tree file.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Diagnostic>, LoadError> {
        debug!("Analyzing: {}", path.display());

        let tree = tree_file::load_file(path)?;
        let base = if self.root.is_file() {
            self.root.parent().unwrap_or(self.root.as_path())
        } else {
            self.root.as_path()
        };
        let ctx = TreeContext::new(path, tree.source(), base);
        Ok(self.analyze_tree(&ctx, &tree))
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Vec<Diagnostic> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for d in &mut diagnostics {
                d.severity = severity;
            }
        }
        diagnostics
    }

    /// Discovers tree files to analyze, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        for include in &self.include_patterns {
            let pattern = format!("{}/{}", self.root.display(), include);
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }

                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    ///
    /// Patterns match the path relative to the root, so a root that itself
    /// lives under an excluded directory (e.g. `.build/decls`) still works.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();

        self.exclude_patterns.iter().any(|pattern| {
            if glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&path_str)) {
                return true;
            }
            // `**/target/**` also matches `target/` directly under the root
            let fragment = pattern.replace("**/", "").replace("/**", "");
            !fragment.is_empty()
                && relative
                    .components()
                    .rev()
                    .skip(1)
                    .any(|c| c.as_os_str().to_string_lossy() == fragment)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{AccessLevel, Decl, DeclKind};
    use crate::types::{Location, Severity};

    struct EveryDecl;

    impl Rule for EveryDecl {
        fn name(&self) -> &'static str {
            "every-decl"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn check(&self, ctx: &TreeContext, tree: &DeclTree) -> Vec<Diagnostic> {
            tree.preorder()
                .map(|id| {
                    Diagnostic::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::from_span(ctx.relative_path.clone(), tree[id].span),
                        tree[id].name.clone(),
                    )
                })
                .collect()
        }
    }

    fn write_tree(dir: &Path, name: &str, json: &str) {
        std::fs::write(dir.join(name), json).expect("write fixture");
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/target/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.include_patterns, vec![DEFAULT_TREE_PATTERN]);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/.build/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/pkg/.build/debug/Lib.decls.json")));
        assert!(!analyzer.should_exclude(Path::new("/pkg/Sources/Lib.decls.json")));
    }

    #[test]
    fn test_root_inside_default_excluded_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().join(".build/decls");
        std::fs::create_dir_all(root.join(".build/cache")).expect("mkdir");
        write_tree(&root, "Lib.decls.json", r#"{ "declarations": [ { "kind": "class", "name": "C" } ] }"#);
        write_tree(&root.join(".build/cache"), "Stale.decls.json", r#"{ "declarations": [ { "kind": "class", "name": "Stale" } ] }"#);

        let result = Analyzer::builder()
            .root(&root)
            .config(Config::default())
            .rule(EveryDecl)
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert_eq!(result.trees_checked, 1);
        let names: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(names, ["C"]);
    }

    #[test]
    fn test_analyze_discovers_trees_in_order() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_tree(tmp.path(), "b.decls.json", r#"{ "declarations": [ { "kind": "class", "name": "B" } ] }"#);
        write_tree(tmp.path(), "a.decls.json", r#"{ "declarations": [ { "kind": "class", "name": "A" } ] }"#);
        write_tree(tmp.path(), "notes.json", r#"{ "declarations": [ { "kind": "class", "name": "N" } ] }"#);

        let result = Analyzer::builder()
            .root(tmp.path())
            .rule(EveryDecl)
            .build()
            .unwrap()
            .analyze()
            .unwrap();

        assert_eq!(result.trees_checked, 2);
        let names: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_broken_tree_is_skipped_unless_strict() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_tree(tmp.path(), "ok.decls.json", r#"{ "declarations": [] }"#);
        write_tree(tmp.path(), "broken.decls.json", "{");

        let lenient = Analyzer::builder().root(tmp.path()).build().unwrap();
        assert_eq!(lenient.analyze().unwrap().trees_checked, 1);

        let strict = Analyzer::builder()
            .root(tmp.path())
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        assert!(matches!(strict.analyze(), Err(AnalyzerError::Load(_))));
    }

    #[test]
    fn test_single_file_root() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_tree(tmp.path(), "only.json", r#"{ "declarations": [ { "kind": "struct", "name": "S" } ] }"#);

        let mut config = Config::default();
        config.analyzer.parallelism = Some(1);
        let result = Analyzer::builder()
            .root(tmp.path().join("only.json"))
            .config(config)
            .rule(EveryDecl)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(result.trees_checked, 1);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_disabled_rule_and_severity_override() {
        let mut tree = DeclTree::new("a.swift");
        tree.add_root(Decl::new(DeclKind::Class, "C").with_access(AccessLevel::Public));
        let ctx = TreeContext::detached(tree.source());

        let config = Config::parse("[rules.every-decl]\nseverity = \"error\"\n").unwrap();
        let analyzer = Analyzer::builder().config(config).rule(EveryDecl).build().unwrap();
        let diagnostics = analyzer.analyze_tree(&ctx, &tree);
        assert_eq!(diagnostics[0].severity, Severity::Error);

        let config = Config::parse("[rules.every-decl]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder().config(config).rule(EveryDecl).build().unwrap();
        assert!(analyzer.analyze_tree(&ctx, &tree).is_empty());
    }
}
