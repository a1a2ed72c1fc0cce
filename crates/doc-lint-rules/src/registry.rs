//! Rule registry.

use crate::{RequireDocComments, SpiPolicy};
use doc_lint_core::{Config, RuleBox};

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(RequireDocComments::new())]
}

/// Returns all rules, with rule-specific options read from `config`.
///
/// `spi` replaces the configured SPI policy when given. Enablement and
/// severity overrides are applied later by the analyzer.
#[must_use]
pub fn configured_rules(config: &Config, spi: Option<SpiPolicy>) -> Vec<RuleBox> {
    let mut doc_comments =
        RequireDocComments::from_config(config.rules.get(crate::require_doc_comments::NAME));
    if let Some(policy) = spi {
        doc_comments = doc_comments.spi_policy(policy);
    }
    vec![Box::new(doc_comments)]
}
