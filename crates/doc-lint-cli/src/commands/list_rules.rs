//! List rules command implementation.

use doc_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<24} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<24} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nConfigure rules in doc-lint.toml, e.g.:");
    println!("  [rules.require-doc-comments]");
    println!("  severity = \"error\"");
    println!("  spi = \"exempt\"");
}
