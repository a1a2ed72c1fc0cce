//! Rendering of lint results.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use doc_lint_core::{Diagnostic, LintResult, Severity, SourceDiagnostic};
use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::OutputFormat;

/// Prints lint results to stdout in the given format.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path, fail_on: Severity) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result, fail_on),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Rich => {
            let handler = GraphicalReportHandler::new_themed(GraphicalTheme::default());
            render_rich(result, root, fail_on, &handler)
        }
    };
    print!("{rendered}");
    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn render_text_diagnostic(out: &mut String, d: &Diagnostic) {
    let _ = writeln!(
        out,
        "{} {} at {}:{}:{}",
        d.code,
        d.rule,
        d.location.file.display(),
        d.location.line,
        d.location.column,
    );
    let _ = writeln!(out, "  {}: {}", severity_label(d.severity), d.message);
    if let Some(suggestion) = &d.suggestion {
        let _ = writeln!(out, "  = help: {}", suggestion.message);
    }
    out.push('\n');
}

fn render_summary(out: &mut String, result: &LintResult, fail_on: Severity) {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if result.has_violations_at(fail_on) {
        "\x1b[31m"
    } else if result.diagnostics.is_empty() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };
    let _ = writeln!(
        out,
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} tree(s)\x1b[0m",
        result.trees_checked
    );
}

fn render_text(result: &LintResult, fail_on: Severity) -> String {
    let mut out = String::new();
    for d in &result.diagnostics {
        render_text_diagnostic(&mut out, d);
    }
    render_summary(&mut out, result, fail_on);
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .diagnostics
        .iter()
        .map(|d| format!("{d}\n"))
        .collect()
}

/// Graphical report per diagnostic; diagnostics whose source cannot be read
/// fall back to the text layout.
fn render_rich(
    result: &LintResult,
    root: &Path,
    fail_on: Severity,
    handler: &GraphicalReportHandler,
) -> String {
    let mut out = String::new();

    for d in &result.diagnostics {
        let rendered = read_source(&d.location.file, root).and_then(|content| {
            let report = SourceDiagnostic::new(d, content);
            let mut buf = String::new();
            handler.render_report(&mut buf, &report).ok().map(|()| buf)
        });
        match rendered {
            Some(report) => {
                out.push_str(&report);
                out.push('\n');
            }
            None => render_text_diagnostic(&mut out, d),
        }
    }

    render_summary(&mut out, result, fail_on);
    out
}

/// Locations are relative to the analysis root when possible.
fn read_source(file: &Path, root: &Path) -> Option<String> {
    let base = if root.is_file() { root.parent()? } else { root };
    let candidates: [PathBuf; 2] = [base.join(file), file.to_path_buf()];
    candidates
        .iter()
        .find_map(|path| std::fs::read_to_string(path).ok())
}
