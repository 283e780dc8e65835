//! Per-document outcome records and their text/JSON rendering.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::{PassthroughReference, RewrittenReference};

/// Summary format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON array of document reports on stdout.
    Json,
    /// One human-readable line per document on stderr.
    Text,
}

/// Everything that happened to the references of one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// The document that was processed.
    pub file: PathBuf,
    /// References copied through because they do not name a local file.
    pub passthrough: Vec<PassthroughReference>,
    /// References that resolved and received a postfix, in pass order.
    pub references: Vec<RewrittenReference>,
}

impl DocumentReport {
    /// References whose path text changed (new, stale, or missing postfix).
    pub fn changed_references(&self) -> impl Iterator<Item = &RewrittenReference> {
        return self.references.iter().filter(|r| return r.is_changed());
    }

    /// Start an empty report for `file`.
    pub const fn new(file: PathBuf) -> Self {
        return Self {
            file,
            passthrough: Vec::new(),
            references: Vec::new(),
        };
    }
}

/// Show `path` relative to `base` when it lives under it.
fn display_path(path: &Path, base: &Path) -> String {
    return path.strip_prefix(base).unwrap_or(path).display().to_string();
}

/// Print check results: every stale reference, then a one-line verdict.
pub fn print_check(reports: &[DocumentReport], base: &Path, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_json(reports);
        return;
    }

    let mut stale_count = 0_usize;
    for report in reports {
        let file = display_path(&report.file, base);
        for reference in report.changed_references() {
            stale_count = stale_count.saturating_add(1);
            println!("STALE   {file}: {} -> {}", reference.original, reference.new_path);
        }
    }

    if stale_count > 0 {
        println!();
        println!("{stale_count} stale");
    } else {
        let total: usize = reports.iter().map(|r| return r.references.len()).sum();
        println!("All {total} references fresh");
    }
    return;
}

/// Serialize reports as a pretty JSON array on stdout.
fn print_json(reports: &[DocumentReport]) {
    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(reports).unwrap_or_default();
    println!("{json}");
    return;
}

/// Print the outcome of a rewrite run.
pub fn print_rewrite(reports: &[DocumentReport], base: &Path, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_json(reports);
        return;
    }

    for report in reports {
        eprintln!("{}", render_rewrite_line(report, base));
    }
    return;
}

/// One summary line for a rewritten document.
fn render_rewrite_line(report: &DocumentReport, base: &Path) -> String {
    let file = display_path(&report.file, base);
    let changed = report.changed_references().count();
    let total = report.references.len();
    let skipped = report.passthrough.len();

    if changed == 0 {
        return format!("{file}: all {total} references up to date ({skipped} skipped)");
    }
    return format!("{file}: updated {changed} of {total} references ({skipped} skipped)");
}
