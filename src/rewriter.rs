//! Pattern-by-pattern reconstruction of a document with fresh postfixes.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::hasher;
use crate::patterns::ReferencePattern;
use crate::report::DocumentReport;
use crate::resolver;
use crate::types::{PassthroughReference, ResolutionContext, RewrittenReference};

/// A document rewritten in memory, not yet written back.
#[derive(Debug)]
pub struct RewrittenDocument {
    /// Text before the rewrite.
    pub original: String,
    /// What happened to each matched reference.
    pub report: DocumentReport,
    /// Text after all passes.
    pub text: String,
}

impl RewrittenDocument {
    /// Whether writing `text` back would change the file.
    pub fn is_modified(&self) -> bool {
        return self.original != self.text;
    }
}

/// Build the resolution context for a document: relative references
/// resolve against the directory that contains it.
pub fn context_for_document(
    base_dir: &Path,
    base_url: Option<&str>,
    document: &Path,
) -> ResolutionContext {
    let document_dir = document
        .parent()
        .map_or_else(|| return base_dir.to_path_buf(), PathBuf::from);
    return ResolutionContext {
        base_dir: base_dir.to_path_buf(),
        base_url: base_url.filter(|url| return !url.is_empty()).map(String::from),
        document_dir,
    };
}

/// Read a document and rewrite it under the given resolution directories.
///
/// # Errors
///
/// Returns `Error::DocumentUnreadable` if the document cannot be read, or
/// `Error::ReferenceUnreadable` if any resolved reference cannot be hashed.
pub fn rewrite_document(
    path: &Path,
    patterns: &[ReferencePattern],
    context: &ResolutionContext,
) -> Result<RewrittenDocument, Error> {
    let original = std::fs::read_to_string(path).map_err(|source| {
        return Error::DocumentUnreadable {
            path: path.to_path_buf(),
            source,
        };
    })?;

    let mut report = DocumentReport::new(path.to_path_buf());
    let text = rewrite_text(&original, patterns, context, &mut report)?;

    return Ok(RewrittenDocument {
        original,
        report,
        text,
    });
}

/// Apply one pattern over the whole text with a single forward cursor.
///
/// Only the captured path span of a resolved match is replaced; unresolved
/// matches and everything between matches are copied verbatim.
///
/// # Errors
///
/// Returns `Error::ReferenceUnreadable` if a resolved file cannot be read.
fn rewrite_pattern_matches(
    text: &str,
    pattern: &ReferencePattern,
    context: &ResolutionContext,
    report: &mut DocumentReport,
) -> Result<String, Error> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0_usize;

    for caps in pattern.regex.captures_iter(text) {
        let (Some(whole), Some(captured)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(text.get(cursor..whole.start()).unwrap_or_default());

        let stripped = resolver::strip_postfix(captured.as_str());
        if let Some(resolved) = resolver::resolve_reference_path(stripped, context) {
            let postfix = hasher::hash_file(&resolved).map_err(|source| {
                return Error::ReferenceUnreadable {
                    document: report.file.clone(),
                    path: resolved.clone(),
                    reference: stripped.to_string(),
                    source,
                };
            })?;
            let new_path = format!("{stripped}?{postfix}");
            tracing::debug!(
                pattern = pattern.name,
                reference = captured.as_str(),
                resolved = %resolved.display(),
                %postfix,
                "rewrote reference"
            );

            out.push_str(text.get(whole.start()..captured.start()).unwrap_or_default());
            out.push_str(&new_path);
            out.push_str(text.get(captured.end()..whole.end()).unwrap_or_default());

            report.references.push(RewrittenReference {
                new_path,
                original: captured.as_str().to_string(),
                pattern: pattern.name,
                resolved,
            });
        } else {
            tracing::debug!(
                pattern = pattern.name,
                reference = captured.as_str(),
                "left unresolved reference unchanged"
            );
            out.push_str(whole.as_str());
            report.passthrough.push(PassthroughReference {
                path: captured.as_str().to_string(),
                pattern: pattern.name,
            });
        }

        cursor = whole.end();
    }

    out.push_str(text.get(cursor..).unwrap_or_default());
    return Ok(out);
}

/// Run every pattern, in order, each over the output of the previous one.
///
/// # Errors
///
/// Returns `Error::ReferenceUnreadable` if any resolved file cannot be read.
pub fn rewrite_text(
    text: &str,
    patterns: &[ReferencePattern],
    context: &ResolutionContext,
    report: &mut DocumentReport,
) -> Result<String, Error> {
    let mut current = text.to_string();
    for pattern in patterns {
        current = rewrite_pattern_matches(&current, pattern, context, report)?;
    }
    return Ok(current);
}
