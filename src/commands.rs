//! CLI commands: rewrite documents in place, or check them without writing.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::error::Error;
use crate::patterns::compile_reference_patterns;
use crate::report::{self, DocumentReport, OutputFormat};
use crate::rewriter::{self, RewrittenDocument};

/// Base directory, base URL and target documents after merging flags
/// with `.postfix.toml`. All paths are absolute.
#[derive(Debug)]
pub struct RunOptions {
    /// Absolute site root.
    pub base_dir: PathBuf,
    /// URL prefix mapped onto `base_dir`.
    pub base_url: Option<String>,
    /// Absolute paths of the documents to process, in the order given.
    pub documents: Vec<PathBuf>,
}

impl RunOptions {
    /// Merge command-line values over the project config.
    ///
    /// `base_dir` is made absolute against the process's current directory;
    /// each target is then taken relative to it.
    ///
    /// # Errors
    ///
    /// Returns `Error::BaseDirNotFound` if the base directory is missing,
    /// `Error::NoTargetFiles` if no document was named anywhere, or config
    /// loading errors.
    pub fn assemble(
        base_dir: &Path,
        base_url: Option<String>,
        files: Vec<PathBuf>,
    ) -> Result<Self, Error> {
        let base_dir = std::path::absolute(base_dir)?;
        if !base_dir.is_dir() {
            return Err(Error::BaseDirNotFound { path: base_dir });
        }
        tracing::info!(base_dir = %base_dir.display(), "normalized base directory");

        let config = Config::load(&base_dir)?;
        let base_url = base_url
            .filter(|url| return !url.is_empty())
            .or(config.base_url);
        let files = if files.is_empty() { config.files } else { files };
        if files.is_empty() {
            return Err(Error::NoTargetFiles);
        }

        let documents = files.iter().map(|file| return base_dir.join(file)).collect();
        return Ok(Self {
            base_dir,
            base_url,
            documents,
        });
    }
}

/// Rewrite every document in memory, then report stale references
/// without touching the files.
///
/// Exit code: 1 when any reference would change, 0 when all are fresh.
///
/// # Errors
///
/// Returns the first document or reference read failure.
pub fn check(options: &RunOptions, format: OutputFormat) -> Result<ExitCode, Error> {
    let documents = rewrite_all(options)?;
    let reports: Vec<DocumentReport> = documents.into_iter().map(|d| return d.report).collect();

    report::print_check(&reports, &options.base_dir, format);

    let stale = reports
        .iter()
        .any(|r| return r.changed_references().next().is_some());
    if stale {
        return Ok(ExitCode::from(1));
    }
    return Ok(ExitCode::SUCCESS);
}

/// Rewrite every document and write the modified ones back in place.
///
/// Nothing is written until every document has been rewritten, so a
/// failure anywhere leaves all targets untouched.
///
/// # Errors
///
/// Returns read failures from any document or reference, or the first
/// write failure.
pub fn rewrite(options: &RunOptions, format: OutputFormat) -> Result<(), Error> {
    let documents = rewrite_all(options)?;
    write_documents(&documents)?;

    let reports: Vec<DocumentReport> = documents.into_iter().map(|d| return d.report).collect();
    report::print_rewrite(&reports, &options.base_dir, format);
    return Ok(());
}

/// Rewrite all target documents in memory, in order.
///
/// # Errors
///
/// Returns the first failure; later documents are not read.
fn rewrite_all(options: &RunOptions) -> Result<Vec<RewrittenDocument>, Error> {
    let patterns = compile_reference_patterns()?;
    let mut documents = Vec::with_capacity(options.documents.len());

    for path in &options.documents {
        let context =
            rewriter::context_for_document(&options.base_dir, options.base_url.as_deref(), path);
        let document = rewriter::rewrite_document(path, &patterns, &context)?;
        tracing::debug!(
            document = %path.display(),
            references = document.report.references.len(),
            passthrough = document.report.passthrough.len(),
            "rewrote document in memory"
        );
        documents.push(document);
    }

    return Ok(documents);
}

/// Write back each document whose text changed.
///
/// # Errors
///
/// Returns `Error::DocumentUnwritable` on the first failed write.
fn write_documents(documents: &[RewrittenDocument]) -> Result<(), Error> {
    for document in documents.iter().filter(|d| return d.is_modified()) {
        let path = &document.report.file;
        std::fs::write(path, &document.text).map_err(|source| {
            return Error::DocumentUnwritable {
                path: path.clone(),
                source,
            };
        })?;
        tracing::info!(document = %path.display(), "wrote document");
    }
    return Ok(());
}
