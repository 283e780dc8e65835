/// Core domain types for reference resolution, postfixes, and rewrite records.
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A reference that matched a pattern but did not resolve to a local file,
/// so its span was copied through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassthroughReference {
    /// Captured path, exactly as written in the document.
    pub path: String,
    /// Name of the pattern that matched it.
    pub pattern: &'static str,
}

/// A content-hash postfix: the first 8 lowercase hex characters of a
/// SHA-256 digest. Newtype prevents mixing with arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Postfix(
    /// The truncated hex digest.
    pub String,
);

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

/// Directories a captured path is resolved against.
///
/// `base_dir` serves `/`-rooted and base-URL-prefixed references,
/// `document_dir` serves everything relative to the HTML file itself.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// Absolute base directory of the site.
    pub base_dir: PathBuf,
    /// Optional URL prefix mapped onto `base_dir`. Never empty.
    pub base_url: Option<String>,
    /// Absolute directory containing the document being rewritten.
    pub document_dir: PathBuf,
}

/// A reference that resolved to a local file and received a postfix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewrittenReference {
    /// Path written back into the document, `{stripped}?{postfix}`.
    pub new_path: String,
    /// Captured path as it appeared before the rewrite.
    pub original: String,
    /// Name of the pattern that matched it.
    pub pattern: &'static str,
    /// Filesystem location that was hashed.
    pub resolved: PathBuf,
}

impl RewrittenReference {
    /// Whether the rewrite altered the document text for this reference.
    pub fn is_changed(&self) -> bool {
        return self.new_path != self.original;
    }
}
