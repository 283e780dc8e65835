/// The fixed, ordered list of reference-bearing constructs.
use regex::Regex;

use crate::error::Error;

/// Pattern names and sources, in the order passes are applied.
/// Each source captures exactly one group: the reference path.
///
/// The `worker` pattern stops after the opening quote of the path and does
/// not require the call's closing parenthesis.
const PATTERN_SOURCES: [(&str, &str); 7] = [
    ("script", r#"<script\s[^>]*src="([^"]+)"[^>]*>"#),
    ("link", r#"<link\s[^>]*href="([^"]+)"[^>]*>"#),
    ("og-image", r#"<meta\s+property="og:image"\s+[^>]*content="([^"]+)"[^>]*>"#),
    ("fetch", r#"fetch\s*\(\s*["']([^'"]+)["']\s*\)"#),
    ("locate-file", r#"locateFile\s*\(\s*["']([^'"]+)["']\s*\)"#),
    ("worker", r#"new\s+Worker\s*\(\s*["']([^'"]+)["']\s*"#),
    ("import", r#"import.+from\s*["']([^'"]+)["']"#),
];

/// A compiled reference pattern with a short name for logs and reports.
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    /// Short identifier such as `script` or `fetch`.
    pub name: &'static str,
    /// Compiled expression; group 1 is the reference path.
    pub regex: Regex,
}

/// Compile all reference patterns in application order.
///
/// # Errors
///
/// Returns `Error::Pattern` if any built-in expression fails to compile.
pub fn compile_reference_patterns() -> Result<Vec<ReferencePattern>, Error> {
    return PATTERN_SOURCES
        .iter()
        .map(|&(name, source)| -> Result<ReferencePattern, Error> {
            let regex = Regex::new(source)?;
            return Ok(ReferencePattern { name, regex });
        })
        .collect();
}
