//! Mapping captured reference paths onto local files.

use std::path::PathBuf;

use crate::types::ResolutionContext;

/// Whether `c` counts as a word character in a postfix (`[\w_]`).
fn is_postfix_char(c: char) -> bool {
    return c == '_' || c.is_alphanumeric();
}

/// Resolve a postfix-free reference path to the file it names.
///
/// Rules, first match wins:
/// 1. `/`-rooted: under the base directory.
/// 2. Starts with the base URL: the remainder under the base directory.
/// 3. Starts with `.`: under the document directory.
/// 4. Anything else: under the document directory, only if it exists.
///
/// `None` means the reference is external or otherwise not a local file and
/// must be left untouched. Rules 1 to 3 do not check existence, so a missing
/// file there surfaces later as a read error.
pub fn resolve_reference_path(path: &str, context: &ResolutionContext) -> Option<PathBuf> {
    if let Some(rest) = path.strip_prefix('/') {
        return Some(context.base_dir.join(rest.trim_start_matches('/')));
    }

    if let Some(base_url) = context.base_url.as_deref()
        && let Some(rest) = path.strip_prefix(base_url)
    {
        return Some(context.base_dir.join(rest.trim_start_matches('/')));
    }

    if path.starts_with('.') {
        return Some(context.document_dir.join(path));
    }

    let candidate = context.document_dir.join(path);
    if candidate.exists() {
        return Some(candidate);
    }
    return None;
}

/// Remove a trailing `?` query made only of word characters.
/// Anything else after the last `?` (such as `?v=2`) is kept.
pub fn strip_postfix(path: &str) -> &str {
    let Some((stem, query)) = path.rsplit_once('?') else {
        return path;
    };
    if !query.is_empty() && query.chars().all(is_postfix_char) {
        return stem;
    }
    return path;
}
