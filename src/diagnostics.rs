use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold for markdown headings.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is
/// something the user can change, a `## Fix` section.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::BaseDirNotFound { path } => render_base_dir_not_found(path),
        Error::DocumentUnreadable { path, source } => format!(
            "\
# Error: Document Unreadable

Cannot read `{}`: {source}

No files were modified.
",
            path.display()
        ),
        Error::DocumentUnwritable { path, source } => format!(
            "\
# Error: Document Unwritable

Cannot write `{}`: {source}
",
            path.display()
        ),
        Error::Io(err) => format!(
            "\
# Error: I/O

{err}
"
        ),
        Error::NoTargetFiles => render_no_target_files(),
        Error::Pattern(err) => format!(
            "\
# Error: Invalid Reference Pattern

{err}
"
        ),
        Error::ReferenceUnreadable {
            document,
            path,
            reference,
            source,
        } => render_reference_unreadable(document, path, reference, source),
        Error::TomlDe(err) => format!(
            "\
# Error: Invalid TOML

`{CONFIG_FILE}` could not be parsed:

{err}
"
        ),
    };
}

/// The base directory does not exist.
fn render_base_dir_not_found(path: &Path) -> String {
    return format!(
        "\
# Error: Base Directory Not Found

`{}` is not a directory.

## Fix

Pass the site root with `--base-dir`.
",
        path.display()
    );
}

/// No document named anywhere.
fn render_no_target_files() -> String {
    return format!(
        "\
# Error: No Target Files

Nothing to rewrite.

## Fix

Name a document on the command line:

    url-postfix --base-dir site --file index.html

Or list documents in `{CONFIG_FILE}` inside the base directory:

    files = [\"index.html\"]
"
    );
}

/// A reference points at a file that cannot be hashed.
fn render_reference_unreadable(
    document: &Path,
    path: &Path,
    reference: &str,
    source: &std::io::Error,
) -> String {
    return format!(
        "\
# Error: Referenced File Unreadable

`{reference}` in `{}` resolves to `{}`: {source}

No files were modified.

## Fix

Create the missing file, or correct the reference. References that start
with `/`, `.` or the base URL must point at a local file.
",
        document.display(),
        path.display()
    );
}
