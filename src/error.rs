/// Crate-level error types for url-postfix diagnostics.
use std::path::PathBuf;

/// Every error names the file it was working on so the rendered diagnostic
/// can point at it directly. All variants abort the run before any write.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base directory does not exist or is not a directory.
    #[error("base directory not found: {}", path.display())]
    BaseDirNotFound {
        /// Absolute path that was expected to be a directory.
        path: PathBuf,
    },

    /// A target HTML document could not be read as UTF-8 text.
    #[error("cannot read document {}: {source}", path.display())]
    DocumentUnreadable {
        /// Path of the document.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The rewritten document could not be written back.
    #[error("cannot write document {}: {source}", path.display())]
    DocumentUnwritable {
        /// Path of the document.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// Neither the command line nor `.postfix.toml` named a document.
    #[error("no target files given (use --file or `files` in .postfix.toml)")]
    NoTargetFiles,

    /// One of the built-in reference patterns failed to compile.
    #[error("invalid reference pattern: {0}")]
    Pattern(
        /// The wrapped regex error.
        #[from]
        regex::Error,
    ),

    /// A reference resolved to a file that could not be read for hashing.
    #[error(
        "cannot read `{reference}` ({}) referenced from {}: {source}",
        path.display(),
        document.display()
    )]
    ReferenceUnreadable {
        /// Document containing the reference.
        document: PathBuf,
        /// Filesystem location the reference resolved to.
        path: PathBuf,
        /// Reference path as written in the document, postfix stripped.
        reference: String,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// `.postfix.toml` exists but is malformed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
