use std::path::{Path, PathBuf};

use crate::error::Error;

/// Name of the optional project config inside the base directory.
pub const CONFIG_FILE: &str = ".postfix.toml";

/// Project configuration loaded from `.postfix.toml`.
/// Command-line flags take precedence over every field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// URL prefix that maps onto the base directory.
    pub base_url: Option<String>,
    /// Documents to rewrite, relative to the base directory.
    pub files: Vec<PathBuf>,
}

/// Raw TOML structure for `.postfix.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PostfixTomlConfig {
    /// Optional base URL prefix.
    #[serde(default)]
    base_url: Option<String>,
    /// Default target documents.
    #[serde(default)]
    files: Vec<PathBuf>,
}

impl Config {
    /// Load config from `.postfix.toml` in the given base directory.
    /// Returns an empty config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(base_dir: &Path) -> Result<Self, Error> {
        let path = base_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: PostfixTomlConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded project config");
        return Ok(Self {
            base_url: raw.base_url.filter(|url| return !url.is_empty()),
            files: raw.files,
        });
    }
}
