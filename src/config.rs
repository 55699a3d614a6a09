use std::path::Path;

use crate::document::DEFAULT_MAX_FILE_BYTES;
use crate::error::Error;
use crate::locator::LocateStrategy;

/// Name of the project config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".snipscope.toml";

/// Project configuration loaded from `.snipscope.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source files larger than this are refused.
    pub max_file_bytes: u64,
    /// How symbols are located when scoping a search.
    pub strategy: LocateStrategy,
}

/// Raw TOML structure for `.snipscope.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SnipscopeTomlConfig {
    /// Optional override of the file size limit.
    max_file_bytes: Option<u64>,
    /// Optional override of the locate strategy.
    #[serde(default)]
    strategy: LocateStrategy,
}

impl Config {
    /// Load config from `.snipscope.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the user
    /// wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(Error::Io { path, source }),
        };
        return Self::parse(&content);
    }

    /// Load config from an explicit path, which must exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if the file is missing, `Error::Io` if it
    /// cannot be read, or `Error::TomlDe` if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                return Error::ConfigNotFound { path: path.to_path_buf() };
            }
            return Error::Io { path: path.to_path_buf(), source };
        })?;
        return Self::parse(&content);
    }

    /// Parse config text, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: SnipscopeTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            max_file_bytes: raw.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES),
            strategy: raw.strategy,
        });
    }
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            strategy: LocateStrategy::Auto,
        };
    }
}
