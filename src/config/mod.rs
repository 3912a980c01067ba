//! Build configuration produced by the configure step.
//!
//! `config.gypi` at the root of the source tree holds two mappings:
//! `variables` (the resolved build flags) and `target_defaults`. Both are
//! loaded once and never modified.
pub mod gypi;

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Name of the configuration file inside the source root.
pub const CONFIG_FILE: &str = "config.gypi";

#[derive(Deserialize)]
struct RawConfig {
    variables: Option<Value>,
    target_defaults: Option<Value>,
}

/// Immutable build configuration.
///
/// Flags are compared against the literal strings `"true"` and `"false"`.
/// A flag that is absent, or not a string, is neither true nor false, so
/// callers must pick the right predicate for the default they want.
///
/// # Examples
///
/// ```
/// use node_install::config::BuildConfig;
///
/// let config = BuildConfig::parse(
///     "{'variables': {'node_shared': 'false'}, 'target_defaults': {}}",
///     std::path::Path::new("config.gypi"),
/// )
/// .unwrap();
/// assert!(config.is_false("node_shared"));
/// assert!(!config.is_true("node_shared"));
/// assert!(!config.is_false("node_shared_zlib"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildConfig {
    variables: Map<String, Value>,
    target_defaults: Map<String, Value>,
}

impl BuildConfig {
    /// Load `config.gypi` from `source_root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, and the errors
    /// of [`BuildConfig::parse`] if its content is invalid.
    pub fn load(source_root: &Path) -> Result<Self, ConfigError> {
        let path = source_root.join(CONFIG_FILE);
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse gypi text; `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid literal and
    /// [`ConfigError::MissingSection`] if either mapping is absent or is not
    /// a dictionary.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let json = gypi::to_json(content).map_err(|e| parse_error(e.to_string()))?;
        let raw: RawConfig = serde_json::from_str(&json).map_err(|e| parse_error(e.to_string()))?;

        Ok(Self {
            variables: section(raw.variables, "variables")?,
            target_defaults: section(raw.target_defaults, "target_defaults")?,
        })
    }

    /// The string value of a build variable, if it is set to a string.
    #[must_use]
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).and_then(Value::as_str)
    }

    /// Whether `key` is set to exactly `"true"`.
    #[must_use]
    pub fn is_true(&self, key: &str) -> bool {
        self.variable(key) == Some("true")
    }

    /// Whether `key` is set to exactly `"false"`.
    #[must_use]
    pub fn is_false(&self, key: &str) -> bool {
        self.variable(key) == Some("false")
    }

    /// All build variables.
    #[must_use]
    pub const fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// The `target_defaults` mapping.
    #[must_use]
    pub const fn target_defaults(&self) -> &Map<String, Value> {
        &self.target_defaults
    }
}

fn section(value: Option<Value>, name: &str) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(ConfigError::MissingSection(name.to_string())),
    }
}
