//! Configuration file handling for build defaults.
//!
//! This module provides loading and parsing of `.sql_schema.json` configuration files.
//! Every field is optional; command-line flags take precedence over file values.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::DirectiveRegistry;

/// Config file looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".sql_schema.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Database every table is qualified with
    pub database: Option<String>,
    /// Prepended to every table name
    pub table_prefix: Option<String>,
    /// Name of the extraction directive
    pub directive: Option<String>,
    /// Name of the suppression directive
    pub suppress_directive: Option<String>,
    /// File the script is written to
    pub output: Option<PathBuf>,
}

impl ConfigFile {
    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist or cannot be read
    /// - The JSON is invalid or contains unknown fields
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load `.sql_schema.json` from `dir` if it exists.
    pub fn load_default_in(dir: &Path) -> Result<Option<Self>, Box<dyn Error>> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load the explicit config if given, otherwise the default one in `dir`,
    /// otherwise an empty configuration.
    pub fn load_in(explicit: Option<&Path>, dir: &Path) -> Result<Self, Box<dyn Error>> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Ok(Self::load_default_in(dir)?.unwrap_or_default()),
        }
    }

    /// [`load_in`](Self::load_in) relative to the current directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        Self::load_in(explicit, Path::new("."))
    }

    /// Directive registry built from the configured names, falling back to
    /// `sql` / `sqlSkip`. Explicit arguments win over the file.
    pub fn registry(&self, directive: Option<&str>, suppress_directive: Option<&str>) -> DirectiveRegistry {
        let directive = directive.or(self.directive.as_deref());
        let suppress_directive = suppress_directive.or(self.suppress_directive.as_deref());

        match (directive, suppress_directive) {
            (None, None) => DirectiveRegistry::default(),
            (d, s) => DirectiveRegistry::named(
                d.unwrap_or(crate::schema::DEFAULT_DIRECTIVE),
                s.unwrap_or(crate::schema::DEFAULT_SUPPRESS_DIRECTIVE),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DirectiveBehavior;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[rstest]
    fn test_full_deserialization() {
        let json = r#"
        {
            "database": "dbname",
            "table_prefix": "test_",
            "directive": "db",
            "suppress_directive": "dbSkip",
            "output": "out/schema.sql"
        }
        "#;
        let config: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(config.database.as_deref(), Some("dbname"));
        assert_eq!(config.table_prefix.as_deref(), Some("test_"));
        assert_eq!(config.output, Some(PathBuf::from("out/schema.sql")));
    }

    #[rstest]
    fn test_every_field_is_optional() {
        let config: ConfigFile = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[rstest]
    fn test_unknown_field_is_rejected() {
        let result: Result<ConfigFile, _> = serde_json::from_str(r#"{ "prefix": "x" }"#);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "database": "app" }}"#).unwrap();

        let config = ConfigFile::load_from(file.path()).unwrap();
        assert_eq!(config.database.as_deref(), Some("app"));
    }

    #[rstest]
    fn test_load_from_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ConfigFile::load_from(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in "));
    }

    #[rstest]
    fn test_explicit_missing_file_is_an_error() {
        let err = ConfigFile::load(Some(Path::new("/nonexistent/.sql_schema.json"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read "));
    }

    #[rstest]
    fn test_default_file_absent_yields_empty_config() {
        let dir = tempdir().unwrap();

        assert!(ConfigFile::load_default_in(dir.path()).unwrap().is_none());
        assert_eq!(ConfigFile::load_in(None, dir.path()).unwrap(), ConfigFile::default());
    }

    #[rstest]
    fn test_default_file_is_picked_up() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "database": "app", "table_prefix": "t_" }"#,
        )
        .unwrap();

        let config = ConfigFile::load_in(None, dir.path()).unwrap();
        assert_eq!(config.database.as_deref(), Some("app"));
        assert_eq!(config.table_prefix.as_deref(), Some("t_"));
    }

    #[rstest]
    fn test_invalid_default_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[]").unwrap();

        let err = ConfigFile::load_in(None, dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON in "));
    }

    #[rstest]
    fn test_explicit_file_wins_over_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), r#"{ "database": "default" }"#).unwrap();
        let mut explicit = NamedTempFile::new().unwrap();
        write!(explicit, r#"{{ "database": "explicit" }}"#).unwrap();

        let config = ConfigFile::load_in(Some(explicit.path()), dir.path()).unwrap();
        assert_eq!(config.database.as_deref(), Some("explicit"));
    }

    #[rstest]
    fn test_registry_defaults() {
        let registry = ConfigFile::default().registry(None, None);
        assert_eq!(registry, DirectiveRegistry::default());
    }

    #[rstest]
    fn test_registry_argument_overrides_file() {
        let config = ConfigFile {
            directive: Some("db".to_string()),
            ..Default::default()
        };
        let registry = config.registry(Some("col"), None);
        assert_eq!(registry.behavior("col"), Some(DirectiveBehavior::Extract));
        assert_eq!(registry.behavior("db"), None);
        assert_eq!(registry.behavior("sqlSkip"), Some(DirectiveBehavior::Suppress));
    }
}
