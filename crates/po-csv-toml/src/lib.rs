#![doc = include_str!("../README.md")]

use po_csv::{ConvertOptions, TableLayout};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the base directory.
pub const CONFIG_FILE_NAME: &str = "po-csv.toml";

#[derive(Debug, Error)]
pub enum PoCsvConfigError {
    /// Configuration file not found.
    #[error("po-csv.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A field holds a value the converter cannot use.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// The configuration for `po-csv`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PoCsvConfig {
    /// Catalog file extension, without the leading dot.
    pub extension: String,
    /// Header of the source-string column.
    pub msgid_column: String,
    /// Header of the fuzzy-marker column.
    pub fuzzy_column: String,
    /// Text written in the fuzzy column for fuzzy rows.
    pub fuzzy_marker: String,
    /// Order locale columns lexicographically instead of by discovery.
    pub sort_locales: bool,
}

impl Default for PoCsvConfig {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            extension: options.extension,
            msgid_column: options.layout.msgid_column,
            fuzzy_column: options.layout.fuzzy_column,
            fuzzy_marker: options.layout.fuzzy_marker,
            sort_locales: options.sort_locales,
        }
    }
}

impl PoCsvConfig {
    /// Reads and validates the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PoCsvConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PoCsvConfigError::NotFound);
        }

        let content = fs_err::read_to_string(path)?;
        let config: PoCsvConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise `po-csv.toml` in `base_dir` is
    /// read when present, and the defaults are used when it is not.
    pub fn resolve(explicit: Option<&Path>, base_dir: &Path) -> Result<Self, PoCsvConfigError> {
        if let Some(path) = explicit {
            return Self::read_from_path(path);
        }

        let candidate = base_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::read_from_path(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Check that the columns can be told apart and the marker is visible.
    pub fn validate(&self) -> Result<(), PoCsvConfigError> {
        let non_empty = [
            ("extension", &self.extension),
            ("msgid_column", &self.msgid_column),
            ("fuzzy_column", &self.fuzzy_column),
            ("fuzzy_marker", &self.fuzzy_marker),
        ];

        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(PoCsvConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if self.extension.starts_with('.') {
            return Err(PoCsvConfigError::InvalidValue {
                field: "extension",
                reason: format!("write '{}' without the leading dot", self.extension.trim_start_matches('.')),
            });
        }

        if self.msgid_column == self.fuzzy_column {
            return Err(PoCsvConfigError::InvalidValue {
                field: "fuzzy_column",
                reason: format!("must differ from msgid_column ('{}')", self.msgid_column),
            });
        }

        Ok(())
    }

    /// Column names and marker for the table file.
    pub fn layout(&self) -> TableLayout {
        TableLayout {
            msgid_column: self.msgid_column.clone(),
            fuzzy_column: self.fuzzy_column.clone(),
            fuzzy_marker: self.fuzzy_marker.clone(),
        }
    }

    /// Options for the conversion pipelines.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            extension: self.extension.clone(),
            sort_locales: self.sort_locales,
            layout: self.layout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config_content = r#"
msgid_column = "source"
fuzzy_marker = "~"
sort_locales = false
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = PoCsvConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.msgid_column, "source");
        assert_eq!(config.fuzzy_column, "fuzzy?");
        assert_eq!(config.fuzzy_marker, "~");
        assert_eq!(config.extension, "po");
        assert!(!config.sort_locales);
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let non_existent_path = Path::new("/non/existent/path/po-csv.toml");
        let result = PoCsvConfig::read_from_path(non_existent_path);
        assert!(matches!(result, Err(PoCsvConfigError::NotFound)));
    }

    #[test]
    fn test_read_from_path_unknown_field() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "msgid_colum = \"typo\"\n").unwrap();

        let result = PoCsvConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(PoCsvConfigError::ParseError(_))));
    }

    #[rstest]
    #[case::empty_extension("extension = \"\"", "extension")]
    #[case::dotted_extension("extension = \".po\"", "extension")]
    #[case::blank_marker("fuzzy_marker = \" \"", "fuzzy_marker")]
    #[case::same_columns("fuzzy_column = \"msgid\"", "fuzzy_column")]
    fn test_read_from_path_invalid_value(#[case] content: &str, #[case] expected_field: &str) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, content).unwrap();

        let result = PoCsvConfig::read_from_path(&config_path);
        assert!(matches!(
            result,
            Err(PoCsvConfigError::InvalidValue { field, .. }) if field == expected_field
        ));
    }

    #[test]
    fn test_resolve_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = PoCsvConfig::resolve(None, temp_dir.path()).unwrap();
        assert_eq!(config, PoCsvConfig::default());
        assert_eq!(config.convert_options(), ConvertOptions::default());
    }

    #[test]
    fn test_resolve_reads_base_dir_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "extension = \"pot\"\n").unwrap();

        let config = PoCsvConfig::resolve(None, temp_dir.path()).unwrap();
        assert_eq!(config.convert_options().extension, "pot");
    }

    #[test]
    fn test_resolve_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = PathBuf::from("/non/existent/custom.toml");

        let result = PoCsvConfig::resolve(Some(&missing), temp_dir.path());
        assert!(matches!(result, Err(PoCsvConfigError::NotFound)));
    }

    #[test]
    fn test_layout_from_config() {
        let config = PoCsvConfig {
            msgid_column: "source".to_string(),
            fuzzy_column: "review".to_string(),
            fuzzy_marker: "?".to_string(),
            ..PoCsvConfig::default()
        };

        let layout = config.layout();
        assert_eq!(layout.headers(&["fr"]), vec!["source", "review", "fr"]);
        assert_eq!(layout.fuzzy_marker, "?");
    }
}
