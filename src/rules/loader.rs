use crate::rules::schema::{RuleTables, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Io { .. } => self,
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read rule tables from {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse rule tables TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse rule tables TOML: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "invalid rule tables ({}): {}", path.display(), source),
                None => write!(f, "invalid rule tables: {}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<RuleTables, ConfigError> {
    let tables: RuleTables = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    tables
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(tables)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<RuleTables, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_tables() {
        let input = r#"
protected = ["Old Brand Classic"]
skip_folders = ["media", "archive"]

[[first_mention]]
term = "Old Brand"
first = "New Brand"
subsequent = "Brand"

[[compound]]
search = "Old Brand portal"
replace = "New Brand portal"

[[cleanup]]
search = "an New"
replace = "a New"
"#;
        let tables = load_from_str(input).unwrap();
        assert_eq!(tables.first_mention.len(), 1);
        assert_eq!(tables.first_mention[0].term, "Old Brand");
        assert_eq!(tables.compound.len(), 1);
        assert_eq!(tables.cleanup.len(), 1);
        assert_eq!(tables.protected, vec!["Old Brand Classic"]);
        assert_eq!(tables.skip_folders, vec!["media", "archive"]);
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let input = r#"
[[compound]]
search = "Old"
replace = "New"
"#;
        let tables = load_from_str(input).unwrap();
        assert!(tables.first_mention.is_empty());
        assert!(tables.cleanup.is_empty());
        assert!(tables.protected.is_empty());
    }

    #[test]
    fn test_missing_column_is_toml_error() {
        // A first_mention row without `subsequent` is a malformed rule row:
        // fatal at load time, before any document is touched.
        let input = r#"
[[first_mention]]
term = "Old Brand"
first = "New Brand"
"#;
        let err = load_from_str(input).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_empty_tables_is_validation_error() {
        let err = load_from_str("").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_load_from_path_annotates_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        fs::write(&path, "not valid toml [").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("rules.toml"));
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let err = load_from_path("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
