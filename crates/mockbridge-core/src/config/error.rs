//! Error types for fixture loading.

use crate::error::PatternError;
use std::fmt;

/// Fixture loading error
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io {
        path: String,
        source: std::io::Error,
    },
    /// JSON parsing error
    Json(serde_json::Error),
    /// YAML parsing error
    Yaml(serde_yaml::Error),
    /// Unknown file type
    UnknownFileType(String),
    /// Invalid glob pattern or unreadable match
    Glob(String),
    /// A fixture route has a template the router cannot compile
    Pattern(PatternError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Cannot read {}: {}", path, source),
            ConfigError::Json(e) => write!(f, "JSON parsing error: {}", e),
            ConfigError::Yaml(e) => write!(f, "YAML parsing error: {}", e),
            ConfigError::UnknownFileType(path) => write!(f, "Unknown file type: {}", path),
            ConfigError::Glob(detail) => write!(f, "Glob error: {}", detail),
            ConfigError::Pattern(e) => write!(f, "Invalid fixture route: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<PatternError> for ConfigError {
    fn from(err: PatternError) -> Self {
        ConfigError::Pattern(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_config_error_yaml_display() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: [").unwrap_err();
        let error = ConfigError::from(yaml_err);
        assert!(error.to_string().contains("YAML parsing error"));
        assert!(error.source().is_some());
    }

    #[rstest]
    #[case("routes.txt")]
    #[case("")]
    fn test_config_error_unknown_file_type_display(#[case] path: &str) {
        let error = ConfigError::UnknownFileType(path.to_string());
        let display = error.to_string();
        assert!(display.contains("Unknown file type"));
        assert!(display.contains(path));
        assert!(error.source().is_none());
    }

    #[rstest]
    fn test_config_error_pattern_source() {
        let error = ConfigError::from(PatternError::UnsupportedConverter {
            template: "/<hex:v>".into(),
            converter: "hex".into(),
        });
        assert!(error.to_string().starts_with("Invalid fixture route"));
        assert!(error.source().is_some());
    }
}
