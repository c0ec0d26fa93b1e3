//! Fixture file parsing (YAML/JSON/JSONC) and glob loading.

use crate::app::App;
use crate::config::error::ConfigError;
use crate::config::fixture::{FixtureFile, FixtureRoute};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip `//` and `/* */` comments outside string literals.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // Line comment: keep the newline that ends it
                for next in chars.by_ref() {
                    if next == '\n' || next == '\r' {
                        result.push(next);
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Read and parse one fixture file.
pub fn load_fixture_file(path: &Path) -> Result<FixtureFile, ConfigError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;
    parse_config(&content, &display)
}

/// Load fixture routes from every file matching `pattern`.
///
/// Files are read in sorted path order and their routes concatenated, so
/// rule order is stable across runs.
pub fn load_fixtures(pattern: &str) -> Result<Vec<FixtureRoute>, ConfigError> {
    let mut paths = glob::glob(pattern)
        .map_err(|e| ConfigError::Glob(format!("{pattern}: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Glob(e.to_string()))?;
    paths.sort();

    if paths.is_empty() {
        return Err(ConfigError::Glob(format!("{pattern}: no files matched")));
    }

    let mut routes = Vec::new();
    for path in paths {
        let file = load_fixture_file(&path)?;
        tracing::debug!(path = %path.display(), routes = file.routes.len(), "loaded fixture file");
        routes.extend(file.routes);
    }
    Ok(routes)
}

/// Load fixtures matching `pattern` into an [`App`].
pub fn load_fixture_app(pattern: &str) -> Result<App, ConfigError> {
    Ok(App::from_fixtures(load_fixtures(pattern)?)?)
}
