//! Fixture file parsing (YAML/JSON/JSONC).

use crate::config::error::FixtureError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fixture file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get fixture file type from path extension
pub fn get_file_type(path: &Path) -> FileType {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => FileType::Yaml,
        "json" => FileType::Json,
        "jsonc" => FileType::Jsonc,
        _ => FileType::Unknown,
    }
}

/// Strip `//` line comments and `/* */` block comments outside of JSON strings.
///
/// Line breaks ending a line comment are kept so error positions stay meaningful.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' || next == '\r' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, FixtureError> {
    serde_json::from_str(content).map_err(FixtureError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, FixtureError> {
    parse_json(&strip_json_comments(content))
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, FixtureError> {
    serde_yaml::from_str(content).map_err(FixtureError::from)
}

/// Parse content according to the file type of `path`
pub fn parse_file_content<T: DeserializeOwned>(
    content: &str,
    path: &Path,
) -> Result<T, FixtureError> {
    match get_file_type(path) {
        FileType::Yaml => parse_yaml(content),
        FileType::Json => parse_json(content),
        FileType::Jsonc => parse_jsonc(content),
        FileType::Unknown => Err(FixtureError::UnknownFileType(
            path.display().to_string(),
        )),
    }
}
