//! Mock fixture files.
//!
//! A fixture file holds a list of `{options, reply}` pairs, each registered as one mock.

use crate::config::error::FixtureError;
use crate::config::parser::parse_file_content;
use crate::options::{CallbackArgs, RequestOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One canned response loaded from a fixture file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockFixture {
    /// Request options the reply is registered for
    pub options: RequestOptions,
    /// Callback arguments replayed on a match
    pub reply: CallbackArgs,
}

/// Load fixtures from a single file
pub fn load_fixture_file(path: &Path) -> Result<Vec<MockFixture>, FixtureError> {
    let content = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fixtures: Vec<MockFixture> = parse_file_content(&content, path)?;
    debug!(path = %path.display(), count = fixtures.len(), "parsed fixture file");
    Ok(fixtures)
}

/// Load fixtures from every file matching `pattern`.
///
/// `pattern` is a path or a glob. Files are read in sorted path order and fixtures keep
/// their order within a file, so later fixtures win when keys collide.
pub fn load_fixtures(pattern: &str) -> Result<Vec<MockFixture>, FixtureError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<PathBuf>, _>>()?;
    paths.retain(|path| path.is_file());
    if paths.is_empty() {
        return Err(FixtureError::NoFiles(pattern.to_string()));
    }
    paths.sort();

    let mut fixtures = Vec::new();
    for path in &paths {
        fixtures.extend(load_fixture_file(path)?);
    }
    Ok(fixtures)
}
