// Recursively walks a base directory for `fancy_tests.toml` manifests
// and turns their entries into command-style test cases.

use crate::test_case::{TestCase, TestSuite};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::read_dir;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_NAME: &str = "fancy_tests.toml";

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Deserialize, Debug)]
struct ManifestToml {
    /// Group description for the verbose header; defaults to the
    /// manifest directory relative to the base folder.
    suite: Option<String>,

    // BTreeMap so cases come out in name order.
    #[serde(default)]
    tests: BTreeMap<String, ManifestEntry>,
}

#[derive(Deserialize, Debug)]
struct ManifestEntry {
    command: String,

    #[serde(default)]
    return_code: i32,

    description: Option<String>,

    #[serde(default)]
    skip: SkipField,

    #[serde(default)]
    xfail: bool,
}

/// `skip = true` or `skip = "reason"`.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SkipField {
    Flag(bool),
    Reason(String),
}

impl Default for SkipField {
    fn default() -> Self {
        SkipField::Flag(false)
    }
}

impl SkipField {
    fn into_reason(self) -> Option<String> {
        match self {
            SkipField::Flag(false) => None,
            SkipField::Flag(true) => Some(String::new()),
            SkipField::Reason(reason) => Some(reason),
        }
    }
}

pub fn detect_tests(base_dir: &Path) -> Result<TestSuite, DetectError> {
    let mut suite = TestSuite::new();
    detect_tests_in(&mut suite, base_dir, base_dir)?;
    Ok(suite)
}

fn detect_tests_in(
    suite: &mut TestSuite,
    base_dir: &Path,
    current_dir: &Path,
) -> Result<(), DetectError> {
    let entries = read_dir(current_dir).map_err(|source| DetectError::Io {
        path: current_dir.to_path_buf(),
        source,
    })?;

    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();
    for dir in subdirs {
        detect_tests_in(suite, base_dir, &dir)?;
    }

    let manifest_path = current_dir.join(MANIFEST_NAME);
    let text = match std::fs::read_to_string(&manifest_path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(DetectError::Io {
                path: manifest_path,
                source,
            })
        }
    };
    let manifest: ManifestToml = toml::from_str(&text).map_err(|source| DetectError::Parse {
        path: manifest_path,
        source,
    })?;

    let relative = current_dir
        .strip_prefix(base_dir)
        .unwrap_or(current_dir)
        .display()
        .to_string();
    let group = manifest
        .suite
        .unwrap_or_else(|| if relative.is_empty() { ".".to_string() } else { relative.clone() });

    for (name, entry) in manifest.tests {
        let full_name = if relative.is_empty() {
            name
        } else {
            format!("{relative}/{name}")
        };
        let command = entry
            .command
            .replace("{dir}", &current_dir.display().to_string());

        let mut case = TestCase::command(full_name, command, entry.return_code, current_dir)
            .in_group(group.clone());
        case.description = entry.description;
        case.skip = entry.skip.into_reason();
        case.xfail = entry.xfail;
        suite.add(case);
    }

    Ok(())
}
