// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Payloads stored as files under a data root.
//!
//! Layout: `<root>/<version>/<key>.uprop` (binary), falling back to the text
//! dumps `<root>/<version>/<key>.toml` and then `<root>/<version>/<key>.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::{not_found, DataSource};

/// File extensions tried in order.
const EXTENSIONS: [&str; 3] = ["uprop", "toml", "json"];

/// Reads payloads from a directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths for `key` at `version`, or `None` if either would
    /// escape the data root.
    fn candidates(&self, key: &str, version: &str) -> Option<Vec<PathBuf>> {
        if !is_plain_component(key) || !is_plain_component(version) {
            return None;
        }
        let dir = self.root.join(version);
        Some(
            EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{}", key, ext)))
                .collect(),
        )
    }
}

impl DataSource for DirectorySource {
    fn fetch(&self, key: &str, version: &str) -> io::Result<Vec<u8>> {
        let Some(paths) = self.candidates(key, version) else {
            return Err(not_found(key, version));
        };

        for path in paths {
            trace!("Reading: {:?}", path);
            match fs::read(&path) {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }
        Err(not_found(key, version))
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// Non-empty, no separators, not `.` or `..`.
fn is_plain_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\']) && !s.contains("..")
}
