// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::io;

use parking_lot::RwLock;

use super::{not_found, DataSource};

/// In-memory payload store keyed by `(key, version)`.
///
/// Entries can be replaced at any time, which is how tests simulate a source
/// whose data gets fixed between two loads.
#[derive(Debug, Default)]
pub struct MemorySource {
    entries: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(self, key: &str, version: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(key, version, bytes);
        self
    }

    /// Insert or replace a payload.
    pub fn insert(&self, key: &str, version: &str, bytes: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .insert((key.to_string(), version.to_string()), bytes.into());
    }

    /// Remove a payload, returning it if present.
    pub fn remove(&self, key: &str, version: &str) -> Option<Vec<u8>> {
        self.entries
            .write()
            .remove(&(key.to_string(), version.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, key: &str, version: &str) -> io::Result<Vec<u8>> {
        self.entries
            .read()
            .get(&(key.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| not_found(key, version))
    }

    fn describe(&self) -> String {
        format!("memory ({} payloads)", self.len())
    }
}
