//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::binary::{encode_payload, PayloadFlags, PropertyDump};
use crate::provider::{DataSource, MemorySource};
use crate::set::InversionList;

/// Binary payload for a raw boundary list. Panics if the list is not canonical.
pub fn payload(boundaries: &[u32]) -> Vec<u8> {
    let set = InversionList::try_from_boundaries(boundaries.to_vec())
        .unwrap_or_else(|e| panic!("test boundaries not canonical: {}", e));
    encode_payload(&set, PayloadFlags::new())
        .unwrap_or_else(|e| panic!("encoding test payload failed: {}", e))
}

/// JSON dump whose `serialized` field is `boundaries`, taken verbatim.
///
/// Nothing is validated, so this is how tests produce corrupt payloads.
pub fn raw_json_payload(boundaries: &[u32]) -> Vec<u8> {
    let list: Vec<String> = boundaries.iter().map(u32::to_string).collect();
    format!(
        r#"{{"unicode_set":{{"data":{{"long_name":"","name":"","serialized":[{}],"ranges":[]}}}}}}"#,
        list.join(",")
    )
    .into_bytes()
}

/// JSON dump built from half-open ranges.
pub fn json_payload(ranges: &[(u32, u32)], long_name: &str, name: &str) -> Vec<u8> {
    let set = InversionList::from_ranges(ranges.iter().copied());
    PropertyDump::from_set(&set, long_name, name)
        .to_json()
        .unwrap_or_else(|e| panic!("serializing test dump failed: {}", e))
        .into_bytes()
}

/// TOML dump built from half-open ranges, in the upstream dump layout.
pub fn toml_payload(ranges: &[(u32, u32)], long_name: &str, name: &str) -> Vec<u8> {
    let set = InversionList::from_ranges(ranges.iter().copied());
    PropertyDump::from_set(&set, long_name, name)
        .to_toml()
        .unwrap_or_else(|e| panic!("serializing test dump failed: {}", e))
        .into_bytes()
}

/// In-memory source that counts fetches, for asserting cache behavior.
///
/// Cloning shares the payloads and the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingSource {
    inner: Arc<MemorySource>,
    fetches: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a binary payload for `boundaries`.
    pub fn with(self, key: &str, version: &str, boundaries: &[u32]) -> Self {
        self.inner.insert(key, version, payload(boundaries));
        self
    }

    /// Builder-style insert of arbitrary bytes.
    pub fn with_bytes(self, key: &str, version: &str, bytes: Vec<u8>) -> Self {
        self.inner.insert(key, version, bytes);
        self
    }

    /// Sleep this long inside every fetch, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace a payload after construction.
    pub fn set_bytes(&self, key: &str, version: &str, bytes: Vec<u8>) {
        self.inner.insert(key, version, bytes);
    }

    /// Number of `fetch` calls so far, successful or not.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DataSource for CountingSource {
    fn fetch(&self, key: &str, version: &str) -> io::Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.inner.fetch(key, version)
    }

    fn describe(&self) -> String {
        format!("counting {}", self.inner.describe())
    }
}

/// Source whose every fetch fails with a non-"not found" I/O error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSource;

impl DataSource for FailingSource {
    fn fetch(&self, _key: &str, _version: &str) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"))
    }
}
