//! Property data loader: fetch, validate, cache.
//!
//! The loader sits between the directory and a [`DataSource`]. It turns a
//! `(key, version)` pair into a validated boundary sequence exactly once per
//! process and hands out the cached record from then on. The data source is
//! touched only on the first successful load of a key.
//!
//! Failures are never cached. A missing or corrupt payload returns an error and
//! leaves the slot empty, so a later call (after the data was fixed) goes back
//! to the source.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::binary::decode_payload;
use crate::cache::{Lookup, OnceMap};
use crate::error::{PropsError, Result};
use crate::provider::DataSource;
use crate::set::InversionList;

/// One successfully loaded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub key: String,
    pub version: String,
    pub boundaries: Arc<[u32]>,
}

impl PropertyRecord {
    /// View the record as a set. Shares the boundary allocation.
    pub fn to_set(&self) -> InversionList {
        InversionList::from_shared(Arc::clone(&self.boundaries))
    }
}

/// Counters for loader activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderStats {
    /// Calls that reached the data source.
    pub fetches: u64,
    /// Calls answered from the cache.
    pub hits: u64,
    /// Calls that returned an error.
    pub failures: u64,
}

type CacheKey = (String, String);

/// Caching loader over a data source.
pub struct PropertyLoader {
    source: Box<dyn DataSource>,
    cache: OnceMap<CacheKey, Arc<PropertyRecord>>,
    fetches: AtomicU64,
    hits: AtomicU64,
    failures: AtomicU64,
}

impl PropertyLoader {
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: OnceMap::new(),
            fetches: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Load `key` at `version`, from cache when possible.
    pub fn load(&self, key: &str, version: &str) -> Result<Arc<PropertyRecord>> {
        let cache_key = (key.to_string(), version.to_string());
        let result = self
            .cache
            .get_or_try_insert(&cache_key, || self.fetch_and_decode(key, version));

        match result {
            Ok((record, Lookup::Hit)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(record)
            }
            Ok((record, Lookup::Miss)) => Ok(record),
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// True if `key` at `version` has been loaded successfully.
    pub fn is_cached(&self, key: &str, version: &str) -> bool {
        self.cache
            .contains(&(key.to_string(), version.to_string()))
    }

    /// Number of cached records.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn stats(&self) -> LoaderStats {
        LoaderStats {
            fetches: self.fetches.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Description of the underlying data source.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn fetch_and_decode(&self, key: &str, version: &str) -> Result<Arc<PropertyRecord>> {
        debug!(key, version, source = %self.source.describe(), "fetching property payload");
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let bytes = self.source.fetch(key, version).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PropsError::DataNotFound {
                    key: key.to_string(),
                    version: version.to_string(),
                }
            } else {
                warn!(key, version, error = %e, "data source failed");
                PropsError::Source {
                    key: key.to_string(),
                    version: version.to_string(),
                    source: e,
                }
            }
        })?;

        let boundaries = decode_payload(&bytes).map_err(|reason| {
            warn!(key, version, %reason, "rejecting corrupt property payload");
            PropsError::corrupt(key, version, reason)
        })?;

        debug!(
            key,
            version,
            bytes = bytes.len(),
            ranges = boundaries.len() / 2,
            "loaded property payload"
        );

        Ok(Arc::new(PropertyRecord {
            key: key.to_string(),
            version: version.to_string(),
            boundaries: boundaries.into(),
        }))
    }
}

impl std::fmt::Debug for PropertyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyLoader")
            .field("source", &self.source.describe())
            .field("cached", &self.cache.len())
            .field("stats", &self.stats())
            .finish()
    }
}
