// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where raw property payloads come from.
//!
//! A [`DataSource`] answers one question: "give me the bytes for property key
//! `k` at data version `v`". It knows nothing about inversion lists, caching,
//! or retries. Absence is `io::ErrorKind::NotFound`; anything else is a real
//! failure and is surfaced to the caller as such.
//!
//! ```text
//! PropertyLoader ──fetch(key, version)──▶ DataSource
//!                                           ├── DirectorySource  (<root>/<version>/<key>.uprop|.json)
//!                                           └── MemorySource     (embedded blobs, tests)
//! ```

mod dir;
mod memory;

pub use dir::DirectorySource;
pub use memory::MemorySource;

use std::io;
use std::sync::Arc;

/// A versioned store of serialized property payloads.
pub trait DataSource: Send + Sync {
    /// Fetch the payload for `key` at `version`.
    ///
    /// Returns `ErrorKind::NotFound` if the source has no such payload.
    fn fetch(&self, key: &str, version: &str) -> io::Result<Vec<u8>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn fetch(&self, key: &str, version: &str) -> io::Result<Vec<u8>> {
        (**self).fetch(key, version)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn fetch(&self, key: &str, version: &str) -> io::Result<Vec<u8>> {
        (**self).fetch(key, version)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Not-found error in the shape every source returns.
pub(crate) fn not_found(key: &str, version: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no payload for '{}' at version '{}'", key, version),
    )
}
