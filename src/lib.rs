//! Unicode binary property sets backed by cached, validated inversion lists.
//!
//! Ask "does code point X have property P?" for any of the supported binary
//! properties (White_Space, Alphabetic, Emoji, XID_Start, ...). Each property
//! is an immutable inversion list: membership is a binary search, iteration is
//! a walk over sorted ranges. Property data is fetched from a versioned data
//! source once per process and shared from then on.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────┐   ┌──────────────┐
//! │  facade.rs   │──▶│   directory.rs   │──▶│   loader.rs    │──▶│  provider/   │
//! │ (PropertySet)│   │ (per-property    │   │ (fetch, decode,│   │ (DataSource) │
//! │              │   │  cache, derived) │   │  cache records)│   │              │
//! └──────────────┘   └──────────────────┘   └────────────────┘   └──────────────┘
//!                             │                     │
//!                             ▼                     ▼
//!                    ┌──────────────────┐   ┌────────────────┐
//!                    │ set/ (Inversion- │◀──│   binary/      │
//!                    │ List, builder,   │   │ (.uprop, text  │
//!                    │ algebra)         │   │  dump codecs)  │
//!                    └──────────────────┘   └────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use uniprops::{BinaryProperty, PropertyDirectory, PropertySet, DirectorySource};
//!
//! let dir = PropertyDirectory::new(DirectorySource::new("data/uprops"), "v1");
//! let ws = PropertySet::new(&dir, BinaryProperty::WhiteSpace)?;
//! assert!(ws.contains_char(' '));
//! for (start, end) in ws.iter_ranges() { /* [start, end) */ }
//! ```

// Module declarations
pub mod binary;
mod cache;
pub mod config;
mod directory;
mod error;
mod facade;
mod loader;
pub mod property;
pub mod provider;
pub mod set;
pub mod testing;
pub mod types;
pub mod verify;

// Re-exports for public API
pub use binary::{decode_payload, encode_payload, read_payload, Payload, PayloadFlags, PropertyDump};
pub use cache::{Lookup, OnceMap};
pub use config::Config;
pub use directory::PropertyDirectory;
pub use error::{CorruptReason, PropsError, Result};
pub use facade::PropertySet;
pub use loader::{LoaderStats, PropertyLoader, PropertyRecord};
pub use property::{BinaryProperty, PropertyInfo, Source};
pub use provider::{DataSource, DirectorySource, MemorySource};
pub use set::{InversionList, InversionListBuilder, Ranges};
pub use types::{CodePointRange, CODE_POINT_DOMAIN_END, MAX_CODE_POINT};
