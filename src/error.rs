//! Error types for property lookup, loading, and set construction.
//!
//! Two layers. `CorruptReason` says exactly what was structurally wrong with a
//! boundary sequence or a serialized payload; it is produced by the codec and
//! by the validating set constructor, neither of which knows which property it
//! is looking at. `PropsError` is what callers see: it names the property key
//! and data version and wraps the reason.
//!
//! A failed load never yields an empty set. If you got `Ok`, the set is real.

use std::fmt;
use std::io;

/// Structural validation failure in a boundary sequence or payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    /// Boundary sequence has an odd number of entries.
    OddLength { len: usize },
    /// `boundaries[position] <= boundaries[position - 1]`.
    NotIncreasing { position: usize, prev: u32, next: u32 },
    /// Boundary value above the end of the code point domain.
    OutOfDomain { position: usize, value: u32 },
    /// Inclusive range with `start > end` in a range-list payload.
    InvertedRange { start: u32, end: u32 },
    /// Payload header magic did not match.
    BadMagic { found: [u8; 4] },
    /// Payload footer magic did not match.
    BadFooter { found: [u8; 4] },
    /// Payload format version this build cannot read.
    UnsupportedVersion { version: u8 },
    /// Flag bits this build does not understand.
    UnknownFlags { flags: u8 },
    /// Payload ended before the declared content.
    Truncated { needed: usize, available: usize },
    /// Bytes left over after the declared boundaries.
    TrailingBytes { count: usize },
    /// CRC32 over header and body did not match the footer.
    ChecksumMismatch { expected: u32, actual: u32 },
    /// Declared boundary count exceeds what the domain can hold.
    CountTooLarge { count: u32 },
    /// Payload is larger than any valid payload can be.
    TooLarge { size: usize, max: usize },
    /// Varint longer than 5 bytes or overflowing u32.
    BadVarint { offset: usize },
    /// Body could not be decompressed.
    Decompression { message: String },
    /// JSON dump could not be parsed.
    Malformed { message: String },
}

impl fmt::Display for CorruptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptReason::OddLength { len } => {
                write!(f, "boundary list has odd length {}", len)
            }
            CorruptReason::NotIncreasing {
                position,
                prev,
                next,
            } => {
                write!(
                    f,
                    "boundaries not strictly increasing at position {}: {} then {}",
                    position, prev, next
                )
            }
            CorruptReason::OutOfDomain { position, value } => {
                write!(
                    f,
                    "boundary {:#x} at position {} is outside the code point domain",
                    value, position
                )
            }
            CorruptReason::InvertedRange { start, end } => {
                write!(f, "range start {:#x} > end {:#x}", start, end)
            }
            CorruptReason::BadMagic { found } => {
                write!(f, "invalid payload magic {:?}", found)
            }
            CorruptReason::BadFooter { found } => {
                write!(f, "invalid payload footer magic {:?}", found)
            }
            CorruptReason::UnsupportedVersion { version } => {
                write!(f, "unsupported payload version {}", version)
            }
            CorruptReason::UnknownFlags { flags } => {
                write!(f, "unknown payload flags {:#010b}", flags)
            }
            CorruptReason::Truncated { needed, available } => {
                write!(
                    f,
                    "payload truncated: need {} bytes, have {}",
                    needed, available
                )
            }
            CorruptReason::TrailingBytes { count } => {
                write!(f, "{} trailing bytes after boundary data", count)
            }
            CorruptReason::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "checksum mismatch: footer says {:#010x}, content hashes to {:#010x}",
                    expected, actual
                )
            }
            CorruptReason::CountTooLarge { count } => {
                write!(f, "boundary count {} exceeds domain capacity", count)
            }
            CorruptReason::TooLarge { size, max } => {
                write!(f, "payload too large: {} bytes (max {})", size, max)
            }
            CorruptReason::BadVarint { offset } => {
                write!(f, "malformed varint at body offset {}", offset)
            }
            CorruptReason::Decompression { message } => {
                write!(f, "decompression failed: {}", message)
            }
            CorruptReason::Malformed { message } => {
                write!(f, "malformed property dump: {}", message)
            }
        }
    }
}

impl std::error::Error for CorruptReason {}

/// Errors surfaced by the loader, directory, builder and façade.
#[derive(Debug)]
pub enum PropsError {
    /// Name does not identify one of the supported binary properties.
    UnknownProperty { name: String },
    /// The data source has no payload for this key and version.
    DataNotFound { key: String, version: String },
    /// The payload failed structural validation.
    DataCorrupt {
        key: String,
        version: String,
        reason: CorruptReason,
    },
    /// Builder used after it was finalized.
    InvalidState { reason: &'static str },
    /// The data source failed for a reason other than absence.
    Source {
        key: String,
        version: String,
        source: io::Error,
    },
    /// Configuration could not be read or parsed.
    Config { message: String },
}

impl PropsError {
    pub(crate) fn corrupt(key: &str, version: &str, reason: CorruptReason) -> Self {
        PropsError::DataCorrupt {
            key: key.to_string(),
            version: version.to_string(),
            reason,
        }
    }

    /// True for `DataNotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PropsError::DataNotFound { .. })
    }

    /// True for `DataCorrupt`.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, PropsError::DataCorrupt { .. })
    }
}

impl fmt::Display for PropsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropsError::UnknownProperty { name } => {
                write!(f, "unknown binary property '{}'", name)
            }
            PropsError::DataNotFound { key, version } => {
                write!(f, "no data for property '{}' (version {})", key, version)
            }
            PropsError::DataCorrupt {
                key,
                version,
                reason,
            } => {
                write!(
                    f,
                    "corrupt data for property '{}' (version {}): {}",
                    key, version, reason
                )
            }
            PropsError::InvalidState { reason } => write!(f, "invalid state: {}", reason),
            PropsError::Source {
                key,
                version,
                source,
            } => {
                write!(
                    f,
                    "data source failed for property '{}' (version {}): {}",
                    key, version, source
                )
            }
            PropsError::Config { message } => write!(f, "configuration error: {}", message),
        }
    }
}

impl std::error::Error for PropsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PropsError::DataCorrupt { reason, .. } => Some(reason),
            PropsError::Source { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Crate result alias.
pub type Result<T, E = PropsError> = std::result::Result<T, E>;
