// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text property dumps, TOML or JSON.
//!
//! The layout produced by the upstream property dump tool, which ships it as
//! TOML:
//!
//! ```toml
//! [unicode_set.data]
//! long_name = "Lowercase"
//! name = "Lower"
//! serialized = [97, 123, 170, 171]
//! ranges = [[97, 122], [170, 170]]
//! ```
//!
//! The same tree is accepted as JSON (`{"unicode_set": {"data": {...}}}`).
//!
//! `serialized` is the boundary sequence itself and is validated strictly.
//! `ranges` uses inclusive ends and may be in any order; it is only consulted
//! when `serialized` is empty, and goes through the builder.

use serde::{Deserialize, Serialize};

use crate::error::{CorruptReason, PropsError};
use crate::set::{validate_boundaries, InversionList, InversionListBuilder};
use crate::types::MAX_CODE_POINT;

/// Top level of a dump file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDump {
    pub unicode_set: UnicodeSetDump,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnicodeSetDump {
    pub data: SetData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetData {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub serialized: Vec<u32>,
    /// Inclusive `[start, end]` pairs.
    #[serde(default)]
    pub ranges: Vec<(u32, u32)>,
}

impl PropertyDump {
    /// Describe `set` under the given names. Both representations are filled in.
    pub fn from_set(set: &InversionList, long_name: &str, name: &str) -> Self {
        Self {
            unicode_set: UnicodeSetDump {
                data: SetData {
                    long_name: long_name.to_string(),
                    name: name.to_string(),
                    serialized: set.boundaries().to_vec(),
                    ranges: set.iter_ranges().map(|(s, e)| (s, e - 1)).collect(),
                },
            },
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, CorruptReason> {
        serde_json::from_slice(bytes).map_err(|e| CorruptReason::Malformed {
            message: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_toml(bytes: &[u8]) -> Result<Self, CorruptReason> {
        let text = std::str::from_utf8(bytes).map_err(|e| CorruptReason::Malformed {
            message: e.to_string(),
        })?;
        toml::from_str(text).map_err(|e| CorruptReason::Malformed {
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse a dump in whichever text format `bytes` looks like.
    pub fn from_text(bytes: &[u8]) -> Result<Self, CorruptReason> {
        if looks_like_json(bytes) {
            Self::from_json(bytes)
        } else if looks_like_toml(bytes) {
            Self::from_toml(bytes)
        } else {
            Err(CorruptReason::BadMagic {
                found: leading_bytes(bytes),
            })
        }
    }

    pub fn long_name(&self) -> &str {
        &self.unicode_set.data.long_name
    }

    pub fn name(&self) -> &str {
        &self.unicode_set.data.name
    }

    /// The canonical boundary sequence this dump describes.
    pub fn boundaries(&self) -> Result<Vec<u32>, CorruptReason> {
        let data = &self.unicode_set.data;
        if !data.serialized.is_empty() {
            validate_boundaries(&data.serialized)?;
            return Ok(data.serialized.clone());
        }

        let malformed = |e: PropsError| CorruptReason::Malformed {
            message: e.to_string(),
        };
        let mut builder = InversionListBuilder::new();
        for &(start, end) in &data.ranges {
            if start > end {
                return Err(CorruptReason::InvertedRange { start, end });
            }
            if end > MAX_CODE_POINT {
                return Err(CorruptReason::OutOfDomain {
                    position: 0,
                    value: end,
                });
            }
            builder.add_range(start, end + 1).map_err(malformed)?;
        }
        builder
            .build()
            .map(|set| set.boundaries().to_vec())
            .map_err(malformed)
    }

    pub fn to_set(&self) -> Result<InversionList, CorruptReason> {
        self.boundaries().map(InversionList::from_canonical)
    }
}

/// First non-whitespace byte opens a JSON object.
pub fn looks_like_json(bytes: &[u8]) -> bool {
    first_significant(bytes).is_some_and(|rest| rest[0] == b'{')
}

/// Starts with a table header, a comment, or the dump's dotted root key.
pub fn looks_like_toml(bytes: &[u8]) -> bool {
    first_significant(bytes)
        .is_some_and(|rest| matches!(rest[0], b'[' | b'#') || rest.starts_with(b"unicode_set"))
}

/// First four bytes, zero padded, for `BadMagic` reports.
pub(crate) fn leading_bytes(bytes: &[u8]) -> [u8; 4] {
    let mut found = [0u8; 4];
    let n = bytes.len().min(4);
    found[..n].copy_from_slice(&bytes[..n]);
    found
}

fn first_significant(bytes: &[u8]) -> Option<&[u8]> {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
    Some(&bytes[start..])
}
