// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Payload header and footer structures.
//!
//! The header is 12 bytes of fixed-size fields parsed before anything else.
//! It says how many boundaries follow and whether the body is compressed, so
//! the decoder can size its allocation and refuse absurd counts up front.
//!
//! The footer is 8 bytes: a CRC32 over header and body, plus a magic number
//! ("PRPU", the header magic reversed). If the footer is wrong, the payload
//! was truncated or damaged in transit. Don't trust the data.

use std::io::{self, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::error::CorruptReason;
use crate::types::CODE_POINT_DOMAIN_END;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "UPRP" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"UPRP";

/// Footer magic: "PRPU" (reversed, marks valid payload end)
pub const FOOTER_MAGIC: [u8; 4] = *b"PRPU";

/// Current payload format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Largest possible canonical boundary list: every other value in the domain.
pub const MAX_BOUNDARY_COUNT: u32 = CODE_POINT_DOMAIN_END + 1;

/// Maximum payload size: 16 MB (a worst-case list is ~5.6 MB of varints)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Maximum varint bytes (u32 needs at most 5 bytes)
pub const MAX_VARINT_BYTES: usize = 5;

// ============================================================================
// FLAGS
// ============================================================================

/// Payload flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadFlags(pub(crate) u8);

impl PayloadFlags {
    pub const COMPRESSED: u8 = 0b0000_0001;

    /// Every bit this version understands.
    const KNOWN: u8 = Self::COMPRESSED;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_compression(mut self) -> Self {
        self.0 |= Self::COMPRESSED;
        self
    }

    pub fn is_compressed(self) -> bool {
        self.0 & Self::COMPRESSED != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Payload header (12 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadHeader {
    pub version: u8,
    pub flags: PayloadFlags,
    /// Number of boundary values in the body (always even)
    pub boundary_count: u32,
}

impl PayloadHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 4 (count) = 12
    pub const SIZE: usize = 12;

    pub fn new(flags: PayloadFlags, boundary_count: u32) -> Self {
        Self {
            version: VERSION,
            flags,
            boundary_count,
        }
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.boundary_count.to_le_bytes())?;
        Ok(())
    }

    /// Parse and sanity-check the header at the start of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, CorruptReason> {
        if bytes.len() < Self::SIZE {
            return Err(CorruptReason::Truncated {
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != MAGIC {
            return Err(CorruptReason::BadMagic { found: magic });
        }

        let version = bytes[4];
        if version != VERSION {
            return Err(CorruptReason::UnsupportedVersion { version });
        }

        let flags = bytes[5];
        if flags & !PayloadFlags::KNOWN != 0 {
            return Err(CorruptReason::UnknownFlags { flags });
        }

        // bytes[6..8] is reserved
        let boundary_count = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        if boundary_count > MAX_BOUNDARY_COUNT {
            return Err(CorruptReason::CountTooLarge {
                count: boundary_count,
            });
        }
        if boundary_count % 2 != 0 {
            return Err(CorruptReason::OddLength {
                len: boundary_count as usize,
            });
        }

        Ok(Self {
            version,
            flags: PayloadFlags(flags),
            boundary_count,
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFooter {
    /// CRC32 checksum of header + body (everything before footer)
    pub crc32: u32,
}

impl PayloadFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    /// Read the footer from the last 8 bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, CorruptReason> {
        if bytes.len() < Self::SIZE {
            return Err(CorruptReason::Truncated {
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = [
            bytes[footer_start + 4],
            bytes[footer_start + 5],
            bytes[footer_start + 6],
            bytes[footer_start + 7],
        ];
        if magic != FOOTER_MAGIC {
            return Err(CorruptReason::BadFooter { found: magic });
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
