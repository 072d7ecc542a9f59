// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Serialized property payloads.
//!
//! A data source hands the loader opaque bytes. Two encodings are accepted and
//! told apart by their first bytes: the compact binary `.uprop` format below,
//! and the JSON property dump (see [`dump`]) that upstream tooling emits.
//! Either way the result is a canonical boundary sequence, or a
//! [`CorruptReason`] saying exactly what was wrong.
//!
//! # Security Considerations
//!
//! Payloads come from outside the process and are parsed as untrusted:
//! - Total size is checked against MAX_PAYLOAD_SIZE before anything else
//! - The declared boundary count is bounded by MAX_BOUNDARY_COUNT
//! - CRC32 footer detects corruption/truncation
//! - Decompression output is capped by what the declared count can need
//! - Varint decoder has maximum iteration limits
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (12 bytes)                                          │
//! │   magic: [u8; 4] = "UPRP"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 (bit 0: body is brotli-compressed)             │
//! │   reserved: [u8; 2]                                        │
//! │   boundary_count: u32                                      │
//! ├────────────────────────────────────────────────────────────┤
//! │ BODY                                                       │
//! │   varint(first boundary), varint(delta) for the rest       │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "PRPU"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod dump;
mod encoding;
mod header;

pub use dump::PropertyDump;
pub use encoding::{decode_boundaries, decode_varint, encode_boundaries, encode_varint};
pub use header::{
    PayloadFlags, PayloadFooter, PayloadHeader, FOOTER_MAGIC, MAGIC, MAX_BOUNDARY_COUNT,
    MAX_PAYLOAD_SIZE, MAX_VARINT_BYTES, VERSION,
};

use std::io::{self, Read, Write};

use crate::error::CorruptReason;
use crate::set::InversionList;

/// Brotli window and quality used for compressed bodies.
const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_LG_WINDOW: u32 = 22;

// ============================================================================
// ENCODING
// ============================================================================

/// Serialize a set as a binary payload.
pub fn encode_payload(set: &InversionList, flags: PayloadFlags) -> io::Result<Vec<u8>> {
    let boundaries = set.boundaries();
    let boundary_count = u32::try_from(boundaries.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} boundaries do not fit a payload", boundaries.len()),
        )
    })?;

    let mut body = Vec::with_capacity(boundaries.len() * 2);
    encode_boundaries(boundaries, &mut body);

    if flags.is_compressed() {
        let mut compressed = Vec::new();
        {
            let mut encoder = brotli::CompressorWriter::new(
                &mut compressed,
                BROTLI_BUFFER,
                BROTLI_QUALITY,
                BROTLI_LG_WINDOW,
            );
            encoder.write_all(&body)?;
            encoder.flush()?;
        }
        body = compressed;
    }

    let header = PayloadHeader::new(flags, boundary_count);
    let mut buf = Vec::with_capacity(PayloadHeader::SIZE + body.len() + PayloadFooter::SIZE);
    header.write(&mut buf)?;
    buf.extend_from_slice(&body);

    // CRC32 over everything written so far
    let crc32 = PayloadFooter::compute_crc32(&buf);
    PayloadFooter { crc32 }.write(&mut buf)?;

    Ok(buf)
}

// ============================================================================
// DECODING
// ============================================================================

/// A fully decoded binary payload, header details included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub header: PayloadHeader,
    /// Size of the (possibly compressed) body in bytes.
    pub body_len: usize,
    pub crc32: u32,
    pub boundaries: Vec<u32>,
}

/// True if `bytes` starts with the binary payload magic.
pub fn is_binary_payload(bytes: &[u8]) -> bool {
    bytes.starts_with(&MAGIC)
}

/// Parse and validate a binary payload.
///
/// # Validation
///
/// 1. Payload size is within limits (MAX_PAYLOAD_SIZE)
/// 2. Header magic, version, flags and boundary count are valid
/// 3. Footer magic is valid ("PRPU")
/// 4. CRC32 checksum matches
/// 5. Body decodes to exactly `boundary_count` strictly increasing,
///    in-domain boundaries with nothing left over
pub fn read_payload(bytes: &[u8]) -> Result<Payload, CorruptReason> {
    // Security: Check payload size limits
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(CorruptReason::TooLarge {
            size: bytes.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let min_size = PayloadHeader::SIZE + PayloadFooter::SIZE;
    if bytes.len() < min_size {
        return Err(CorruptReason::Truncated {
            needed: min_size,
            available: bytes.len(),
        });
    }

    let header = PayloadHeader::read(bytes)?;

    let footer = PayloadFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - PayloadFooter::SIZE];
    let computed = PayloadFooter::compute_crc32(content);
    if footer.crc32 != computed {
        return Err(CorruptReason::ChecksumMismatch {
            expected: footer.crc32,
            actual: computed,
        });
    }

    let body = &content[PayloadHeader::SIZE..];
    let count = header.boundary_count as usize;

    let decompressed;
    let raw: &[u8] = if header.flags.is_compressed() {
        decompressed = decompress(body, count)?;
        &decompressed
    } else {
        body
    };

    let (boundaries, consumed) = decode_boundaries(raw, count)?;
    if consumed != raw.len() {
        return Err(CorruptReason::TrailingBytes {
            count: raw.len() - consumed,
        });
    }

    Ok(Payload {
        header,
        body_len: body.len(),
        crc32: footer.crc32,
        boundaries,
    })
}

/// Decode any payload encoding into a canonical boundary sequence.
///
/// Binary payloads are recognized by their magic, text dumps by their first
/// significant byte (JSON object, else TOML).
pub fn decode_payload(bytes: &[u8]) -> Result<Vec<u32>, CorruptReason> {
    if is_binary_payload(bytes) {
        return read_payload(bytes).map(|payload| payload.boundaries);
    }
    PropertyDump::from_text(bytes)?.boundaries()
}

/// Inflate a brotli body, refusing to produce more than `count` boundaries can need.
fn decompress(body: &[u8], count: usize) -> Result<Vec<u8>, CorruptReason> {
    // One byte past the limit is enough to tell "too much" from "exactly full".
    let limit = (count * MAX_VARINT_BYTES + 1) as u64;
    let mut out = Vec::new();
    brotli::Decompressor::new(body, BROTLI_BUFFER)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(|e| CorruptReason::Decompression {
            message: e.to_string(),
        })?;
    Ok(out)
}
