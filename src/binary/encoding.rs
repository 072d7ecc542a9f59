// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint and delta-coded boundary lists.
//!
//! Boundary lists are strictly increasing, so the gaps between neighbours are
//! small positive numbers even when the values themselves are up in the
//! supplementary planes. Store the first value, then each delta, all as
//! LEB128 varints. A typical property shrinks to a bit over one byte per
//! boundary.
//!
//! The decoder is the validation point for the whole format: a zero delta
//! means two equal boundaries, a running sum past the domain end means an
//! out-of-range value. Both are reported with the position they occurred at.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>

use super::header::MAX_VARINT_BYTES;
use crate::error::CorruptReason;
use crate::types::CODE_POINT_DOMAIN_END;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u32, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if the buffer ends mid-varint, or the varint runs past
/// MAX_VARINT_BYTES or overflows u32 (malformed/malicious input). `offset` is
/// only used to report where the failure happened.
pub fn decode_varint(bytes: &[u8], offset: usize) -> Result<(u32, usize), CorruptReason> {
    let mut result: u32 = 0;
    let mut shift = 0;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let payload = (byte & 0x7F) as u32;
        // Fifth byte may only carry the top 4 bits of a u32.
        if i == MAX_VARINT_BYTES - 1 && payload > 0x0F {
            return Err(CorruptReason::BadVarint { offset });
        }
        result |= payload << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(CorruptReason::BadVarint { offset })
    } else {
        Err(CorruptReason::Truncated {
            needed: offset + bytes.len() + 1,
            available: offset + bytes.len(),
        })
    }
}

// ============================================================================
// BOUNDARY LIST ENCODING
// ============================================================================

/// Encode a strictly increasing boundary list as first value + deltas.
pub fn encode_boundaries(boundaries: &[u32], buf: &mut Vec<u8>) {
    let mut prev = 0u32;
    for (i, &value) in boundaries.iter().enumerate() {
        let delta = if i == 0 { value } else { value - prev };
        encode_varint(delta, buf);
        prev = value;
    }
}

/// Decode exactly `count` boundaries from `bytes`.
///
/// Returns the boundaries and the number of bytes consumed. Validates strict
/// increase and the domain bound as it goes.
pub fn decode_boundaries(bytes: &[u8], count: usize) -> Result<(Vec<u32>, usize), CorruptReason> {
    // INVARIANT: COUNT_BOUNDED_BY_INPUT
    // Security: every boundary needs at least one byte, so a count larger
    // than the input is a lie. Check before allocating.
    if count > bytes.len() {
        return Err(CorruptReason::Truncated {
            needed: count,
            available: bytes.len(),
        });
    }

    let mut boundaries = Vec::with_capacity(count);
    let mut pos = 0;
    let mut prev = 0u32;

    for position in 0..count {
        let (delta, consumed) = decode_varint(&bytes[pos..], pos)?;
        pos += consumed;

        let value = if position == 0 {
            delta
        } else {
            if delta == 0 {
                return Err(CorruptReason::NotIncreasing {
                    position,
                    prev,
                    next: prev,
                });
            }
            prev.checked_add(delta)
                .ok_or(CorruptReason::OutOfDomain {
                    position,
                    value: u32::MAX,
                })?
        };

        if value > CODE_POINT_DOMAIN_END {
            return Err(CorruptReason::OutOfDomain { position, value });
        }

        boundaries.push(value);
        prev = value;
    }

    Ok((boundaries, pos))
}
