// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the varint (LEB128) codec used by payload bodies.

#![no_main]

use libfuzzer_sys::fuzz_target;
use uniprops::binary::{decode_varint, encode_varint, MAX_VARINT_BYTES};

fuzz_target!(|data: &[u8]| {
    // Garbage must decode to Err, never panic.
    if let Ok((value, consumed)) = decode_varint(data, 0) {
        assert!(consumed <= MAX_VARINT_BYTES, "varint consumed {} bytes", consumed);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded, 0).expect("re-encoded varint should decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
    }
});
