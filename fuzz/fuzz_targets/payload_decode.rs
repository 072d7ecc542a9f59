// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Payload decoding under adversarial input.
//!
//! Property data may come from a directory anyone can write to. The worst
//! case for a crafted payload should be `DataCorrupt`, not a panic or an
//! allocation sized by a lying header.

#![no_main]

use libfuzzer_sys::fuzz_target;
use uniprops::set::validate_boundaries;
use uniprops::{decode_payload, InversionList};

fuzz_target!(|data: &[u8]| {
    let Ok(boundaries) = decode_payload(data) else {
        return;
    };

    // Anything accepted must already be canonical.
    assert!(
        validate_boundaries(&boundaries).is_ok(),
        "decoder accepted non-canonical boundaries: {:?}",
        boundaries
    );

    let set = InversionList::try_from_boundaries(boundaries.clone())
        .expect("validated boundaries must build a set");
    assert_eq!(set.boundaries(), boundaries.as_slice());
    assert_eq!(set.range_count() * 2, boundaries.len());
});
