// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary builder operation sequences always produce canonical sets.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use uniprops::set::validate_boundaries;
use uniprops::InversionListBuilder;

#[derive(Debug, Arbitrary)]
enum Op {
    Add(u32, u32),
    Remove(u32, u32),
    Complement,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut builder = InversionListBuilder::new();
    for op in &ops {
        let result = match *op {
            Op::Add(start, end) => builder.add_range(start, end).map(|_| ()),
            Op::Remove(start, end) => builder.remove_range(start, end).map(|_| ()),
            Op::Complement => builder.complement().map(|_| ()),
        };
        assert!(result.is_ok(), "open builder rejected {:?}", op);
    }

    let set = builder.build().expect("first build succeeds");
    assert!(validate_boundaries(set.boundaries()).is_ok());
    assert!(builder.build().is_err(), "second build must fail");

    let size: usize = set.iter_ranges().map(|(s, e)| (e - s) as usize).sum();
    assert_eq!(set.size(), size);
});
