//! Shared test utilities and fixtures.

#![allow(dead_code)]

use proptest::prelude::*;
use uniprops::{InversionList, InversionListBuilder};

// Re-export canonical test utilities from uniprops::testing
pub use uniprops::testing::{
    json_payload, payload, raw_json_payload, toml_payload, CountingSource, FailingSource,
};

/// Data version used by the fixtures.
pub const VERSION: &str = "v1";

/// Lowercase sample: `[a-z]` plus U+00AA.
pub const LOWERCASE: [u32; 4] = [97, 123, 170, 171];

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small universe so random sets overlap often.
pub const UNIVERSE: u32 = 512;

/// Random half-open ranges inside the small universe, possibly empty or overlapping.
pub fn ranges_strategy() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0..UNIVERSE, 0u32..40), 0..16).prop_map(|v| {
        v.into_iter()
            .map(|(start, len)| (start, (start + len).min(UNIVERSE)))
            .collect()
    })
}

/// Random sets built from random ranges.
pub fn set_strategy() -> impl Strategy<Value = InversionList> {
    ranges_strategy().prop_map(InversionList::from_ranges)
}

/// Builder operation for sequence tests.
#[derive(Debug, Clone)]
pub enum Op {
    Add(u32, u32),
    Remove(u32, u32),
}

pub fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0..UNIVERSE, 0u32..40).prop_map(|(s, l)| Op::Add(s, s + l)),
        (0..UNIVERSE, 0u32..40).prop_map(|(s, l)| Op::Remove(s, s + l)),
    ];
    prop::collection::vec(op, 0..24)
}

/// Apply `ops` to a builder and build.
pub fn build_from_ops(ops: &[Op]) -> InversionList {
    let mut builder = InversionListBuilder::new();
    for op in ops {
        match *op {
            Op::Add(s, e) => builder.add_range(s, e).unwrap(),
            Op::Remove(s, e) => builder.remove_range(s, e).unwrap(),
        };
    }
    builder.build().unwrap()
}

/// Naive model of `ops`: one bool per value of the universe.
pub fn model_from_ops(ops: &[Op]) -> Vec<bool> {
    let mut model = vec![false; (UNIVERSE + 64) as usize];
    for op in ops {
        let (s, e, v) = match *op {
            Op::Add(s, e) => (s, e, true),
            Op::Remove(s, e) => (s, e, false),
        };
        for x in s..e {
            model[x as usize] = v;
        }
    }
    model
}

/// Canonical set from a membership bitmap.
pub fn set_from_model(model: &[bool]) -> InversionList {
    let mut builder = InversionListBuilder::new();
    for (i, &member) in model.iter().enumerate() {
        if member {
            builder.add_single(i as u32).unwrap();
        }
    }
    builder.build().unwrap()
}

/// Assert every structural invariant of a set.
pub fn assert_canonical(set: &InversionList) {
    let b = set.boundaries();
    assert_eq!(b.len() % 2, 0, "odd length: {:?}", b);
    assert!(b.windows(2).all(|w| w[0] < w[1]), "not increasing: {:?}", b);
    assert!(b.iter().all(|&v| v <= uniprops::CODE_POINT_DOMAIN_END));
    let size: usize = set.iter_ranges().map(|(s, e)| (e - s) as usize).sum();
    assert_eq!(set.size(), size);
}
