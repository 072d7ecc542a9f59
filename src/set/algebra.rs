// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Set algebra over inversion lists in one linear merge pass.
//!
//! Both inputs are sorted boundary streams. Walk them together like a merge
//! sort: at each event point (the smaller of the two heads) toggle membership
//! for whichever side(s) have a boundary there, evaluate the boolean operator,
//! and emit the point only when the combined membership flips.
//!
//! ```text
//! A:     ████████──────████──────
//! B:     ───████████───────██████
//! A ∪ B: ███████████───████──████   emit on every flip of (a || b)
//! A ∩ B: ───█████────────────────   emit on every flip of (a && b)
//! ```
//!
//! Emitting only on flips means the output is already canonical: no empty
//! ranges, no touching ranges, no duplicate boundaries. O(k1 + k2).

use super::InversionList;

/// Boolean combinator applied to (in_a, in_b) at every event point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Intersect,
    Subtract,
    SymmetricDifference,
}

impl SetOp {
    #[inline]
    fn apply(self, in_a: bool, in_b: bool) -> bool {
        match self {
            SetOp::Union => in_a || in_b,
            SetOp::Intersect => in_a && in_b,
            SetOp::Subtract => in_a && !in_b,
            SetOp::SymmetricDifference => in_a != in_b,
        }
    }
}

/// Merge two canonical boundary sequences under `op`.
pub fn merge_boundaries(a: &[u32], b: &[u32], op: SetOp) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    let (mut in_a, mut in_b) = (false, false);
    let mut current = false;

    while i < a.len() || j < b.len() {
        let next_a = a.get(i).copied().unwrap_or(u32::MAX);
        let next_b = b.get(j).copied().unwrap_or(u32::MAX);
        let point = next_a.min(next_b);

        if i < a.len() && next_a == point {
            in_a = !in_a;
            i += 1;
        }
        if j < b.len() && next_b == point {
            in_b = !in_b;
            j += 1;
        }

        // INVARIANT: MERGE_STRICTLY_INCREASING
        // Only emit on a state change, and `point` never repeats.
        let combined = op.apply(in_a, in_b);
        if combined != current {
            out.push(point);
            current = combined;
        }
    }

    out
}

fn combine(a: &InversionList, b: &InversionList, op: SetOp) -> InversionList {
    InversionList::from_canonical(merge_boundaries(a.boundaries(), b.boundaries(), op))
}

/// `a ∪ b`
pub fn union(a: &InversionList, b: &InversionList) -> InversionList {
    combine(a, b, SetOp::Union)
}

/// `a ∩ b`
pub fn intersect(a: &InversionList, b: &InversionList) -> InversionList {
    combine(a, b, SetOp::Intersect)
}

/// `a \ b`
pub fn subtract(a: &InversionList, b: &InversionList) -> InversionList {
    combine(a, b, SetOp::Subtract)
}

/// `a △ b`
pub fn symmetric_difference(a: &InversionList, b: &InversionList) -> InversionList {
    combine(a, b, SetOp::SymmetricDifference)
}

/// `[0, domain_end) \ a`
pub fn complement(a: &InversionList, domain_end: u32) -> InversionList {
    if domain_end == 0 {
        return InversionList::empty();
    }
    let universe = [0, domain_end];
    InversionList::from_canonical(merge_boundaries(&universe, a.boundaries(), SetOp::Subtract))
}
