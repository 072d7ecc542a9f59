// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inversion lists: the compact, immutable set of code points behind every property.
//!
//! A set of integers over `[0, 0x110000)` is stored as the sorted list of
//! points where membership flips. Even positions open an included range, odd
//! positions close it:
//!
//! ```text
//! boundaries:  [ 97, 123, 170, 171 ]
//!                 │    │    │    │
//!                 ▼    ▼    ▼    ▼
//! ─────────────── ████████ ────── █ ──────────────────────────
//!                 [97, 123)       [170, 171)
//! ```
//!
//! Membership is a binary search: count the boundaries `<= v`. An odd count
//! means `v` sits inside an included range. Most binary properties have a few
//! hundred ranges, so a query costs ~10 comparisons no matter how many
//! code points the property covers.
//!
//! # Invariants
//!
//! - Even length, strictly increasing, every value `<= 0x110000`.
//! - Strict increase means adjacent ranges were merged, so every set has
//!   exactly one boundary sequence. Equality is sequence equality.
//! - Never mutated after construction. Storage is `Arc<[u32]>`, so a clone
//!   costs one reference count bump and shares the allocation.
//!
//! Sets are built three ways: validated from a raw boundary list
//! (`try_from_boundaries`), incrementally via [`InversionListBuilder`], or as
//! the result of set algebra (see `algebra`).

pub mod algebra;
pub mod builder;

pub use builder::InversionListBuilder;

use std::fmt;
use std::sync::Arc;

use crate::error::CorruptReason;
use crate::types::{CodePointRange, CODE_POINT_DOMAIN_END};
use crate::verify::contracts::check_boundaries_canonical;

// ============================================================================
// INVERSION LIST
// ============================================================================

/// Immutable set of code points in canonical inversion-list form.
#[derive(Clone)]
pub struct InversionList {
    boundaries: Arc<[u32]>,
    /// Number of members, computed once at construction.
    size: usize,
}

impl InversionList {
    /// The empty set.
    pub fn empty() -> Self {
        Self::from_canonical(Vec::new())
    }

    /// Every value in the code point domain, surrogates included.
    pub fn all() -> Self {
        Self::from_canonical(vec![0, CODE_POINT_DOMAIN_END])
    }

    /// Validate a raw boundary sequence and wrap it.
    ///
    /// Rejects odd length, non-increasing boundaries, and values past the end
    /// of the domain. Use the builder if the input may contain overlapping or
    /// unordered ranges.
    pub fn try_from_boundaries(boundaries: Vec<u32>) -> Result<Self, CorruptReason> {
        validate_boundaries(&boundaries)?;
        Ok(Self::from_canonical(boundaries))
    }

    /// Build from half-open ranges in any order, overlapping or touching.
    ///
    /// Empty ranges (`start >= end`) are skipped and ends are clamped to the
    /// domain.
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = CodePointRange>,
    {
        builder::canonicalize(ranges.into_iter().collect())
    }

    /// Wrap a boundary list the caller guarantees is canonical.
    pub(crate) fn from_canonical(boundaries: Vec<u32>) -> Self {
        Self::from_shared(boundaries.into())
    }

    /// Wrap an already-validated shared boundary list without copying.
    pub(crate) fn from_shared(boundaries: Arc<[u32]>) -> Self {
        // INVARIANT: CANONICAL_BOUNDARIES
        check_boundaries_canonical(&boundaries);
        let size = boundaries
            .chunks_exact(2)
            .map(|pair| (pair[1] - pair[0]) as usize)
            .sum();
        Self { boundaries, size }
    }

    /// The canonical boundary sequence.
    pub fn boundaries(&self) -> &[u32] {
        &self.boundaries
    }

    /// Shared handle to the boundary storage.
    pub(crate) fn shared_boundaries(&self) -> &Arc<[u32]> {
        &self.boundaries
    }

    /// Membership test. O(log k) in the number of boundaries.
    ///
    /// Values outside the domain are never members.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        // Insertion index after all boundaries <= value; odd means inside.
        self.boundaries.partition_point(|&b| b <= value) % 2 == 1
    }

    /// Membership test for a scalar value.
    #[inline]
    pub fn contains_char(&self, c: char) -> bool {
        self.contains(c as u32)
    }

    /// True if every value in `[start, end)` is a member.
    ///
    /// An empty range is trivially contained.
    pub fn contains_range(&self, start: u32, end: u32) -> bool {
        if start >= end {
            return true;
        }
        let idx = self.boundaries.partition_point(|&b| b <= start);
        // Start must be inside range idx-1, whose end must cover `end`.
        idx % 2 == 1 && end <= self.boundaries[idx]
    }

    /// True if `other` is a subset of `self`.
    pub fn contains_set(&self, other: &InversionList) -> bool {
        other
            .iter_ranges()
            .all(|(start, end)| self.contains_range(start, end))
    }

    /// Number of included ranges.
    #[inline]
    pub fn range_count(&self) -> usize {
        self.boundaries.len() / 2
    }

    /// Number of members.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// The `index`-th included range, if any.
    pub fn nth_range(&self, index: usize) -> Option<CodePointRange> {
        let start = *self.boundaries.get(2 * index)?;
        let end = *self.boundaries.get(2 * index + 1)?;
        Some((start, end))
    }

    /// Included ranges in ascending order as half-open `(start, end)` pairs.
    ///
    /// The iterator borrows the set and can be cloned or recreated to start
    /// over.
    pub fn iter_ranges(&self) -> Ranges<'_> {
        Ranges {
            pairs: self.boundaries.chunks_exact(2),
        }
    }

    /// Ranges of the domain *not* in the set, ascending.
    pub fn iter_ranges_complemented(&self) -> impl Iterator<Item = CodePointRange> + '_ {
        let mut points = Vec::with_capacity(self.boundaries.len() + 2);
        points.push(0);
        points.extend_from_slice(&self.boundaries);
        points.push(CODE_POINT_DOMAIN_END);
        points
            .chunks_exact(2)
            .filter(|pair| pair[0] < pair[1])
            .map(|pair| (pair[0], pair[1]))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Every member, ascending. Mostly useful for small sets and tests.
    pub fn iter_code_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter_ranges().flat_map(|(start, end)| start..end)
    }

    /// Union with `other`.
    pub fn union(&self, other: &InversionList) -> InversionList {
        algebra::union(self, other)
    }

    /// Intersection with `other`.
    pub fn intersect(&self, other: &InversionList) -> InversionList {
        algebra::intersect(self, other)
    }

    /// Members of `self` that are not in `other`.
    pub fn subtract(&self, other: &InversionList) -> InversionList {
        algebra::subtract(self, other)
    }

    /// Complement within the code point domain.
    pub fn complement(&self) -> InversionList {
        algebra::complement(self, CODE_POINT_DOMAIN_END)
    }

    /// Complement within `[0, domain_end)`. Members at or above `domain_end`
    /// are dropped.
    pub fn complement_within(&self, domain_end: u32) -> InversionList {
        algebra::complement(self, domain_end.min(CODE_POINT_DOMAIN_END))
    }
}

impl Default for InversionList {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for InversionList {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.boundaries, &other.boundaries) || self.boundaries == other.boundaries
    }
}

impl Eq for InversionList {}

impl fmt::Debug for InversionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InversionList{}", self)
    }
}

impl fmt::Display for InversionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (start, end)) in self.iter_ranges().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:#x}..{:#x}", start, end)?;
        }
        f.write_str("]")
    }
}

impl FromIterator<CodePointRange> for InversionList {
    fn from_iter<T: IntoIterator<Item = CodePointRange>>(iter: T) -> Self {
        Self::from_ranges(iter)
    }
}

impl TryFrom<Vec<u32>> for InversionList {
    type Error = CorruptReason;

    fn try_from(boundaries: Vec<u32>) -> Result<Self, Self::Error> {
        Self::try_from_boundaries(boundaries)
    }
}

// ============================================================================
// RANGE ITERATOR
// ============================================================================

/// Iterator over the included ranges of an [`InversionList`].
#[derive(Debug, Clone)]
pub struct Ranges<'a> {
    pairs: std::slice::ChunksExact<'a, u32>,
}

impl Iterator for Ranges<'_> {
    type Item = CodePointRange;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.pairs.next().map(|pair| (pair[0], pair[1]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl DoubleEndedIterator for Ranges<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pairs.next_back().map(|pair| (pair[0], pair[1]))
    }
}

impl ExactSizeIterator for Ranges<'_> {}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check a boundary sequence for the canonical-form invariants.
pub fn validate_boundaries(boundaries: &[u32]) -> Result<(), CorruptReason> {
    if boundaries.len() % 2 != 0 {
        return Err(CorruptReason::OddLength {
            len: boundaries.len(),
        });
    }
    for (position, &value) in boundaries.iter().enumerate() {
        if value > CODE_POINT_DOMAIN_END {
            return Err(CorruptReason::OutOfDomain { position, value });
        }
        if position > 0 && value <= boundaries[position - 1] {
            return Err(CorruptReason::NotIncreasing {
                position,
                prev: boundaries[position - 1],
                next: value,
            });
        }
    }
    Ok(())
}
