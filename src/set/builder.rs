// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Incremental construction of inversion lists.
//!
//! The builder holds a canonical boundary list plus a buffer of pending adds.
//! Adds are the common case (loading a range-list dump, assembling a derived
//! property), so they are just pushed onto the buffer. The buffer is sorted and
//! swept into the canonical list only when something needs the exact state: a
//! removal, an intersection, a complement, or `build()`. Loading n ranges costs
//! O(n log n) instead of O(n·k) for splicing each range in place.
//!
//! Inputs may arrive in any order and may overlap or touch; the result is
//! always the unique canonical form.
//!
//! # Single use
//!
//! `build()` finalizes the builder. Every later call, mutator or `build()`,
//! returns `PropsError::InvalidState`. Start a new builder instead.
//!
//! ```ignore
//! let mut builder = InversionListBuilder::new();
//! builder.add_range(0x61, 0x7B)?.add_single(0xAA)?.remove_single(0x71)?;
//! let set = builder.build()?;
//! ```

use super::algebra::{merge_boundaries, SetOp};
use super::InversionList;
use crate::error::PropsError;
use crate::types::{CodePointRange, CODE_POINT_DOMAIN_END};

const FINISHED: &str = "builder already finalized by build()";

/// Mutable, single-use builder for [`InversionList`].
#[derive(Debug, Default)]
pub struct InversionListBuilder {
    /// Canonical boundaries for everything flushed so far.
    boundaries: Vec<u32>,
    /// Half-open adds not yet merged into `boundaries`.
    pending: Vec<CodePointRange>,
    finished: bool,
}

impl InversionListBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the members of an existing set.
    pub fn from_set(set: &InversionList) -> Self {
        Self {
            boundaries: set.boundaries().to_vec(),
            pending: Vec::new(),
            finished: false,
        }
    }

    /// True once `build()` has succeeded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Add `[start, end)`. Empty ranges are ignored, ends are clamped to the domain.
    pub fn add_range(&mut self, start: u32, end: u32) -> Result<&mut Self, PropsError> {
        self.ensure_open()?;
        self.pending.push((start, end));
        Ok(self)
    }

    /// Add one value.
    pub fn add_single(&mut self, value: u32) -> Result<&mut Self, PropsError> {
        self.add_range(value, value.saturating_add(1))
    }

    /// Add every member of `set`.
    pub fn add_set(&mut self, set: &InversionList) -> Result<&mut Self, PropsError> {
        self.ensure_open()?;
        self.pending.extend(set.iter_ranges());
        Ok(self)
    }

    /// Remove `[start, end)`.
    pub fn remove_range(&mut self, start: u32, end: u32) -> Result<&mut Self, PropsError> {
        self.ensure_open()?;
        self.flush();
        let removed = canonical_boundaries(vec![(start, end)]);
        self.boundaries = merge_boundaries(&self.boundaries, &removed, SetOp::Subtract);
        Ok(self)
    }

    /// Remove one value.
    pub fn remove_single(&mut self, value: u32) -> Result<&mut Self, PropsError> {
        self.remove_range(value, value.saturating_add(1))
    }

    /// Remove every member of `set`.
    pub fn remove_set(&mut self, set: &InversionList) -> Result<&mut Self, PropsError> {
        self.ensure_open()?;
        self.flush();
        self.boundaries = merge_boundaries(&self.boundaries, set.boundaries(), SetOp::Subtract);
        Ok(self)
    }

    /// Keep only members that are also in `set`.
    pub fn retain_set(&mut self, set: &InversionList) -> Result<&mut Self, PropsError> {
        self.ensure_open()?;
        self.flush();
        self.boundaries = merge_boundaries(&self.boundaries, set.boundaries(), SetOp::Intersect);
        Ok(self)
    }

    /// Replace the contents with their complement in the code point domain.
    pub fn complement(&mut self) -> Result<&mut Self, PropsError> {
        self.ensure_open()?;
        self.flush();
        let universe = [0, CODE_POINT_DOMAIN_END];
        self.boundaries = merge_boundaries(&universe, &self.boundaries, SetOp::Subtract);
        Ok(self)
    }

    /// Finalize into an immutable set. The builder cannot be used afterwards.
    pub fn build(&mut self) -> Result<InversionList, PropsError> {
        self.ensure_open()?;
        self.flush();
        self.finished = true;
        Ok(InversionList::from_canonical(std::mem::take(
            &mut self.boundaries,
        )))
    }

    fn ensure_open(&self) -> Result<(), PropsError> {
        if self.finished {
            return Err(PropsError::InvalidState { reason: FINISHED });
        }
        Ok(())
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let added = canonical_boundaries(std::mem::take(&mut self.pending));
        self.boundaries = if self.boundaries.is_empty() {
            added
        } else {
            merge_boundaries(&self.boundaries, &added, SetOp::Union)
        };
    }
}

/// Sort, clamp and merge arbitrary half-open ranges into a canonical boundary list.
fn canonical_boundaries(mut ranges: Vec<CodePointRange>) -> Vec<u32> {
    ranges.retain_mut(|(start, end)| {
        *end = (*end).min(CODE_POINT_DOMAIN_END);
        *start < *end
    });
    ranges.sort_unstable();

    let mut out: Vec<u32> = Vec::with_capacity(ranges.len() * 2);
    for (start, end) in ranges {
        let n = out.len();
        // INVARIANT: SWEEP_CANONICAL
        // Overlapping or touching the previous range: extend it.
        if n > 0 && start <= out[n - 1] {
            out[n - 1] = out[n - 1].max(end);
        } else {
            out.push(start);
            out.push(end);
        }
    }
    out
}

/// Canonicalize ranges straight into a set (used by `InversionList::from_ranges`).
pub(crate) fn canonicalize(ranges: Vec<CodePointRange>) -> InversionList {
    InversionList::from_canonical(canonical_boundaries(ranges))
}
