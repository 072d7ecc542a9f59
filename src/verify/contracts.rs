// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-build assertions for canonical boundary sequences.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                      | Property                                  |
//! |-------------------------------|-------------------------------------------|
//! | `check_boundaries_canonical`  | even length, strictly increasing, bounded |

use crate::types::CODE_POINT_DOMAIN_END;

/// Assert that `boundaries` is a canonical inversion list.
///
/// # Panics (debug builds only)
/// Panics on odd length, a non-increasing pair, or a value past the domain end.
#[inline]
pub fn check_boundaries_canonical(boundaries: &[u32]) {
    debug_assert!(
        boundaries.len() % 2 == 0,
        "Contract violation: inversion list has odd length {}",
        boundaries.len()
    );
    debug_assert!(
        boundaries.windows(2).all(|w| w[0] < w[1]),
        "Contract violation: inversion list not strictly increasing"
    );
    debug_assert!(
        boundaries.last().map_or(true, |&b| b <= CODE_POINT_DOMAIN_END),
        "Contract violation: boundary past end of code point domain"
    );
}
