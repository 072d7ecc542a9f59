// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for inversion-list invariants.
//!
//! The validating constructors (`InversionList::try_from_boundaries`, the
//! payload decoder) reject bad input with an error. Everything else that
//! produces boundaries, the builder sweep and the algebra merge, is supposed
//! to be correct by construction. The contracts here check that claim in debug
//! builds and compile to nothing in release.

pub mod contracts;
