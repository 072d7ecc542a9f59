//! Builder canonical-form properties.
//!
//! Any sequence of adds and removes that describes the same mathematical set
//! must build to the identical boundary sequence.

use proptest::prelude::*;
use uniprops::{InversionList, InversionListBuilder};

use crate::common::{
    assert_canonical, build_from_ops, model_from_ops, ops_strategy, ranges_strategy,
    set_from_model,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: building from ops equals building from the naive model.
    #[test]
    fn prop_ops_match_model(ops in ops_strategy()) {
        let built = build_from_ops(&ops);
        let expected = set_from_model(&model_from_ops(&ops));
        assert_canonical(&built);
        prop_assert_eq!(built.boundaries(), expected.boundaries());
    }

    /// Property: add order does not matter.
    #[test]
    fn prop_add_order_irrelevant(ranges in ranges_strategy()) {
        let forward = InversionList::from_ranges(ranges.iter().copied());
        let backward = InversionList::from_ranges(ranges.iter().rev().copied());
        prop_assert_eq!(forward.boundaries(), backward.boundaries());
    }

    /// Property: adding ranges one value at a time gives the same result.
    #[test]
    fn prop_singles_equal_ranges(ranges in ranges_strategy()) {
        let whole = InversionList::from_ranges(ranges.iter().copied());
        let mut builder = InversionListBuilder::new();
        for &(s, e) in &ranges {
            for v in s..e {
                builder.add_single(v).unwrap();
            }
        }
        prop_assert_eq!(builder.build().unwrap(), whole);
    }

    /// Property: ranges round-trip through iteration.
    #[test]
    fn prop_ranges_round_trip(ranges in ranges_strategy()) {
        let set = InversionList::from_ranges(ranges);
        let again = InversionList::from_ranges(set.iter_ranges());
        prop_assert_eq!(again.boundaries(), set.boundaries());
    }

    /// Property: builder complement matches set complement.
    #[test]
    fn prop_builder_complement(ranges in ranges_strategy()) {
        let set = InversionList::from_ranges(ranges);
        let mut builder = InversionListBuilder::from_set(&set);
        builder.complement().unwrap();
        prop_assert_eq!(builder.build().unwrap(), set.complement());
    }
}
