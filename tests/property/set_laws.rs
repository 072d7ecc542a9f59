//! Set algebra and query laws.
//!
//! - Membership agrees with range iteration for every value
//! - Union is commutative, A ∩ ¬A and A \ A are empty
//! - |A ∪ B| + |A ∩ B| = |A| + |B|
//! - Every algebra result is canonical

use proptest::prelude::*;
use uniprops::InversionList;

use crate::common::{assert_canonical, set_strategy, UNIVERSE};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: contains(v) iff v lies in some yielded range.
    #[test]
    fn prop_membership_matches_ranges(set in set_strategy()) {
        let ranges: Vec<_> = set.iter_ranges().collect();
        for v in 0..UNIVERSE + 8 {
            let in_range = ranges.iter().any(|&(s, e)| s <= v && v < e);
            prop_assert_eq!(set.contains(v), in_range, "value {}", v);
        }
    }

    /// Property: yielded ranges are ascending, non-empty, non-adjacent.
    #[test]
    fn prop_ranges_are_disjoint_and_gapped(set in set_strategy()) {
        let ranges: Vec<_> = set.iter_ranges().collect();
        prop_assert_eq!(ranges.len(), set.range_count());
        for &(s, e) in &ranges {
            prop_assert!(s < e);
        }
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].1 < pair[1].0, "ranges touch: {:?}", pair);
        }
    }

    /// Property: union is commutative.
    #[test]
    fn prop_union_commutes(a in set_strategy(), b in set_strategy()) {
        prop_assert_eq!(a.union(&b), b.union(&a));
    }

    /// Property: intersect is commutative.
    #[test]
    fn prop_intersect_commutes(a in set_strategy(), b in set_strategy()) {
        prop_assert_eq!(a.intersect(&b), b.intersect(&a));
    }

    /// Property: A ∩ complement(A) is empty.
    #[test]
    fn prop_intersect_complement_is_empty(a in set_strategy()) {
        prop_assert!(a.intersect(&a.complement()).is_empty());
        prop_assert!(a.intersect(&a.complement_within(UNIVERSE)).is_empty());
    }

    /// Property: A ∪ complement(A) is the whole domain.
    #[test]
    fn prop_union_complement_is_all(a in set_strategy()) {
        prop_assert_eq!(a.union(&a.complement()), InversionList::all());
    }

    /// Property: A \ A is empty.
    #[test]
    fn prop_subtract_self_is_empty(a in set_strategy()) {
        prop_assert!(a.subtract(&a).is_empty());
    }

    /// Property: inclusion-exclusion on sizes.
    #[test]
    fn prop_inclusion_exclusion(a in set_strategy(), b in set_strategy()) {
        let union = a.union(&b);
        let inter = a.intersect(&b);
        prop_assert_eq!(union.size() + inter.size(), a.size() + b.size());
    }

    /// Property: every operation yields canonical output.
    #[test]
    fn prop_algebra_is_canonical(a in set_strategy(), b in set_strategy()) {
        for set in [a.union(&b), a.intersect(&b), a.subtract(&b), a.complement()] {
            assert_canonical(&set);
        }
    }

    /// Property: A \ B has no member of B and only members of A.
    #[test]
    fn prop_subtract_membership(a in set_strategy(), b in set_strategy(), v in 0..UNIVERSE) {
        let diff = a.subtract(&b);
        prop_assert_eq!(diff.contains(v), a.contains(v) && !b.contains(v));
    }

    /// Property: complement is an involution.
    #[test]
    fn prop_double_complement(a in set_strategy()) {
        prop_assert_eq!(a.complement().complement(), a);
    }

    /// Property: union contains both operands.
    #[test]
    fn prop_union_is_superset(a in set_strategy(), b in set_strategy()) {
        let union = a.union(&b);
        prop_assert!(union.contains_set(&a));
        prop_assert!(union.contains_set(&b));
    }
}

#[test]
fn test_ranges_round_trip_example() {
    let set = InversionList::from_ranges([(0, 5), (10, 15)]);
    assert_eq!(set.iter_ranges().collect::<Vec<_>>(), vec![(0, 5), (10, 15)]);
    // Restartable: a second pass yields the same sequence.
    assert_eq!(set.iter_ranges().collect::<Vec<_>>(), vec![(0, 5), (10, 15)]);
    assert_eq!(set.size(), 10);
}

#[test]
fn test_domain_edges() {
    let low = InversionList::from_ranges([(0, 2)]);
    let rest = low.complement();
    assert!(!rest.contains(0) && !rest.contains(1) && rest.contains(2));
    assert!(rest.contains(0x10FFFF));
    assert_eq!(rest.boundaries(), &[2, 0x110000]);

    let all = InversionList::all();
    assert!(all.subtract(&all).is_empty());
    assert!(all.contains_range(0, 0x110000));
    assert!(!all.contains_range(0x10FFFF, 0x110001));
    assert!(!all.contains(0x110000));
}
