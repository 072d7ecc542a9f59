//! Builder behavior: canonicalization, clamping, single use.

use uniprops::{InversionList, InversionListBuilder, PropsError, CODE_POINT_DOMAIN_END};

use crate::common::{assert_canonical, LOWERCASE};

#[test]
fn test_lowercase_out_of_order() {
    let mut builder = InversionListBuilder::new();
    builder.add_single(0xAA).unwrap().add_range(97, 123).unwrap();
    let set = builder.build().unwrap();
    assert_eq!(set.boundaries(), &LOWERCASE);
}

#[test]
fn test_overlapping_and_touching_merge() {
    let mut builder = InversionListBuilder::new();
    builder
        .add_range(10, 20)
        .unwrap()
        .add_range(15, 30)
        .unwrap()
        .add_range(30, 35)
        .unwrap()
        .add_range(0, 5)
        .unwrap();
    let set = builder.build().unwrap();
    assert_eq!(set.boundaries(), &[0, 5, 10, 35]);
    assert_canonical(&set);
}

#[test]
fn test_empty_and_inverted_ranges_ignored() {
    let mut builder = InversionListBuilder::new();
    builder.add_range(5, 5).unwrap().add_range(9, 3).unwrap();
    assert!(builder.build().unwrap().is_empty());
}

#[test]
fn test_clamps_to_domain() {
    let mut builder = InversionListBuilder::new();
    builder
        .add_range(0x10FFF0, u32::MAX)
        .unwrap()
        .add_single(u32::MAX)
        .unwrap();
    let set = builder.build().unwrap();
    assert_eq!(set.boundaries(), &[0x10FFF0, CODE_POINT_DOMAIN_END]);
}

#[test]
fn test_remove_splits_range() {
    let mut builder = InversionListBuilder::new();
    builder
        .add_range(97, 123)
        .unwrap()
        .remove_single(113)
        .unwrap()
        .remove_range(120, 200)
        .unwrap();
    let set = builder.build().unwrap();
    assert_eq!(set.boundaries(), &[97, 113, 114, 120]);
}

#[test]
fn test_adds_after_remove_are_kept() {
    let mut builder = InversionListBuilder::new();
    builder
        .add_range(0, 10)
        .unwrap()
        .remove_range(0, 10)
        .unwrap()
        .add_range(3, 4)
        .unwrap();
    assert_eq!(builder.build().unwrap().boundaries(), &[3, 4]);
}

#[test]
fn test_set_operations_on_builder() {
    let letters = InversionList::from_ranges([(97, 123)]);
    let vowels = InversionList::from_ranges([(97, 98), (101, 102), (105, 106), (111, 112), (117, 118)]);

    let mut builder = InversionListBuilder::from_set(&letters);
    builder.remove_set(&vowels).unwrap();
    let consonants = builder.build().unwrap();
    assert_eq!(consonants.size(), 21);
    assert!(!consonants.contains('e' as u32));

    let mut builder = InversionListBuilder::new();
    builder.add_set(&letters).unwrap().retain_set(&vowels).unwrap();
    assert_eq!(builder.build().unwrap(), vowels);
}

#[test]
fn test_complement_of_empty_is_all() {
    let mut builder = InversionListBuilder::new();
    builder.complement().unwrap();
    assert_eq!(builder.build().unwrap(), InversionList::all());
}

#[test]
fn test_build_is_single_use() {
    let mut builder = InversionListBuilder::new();
    builder.add_single(1).unwrap();
    assert!(!builder.is_finished());
    builder.build().unwrap();
    assert!(builder.is_finished());

    assert!(matches!(builder.build(), Err(PropsError::InvalidState { .. })));
    assert!(matches!(builder.add_single(2), Err(PropsError::InvalidState { .. })));
    assert!(matches!(builder.remove_single(1), Err(PropsError::InvalidState { .. })));
    assert!(matches!(builder.complement(), Err(PropsError::InvalidState { .. })));
}

#[test]
fn test_try_from_boundaries_rejects_non_canonical() {
    assert!(InversionList::try_from_boundaries(vec![1, 1]).is_err());
    assert!(InversionList::try_from_boundaries(vec![4, 2]).is_err());
    assert!(InversionList::try_from_boundaries(vec![1]).is_err());
    assert!(InversionList::try_from_boundaries(vec![0, CODE_POINT_DOMAIN_END + 1]).is_err());
    assert!(InversionList::try_from_boundaries(vec![0, CODE_POINT_DOMAIN_END]).is_ok());
}

#[test]
fn test_queries_on_lowercase() {
    let set = InversionList::try_from_boundaries(LOWERCASE.to_vec()).unwrap();
    assert!(set.contains(97));
    assert!(set.contains(122));
    assert!(!set.contains(123));
    assert!(set.contains(170));
    assert!(!set.contains(65));
    assert!(set.contains_char('q'));
    assert!(set.contains_range(100, 110));
    assert!(!set.contains_range(120, 130));
    assert_eq!(set.size(), 27);
    assert_eq!(set.range_count(), 2);
    assert_eq!(set.nth_range(1), Some((170, 171)));
    assert_eq!(set.nth_range(2), None);
    assert_eq!(set.iter_code_points().count(), 27);

    let gaps: Vec<_> = set.iter_ranges_complemented().collect();
    assert_eq!(gaps, vec![(0, 97), (123, 170), (171, CODE_POINT_DOMAIN_END)]);
}
