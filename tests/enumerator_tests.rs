use mbus_telegen::{enumerate_codes, Code, CodeGroup, TelegenError};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn codes(list: &[u8]) -> BTreeSet<Code> {
    list.iter().copied().map(Code).collect()
}

#[test]
fn test_dib_range_with_exclusions() {
    let groups = enumerate_codes(0x00, 0x0F, 16, &codes(&[0x05, 0x06, 0x07, 0x0F, 0x0D])).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count(), 11);
    assert_eq!(
        groups[0].to_row(),
        vec!["11", "00", "01", "02", "03", "04", "08", "09", "0A", "0B", "0C", "0E"]
    );
}

#[test]
fn test_vib_range_default_grouping() {
    let groups = enumerate_codes(0x00, 0x7F, 8, &BTreeSet::new()).unwrap();
    assert_eq!(groups.len(), 16);
    assert!(groups.iter().all(|g| g.count() == 8));
    assert_eq!(groups[15].codes().last(), Some(&Code(0x7F)));
}

#[test]
fn test_exclusions_are_untouched() {
    let exclusions = codes(&[0x01, 0x02]);
    let before = exclusions.clone();
    let _ = enumerate_codes(0x00, 0x0F, 4, &exclusions).unwrap();
    assert_eq!(exclusions, before);
}

#[test]
fn test_window_fully_excluded() {
    let groups = enumerate_codes(0x00, 0x0F, 8, &(0x00..=0x07).map(Code).collect()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].codes()[0], Code(0x08));
}

#[test]
fn test_single_code_range() {
    let groups = enumerate_codes(0x13, 0x13, 8, &BTreeSet::new()).unwrap();
    assert_eq!(groups, vec![CodeGroup::new(vec![Code(0x13)])]);
}

#[test]
fn test_zero_group_size() {
    assert!(matches!(
        enumerate_codes(0x00, 0x0F, 0, &BTreeSet::new()),
        Err(TelegenError::InvalidGroupSize(0))
    ));
}

proptest! {
    #[test]
    fn prop_all_surviving_codes_are_enumerated(
        lower in 0u8..0x80,
        upper in 0x80u8..=0xFF,
        group_size in 1usize..=32,
        excluded in proptest::collection::btree_set(any::<u8>(), 0..64),
    ) {
        let exclusions: BTreeSet<Code> = excluded.iter().copied().map(Code).collect();
        let groups = enumerate_codes(lower, upper, group_size, &exclusions).unwrap();

        let flattened: Vec<u8> = groups
            .iter()
            .flat_map(|g| g.codes().iter().map(|c| c.value()))
            .collect();
        let expected: Vec<u8> = (lower..=upper).filter(|v| !excluded.contains(v)).collect();
        prop_assert_eq!(flattened, expected);
    }
}
