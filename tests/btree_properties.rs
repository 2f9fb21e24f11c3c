//! Property tests for the B-tree index.
//!
//! Random operation sequences are applied to both the index and
//! `std::collections::BTreeMap`; after every step the index must validate and
//! agree with the reference map.

use std::collections::BTreeMap;

use btindex::{BTreeIndex, Error};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Upsert(u16, u32),
    Delete(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small key space so inserts collide and deletes hit
    let key = 0u16..300;
    prop_oneof![
        3 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Upsert(k, v)),
        2 => key.prop_map(Op::Delete),
    ]
}

fn assert_matches_reference(index: &BTreeIndex<u16, u32>, reference: &BTreeMap<u16, u32>) {
    let actual: Vec<(u16, u32)> = index.in_order().into_iter().map(|(k, v)| (*k, *v)).collect();
    let expected: Vec<(u16, u32)> = reference.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(actual, expected);
    assert_eq!(index.len(), reference.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_operations_match_btreemap(
        t in 2usize..=5,
        ops in prop::collection::vec(op_strategy(), 1..400),
    ) {
        let mut index = BTreeIndex::new(t).unwrap();
        let mut reference = BTreeMap::new();

        for op in ops {
            match op.clone() {
                Op::Insert(k, v) => {
                    let result = index.insert(k, v);
                    if reference.contains_key(&k) {
                        prop_assert_eq!(result, Err(Error::DuplicateKey));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        reference.insert(k, v);
                    }
                }
                Op::Upsert(k, v) => {
                    prop_assert_eq!(index.upsert(k, v), reference.insert(k, v));
                }
                Op::Delete(k) => {
                    let before = index.dump();
                    let removed = index.remove(&k);
                    prop_assert_eq!(removed, reference.remove(&k));
                    if removed.is_none() {
                        prop_assert_eq!(index.dump(), before);
                    }
                    prop_assert_eq!(index.search(&k), None);
                }
            }

            if let Err(e) = index.validate() {
                return Err(TestCaseError::fail(format!("{} after {:?}", e, op)));
            }
        }

        assert_matches_reference(&index, &reference);
        for (k, v) in &reference {
            prop_assert_eq!(index.search(k), Some(v));
        }
    }

    #[test]
    fn prop_delete_everything_empties_tree(
        t in 2usize..=6,
        keys in prop::collection::btree_set(any::<u16>(), 0..500),
        seed in any::<u64>(),
    ) {
        let mut index = BTreeIndex::new(t).unwrap();
        for &k in &keys {
            index.insert(k, u32::from(k)).unwrap();
        }
        index.validate().unwrap();

        // Delete in a seed-dependent rotation of the sorted order
        let keys: Vec<u16> = keys.into_iter().collect();
        let offset = if keys.is_empty() { 0 } else { (seed as usize) % keys.len() };
        for k in keys[offset..].iter().chain(&keys[..offset]) {
            prop_assert!(index.delete(k));
            index.validate().unwrap();
        }

        prop_assert!(index.is_empty());
        prop_assert!(index.in_order().is_empty());
        prop_assert_eq!(index.height(), 1);
        prop_assert_eq!(index.node_count(), 1);
    }

    #[test]
    fn prop_in_order_is_sorted(
        t in 2usize..=8,
        keys in prop::collection::vec(any::<i32>(), 0..300),
    ) {
        let mut index = BTreeIndex::new(t).unwrap();
        for k in &keys {
            index.upsert(*k, ());
        }

        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.dedup();

        let actual: Vec<i32> = index.keys().into_iter().copied().collect();
        prop_assert_eq!(actual, expected);
        index.validate().unwrap();
    }
}
