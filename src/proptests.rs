use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::ops::Bound;

fn validate_tree(tree: &Ebony<i64, u32>) {
    assert!(tree.is_balanced(), "black heights diverged:\n{tree}");
    assert!(tree.has_valid_coloring(), "coloring broken:\n{tree}");
    assert!(tree.is_valid_ordering(), "key order broken:\n{tree}");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i64, u32),
    Remove(i64),
    Get(i64),
    UpperBound(i64),
}

fn key_strategy() -> impl Strategy<Value = i64> + Clone {
    // A narrow key range forces overwrites, removals of present keys and
    // repeated rebalancing around the same spots.
    -100i64..=100
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        45 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Get),
        10 => key.prop_map(Op::UpperBound),
    ];
    prop::collection::vec(op, 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut tree: Ebony<i64, u32> = Ebony::new();
        let mut model: BTreeMap<i64, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(tree.insert(key, value), model.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), model.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(tree.get(&key), model.get(&key));
                }
                Op::UpperBound(key) => {
                    let expected = model
                        .range((Bound::Excluded(key), Bound::Unbounded))
                        .next()
                        .map(|(k, _)| k);
                    prop_assert_eq!(tree.upper_bound(&key), expected);
                }
            }

            prop_assert_eq!(tree.len(), model.len());
        }

        validate_tree(&tree);

        let got: Vec<(i64, u32)> = tree.iter().map(|(&k, &v)| (k, v)).collect();
        let expected: Vec<(i64, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(got, expected);

        prop_assert_eq!(tree.min(), model.keys().next());
        prop_assert_eq!(tree.max(), model.keys().next_back());
    }

    #[test]
    fn prop_full_drain(keys in prop::collection::vec(key_strategy(), 0..=300)) {
        let mut tree: Ebony<i64, u32> = Ebony::new();
        for &key in &keys {
            tree.insert(key, 0);
        }
        validate_tree(&tree);

        let present: Vec<i64> = tree.keys().copied().collect();
        for key in present {
            prop_assert!(tree.remove(&key).is_some());
            validate_tree(&tree);
        }

        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.len(), 0);
    }
}
