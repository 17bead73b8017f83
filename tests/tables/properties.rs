//! Property Tests
//!
//! Whatever distinct qualifiers are written with put_row come back from
//! get_row exactly, and nothing else does.

use crate::common::*;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn cell_maps() -> impl Strategy<Value = BTreeMap<Vec<u8>, Vec<u8>>> {
    prop::collection::btree_map(
        prop::collection::vec(any::<u8>(), 1..8),
        prop::collection::vec(any::<u8>(), 0..16),
        1..12,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn put_row_get_row_round_trip(row in prop::collection::vec(any::<u8>(), 1..8), cells in cell_maps()) {
        let tc = TestCluster::new();
        let t = tc.with_table("prop", &["f"]);

        let qualifiers: Vec<&[u8]> = cells.keys().map(|k| k.as_slice()).collect();
        let values: Vec<&[u8]> = cells.values().map(|v| v.as_slice()).collect();
        tc.tables.put_row(&t, row.clone(), "f", &qualifiers, &values).unwrap();

        let got: BTreeMap<Vec<u8>, Vec<u8>> = tc
            .tables
            .get_row(&t, row, "f")
            .unwrap()
            .into_map()
            .into_iter()
            .map(|(q, v)| (q.into_bytes(), v.into_bytes()))
            .collect();
        prop_assert_eq!(got, cells);
    }

    #[test]
    fn mismatched_lengths_always_rejected(q in 0usize..6, v in 0usize..6) {
        prop_assume!(q != v);
        let tc = TestCluster::new();
        let t = tc.with_table("mismatch", &["f"]);
        let qualifiers: Vec<String> = (0..q).map(|i| format!("q{}", i)).collect();
        let values: Vec<String> = (0..v).map(|i| format!("v{}", i)).collect();

        let result = tc.tables.put_row(&t, "k", "f", &qualifiers, &values);
        prop_assert_eq!(result, Err(Error::LengthMismatch { qualifiers: q, values: v }));
        prop_assert!(tc.tables.get_row(&t, "k", "f").unwrap().is_empty());
    }
}
