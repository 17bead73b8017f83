//! Row CRUD Tests
//!
//! get_value / get_row / put_row / put_batch / delete_family.

use crate::common::*;

#[test]
fn put_row_then_get_row_round_trip() {
    let tc = TestCluster::new();
    let t = tc.with_table("rt", &["f"]);
    tc.tables
        .put_row(&t, "k", "f", &["q1", "q2"], &["v1", "v2"])
        .unwrap();

    let row = tc.tables.get_row(&t, "k", "f").unwrap();
    let cells: Vec<(String, String)> = row
        .iter()
        .map(|(q, v)| (q.to_string(), v.to_string()))
        .collect();
    assert_eq!(
        cells,
        vec![
            ("q1".to_string(), "v1".to_string()),
            ("q2".to_string(), "v2".to_string())
        ]
    );
}

#[test]
fn put_row_overwrites_existing_cells() {
    let tc = TestCluster::new();
    let t = tc.with_table("ow", &["f"]);
    tc.tables.put_row(&t, "k", "f", &["q"], &["old"]).unwrap();
    tc.tables.put_row(&t, "k", "f", &["q"], &["new"]).unwrap();
    assert_eq!(tc.tables.get_value(&t, "k", "f", "q").unwrap(), Some(value("new")));
}

#[test]
fn put_row_mismatched_lengths_writes_nothing() {
    let tc = TestCluster::new();
    let t = tc.with_table("mm", &["f"]);
    let before = tc.stats();

    let err = tc
        .tables
        .put_row(&t, "k", "f", &["q1"], &["v1", "v2"])
        .unwrap_err();
    assert!(matches!(
        err,
        Error::LengthMismatch {
            qualifiers: 1,
            values: 2
        }
    ));
    assert!(err.is_validation());

    let after = tc.stats();
    assert_eq!(after.remote_calls, before.remote_calls);
    assert_eq!(after.tables_opened, before.tables_opened);
    assert!(tc.tables.get_row(&t, "k", "f").unwrap().is_empty());
}

#[test]
fn get_value_distinguishes_absent_from_empty() {
    let tc = TestCluster::new();
    let t = tc.with_table("ae", &["f"]);
    tc.tables.put_row(&t, "k", "f", &["empty"], &[""]).unwrap();

    let empty = tc.tables.get_value(&t, "k", "f", "empty").unwrap();
    assert_eq!(empty, Some(CellValue::default()));

    let absent = tc.tables.get_value(&t, "k", "f", "missing").unwrap();
    assert_eq!(absent, None);
}

#[test]
fn binary_keys_and_values() {
    let tc = TestCluster::new();
    let t = tc.with_table("bin", &["f"]);
    let row = vec![0u8, 0xFF, 0x10];
    let qual: &[u8] = &[0x01, 0x02];
    let val: &[u8] = &[0xDE, 0xAD, 0xBE, 0xEF];

    tc.tables
        .put_row(&t, row.clone(), "f", &[qual], &[val])
        .unwrap();
    let got = tc.tables.get_value(&t, row, "f", qual).unwrap().unwrap();
    assert_eq!(got.as_bytes(), val);
}

#[test]
fn get_row_on_unknown_family_is_remote_failure() {
    let tc = TestCluster::new();
    let t = tc.with_table("uf", &["f"]);
    let err = tc.tables.get_row(&t, "k", "nope").unwrap_err();
    assert!(matches!(
        err,
        Error::RemoteOperationFailure {
            operation: Operation::Get,
            ..
        }
    ));
    tc.assert_no_leaks();
}

#[test]
fn operations_on_missing_table_fail_remotely() {
    let tc = TestCluster::new();
    let err = tc
        .tables
        .put_row("no_such_table", "k", "f", &["q"], &["v"])
        .unwrap_err();
    match err {
        Error::RemoteOperationFailure { table, reason, .. } => {
            assert_eq!(table, "no_such_table");
            assert!(reason.contains("table not found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    tc.assert_no_leaks();
}

#[test]
fn put_batch_empty_is_noop_without_remote_call() {
    let tc = TestCluster::new();
    tc.tables.put_batch("anything", &MutationBatch::new()).unwrap();
    tc.tables.put_batch("", &MutationBatch::new()).unwrap();
    let stats = tc.stats();
    assert_eq!(stats.connect_attempts, 0);
    assert_eq!(stats.remote_calls, 0);
}

#[test]
fn put_batch_writes_every_row() {
    let tc = TestCluster::new();
    let t = tc.with_table("batch", &["f", "g"]);

    let mut batch = MutationBatch::new();
    for i in 0..10 {
        batch.push(
            Put::new(RowKey::from(format!("row{:02}", i)))
                .add_column(cf("f"), "n", i.to_string())
                .add_column(cf("g"), "sq", (i * i).to_string()),
        );
    }
    tc.tables.put_batch(&t, &batch).unwrap();

    for i in 0..10 {
        let key = format!("row{:02}", i);
        assert_eq!(
            tc.tables.get_value(&t, key.as_str(), "f", "n").unwrap(),
            Some(value(&i.to_string()))
        );
        assert_eq!(
            tc.tables.get_value(&t, key.as_str(), "g", "sq").unwrap(),
            Some(value(&(i * i).to_string()))
        );
    }
}

#[test]
fn put_batch_with_bad_family_applies_nothing() {
    let tc = TestCluster::new();
    let t = tc.with_table("atomic", &["f"]);
    let batch = MutationBatch::new()
        .with(Put::new(RowKey::from("a")).add_column(cf("f"), "q", "v"))
        .with(Put::new(RowKey::from("b")).add_column(cf("bogus"), "q", "v"));

    assert!(tc.tables.put_batch(&t, &batch).is_err());
    assert!(tc.tables.get_row(&t, "a", "f").unwrap().is_empty());
}

#[test]
fn delete_family_then_get_row_is_empty() {
    let tc = TestCluster::new();
    let t = tc.with_table("del", &["f", "g"]);
    tc.tables
        .put_row(&t, "k", "f", &["a", "b", "c"], &["1", "2", "3"])
        .unwrap();
    tc.tables.put_row(&t, "k", "g", &["x"], &["9"]).unwrap();

    tc.tables.delete_family(&t, "k", "f").unwrap();

    assert!(tc.tables.get_row(&t, "k", "f").unwrap().is_empty());
    assert_eq!(tc.tables.get_value(&t, "k", "g", "x").unwrap(), Some(value("9")));
}

#[test]
fn delete_family_on_missing_row_succeeds() {
    let tc = TestCluster::new();
    let t = tc.with_table("delmiss", &["f"]);
    tc.tables.delete_family(&t, "nobody", "f").unwrap();
}
