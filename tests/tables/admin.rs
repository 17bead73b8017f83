//! Table Lifecycle Tests
//!
//! create / exists / drop semantics, including the no-op and
//! already-exists paths.

use crate::common::*;

#[test]
fn create_then_exists() {
    let tc = TestCluster::new();
    let name = tc.with_table("users", &["info", "meta"]);
    assert!(tc.tables.table_exists(&name).unwrap());
}

#[test]
fn create_existing_returns_already_exists_and_keeps_table() {
    let tc = TestCluster::new();
    let name = tc.with_table("dup", &["f"]);
    tc.tables.put_row(&name, "k", "f", &["q"], &["v"]).unwrap();

    let err = tc.tables.create_table(&name, &["other"]).unwrap_err();
    assert_eq!(err, Error::AlreadyExists { table: name.clone() });

    // Original schema and data untouched
    assert_eq!(
        tc.tables.get_value(&name, "k", "f", "q").unwrap(),
        Some(value("v"))
    );
    assert!(tc.tables.get_row(&name, "k", "other").is_err());
}

#[test]
fn create_with_invalid_arguments_does_not_contact_store() {
    let tc = TestCluster::new();
    let none: [&str; 0] = [];

    for result in [
        tc.tables.create_table("", &["f"]),
        tc.tables.create_table("  ", &["f"]),
        tc.tables.create_table("t", &none),
    ] {
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    let stats = tc.stats();
    assert_eq!(stats.connect_attempts, 0);
    assert_eq!(stats.remote_calls, 0);
    assert!(!tc.manager().is_connected());
}

#[test]
fn drop_missing_table_is_noop() {
    let tc = TestCluster::new();
    tc.tables.drop_table("never_created").unwrap();
    assert_eq!(tc.cluster.table_count(), 0);
    tc.assert_no_leaks();
}

#[test]
fn drop_existing_table_then_exists_is_false() {
    let tc = TestCluster::new();
    let name = tc.with_table("gone", &["f"]);
    tc.tables.put_row(&name, "k", "f", &["q"], &["v"]).unwrap();

    tc.tables.drop_table(&name).unwrap();
    assert!(!tc.tables.table_exists(&name).unwrap());

    // Re-creating starts from an empty table
    tc.tables.create_table(&name, &["f"]).unwrap();
    assert!(tc.tables.get_row(&name, "k", "f").unwrap().is_empty());
}

#[test]
fn drop_twice_is_fine() {
    let tc = TestCluster::new();
    let name = tc.with_table("twice", &["f"]);
    tc.tables.drop_table(&name).unwrap();
    tc.tables.drop_table(&name).unwrap();
}

#[test]
fn disable_failure_is_reported_with_context() {
    let tc = TestCluster::new();
    let name = tc.with_table("stuck", &["f"]);
    tc.cluster.faults().fail(
        Operation::DisableTable,
        ClientError::Rejected {
            reason: "region in transition".into(),
        },
    );

    let err = tc.tables.drop_table(&name).unwrap_err();
    match err {
        Error::RemoteOperationFailure {
            operation,
            table,
            reason,
        } => {
            assert_eq!(operation, Operation::DisableTable);
            assert_eq!(table, name);
            assert!(reason.contains("region in transition"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // Table is still there and usable once the fault clears
    tc.cluster.faults().clear();
    assert!(tc.tables.table_exists(&name).unwrap());
    tc.assert_no_leaks();
}

#[test]
fn list_tables_reflects_creates_and_drops() {
    let tc = TestCluster::new();
    let a = tc.with_table("list", &["f"]);
    let b = tc.with_table("list", &["f"]);
    tc.tables.drop_table(&a).unwrap();

    let names: Vec<String> = tc
        .tables
        .list_tables()
        .unwrap()
        .into_iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, vec![b]);
}
