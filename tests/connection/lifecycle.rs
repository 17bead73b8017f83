//! Connection Lifecycle Tests
//!
//! absent → present → absent, failure handling and config loading.

use crate::common::*;
use std::sync::Arc;

#[test]
fn first_operation_creates_connection() {
    let tc = TestCluster::new();
    assert!(!tc.manager().is_connected());

    tc.tables.table_exists("t").unwrap();
    assert!(tc.manager().is_connected());
    assert_eq!(tc.stats().connections_opened, 1);

    // Further operations reuse it
    tc.tables.table_exists("t").unwrap();
    tc.tables.list_tables().unwrap();
    assert_eq!(tc.stats().connections_opened, 1);
}

#[test]
fn release_then_reacquire_builds_new_connection() {
    let tc = TestCluster::new();
    tc.tables.table_exists("t").unwrap();
    let first = tc.manager().connection_id().unwrap();

    tc.manager().release();
    assert!(!tc.manager().is_connected());
    assert_eq!(tc.stats().connections_closed, 1);

    tc.tables.table_exists("t").unwrap();
    let second = tc.manager().connection_id().unwrap();
    assert_ne!(first, second);
    assert_eq!(tc.stats().connections_opened, 2);
}

#[test]
fn release_is_idempotent() {
    let tc = TestCluster::new();
    tc.manager().release();
    tc.tables.table_exists("t").unwrap();
    tc.manager().release();
    tc.manager().release();
    assert_eq!(tc.stats().connections_closed, 1);
}

#[test]
fn release_completes_when_close_fails() {
    let tc = TestCluster::new();
    tc.tables.table_exists("t").unwrap();
    tc.cluster.faults().fail_close(true);

    tc.manager().release();
    assert!(!tc.manager().is_connected());
}

#[test]
fn connection_failure_is_typed_and_recoverable() {
    let tc = TestCluster::new();
    tc.cluster.faults().refuse_connections(true);

    let err = tc.tables.create_table("t", &["f"]).unwrap_err();
    assert!(matches!(err, Error::ConnectionFailure { .. }));
    assert!(err.is_retryable());
    assert!(!tc.manager().is_connected());

    tc.cluster.faults().refuse_connections(false);
    tc.tables.create_table("t", &["f"]).unwrap();
    assert!(tc.tables.table_exists("t").unwrap());
}

#[test]
fn invalid_config_surfaces_as_connection_failure() {
    let cluster = MemCluster::new();
    let config = ClientConfig {
        quorum: Vec::new(),
        ..ClientConfig::default()
    };
    let manager = ConnectionManager::new(config, MemConnector::new(Arc::clone(&cluster)));
    let tables = Tables::new(Arc::new(manager));

    assert!(matches!(
        tables.table_exists("t"),
        Err(Error::ConnectionFailure { .. })
    ));
    assert_eq!(cluster.stats().connections_opened, 0);
}

#[test]
fn manager_built_from_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(cellgate::CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "quorum = [\"hadoop01\", \"hadoop02\", \"hadoop03\"]\nclient_port = 2181\nmaster_port = 60000\n",
    )
    .unwrap();

    let config = ClientConfig::from_file(&path).unwrap();
    assert_eq!(config.quorum_string(), "hadoop01,hadoop02,hadoop03");

    let cluster = MemCluster::new();
    let manager = Arc::new(ConnectionManager::new(
        config.clone(),
        MemConnector::new(Arc::clone(&cluster)),
    ));
    assert_eq!(manager.config(), &config);
    manager.acquire().unwrap();
    assert!(manager.is_connected());
}

#[test]
fn dropping_last_facade_releases_connection() {
    let tc = TestCluster::new();
    let cluster = Arc::clone(&tc.cluster);
    tc.tables.table_exists("t").unwrap();

    drop(tc);
    assert_eq!(cluster.stats().connections_closed, 1);
}
