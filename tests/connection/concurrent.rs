//! Concurrent Connection Tests
//!
//! N threads racing to acquire the shared connection construct exactly one,
//! or all see ConnectionFailure when construction fails.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

#[test]
fn concurrent_acquire_constructs_exactly_one() {
    let tc = TestCluster::new();
    // Widen the race window
    tc.cluster
        .faults()
        .set_connect_latency(Duration::from_millis(25));

    let manager = Arc::clone(tc.manager());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                manager.acquire()
            })
        })
        .collect();

    let conns: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().expect("acquire should succeed"))
        .collect();

    assert_eq!(conns.len(), THREADS);
    assert_eq!(tc.stats().connections_opened, 1);
    assert_eq!(tc.stats().connect_attempts, 1);
    assert!(conns.iter().all(|c| Arc::ptr_eq(c, &conns[0])));
}

#[test]
fn concurrent_acquire_all_fail_when_construction_fails() {
    let tc = TestCluster::new();
    tc.cluster.faults().refuse_connections(true);

    let manager = Arc::clone(tc.manager());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                manager.acquire().map(|_| ())
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(matches!(result, Err(Error::ConnectionFailure { .. })));
    }
    assert_eq!(tc.stats().connections_opened, 0);
    assert!(!manager.is_connected());
}

#[test]
fn concurrent_acquire_and_release_never_leak_connections() {
    let tc = TestCluster::new();
    let manager = Arc::clone(tc.manager());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    if i % 2 == 0 {
                        manager.acquire().unwrap();
                    } else {
                        manager.release();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    manager.release();

    let stats = tc.stats();
    assert_eq!(stats.connections_opened, stats.connections_closed);
}

#[test]
fn concurrent_writers_on_distinct_rows() {
    let tc = TestCluster::new();
    let t = tc.with_table("writers", &["f"]);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|w| {
            let tables = tc.tables.clone();
            let t = t.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..25 {
                    let row = format!("w{}-r{}", w, i);
                    tables
                        .put_row(&t, row.as_str(), "f", &["a", "b"], &["1", "2"])
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for w in 0..8 {
        for i in 0..25 {
            let row = tc.tables.get_row(&t, format!("w{}-r{}", w, i), "f").unwrap();
            assert_eq!(row.len(), 2);
        }
    }
    assert_eq!(tc.stats().connections_opened, 1);
    tc.assert_no_leaks();
}
