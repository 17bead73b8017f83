//! Instrumentation counters for the in-process store
//!
//! Counters are `SeqCst` atomics. A snapshot reads each `*_closed` counter
//! before its `*_opened` counter, so a snapshot taken while other threads
//! open and close handles never shows more closes than opens.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters owned by a cluster
#[derive(Debug, Default)]
pub struct ClusterStats {
    connect_attempts: AtomicU64,
    connections_opened: AtomicU64,
    connections_closed: AtomicU64,
    admins_opened: AtomicU64,
    admins_closed: AtomicU64,
    tables_opened: AtomicU64,
    tables_closed: AtomicU64,
    remote_calls: AtomicU64,
}

impl ClusterStats {
    pub(crate) fn record_connect_attempt(&self) {
        self.connect_attempts.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_connection_closed(&self) {
        self.connections_closed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_admin_opened(&self) {
        self.admins_opened.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_admin_closed(&self) {
        self.admins_closed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_table_opened(&self) {
        self.tables_opened.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_table_closed(&self) {
        self.tables_closed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn record_remote_call(&self) {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        let connections_closed = self.connections_closed.load(Ordering::SeqCst);
        let admins_closed = self.admins_closed.load(Ordering::SeqCst);
        let tables_closed = self.tables_closed.load(Ordering::SeqCst);
        StatsSnapshot {
            connect_attempts: self.connect_attempts.load(Ordering::SeqCst),
            connections_opened: self.connections_opened.load(Ordering::SeqCst),
            connections_closed,
            admins_opened: self.admins_opened.load(Ordering::SeqCst),
            admins_closed,
            tables_opened: self.tables_opened.load(Ordering::SeqCst),
            tables_closed,
            remote_calls: self.remote_calls.load(Ordering::SeqCst),
        }
    }
}

/// Point-in-time copy of [`ClusterStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Calls to `Connector::connect`, successful or not
    pub connect_attempts: u64,
    /// Connections successfully constructed
    pub connections_opened: u64,
    /// Connections closed
    pub connections_closed: u64,
    /// Admin handles opened
    pub admins_opened: u64,
    /// Admin handles closed
    pub admins_closed: u64,
    /// Table handles opened
    pub tables_opened: u64,
    /// Table handles closed
    pub tables_closed: u64,
    /// Schema and data requests that reached the store
    pub remote_calls: u64,
}

impl StatsSnapshot {
    /// Admin handles opened but not closed
    pub fn open_admins(&self) -> u64 {
        self.admins_opened.saturating_sub(self.admins_closed)
    }

    /// Table handles opened but not closed
    pub fn open_tables(&self) -> u64 {
        self.tables_opened.saturating_sub(self.tables_closed)
    }

    /// All per-call handles opened but not closed
    pub fn open_handles(&self) -> u64 {
        self.open_admins() + self.open_tables()
    }
}
