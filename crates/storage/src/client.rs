//! Client library implementation over a [`MemCluster`]
//!
//! `MemConnector` → `MemConnection` → (`MemAdmin` | `MemTableHandle`), the
//! same shape as a networked client. Every handle counts its open and close
//! in the cluster stats, and every request counts as one remote call, so
//! tests can observe leaks and confirm that validation happened before any
//! request was made.
//!
//! Handles do not close themselves on drop; an unclosed handle shows up as
//! a leak in [`crate::StatsSnapshot::open_handles`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use cellgate_core::{
    Admin, ClientConfig, ClientError, ClientResult, Connection, Connector, Delete, Get, Operation,
    Put, RowResult, Table, TableDescriptor, TableName,
};

use crate::cluster::MemCluster;

/// Connects to a [`MemCluster`]
#[derive(Debug, Clone)]
pub struct MemConnector {
    cluster: Arc<MemCluster>,
}

impl MemConnector {
    /// Connector for `cluster`
    pub fn new(cluster: Arc<MemCluster>) -> Self {
        Self { cluster }
    }
}

impl Connector for MemConnector {
    fn connect(&self, config: &ClientConfig) -> ClientResult<Arc<dyn Connection>> {
        self.cluster.counters().record_connect_attempt();
        config.validate().map_err(|e| ClientError::Unreachable {
            reason: e.to_string(),
        })?;
        self.cluster.faults().check_connect()?;

        self.cluster.counters().record_connection_opened();
        debug!(
            target: "cellgate::memstore",
            quorum = %config.quorum_string(),
            client_port = config.client_port,
            "Connection established"
        );
        Ok(Arc::new(MemConnection {
            cluster: Arc::clone(&self.cluster),
            closed: AtomicBool::new(false),
        }))
    }
}

/// Connection to a [`MemCluster`]
#[derive(Debug)]
pub struct MemConnection {
    cluster: Arc<MemCluster>,
    closed: AtomicBool,
}

impl MemConnection {
    fn ensure_open(&self) -> ClientResult<()> {
        if self.is_closed() {
            Err(ClientError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Connection for MemConnection {
    fn admin(&self) -> ClientResult<Box<dyn Admin>> {
        self.ensure_open()?;
        self.cluster.faults().check(Operation::OpenAdmin)?;
        self.cluster.counters().record_admin_opened();
        Ok(Box::new(MemAdmin {
            cluster: Arc::clone(&self.cluster),
            closed: false,
        }))
    }

    fn table(&self, table: &TableName) -> ClientResult<Box<dyn Table>> {
        self.ensure_open()?;
        self.cluster.faults().check(Operation::OpenTable)?;
        self.cluster.counters().record_table_opened();
        Ok(Box::new(MemTableHandle {
            cluster: Arc::clone(&self.cluster),
            name: table.clone(),
            closed: false,
        }))
    }

    fn close(&self) -> ClientResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.cluster.counters().record_connection_closed();
        self.cluster.faults().check_close()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Administrative handle on a [`MemCluster`]
#[derive(Debug)]
pub struct MemAdmin {
    cluster: Arc<MemCluster>,
    closed: bool,
}

impl MemAdmin {
    /// Common prologue: handle open, fault check, count the call
    fn request(&self, operation: Operation) -> ClientResult<()> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        self.cluster.faults().check(operation)?;
        self.cluster.counters().record_remote_call();
        Ok(())
    }
}

impl Admin for MemAdmin {
    fn table_exists(&self, table: &TableName) -> ClientResult<bool> {
        self.request(Operation::TableExists)?;
        Ok(self.cluster.contains(table))
    }

    fn create_table(&self, descriptor: &TableDescriptor) -> ClientResult<()> {
        self.request(Operation::CreateTable)?;
        self.cluster.create(descriptor)
    }

    fn is_table_enabled(&self, table: &TableName) -> ClientResult<bool> {
        self.request(Operation::IsTableEnabled)?;
        Ok(self.cluster.lookup(table)?.is_enabled())
    }

    fn disable_table(&self, table: &TableName) -> ClientResult<()> {
        self.request(Operation::DisableTable)?;
        self.cluster.disable(table)
    }

    fn enable_table(&self, table: &TableName) -> ClientResult<()> {
        self.request(Operation::EnableTable)?;
        self.cluster.enable(table)
    }

    fn delete_table(&self, table: &TableName) -> ClientResult<()> {
        self.request(Operation::DeleteTable)?;
        self.cluster.remove(table)
    }

    fn list_tables(&self) -> ClientResult<Vec<TableName>> {
        self.request(Operation::ListTables)?;
        Ok(self.cluster.names())
    }

    fn close(&mut self) -> ClientResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cluster.counters().record_admin_closed();
        self.cluster.faults().check_close()
    }
}

/// Data handle on one table of a [`MemCluster`]
#[derive(Debug)]
pub struct MemTableHandle {
    cluster: Arc<MemCluster>,
    name: TableName,
    closed: bool,
}

impl MemTableHandle {
    fn request(&self, operation: Operation) -> ClientResult<()> {
        if self.closed {
            return Err(ClientError::Closed);
        }
        self.cluster.faults().check(operation)?;
        self.cluster.counters().record_remote_call();
        Ok(())
    }
}

impl Table for MemTableHandle {
    fn name(&self) -> &TableName {
        &self.name
    }

    fn get(&self, get: &Get) -> ClientResult<RowResult> {
        self.request(Operation::Get)?;
        self.cluster.lookup(&self.name)?.get(get)
    }

    fn put(&self, put: &Put) -> ClientResult<()> {
        self.request(Operation::Put)?;
        self.cluster
            .lookup(&self.name)?
            .apply_puts(std::slice::from_ref(put))
    }

    fn put_batch(&self, puts: &[Put]) -> ClientResult<()> {
        self.request(Operation::PutBatch)?;
        self.cluster.lookup(&self.name)?.apply_puts(puts)
    }

    fn delete(&self, delete: &Delete) -> ClientResult<()> {
        self.request(Operation::Delete)?;
        self.cluster.lookup(&self.name)?.delete(delete)
    }

    fn close(&mut self) -> ClientResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cluster.counters().record_table_closed();
        self.cluster.faults().check_close()
    }
}
