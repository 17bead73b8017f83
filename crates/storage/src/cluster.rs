//! MemCluster: process-local stand-in for a column-family cluster
//!
//! Holds every table in a `DashMap` keyed by name, plus the instrumentation
//! counters and fault plan shared by all connections made to it. Clone the
//! `Arc<MemCluster>` to inspect state after connections are gone.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use cellgate_core::{ClientError, ClientResult, TableDescriptor, TableName};

use crate::faults::FaultPlan;
use crate::stats::{ClusterStats, StatsSnapshot};
use crate::table::MemTable;

/// Shared state of an in-process cluster
#[derive(Debug, Default)]
pub struct MemCluster {
    tables: DashMap<TableName, Arc<MemTable>>,
    stats: ClusterStats,
    faults: FaultPlan,
}

impl MemCluster {
    /// Create an empty cluster
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Counter values right now
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Fault injection switches
    pub fn faults(&self) -> &FaultPlan {
        &self.faults
    }

    pub(crate) fn counters(&self) -> &ClusterStats {
        &self.stats
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Direct access to a stored table, bypassing the client API
    pub fn inspect(&self, name: &TableName) -> Option<Arc<MemTable>> {
        self.tables.get(name).map(|t| Arc::clone(t.value()))
    }

    pub(crate) fn lookup(&self, name: &TableName) -> ClientResult<Arc<MemTable>> {
        self.inspect(name).ok_or_else(|| Self::not_found(name))
    }

    pub(crate) fn contains(&self, name: &TableName) -> bool {
        self.tables.contains_key(name)
    }

    pub(crate) fn create(&self, descriptor: &TableDescriptor) -> ClientResult<()> {
        if descriptor.families().is_empty() {
            return Err(ClientError::Rejected {
                reason: format!(
                    "table '{}' must define at least one column family",
                    descriptor.name()
                ),
            });
        }
        match self.tables.entry(descriptor.name().clone()) {
            Entry::Occupied(_) => Err(ClientError::TableExists {
                table: descriptor.name().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(MemTable::new(descriptor.clone())));
                debug!(target: "cellgate::memstore", table = %descriptor.name(), "Table created");
                Ok(())
            }
        }
    }

    fn not_found(name: &TableName) -> ClientError {
        ClientError::TableNotFound {
            table: name.to_string(),
        }
    }

    /// Flip a table to disabled while holding its map entry
    pub(crate) fn disable(&self, name: &TableName) -> ClientResult<()> {
        let table = self.tables.get(name).ok_or_else(|| Self::not_found(name))?;
        table.disable()
    }

    /// Flip a table to enabled while holding its map entry
    pub(crate) fn enable(&self, name: &TableName) -> ClientResult<()> {
        let table = self.tables.get(name).ok_or_else(|| Self::not_found(name))?;
        table.enable()
    }

    /// Remove a disabled table
    ///
    /// The enabled check and the removal happen under the entry's shard
    /// lock, which `enable`/`disable` also take.
    pub(crate) fn remove(&self, name: &TableName) -> ClientResult<()> {
        if self
            .tables
            .remove_if(name, |_, table| !table.is_enabled())
            .is_none()
        {
            return Err(if self.contains(name) {
                ClientError::TableNotDisabled {
                    table: name.to_string(),
                }
            } else {
                Self::not_found(name)
            });
        }
        debug!(target: "cellgate::memstore", table = %name, "Table deleted");
        Ok(())
    }

    pub(crate) fn names(&self) -> Vec<TableName> {
        let mut names: Vec<TableName> = self.tables.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
