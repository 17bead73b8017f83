//! cellgate - connection management and table/row CRUD for column-family stores
//!
//! cellgate keeps one shared, lazily created connection to a column-family
//! store and exposes table lifecycle (create/drop/exists) and row-level
//! get/put/delete over it. The store itself is reached through a client
//! library abstracted by the [`Connector`] trait family.
//!
//! # Quick Start
//!
//! ```ignore
//! use cellgate::{in_process, ClientConfig};
//!
//! // In-process store, handy for tests and embedding
//! let (tables, _cluster) = in_process(ClientConfig::default());
//!
//! tables.create_table("users", &["info"])?;
//! tables.put_row("users", "u1", "info", &["name"], &["ann"])?;
//! assert_eq!(tables.get_value("users", "u1", "info", "name")?.unwrap().as_bytes(), b"ann");
//! ```
//!
//! # Architecture
//!
//! - `cellgate-core`: identifiers, requests, results, errors, config, client traits
//! - `cellgate-storage`: in-process implementation of the client traits
//! - `cellgate-engine`: [`ConnectionManager`] and the [`Tables`] facade

use std::sync::Arc;

pub use cellgate_core::{
    Admin, Cell, CellValue, ClientConfig, ClientError, ClientResult, ColumnFamily, Connection,
    Connector, Delete, Error, Get, MutationBatch, Operation, Put, Qualifier, Result, RowKey,
    RowResult, Table, TableDescriptor, TableName, CONFIG_FILE_NAME,
};
pub use cellgate_engine::{ConnectionId, ConnectionManager, SharedConnection, Tables};
pub use cellgate_storage::{FaultPlan, MemCluster, MemConnector, StatsSnapshot};

/// Build a [`Tables`] facade over a fresh in-process cluster
///
/// Returns the cluster too, for inspection and fault injection.
pub fn in_process(config: ClientConfig) -> (Tables, Arc<MemCluster>) {
    let cluster = MemCluster::new();
    let manager = ConnectionManager::new(config, MemConnector::new(Arc::clone(&cluster)));
    (Tables::new(Arc::new(manager)), cluster)
}
