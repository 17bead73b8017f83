//! In-process column-family store for cellgate
//!
//! This crate implements the client library boundary from `cellgate-core`
//! against process memory:
//! - MemCluster: tables in a DashMap, shared counters and fault switches
//! - MemTable: per-table rows behind a parking_lot RwLock
//! - MemConnector / MemConnection / MemAdmin / MemTableHandle: the client
//!   handles the engine drives
//! - ClusterStats / StatsSnapshot: construction, handle and request counts
//! - FaultPlan: injected failures per operation, refused connections,
//!   failing closes, connect latency
//!
//! Useful for embedding, tests, and verifying that every per-call handle is
//! released.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod cluster;
pub mod faults;
pub mod stats;
pub mod table;

pub use client::{MemAdmin, MemConnection, MemConnector, MemTableHandle};
pub use cluster::MemCluster;
pub use faults::FaultPlan;
pub use stats::{ClusterStats, StatsSnapshot};
pub use table::MemTable;
