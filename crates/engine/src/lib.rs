//! Connection management and table operations for cellgate
//!
//! This crate orchestrates the lower layers:
//! - ConnectionManager: the single shared, lazily created connection
//! - Tables: table administration and row CRUD over that connection
//! - Scoped handles: per-call admin/table handles released on every exit path
//!
//! The engine is the only component that knows about:
//! - Connection lifecycle (acquire/release)
//! - Validation ordering (before any remote resource is touched)
//! - Mapping client errors into caller-facing errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod connection;
mod scoped;
pub mod tables;

pub use connection::{ConnectionId, ConnectionManager, SharedConnection};
pub use tables::Tables;
