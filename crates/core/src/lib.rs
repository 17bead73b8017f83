//! Core types and traits for cellgate
//!
//! This crate defines the foundational types used throughout the system:
//! - TableName, ColumnFamily: validated identifiers
//! - RowKey, Qualifier, CellValue: byte-string addresses and values
//! - TableDescriptor: table schema for creation
//! - Get, Put, Delete, MutationBatch: requests sent through a table handle
//! - RowResult: qualifier → value map returned by reads
//! - ClientConfig: quorum and port settings, loadable from TOML
//! - Error, ClientError: error type hierarchy
//! - Traits: client library boundary (Connector, Connection, Admin, Table)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod mutation;
pub mod row;
pub mod traits;
pub mod types;

pub use config::{ClientConfig, CONFIG_FILE_NAME};
pub use error::{ClientError, ClientResult, Error, Operation, Result};
pub use mutation::{Cell, Delete, Get, MutationBatch, Put};
pub use row::RowResult;
pub use traits::{Admin, Connection, Connector, Table};
pub use types::{CellValue, ColumnFamily, Qualifier, RowKey, TableDescriptor, TableName};
