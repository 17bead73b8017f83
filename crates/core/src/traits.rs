//! Client library boundary
//!
//! The column-family store is an opaque service reached through a client
//! library. These traits are the seam between cellgate and that library:
//!
//! - [`Connector`]: builds a [`Connection`] from a [`ClientConfig`]
//! - [`Connection`]: heavyweight, thread-safe, shared; hands out handles
//! - [`Admin`]: short-lived handle for schema operations
//! - [`Table`]: short-lived handle for row operations on one table
//!
//! Handles returned by a connection must be closed by the caller. The
//! engine wraps them in guards that close on every exit path.
//!
//! Thread safety: `Connector` and `Connection` are shared across threads
//! (`Send + Sync`). `Admin` and `Table` handles are owned by a single call
//! and only need to be `Send`.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::mutation::{Delete, Get, Put};
use crate::row::RowResult;
use crate::types::{TableDescriptor, TableName};

/// Builds connections to the store
pub trait Connector: Send + Sync {
    /// Establish a new connection
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster cannot be reached.
    fn connect(&self, config: &ClientConfig) -> ClientResult<Arc<dyn Connection>>;
}

/// A live connection to the store
pub trait Connection: Send + Sync {
    /// Open an administrative handle
    fn admin(&self) -> ClientResult<Box<dyn Admin>>;

    /// Open a handle on `table`
    ///
    /// Opening does not check that the table exists; requests on the handle
    /// report `TableNotFound` instead.
    fn table(&self, table: &TableName) -> ClientResult<Box<dyn Table>>;

    /// Close the connection and release its resources
    fn close(&self) -> ClientResult<()>;

    /// True once `close` has been called
    fn is_closed(&self) -> bool;
}

/// Administrative handle for schema operations
pub trait Admin: Send {
    /// Check whether `table` exists
    fn table_exists(&self, table: &TableName) -> ClientResult<bool>;

    /// Create a table from its descriptor
    fn create_table(&self, descriptor: &TableDescriptor) -> ClientResult<()>;

    /// Check whether `table` is enabled
    fn is_table_enabled(&self, table: &TableName) -> ClientResult<bool>;

    /// Disable `table`; it must be enabled
    fn disable_table(&self, table: &TableName) -> ClientResult<()>;

    /// Enable `table`; it must be disabled
    fn enable_table(&self, table: &TableName) -> ClientResult<()>;

    /// Delete `table`; it must be disabled
    fn delete_table(&self, table: &TableName) -> ClientResult<()>;

    /// Names of all tables
    fn list_tables(&self) -> ClientResult<Vec<TableName>>;

    /// Release the handle
    fn close(&mut self) -> ClientResult<()>;
}

/// Data handle on a single table
pub trait Table: Send {
    /// Table this handle targets
    fn name(&self) -> &TableName;

    /// Read one cell or one family of a row
    fn get(&self, get: &Get) -> ClientResult<RowResult>;

    /// Write one row
    fn put(&self, put: &Put) -> ClientResult<()>;

    /// Write several rows in one request
    fn put_batch(&self, puts: &[Put]) -> ClientResult<()>;

    /// Delete a family of a row, or the whole row
    fn delete(&self, delete: &Delete) -> ClientResult<()>;

    /// Release the handle
    fn close(&mut self) -> ClientResult<()>;
}
