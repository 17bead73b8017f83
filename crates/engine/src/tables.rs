//! Tables: table administration and row CRUD over the shared connection
//!
//! ## Design
//!
//! `Tables` is a stateless facade over a [`ConnectionManager`]. It holds no
//! state beyond an `Arc<ConnectionManager>`; cloning it is cheap and every
//! clone shares the same connection.
//!
//! Each operation follows the same shape:
//!
//! 1. Validate arguments. Failures return `InvalidArgument` or
//!    `LengthMismatch` before any connection or handle is touched.
//! 2. Acquire the shared connection (`ConnectionFailure` on failure).
//! 3. Open a scoped admin or table handle, released on every exit path.
//! 4. Issue the request; client errors become `RemoteOperationFailure`
//!    carrying the operation and table.
//!
//! ## Thread Safety
//!
//! `Tables` is `Send + Sync`. Calls on different rows may interleave
//! arbitrarily; the store's per-row atomicity is the only ordering
//! guarantee. All cells of one `put_row` or `put_batch` go to the store in
//! one request.

use std::sync::Arc;
use tracing::{debug, info};

use cellgate_core::{
    CellValue, ClientError, ColumnFamily, Delete, Error, Get, MutationBatch, Operation, Put,
    Qualifier, Result, RowKey, RowResult, TableDescriptor, TableName,
};

use crate::connection::ConnectionManager;
use crate::scoped::{AdminGuard, TableGuard};

/// Map a client error to a remote failure of `operation` on `table`
fn remote(operation: Operation, table: &TableName) -> impl FnOnce(ClientError) -> Error + '_ {
    move |e| Error::remote(operation, table.as_str(), e)
}

/// Table and row operations
///
/// # Example
///
/// ```ignore
/// use cellgate_engine::{ConnectionManager, Tables};
///
/// let tables = Tables::new(Arc::new(ConnectionManager::new(config, connector)));
/// tables.create_table("users", &["info"])?;
/// tables.put_row("users", "u1", "info", &["name", "email"], &["ann", "ann@example.com"])?;
/// let row = tables.get_row("users", "u1", "info")?;
/// ```
#[derive(Debug, Clone)]
pub struct Tables {
    connections: Arc<ConnectionManager>,
}

impl Tables {
    /// Create a facade over `connections`
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// The connection manager this facade draws from
    pub fn connections(&self) -> &Arc<ConnectionManager> {
        &self.connections
    }

    fn admin(&self) -> Result<AdminGuard> {
        AdminGuard::open(self.connections.acquire()?)
    }

    fn table(&self, name: &TableName) -> Result<TableGuard> {
        TableGuard::open(self.connections.acquire()?, name)
    }

    // ========== Administration ==========

    /// Create a table with one column family per entry of `families`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: empty name, empty family list, blank or
    ///   duplicate family name
    /// - `AlreadyExists`: the table exists; it is left untouched
    pub fn create_table<S: AsRef<str>>(&self, name: &str, families: &[S]) -> Result<()> {
        let table = TableName::new(name)?;
        if families.is_empty() {
            return Err(Error::invalid_argument(format!(
                "table '{}' needs at least one column family",
                table
            )));
        }
        let mut descriptor = TableDescriptor::new(table.clone());
        for family in families {
            let family = ColumnFamily::new(family.as_ref())?;
            if descriptor.has_family(&family) {
                return Err(Error::invalid_argument(format!(
                    "column family '{}' listed twice",
                    family
                )));
            }
            descriptor.add_family(family);
        }

        let admin = self.admin()?;
        if admin
            .table_exists(&table)
            .map_err(remote(Operation::TableExists, &table))?
        {
            return Err(Error::AlreadyExists {
                table: table.to_string(),
            });
        }
        admin.create_table(&descriptor).map_err(|e| match e {
            // Lost a race with another creator
            ClientError::TableExists { .. } => Error::AlreadyExists {
                table: table.to_string(),
            },
            other => Error::remote(Operation::CreateTable, table.as_str(), other),
        })?;

        info!(
            target: "cellgate::tables",
            table = %table,
            families = descriptor.families().len(),
            "Table created"
        );
        Ok(())
    }

    /// Disable and delete a table; does nothing if it does not exist
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let table = TableName::new(name)?;
        let admin = self.admin()?;

        if !admin
            .table_exists(&table)
            .map_err(remote(Operation::TableExists, &table))?
        {
            debug!(target: "cellgate::tables", table = %table, "Drop of missing table ignored");
            return Ok(());
        }

        // A concurrent drop may remove the table between steps; that still
        // leaves it gone, which is all a drop promises.
        let enabled = match admin.is_table_enabled(&table) {
            Ok(enabled) => enabled,
            Err(ClientError::TableNotFound { .. }) => return Ok(()),
            Err(e) => return Err(Error::remote(Operation::IsTableEnabled, table.as_str(), e)),
        };
        if enabled {
            match admin.disable_table(&table) {
                Ok(()) | Err(ClientError::TableNotEnabled { .. }) => {}
                Err(ClientError::TableNotFound { .. }) => return Ok(()),
                Err(e) => return Err(Error::remote(Operation::DisableTable, table.as_str(), e)),
            }
        }
        match admin.delete_table(&table) {
            Ok(()) | Err(ClientError::TableNotFound { .. }) => {}
            Err(e) => return Err(Error::remote(Operation::DeleteTable, table.as_str(), e)),
        }

        info!(target: "cellgate::tables", table = %table, "Table dropped");
        Ok(())
    }

    /// Check whether a table exists
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let table = TableName::new(name)?;
        let admin = self.admin()?;
        admin
            .table_exists(&table)
            .map_err(remote(Operation::TableExists, &table))
    }

    /// Disable a table
    ///
    /// A disabled table refuses reads and writes until enabled again.
    pub fn disable_table(&self, name: &str) -> Result<()> {
        let table = TableName::new(name)?;
        let admin = self.admin()?;
        admin
            .disable_table(&table)
            .map_err(remote(Operation::DisableTable, &table))?;
        info!(target: "cellgate::tables", table = %table, "Table disabled");
        Ok(())
    }

    /// Enable a previously disabled table
    pub fn enable_table(&self, name: &str) -> Result<()> {
        let table = TableName::new(name)?;
        let admin = self.admin()?;
        admin
            .enable_table(&table)
            .map_err(remote(Operation::EnableTable, &table))?;
        info!(target: "cellgate::tables", table = %table, "Table enabled");
        Ok(())
    }

    /// Check whether a table is enabled
    pub fn is_table_enabled(&self, name: &str) -> Result<bool> {
        let table = TableName::new(name)?;
        let admin = self.admin()?;
        admin
            .is_table_enabled(&table)
            .map_err(remote(Operation::IsTableEnabled, &table))
    }

    /// Names of all tables, sorted
    pub fn list_tables(&self) -> Result<Vec<TableName>> {
        let admin = self.admin()?;
        admin
            .list_tables()
            .map_err(|e| Error::remote(Operation::ListTables, "", e))
    }

    // ========== Reads ==========

    /// Read a single cell
    ///
    /// Returns `None` when the cell holds no value. An empty value is
    /// returned as `Some` of an empty [`CellValue`].
    pub fn get_value(
        &self,
        table: &str,
        row: impl Into<RowKey>,
        family: &str,
        qualifier: impl Into<Qualifier>,
    ) -> Result<Option<CellValue>> {
        let table = TableName::new(table)?;
        let family = ColumnFamily::new(family)?;
        let qualifier = qualifier.into();
        let get = Get::column(row.into(), family, qualifier.clone());

        let handle = self.table(&table)?;
        let result = handle.get(&get).map_err(remote(Operation::Get, &table))?;
        Ok(result.into_map().remove(&qualifier))
    }

    /// Read every qualifier under `family` for `row`
    ///
    /// The result is empty when nothing is stored.
    pub fn get_row(&self, table: &str, row: impl Into<RowKey>, family: &str) -> Result<RowResult> {
        let table = TableName::new(table)?;
        let get = Get::family(row.into(), ColumnFamily::new(family)?);

        let handle = self.table(&table)?;
        let result = handle.get(&get).map_err(remote(Operation::Get, &table))?;
        debug!(
            target: "cellgate::tables",
            table = %table,
            row = %get.row(),
            cells = result.len(),
            "Row fetched"
        );
        Ok(result)
    }

    // ========== Writes ==========

    /// Write `qualifiers[i] = values[i]` under `family` for `row`
    ///
    /// All cells go to the store in a single request.
    ///
    /// # Errors
    ///
    /// - `LengthMismatch`: the two lists differ in length; nothing is written
    /// - `InvalidArgument`: the lists are empty, or a name is blank
    pub fn put_row<Q, V>(
        &self,
        table: &str,
        row: impl Into<RowKey>,
        family: &str,
        qualifiers: &[Q],
        values: &[V],
    ) -> Result<()>
    where
        Q: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        if qualifiers.len() != values.len() {
            return Err(Error::LengthMismatch {
                qualifiers: qualifiers.len(),
                values: values.len(),
            });
        }
        if qualifiers.is_empty() {
            return Err(Error::invalid_argument("no columns to write"));
        }
        let table = TableName::new(table)?;
        let family = ColumnFamily::new(family)?;

        let mut put = Put::new(row.into());
        for (q, v) in qualifiers.iter().zip(values) {
            put.push(family.clone(), q.as_ref(), v.as_ref());
        }

        let handle = self.table(&table)?;
        handle.put(&put).map_err(remote(Operation::Put, &table))?;
        debug!(
            target: "cellgate::tables",
            table = %table,
            row = %put.row(),
            cells = put.cells().len(),
            "Row written"
        );
        Ok(())
    }

    /// Submit every put of `batch` in one request
    ///
    /// An empty batch succeeds without contacting the store or checking the
    /// table name.
    pub fn put_batch(&self, table: &str, batch: &MutationBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let table = TableName::new(table)?;

        let handle = self.table(&table)?;
        handle
            .put_batch(batch.puts())
            .map_err(remote(Operation::PutBatch, &table))?;
        debug!(target: "cellgate::tables", table = %table, puts = batch.len(), "Batch written");
        Ok(())
    }

    // ========== Deletes ==========

    /// Delete every qualifier under `family` for `row`
    pub fn delete_family(&self, table: &str, row: impl Into<RowKey>, family: &str) -> Result<()> {
        let table = TableName::new(table)?;
        let delete = Delete::family(row.into(), ColumnFamily::new(family)?);

        let handle = self.table(&table)?;
        handle
            .delete(&delete)
            .map_err(remote(Operation::Delete, &table))?;
        debug!(target: "cellgate::tables", table = %table, row = %delete.row(), "Family deleted");
        Ok(())
    }
}
