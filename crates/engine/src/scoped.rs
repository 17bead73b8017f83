//! Scoped per-call handles
//!
//! Every façade call opens its own admin or table handle and must release
//! it on every exit path. The guards here own the handle and close it in
//! `Drop`, so early returns, `?` propagation and panics all release it.
//! A failing close is logged and otherwise ignored.
//!
//! Each guard also holds a clone of the shared connection, keeping the
//! connection alive for as long as a handle opened from it.

use std::ops::Deref;
use tracing::warn;

use cellgate_core::{Admin, Error, Operation, Result, Table, TableName};

use crate::connection::SharedConnection;

/// Admin handle closed on drop
pub(crate) struct AdminGuard {
    admin: Box<dyn Admin>,
    _connection: SharedConnection,
}

impl AdminGuard {
    pub(crate) fn open(connection: SharedConnection) -> Result<Self> {
        let admin = connection
            .admin()
            .map_err(|e| Error::remote(Operation::OpenAdmin, "", e))?;
        Ok(Self {
            admin,
            _connection: connection,
        })
    }
}

impl Deref for AdminGuard {
    type Target = dyn Admin;

    fn deref(&self) -> &Self::Target {
        self.admin.as_ref()
    }
}

impl Drop for AdminGuard {
    fn drop(&mut self) {
        if let Err(e) = self.admin.close() {
            warn!(target: "cellgate::tables", error = %e, "Failed to close admin handle");
        }
    }
}

/// Table handle closed on drop
pub(crate) struct TableGuard {
    table: Box<dyn Table>,
    _connection: SharedConnection,
}

impl TableGuard {
    pub(crate) fn open(connection: SharedConnection, name: &TableName) -> Result<Self> {
        let table = connection
            .table(name)
            .map_err(|e| Error::remote(Operation::OpenTable, name.as_str(), e))?;
        Ok(Self {
            table,
            _connection: connection,
        })
    }
}

impl Deref for TableGuard {
    type Target = dyn Table;

    fn deref(&self) -> &Self::Target {
        self.table.as_ref()
    }
}

impl Drop for TableGuard {
    fn drop(&mut self) {
        if let Err(e) = self.table.close() {
            warn!(
                target: "cellgate::tables",
                table = %self.table.name(),
                error = %e,
                "Failed to close table handle"
            );
        }
    }
}
