//! Stored table: schema, enabled flag and rows
//!
//! # Design
//!
//! - Rows: `BTreeMap<RowKey, family → qualifier → value>` behind one
//!   `parking_lot::RwLock`, so reads proceed concurrently and each write
//!   request applies atomically.
//! - Families are fixed at creation; requests naming any other family are
//!   rejected before anything is applied.
//! - Empty families are pruned, and a row with no families is removed.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use cellgate_core::{
    CellValue, ClientError, ClientResult, ColumnFamily, Delete, Get, Put, Qualifier, RowKey,
    RowResult, TableDescriptor, TableName,
};

type FamilyCells = BTreeMap<Qualifier, CellValue>;
type RowCells = BTreeMap<ColumnFamily, FamilyCells>;

/// One table held by a [`crate::MemCluster`]
#[derive(Debug)]
pub struct MemTable {
    descriptor: TableDescriptor,
    enabled: AtomicBool,
    rows: RwLock<BTreeMap<RowKey, RowCells>>,
}

impl MemTable {
    /// New enabled, empty table
    pub fn new(descriptor: TableDescriptor) -> Self {
        Self {
            descriptor,
            enabled: AtomicBool::new(true),
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Table name
    pub fn name(&self) -> &TableName {
        self.descriptor.name()
    }

    /// Schema the table was created with
    pub fn descriptor(&self) -> &TableDescriptor {
        &self.descriptor
    }

    /// True unless the table has been disabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Flip enabled → disabled
    pub(crate) fn disable(&self) -> ClientResult<()> {
        self.enabled
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| ClientError::TableNotEnabled {
                table: self.name().to_string(),
            })
    }

    /// Flip disabled → enabled
    pub(crate) fn enable(&self) -> ClientResult<()> {
        self.enabled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| ClientError::TableNotDisabled {
                table: self.name().to_string(),
            })
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    fn ensure_enabled(&self) -> ClientResult<()> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(ClientError::TableNotEnabled {
                table: self.name().to_string(),
            })
        }
    }

    fn ensure_family(&self, family: &ColumnFamily) -> ClientResult<()> {
        if self.descriptor.has_family(family) {
            Ok(())
        } else {
            Err(ClientError::NoSuchFamily {
                table: self.name().to_string(),
                family: family.to_string(),
            })
        }
    }

    fn ensure_put(&self, put: &Put) -> ClientResult<()> {
        if put.is_empty() {
            return Err(ClientError::Rejected {
                reason: format!("no columns to insert for row '{}'", put.row()),
            });
        }
        put.cells()
            .iter()
            .try_for_each(|cell| self.ensure_family(&cell.family))
    }

    /// Read one cell or one family of a row
    pub(crate) fn get(&self, get: &Get) -> ClientResult<RowResult> {
        self.ensure_enabled()?;
        self.ensure_family(get.family_name())?;

        let rows = self.rows.read();
        let cells = match rows
            .get(get.row())
            .and_then(|row| row.get(get.family_name()))
        {
            Some(cells) => cells,
            None => return Ok(RowResult::new()),
        };

        Ok(match get.qualifier() {
            Some(q) => cells
                .get(q)
                .map(|v| (q.clone(), v.clone()))
                .into_iter()
                .collect(),
            None => cells
                .iter()
                .map(|(q, v)| (q.clone(), v.clone()))
                .collect(),
        })
    }

    /// Apply puts under a single write lock; nothing is applied if any put
    /// is invalid
    pub(crate) fn apply_puts(&self, puts: &[Put]) -> ClientResult<()> {
        self.ensure_enabled()?;
        puts.iter().try_for_each(|put| self.ensure_put(put))?;

        let mut rows = self.rows.write();
        for put in puts {
            let row = rows.entry(put.row().clone()).or_default();
            for cell in put.cells() {
                row.entry(cell.family.clone())
                    .or_default()
                    .insert(cell.qualifier.clone(), cell.value.clone());
            }
        }
        Ok(())
    }

    /// Remove a family of a row, or the whole row
    pub(crate) fn delete(&self, delete: &Delete) -> ClientResult<()> {
        self.ensure_enabled()?;
        self.ensure_family(delete.family_name())?;

        let mut rows = self.rows.write();
        let now_empty = match rows.get_mut(delete.row()) {
            Some(row) => {
                row.remove(delete.family_name());
                row.is_empty()
            }
            None => false,
        };
        if now_empty {
            rows.remove(delete.row());
        }
        Ok(())
    }
}
