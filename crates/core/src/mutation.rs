//! Request types sent through a table handle
//!
//! - [`Get`]: read one cell or one family of a row
//! - [`Put`]: write one or more cells of a single row, applied atomically
//! - [`Delete`]: remove one family of a row
//! - [`MutationBatch`]: ordered puts submitted in one call

use serde::{Deserialize, Serialize};

use crate::types::{CellValue, ColumnFamily, Qualifier, RowKey};

/// Read request for a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Get {
    row: RowKey,
    family: ColumnFamily,
    qualifier: Option<Qualifier>,
}

impl Get {
    /// Read a single cell
    pub fn column(row: RowKey, family: ColumnFamily, qualifier: Qualifier) -> Self {
        Self {
            row,
            family,
            qualifier: Some(qualifier),
        }
    }

    /// Read every qualifier under one family
    pub fn family(row: RowKey, family: ColumnFamily) -> Self {
        Self {
            row,
            family,
            qualifier: None,
        }
    }

    /// Row key
    pub fn row(&self) -> &RowKey {
        &self.row
    }

    /// Column family
    pub fn family_name(&self) -> &ColumnFamily {
        &self.family
    }

    /// Qualifier, when the request targets a single cell
    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }
}

/// One cell carried by a [`Put`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Column family
    pub family: ColumnFamily,
    /// Column qualifier
    pub qualifier: Qualifier,
    /// Value to store
    pub value: CellValue,
}

/// Write request for a single row
///
/// All cells of a `Put` are applied to the row together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Put {
    row: RowKey,
    cells: Vec<Cell>,
}

impl Put {
    /// Start an empty put for `row`
    pub fn new(row: RowKey) -> Self {
        Self {
            row,
            cells: Vec::new(),
        }
    }

    /// Add a cell
    pub fn add_column(
        mut self,
        family: ColumnFamily,
        qualifier: impl Into<Qualifier>,
        value: impl Into<CellValue>,
    ) -> Self {
        self.push(family, qualifier, value);
        self
    }

    /// Add a cell in place
    pub fn push(
        &mut self,
        family: ColumnFamily,
        qualifier: impl Into<Qualifier>,
        value: impl Into<CellValue>,
    ) {
        self.cells.push(Cell {
            family,
            qualifier: qualifier.into(),
            value: value.into(),
        });
    }

    /// Row key
    pub fn row(&self) -> &RowKey {
        &self.row
    }

    /// Cells in insertion order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cells were added
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Delete request for a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    row: RowKey,
    family: ColumnFamily,
}

impl Delete {
    /// Delete every qualifier under `family` for `row`
    pub fn family(row: RowKey, family: ColumnFamily) -> Self {
        Self { row, family }
    }

    /// Row key
    pub fn row(&self) -> &RowKey {
        &self.row
    }

    /// Targeted family
    pub fn family_name(&self) -> &ColumnFamily {
        &self.family
    }
}

/// Ordered collection of puts submitted together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationBatch {
    puts: Vec<Put>,
}

impl MutationBatch {
    /// Empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a put
    pub fn push(&mut self, put: Put) {
        self.puts.push(put);
    }

    /// Append a put, builder style
    pub fn with(mut self, put: Put) -> Self {
        self.puts.push(put);
        self
    }

    /// Number of puts
    pub fn len(&self) -> usize {
        self.puts.len()
    }

    /// True when the batch holds no puts
    pub fn is_empty(&self) -> bool {
        self.puts.is_empty()
    }

    /// Puts in submission order
    pub fn puts(&self) -> &[Put] {
        &self.puts
    }

    /// Iterate over puts
    pub fn iter(&self) -> std::slice::Iter<'_, Put> {
        self.puts.iter()
    }
}

impl From<Vec<Put>> for MutationBatch {
    fn from(puts: Vec<Put>) -> Self {
        Self { puts }
    }
}

impl FromIterator<Put> for MutationBatch {
    fn from_iter<I: IntoIterator<Item = Put>>(iter: I) -> Self {
        Self {
            puts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MutationBatch {
    type Item = &'a Put;
    type IntoIter = std::slice::Iter<'a, Put>;

    fn into_iter(self) -> Self::IntoIter {
        self.puts.iter()
    }
}
