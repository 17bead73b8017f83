//! Row read results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{CellValue, Qualifier};

/// Qualifier → value map for one (row, family), ordered by qualifier bytes
///
/// Empty when the row holds nothing under the family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    cells: BTreeMap<Qualifier, CellValue>,
}

impl RowResult {
    /// Empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, replacing any previous value for the qualifier
    pub fn insert(&mut self, qualifier: Qualifier, value: CellValue) {
        self.cells.insert(qualifier, value);
    }

    /// Value stored under `qualifier`
    pub fn get(&self, qualifier: impl AsRef<[u8]>) -> Option<&CellValue> {
        self.cells.get(&Qualifier::from(qualifier.as_ref()))
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Iterate cells in qualifier order
    pub fn iter(&self) -> impl Iterator<Item = (&Qualifier, &CellValue)> {
        self.cells.iter()
    }

    /// Consume into the underlying map
    pub fn into_map(self) -> BTreeMap<Qualifier, CellValue> {
        self.cells
    }
}

impl FromIterator<(Qualifier, CellValue)> for RowResult {
    fn from_iter<I: IntoIterator<Item = (Qualifier, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
