//! Identifier types for cellgate
//!
//! This module defines the names and byte strings that address data:
//! - TableName: validated, non-empty table identifier
//! - ColumnFamily: validated, non-empty family name
//! - RowKey, Qualifier, CellValue: raw byte strings
//! - TableDescriptor: table name plus its column families
//!
//! Names are validated at construction so the façade can reject bad input
//! before touching the store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Table identifier
///
/// Must be non-empty and must not be only whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableName(String);

impl TableName {
    /// Create a table name, rejecting blank input
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("table name must not be empty"));
        }
        Ok(Self(name))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Column family name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnFamily(String);

impl ColumnFamily {
    /// Create a family name, rejecting blank input
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("column family must not be empty"));
        }
        Ok(Self(name))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColumnFamily {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! byte_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Wrap raw bytes
            pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            /// Borrow the raw bytes
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Consume and return the raw bytes
            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }

            /// Length in bytes
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// True for the empty byte string
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Lossy UTF-8 view, for display and logs
            pub fn to_string_lossy(&self) -> String {
                String::from_utf8_lossy(&self.0).into_owned()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.as_bytes().to_vec())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into_bytes())
            }
        }

        impl From<&String> for $name {
            fn from(s: &String) -> Self {
                Self(s.as_bytes().to_vec())
            }
        }

        impl From<&[u8]> for $name {
            fn from(b: &[u8]) -> Self {
                Self(b.to_vec())
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(b: Vec<u8>) -> Self {
                Self(b)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&String::from_utf8_lossy(&self.0))
            }
        }
    };
}

byte_string!(
    /// Primary identifier of a row within a table
    RowKey
);

byte_string!(
    /// Column name within a column family
    Qualifier
);

byte_string!(
    /// Stored cell contents
    ///
    /// The empty value is a real value: it is distinct from an absent cell,
    /// which the façade reports as `None`.
    CellValue
);

/// Schema of a table: its name and column families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    name: TableName,
    families: Vec<ColumnFamily>,
}

impl TableDescriptor {
    /// Start a descriptor with no families
    pub fn new(name: TableName) -> Self {
        Self {
            name,
            families: Vec::new(),
        }
    }

    /// Add a column family
    pub fn with_family(mut self, family: ColumnFamily) -> Self {
        self.families.push(family);
        self
    }

    /// Add a column family in place
    pub fn add_family(&mut self, family: ColumnFamily) {
        self.families.push(family);
    }

    /// Table name
    pub fn name(&self) -> &TableName {
        &self.name
    }

    /// Column families in declaration order
    pub fn families(&self) -> &[ColumnFamily] {
        &self.families
    }

    /// True if the descriptor declares `family`
    pub fn has_family(&self, family: &ColumnFamily) -> bool {
        self.families.contains(family)
    }
}
