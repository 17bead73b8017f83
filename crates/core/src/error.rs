//! Error types for cellgate
//!
//! Two layers of errors live here:
//!
//! - [`Error`]: what façade callers see. Every public operation returns
//!   either a success value or one of these variants.
//! - [`ClientError`]: what the client library boundary (see
//!   [`crate::traits`]) reports. The engine maps these into [`Error`] with
//!   operation and table context attached.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for cellgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for client library calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Remote operation that failed, attached to [`Error::RemoteOperationFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Check whether a table exists
    TableExists,
    /// Create a table
    CreateTable,
    /// Disable a table
    DisableTable,
    /// Enable a table
    EnableTable,
    /// Check whether a table is enabled
    IsTableEnabled,
    /// Delete a table
    DeleteTable,
    /// List tables
    ListTables,
    /// Open an administrative handle
    OpenAdmin,
    /// Open a table handle
    OpenTable,
    /// Single-row read
    Get,
    /// Single-row write
    Put,
    /// Multi-row write
    PutBatch,
    /// Row/family delete
    Delete,
}

impl Operation {
    /// Stable lowercase name, used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::TableExists => "table_exists",
            Operation::CreateTable => "create_table",
            Operation::DisableTable => "disable_table",
            Operation::EnableTable => "enable_table",
            Operation::IsTableEnabled => "is_table_enabled",
            Operation::DeleteTable => "delete_table",
            Operation::ListTables => "list_tables",
            Operation::OpenAdmin => "open_admin",
            Operation::OpenTable => "open_table",
            Operation::Get => "get",
            Operation::Put => "put",
            Operation::PutBatch => "put_batch",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the connection manager and the table façade.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Connection | `ConnectionFailure` | Shared handle could not be obtained; retry later |
/// | Validation | `InvalidArgument`, `LengthMismatch` | Rejected before any remote call |
/// | State | `AlreadyExists` | Create requested for an existing table |
/// | Remote | `RemoteOperationFailure` | The store rejected or failed a request |
/// | Config | `Config` | Configuration could not be read or is invalid |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Error {
    /// The shared connection handle could not be established
    #[error("connection failure: {reason}")]
    ConnectionFailure {
        /// Why construction failed
        reason: String,
    },

    /// Caller supplied an empty name, an empty list or similar
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// Qualifier and value lists passed to a put differ in length
    #[error("length mismatch: {qualifiers} qualifiers but {values} values")]
    LengthMismatch {
        /// Number of qualifiers supplied
        qualifiers: usize,
        /// Number of values supplied
        values: usize,
    },

    /// Create requested for a table that already exists
    #[error("table already exists: {table}")]
    AlreadyExists {
        /// Table name
        table: String,
    },

    /// The store rejected or failed a request
    #[error("{operation} failed on table '{table}': {reason}")]
    RemoteOperationFailure {
        /// Operation that failed
        operation: Operation,
        /// Table the operation targeted (empty for cluster-wide operations)
        table: String,
        /// Error reported by the client library
        reason: String,
    },

    /// Configuration could not be read, parsed or validated
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },
}

impl Error {
    /// Construct an `InvalidArgument` error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Construct a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Wrap a client error as a failure of `operation` against `table`
    pub fn remote(operation: Operation, table: impl Into<String>, source: ClientError) -> Self {
        Error::RemoteOperationFailure {
            operation,
            table: table.into(),
            reason: source.to_string(),
        }
    }

    /// True for errors raised before any remote call was made
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument { .. } | Error::LengthMismatch { .. }
        )
    }

    /// True when retrying later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ConnectionFailure { .. })
    }
}

/// Errors reported by a client library implementation.
///
/// These mirror the failure classes of a column-family store client:
/// an unreachable cluster, schema state conflicts, and I/O failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The coordination quorum or the cluster could not be reached
    #[error("cluster unreachable: {reason}")]
    Unreachable {
        /// Detail from the client
        reason: String,
    },

    /// The named table does not exist
    #[error("table not found: {table}")]
    TableNotFound {
        /// Table name
        table: String,
    },

    /// The named table already exists
    #[error("table exists: {table}")]
    TableExists {
        /// Table name
        table: String,
    },

    /// The table must be disabled for this operation
    #[error("table not disabled: {table}")]
    TableNotDisabled {
        /// Table name
        table: String,
    },

    /// The table must be enabled for this operation
    #[error("table not enabled: {table}")]
    TableNotEnabled {
        /// Table name
        table: String,
    },

    /// A request referenced a family the table does not define
    #[error("no such column family '{family}' in table {table}")]
    NoSuchFamily {
        /// Table name
        table: String,
        /// Family name
        family: String,
    },

    /// The handle was used after it was closed
    #[error("handle closed")]
    Closed,

    /// I/O error talking to the store
    #[error("I/O error: {reason}")]
    Io {
        /// Detail from the client
        reason: String,
    },

    /// The store refused the request
    #[error("request rejected: {reason}")]
    Rejected {
        /// Detail from the store
        reason: String,
    },
}

impl From<io::Error> for ClientError {
    fn from(e: io::Error) -> Self {
        ClientError::Io {
            reason: e.to_string(),
        }
    }
}
