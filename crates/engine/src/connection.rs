//! Connection manager: one shared, lazily created connection
//!
//! The manager owns the single connection to the store. It is constructed
//! once at process start from a fixed [`ClientConfig`] and a [`Connector`],
//! then shared (`Arc<ConnectionManager>`) by every façade that needs it.
//!
//! ## Lifecycle
//!
//! ```text
//!            acquire() ok
//!   absent ───────────────▶ present ──┐ acquire(): same handle
//!     ▲                        │  ◀───┘
//!     └────── release() ───────┘
//! ```
//!
//! A failed `acquire()` leaves the state absent, so a later call retries.
//! `release()` always completes; close errors are logged, never returned.
//!
//! ## Thread Safety
//!
//! Check-and-create and check-and-destroy both run under one
//! `parking_lot::Mutex`, so concurrent callers construct at most one
//! connection and never observe a half-released one.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cellgate_core::{ClientConfig, Connection, Connector, Error, Result};

/// Shared handle to a live connection
pub type SharedConnection = Arc<dyn Connection>;

/// Identifier assigned to each constructed connection, for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Slot {
    id: ConnectionId,
    connection: SharedConnection,
}

/// Owner of the process-wide connection handle
pub struct ConnectionManager {
    config: ClientConfig,
    connector: Box<dyn Connector>,
    slot: Mutex<Option<Slot>>,
}

impl ConnectionManager {
    /// Create a manager; no connection is made until [`acquire`](Self::acquire)
    pub fn new<C>(config: ClientConfig, connector: C) -> Self
    where
        C: Connector + 'static,
    {
        Self::with_connector(config, Box::new(connector))
    }

    /// Create a manager from a boxed connector
    pub fn with_connector(config: ClientConfig, connector: Box<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            slot: Mutex::new(None),
        }
    }

    /// The fixed configuration connections are built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Return the shared connection, creating it on first use
    ///
    /// An existing connection is returned unchanged: no reconnect, no
    /// health check.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionFailure` if construction fails. The manager stays
    /// without a connection and the next call tries again.
    pub fn acquire(&self) -> Result<SharedConnection> {
        let mut slot = self.slot.lock();
        if let Some(current) = slot.as_ref() {
            return Ok(Arc::clone(&current.connection));
        }

        debug!(
            target: "cellgate::connection",
            properties = ?self.config.to_properties(),
            "Connecting"
        );
        match self.connector.connect(&self.config) {
            Ok(connection) => {
                let id = ConnectionId::new();
                info!(
                    target: "cellgate::connection",
                    connection_id = %id,
                    quorum = %self.config.quorum_string(),
                    "Connection established"
                );
                *slot = Some(Slot {
                    id,
                    connection: Arc::clone(&connection),
                });
                Ok(connection)
            }
            Err(e) => {
                warn!(
                    target: "cellgate::connection",
                    quorum = %self.config.quorum_string(),
                    error = %e,
                    "Connection attempt failed"
                );
                Err(Error::ConnectionFailure {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Close the shared connection, if any, and reset to "no connection"
    ///
    /// Best-effort: a failing close is logged and the state is reset anyway.
    pub fn release(&self) {
        let mut slot = self.slot.lock();
        let current = match slot.take() {
            Some(current) => current,
            None => return,
        };

        match current.connection.close() {
            Ok(()) => info!(
                target: "cellgate::connection",
                connection_id = %current.id,
                "Connection released"
            ),
            Err(e) => warn!(
                target: "cellgate::connection",
                connection_id = %current.id,
                error = %e,
                "Error closing connection; state reset regardless"
            ),
        }
    }

    /// True while a connection is held
    pub fn is_connected(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Identifier of the held connection
    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.slot.lock().as_ref().map(|s| s.id)
    }
}

impl fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("config", &self.config)
            .field("connection_id", &self.connection_id())
            .finish()
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.release();
    }
}
