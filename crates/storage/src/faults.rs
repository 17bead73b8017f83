//! Fault injection for the in-process store
//!
//! Faults are keyed by [`Operation`] and stay armed until cleared. Connect
//! and close faults are separate switches because they are not requests.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use cellgate_core::{ClientError, ClientResult, Operation};

/// Armed faults for a cluster
#[derive(Debug, Default)]
pub struct FaultPlan {
    operations: Mutex<HashMap<Operation, ClientError>>,
    refuse_connections: AtomicBool,
    fail_close: AtomicBool,
    connect_latency_ms: AtomicU64,
}

impl FaultPlan {
    /// Make every request of kind `operation` fail with `error`
    pub fn fail(&self, operation: Operation, error: ClientError) {
        self.operations.lock().insert(operation, error);
    }

    /// Disarm the fault for `operation`
    pub fn heal(&self, operation: Operation) {
        self.operations.lock().remove(&operation);
    }

    /// Refuse (or accept again) new connections
    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse_connections.store(refuse, Ordering::SeqCst);
    }

    /// Make `close` on connections and handles report an error
    ///
    /// The resource is still released.
    pub fn fail_close(&self, fail: bool) {
        self.fail_close.store(fail, Ordering::SeqCst);
    }

    /// Delay each connection attempt
    pub fn set_connect_latency(&self, latency: Duration) {
        self.connect_latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Disarm everything
    pub fn clear(&self) {
        self.operations.lock().clear();
        self.refuse_connections.store(false, Ordering::SeqCst);
        self.fail_close.store(false, Ordering::SeqCst);
        self.connect_latency_ms.store(0, Ordering::SeqCst);
    }

    pub(crate) fn check(&self, operation: Operation) -> ClientResult<()> {
        match self.operations.lock().get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub(crate) fn check_connect(&self) -> ClientResult<()> {
        let latency = self.connect_latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            std::thread::sleep(Duration::from_millis(latency));
        }
        if self.refuse_connections.load(Ordering::SeqCst) {
            return Err(ClientError::Unreachable {
                reason: "connection refused by quorum".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_close(&self) -> ClientResult<()> {
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(ClientError::Io {
                reason: "close failed".to_string(),
            });
        }
        Ok(())
    }
}
