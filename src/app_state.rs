//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Error, storage::Storage, transaction::TransactionStore};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store holding every transaction.
    pub store: Arc<Mutex<TransactionStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState], loading the transactions held in `storage`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(storage: impl Storage + 'static, local_timezone: &str) -> Self {
        Self {
            store: Arc::new(Mutex::new(TransactionStore::load(storage))),
            local_timezone: local_timezone.to_owned(),
        }
    }
}

/// Acquire the lock on the transaction store.
///
/// # Errors
/// Returns [Error::StoreLockError] if the lock is poisoned.
pub fn lock_store(
    store: &Mutex<TransactionStore>,
) -> Result<MutexGuard<'_, TransactionStore>, Error> {
    store.lock().map_err(|error| {
        tracing::error!("Could not acquire transaction store lock: {error}");
        Error::StoreLockError
    })
}
