//! Shared server state.

use tokio::sync::RwLock;

use patients_store::FileStore;

/// State shared by all handlers.
///
/// The backing file is a single shared mutable resource, so the store sits
/// behind a process-wide `RwLock`: read handlers take a read guard, and
/// mutating handlers hold the write guard across the whole
/// load-mutate-save sequence so concurrent edits cannot lose updates.
pub struct ServerState {
    pub store: RwLock<FileStore>,
}

impl ServerState {
    /// Wraps a store in fresh server state.
    pub fn new(store: FileStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}
