//! Shared association table
//!
//! Publishes immutable [`AssocTable`] snapshots behind an `Arc`. This type,
//! not the table, owns synchronization:
//!
//! - readers call [`SharedAssocTable::snapshot`] and keep a stable view for as
//!   long as they hold the `Arc`
//! - writers are serialized by a mutex; each [`SharedAssocTable::update`]
//!   copies the current table, mutates the private copy and swaps it in
//!
//! A reader never sees a partially applied update.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::table::AssocTable;

#[derive(Debug, Default)]
pub struct SharedAssocTable {
    current: RwLock<Arc<AssocTable>>,
    writer: Mutex<()>,
}

impl SharedAssocTable {
    pub fn new(table: AssocTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
            writer: Mutex::new(()),
        }
    }

    /// The currently published table.
    pub fn snapshot(&self) -> Arc<AssocTable> {
        // Only whole Arcs are ever stored, so a poisoned lock still holds a
        // consistent table.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to a private copy of the current table, then publish it.
    pub fn update<R>(&self, f: impl FnOnce(&mut AssocTable) -> R) -> R {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = self.snapshot().copy();
        let result = f(&mut next);
        self.publish(next);
        result
    }

    /// Publish `table` as is, discarding the current one.
    pub fn replace(&self, table: AssocTable) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(table);
    }

    fn publish(&self, table: AssocTable) {
        debug!(associations = table.len(), "publishing association table");
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(table);
    }
}

impl From<AssocTable> for SharedAssocTable {
    fn from(table: AssocTable) -> Self {
        Self::new(table)
    }
}
