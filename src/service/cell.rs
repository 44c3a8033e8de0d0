// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish-by-replacement storage for the current snapshot.
//!
//! ```text
//! writer: build EnvironmentSnapshot off-line --> Arc::new --> swap under write lock
//! reader: clone Arc under read lock          --> immutable record, never torn
//! ```
//!
//! Locks are held only for the `Arc` swap or clone. A poisoned lock still
//! guards a valid `Arc`, so poisoning is ignored.

use std::sync::{Arc, PoisonError, RwLock};

use crate::snapshot::EnvironmentSnapshot;

#[derive(Debug, Default)]
pub(crate) struct SnapshotCell {
    current: RwLock<Arc<EnvironmentSnapshot>>,
}

impl SnapshotCell {
    pub(crate) fn load(&self) -> Arc<EnvironmentSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub(crate) fn publish(&self, snapshot: EnvironmentSnapshot) -> Arc<EnvironmentSnapshot> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }
}

/// Cloneable, thread-safe read access to a service's published snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    cell: Arc<SnapshotCell>,
}

impl SnapshotHandle {
    pub(crate) const fn new(cell: Arc<SnapshotCell>) -> Self {
        Self { cell }
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<EnvironmentSnapshot> {
        self.cell.load()
    }
}
