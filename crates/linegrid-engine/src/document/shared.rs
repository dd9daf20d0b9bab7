use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::model::{Document, DocumentSnapshot};

/// A document owned by the editor and shared with its selections.
///
/// Selections only hold a [`WeakDocument`]; dropping the last
/// `SharedDocument` leaves them detached rather than keeping text alive.
#[derive(Clone, Default)]
pub struct SharedDocument(Arc<RwLock<Document>>);

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self(Arc::new(RwLock::new(document)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Document> {
        self.0.read()
    }

    /// Exclusive access for editing.
    ///
    /// Selection queries that read through their [`WeakDocument`] must not
    /// run while the guard is held.
    pub fn write(&self) -> RwLockWriteGuard<'_, Document> {
        self.0.write()
    }

    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument(Arc::downgrade(&self.0))
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.read().snapshot()
    }
}

impl From<Document> for SharedDocument {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

impl fmt::Debug for SharedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedDocument").field(&*self.read()).finish()
    }
}

/// Non-owning handle to a [`SharedDocument`].
#[derive(Clone, Default)]
pub struct WeakDocument(Weak<RwLock<Document>>);

impl WeakDocument {
    /// Run `f` against the document if it is still alive.
    pub fn with<R>(&self, f: impl FnOnce(&Document) -> R) -> Option<R> {
        let document = self.0.upgrade()?;
        let guard = document.read_recursive();
        Some(f(&guard))
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// True if both handles refer to the same document.
    pub fn same_document(&self, other: &WeakDocument) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }

    pub fn upgrade(&self) -> Option<SharedDocument> {
        self.0.upgrade().map(SharedDocument)
    }
}

impl fmt::Debug for WeakDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_alive() { "alive" } else { "dropped" };
        f.debug_tuple("WeakDocument").field(&state).finish()
    }
}
