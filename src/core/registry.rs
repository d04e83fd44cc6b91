//! # Subscription registry - fixed-capacity table of (handler, kind).
//!
//! ## Architecture
//! ```text
//! client threads ── register(handler, kind) ──► Mutex<Vec<Subscription>>
//!                                                   │  (capacity reserved up front)
//! Dispatcher ────── snapshot() ─────────────────────┘  locked copy, insertion order
//! ```
//!
//! ## Rules
//! - Insertion only: no removal, indices are stable for the program lifetime
//! - `len <= capacity` always; the check is `len >= capacity` → [`RegistryError::Full`]
//! - A slot becomes visible to readers only together with the length increment
//!   (both happen under the lock)
//! - No handler ever runs under the lock

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::RegistryError;
use crate::handlers::HandlerRef;
use crate::sensors::SensorKind;

/// One registered handler.
#[derive(Clone)]
pub struct Subscription {
    index: usize,
    kind: SensorKind,
    handler: HandlerRef,
}

impl Subscription {
    /// Insertion index (identity).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Subscribed sensor kind.
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// The handler.
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .field("handler", &self.handler.name())
            .finish()
    }
}

/// Mutex-guarded, insertion-only subscription table.
pub struct Registry {
    capacity: usize,
    table: Mutex<Vec<Subscription>>,
}

impl Registry {
    /// Creates an empty registry with room for `capacity` subscriptions.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            table: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Appends `(handler, kind)` and returns its index.
    ///
    /// Fails with [`RegistryError::Full`] once `capacity` entries exist; the table is
    /// left untouched in that case.
    pub fn register(&self, handler: HandlerRef, kind: SensorKind) -> Result<usize, RegistryError> {
        let mut table = self.lock();
        if table.len() >= self.capacity {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }
        let index = table.len();
        table.push(Subscription {
            index,
            kind,
            handler,
        });
        Ok(index)
    }

    /// Locked copy of all subscriptions, in insertion order.
    pub fn snapshot(&self) -> Vec<Subscription> {
        self.lock().clone()
    }

    /// Number of subscriptions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the next registration would fail.
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Handlers never run under this lock, so a poisoned table is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<Subscription>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
