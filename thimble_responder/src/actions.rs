// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action tables: `(view, kind)` → handler.
//!
//! Registering a second handler for the same `(view, kind)` pair replaces
//! the first; actions never stack. The handler type `H` is opaque here —
//! the runtime stores boxed closures, tests often store plain markers.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::event::EventKind;

/// Handler storage keyed by `(view, kind)`.
#[derive(Debug)]
pub struct ActionMap<K, H> {
    entries: HashMap<(K, EventKind), H>,
}

impl<K, H> Default for ActionMap<K, H>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> ActionMap<K, H>
where
    K: Eq + Hash,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a handler for `(view, kind)`.
    ///
    /// Returns the handler it replaced, if any.
    pub fn set(&mut self, view: K, kind: EventKind, handler: H) -> Option<H> {
        self.entries.insert((view, kind), handler)
    }

    /// Unregister and return the handler for `(view, kind)`.
    pub fn remove(&mut self, view: K, kind: EventKind) -> Option<H> {
        self.entries.remove(&(view, kind))
    }

    /// Whether a handler is registered for `(view, kind)`.
    pub fn contains(&self, view: K, kind: EventKind) -> bool {
        self.entries.contains_key(&(view, kind))
    }

    /// Mutable access to the handler for `(view, kind)`.
    ///
    /// Mutable because runtime handlers are `FnMut` closures.
    pub fn get_mut(&mut self, view: K, kind: EventKind) -> Option<&mut H> {
        self.entries.get_mut(&(view, kind))
    }

    /// Drop every handler registered for `view`, across all kinds.
    ///
    /// Called when a view is destroyed so stale handlers cannot linger.
    pub fn clear_view(&mut self, view: K)
    where
        K: Copy,
    {
        self.entries.retain(|(v, _), _| *v != view);
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
