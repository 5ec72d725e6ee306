// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thimble Focus: the active view and directional navigation between views.
//!
//! On touch hardware the "active" view is mostly cosmetic, but on
//! button-driven hardware it is the delivery point for input: the runtime
//! turns physical button presses into events originating at whichever view
//! is active. [`ActiveView`] holds that single nullable pointer.
//!
//! Navigation is explicit, not spatial. Each focusable view registers a
//! [`FocusTargets`] record naming its neighbor in each of the four
//! directions; the [`FocusMap`] stores those records and answers lookups.
//! Nothing here computes adjacency from geometry — what you register is
//! what you get, missing directions simply don't navigate.
//!
//! When a directional press reaches the root with the active view set to
//! some deep descendant, the runtime needs to know which *registered* view
//! the navigation should be relative to. [`FocusMap::source`] answers that
//! by walking the parent chain from the active view to the nearest
//! registered ancestor (a cell inside a focusable row navigates as the
//! row).
//!
//! Activation is plain state: [`ActiveView::activate`] swaps the pointer
//! and reports the previously active view so the caller can repaint both
//! or emit its own change notification. No handlers fire from here.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::hash::Hash;

use hashbrown::HashMap;

/// The single active-view pointer.
///
/// At most one view is active at a time; activating a view implicitly
/// deactivates the previous one.
#[derive(Clone, Debug)]
pub struct ActiveView<K> {
    current: Option<K>,
}

impl<K> Default for ActiveView<K> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: Copy + PartialEq> ActiveView<K> {
    /// No view active.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The active view, if any.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Make `view` active, returning the view it deactivated.
    ///
    /// Returns `None` if nothing was active, or if `view` already was (the
    /// swap is idempotent and reports no change).
    pub fn activate(&mut self, view: K) -> Option<K> {
        let previous = self.current.replace(view);
        previous.filter(|p| *p != view)
    }

    /// Deactivate `view` if it is the one currently active.
    ///
    /// A view can only resign itself; a stale resign for a view that is no
    /// longer active does nothing and returns `false`.
    pub fn resign(&mut self, view: K) -> bool {
        if self.current == Some(view) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Deactivate whatever is active.
    pub fn clear(&mut self) -> Option<K> {
        self.current.take()
    }
}

/// A navigation direction, as pressed on a d-pad.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// Toward the top of the screen.
    Up,
    /// Toward the right edge.
    Right,
    /// Toward the bottom.
    Down,
    /// Toward the left edge.
    Left,
}

/// A view's registered neighbors, one optional per direction.
///
/// `None` means focus stays put when the user presses that direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusTargets<K> {
    /// Neighbor activated on an up press.
    pub up: Option<K>,
    /// Neighbor activated on a right press.
    pub right: Option<K>,
    /// Neighbor activated on a down press.
    pub down: Option<K>,
    /// Neighbor activated on a left press.
    pub left: Option<K>,
}

impl<K> Default for FocusTargets<K> {
    fn default() -> Self {
        Self {
            up: None,
            right: None,
            down: None,
            left: None,
        }
    }
}

impl<K: Copy> FocusTargets<K> {
    /// The neighbor in `direction`, if one was registered.
    pub fn get(&self, direction: FocusDirection) -> Option<K> {
        match direction {
            FocusDirection::Up => self.up,
            FocusDirection::Right => self.right,
            FocusDirection::Down => self.down,
            FocusDirection::Left => self.left,
        }
    }
}

/// The focus adjacency registry.
#[derive(Clone, Debug)]
pub struct FocusMap<K> {
    targets: HashMap<K, FocusTargets<K>>,
}

impl<K> Default for FocusMap<K> {
    fn default() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> FocusMap<K> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    /// Register (or replace) `view`'s neighbors.
    pub fn set(&mut self, view: K, targets: FocusTargets<K>) {
        self.targets.insert(view, targets);
    }

    /// Remove `view` from the registry.
    ///
    /// Other views' records naming `view` as a neighbor are untouched; a
    /// later navigation to it still activates it.
    pub fn remove(&mut self, view: K) -> Option<FocusTargets<K>> {
        self.targets.remove(&view)
    }

    /// Whether `view` has a registered record.
    pub fn contains(&self, view: K) -> bool {
        self.targets.contains_key(&view)
    }

    /// `view`'s neighbor in `direction`, if `view` is registered and has
    /// one there.
    pub fn target(&self, view: K, direction: FocusDirection) -> Option<K> {
        self.targets.get(&view)?.get(direction)
    }

    /// Find the registered view a navigation from `start` is relative to.
    ///
    /// Walks `start`'s parent chain (via `parent_of`, `start` inclusive)
    /// and returns the first view present in the registry. `None` means no
    /// view on the chain participates in focus navigation.
    pub fn source(&self, start: K, mut parent_of: impl FnMut(K) -> Option<K>) -> Option<K> {
        let mut current = Some(start);
        while let Some(view) = current {
            if self.targets.contains_key(&view) {
                return Some(view);
            }
            current = parent_of(view);
        }
        None
    }
}
