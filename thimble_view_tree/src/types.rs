// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: view identifiers, flags, and local data.

use kurbo::Rect;
use thimble_style::StyleHandle;

/// Identifier for a view in the tree (generational).
///
/// A `ViewId` pairs a slot index with a generation counter. Removing a view
/// frees its slot for reuse and bumps the generation, so a stale id never
/// aliases a later view that happens to land in the same slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// View flags controlling visibility and touch participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// View is visible. An invisible view hides its whole subtree.
        const VISIBLE  = 0b0000_0001;
        /// View is pickable (eligible as a touch target).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Per-view local data.
#[derive(Clone, Debug, Default)]
pub struct LocalView {
    /// Frame in the parent's coordinate space.
    pub frame: Rect,
    /// Visibility and picking flags.
    pub flags: ViewFlags,
    /// Explicit style, or `None` to inherit from the nearest styled ancestor.
    pub style: Option<StyleHandle>,
}
