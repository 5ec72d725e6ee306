// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use thimble_style::StyleHandle;

use crate::types::{LocalView, ViewFlags, ViewId};

/// Children lists are inline up to this many entries; microcontroller UIs
/// rarely nest wider.
type Children = SmallVec<[ViewId; 4]>;

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ViewId>,
    children: Children,
    local: LocalView,
}

impl Node {
    fn new(generation: u32, local: LocalView) -> Self {
        Self {
            generation,
            parent: None,
            children: Children::new(),
            local,
        }
    }
}

/// The view hierarchy.
///
/// Views are stored in a slot arena addressed by generational [`ViewId`]s.
/// Every structural operation keeps two invariants: a view has at most one
/// parent, and the tree is acyclic ([`Tree::reparent`] refuses to attach a
/// view beneath its own subtree).
///
/// Stale ids are harmless: accessors return `None` or an empty slice, and
/// mutators are no-ops.
#[derive(Clone, Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("views_total", &total)
            .field("views_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new view as the last child of `parent` (or as a root if `None`).
    ///
    /// The child's parent back-reference is set; its frame is interpreted in
    /// the parent's coordinate space from here on. A stale `parent` is
    /// treated as `None`: the view is created as a detached root rather than
    /// linked to a dead slot.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "slot indices fit in 32 bits by construction"
    )]
    pub fn insert(&mut self, parent: Option<ViewId>, local: LocalView) -> ViewId {
        // Validate before allocating: popping the free list first could hand
        // the new view the stale parent's own slot.
        let parent = parent.filter(|p| self.is_alive(*p));
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ViewId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Destroy a view and its whole subtree.
    ///
    /// All ids in the subtree become stale. To detach a view while keeping
    /// it alive for later re-attachment, use [`Tree::reparent`] with `None`.
    pub fn remove(&mut self, id: ViewId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: ViewId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.remove_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent`, or detach it entirely with `None`.
    ///
    /// The view is detached from its old parent first (a view has at most
    /// one parent at a time). Returns `false` without changing anything if
    /// `id` is stale, if `new_parent` is stale, or if attaching would create
    /// a cycle (`new_parent` is `id` or one of its descendants).
    pub fn reparent(&mut self, id: ViewId, new_parent: Option<ViewId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) || self.is_in_subtree(p, id) {
                return false;
            }
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        true
    }

    /// All live ids in `id`'s subtree, `id` first. Empty for stale ids.
    ///
    /// Callers holding per-view registrations keyed by id (action tables,
    /// focus records) use this to tear them down before destroying the
    /// subtree.
    pub fn subtree_ids(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = alloc::vec![id];
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend_from_slice(self.children_of(v));
        }
        out
    }

    /// Whether `id` equals `ancestor` or sits anywhere below it.
    pub fn is_in_subtree(&self, id: ViewId, ancestor: ViewId) -> bool {
        if !self.is_alive(id) || !self.is_alive(ancestor) {
            return false;
        }
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.node(c).parent;
        }
        false
    }

    /// Returns true if `id` refers to a live view.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.generation())
            .unwrap_or(false)
    }

    /// Returns the parent of a view if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: ViewId) -> Option<ViewId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Get the children of a view in back-to-front order, or an empty slice
    /// if the id is stale.
    pub fn children_of(&self, id: ViewId) -> &[ViewId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Returns the frame (in parent coordinates) of a live view.
    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).local.frame)
    }

    /// Returns the flags of a live view.
    pub fn flags(&self, id: ViewId) -> Option<ViewFlags> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.node(id).local.flags)
    }

    /// Returns the view's own style handle, if one was set explicitly.
    ///
    /// This does not inherit; see [`Tree::effective_style`].
    pub fn style(&self, id: ViewId) -> Option<StyleHandle> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).local.style.clone()
    }

    /// Update a view's frame.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.frame = frame;
        }
    }

    /// Update a view's flags.
    pub fn set_flags(&mut self, id: ViewId, flags: ViewFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Set or clear a view's explicit style.
    pub fn set_style(&mut self, id: ViewId, style: Option<StyleHandle>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.style = style;
        }
    }

    /// Resolve a view's absolute origin by summing frame offsets up the
    /// parent chain.
    pub fn absolute_origin(&self, id: ViewId) -> Option<Point> {
        if !self.is_alive(id) {
            return None;
        }
        let mut x = 0.0;
        let mut y = 0.0;
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c);
            let origin = node.local.frame.origin();
            x += origin.x;
            y += origin.y;
            current = node.parent;
        }
        Some(Point::new(x, y))
    }

    /// Resolve a view's frame in absolute coordinates.
    pub fn absolute_frame(&self, id: ViewId) -> Option<Rect> {
        let origin = self.absolute_origin(id)?;
        let frame = self.node(id).local.frame;
        Some(Rect::new(
            origin.x,
            origin.y,
            origin.x + frame.width(),
            origin.y + frame.height(),
        ))
    }

    /// Whether a view and all of its ancestors are visible.
    ///
    /// Visibility is inherited: setting a view's own `VISIBLE` flag is not
    /// enough if any ancestor is hidden.
    pub fn is_effectively_visible(&self, id: ViewId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c);
            if !node.local.flags.contains(ViewFlags::VISIBLE) {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Resolve the style a view should be drawn with.
    ///
    /// Returns the view's own style if set, else the nearest styled
    /// ancestor's. `None` means no view on the path to the root carries a
    /// style; a window root always does, so under a window this resolves at
    /// worst at the root.
    pub fn effective_style(&self, id: ViewId) -> Option<StyleHandle> {
        if !self.is_alive(id) {
            return None;
        }
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c);
            if let Some(style) = &node.local.style {
                return Some(style.clone());
            }
            current = node.parent;
        }
        None
    }

    /// Find the deepest visible, pickable view under `point`.
    ///
    /// `point` is expressed in the coordinate space `root`'s frame lives in
    /// (for a window root at the origin, that is the screen space). Children
    /// are checked frontmost (last-added) first, with the point translated
    /// into each child's local space while descending. A view whose subtree
    /// misses still counts as the hit itself when it contains the point and
    /// is pickable; invisible subtrees are skipped entirely.
    pub fn view_at_point(&self, root: ViewId, point: Point) -> Option<ViewId> {
        if !self.is_alive(root) {
            return None;
        }
        self.hit_descend(root, point)
    }

    fn hit_descend(&self, id: ViewId, point: Point) -> Option<ViewId> {
        let node = self.node(id);
        if !node.local.flags.contains(ViewFlags::VISIBLE) {
            return None;
        }
        let frame = node.local.frame;
        if !frame.contains(point) {
            return None;
        }
        let local = Point::new(point.x - frame.x0, point.y - frame.y0);
        // Frontmost layers first.
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_descend(child, local) {
                return Some(hit);
            }
        }
        node.local
            .flags
            .contains(ViewFlags::PICKABLE)
            .then_some(id)
    }

    fn node(&self, id: ViewId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ViewId")
    }

    fn node_mut(&mut self, id: ViewId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ViewId")
    }

    fn node_opt_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ViewId, parent: ViewId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ViewId, parent: ViewId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
