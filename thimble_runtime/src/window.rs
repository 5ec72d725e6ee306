// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window: tree, focus state, and the event queue under one roof.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use log::debug;
use thimble_focus::{ActiveView, FocusDirection, FocusMap, FocusTargets};
use thimble_responder::event::{Event, EventKind, Payload};
use thimble_style::StyleHandle;
use thimble_view_tree::{LocalView, Tree, ViewId};

/// The topmost view and the hub everything else hangs off.
///
/// A window owns the view [`Tree`] and guarantees its root carries a
/// concrete style, so [`Tree::effective_style`] always resolves for views
/// under it. It also owns the active-view pointer, the focus registry, the
/// FIFO event queue, and the dirty flag a renderer polls.
///
/// The window queues; the [`App`](crate::App) drains. Events submitted
/// here sit in the queue until the run loop dispatches them.
#[derive(Debug)]
pub struct Window {
    tree: Tree,
    root: ViewId,
    active: ActiveView<ViewId>,
    focus: FocusMap<ViewId>,
    queue: VecDeque<Event<ViewId>>,
    needs_display: bool,
}

impl Window {
    /// Create a window of `size` with the given root style.
    ///
    /// Requiring the style at construction is what makes style resolution
    /// total: there is no way to build a window whose tree lacks a styled
    /// root.
    pub fn new(size: Size, style: StyleHandle) -> Self {
        let mut tree = Tree::new();
        let root = tree.insert(
            None,
            LocalView {
                frame: Rect::new(0.0, 0.0, size.width, size.height),
                style: Some(style),
                ..LocalView::default()
            },
        );
        Self {
            tree,
            root,
            active: ActiveView::new(),
            focus: FocusMap::new(),
            queue: VecDeque::new(),
            needs_display: true,
        }
    }

    /// The root view.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// The view tree, for reads.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The view tree, for direct manipulation beyond the window's helpers.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Insert a view under `parent` (commonly [`Window::root`]).
    pub fn add_subview(&mut self, parent: ViewId, local: LocalView) -> ViewId {
        let id = self.tree.insert(Some(parent), local);
        self.needs_display = true;
        id
    }

    /// Detach a subtree without destroying it; it can be re-attached later
    /// with [`Window::reattach`].
    ///
    /// If the active view sits inside the detached subtree, activation
    /// falls back to the root so input keeps flowing somewhere reachable.
    pub fn detach_subview(&mut self, id: ViewId) -> bool {
        if !self.tree.reparent(id, None) {
            return false;
        }
        self.fixup_active(id);
        self.needs_display = true;
        true
    }

    /// Destroy a subtree. Ids into it become stale; queued events from it
    /// are discarded at dispatch time.
    ///
    /// Focus records for every destroyed view are dropped along with the
    /// views. Returns the destroyed ids so callers holding their own
    /// per-view registrations (the application's action table) can drop
    /// those too.
    pub fn remove_subview(&mut self, id: ViewId) -> Vec<ViewId> {
        let removed = self.tree.subtree_ids(id);
        if removed.is_empty() {
            return removed;
        }
        self.fixup_active(id);
        for &view in &removed {
            self.focus.remove(view);
        }
        self.tree.remove(id);
        self.needs_display = true;
        removed
    }

    /// Re-attach a previously detached subtree under `parent`.
    pub fn reattach(&mut self, id: ViewId, parent: ViewId) -> bool {
        let moved = self.tree.reparent(id, Some(parent));
        if moved {
            self.needs_display = true;
        }
        moved
    }

    fn fixup_active(&mut self, leaving: ViewId) {
        if let Some(active) = self.active.current() {
            if self.tree.is_in_subtree(active, leaving) {
                self.active.activate(self.root);
            }
        }
    }

    /// The active view, if any.
    pub fn active(&self) -> Option<ViewId> {
        self.active.current()
    }

    /// Make `id` the active view. Returns the view it deactivated.
    ///
    /// Pure state: no event is generated and no handler runs. Callers that
    /// want a notification submit [`EventKind::FocusChanged`] themselves.
    pub fn make_active(&mut self, id: ViewId) -> Option<ViewId> {
        let previous = self.active.activate(id);
        self.needs_display = true;
        previous
    }

    /// Deactivate `id` if it is active.
    pub fn resign_active(&mut self, id: ViewId) -> bool {
        let resigned = self.active.resign(id);
        if resigned {
            self.needs_display = true;
        }
        resigned
    }

    /// Register `view`'s focus neighbors for directional navigation.
    pub fn set_focus_targets(&mut self, view: ViewId, targets: FocusTargets<ViewId>) {
        self.focus.set(view, targets);
    }

    /// Resolve where a directional press should move activation.
    ///
    /// Navigation is relative to the active view (falling back to
    /// `origin`), walked up to the nearest view registered in the focus
    /// map. Returns the neighbor in `direction`, or `None` if nothing on
    /// that chain navigates there.
    pub fn focus_target_from(
        &self,
        origin: ViewId,
        direction: FocusDirection,
    ) -> Option<ViewId> {
        let start = self.active.current().unwrap_or(origin);
        let source = self.focus.source(start, |v| self.tree.parent_of(v))?;
        self.focus.target(source, direction)
    }

    /// Queue an event for dispatch on the next drain.
    pub fn submit(&mut self, event: Event<ViewId>) {
        self.queue.push_back(event);
    }

    /// Queue an event originating at the active view.
    ///
    /// This is how button tasks inject input: physical presses become
    /// events anchored at whatever the user has selected. Returns `false`
    /// (and queues nothing) when no view is active.
    pub fn submit_to_active(&mut self, kind: EventKind, payload: Payload) -> bool {
        match self.active.current() {
            Some(origin) => {
                self.queue.push_back(Event::with_payload(kind, origin, payload));
                true
            }
            None => {
                debug!("no active view; dropping {kind:?}");
                false
            }
        }
    }

    /// Feed one touch sample. Call repeatedly from a touchscreen task.
    ///
    /// When `touched` is set and the point lands on a visible, pickable
    /// view, queues [`EventKind::TouchBegan`] originating at the deepest
    /// such view, with the screen-space point as payload. Returns the hit
    /// view.
    pub fn handle_touch(&mut self, touched: bool, x: f64, y: f64) -> Option<ViewId> {
        if !touched {
            return None;
        }
        let point = Point::new(x, y);
        let hit = self.tree.view_at_point(self.root, point)?;
        self.queue
            .push_back(Event::with_payload(EventKind::TouchBegan, hit, Payload::Touch(point)));
        Some(hit)
    }

    /// Style resolution for `id`; always `Some` for live views under this
    /// window's root.
    pub fn effective_style(&self, id: ViewId) -> Option<StyleHandle> {
        self.tree.effective_style(id)
    }

    /// Whether a renderer should repaint.
    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Set or clear the repaint flag (a renderer clears it after painting).
    pub fn set_needs_display(&mut self, needs_display: bool) {
        self.needs_display = needs_display;
    }

    pub(crate) fn pop_event(&mut self) -> Option<Event<ViewId>> {
        self.queue.pop_front()
    }

    #[cfg(test)]
    pub(crate) fn queued(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thimble_view_tree::ViewFlags;

    fn window() -> Window {
        Window::new(Size::new(160.0, 128.0), StyleHandle::default())
    }

    fn child(frame: Rect) -> LocalView {
        LocalView {
            frame,
            ..LocalView::default()
        }
    }

    #[test]
    fn root_always_has_a_style() {
        let w = window();
        assert!(w.effective_style(w.root()).is_some());
        assert_eq!(
            w.tree().frame(w.root()),
            Some(Rect::new(0.0, 0.0, 160.0, 128.0))
        );
    }

    #[test]
    fn subviews_resolve_the_root_style_by_default() {
        let mut w = window();
        let root = w.root();
        let button = w.add_subview(root, child(Rect::new(10.0, 10.0, 50.0, 30.0)));
        let own = w.effective_style(button).unwrap();
        let roots = w.effective_style(root).unwrap();
        assert!(own.ptr_eq(&roots));
    }

    #[test]
    fn touch_queues_touch_began_at_the_deepest_hit() {
        let mut w = window();
        let root = w.root();
        let panel = w.add_subview(root, child(Rect::new(20.0, 20.0, 120.0, 100.0)));
        let button = w.add_subview(panel, child(Rect::new(5.0, 5.0, 45.0, 25.0)));

        assert_eq!(w.handle_touch(true, 30.0, 30.0), Some(button));
        assert_eq!(w.queued(), 1);
        let ev = w.pop_event().unwrap();
        assert_eq!(ev.kind, EventKind::TouchBegan);
        assert_eq!(ev.origin, button);
        assert_eq!(ev.payload, Payload::Touch(Point::new(30.0, 30.0)));

        // No finger, no event.
        assert_eq!(w.handle_touch(false, 30.0, 30.0), None);
        // Misses queue nothing.
        assert_eq!(w.handle_touch(true, 500.0, 500.0), None);
        assert_eq!(w.queued(), 0);
    }

    #[test]
    fn touch_ignores_hidden_views() {
        let mut w = window();
        let root = w.root();
        let hidden = w.add_subview(root, child(Rect::new(0.0, 0.0, 50.0, 50.0)));
        w.tree_mut().set_flags(hidden, ViewFlags::PICKABLE);

        assert_eq!(w.handle_touch(true, 10.0, 10.0), Some(root));
    }

    #[test]
    fn submit_to_active_requires_an_active_view() {
        let mut w = window();
        assert!(!w.submit_to_active(EventKind::ButtonA, Payload::None));
        assert_eq!(w.queued(), 0);

        let root = w.root();
        let button = w.add_subview(root, child(Rect::new(0.0, 0.0, 10.0, 10.0)));
        w.make_active(button);
        assert!(w.submit_to_active(EventKind::ButtonA, Payload::None));
        let ev = w.pop_event().unwrap();
        assert_eq!(ev.origin, button);
    }

    #[test]
    fn detach_falls_active_back_to_root_and_preserves_the_view() {
        let mut w = window();
        let root = w.root();
        let panel = w.add_subview(root, child(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let button = w.add_subview(panel, child(Rect::new(0.0, 0.0, 10.0, 10.0)));
        w.make_active(button);

        assert!(w.detach_subview(panel));
        assert_eq!(w.active(), Some(root));
        assert!(w.tree().is_alive(button), "detached views stay alive");

        assert!(w.reattach(panel, root));
        assert_eq!(w.tree().parent_of(panel), Some(root));
    }

    #[test]
    fn remove_destroys_and_fixes_up_active() {
        let mut w = window();
        let root = w.root();
        let button = w.add_subview(root, child(Rect::new(0.0, 0.0, 10.0, 10.0)));
        w.make_active(button);

        let removed = w.remove_subview(button);
        assert_eq!(removed, alloc::vec![button]);
        assert!(!w.tree().is_alive(button));
        assert_eq!(w.active(), Some(root));
    }

    #[test]
    fn remove_drops_focus_records_for_the_whole_subtree() {
        let mut w = window();
        let root = w.root();
        let panel = w.add_subview(root, child(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let b1 = w.add_subview(panel, child(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b2 = w.add_subview(panel, child(Rect::new(20.0, 0.0, 30.0, 10.0)));
        w.set_focus_targets(
            b1,
            FocusTargets {
                right: Some(b2),
                ..FocusTargets::default()
            },
        );
        w.set_focus_targets(
            b2,
            FocusTargets {
                left: Some(b1),
                ..FocusTargets::default()
            },
        );

        let removed = w.remove_subview(panel);
        assert_eq!(removed.len(), 3);
        assert!(removed.contains(&b1) && removed.contains(&b2));

        // Descendant records went with their views, not just the head's.
        assert!(!w.focus.contains(b1));
        assert!(!w.focus.contains(b2));
        assert!(!w.focus.contains(panel));
    }

    #[test]
    fn focus_target_resolution_walks_to_a_registered_ancestor() {
        let mut w = window();
        let root = w.root();
        let row = w.add_subview(root, child(Rect::new(0.0, 0.0, 160.0, 20.0)));
        let cell = w.add_subview(row, child(Rect::new(0.0, 0.0, 20.0, 20.0)));
        let next_row = w.add_subview(root, child(Rect::new(0.0, 20.0, 160.0, 40.0)));
        w.set_focus_targets(
            row,
            FocusTargets {
                down: Some(next_row),
                ..FocusTargets::default()
            },
        );

        // The active cell navigates as its registered row.
        w.make_active(cell);
        assert_eq!(w.focus_target_from(cell, FocusDirection::Down), Some(next_row));
        assert_eq!(w.focus_target_from(cell, FocusDirection::Up), None);
    }

    #[test]
    fn needs_display_tracks_mutations() {
        let mut w = window();
        w.set_needs_display(false);
        let root = w.root();
        let b = w.add_subview(root, child(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(w.needs_display());

        w.set_needs_display(false);
        w.make_active(b);
        assert!(w.needs_display());
    }
}
