// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responder-chain dispatch: walk origin → root, first match wins.
//!
//! The walk is split from handler invocation so this crate stays free of
//! any particular handler shape. [`responder_path`] builds the chain from a
//! [`ParentLookup`] source; [`dispatch`] walks it with a caller-supplied
//! `try_invoke` closure. The closure returns `None` for "no handler here,
//! keep walking" and `Some(result)` for "invoked" — at which point the walk
//! ends, whether the handler succeeded or failed.

use alloc::vec::Vec;

use crate::event::Event;

/// Source of parent back-references for path reconstruction.
///
/// The view tree implements this behind the `view_tree_adapter` feature;
/// tests implement it over whatever shape is convenient.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` at a root (or for an unknown node).
    fn parent_of(&self, node: K) -> Option<K>;
}

/// Where dispatch ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome<K> {
    /// The event was consumed by this view's handler.
    Handled(K),
    /// No view on the chain had a handler for the kind. A defined terminal
    /// state, not a fault.
    Dropped,
}

/// Build the responder chain for `origin`: origin first, root last, both
/// inclusive.
pub fn responder_path<K: Copy>(origin: K, lookup: &impl ParentLookup<K>) -> Vec<K> {
    let mut path = Vec::new();
    let mut current = Some(origin);
    while let Some(node) = current {
        path.push(node);
        current = lookup.parent_of(node);
    }
    path
}

/// Walk `path` in order, offering the event to each view until one handles
/// it.
///
/// `try_invoke(node, event)` returns `None` when `node` has no handler for
/// the event's kind, or `Some(result)` after invoking one. The first
/// invocation consumes the event: on `Some(Ok(()))` dispatch returns
/// [`Outcome::Handled`] without visiting the rest of the path, and on
/// `Some(Err(e))` the error propagates immediately. Exhausting the path
/// yields [`Outcome::Dropped`].
pub fn dispatch<K: Copy, E>(
    path: &[K],
    event: &Event<K>,
    mut try_invoke: impl FnMut(K, &Event<K>) -> Option<Result<(), E>>,
) -> Result<Outcome<K>, E> {
    for &node in path {
        if let Some(result) = try_invoke(node, event) {
            result?;
            return Ok(Outcome::Handled(node));
        }
    }
    Ok(Outcome::Dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionMap;
    use crate::event::EventKind;
    use alloc::vec;

    /// Chain n → n-1 → … → 0.
    struct Countdown;

    impl ParentLookup<u32> for Countdown {
        fn parent_of(&self, node: u32) -> Option<u32> {
            node.checked_sub(1)
        }
    }

    #[test]
    fn path_runs_origin_to_root_inclusive() {
        assert_eq!(responder_path(3, &Countdown), vec![3, 2, 1, 0]);
        assert_eq!(responder_path(0, &Countdown), vec![0]);
    }

    #[test]
    fn origin_handler_wins_and_runs_once() {
        let mut map: ActionMap<u32, u32> = ActionMap::new();
        map.set(2, EventKind::Tapped, 0);
        map.set(0, EventKind::Tapped, 0);

        let path = responder_path(2, &Countdown);
        let event = Event::new(EventKind::Tapped, 2);
        let mut invocations = 0;
        let outcome = dispatch(&path, &event, |node, ev| {
            map.get_mut(node, ev.kind).map(|count| {
                *count += 1;
                invocations += 1;
                Ok::<(), ()>(())
            })
        });
        assert_eq!(outcome, Ok(Outcome::Handled(2)));
        // Exactly one handler ran, and it was the origin's own.
        assert_eq!(invocations, 1);
        assert_eq!(map.get_mut(2, EventKind::Tapped), Some(&mut 1));
        assert_eq!(map.get_mut(0, EventKind::Tapped), Some(&mut 0));
    }

    #[test]
    fn nearest_ancestor_handles_when_origin_has_no_action() {
        let mut map: ActionMap<u32, &str> = ActionMap::new();
        map.set(1, EventKind::Tapped, "mid");
        map.set(0, EventKind::Tapped, "root");

        let path = responder_path(3, &Countdown);
        let event = Event::new(EventKind::Tapped, 3);
        let outcome = dispatch(&path, &event, |node, ev| {
            map.contains(node, ev.kind).then(|| Ok::<(), ()>(()))
        });
        assert_eq!(outcome, Ok(Outcome::Handled(1)));
    }

    #[test]
    fn kind_mismatch_is_not_a_match() {
        let mut map: ActionMap<u32, &str> = ActionMap::new();
        map.set(2, EventKind::ButtonB, "back");

        let path = responder_path(2, &Countdown);
        let event = Event::new(EventKind::Tapped, 2);
        let outcome = dispatch(&path, &event, |node, ev| {
            map.contains(node, ev.kind).then(|| Ok::<(), ()>(()))
        });
        assert_eq!(outcome, Ok(Outcome::Dropped));
    }

    #[test]
    fn unhandled_event_drops_without_fault_or_invocation() {
        let path = responder_path(3, &Countdown);
        let event = Event::new(EventKind::Tapped, 3);
        let mut invocations = 0;
        let outcome = dispatch(&path, &event, |_node, _ev| {
            invocations += 1;
            None::<Result<(), ()>>
        });
        assert_eq!(outcome, Ok(Outcome::Dropped));
        // Every view was offered the event, none was invoked as a handler.
        assert_eq!(invocations, 4);
    }

    #[test]
    fn handler_error_aborts_dispatch() {
        let path = responder_path(2, &Countdown);
        let event = Event::new(EventKind::Tapped, 2);
        let mut offered = vec![];
        let outcome = dispatch(&path, &event, |node, _ev| {
            offered.push(node);
            (node == 1).then_some(Err("boom"))
        });
        assert_eq!(outcome, Err("boom"));
        // The failing handler consumed the event; the root was never offered.
        assert_eq!(offered, vec![2, 1]);
    }
}
