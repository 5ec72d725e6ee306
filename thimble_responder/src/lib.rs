// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thimble Responder: events, action tables, and responder-chain dispatch.
//!
//! ## Overview
//!
//! This crate is the core of the event model. An [`Event`](event::Event)
//! carries a kind, the originating view, and an optional payload. Views do
//! not receive method calls; instead an [`ActionMap`](actions::ActionMap)
//! associates `(view, kind)` pairs with handlers, and
//! [`dispatch`](dispatch::dispatch) walks the responder chain — the
//! origin's parent chain, origin first — invoking the first handler that
//! matches the event's kind.
//!
//! ## Dispatch semantics
//!
//! - The chain is origin → root, inclusive of both.
//! - The first view with a handler for the kind consumes the event; no
//!   other handler runs, ancestors included. Delivery is exactly-once.
//! - A handler error aborts dispatch immediately and propagates to the
//!   caller.
//! - If no view on the chain has a handler, the event is dropped. This is
//!   a defined terminal state ([`Outcome::Dropped`](dispatch::Outcome)),
//!   not a fault.
//!
//! The crate is policy-free about what a handler *is*:
//! [`ActionMap`](actions::ActionMap) and
//! [`dispatch`](dispatch::dispatch) are generic over an opaque handler
//! type, and the caller supplies the invocation closure. The runtime crate
//! layers its context-carrying handlers on top.
//!
//! ## Example
//!
//! ```rust
//! use thimble_responder::dispatch::{dispatch, responder_path, Outcome, ParentLookup};
//! use thimble_responder::event::{Event, EventKind};
//!
//! // A three-deep chain: 2 → 1 → 0.
//! struct Chain;
//! impl ParentLookup<u32> for Chain {
//!     fn parent_of(&self, node: u32) -> Option<u32> {
//!         node.checked_sub(1)
//!     }
//! }
//!
//! let path = responder_path(2, &Chain);
//! assert_eq!(path, vec![2, 1, 0]);
//!
//! // Only the middle view handles Tapped; it consumes the event.
//! let event = Event::new(EventKind::Tapped, 2);
//! let outcome: Outcome<u32> = dispatch(&path, &event, |node, _ev| {
//!     (node == 1).then(|| Ok::<(), ()>(()))
//! })
//! .unwrap();
//! assert_eq!(outcome, Outcome::Handled(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod actions;
pub mod dispatch;
pub mod event;

#[cfg(feature = "view_tree_adapter")]
pub mod adapters;
