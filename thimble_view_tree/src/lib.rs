// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thimble View Tree: the containment hierarchy under a window.
//!
//! A [`Tree`] owns a set of views arranged in a hierarchy. Each view has a
//! frame expressed in its parent's coordinate space, visibility and picking
//! flags, and an optional shared style. The tree is the substrate for the
//! responder chain: events bubble along the parent back-references stored
//! here.
//!
//! - Frames are parent-relative; [`Tree::absolute_origin`] resolves a view's
//!   screen position by walking the parent chain and summing offsets.
//! - Visibility is inherited: a view is effectively invisible when any
//!   ancestor is invisible, regardless of its own flag
//!   ([`Tree::is_effectively_visible`]).
//! - Styles inherit lazily: [`Tree::effective_style`] returns the view's own
//!   style if set, else the nearest styled ancestor's.
//! - Touch resolution ([`Tree::view_at_point`]) finds the deepest visible,
//!   pickable view under a point, checking children frontmost-first.
//!
//! The tree does **not** validate that children fit inside their parent's
//! frame; out-of-bounds geometry is the caller's problem and produces an
//! undefined visual result, never a crash. It also performs no layout and
//! no drawing: showing, hiding, and repainting subtrees is the display
//! collaborator's job.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use thimble_view_tree::{LocalView, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(
//!     None,
//!     LocalView {
//!         frame: Rect::new(0.0, 0.0, 160.0, 128.0),
//!         ..LocalView::default()
//!     },
//! );
//! let child = tree.insert(
//!     Some(root),
//!     LocalView {
//!         frame: Rect::new(10.0, 20.0, 60.0, 50.0),
//!         ..LocalView::default()
//!     },
//! );
//!
//! assert_eq!(tree.absolute_origin(child), Some(Point::new(10.0, 20.0)));
//! assert_eq!(tree.view_at_point(root, Point::new(15.0, 25.0)), Some(child));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Tree;
pub use types::{LocalView, ViewFlags, ViewId};
