// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thimble Runtime: the window, tasks, and the cooperative run loop.
//!
//! A [`Window`] owns the view tree, the active-view pointer, the focus
//! registry, and a FIFO event queue. An [`App`] pairs a window with user
//! state, an action table, and a list of [`Task`]s, then drives everything
//! from [`App::run`]:
//!
//! 1. Poll each task in registration order. Tasks read hardware (or
//!    simulations of it) and queue events on the window.
//! 2. After each task's poll, drain the queue: each event is normalized
//!    (touch or confirm button becomes a tap) and dispatched along the
//!    responder chain, origin → root, first handler wins.
//! 3. Repeat until a task reports [`TaskOutcome::Exit`], or a task or
//!    handler fails — errors abort the loop as [`RunError`].
//!
//! Directional button events that reach the root are offered to focus
//! navigation before the root's own action table: if the active view (or a
//! registered ancestor of it) has a neighbor in the pressed direction, the
//! runtime activates that neighbor and the event is consumed.
//!
//! Handlers and tasks receive a [`Ctx`]: the window plus the application's
//! own state, with no ambient globals. Two applications in one process do
//! not interfere.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod app;
mod error;
mod task;
mod window;

pub use app::App;
pub use error::RunError;
pub use task::{Ctx, Handler, Task, TaskOutcome};
pub use window::Window;
