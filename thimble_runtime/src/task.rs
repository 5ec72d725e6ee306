// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tasks and the context they (and handlers) run against.

use alloc::boxed::Box;

use thimble_responder::event::Event;
use thimble_view_tree::ViewId;

use crate::window::Window;

/// What a task's poll decided about the loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Keep looping.
    Continue,
    /// Leave the run loop cleanly after this poll's events are drained.
    Exit,
}

/// What tasks and event handlers see: the window plus the application's
/// own state. No globals are involved, so independent applications never
/// observe each other.
#[derive(Debug)]
pub struct Ctx<'a, S> {
    /// The application's window.
    pub window: &'a mut Window,
    /// The application's state.
    pub state: &'a mut S,
}

/// A unit of cooperative work polled once per run-loop turn.
///
/// Typical tasks read an input source and queue events on the window: a
/// touchscreen task calls [`Window::handle_touch`], a button task calls
/// [`Window::submit_to_active`]. Tasks are registered at setup via
/// [`App::add_task`](crate::App::add_task) and polled in registration
/// order for the life of the loop.
pub trait Task<S, E> {
    /// Poll once. Queue events, mutate state, report whether to keep
    /// looping.
    fn run(&mut self, ctx: &mut Ctx<'_, S>) -> Result<TaskOutcome, E>;
}

/// Blanket impl so closures can be registered as tasks directly.
impl<S, E, F> Task<S, E> for F
where
    F: FnMut(&mut Ctx<'_, S>) -> Result<TaskOutcome, E>,
{
    fn run(&mut self, ctx: &mut Ctx<'_, S>) -> Result<TaskOutcome, E> {
        self(ctx)
    }
}

/// An event handler registered in the action table.
///
/// Invoked with the context and the event being dispatched; an `Err`
/// aborts the run loop as [`RunError::Handler`](crate::RunError::Handler).
pub type Handler<S, E> = Box<dyn FnMut(&mut Ctx<'_, S>, &Event<ViewId>) -> Result<(), E>>;
