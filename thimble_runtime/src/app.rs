// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The application: user state, action table, tasks, and the run loop.

use alloc::boxed::Box;
use alloc::vec::Vec;

use log::{debug, trace};
use thimble_focus::FocusDirection;
use thimble_responder::actions::ActionMap;
use thimble_responder::dispatch::{Outcome, dispatch, responder_path};
use thimble_responder::event::{Event, EventKind};
use thimble_view_tree::ViewId;

use crate::error::RunError;
use crate::task::{Ctx, Handler, Task, TaskOutcome};
use crate::window::Window;

/// Directional button → navigation direction. Other kinds don't navigate.
fn direction_of(kind: EventKind) -> Option<FocusDirection> {
    match kind {
        EventKind::ButtonUp => Some(FocusDirection::Up),
        EventKind::ButtonRight => Some(FocusDirection::Right),
        EventKind::ButtonDown => Some(FocusDirection::Down),
        EventKind::ButtonLeft => Some(FocusDirection::Left),
        _ => None,
    }
}

/// An application: one [`Window`], the application's own state `S`, the
/// action table, and the task list.
///
/// `E` is the application's error type, shared by tasks and handlers.
/// Everything an application touches hangs off this value — no globals —
/// so separate `App` instances never interfere.
pub struct App<S, E> {
    window: Window,
    state: S,
    actions: ActionMap<ViewId, Handler<S, E>>,
    tasks: Vec<Box<dyn Task<S, E>>>,
}

impl<S, E> core::fmt::Debug for App<S, E>
where
    S: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("App")
            .field("window", &self.window)
            .field("state", &self.state)
            .field("actions", &self.actions.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl<S, E> App<S, E> {
    /// Pair a window with the application's state.
    pub fn new(window: Window, state: S) -> Self {
        Self {
            window,
            state,
            actions: ActionMap::new(),
            tasks: Vec::new(),
        }
    }

    /// The window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The window, mutably (for setup: building the view hierarchy,
    /// registering focus targets).
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// The application state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The application state, mutably.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Register a handler for events of `kind` whose chain reaches `view`.
    ///
    /// One handler per `(view, kind)`: registering again replaces, and the
    /// displaced handler is returned.
    pub fn set_action(&mut self, view: ViewId, kind: EventKind, handler: Handler<S, E>) -> Option<Handler<S, E>> {
        self.actions.set(view, kind, handler)
    }

    /// Unregister and return the handler for `(view, kind)`.
    pub fn remove_action(&mut self, view: ViewId, kind: EventKind) -> Option<Handler<S, E>> {
        self.actions.remove(view, kind)
    }

    /// Destroy a view's subtree and every registration that pointed into
    /// it.
    ///
    /// This is the teardown counterpart of [`Window::remove_subview`]: the
    /// window drops the views and their focus records, and the action
    /// table drops the handlers registered for each destroyed view, so a
    /// long-lived application does not accumulate entries for dead ids.
    pub fn remove_view(&mut self, id: ViewId) {
        for view in self.window.remove_subview(id) {
            self.actions.clear_view(view);
        }
    }

    /// Add a task to the run loop. Tasks run in the order added, so input
    /// tasks usually go in before output tasks.
    pub fn add_task(&mut self, task: impl Task<S, E> + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Run until a task reports [`TaskOutcome::Exit`] or something fails.
    ///
    /// Each turn polls every task in registration order; after each poll
    /// the window's queue is drained, so events produced by one task are
    /// dispatched before the next task runs. Events a task queues on its
    /// exiting poll are still drained before the loop returns.
    pub fn run(&mut self) -> Result<(), RunError<E>> {
        loop {
            for i in 0..self.tasks.len() {
                let outcome = {
                    let mut ctx = Ctx {
                        window: &mut self.window,
                        state: &mut self.state,
                    };
                    self.tasks[i].run(&mut ctx).map_err(RunError::Task)?
                };
                self.drain_events()?;
                if outcome == TaskOutcome::Exit {
                    debug!("task {i} requested exit");
                    return Ok(());
                }
            }
        }
    }

    /// Dispatch everything currently queued, in FIFO order.
    ///
    /// [`App::run`] calls this after every task poll; call it directly
    /// when driving the loop by hand.
    pub fn drain_events(&mut self) -> Result<(), RunError<E>> {
        while let Some(event) = self.window.pop_event() {
            self.dispatch_event(event)?;
        }
        Ok(())
    }

    /// Dispatch a single event along the responder chain.
    ///
    /// Normalization happens first: [`EventKind::TouchBegan`] and
    /// [`EventKind::ButtonA`] become [`EventKind::Tapped`] at the same
    /// origin with the payload preserved. The chain is origin → root; the
    /// first view with a matching handler consumes the event. When a
    /// directional button event reaches the root, focus navigation gets
    /// first refusal before the root's own action table.
    ///
    /// Events whose origin has gone stale (the view was destroyed while
    /// the event sat in the queue) are discarded.
    pub fn dispatch_event(&mut self, mut event: Event<ViewId>) -> Result<Outcome<ViewId>, RunError<E>> {
        if !self.window.tree().is_alive(event.origin) {
            debug!("discarding {:?}: origin is stale", event.kind);
            return Ok(Outcome::Dropped);
        }
        if matches!(event.kind, EventKind::TouchBegan | EventKind::ButtonA) {
            event.kind = EventKind::Tapped;
        }

        let path = responder_path(event.origin, self.window.tree());
        let root = self.window.root();
        let Self {
            window,
            state,
            actions,
            ..
        } = self;
        let outcome = dispatch(&path, &event, |node, ev| {
            if node == root {
                if let Some(direction) = direction_of(ev.kind) {
                    if let Some(next) = window.focus_target_from(ev.origin, direction) {
                        trace!("focus moved {direction:?}");
                        window.make_active(next);
                        return Some(Ok(()));
                    }
                }
            }
            let handler = actions.get_mut(node, ev.kind)?;
            let mut ctx = Ctx {
                window: &mut *window,
                state: &mut *state,
            };
            Some(handler(&mut ctx, ev))
        })
        .map_err(RunError::Handler)?;

        if outcome == Outcome::Dropped {
            debug!("no responder for {:?}; dropped", event.kind);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::{Rect, Size};
    use thimble_focus::FocusTargets;
    use thimble_responder::event::Payload;
    use thimble_style::StyleHandle;
    use thimble_view_tree::LocalView;

    type Log = Vec<(String, ViewId)>;

    fn app() -> App<Log, &'static str> {
        let window = Window::new(Size::new(160.0, 128.0), StyleHandle::default());
        App::new(window, Vec::new())
    }

    fn view(frame: Rect) -> LocalView {
        LocalView {
            frame,
            ..LocalView::default()
        }
    }

    fn recorder(name: &'static str) -> Handler<Log, &'static str> {
        Box::new(move |ctx, ev| {
            ctx.state.push((String::from(name), ev.origin));
            Ok(())
        })
    }

    /// W ⊃ P ⊃ {B1, B2, B3}, with a Tapped handler on P.
    fn nested() -> (App<Log, &'static str>, ViewId, ViewId, ViewId, ViewId) {
        let mut app = app();
        let root = app.window().root();
        let panel = app
            .window_mut()
            .add_subview(root, view(Rect::new(10.0, 10.0, 150.0, 110.0)));
        let b1 = app
            .window_mut()
            .add_subview(panel, view(Rect::new(0.0, 0.0, 40.0, 20.0)));
        let b2 = app
            .window_mut()
            .add_subview(panel, view(Rect::new(50.0, 0.0, 90.0, 20.0)));
        app.set_action(panel, EventKind::Tapped, recorder("panel"));
        (app, panel, b1, b2, root)
    }

    #[test]
    fn tap_bubbles_to_the_panel_with_the_origin_preserved() {
        let (mut app, _panel, _b1, b2, _root) = nested();
        app.window_mut().submit(Event::new(EventKind::Tapped, b2));
        app.drain_events().unwrap();
        assert_eq!(app.state(), &vec![(String::from("panel"), b2)]);
    }

    #[test]
    fn own_handler_shadows_the_ancestors() {
        let (mut app, _panel, b1, _b2, _root) = nested();
        app.set_action(b1, EventKind::Tapped, recorder("b1"));
        app.window_mut().submit(Event::new(EventKind::Tapped, b1));
        app.drain_events().unwrap();
        // Exactly one invocation, and it is B1's own.
        assert_eq!(app.state(), &vec![(String::from("b1"), b1)]);
    }

    #[test]
    fn reattached_view_bubbles_along_its_new_chain() {
        let (mut app, panel, _b1, b2, root) = nested();
        app.set_action(root, EventKind::Tapped, recorder("window"));

        assert!(app.window_mut().detach_subview(b2));
        assert!(app.window_mut().reattach(b2, root));
        let _ = panel;

        app.window_mut().submit(Event::new(EventKind::Tapped, b2));
        app.drain_events().unwrap();
        // The panel is no longer on B2's chain; the window handles it.
        assert_eq!(app.state(), &vec![(String::from("window"), b2)]);
    }

    #[test]
    fn unhandled_event_is_dropped_silently() {
        let (mut app, _panel, b1, _b2, _root) = nested();
        let outcome = app
            .dispatch_event(Event::new(EventKind::ButtonB, b1))
            .unwrap();
        assert_eq!(outcome, Outcome::Dropped);
        assert!(app.state().is_empty());
    }

    #[test]
    fn touch_and_confirm_button_normalize_to_tapped() {
        let (mut app, _panel, b1, _b2, _root) = nested();

        let outcome = app
            .dispatch_event(Event::with_payload(
                EventKind::TouchBegan,
                b1,
                Payload::Touch(kurbo::Point::new(15.0, 15.0)),
            ))
            .unwrap();
        assert!(matches!(outcome, Outcome::Handled(_)));

        let outcome = app
            .dispatch_event(Event::new(EventKind::ButtonA, b1))
            .unwrap();
        assert!(matches!(outcome, Outcome::Handled(_)));

        // Both landed in the panel's Tapped handler.
        assert_eq!(app.state().len(), 2);
        assert!(app.state().iter().all(|(name, origin)| name == "panel" && *origin == b1));
    }

    #[test]
    fn directional_press_moves_focus_and_consumes_the_event() {
        let (mut app, _panel, b1, b2, root) = nested();
        // A root handler that must NOT run for the navigated press.
        app.set_action(root, EventKind::ButtonRight, recorder("window"));
        app.window_mut().set_focus_targets(
            b1,
            FocusTargets {
                right: Some(b2),
                ..FocusTargets::default()
            },
        );
        app.window_mut().make_active(b1);

        assert!(app.window_mut().submit_to_active(EventKind::ButtonRight, Payload::None));
        app.drain_events().unwrap();

        assert_eq!(app.window().active(), Some(b2));
        assert!(app.state().is_empty(), "navigation must consume the event");

        // B2 has no focus record, so the next press falls through to the
        // root's own action table.
        assert!(app.window_mut().submit_to_active(EventKind::ButtonRight, Payload::None));
        app.drain_events().unwrap();
        assert_eq!(app.state(), &vec![(String::from("window"), b2)]);
    }

    #[test]
    fn stale_origin_events_are_discarded() {
        let (mut app, _panel, b1, _b2, _root) = nested();
        app.window_mut().submit(Event::new(EventKind::Tapped, b1));
        app.remove_view(b1);
        app.drain_events().unwrap();
        assert!(app.state().is_empty());
    }

    #[test]
    fn remove_view_clears_handlers_for_the_destroyed_subtree() {
        let (mut app, panel, b1, b2, _root) = nested();
        app.set_action(b1, EventKind::Tapped, recorder("b1"));
        app.set_action(b2, EventKind::ButtonB, recorder("b2"));
        assert_eq!(app.actions.len(), 3);

        // Destroying the panel takes its descendants' handlers with it,
        // not just its own.
        app.remove_view(panel);
        assert!(app.actions.is_empty());
        assert!(!app.window().tree().is_alive(b1));
    }

    #[test]
    fn set_action_replaces_the_previous_handler() {
        let (mut app, panel, _b1, b2, _root) = nested();
        let displaced = app.set_action(panel, EventKind::Tapped, recorder("panel2"));
        assert!(displaced.is_some());

        app.window_mut().submit(Event::new(EventKind::Tapped, b2));
        app.drain_events().unwrap();
        assert_eq!(app.state(), &vec![(String::from("panel2"), b2)]);
    }

    #[test]
    fn handler_error_aborts_the_run() {
        let (mut app, panel, _b1, b2, _root) = nested();
        app.set_action(
            panel,
            EventKind::Tapped,
            Box::new(|_ctx, _ev| Err("handler broke")),
        );
        app.window_mut().submit(Event::new(EventKind::Tapped, b2));
        app.add_task(|_ctx: &mut Ctx<'_, Log>| Ok(TaskOutcome::Exit));

        assert_eq!(app.run(), Err(RunError::Handler("handler broke")));
    }

    #[test]
    fn task_error_aborts_the_run() {
        let mut app = app();
        app.add_task(|_ctx: &mut Ctx<'_, Log>| Err("task broke"));
        assert_eq!(app.run(), Err(RunError::Task("task broke")));
    }

    #[test]
    fn run_polls_in_order_and_drains_between_tasks() {
        let (mut app, _panel, b1, _b2, _root) = nested();

        // Task 1 queues a tap on its first poll, exits on its second.
        let mut polls = 0;
        app.add_task(move |ctx: &mut Ctx<'_, Log>| {
            polls += 1;
            if polls == 1 {
                ctx.window.submit(Event::new(EventKind::Tapped, b1));
                Ok(TaskOutcome::Continue)
            } else {
                Ok(TaskOutcome::Exit)
            }
        });
        // Task 2 observes the queue; events from task 1 must already have
        // been dispatched by the time it runs.
        app.add_task(|ctx: &mut Ctx<'_, Log>| {
            ctx.state.push((String::from("task2"), ctx.window.root()));
            Ok(TaskOutcome::Continue)
        });

        app.run().unwrap();
        let names: Vec<&str> = app.state().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["panel", "task2"]);
    }

    #[test]
    fn exit_still_drains_the_final_poll_events() {
        let (mut app, _panel, b1, _b2, _root) = nested();
        app.add_task(move |ctx: &mut Ctx<'_, Log>| {
            ctx.window.submit(Event::new(EventKind::Tapped, b1));
            Ok(TaskOutcome::Exit)
        });
        app.run().unwrap();
        assert_eq!(app.state(), &vec![(String::from("panel"), b1)]);
    }
}
