// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A button-and-touch MP3 player over simulated hardware.
//!
//! The screen is a track list with previous / play-pause / next buttons
//! along the bottom. Taps select tracks directly; on button hardware the
//! d-pad moves activation down the list and across the buttons, and the
//! confirm button taps whatever is active. Audio and storage are faked by
//! [`SimDeck`]; input is a [`SimPad`] script, and the run loop exits when
//! the script is exhausted.
//!
//! Run with `RUST_LOG=debug cargo run --example mp3_player` to watch the
//! dispatch decisions.

use kurbo::{Rect, Size};
use log::info;
use thimble_demos::{PadInput, SimDeck, SimPad, Track};
use thimble_focus::FocusTargets;
use thimble_responder::event::EventKind;
use thimble_runtime::{App, Ctx, Handler, RunError, TaskOutcome, Window};
use thimble_style::{Style, StyleHandle};
use thimble_view_tree::{LocalView, ViewId};

const SCREEN: Size = Size::new(160.0, 128.0);
const ROW_HEIGHT: f64 = 20.0;
const BUTTON_HEIGHT: f64 = 20.0;
const BUTTON_PADDING: f64 = 2.0;

struct Player {
    deck: SimDeck,
}

impl Player {
    fn announce(&self) {
        match self.deck.current_track() {
            Some(track) if self.deck.is_playing() => info!("now playing: {}", track.name),
            Some(track) => info!("paused: {}", track.name),
            None => info!("not playing"),
        }
    }
}

type PlayerHandler = Handler<Player, &'static str>;

fn play_track(index: usize) -> PlayerHandler {
    Box::new(move |ctx, _ev| {
        if !ctx.state.deck.play(index) {
            return Err("tapped row has no track");
        }
        ctx.state.announce();
        ctx.window.set_needs_display(true);
        Ok(())
    })
}

fn play_pause() -> PlayerHandler {
    Box::new(|ctx, _ev| {
        let deck = &mut ctx.state.deck;
        match deck.current() {
            // Nothing selected: start the playlist from the top.
            None => {
                deck.play(0);
            }
            Some(_) if deck.is_playing() => deck.pause(),
            Some(_) => deck.resume(),
        }
        ctx.state.announce();
        ctx.window.set_needs_display(true);
        Ok(())
    })
}

fn previous_track() -> PlayerHandler {
    Box::new(|ctx, _ev| {
        ctx.state.deck.previous();
        ctx.state.announce();
        ctx.window.set_needs_display(true);
        Ok(())
    })
}

fn next_track() -> PlayerHandler {
    Box::new(|ctx, _ev| {
        ctx.state.deck.next();
        ctx.state.announce();
        ctx.window.set_needs_display(true);
        Ok(())
    })
}

fn main() -> Result<(), RunError<&'static str>> {
    env_logger::init();

    let tracks = vec![
        Track::new("01 sunrise.mp3", 4),
        Track::new("02 meridian.mp3", 3),
        Track::new("03 afterglow.mp3", 5),
    ];

    let style = StyleHandle::new(Style {
        button_radius: 5.0,
        ..Style::default()
    });
    let mut window = Window::new(SCREEN, style);
    let root = window.root();

    // Track list: one row per file, stacked from the top.
    let rows: Vec<ViewId> = (0..tracks.len())
        .map(|i| {
            let y = i as f64 * ROW_HEIGHT;
            window.add_subview(
                root,
                LocalView {
                    frame: Rect::new(0.0, y, SCREEN.width, y + ROW_HEIGHT),
                    ..LocalView::default()
                },
            )
        })
        .collect();

    // Previous / play-pause / next along the bottom edge.
    let button_width = SCREEN.width / 3.0 - BUTTON_PADDING;
    let button_y = SCREEN.height - BUTTON_HEIGHT - BUTTON_PADDING;
    let buttons: Vec<ViewId> = (0..3)
        .map(|i| {
            let x = BUTTON_PADDING / 2.0 + i as f64 * (button_width + BUTTON_PADDING);
            window.add_subview(
                root,
                LocalView {
                    frame: Rect::new(x, button_y, x + button_width, button_y + BUTTON_HEIGHT),
                    ..LocalView::default()
                },
            )
        })
        .collect();
    let (prev, play, next) = (buttons[0], buttons[1], buttons[2]);

    // D-pad adjacency: down the list, then across the buttons.
    for (i, &row) in rows.iter().enumerate() {
        window.set_focus_targets(
            row,
            FocusTargets {
                up: (i > 0).then(|| rows[i - 1]),
                down: Some(if i + 1 < rows.len() { rows[i + 1] } else { play }),
                ..FocusTargets::default()
            },
        );
    }
    let last_row = *rows.last().expect("playlist is non-empty");
    window.set_focus_targets(
        prev,
        FocusTargets {
            right: Some(play),
            up: Some(last_row),
            ..FocusTargets::default()
        },
    );
    window.set_focus_targets(
        play,
        FocusTargets {
            left: Some(prev),
            right: Some(next),
            up: Some(last_row),
            ..FocusTargets::default()
        },
    );
    window.set_focus_targets(
        next,
        FocusTargets {
            left: Some(play),
            up: Some(last_row),
            ..FocusTargets::default()
        },
    );
    window.make_active(rows[0]);

    let mut app = App::new(window, Player { deck: SimDeck::new(tracks) });

    for (i, &row) in rows.iter().enumerate() {
        app.set_action(row, EventKind::Tapped, play_track(i));
    }
    app.set_action(prev, EventKind::Tapped, previous_track());
    app.set_action(play, EventKind::Tapped, play_pause());
    app.set_action(next, EventKind::Tapped, next_track());

    // The session: tap the second track by touch, then drive everything
    // else with the d-pad — down to the buttons, pause, resume, skip ahead.
    app.add_task(SimPad::new([
        PadInput::Touch(80.0, 30.0),             // tap row 1: starts track 2
        PadInput::Press(EventKind::ButtonDown),  // activation row 0 -> row 1
        PadInput::Press(EventKind::ButtonDown),  // row 1 -> row 2
        PadInput::Press(EventKind::ButtonDown),  // row 2 -> play button
        PadInput::Press(EventKind::ButtonA),     // pause
        PadInput::Press(EventKind::ButtonA),     // resume
        PadInput::Press(EventKind::ButtonRight), // play -> next button
        PadInput::Press(EventKind::ButtonA),     // skip ahead
    ]));

    // Player task: one simulated second of audio per loop turn, with
    // auto-advance when a track runs out.
    app.add_task(|ctx: &mut Ctx<'_, Player>| {
        if ctx.state.deck.advance(1) {
            if ctx.state.deck.next() {
                ctx.state.announce();
            } else {
                info!("end of playlist");
            }
            ctx.window.set_needs_display(true);
        }
        Ok(TaskOutcome::Continue)
    });

    app.run()?;
    app.state().announce();
    Ok(())
}
