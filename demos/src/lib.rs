// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated hardware for the sample applications.
//!
//! Real deployments poll a touchscreen or a d-pad and push decoded audio to
//! a speaker. The demos replace both ends with deterministic stand-ins:
//! [`SimPad`] replays a scripted sequence of inputs one per run-loop turn,
//! and [`SimDeck`] pretends to be a decoder plus speaker with a fixed track
//! list. Everything the samples print comes from `log`.

use std::collections::VecDeque;

use thimble_responder::event::{EventKind, Payload};
use thimble_runtime::{Ctx, Task, TaskOutcome};

/// One scripted user input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PadInput {
    /// A physical button press, delivered to the active view.
    Press(EventKind),
    /// A finger on the screen at these coordinates.
    Touch(f64, f64),
}

/// A scripted input device.
///
/// Each poll replays the next input from the script; when the script runs
/// out, the task reports [`TaskOutcome::Exit`] and the run loop ends. This
/// stands in for the hardware input tasks a real deployment registers
/// (touchscreen sampling, button matrix scanning).
#[derive(Clone, Debug, Default)]
pub struct SimPad {
    script: VecDeque<PadInput>,
}

impl SimPad {
    /// A pad that will replay `script` in order.
    pub fn new(script: impl IntoIterator<Item = PadInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Inputs not yet replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl<S, E> Task<S, E> for SimPad {
    fn run(&mut self, ctx: &mut Ctx<'_, S>) -> Result<TaskOutcome, E> {
        match self.script.pop_front() {
            Some(PadInput::Press(kind)) => {
                ctx.window.submit_to_active(kind, Payload::None);
                Ok(TaskOutcome::Continue)
            }
            Some(PadInput::Touch(x, y)) => {
                ctx.window.handle_touch(true, x, y);
                Ok(TaskOutcome::Continue)
            }
            None => Ok(TaskOutcome::Exit),
        }
    }
}

/// A track on the simulated storage card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// File name, as a real deployment would list from storage.
    pub name: String,
    /// Length in seconds.
    pub duration_s: u32,
}

impl Track {
    /// Convenience constructor.
    pub fn new(name: &str, duration_s: u32) -> Self {
        Self {
            name: name.to_owned(),
            duration_s,
        }
    }
}

/// A fake decoder and speaker with a fixed playlist.
///
/// Stands in for the MP3 decoder, audio output, and SD enumeration of a
/// real player. Playback is advanced manually via [`SimDeck::advance`],
/// which a player task calls once per loop turn.
#[derive(Clone, Debug)]
pub struct SimDeck {
    tracks: Vec<Track>,
    current: Option<usize>,
    playing: bool,
    position_s: u32,
}

impl SimDeck {
    /// A deck loaded with `tracks`. Nothing is selected or playing.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: None,
            playing: false,
            position_s: 0,
        }
    }

    /// The playlist.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the selected track.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The selected track.
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Whether audio is "coming out of the speaker".
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playback position within the current track, in seconds.
    pub fn position_s(&self) -> u32 {
        self.position_s
    }

    /// Select track `index` and start it from the top.
    ///
    /// Out-of-range indices are refused.
    pub fn play(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.current = Some(index);
        self.position_s = 0;
        self.playing = true;
        true
    }

    /// Pause without losing the position.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Resume from the paused position. No-op with nothing selected.
    pub fn resume(&mut self) {
        if self.current.is_some() {
            self.playing = true;
        }
    }

    /// Restart the previous track, or the current one at the top of the
    /// playlist.
    pub fn previous(&mut self) -> bool {
        let index = self.current.map_or(0, |i| i.saturating_sub(1));
        self.play(index)
    }

    /// Start the next track. At the end of the playlist the deck stops.
    pub fn next(&mut self) -> bool {
        let index = self.current.map_or(0, |i| i + 1);
        if index >= self.tracks.len() {
            self.playing = false;
            return false;
        }
        self.play(index)
    }

    /// Simulate `seconds` of playback. Returns `true` when the current
    /// track just finished (the caller decides whether to auto-advance).
    pub fn advance(&mut self, seconds: u32) -> bool {
        if !self.playing {
            return false;
        }
        let Some(track) = self.current_track() else {
            return false;
        };
        let duration = track.duration_s;
        self.position_s = (self.position_s + seconds).min(duration);
        if self.position_s >= duration {
            self.playing = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> SimDeck {
        SimDeck::new(vec![
            Track::new("01 intro.mp3", 10),
            Track::new("02 verse.mp3", 20),
            Track::new("03 outro.mp3", 30),
        ])
    }

    #[test]
    fn play_pause_resume_cycle() {
        let mut d = deck();
        assert!(!d.is_playing());
        assert!(d.play(1));
        assert!(d.is_playing());
        assert_eq!(d.current(), Some(1));

        d.advance(5);
        d.pause();
        assert!(!d.is_playing());
        assert_eq!(d.position_s(), 5);

        d.resume();
        assert!(d.is_playing());
        assert_eq!(d.position_s(), 5, "resume keeps the position");
    }

    #[test]
    fn next_stops_at_the_end_of_the_playlist() {
        let mut d = deck();
        d.play(2);
        assert!(!d.next());
        assert!(!d.is_playing());
        assert_eq!(d.current(), Some(2));
    }

    #[test]
    fn previous_clamps_at_the_first_track() {
        let mut d = deck();
        d.play(0);
        assert!(d.previous());
        assert_eq!(d.current(), Some(0));
        assert_eq!(d.position_s(), 0, "previous restarts the track");
    }

    #[test]
    fn advance_reports_track_end_exactly_once() {
        let mut d = deck();
        d.play(0);
        assert!(!d.advance(9));
        assert!(d.advance(5), "crossing the duration finishes the track");
        assert!(!d.is_playing());
        assert!(!d.advance(5), "a stopped deck does not advance");
    }

    #[test]
    fn out_of_range_selection_is_refused() {
        let mut d = deck();
        assert!(!d.play(3));
        assert_eq!(d.current(), None);
    }
}
