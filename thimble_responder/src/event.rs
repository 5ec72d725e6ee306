// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event kinds, payloads, and the event record itself.

use kurbo::Point;

/// What happened.
///
/// Kinds are compared for exact equality during dispatch; an action
/// registered for [`Tapped`](EventKind::Tapped) never fires for
/// [`TouchBegan`](EventKind::TouchBegan). Input normalization (touch or
/// confirm button becoming a tap) happens in the runtime before dispatch,
/// not here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The user tapped a view, by touch or by confirm button.
    Tapped,
    /// A raw touch landed on a view. Normalized to `Tapped` by the runtime.
    TouchBegan,
    /// D-pad left.
    ButtonLeft,
    /// D-pad down.
    ButtonDown,
    /// D-pad up.
    ButtonUp,
    /// D-pad right.
    ButtonRight,
    /// Primary action button. Normalized to `Tapped` by the runtime.
    ButtonA,
    /// Secondary action button.
    ButtonB,
    /// Select button.
    ButtonSelect,
    /// Start button.
    ButtonStart,
    /// A key went down.
    KeyPress,
    /// A key was held.
    KeyLongPress,
    /// A key came up.
    KeyRelease,
    /// The active view changed.
    FocusChanged,
    /// Application-defined event, discriminated by the tag.
    Custom(u16),
}

/// Aliases for devices with page-turner style button layouts.
impl EventKind {
    /// Center confirm button, same as [`ButtonA`](EventKind::ButtonA).
    pub const BUTTON_CENTER: Self = Self::ButtonA;
    /// Previous-page button, same as [`ButtonSelect`](EventKind::ButtonSelect).
    pub const BUTTON_PREV: Self = Self::ButtonSelect;
    /// Next-page button, same as [`ButtonStart`](EventKind::ButtonStart).
    pub const BUTTON_NEXT: Self = Self::ButtonStart;
    /// Lock button, same as [`ButtonB`](EventKind::ButtonB).
    pub const BUTTON_LOCK: Self = Self::ButtonB;
}

/// Optional data riding along with an event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Payload {
    /// No payload.
    #[default]
    None,
    /// Touch location, in the coordinate space of the event's origin.
    Touch(Point),
    /// An index, e.g. the selected row of a list.
    Index(usize),
    /// An application-defined scalar.
    Value(i32),
}

/// An event: what happened, where it originated, and any payload.
///
/// `K` is the view key type; the runtime uses the tree's view ids. The
/// origin anchors the responder chain: dispatch starts there and walks
/// toward the root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event<K> {
    /// What happened.
    pub kind: EventKind,
    /// The view this event originated at.
    pub origin: K,
    /// Extra data, if any.
    pub payload: Payload,
}

impl<K> Event<K> {
    /// An event with no payload.
    pub fn new(kind: EventKind, origin: K) -> Self {
        Self {
            kind,
            origin,
            payload: Payload::None,
        }
    }

    /// An event carrying a payload.
    pub fn with_payload(kind: EventKind, origin: K, payload: Payload) -> Self {
        Self {
            kind,
            origin,
            payload,
        }
    }
}
