// Copyright 2025 the Thimble Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thimble Style: shared, inheritable appearance bundles.
//!
//! A [`Style`] describes how a view family is drawn: a font token, a handful
//! of named colors, corner radii, and content insets. Styles are deliberately
//! dumb data; rasterization and palette mapping belong to the display
//! collaborator, not to this crate.
//!
//! Styles are shared by handle, not by value. A [`StyleHandle`] is a cheap
//! clone that refers to the same underlying [`Style`]; mutating it through
//! [`StyleHandle::update`] restyles every view holding the handle at once
//! (live restyling). Object identity is observable via
//! [`StyleHandle::ptr_eq`].
//!
//! A view without an explicit style resolves to its nearest styled ancestor
//! at render time; that resolution lives in `thimble_view_tree`. The window
//! at the root of a tree always carries a concrete style, so resolution
//! terminates.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::rc::Rc;
use core::cell::{Ref, RefCell};

use kurbo::Insets;

/// 24-bit RGB color, `0xRRGGBB`.
pub type Color = u32;

/// Opaque handle to a font owned by the display collaborator.
///
/// The core never rasterizes text; it only carries this token so that
/// rendering code can resolve the right font for a view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontToken(pub u16);

/// Appearance bundle attached to views.
///
/// Construct with struct-update syntax over [`Style::default`]:
///
/// ```
/// use thimble_style::Style;
///
/// let style = Style {
///     foreground: 0x202020,
///     button_radius: 8.0,
///     ..Style::default()
/// };
/// assert_eq!(style.background, 0x000000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Font for any text labels.
    pub font: FontToken,
    /// Color for text and control outlines.
    pub foreground: Color,
    /// Color for fills and backgrounds.
    pub background: Color,
    /// Foreground color while the view is the active responder.
    pub active_foreground: Color,
    /// Background color while the view is the active responder.
    pub active_background: Color,
    /// Corner radius for buttons and similar tappable controls.
    pub button_radius: f64,
    /// Corner radius for containers such as modal dialogs.
    pub container_radius: f64,
    /// Insets applied to a view's content area. Not all controls use this.
    pub content_insets: Insets,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: FontToken::default(),
            foreground: 0xFF_FF_FF,
            background: 0x00_00_00,
            active_foreground: 0x00_00_00,
            active_background: 0xFF_FF_FF,
            button_radius: 10.0,
            container_radius: 5.0,
            content_insets: Insets::ZERO,
        }
    }
}

/// Shared-ownership handle to a [`Style`].
///
/// Cloning the handle shares the style; it does not copy it. The tree is
/// single-threaded by construction, so interior mutability via `RefCell`
/// needs no synchronization.
#[derive(Clone, Debug)]
pub struct StyleHandle(Rc<RefCell<Style>>);

impl StyleHandle {
    /// Wrap a style in a shareable handle.
    pub fn new(style: Style) -> Self {
        Self(Rc::new(RefCell::new(style)))
    }

    /// Borrow the style for reading.
    ///
    /// # Panics
    ///
    /// Panics if called while an [`update`](Self::update) closure on the
    /// same handle is running.
    pub fn get(&self) -> Ref<'_, Style> {
        self.0.borrow()
    }

    /// Mutate the style in place.
    ///
    /// Every view sharing this handle observes the change on its next
    /// redraw; this is the mechanism for live restyling.
    pub fn update(&self, f: impl FnOnce(&mut Style)) {
        f(&mut self.0.borrow_mut());
    }

    /// Whether two handles refer to the same underlying style.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for StyleHandle {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl From<Style> for StyleHandle {
    fn from(style: Style) -> Self {
        Self::new(style)
    }
}
