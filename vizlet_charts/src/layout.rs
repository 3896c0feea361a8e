// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container sizes and margins.
//!
//! Hosts observe their container and hand the widget a [`Size`]; widgets subtract their
//! [`Margin`] to get the plot rectangle. Every resize recomputes the layout from scratch.

use kurbo::Rect;

/// A width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Creates a size, clamping negative or non-finite extents to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// Returns `true` if either extent is zero.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Per-side insets in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
}

impl Margin {
    /// The same inset on every side.
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Returns the size left after removing the margins (never negative).
    pub fn inset(&self, size: Size) -> Size {
        Size::new(
            size.width - self.left - self.right,
            size.height - self.top - self.bottom,
        )
    }

    /// Returns the inner plot rectangle for a container of `size`, in container coordinates.
    pub fn plot_rect(&self, size: Size) -> Rect {
        let inner = self.inset(size);
        Rect::new(
            self.left,
            self.top,
            self.left + inner.width,
            self.top + inner.height,
        )
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
