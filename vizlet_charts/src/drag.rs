// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag sessions for sliders, progress bars and palettes.
//!
//! A [`DragSession`] turns a press / move / release sequence into a fraction along a
//! horizontal [`Track`]. At most one gesture is active at a time; the host attaches its
//! window-level move and release listeners when [`DragSession::start`] succeeds and detaches
//! them after [`DragSession::end`].

use kurbo::Point;

use crate::error::{Error, Result};

/// Horizontal extent of the pressed element, in the same space as pointer positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// Left edge.
    pub left: f64,
    /// Width.
    pub width: f64,
}

impl Track {
    /// Creates a track.
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Pointer position as a fraction of the track width, unclamped.
    ///
    /// A zero-width track maps everything to `0`.
    pub fn fraction(&self, x: f64) -> f64 {
        if self.width > 0.0 && self.width.is_finite() {
            (x - self.left) / self.width
        } else {
            0.0
        }
    }
}

/// What to do with pointer positions outside the track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutOfRange {
    /// Clamp the value into `[0, 1]`.
    #[default]
    Clamp,
    /// Drop the update and keep the last value.
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Active {
    track: Track,
    value: f64,
}

/// A single-gesture drag tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    policy: OutOfRange,
    active: Option<Active>,
}

impl DragSession {
    /// Creates an idle session with the given out-of-range policy.
    pub fn new(policy: OutOfRange) -> Self {
        Self {
            policy,
            active: None,
        }
    }

    /// The out-of-range policy.
    pub fn policy(&self) -> OutOfRange {
        self.policy
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Last value produced by the active gesture.
    pub fn value(&self) -> Option<f64> {
        self.active.map(|a| a.value)
    }

    /// Begins a gesture on `track` at `pointer` and returns the initial value.
    ///
    /// A press always lands inside the pressed element, so the initial value is clamped under
    /// either policy. A NaN pointer starts at `0`.
    pub fn start(&mut self, track: Track, pointer: Point) -> Result<f64> {
        if self.active.is_some() {
            return Err(Error::DragInProgress);
        }
        let t = track.fraction(pointer.x);
        let value = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        self.active = Some(Active { track, value });
        log::debug!("drag started at {value}");
        Ok(value)
    }

    /// Feeds a pointer move. Returns the new value, or `None` when idle, when the pointer
    /// position is not finite, or when the move was dropped by [`OutOfRange::Ignore`].
    pub fn update(&mut self, pointer: Point) -> Option<f64> {
        let active = self.active.as_mut()?;
        let t = active.track.fraction(pointer.x);
        if !t.is_finite() {
            return None;
        }
        let value = match self.policy {
            OutOfRange::Clamp => t.clamp(0.0, 1.0),
            OutOfRange::Ignore if (0.0..=1.0).contains(&t) => t,
            OutOfRange::Ignore => return None,
        };
        active.value = value;
        Some(value)
    }

    /// Releases the gesture and returns its final value, or `None` when idle.
    pub fn end(&mut self) -> Option<f64> {
        let value = self.active.take().map(|a| a.value);
        if let Some(v) = value {
            log::debug!("drag ended at {v}");
        }
        value
    }
}
