// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit-testing and tooltip aggregation.
//!
//! Widgets describe the hoverable parts of a series as [`HitTarget`]s: a field key, the
//! vertical pixel band it occupies, and the value to show. [`TooltipTracker`] recomputes the
//! active set on every pointer move (level-triggered), so overlapping bands can be active at
//! the same time and nothing depends on enter/leave event ordering.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

/// Extra pixels added above and below every hit band.
pub const HIT_TOLERANCE: f64 = 5.0;

/// A tooltip value: a single number or an interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TooltipValue {
    /// A single value.
    Single(f64),
    /// An interval, displayed as `a~b`.
    Pair(f64, f64),
}

impl core::fmt::Display for TooltipValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Single(v) => write!(f, "{v}"),
            Self::Pair(a, b) => write!(f, "{a}~{b}"),
        }
    }
}

/// One row of a tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipEntry {
    /// Field key (unique within a tooltip).
    pub key: String,
    /// Field value.
    pub value: TooltipValue,
}

/// A hoverable vertical band of a series.
#[derive(Clone, Debug, PartialEq)]
pub struct HitTarget {
    /// Field key.
    pub key: String,
    /// Pixel band `(y1, y2)`; the endpoints may be given in either order.
    pub y_range: (f64, f64),
    /// Value reported when the band is hit.
    pub value: TooltipValue,
}

impl HitTarget {
    /// Creates a target for a band.
    pub fn band(key: impl Into<String>, y1: f64, y2: f64, value: TooltipValue) -> Self {
        Self {
            key: key.into(),
            y_range: (y1, y2),
            value,
        }
    }

    /// Creates a target for a single horizontal line at `y`.
    pub fn line(key: impl Into<String>, y: f64, value: f64) -> Self {
        Self::band(key, y, y, TooltipValue::Single(value))
    }

    /// Returns `true` if `y` is inside the band widened by [`HIT_TOLERANCE`].
    pub fn contains(&self, y: f64) -> bool {
        let (a, b) = self.y_range;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        y >= lo - HIT_TOLERANCE && y <= hi + HIT_TOLERANCE
    }
}

/// The currently displayed tooltip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
    /// Series name.
    pub name: String,
    /// Last pointer position.
    pub position: Point,
    /// Active entries in display order.
    pub entries: Vec<TooltipEntry>,
}

impl Tooltip {
    /// Returns `true` if there is something to show.
    pub fn is_visible(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&TooltipEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Keys whose state changed during one pointer event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipDelta {
    /// Keys that became active.
    pub entered: SmallVec<[String; 4]>,
    /// Keys that stayed active but whose value changed.
    pub updated: SmallVec<[String; 4]>,
    /// Keys that became inactive.
    pub left: SmallVec<[String; 4]>,
}

impl TooltipDelta {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.updated.is_empty() && self.left.is_empty()
    }
}

/// Tracks the active tooltip entries for one widget.
#[derive(Clone, Debug, Default)]
pub struct TooltipTracker {
    tooltip: Tooltip,
}

impl TooltipTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current tooltip.
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Recomputes the active set for a pointer over series `name`.
    ///
    /// Every target containing `pointer.y` is inserted (or updated in place, last write wins);
    /// every active entry without a containing target is removed.
    pub fn on_pointer_move(
        &mut self,
        name: &str,
        pointer: Point,
        targets: &[HitTarget],
    ) -> TooltipDelta {
        let mut delta = TooltipDelta::default();

        if self.tooltip.name != name {
            // Switching series: nothing carries over.
            delta
                .left
                .extend(self.tooltip.entries.drain(..).map(|e| e.key));
            self.tooltip.name.clear();
            self.tooltip.name.push_str(name);
        }
        self.tooltip.position = pointer;

        let hit: Vec<&HitTarget> = targets.iter().filter(|t| t.contains(pointer.y)).collect();

        self.tooltip.entries.retain(|entry| {
            let keep = hit.iter().any(|t| t.key == entry.key);
            if !keep {
                delta.left.push(entry.key.clone());
            }
            keep
        });

        for target in hit {
            match self
                .tooltip
                .entries
                .iter_mut()
                .find(|e| e.key == target.key)
            {
                Some(entry) => {
                    if entry.value != target.value {
                        entry.value = target.value;
                        if !delta.updated.contains(&target.key) {
                            delta.updated.push(target.key.clone());
                        }
                    }
                }
                None => {
                    self.tooltip.entries.push(TooltipEntry {
                        key: target.key.clone(),
                        value: target.value,
                    });
                    delta.entered.push(target.key.clone());
                }
            }
        }

        delta
    }

    /// Clears every active entry (pointer left the widget).
    pub fn on_pointer_leave(&mut self) -> TooltipDelta {
        let mut delta = TooltipDelta::default();
        delta
            .left
            .extend(self.tooltip.entries.drain(..).map(|e| e.key));
        delta
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn overlapping() -> Vec<HitTarget> {
        vec![
            HitTarget::band("IQR", 45.0, 55.0, TooltipValue::Single(12.0)),
            HitTarget::band("Q1", 60.0, 60.0, TooltipValue::Single(3.0)),
        ]
    }

    #[test]
    fn tolerance_widens_each_side_of_the_pixel_band() {
        let band = HitTarget::band("Q1", 65.0, 55.0, TooltipValue::Single(3.0));
        assert!(band.contains(50.0));
        assert!(band.contains(70.0));
        assert!(!band.contains(49.5));
        assert!(!band.contains(70.5));
        let line = HitTarget::line("Q1", 60.0, 3.0);
        assert!(line.contains(65.0));
        assert!(!line.contains(70.0));
    }

    #[test]
    fn overlapping_bands_are_both_active() {
        // Widened by the tolerance these are IQR=[40,60] and Q1=[55,65].
        let mut tracker = TooltipTracker::new();
        let delta = tracker.on_pointer_move("A", Point::new(10.0, 57.0), &overlapping());
        assert_eq!(delta.entered.as_slice(), ["IQR", "Q1"]);
        assert!(tracker.tooltip().get("IQR").is_some());
        assert!(tracker.tooltip().get("Q1").is_some());

        let delta = tracker.on_pointer_move("A", Point::new(10.0, 70.0), &overlapping());
        assert_eq!(delta.left.as_slice(), ["IQR", "Q1"]);
        assert!(!tracker.tooltip().is_visible());
    }

    #[test]
    fn leave_clears_everything() {
        let mut tracker = TooltipTracker::new();
        tracker.on_pointer_move("A", Point::new(0.0, 57.0), &overlapping());
        let delta = tracker.on_pointer_leave();
        assert_eq!(delta.left.len(), 2);
        assert!(tracker.tooltip().entries.is_empty());
    }

    #[test]
    fn repeated_moves_are_idempotent_and_keep_order() {
        let mut tracker = TooltipTracker::new();
        tracker.on_pointer_move("A", Point::new(0.0, 57.0), &overlapping());
        let delta = tracker.on_pointer_move("A", Point::new(1.0, 58.0), &overlapping());
        assert!(delta.is_empty());
        let keys: Vec<&str> = tracker
            .tooltip()
            .entries
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(keys, ["IQR", "Q1"]);
        assert_eq!(tracker.tooltip().position, Point::new(1.0, 58.0));
    }

    #[test]
    fn value_changes_are_last_write_wins() {
        let mut tracker = TooltipTracker::new();
        tracker.on_pointer_move("A", Point::new(0.0, 50.0), &overlapping());
        let updated = [HitTarget::band("IQR", 45.0, 55.0, TooltipValue::Single(99.0))];
        let delta = tracker.on_pointer_move("A", Point::new(0.0, 50.0), &updated);
        assert_eq!(delta.updated.as_slice(), ["IQR"]);
        assert_eq!(
            tracker.tooltip().get("IQR").map(|e| e.value),
            Some(TooltipValue::Single(99.0))
        );
    }

    #[test]
    fn switching_series_resets_entries() {
        let mut tracker = TooltipTracker::new();
        tracker.on_pointer_move("A", Point::new(0.0, 57.0), &overlapping());
        let delta = tracker.on_pointer_move("B", Point::new(0.0, 57.0), &overlapping());
        assert_eq!(delta.left.as_slice(), ["IQR", "Q1"]);
        assert_eq!(delta.entered.as_slice(), ["IQR", "Q1"]);
        assert_eq!(tracker.tooltip().name, "B");
    }

    #[test]
    fn reversed_band_endpoints_are_accepted() {
        let t = HitTarget::band("IQR", 60.0, 40.0, TooltipValue::Pair(1.0, 2.0));
        assert!(t.contains(36.0));
        assert!(t.contains(64.0));
        assert!(!t.contains(66.0));
    }

    #[test]
    fn pair_values_display_with_tilde() {
        assert_eq!(std::format!("{}", TooltipValue::Pair(1.5, 2.0)), "1.5~2");
    }
}
