// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis ticks shared by the chart widgets.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;

use crate::format::format_tick;
use crate::mark::{Mark, TextAnchor, TextBaseline};
use crate::scale::ScaleLinear;
use crate::z_order;

/// Default color for axis rules and labels.
pub const AXIS_COLOR: Color = Color::from_rgb8(0x82, 0x8d, 0x99);

/// Default color for grid lines.
pub const GRID_COLOR: Color = Color::from_rgb8(0xe1, 0xe5, 0xe9);

/// A positioned tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Label anchor in container coordinates.
    pub position: Point,
    /// Label text.
    pub label: String,
}

impl AxisTick {
    /// Creates a tick.
    pub fn new(position: impl Into<Point>, label: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            label: label.into(),
        }
    }

    /// Lowers the tick into a centered text mark.
    pub fn mark(&self, fill: Color) -> Mark {
        Mark::text(self.position, self.label.clone(), fill)
            .with_text_align(TextAnchor::Middle, TextBaseline::Middle)
            .with_z_index(z_order::AXIS_LABELS)
    }
}

/// Places numeric ticks along a vertical axis at `x`.
///
/// When `values` is empty, nice ticks of the scale's domain are used.
pub fn vertical_ticks(scale: &ScaleLinear, values: &[f64], x: f64, count: usize) -> Vec<AxisTick> {
    let nice;
    let values = if values.is_empty() {
        nice = scale.ticks(count);
        nice.as_slice()
    } else {
        values
    };
    values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| AxisTick::new((x, scale.map(v)), format_tick(v)))
        .collect()
}
