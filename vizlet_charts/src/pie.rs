// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie slice geometry for bubble/pie charts.
//!
//! Angles follow the usual pie convention: radians, `0` at twelve o'clock, increasing
//! clockwise, a full pie spanning `2π`. Slices keep input order.

extern crate alloc;

use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{BezPath, Circle, Point, Shape};
use peniko::Color;
use peniko::color::palette::css;

use crate::format::format_tick;
use crate::mark::Mark;
use crate::z_order;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Categorical slice colors, cycled by slice index.
pub const PALETTE: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// One slice of a pie.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    /// Position in the input.
    pub index: usize,
    /// Value the slice was sized from (non-finite and negative inputs become `0`).
    pub value: f64,
    /// Start angle.
    pub start_angle: f64,
    /// End angle.
    pub end_angle: f64,
}

impl PieSlice {
    /// Angular extent of the slice.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Label anchor: the middle of the slice at the mean of the two radii.
    pub fn centroid(&self, inner_radius: f64, outer_radius: f64, center: Point) -> Point {
        let a = 0.5 * (self.start_angle + self.end_angle);
        let r = 0.5 * (inner_radius + outer_radius);
        Point::new(center.x + r * a.sin(), center.y - r * a.cos())
    }

    /// Slice outline as a path.
    pub fn path(&self, inner_radius: f64, outer_radius: f64, center: Point) -> BezPath {
        Circle::new(center, outer_radius)
            .segment(inner_radius, self.start_angle - FRAC_PI_2, self.sweep())
            .to_path(0.1)
    }
}

/// Lays `values` out as pie slices in input order.
///
/// An all-zero (or empty-valued) input produces zero-sweep slices at angle `0`.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let total: f64 = values.iter().copied().map(clean).sum();
    let k = if total > 0.0 { TAU / total } else { 0.0 };
    let mut angle = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(index, &v)| {
            let value = clean(v);
            let start_angle = angle;
            angle += value * k;
            PieSlice {
                index,
                value,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

/// Label font size for a bubble of `radius`.
pub fn label_font_size(radius: f64) -> f64 {
    (radius / 2.0).min(15.0)
}

/// A pie drawn inside a bubble.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSpec {
    /// Slice values.
    pub values: Vec<f64>,
    /// Bubble center.
    pub center: Point,
    /// Bubble radius.
    pub radius: f64,
}

impl PieSpec {
    /// Creates a pie.
    pub fn new(values: Vec<f64>, center: impl Into<Point>, radius: f64) -> Self {
        Self {
            values,
            center: center.into(),
            radius,
        }
    }

    /// Lowers the pie into one path and one value label per slice.
    pub fn marks(&self) -> Vec<Mark> {
        let slices = pie_slices(&self.values);
        let font_size = label_font_size(self.radius);
        let mut out = Vec::with_capacity(slices.len() * 2);
        for s in &slices {
            let fill = PALETTE[s.index % PALETTE.len()];
            out.push(Mark::path(s.path(0.0, self.radius, self.center), fill, None));
            out.push(
                Mark::text(
                    s.centroid(0.0, self.radius, self.center),
                    format_tick(s.value),
                    css::WHITE,
                )
                .with_font_size(font_size)
                .with_z_index(z_order::SERIES_LABELS),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::PI;

    use super::*;

    #[test]
    fn slices_keep_order_and_cover_the_circle() {
        let slices = pie_slices(&[1.0, 3.0]);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].start_angle, 0.0);
        assert!((slices[0].end_angle - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(slices[1].start_angle, slices[0].end_angle);
        assert!((slices[1].end_angle - TAU).abs() < 1e-12);
    }

    #[test]
    fn invalid_values_count_as_zero() {
        let slices = pie_slices(&[f64::NAN, -2.0, 2.0]);
        assert_eq!(slices[0].sweep(), 0.0);
        assert_eq!(slices[1].sweep(), 0.0);
        assert!((slices[2].sweep() - TAU).abs() < 1e-12);

        let zeros = pie_slices(&[0.0, 0.0]);
        assert!(zeros.iter().all(|s| s.sweep() == 0.0));
    }

    #[test]
    fn centroid_of_first_quarter_is_up_and_right() {
        let s = PieSlice {
            index: 0,
            value: 1.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
        };
        let c = s.centroid(0.0, 20.0, Point::new(100.0, 100.0));
        let d = 10.0 * (PI / 4.0).sin();
        assert!((c.x - (100.0 + d)).abs() < 1e-9);
        assert!((c.y - (100.0 - d)).abs() < 1e-9);
    }

    #[test]
    fn slice_path_stays_in_its_quadrant() {
        let s = PieSlice {
            index: 0,
            value: 1.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
        };
        let bounds = s.path(0.0, 10.0, Point::new(50.0, 50.0)).bounding_box();
        assert!(bounds.x0 >= 50.0 - 1e-3 && bounds.x1 <= 60.0 + 1e-3);
        assert!(bounds.y0 >= 40.0 - 1e-3 && bounds.y1 <= 50.0 + 1e-3);
    }

    #[test]
    fn font_size_is_capped() {
        assert_eq!(label_font_size(10.0), 5.0);
        assert_eq!(label_font_size(100.0), 15.0);
    }

    #[test]
    fn pie_marks_pair_paths_with_labels() {
        let marks = PieSpec::new(alloc::vec![1.0, 2.0, 3.0], (0.0, 0.0), 40.0).marks();
        assert_eq!(marks.len(), 6);
    }
}
