// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box plot geometry.
//!
//! One equal-width column per series; the box spans `Q3..Q1`, whiskers reach the maximum and
//! minimum, and a rule marks the median. Everything is recomputed from `(series, domain, size)`.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::axis::{AXIS_COLOR, AxisTick, GRID_COLOR, vertical_ticks};
use crate::layout::Size;
use crate::mark::{Mark, StrokeStyle};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::tooltip::{HitTarget, TooltipValue};
use crate::z_order;

const BOX_FILL: Color = Color::from_rgb8(0xc8, 0x84, 0xf0);
const BOX_STROKE: Color = Color::from_rgb8(0x20, 0x20, 0x20);

/// Five-number summary of one box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPlotSeries {
    /// Series name, shown as the x tick label.
    pub name: String,
    /// Upper whisker.
    pub maximum: f64,
    /// Third quartile.
    pub q3: f64,
    /// Median.
    pub q2: f64,
    /// First quartile.
    pub q1: f64,
    /// Lower whisker.
    pub minimum: f64,
    /// Interquartile range reported in the tooltip.
    pub iqr: f64,
}

impl BoxPlotSeries {
    /// Creates a series from its summary, deriving `iqr = q3 - q1`.
    pub fn new(
        name: impl Into<String>,
        minimum: f64,
        q1: f64,
        q2: f64,
        q3: f64,
        maximum: f64,
    ) -> Self {
        Self {
            name: name.into(),
            maximum,
            q3,
            q2,
            q1,
            minimum,
            iqr: q3 - q1,
        }
    }

    /// Overrides the reported interquartile range.
    pub fn with_iqr(mut self, iqr: f64) -> Self {
        self.iqr = iqr;
        self
    }
}

/// Fixed pixel allowances of a box plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxPlotLayout {
    /// Space above the highest value.
    pub top_space: f64,
    /// Height of the x tick row at the bottom.
    pub x_ticks_height: f64,
    /// Width of the y tick column on the left.
    pub y_ticks_width: f64,
    /// Space kept free on the right.
    pub right_space: f64,
    /// Horizontal inset of each box inside its column.
    pub box_padding: f64,
}

impl Default for BoxPlotLayout {
    fn default() -> Self {
        Self {
            top_space: 20.0,
            x_ticks_height: 30.0,
            y_ticks_width: 30.0,
            right_space: 30.0,
            box_padding: 20.0,
        }
    }
}

/// Input of a box plot.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPlotSpec {
    /// Series, one column each, in display order.
    pub series: Vec<BoxPlotSeries>,
    /// Shared value domain of the y axis.
    pub y_domain: (f64, f64),
    /// Explicit y tick values; nice ticks of `y_domain` are used when empty.
    pub y_ticks: Vec<f64>,
    /// Pixel allowances.
    pub layout: BoxPlotLayout,
}

impl BoxPlotSpec {
    /// Creates a spec with default layout and automatic y ticks.
    pub fn new(series: Vec<BoxPlotSeries>, y_domain: (f64, f64)) -> Self {
        Self {
            series,
            y_domain,
            y_ticks: Vec::new(),
            layout: BoxPlotLayout::default(),
        }
    }

    /// Sets explicit y tick values.
    pub fn with_y_ticks(mut self, ticks: Vec<f64>) -> Self {
        self.y_ticks = ticks;
        self
    }

    /// Sets the layout allowances.
    pub fn with_layout(mut self, layout: BoxPlotLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Computes the geometry for a container of `size`.
    pub fn geometry(&self, size: Size) -> BoxPlotGeometry {
        let l = self.layout;
        let plot = Rect::new(
            l.y_ticks_width,
            l.top_space,
            (size.width - l.right_space).max(l.y_ticks_width),
            (size.height - l.x_ticks_height).max(l.top_space),
        );
        let y_scale = ScaleLinear::inverted(self.y_domain, (plot.y0, plot.y1));
        let y_ticks = vertical_ticks(&y_scale, &self.y_ticks, l.y_ticks_width / 2.0, 5);

        let names = self.series.iter().map(|s| s.name.as_str());
        let band = match ScaleBand::new(names, (plot.x0, plot.x1)) {
            Ok(band) if band.band_width() > 0.0 => Some(band),
            Ok(_) => {
                log::warn!("box plot has no horizontal room at width {}", size.width);
                None
            }
            Err(err) => {
                log::warn!("box plot has no series: {err}");
                None
            }
        };

        let mut boxes = Vec::new();
        let mut x_ticks = Vec::new();
        if let Some(band) = &band {
            let pad = l.box_padding.min(band.band_width() * 0.25).max(0.0);
            for (series, (_, b)) in self.series.iter().zip(band.bands()) {
                x_ticks.push(AxisTick::new(
                    (b.center(), size.height - l.x_ticks_height / 2.0),
                    series.name.clone(),
                ));
                boxes.push(BoxGeometry {
                    series: series.clone(),
                    x: b.center(),
                    x1: b.start + pad,
                    x2: b.end() - pad,
                    maximum_y: y_scale.map(series.maximum),
                    minimum_y: y_scale.map(series.minimum),
                    q1_y: y_scale.map(series.q1),
                    q2_y: y_scale.map(series.q2),
                    q3_y: y_scale.map(series.q3),
                });
            }
            log::debug!(
                "box plot: {} boxes, band width {}",
                boxes.len(),
                band.band_width()
            );
        }

        BoxPlotGeometry {
            plot,
            band,
            boxes,
            x_ticks,
            y_ticks,
        }
    }
}

/// Pixel geometry of one box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGeometry {
    /// The source series.
    pub series: BoxPlotSeries,
    /// Column center (whisker x).
    pub x: f64,
    /// Left edge of the box.
    pub x1: f64,
    /// Right edge of the box.
    pub x2: f64,
    /// Upper whisker y.
    pub maximum_y: f64,
    /// Lower whisker y.
    pub minimum_y: f64,
    /// First quartile y.
    pub q1_y: f64,
    /// Median y.
    pub q2_y: f64,
    /// Third quartile y.
    pub q3_y: f64,
}

impl BoxGeometry {
    /// The `Q3..Q1` box.
    pub fn box_rect(&self) -> Rect {
        Rect::new(self.x1, self.q3_y, self.x2, self.q1_y)
    }

    /// Hoverable parts of this box, in tooltip display order.
    pub fn hit_targets(&self) -> Vec<HitTarget> {
        let s = &self.series;
        alloc::vec![
            HitTarget::line("maximum", self.maximum_y, s.maximum),
            HitTarget::line("Q3", self.q3_y, s.q3),
            HitTarget::line("Q2", self.q2_y, s.q2),
            HitTarget::line("Q1", self.q1_y, s.q1),
            HitTarget::line("minimum", self.minimum_y, s.minimum),
            HitTarget::band("IQR", self.q3_y, self.q1_y, TooltipValue::Single(s.iqr)),
        ]
    }

    fn marks(&self, out: &mut Vec<Mark>) {
        let edge = StrokeStyle::solid(BOX_STROKE, 2.0);
        out.push(Mark::rect(self.box_rect(), BOX_FILL));
        out.push(Mark::horizontal(self.maximum_y, self.x1, self.x2, edge));
        // The whisker runs behind the box.
        out.push(
            Mark::vertical(
                self.x,
                self.maximum_y,
                self.minimum_y,
                StrokeStyle::solid(BOX_STROKE, 4.0).with_dash(3.0, 3.0),
            )
            .with_z_index(z_order::SERIES_FILL - 1),
        );
        out.push(Mark::horizontal(self.minimum_y, self.x1, self.x2, edge));
        out.push(Mark::horizontal(self.q2_y, self.x1, self.x2, edge));
    }
}

/// Output of [`BoxPlotSpec::geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPlotGeometry {
    /// Plot rectangle between the tick allowances.
    pub plot: Rect,
    /// Column scale; `None` when there are no series or no horizontal room.
    pub band: Option<ScaleBand>,
    /// One entry per series, in input order.
    pub boxes: Vec<BoxGeometry>,
    /// Series name labels.
    pub x_ticks: Vec<AxisTick>,
    /// Value labels.
    pub y_ticks: Vec<AxisTick>,
}

impl BoxPlotGeometry {
    /// Returns `true` if no boxes were produced.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Returns the box whose column contains screen `x`.
    pub fn series_at(&self, x: f64) -> Option<&BoxGeometry> {
        let index = self.band.as_ref()?.band_index_at(x)?;
        self.boxes.get(index)
    }

    /// Routes a pointer to its series: returns the series name and that box's hit targets.
    pub fn pointer_targets(&self, pointer: Point) -> Option<(&str, Vec<HitTarget>)> {
        let b = self.series_at(pointer.x)?;
        Some((b.series.name.as_str(), b.hit_targets()))
    }

    /// Lowers the geometry into marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let axis = StrokeStyle::solid(AXIS_COLOR, 1.0);
        let grid = StrokeStyle::solid(GRID_COLOR, 1.0).with_dash(3.0, 3.0);

        out.push(
            Mark::vertical(self.plot.x0, self.plot.y0, self.plot.y1, axis)
                .with_z_index(z_order::AXIS_RULES),
        );
        out.push(
            Mark::horizontal(self.plot.y1, self.plot.x0, self.plot.x1, axis)
                .with_z_index(z_order::AXIS_RULES),
        );
        for tick in &self.y_ticks {
            out.push(tick.mark(AXIS_COLOR));
        }
        for tick in &self.x_ticks {
            out.push(tick.mark(AXIS_COLOR));
            out.push(
                Mark::vertical(tick.position.x, self.plot.y0, self.plot.y1, grid)
                    .with_z_index(z_order::GRID_LINES),
            );
        }
        for b in &self.boxes {
            b.marks(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::mark::MarkKind;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn spec() -> BoxPlotSpec {
        BoxPlotSpec::new(
            vec![
                BoxPlotSeries::new("A", 10.0, 30.0, 50.0, 70.0, 90.0),
                BoxPlotSeries::new("B", 0.0, 25.0, 40.0, 60.0, 100.0),
            ],
            (0.0, 100.0),
        )
    }

    #[test]
    fn columns_split_the_plot_width() {
        // Plot x spans [30, 430], so each column is 200 wide.
        let g = spec().geometry(Size::new(460.0, 250.0));
        assert_eq!(g.boxes.len(), 2);
        let a = &g.boxes[0];
        assert_eq!(a.x, 130.0);
        assert_eq!(a.x1, 50.0);
        assert_eq!(a.x2, 210.0);
        assert_eq!(g.boxes[1].x, 330.0);
        assert_eq!(g.x_ticks[1].position, Point::new(330.0, 235.0));
    }

    #[test]
    fn values_map_through_inverted_scale() {
        // Plot y spans [20, 220].
        let g = spec().geometry(Size::new(460.0, 250.0));
        let a = &g.boxes[0];
        assert_close(a.maximum_y, 40.0);
        assert_close(a.q3_y, 80.0);
        assert_close(a.q2_y, 120.0);
        assert_close(a.q1_y, 160.0);
        assert_close(a.minimum_y, 200.0);
        assert!(a.q1_y >= a.q2_y && a.q2_y >= a.q3_y);
        let r = a.box_rect();
        assert_close(r.height(), 80.0);
        assert_close(r.width(), 160.0);
    }

    #[test]
    fn narrow_columns_clamp_padding() {
        let g = spec().geometry(Size::new(100.0, 250.0));
        for b in &g.boxes {
            assert!(b.x1 < b.x && b.x < b.x2);
        }
    }

    #[test]
    fn empty_series_yields_empty_geometry() {
        let g = BoxPlotSpec::new(Vec::new(), (0.0, 1.0)).geometry(Size::new(400.0, 300.0));
        assert!(g.is_empty());
        assert!(g.band.is_none());
        assert_eq!(g.series_at(100.0), None);
        assert!(!g.y_ticks.is_empty());
    }

    #[test]
    fn iqr_target_spans_the_box() {
        let g = spec().geometry(Size::new(460.0, 250.0));
        let (name, targets) = g.pointer_targets(Point::new(300.0, 100.0)).unwrap();
        assert_eq!(name, "B");
        let keys: Vec<&str> = targets.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["maximum", "Q3", "Q2", "Q1", "minimum", "IQR"]);
        let iqr = targets.last().unwrap();
        assert_eq!(iqr.value, TooltipValue::Single(35.0));
        assert!(iqr.contains(100.0));
    }

    #[test]
    fn explicit_y_ticks_are_used() {
        let g = spec()
            .with_y_ticks(vec![0.0, 50.0, 100.0])
            .geometry(Size::new(460.0, 250.0));
        let ys: Vec<f64> = g.y_ticks.iter().map(|t| t.position.y).collect();
        assert_eq!(ys, [220.0, 120.0, 20.0]);
    }

    #[test]
    fn marks_cover_every_box() {
        let g = spec().geometry(Size::new(460.0, 250.0));
        let marks = g.marks();
        let boxes = marks
            .iter()
            .filter(|m| matches!(m.kind, MarkKind::Rect { fill, .. } if fill == BOX_FILL))
            .count();
        assert_eq!(boxes, 2);
    }
}
