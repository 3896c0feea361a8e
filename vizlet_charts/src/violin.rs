// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Violin plot geometry.
//!
//! Each series gets a band (padding `0.25`) in which a symmetric density outline is drawn from
//! a histogram of its raw values. The outline is a closed area through the bin midpoints using
//! a vertical bump curve, so its widest point is the most populous bin.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::{AXIS_COLOR, AxisTick, vertical_ticks};
use crate::histogram::{Bin, bin, max_count, sample_domain};
use crate::layout::{Margin, Size};
use crate::mark::{Mark, StrokeStyle};
use crate::scale::{Band, ScaleBand, ScaleLinear};
use crate::tooltip::{HitTarget, TooltipValue};
use crate::z_order;

const VIOLIN_COLOR: Color = Color::from_rgb8(0x9a, 0x6f, 0xb0);
const VIOLIN_FILL: Color = Color::from_rgba8(0x9a, 0x6f, 0xb0, 26);
const MARKER_COLOR: Color = Color::from_rgb8(0x2e, 0x2e, 0x2e);

/// Smallest accepted bin count.
pub const MIN_BIN_NUMBER: usize = 10;
/// Largest accepted bin count.
pub const MAX_BIN_NUMBER: usize = 100;
/// Padding of the series bands.
pub const BAND_PADDING: f64 = 0.25;

/// One violin: summary statistics plus the raw samples.
#[derive(Clone, Debug, PartialEq)]
pub struct ViolinSeries {
    /// Series name.
    pub name: String,
    /// Largest value.
    pub maximum: f64,
    /// Median.
    pub median: f64,
    /// Smallest value.
    pub minimum: f64,
    /// `(q1, q3)`.
    pub quartile_interval: (f64, f64),
    /// Confidence interval of the median.
    pub confidence_interval: (f64, f64),
    /// Raw samples.
    pub values: Vec<f64>,
}

impl ViolinSeries {
    /// Creates a series from raw samples.
    ///
    /// Extremes default to the sample extremes; the median and intervals start at the median
    /// of the finite samples and should be set with the `with_*` methods when known.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        let (minimum, maximum) = sample_domain(&values).unwrap_or((0.0, 0.0));
        let median = sample_median(&values).unwrap_or(minimum);
        Self {
            name: name.into(),
            maximum,
            median,
            minimum,
            quartile_interval: (median, median),
            confidence_interval: (median, median),
            values,
        }
    }

    /// Sets the median.
    pub fn with_median(mut self, median: f64) -> Self {
        self.median = median;
        self
    }

    /// Sets the `(q1, q3)` interval.
    pub fn with_quartile_interval(mut self, q1: f64, q3: f64) -> Self {
        self.quartile_interval = (q1, q3);
        self
    }

    /// Sets the confidence interval.
    pub fn with_confidence_interval(mut self, low: f64, high: f64) -> Self {
        self.confidence_interval = (low, high);
        self
    }
}

/// Median of the finite values, averaging the two middle values for even counts.
fn sample_median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2])),
    }
}

/// Input of a violin plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ViolinPlotSpec {
    /// Series in display order.
    pub series: Vec<ViolinSeries>,
    /// Shared value domain of the y axis.
    pub y_domain: (f64, f64),
    /// Histogram bin count, within `MIN_BIN_NUMBER..=MAX_BIN_NUMBER`.
    pub bin_number: usize,
    /// Outer margin around the plot.
    pub margin: Margin,
}

impl ViolinPlotSpec {
    /// Creates a spec with 30 bins and a 30px margin.
    pub fn new(series: Vec<ViolinSeries>, y_domain: (f64, f64)) -> Self {
        Self {
            series,
            y_domain,
            bin_number: 30,
            margin: Margin::uniform(30.0),
        }
    }

    /// Sets the bin count, clamped to `MIN_BIN_NUMBER..=MAX_BIN_NUMBER`.
    pub fn with_bin_number(mut self, bin_number: usize) -> Self {
        self.bin_number = bin_number.clamp(MIN_BIN_NUMBER, MAX_BIN_NUMBER);
        self
    }

    /// Sets the outer margin.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Computes the geometry for a container of `size`.
    pub fn geometry(&self, size: Size) -> ViolinPlotGeometry {
        let plot = self.margin.plot_rect(size);
        let y_scale = ScaleLinear::inverted(self.y_domain, (plot.y0, plot.y1));
        let y_ticks = vertical_ticks(&y_scale, &[], plot.x0 - 15.0, 10);
        let bin_number = self.bin_number.clamp(MIN_BIN_NUMBER, MAX_BIN_NUMBER);

        let names = self.series.iter().map(|s| s.name.as_str());
        let band = match ScaleBand::new(names, (plot.x0, plot.x1)) {
            Ok(band) => Some(band.with_padding(BAND_PADDING)),
            Err(err) => {
                log::warn!("violin plot has no series: {err}");
                None
            }
        };

        let mut violins = Vec::new();
        let mut x_ticks = Vec::new();
        if let Some(band) = &band {
            for (series, (_, b)) in self.series.iter().zip(band.bands()) {
                x_ticks.push(AxisTick::new(
                    (b.center(), plot.y1 + 15.0),
                    series.name.clone(),
                ));
                violins.push(ViolinGeometry::new(series, b, &y_scale, bin_number));
            }
            log::debug!(
                "violin plot: {} violins, {} bins, band width {}",
                violins.len(),
                bin_number,
                band.band_width()
            );
        }

        ViolinPlotGeometry {
            plot,
            band,
            violins,
            x_ticks,
            y_ticks,
        }
    }
}

/// Pixel geometry of one violin.
#[derive(Clone, Debug, PartialEq)]
pub struct ViolinGeometry {
    /// The source series.
    pub series: ViolinSeries,
    /// The series band (unpadded; see [`Band::visible`]).
    pub band: Band,
    /// Histogram of the series values.
    pub bins: Vec<Bin>,
    /// Closed density outline; empty when the series has no finite values.
    pub outline: BezPath,
    /// Horizontal center of the violin.
    pub center_x: f64,
    /// Median y.
    pub median_y: f64,
    /// Maximum y.
    pub maximum_y: f64,
    /// Minimum y.
    pub minimum_y: f64,
    /// Quartile interval endpoints in pixels.
    pub quartile_interval_y: (f64, f64),
    /// Confidence interval endpoints in pixels.
    pub confidence_interval_y: (f64, f64),
}

impl ViolinGeometry {
    fn new(series: &ViolinSeries, band: Band, y_scale: &ScaleLinear, bin_number: usize) -> Self {
        let (left, width) = band.visible();
        let bins = match sample_domain(&series.values)
            .and_then(|domain| bin(&series.values, domain, bin_number))
        {
            Ok(bins) => bins,
            Err(err) => {
                log::warn!("violin {:?} has no outline: {err}", series.name);
                Vec::new()
            }
        };
        let outline = outline(&bins, left, width, y_scale);
        let map = |v: f64| y_scale.map(v);
        Self {
            series: series.clone(),
            band,
            outline,
            bins,
            center_x: left + width / 2.0,
            median_y: map(series.median),
            maximum_y: map(series.maximum),
            minimum_y: map(series.minimum),
            quartile_interval_y: (
                map(series.quartile_interval.0),
                map(series.quartile_interval.1),
            ),
            confidence_interval_y: (
                map(series.confidence_interval.0),
                map(series.confidence_interval.1),
            ),
        }
    }

    /// Hoverable parts of this violin, in tooltip display order.
    pub fn hit_targets(&self) -> Vec<HitTarget> {
        let s = &self.series;
        let (q1, q3) = s.quartile_interval;
        let (c0, c1) = s.confidence_interval;
        alloc::vec![
            HitTarget::line("maximum", self.maximum_y, s.maximum),
            HitTarget::line("median", self.median_y, s.median),
            HitTarget::line("minimum", self.minimum_y, s.minimum),
            HitTarget::band(
                "quartileInterval",
                self.quartile_interval_y.0,
                self.quartile_interval_y.1,
                TooltipValue::Pair(q1, q3),
            ),
            HitTarget::band(
                "confidenceInterval",
                self.confidence_interval_y.0,
                self.confidence_interval_y.1,
                TooltipValue::Pair(c0, c1),
            ),
        ]
    }

    fn marks(&self, out: &mut Vec<Mark>) {
        if !self.outline.elements().is_empty() {
            out.push(Mark::path(
                self.outline.clone(),
                VIOLIN_FILL,
                Some(StrokeStyle::solid(VIOLIN_COLOR, 2.0)),
            ));
        }
        let x = self.center_x;
        let (c0, c1) = self.confidence_interval_y;
        out.push(Mark::vertical(x, c0, c1, StrokeStyle::solid(MARKER_COLOR, 3.0)));
        let (q0, q1) = self.quartile_interval_y;
        out.push(Mark::vertical(x, q0, q1, StrokeStyle::solid(MARKER_COLOR, 7.0)));
        out.push(Mark::circle((x, self.median_y), 3.0, css::WHITE));
    }
}

/// Builds the symmetric outline of `bins` inside the horizontal span `[left, left + width]`.
fn outline(bins: &[Bin], left: f64, width: f64, y_scale: &ScaleLinear) -> BezPath {
    let mut path = BezPath::new();
    if bins.is_empty() {
        return path;
    }
    let biggest = max_count(bins) as f64;
    let w_scale = ScaleLinear::new((-biggest, biggest), (left, left + width));
    let right: Vec<Point> = bins
        .iter()
        .map(|b| Point::new(w_scale.map(b.count as f64), y_scale.map(b.midpoint())))
        .collect();
    let left_side: Vec<Point> = bins
        .iter()
        .rev()
        .map(|b| Point::new(w_scale.map(-(b.count as f64)), y_scale.map(b.midpoint())))
        .collect();

    path.move_to(right[0]);
    bump_y(&mut path, &right);
    path.line_to(left_side[0]);
    bump_y(&mut path, &left_side);
    path.close_path();
    path
}

/// Appends a vertical bump curve through `points` (the first point is the current position).
fn bump_y(path: &mut BezPath, points: &[Point]) {
    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let mid = 0.5 * (p0.y + p1.y);
        path.curve_to(Point::new(p0.x, mid), Point::new(p1.x, mid), p1);
    }
}

/// Output of [`ViolinPlotSpec::geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViolinPlotGeometry {
    /// Plot rectangle inside the margin.
    pub plot: Rect,
    /// Series scale; `None` when there are no series.
    pub band: Option<ScaleBand>,
    /// One entry per series, in input order.
    pub violins: Vec<ViolinGeometry>,
    /// Series name labels.
    pub x_ticks: Vec<AxisTick>,
    /// Value labels.
    pub y_ticks: Vec<AxisTick>,
}

impl ViolinPlotGeometry {
    /// Returns the violin whose band contains screen `x`.
    pub fn series_at(&self, x: f64) -> Option<&ViolinGeometry> {
        let index = self.band.as_ref()?.band_index_at(x)?;
        self.violins.get(index)
    }

    /// Routes a pointer to its series: returns the series name and that violin's hit targets.
    pub fn pointer_targets(&self, pointer: Point) -> Option<(&str, Vec<HitTarget>)> {
        let v = self.series_at(pointer.x)?;
        Some((v.series.name.as_str(), v.hit_targets()))
    }

    /// Lowers the geometry into marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let axis = StrokeStyle::solid(AXIS_COLOR, 1.0);
        out.push(
            Mark::vertical(self.plot.x0, self.plot.y0, self.plot.y1, axis)
                .with_z_index(z_order::AXIS_RULES),
        );
        out.push(
            Mark::horizontal(self.plot.y1, self.plot.x0, self.plot.x1, axis)
                .with_z_index(z_order::AXIS_RULES),
        );
        for tick in self.y_ticks.iter().chain(&self.x_ticks) {
            out.push(tick.mark(AXIS_COLOR));
        }
        for v in &self.violins {
            v.marks(&mut out);
        }
        out
    }
}
