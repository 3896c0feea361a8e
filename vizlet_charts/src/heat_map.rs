// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heat map (correlation matrix) geometry.
//!
//! `data[column][row]` is drawn as a grid of square cells sized to fit the container, centered
//! horizontally together with the tick column on the left and the color legend on the right.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::{AXIS_COLOR, AxisTick};
use crate::format::{format_cell_value, format_tick, truncate_tick};
use crate::layout::Size;
use crate::mark::{Mark, StrokeStyle, TextAnchor, TextBaseline};
use crate::z_order;

/// Color of the largest positive value.
pub const POSITIVE_COLOR: Color = Color::from_rgb8(255, 0, 0);
/// Color of the most negative value.
pub const NEGATIVE_COLOR: Color = Color::from_rgb8(0, 143, 255);
/// Label color on light cells.
pub const DARK_LABEL: Color = Color::from_rgb8(30, 30, 30);

/// Cells whose normalized magnitude is below this get [`DARK_LABEL`] text.
const DARK_LABEL_BELOW: f64 = 0.3;

/// One end of a [`HeatDomain`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DomainBound {
    /// Use the default (`-1` for the minimum, `1` for the maximum).
    #[default]
    Auto,
    /// An explicit value.
    Value(f64),
}

/// Value domain of a heat map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeatDomain {
    /// Lower end.
    pub min: DomainBound,
    /// Upper end.
    pub max: DomainBound,
}

impl HeatDomain {
    /// An explicit domain.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: DomainBound::Value(min),
            max: DomainBound::Value(max),
        }
    }

    /// Resolves `Auto` ends to `-1` / `1`.
    pub fn resolve(&self) -> (f64, f64) {
        let min = match self.min {
            DomainBound::Auto => -1.0,
            DomainBound::Value(v) => v,
        };
        let max = match self.max {
            DomainBound::Auto => 1.0,
            DomainBound::Value(v) => v,
        };
        (min, max)
    }
}

/// Fixed pixel allowances of a heat map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatMapLayout {
    /// Width of the row label column.
    pub y_tick_width: f64,
    /// Height of the column label row.
    pub x_tick_height: f64,
    /// Space above the grid.
    pub top_space: f64,
    /// Width reserved for the color legend.
    pub color_range_width: f64,
}

impl Default for HeatMapLayout {
    fn default() -> Self {
        Self {
            y_tick_width: 80.0,
            x_tick_height: 30.0,
            top_space: 20.0,
            color_range_width: 100.0,
        }
    }
}

/// Input of a heat map.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatMapSpec {
    /// `data[column][row]`.
    pub data: Vec<Vec<f64>>,
    /// Labels shared by columns and rows.
    pub ticks: Vec<String>,
    /// Value domain.
    pub domain: HeatDomain,
    /// Pixel allowances.
    pub layout: HeatMapLayout,
}

impl HeatMapSpec {
    /// Creates a spec with an automatic `[-1, 1]` domain.
    pub fn new(data: Vec<Vec<f64>>, ticks: Vec<String>) -> Self {
        Self {
            data,
            ticks,
            domain: HeatDomain::default(),
            layout: HeatMapLayout::default(),
        }
    }

    /// Sets the value domain.
    pub fn with_domain(mut self, domain: HeatDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the layout allowances.
    pub fn with_layout(mut self, layout: HeatMapLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Computes the geometry for a container of `size`.
    pub fn geometry(&self, size: Size) -> HeatMapGeometry {
        let l = self.layout;
        let domain = self.domain.resolve();
        let columns = self.data.len();
        let rows = self.data.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 || rows == 0 {
            log::warn!("heat map has no cells");
            return HeatMapGeometry::empty(domain);
        }

        let avail_w = size.width - l.y_tick_width - l.color_range_width;
        let avail_h = size.height - l.x_tick_height - l.top_space;
        let cell = (avail_w / columns as f64).min(avail_h / rows as f64).max(0.0);
        let block_w = cell * columns as f64;
        let x1 = (size.width - (block_w + l.color_range_width + l.y_tick_width)) / 2.0;
        let x2 = size.width - x1;
        let origin = Point::new(x1 + l.y_tick_width, l.top_space);
        let block_h = cell * rows as f64;
        let magnitude = domain.0.abs().max(domain.1.abs());

        let mut cells = Vec::with_capacity(columns * rows);
        for (i, column) in self.data.iter().enumerate() {
            for (j, &value) in column.iter().enumerate() {
                let x = origin.x + i as f64 * cell;
                let y = origin.y + j as f64 * cell;
                let t = normalize(value, magnitude);
                cells.push(HeatCell {
                    column: i,
                    row: j,
                    rect: Rect::new(x, y, x + cell, y + cell),
                    value,
                    fill: cell_color(t),
                    label: format_cell_value(value),
                    label_color: if t.abs() < DARK_LABEL_BELOW {
                        DARK_LABEL
                    } else {
                        css::WHITE
                    },
                });
            }
        }

        let y_ticks = self
            .ticks
            .iter()
            .take(rows)
            .enumerate()
            .map(|(j, tick)| {
                let y = origin.y + j as f64 * cell + cell / 2.0;
                AxisTick::new((origin.x - 10.0, y), truncate_tick(tick))
            })
            .collect();
        let x_ticks = self
            .ticks
            .iter()
            .take(columns)
            .enumerate()
            .map(|(i, tick)| {
                let x = origin.x + i as f64 * cell + cell / 2.0;
                AxisTick::new(
                    (x, origin.y + block_h + l.x_tick_height / 2.0),
                    truncate_tick(tick),
                )
            })
            .collect();

        let legend_x = x2 - l.color_range_width + 20.0;
        let legend = HeatLegend {
            rect: Rect::new(
                legend_x,
                l.top_space,
                legend_x + 20.0,
                l.top_space + block_h,
            ),
            ticks: legend_ticks(domain, block_h, l.top_space),
        };
        log::debug!(
            "heat map: {columns}x{rows} cells of {cell}px, legend {} ticks",
            legend.ticks.len()
        );

        HeatMapGeometry {
            cell_size: cell,
            origin,
            domain,
            cells,
            x_ticks,
            y_ticks,
            legend,
        }
    }
}

/// Maps `value` into `[-1, 1]` relative to the domain's larger magnitude.
fn normalize(value: f64, magnitude: f64) -> f64 {
    if !value.is_finite() || magnitude == 0.0 || !magnitude.is_finite() {
        return 0.0;
    }
    (value / magnitude).clamp(-1.0, 1.0)
}

/// Returns the fill for a normalized value in `[-1, 1]`: white at zero, fading to
/// [`POSITIVE_COLOR`] or [`NEGATIVE_COLOR`].
pub fn cell_color(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(-1.0, 1.0) } else { 0.0 };
    let anchor = if t > 0.0 { POSITIVE_COLOR } else { NEGATIVE_COLOR };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "t is in [-1, 1], well within f32 precision needs"
    )]
    let amount = t.abs() as f32;
    let white = css::WHITE.components;
    let mut components = [0.0_f32; 4];
    for (i, c) in components.iter_mut().enumerate() {
        *c = white[i] + (anchor.components[i] - white[i]) * amount;
    }
    Color::new(components)
}

/// Splits `domain` by recursive bisection (three rounds, nine values) and lays the values out
/// top to bottom in descending order over `height`.
pub fn legend_ticks(domain: (f64, f64), height: f64, top: f64) -> Vec<LegendTick> {
    let mut values = alloc::vec![domain.0, domain.1];
    for _ in 0..3 {
        let midpoints: Vec<f64> = values.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        values.extend(midpoints);
        values.sort_by(f64::total_cmp);
    }
    values.reverse();
    let step = height / (values.len() - 1) as f64;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| LegendTick {
            y: top + i as f64 * step,
            value,
        })
        .collect()
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatCell {
    /// Column index into the data.
    pub column: usize,
    /// Row index into the column.
    pub row: usize,
    /// Cell square.
    pub rect: Rect,
    /// Raw value.
    pub value: f64,
    /// Fill color.
    pub fill: Color,
    /// Formatted value.
    pub label: String,
    /// Label color, chosen for contrast with `fill`.
    pub label_color: Color,
}

/// A labelled position on the color legend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendTick {
    /// Vertical position.
    pub y: f64,
    /// Domain value.
    pub value: f64,
}

/// The gradient legend.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatLegend {
    /// Gradient bar.
    pub rect: Rect,
    /// Ticks, highest value first.
    pub ticks: Vec<LegendTick>,
}

/// Output of [`HeatMapSpec::geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeatMapGeometry {
    /// Side length of every cell.
    pub cell_size: f64,
    /// Top-left corner of the grid.
    pub origin: Point,
    /// Resolved value domain.
    pub domain: (f64, f64),
    /// Cells in column-major order.
    pub cells: Vec<HeatCell>,
    /// Column labels.
    pub x_ticks: Vec<AxisTick>,
    /// Row labels.
    pub y_ticks: Vec<AxisTick>,
    /// Color legend.
    pub legend: HeatLegend,
}

impl HeatMapGeometry {
    fn empty(domain: (f64, f64)) -> Self {
        Self {
            cell_size: 0.0,
            origin: Point::ZERO,
            domain,
            cells: Vec::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            legend: HeatLegend {
                rect: Rect::ZERO,
                ticks: Vec::new(),
            },
        }
    }

    /// Returns the cell under `point`.
    pub fn cell_at(&self, point: Point) -> Option<&HeatCell> {
        self.cells.iter().find(|c| c.rect.contains(point))
    }

    /// Lowers the geometry into marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let tick_stroke = StrokeStyle::solid(AXIS_COLOR, 1.0);

        for c in &self.cells {
            out.push(Mark::rect(c.rect, c.fill));
            out.push(
                Mark::text(c.rect.center(), c.label.clone(), c.label_color)
                    .with_z_index(z_order::SERIES_LABELS),
            );
        }

        let bottom = self.legend.rect.y1;
        for tick in &self.x_ticks {
            let x = tick.position.x;
            out.push(
                Mark::vertical(x, bottom, bottom + 5.0, tick_stroke)
                    .with_z_index(z_order::AXIS_RULES),
            );
            out.push(
                tick.mark(AXIS_COLOR)
                    .with_text_align(TextAnchor::Start, TextBaseline::Middle)
                    .with_text_angle(30.0),
            );
        }
        for tick in &self.y_ticks {
            let y = tick.position.y;
            out.push(
                Mark::horizontal(y, self.origin.x, self.origin.x - 5.0, tick_stroke)
                    .with_z_index(z_order::AXIS_RULES),
            );
            out.push(
                tick.mark(AXIS_COLOR)
                    .with_text_align(TextAnchor::End, TextBaseline::Hanging)
                    .with_text_angle(30.0),
            );
        }

        if !self.legend.ticks.is_empty() {
            let r = self.legend.rect;
            out.push(
                Mark::gradient_rect(
                    r,
                    alloc::vec![
                        (0.0, POSITIVE_COLOR),
                        (0.5, css::WHITE),
                        (1.0, NEGATIVE_COLOR)
                    ],
                )
                .with_z_index(z_order::LEGEND_SWATCHES),
            );
            for tick in &self.legend.ticks {
                out.push(
                    Mark::horizontal(tick.y, r.x1, r.x1 + 5.0, tick_stroke)
                        .with_z_index(z_order::LEGEND_SWATCHES),
                );
                out.push(
                    Mark::text((r.x1 + 15.0, tick.y), format_tick(tick.value), AXIS_COLOR)
                        .with_text_align(TextAnchor::Start, TextBaseline::Middle)
                        .with_z_index(z_order::LEGEND_LABELS),
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn spec() -> HeatMapSpec {
        HeatMapSpec::new(
            vec![vec![1.0, -0.5], vec![-0.5, 1.0]],
            vec!["alpha".to_string(), "a very long label".to_string()],
        )
    }

    #[test]
    fn cells_are_square_and_centered() {
        // Available: 580 - 180 = 400 wide, 250 - 50 = 200 high; two rows cap the cell at 100.
        let g = spec().geometry(Size::new(580.0, 250.0));
        assert_eq!(g.cell_size, 100.0);
        // x1 = (580 - (200 + 180)) / 2 = 100.
        assert_eq!(g.origin, Point::new(180.0, 20.0));
        assert_eq!(g.cells.len(), 4);
        assert_eq!(g.cells[3].rect, Rect::new(280.0, 120.0, 380.0, 220.0));
        // Legend sits at x2 - 100 + 20 where x2 = 580 - 100.
        assert_eq!(g.legend.rect, Rect::new(400.0, 20.0, 420.0, 220.0));
    }

    #[test]
    fn colors_fade_through_white() {
        assert_eq!(cell_color(0.0).to_rgba8(), css::WHITE.to_rgba8());
        assert_eq!(cell_color(1.0).to_rgba8(), POSITIVE_COLOR.to_rgba8());
        assert_eq!(cell_color(-1.0).to_rgba8(), NEGATIVE_COLOR.to_rgba8());
        let half = cell_color(0.5).to_rgba8();
        assert_eq!(half.r, 255);
        assert!((127..=128).contains(&half.b));
    }

    #[test]
    fn label_color_depends_on_magnitude() {
        let g =
            HeatMapSpec::new(vec![vec![0.1, 0.9]], Vec::new()).geometry(Size::new(400.0, 300.0));
        assert_eq!(g.cells[0].label_color, DARK_LABEL);
        assert_eq!(g.cells[1].label_color, css::WHITE);
    }

    #[test]
    fn legend_has_nine_descending_ticks() {
        let ticks = legend_ticks((-1.0, 1.0), 200.0, 20.0);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[0].value, 1.0);
        assert_eq!(ticks[4].value, 0.0);
        assert_eq!(ticks[8].value, -1.0);
        assert_eq!(ticks[8].y, 220.0);
        assert_eq!(ticks[1].value, 0.75);
        assert_eq!(ticks[1].y, 45.0);
    }

    #[test]
    fn auto_domain_defaults_to_unit_interval() {
        let d = HeatDomain {
            min: DomainBound::Auto,
            max: DomainBound::Value(2.0),
        };
        assert_eq!(d.resolve(), (-1.0, 2.0));
        assert_eq!(HeatDomain::default().resolve(), (-1.0, 1.0));
    }

    #[test]
    fn tick_labels_are_truncated() {
        let g = spec().geometry(Size::new(580.0, 250.0));
        assert_eq!(g.x_ticks[1].label, "a very lo...");
        assert_eq!(g.y_ticks[0].label, "alpha");
    }

    #[test]
    fn empty_data_gives_empty_geometry() {
        let g = HeatMapSpec::new(Vec::new(), Vec::new()).geometry(Size::new(400.0, 300.0));
        assert!(g.cells.is_empty());
        assert!(g.marks().is_empty());
    }

    #[test]
    fn cell_lookup_by_point() {
        let g = spec().geometry(Size::new(580.0, 250.0));
        let c = g.cell_at(Point::new(300.0, 50.0)).unwrap();
        assert_eq!((c.column, c.row), (1, 0));
        assert_eq!(c.value, -0.5);
        assert!(g.cell_at(Point::new(10.0, 10.0)).is_none());
    }
}
