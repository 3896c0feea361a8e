// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for small statistical chart widgets.
//!
//! This crate turns widget inputs (series, matrices, dated values, timeline events) into pixel
//! geometry and a flat list of [`Mark`]s that any 2D renderer can draw:
//! - **Scales** map data values into screen coordinates ([`ScaleLinear`], [`ScaleBand`]).
//! - **Binning** partitions samples into equal-width [`Bin`]s for density outlines.
//! - **Widgets**: [`BoxPlotSpec`], [`ViolinPlotSpec`], [`HeatMapSpec`],
//!   [`CalendarHeatMapSpec`], [`TimelineSpec`] and [`PieSpec`].
//! - **Interaction**: [`TooltipTracker`] aggregates hovered statistics, [`DragSession`] turns
//!   pointer gestures into track fractions.
//! - **Recompute**: [`Memo`] reruns a geometry builder only when its inputs change.
//!
//! Everything is synchronous and pure; the host owns state, events and drawing.
//!
//! ```
//! use vizlet_charts::{BoxPlotSeries, BoxPlotSpec, Size};
//!
//! let spec = BoxPlotSpec::new(
//!     vec![BoxPlotSeries::new("a", 10.0, 30.0, 50.0, 70.0, 90.0)],
//!     (0.0, 100.0),
//! );
//! let geometry = spec.geometry(Size::new(400.0, 250.0));
//! let b = &geometry.boxes[0];
//! assert!(b.x1 < b.x && b.x < b.x2);
//! assert!(!geometry.marks().is_empty());
//! ```
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod axis;
mod box_plot;
mod calendar;
mod drag;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod heat_map;
mod histogram;
mod layout;
mod mark;
mod pie;
mod recompute;
mod scale;
mod timeline;
mod tooltip;
mod violin;
#[cfg(test)]
mod widget_tests;
mod z_order;

pub use axis::{AXIS_COLOR, AxisTick, GRID_COLOR, vertical_ticks};
pub use box_plot::{BoxGeometry, BoxPlotGeometry, BoxPlotLayout, BoxPlotSeries, BoxPlotSpec};
pub use calendar::{
    CalendarCell, CalendarDay, CalendarGeometry, CalendarHeatMapSpec, CalendarLayout,
    ColorThreshold, ColorThresholds, DayValue, WEEKDAY_TICKS, build_range, month_ticks,
    month_window, week_count,
};
pub use drag::{DragSession, OutOfRange, Track};
pub use error::{DomainValue, Error, Result};
pub use format::{MAX_TICK_CHARS, format_cell_value, format_tick, truncate_tick};
pub use heat_map::{
    DARK_LABEL, DomainBound, HeatCell, HeatDomain, HeatLegend, HeatMapGeometry, HeatMapLayout,
    HeatMapSpec, LegendTick, NEGATIVE_COLOR, POSITIVE_COLOR, cell_color, legend_ticks,
};
pub use histogram::{Bin, bin, max_count, sample_domain};
pub use layout::{Margin, Size};
pub use mark::{
    GradientStop, Mark, MarkKind, StrokeStyle, TextAnchor, TextBaseline, TextMark, sort_marks,
};
pub use pie::{PALETTE, PieSlice, PieSpec, label_font_size, pie_slices};
pub use recompute::Memo;
pub use scale::{AxisDirection, Band, ScaleBand, ScaleLinear, ScaleLinearSpec};
pub use timeline::{
    Lane, PlacedEvent, PlacedPoint, PointEvent, TimelineEvent, TimelineGeometry, TimelineLayout,
    TimelineSpec,
};
pub use tooltip::{
    HIT_TOLERANCE, HitTarget, Tooltip, TooltipDelta, TooltipEntry, TooltipTracker, TooltipValue,
};
pub use violin::{
    BAND_PADDING, MAX_BIN_NUMBER, MIN_BIN_NUMBER, ViolinGeometry, ViolinPlotGeometry,
    ViolinPlotSpec, ViolinSeries,
};
pub use z_order::*;
