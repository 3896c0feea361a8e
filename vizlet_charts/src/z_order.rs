// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for widget-generated marks.
//!
//! Every widget assigns these layers so hosts can draw a mark list without reordering it
//! per widget. Renderers should stable-sort by `z_index`.

/// Plot background fills.
pub const PLOT_BACKGROUND: i32 = -100;
/// Gridlines and guide lines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled series marks (boxes, cells, violin areas).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (whiskers, medians, rules).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;
/// Labels drawn on top of series (cell values, slice labels).
pub const SERIES_LABELS: i32 = 25;

/// Axis domain lines and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;

/// Legend swatches and gradients.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
