// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render output.
//!
//! Widgets lower their geometry into a flat list of [`Mark`]s. A mark is a fully resolved
//! shape (coordinates and paint); the host renderer only has to draw them in `z_index` order.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Line, Point, Rect, Shape};
use peniko::Color;
use peniko::color::palette::css;

use crate::z_order;

/// A paint + width pair for stroked shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in scene coordinates.
    pub width: f64,
    /// Optional `(dash, gap)` pattern.
    pub dash: Option<(f64, f64)>,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Sets a `(dash, gap)` pattern.
    pub fn with_dash(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor sits on the vertical middle of the text.
    Middle,
    /// The anchor sits on the alphabetic baseline.
    Alphabetic,
    /// The anchor sits on the top of the text.
    Hanging,
}

/// A text label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Unshaped label text.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Fill color.
    pub fill: Color,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
}

/// A gradient stop: offset in `0..=1` and color.
pub type GradientStop = (f64, Color);

/// Shape payload of a [`Mark`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkKind {
    /// A filled rectangle with optional rounded corners and outline.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill color.
        fill: Color,
        /// Corner radius (0 for square corners).
        radius: f64,
        /// Optional outline.
        stroke: Option<StrokeStyle>,
    },
    /// A rectangle filled with a top-to-bottom linear gradient.
    GradientRect {
        /// Geometry.
        rect: Rect,
        /// Stops from top (offset 0) to bottom (offset 1).
        stops: Vec<GradientStop>,
    },
    /// A stroked line segment.
    Line {
        /// Geometry.
        line: Line,
        /// Stroke.
        stroke: StrokeStyle,
    },
    /// An arbitrary path.
    Path {
        /// Geometry.
        path: BezPath,
        /// Fill color (use a transparent color for stroke-only paths).
        fill: Color,
        /// Optional outline.
        stroke: Option<StrokeStyle>,
    },
    /// A filled circle.
    Circle {
        /// Geometry.
        circle: Circle,
        /// Fill color.
        fill: Color,
    },
    /// A text label.
    Text(TextMark),
}

/// A resolved, renderable shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Rendering order; renderers draw lower values first and keep insertion order on ties.
    pub z_index: i32,
    /// Shape payload.
    pub kind: MarkKind,
}

impl Mark {
    /// A filled rectangle.
    pub fn rect(rect: Rect, fill: Color) -> Self {
        Self {
            z_index: z_order::SERIES_FILL,
            kind: MarkKind::Rect {
                rect,
                fill,
                radius: 0.0,
                stroke: None,
            },
        }
    }

    /// A rounded, outlined rectangle.
    pub fn rounded_rect(rect: Rect, fill: Color, radius: f64, stroke: Option<StrokeStyle>) -> Self {
        Self {
            z_index: z_order::SERIES_FILL,
            kind: MarkKind::Rect {
                rect,
                fill,
                radius,
                stroke,
            },
        }
    }

    /// A vertical gradient rectangle.
    pub fn gradient_rect(rect: Rect, stops: Vec<GradientStop>) -> Self {
        Self {
            z_index: z_order::SERIES_FILL,
            kind: MarkKind::GradientRect { rect, stops },
        }
    }

    /// A rule (stroked line segment) between two points.
    pub fn rule(p0: impl Into<Point>, p1: impl Into<Point>, stroke: StrokeStyle) -> Self {
        Self {
            z_index: z_order::SERIES_STROKE,
            kind: MarkKind::Line {
                line: Line::new(p0, p1),
                stroke,
            },
        }
    }

    /// A horizontal rule at `y` from `x0` to `x1`.
    pub fn horizontal(y: f64, x0: f64, x1: f64, stroke: StrokeStyle) -> Self {
        Self::rule((x0, y), (x1, y), stroke)
    }

    /// A vertical rule at `x` from `y0` to `y1`.
    pub fn vertical(x: f64, y0: f64, y1: f64, stroke: StrokeStyle) -> Self {
        Self::rule((x, y0), (x, y1), stroke)
    }

    /// A filled and/or stroked path.
    pub fn path(path: BezPath, fill: Color, stroke: Option<StrokeStyle>) -> Self {
        Self {
            z_index: z_order::SERIES_FILL,
            kind: MarkKind::Path { path, fill, stroke },
        }
    }

    /// A filled circle.
    pub fn circle(center: impl Into<Point>, radius: f64, fill: Color) -> Self {
        Self {
            z_index: z_order::SERIES_POINTS,
            kind: MarkKind::Circle {
                circle: Circle::new(center, radius),
                fill,
            },
        }
    }

    /// A text label with default alignment (middle/middle), size 10 and no rotation.
    pub fn text(pos: impl Into<Point>, text: impl Into<String>, fill: Color) -> Self {
        Self {
            z_index: z_order::AXIS_LABELS,
            kind: MarkKind::Text(TextMark {
                pos: pos.into(),
                text: text.into(),
                font_size: 10.0,
                fill,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
                angle: 0.0,
            }),
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets text alignment (no-op for non-text marks).
    pub fn with_text_align(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkKind::Text(t) = &mut self.kind {
            t.anchor = anchor;
            t.baseline = baseline;
        }
        self
    }

    /// Sets text rotation in degrees (no-op for non-text marks).
    pub fn with_text_angle(mut self, angle: f64) -> Self {
        if let MarkKind::Text(t) = &mut self.kind {
            t.angle = angle;
        }
        self
    }

    /// Sets the font size (no-op for non-text marks).
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        if let MarkKind::Text(t) = &mut self.kind {
            t.font_size = font_size;
        }
        self
    }

    /// Returns geometric bounds, ignoring stroke width. Text marks have no bounds.
    pub fn bounds(&self) -> Option<Rect> {
        match &self.kind {
            MarkKind::Rect { rect, .. } | MarkKind::GradientRect { rect, .. } => Some(*rect),
            MarkKind::Line { line, .. } => Some(line.bounding_box()),
            MarkKind::Path { path, .. } => Some(path.bounding_box()),
            MarkKind::Circle { circle, .. } => Some(circle.bounding_box()),
            MarkKind::Text(_) => None,
        }
    }
}

/// Stable-sorts marks by `z_index`, keeping insertion order among equal indices.
pub fn sort_marks(marks: &mut [Mark]) {
    marks.sort_by_key(|m| m.z_index);
}
