// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline geometry.
//!
//! A horizontal month axis with one tick per month, a line of point events, and lanes of
//! range events. Events of the same category share lanes; an event joins the first lane whose
//! last event ended more than `min_gap_days` before it starts.
//!
//! The timeline has an intrinsic size (it grows with the covered months and lanes), so the
//! geometry does not take a container size. The current date is an explicit input.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{Datelike, Months, NaiveDate};
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::{AXIS_COLOR, AxisTick};
use crate::layout::Size;
use crate::mark::{Mark, StrokeStyle};
use crate::z_order;

const MONTH_GRID_COLOR: Color = Color::from_rgb8(0xbb, 0xc0, 0xc5);
const POINT_LINE_COLOR: Color = Color::from_rgb8(0x47, 0x5f, 0x7b);
const LANE_COLOR: Color = Color::from_rgb8(0xe3, 0xe9, 0xf0);

/// An event spanning a date range.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEvent {
    /// Events of a category share lanes.
    pub category: String,
    /// Label.
    pub text: String,
    /// Line and marker color.
    pub color: Color,
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

/// A single-day event drawn on the point line.
#[derive(Clone, Debug, PartialEq)]
pub struct PointEvent {
    /// Label.
    pub text: String,
    /// Marker and label background color.
    pub color: Color,
    /// The day.
    pub date: NaiveDate,
}

/// Fixed pixel allowances of a timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineLayout {
    /// Horizontal distance between month ticks.
    pub month_width: f64,
    /// Vertical distance between lanes.
    pub lane_height: f64,
    /// Minimum number of free days between two events sharing a lane.
    pub min_gap_days: i64,
    /// Label width per character of a point event.
    pub point_label_char_width: f64,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            month_width: 100.0,
            lane_height: 40.0,
            min_gap_days: 3,
            point_label_char_width: 15.0,
        }
    }
}

/// Input of a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineSpec {
    /// Range events.
    pub events: Vec<TimelineEvent>,
    /// Point events.
    pub point_events: Vec<PointEvent>,
    /// The current date; the axis always reaches past it.
    pub today: NaiveDate,
    /// Pixel allowances.
    pub layout: TimelineLayout,
}

/// A `(year, month)` pair with month in `1..=12`.
type YearMonth = (i32, u32);

fn month_diff(from: YearMonth, to: YearMonth) -> i64 {
    (i64::from(to.0) - i64::from(from.0)) * 12 + (i64::from(to.1) - i64::from(from.1))
}

fn days_in_month(date: NaiveDate) -> u32 {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

fn next_month((year, month): YearMonth) -> YearMonth {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

impl TimelineSpec {
    /// Creates a spec with the default layout.
    pub fn new(
        events: Vec<TimelineEvent>,
        point_events: Vec<PointEvent>,
        today: NaiveDate,
    ) -> Self {
        Self {
            events,
            point_events,
            today,
            layout: TimelineLayout::default(),
        }
    }

    /// Sets the layout allowances.
    pub fn with_layout(mut self, layout: TimelineLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Computes the geometry.
    pub fn geometry(&self) -> TimelineGeometry {
        let l = self.layout;
        let mut sorted: Vec<&TimelineEvent> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.start);

        let first = sorted.first().map_or(self.today, |e| e.start);
        let latest_end = sorted.iter().map(|e| e.end).max().unwrap_or(self.today);
        let last = latest_end.max(self.today);
        let start_ym = (first.year(), first.month());
        let end_ym = next_month((last.year(), last.month()));

        let origin = l.month_width / 2.0;
        let date_x = |date: NaiveDate| {
            let diff = month_diff(start_ym, (date.year(), date.month())) as f64;
            origin
                + diff * l.month_width
                + f64::from(date.day()) / f64::from(days_in_month(date)) * l.month_width
        };

        let mut months = Vec::new();
        let mut ym = start_ym;
        for i in 0..=month_diff(start_ym, end_ym) {
            months.push(AxisTick::new(
                (origin + i as f64 * l.month_width, 20.0),
                format!("{}.{:02}", ym.0, ym.1),
            ));
            ym = next_month(ym);
        }

        // Categories in order of their earliest event.
        let mut categories: Vec<&str> = Vec::new();
        for e in &sorted {
            if !categories.contains(&e.category.as_str()) {
                categories.push(&e.category);
            }
        }

        let mut lanes: Vec<Lane> = Vec::new();
        for category in categories {
            let first_lane = lanes.len();
            for e in sorted.iter().filter(|e| e.category == category) {
                let placed = PlacedEvent {
                    event: (*e).clone(),
                    x1: date_x(e.start),
                    x2: date_x(e.end),
                };
                let fits = |lane: &Lane| {
                    lane.events.last().is_none_or(|prev| {
                        let gap = e.start.signed_duration_since(prev.event.end);
                        gap.num_days() > l.min_gap_days
                    })
                };
                match lanes[first_lane..].iter_mut().find(|lane| fits(lane)) {
                    Some(lane) => lane.events.push(placed),
                    None => {
                        let y = l.lane_height * (5 + lanes.len()) as f64;
                        lanes.push(Lane {
                            y,
                            category: String::from(category),
                            events: alloc::vec![placed],
                        });
                    }
                }
            }
        }

        let points = self
            .point_events
            .iter()
            .map(|p| PlacedPoint {
                event: p.clone(),
                x: date_x(p.date),
                label_width: p.text.chars().count() as f64 * l.point_label_char_width,
            })
            .collect();

        log::debug!(
            "timeline: {} months, {} lanes, {} point events",
            months.len(),
            lanes.len(),
            self.point_events.len()
        );

        let size = Size::new(
            months.len() as f64 * l.month_width,
            (lanes.len() + 5) as f64 * l.lane_height,
        );
        TimelineGeometry {
            size,
            axis_end: origin + months.len().saturating_sub(1) as f64 * l.month_width,
            point_line_y: 3.0 * l.lane_height,
            today_x: date_x(self.today),
            months,
            lanes,
            points,
            layout: l,
        }
    }
}

/// A range event with resolved positions.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEvent {
    /// The source event.
    pub event: TimelineEvent,
    /// Start x.
    pub x1: f64,
    /// End x.
    pub x2: f64,
}

/// One horizontal lane.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    /// Lane y.
    pub y: f64,
    /// Category of every event in the lane.
    pub category: String,
    /// Events in start order.
    pub events: Vec<PlacedEvent>,
}

/// A point event with resolved position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPoint {
    /// The source event.
    pub event: PointEvent,
    /// Marker x.
    pub x: f64,
    /// Width of the label background.
    pub label_width: f64,
}

/// Output of [`TimelineSpec::geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineGeometry {
    /// Intrinsic size of the drawing.
    pub size: Size,
    /// One label per month, left to right.
    pub months: Vec<AxisTick>,
    /// X of the last month tick.
    pub axis_end: f64,
    /// Y of the point event line.
    pub point_line_y: f64,
    /// Lanes, top to bottom.
    pub lanes: Vec<Lane>,
    /// Point events.
    pub points: Vec<PlacedPoint>,
    /// X of the current date.
    pub today_x: f64,
    layout: TimelineLayout,
}

impl TimelineGeometry {
    /// Returns the range event under `point`, within the marker radius.
    pub fn event_at(&self, point: Point) -> Option<&PlacedEvent> {
        const REACH: f64 = 4.0;
        self.lanes
            .iter()
            .filter(|lane| (lane.y - point.y).abs() <= REACH)
            .flat_map(|lane| lane.events.iter())
            .find(|e| point.x >= e.x1 - REACH && point.x <= e.x2 + REACH)
    }

    /// Lowers the geometry into marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::new();
        let bottom = (self.lanes.len() + 4) as f64 * self.layout.lane_height;
        let grid = StrokeStyle::solid(MONTH_GRID_COLOR, 1.0).with_dash(3.0, 3.0);
        for tick in &self.months {
            out.push(tick.mark(AXIS_COLOR));
            out.push(
                Mark::vertical(tick.position.x, 35.0, bottom, grid)
                    .with_z_index(z_order::GRID_LINES),
            );
        }

        let origin = self.layout.month_width / 2.0;
        out.push(
            Mark::horizontal(
                self.point_line_y,
                origin,
                self.axis_end,
                StrokeStyle::solid(POINT_LINE_COLOR, 1.0).with_dash(3.0, 3.0),
            )
            .with_z_index(z_order::GRID_LINES),
        );
        for p in &self.points {
            let y = self.point_line_y;
            out.push(Mark::circle((p.x, y), 4.0, p.event.color));
            let half = p.label_width / 2.0;
            let label = Rect::new(p.x - half, y - 30.0, p.x + half, y - 10.0);
            out.push(
                Mark::rounded_rect(label, p.event.color, 5.0, None)
                    .with_z_index(z_order::SERIES_STROKE),
            );
            out.push(
                Mark::text((p.x, y - 20.0), p.event.text.clone(), css::WHITE)
                    .with_z_index(z_order::SERIES_LABELS),
            );
        }

        let lane_rule = StrokeStyle::solid(LANE_COLOR, 1.0);
        for lane in &self.lanes {
            out.push(
                Mark::horizontal(lane.y, origin, self.axis_end, lane_rule)
                    .with_z_index(z_order::GRID_LINES),
            );
            for e in &lane.events {
                out.push(Mark::horizontal(
                    lane.y,
                    e.x1,
                    e.x2,
                    StrokeStyle::solid(e.event.color, 2.0),
                ));
                out.push(Mark::circle((e.x1, lane.y), 4.0, e.event.color));
                out.push(Mark::circle((e.x2, lane.y), 4.0, e.event.color));
            }
        }
        out
    }
}
