// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar heat map: day bucketing and geometry.
//!
//! Days are laid out GitHub-style: one column per week, one row per weekday (Sunday first).
//! [`build_range`] assigns every day of an inclusive date range to a `(week, weekday)` slot and
//! [`CalendarHeatMapSpec`] colors the slots through a fixed set of value thresholds.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{Datelike, Month, Months, NaiveDate};
use hashbrown::HashMap;
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::{AXIS_COLOR, AxisTick};
use crate::error::{Error, Result};
use crate::layout::Size;
use crate::mark::{Mark, StrokeStyle, TextAnchor, TextBaseline};

/// Weekday labels, Sunday first.
pub const WEEKDAY_TICKS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// One day slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalendarCell {
    /// The day.
    pub date: NaiveDate,
    /// Observed value, `0` when there is no data for the day.
    pub value: f64,
    /// Whether a data point exists for this day.
    pub observed: bool,
    /// Column, starting at 0 and incremented after every Saturday.
    pub week_index: usize,
    /// Row, Sunday = 0 through Saturday = 6.
    pub day_of_week: u32,
}

/// Buckets every day of `[start, end]` into week columns.
///
/// Returns [`Error::InvalidRange`] if `end` is before `start`.
pub fn build_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarCell>> {
    if end < start {
        return Err(Error::InvalidRange);
    }
    let days = end.signed_duration_since(start).num_days() + 1;
    let days = usize::try_from(days).map_err(|_| Error::InvalidRange)?;

    let mut cells = Vec::with_capacity(days);
    let mut week_index = 0;
    for date in start.iter_days().take(days) {
        let day_of_week = date.weekday().num_days_from_sunday();
        cells.push(CalendarCell {
            date,
            value: 0.0,
            observed: false,
            week_index,
            day_of_week,
        });
        if day_of_week == 6 {
            week_index += 1;
        }
    }
    Ok(cells)
}

/// Number of week columns spanned by `cells`.
pub fn week_count(cells: &[CalendarCell]) -> usize {
    cells.last().map_or(0, |c| c.week_index + 1)
}

/// Month numbers (`1..=12`) from `start`'s month through `end`'s month, inclusive.
///
/// December wraps to January; ranges longer than a year list every month they cover.
pub fn month_ticks(start: NaiveDate, end: NaiveDate) -> Result<Vec<u32>> {
    if end < start {
        return Err(Error::InvalidRange);
    }
    let (mut year, mut month) = (start.year(), start.month());
    let mut list = Vec::new();
    loop {
        list.push(month);
        if (year, month) == (end.year(), end.month()) {
            break;
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    Ok(list)
}

/// The date range ending with the last day of `end_month` (`1..=12`) of `end_year` and starting
/// on the first day of the month `months_back` months earlier.
pub fn month_window(
    end_year: i32,
    end_month: u32,
    months_back: u32,
) -> Result<(NaiveDate, NaiveDate)> {
    let end_first =
        NaiveDate::from_ymd_opt(end_year, end_month, 1).ok_or(Error::InvalidRange)?;
    let start = end_first
        .checked_sub_months(Months::new(months_back))
        .ok_or(Error::InvalidRange)?;
    let end = end_first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or(Error::InvalidRange)?;
    Ok((start, end))
}

/// A value threshold and the color used at or above it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorThreshold {
    /// Lowest value that gets `color`.
    pub value: f64,
    /// Fill color.
    pub color: Color,
}

/// An immutable, descending set of color thresholds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorThresholds {
    sorted: Vec<ColorThreshold>,
}

impl ColorThresholds {
    /// Sorts the thresholds once, highest first.
    pub fn new(mut thresholds: Vec<ColorThreshold>) -> Self {
        thresholds.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self { sorted: thresholds }
    }

    /// Thresholds, highest first.
    pub fn as_slice(&self) -> &[ColorThreshold] {
        &self.sorted
    }

    /// Color of the highest threshold `<= value`.
    pub fn color_for(&self, value: f64) -> Option<Color> {
        self.sorted
            .iter()
            .find(|t| value >= t.value)
            .map(|t| t.color)
    }
}

/// One observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayValue {
    /// The day.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

/// Fixed pixel allowances of a calendar heat map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalendarLayout {
    /// Width of the weekday label column.
    pub weekday_legend_offset: f64,
    /// Height of the month label row.
    pub month_legend_offset: f64,
    /// Corner radius of the day squares.
    pub day_radius: f64,
    /// Width of the white outline separating days.
    pub day_spacing: f64,
}

impl Default for CalendarLayout {
    fn default() -> Self {
        Self {
            weekday_legend_offset: 30.0,
            month_legend_offset: 30.0,
            day_radius: 4.0,
            day_spacing: 1.5,
        }
    }
}

/// Input of a calendar heat map.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarHeatMapSpec {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
    /// Observations; for duplicate dates the last one wins.
    pub data: Vec<DayValue>,
    /// Value-to-color thresholds.
    pub colors: ColorThresholds,
    /// Fill of days without data or below every threshold.
    pub empty_color: Color,
    /// Pixel allowances.
    pub layout: CalendarLayout,
}

impl CalendarHeatMapSpec {
    /// Creates a spec with no thresholds and a light gray empty color.
    pub fn new(start: NaiveDate, end: NaiveDate, data: Vec<DayValue>) -> Self {
        Self {
            start,
            end,
            data,
            colors: ColorThresholds::default(),
            empty_color: Color::from_rgb8(0xeb, 0xed, 0xf0),
            layout: CalendarLayout::default(),
        }
    }

    /// Sets the color thresholds.
    pub fn with_colors(mut self, colors: ColorThresholds) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the empty-day color.
    pub fn with_empty_color(mut self, color: Color) -> Self {
        self.empty_color = color;
        self
    }

    /// Sets the layout allowances.
    pub fn with_layout(mut self, layout: CalendarLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Buckets the range and fills in observed values.
    pub fn cells(&self) -> Result<Vec<CalendarCell>> {
        let mut cells = build_range(self.start, self.end)?;
        let lookup: HashMap<NaiveDate, f64> =
            self.data.iter().map(|d| (d.date, d.value)).collect();
        for cell in &mut cells {
            if let Some(&value) = lookup.get(&cell.date) {
                cell.value = value;
                cell.observed = true;
            }
        }
        Ok(cells)
    }

    /// Computes the geometry for a container of `size`.
    pub fn geometry(&self, size: Size) -> Result<CalendarGeometry> {
        let l = self.layout;
        let cells = self.cells()?;
        let months = month_ticks(self.start, self.end)?;
        let weeks = week_count(&cells).max(1);

        let grid_w = (size.width - l.weekday_legend_offset).max(0.0);
        let grid_h = (size.height - l.month_legend_offset).max(0.0);
        let day = Size::new(grid_w / weeks as f64, grid_h / 7.0);

        let days: Vec<CalendarDay> = cells
            .into_iter()
            .map(|cell| {
                let x = cell.week_index as f64 * day.width + l.weekday_legend_offset;
                let y = f64::from(cell.day_of_week) * day.height;
                let fill = if cell.observed {
                    self.colors
                        .color_for(cell.value)
                        .unwrap_or(self.empty_color)
                } else {
                    self.empty_color
                };
                CalendarDay {
                    cell,
                    rect: Rect::new(x, y, x + day.width, y + day.height),
                    fill,
                }
            })
            .collect();

        let weekday_ticks = WEEKDAY_TICKS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                AxisTick::new(
                    (
                        l.weekday_legend_offset / 2.0,
                        i as f64 * day.height + day.height / 2.0,
                    ),
                    *label,
                )
            })
            .collect();

        let month_step = grid_w / months.len().max(1) as f64;
        let month_ticks = months
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                AxisTick::new(
                    (
                        i as f64 * month_step + month_step / 2.0 + l.weekday_legend_offset,
                        size.height - l.month_legend_offset / 2.0,
                    ),
                    month_label(m),
                )
            })
            .collect();

        log::debug!(
            "calendar: {} days over {weeks} weeks and {} months",
            days.len(),
            months.len()
        );

        Ok(CalendarGeometry {
            day_size: day,
            days,
            weekday_ticks,
            month_ticks,
            layout: l,
        })
    }
}

fn month_label(month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("", |m| m.name());
    name.chars().take(3).collect()
}

/// A positioned, colored day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalendarDay {
    /// The bucketed day.
    pub cell: CalendarCell,
    /// Day square.
    pub rect: Rect,
    /// Fill color.
    pub fill: Color,
}

/// Output of [`CalendarHeatMapSpec::geometry`].
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarGeometry {
    /// Size of one day slot.
    pub day_size: Size,
    /// Every day of the range, in date order.
    pub days: Vec<CalendarDay>,
    /// Weekday labels.
    pub weekday_ticks: Vec<AxisTick>,
    /// Month labels.
    pub month_ticks: Vec<AxisTick>,
    layout: CalendarLayout,
}

impl CalendarGeometry {
    /// Returns the day under `point`, for tooltips and click handling.
    pub fn day_at(&self, point: Point) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.rect.contains(point))
    }

    /// Lowers the geometry into marks.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.days.len() + 19);
        let outline = StrokeStyle::solid(css::WHITE, self.layout.day_spacing);
        for d in &self.days {
            out.push(Mark::rounded_rect(
                d.rect,
                d.fill,
                self.layout.day_radius,
                Some(outline),
            ));
        }
        for tick in &self.weekday_ticks {
            out.push(tick.mark(AXIS_COLOR));
        }
        for tick in &self.month_ticks {
            out.push(
                tick.mark(AXIS_COLOR)
                    .with_text_align(TextAnchor::End, TextBaseline::Middle),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_week_of_2023() {
        // 2023-01-01 is a Sunday, so the week rolls over after the 7th.
        let cells = build_range(date(2023, 1, 1), date(2023, 1, 8)).unwrap();
        assert_eq!(cells.len(), 8);
        let dows: Vec<u32> = cells.iter().map(|c| c.day_of_week).collect();
        assert_eq!(dows, [0, 1, 2, 3, 4, 5, 6, 0]);
        assert!(cells[..7].iter().all(|c| c.week_index == 0));
        assert_eq!(cells[7].week_index, 1);
        assert_eq!(week_count(&cells), 2);
    }

    #[test]
    fn week_index_increments_once_after_saturday() {
        let cells = build_range(date(2023, 1, 1), date(2023, 1, 7)).unwrap();
        assert_eq!(cells.len(), 7);
        assert_eq!(week_count(&cells), 1);
    }

    #[test]
    fn mid_week_start() {
        // 2023-03-15 is a Wednesday.
        let cells = build_range(date(2023, 3, 15), date(2023, 3, 19)).unwrap();
        assert_eq!(cells[0].day_of_week, 3);
        assert_eq!(cells[3].week_index, 0);
        assert_eq!(cells[4].week_index, 1);
    }

    #[test]
    fn single_day_and_reversed_ranges() {
        let single = build_range(date(2023, 5, 5), date(2023, 5, 5)).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(
            build_range(date(2023, 5, 6), date(2023, 5, 5)),
            Err(Error::InvalidRange)
        );
        assert_eq!(week_count(&[]), 0);
    }

    #[test]
    fn month_ticks_wrap_and_span_years() {
        let ticks = |a, b| month_ticks(a, b).unwrap();
        assert_eq!(ticks(date(2023, 1, 1), date(2023, 3, 1)), [1, 2, 3]);
        assert_eq!(ticks(date(2022, 11, 20), date(2023, 2, 1)), [11, 12, 1, 2]);
        assert_eq!(ticks(date(2022, 1, 1), date(2023, 1, 31)).len(), 13);
        assert_eq!(
            month_ticks(date(2023, 2, 1), date(2023, 1, 1)),
            Err(Error::InvalidRange)
        );
    }

    #[test]
    fn month_window_covers_whole_months() {
        assert_eq!(
            month_window(2023, 3, 2).unwrap(),
            (date(2023, 1, 1), date(2023, 3, 31))
        );
        assert_eq!(
            month_window(2024, 2, 3).unwrap(),
            (date(2023, 11, 1), date(2024, 2, 29))
        );
        assert_eq!(month_window(2023, 13, 0), Err(Error::InvalidRange));
    }

    #[test]
    fn thresholds_are_inclusive_and_sorted_once() {
        let input = vec![
            ColorThreshold {
                value: 1.0,
                color: css::YELLOW,
            },
            ColorThreshold {
                value: 10.0,
                color: css::RED,
            },
            ColorThreshold {
                value: 5.0,
                color: css::ORANGE,
            },
        ];
        let thresholds = ColorThresholds::new(input.clone());
        assert_eq!(input[0].value, 1.0);
        let values: Vec<f64> = thresholds.as_slice().iter().map(|t| t.value).collect();
        assert_eq!(values, [10.0, 5.0, 1.0]);
        assert_eq!(thresholds.color_for(10.0), Some(css::RED));
        assert_eq!(thresholds.color_for(7.0), Some(css::ORANGE));
        assert_eq!(thresholds.color_for(1.0), Some(css::YELLOW));
        assert_eq!(thresholds.color_for(0.5), None);
    }

    #[test]
    fn days_get_threshold_or_empty_colors() {
        let thresholds = ColorThresholds::new(vec![ColorThreshold {
            value: 3.0,
            color: css::GREEN,
        }]);
        let spec = CalendarHeatMapSpec::new(
            date(2023, 1, 1),
            date(2023, 1, 14),
            vec![
                DayValue {
                    date: date(2023, 1, 2),
                    value: 1.0,
                },
                DayValue {
                    date: date(2023, 1, 2),
                    value: 4.0,
                },
                DayValue {
                    date: date(2023, 1, 3),
                    value: 2.0,
                },
            ],
        )
        .with_colors(thresholds)
        .with_empty_color(css::GRAY);

        let g = spec.geometry(Size::new(230.0, 380.0)).unwrap();
        assert_eq!(g.days.len(), 14);
        // Duplicate date: last value wins.
        assert_eq!(g.days[1].cell.value, 4.0);
        assert_eq!(g.days[1].fill, css::GREEN);
        assert_eq!(g.days[2].fill, css::GRAY);
        assert_eq!(g.days[0].fill, css::GRAY);
        assert!(!g.days[0].cell.observed);
    }

    #[test]
    fn grid_layout_matches_offsets() {
        let spec = CalendarHeatMapSpec::new(date(2023, 1, 1), date(2023, 1, 14), Vec::new());
        // Two weeks over 200px, seven rows over 350px.
        let g = spec.geometry(Size::new(230.0, 380.0)).unwrap();
        assert_eq!(g.day_size, Size::new(100.0, 50.0));
        assert_eq!(g.days[8].rect, Rect::new(130.0, 50.0, 230.0, 100.0));
        assert_eq!(g.weekday_ticks[0].position, Point::new(15.0, 25.0));
        assert_eq!(g.month_ticks.len(), 1);
        assert_eq!(g.month_ticks[0].label, "Jan");
        assert_eq!(g.month_ticks[0].position, Point::new(130.0, 365.0));
        let hovered = g.day_at(Point::new(150.0, 60.0)).map(|d| d.cell.date);
        assert_eq!(hovered, Some(date(2023, 1, 9)));
    }
}
