// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use chrono::NaiveDate;
use kurbo::Point;
use peniko::color::palette::css;

use crate::{
    BoxPlotSeries, BoxPlotSpec, CalendarHeatMapSpec, ColorThreshold, ColorThresholds, DayValue,
    DragSession, HeatMapSpec, Mark, Memo, OutOfRange, PieSpec, PointEvent, ScaleBand,
    ScaleLinear, Size, TimelineEvent, TimelineSpec, TooltipTracker, TooltipValue, Track,
    ViolinPlotSpec, ViolinSeries, bin, build_range, month_ticks, sample_domain, sort_marks,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn box_spec() -> BoxPlotSpec {
    // Size 460x250 with the default layout gives a plot of x [30, 430], y [20, 220], so a value
    // v maps to y = 220 - 2v.
    BoxPlotSpec::new(
        vec![
            BoxPlotSeries::new("a", 10.0, 40.0, 50.0, 60.0, 90.0),
            BoxPlotSeries::new("b", 0.0, 20.0, 30.0, 45.0, 70.0),
        ],
        (0.0, 100.0),
    )
}

fn assert_finite_bounds(marks: &[Mark]) {
    for m in marks {
        if let Some(b) = m.bounds() {
            assert!(
                b.x0.is_finite() && b.y0.is_finite() && b.x1.is_finite() && b.y1.is_finite(),
                "non-finite bounds in {m:?}"
            );
        }
    }
}

#[test]
fn linear_scale_is_monotonic_and_endpoint_exact() {
    let s = ScaleLinear::new((-3.0, 7.0), (10.0, 510.0));
    assert_eq!(s.map(-3.0), 10.0);
    assert_eq!(s.map(7.0), 510.0);
    let mut prev = f64::NEG_INFINITY;
    for i in 0..=100 {
        let y = s.map(-3.0 + f64::from(i) * 0.1);
        assert!(y >= prev);
        prev = y;
    }
}

#[test]
fn degenerate_scale_returns_range_midpoint() {
    let s = ScaleLinear::new((5.0, 5.0), (0.0, 100.0));
    for x in [5.0, -1e9, 1e9, 0.0] {
        let y = s.map(x);
        assert!(y.is_finite());
        assert_eq!(y, 50.0);
    }
}

#[test]
fn band_scale_splits_range_evenly() {
    let band = ScaleBand::new(["a", "b", "c"], (0.0, 300.0)).unwrap();
    let centers: Vec<f64> = band.bands().map(|(_, b)| b.center()).collect();
    assert_eq!(centers, [50.0, 150.0, 250.0]);
    assert!(band.bands().all(|(_, b)| b.width == 100.0));
}

#[test]
fn bins_partition_the_samples() {
    let values: Vec<f64> = (0..97).map(|i| f64::from(i) * 0.37).collect();
    let domain = sample_domain(&values).unwrap();
    let bins = bin(&values, domain, 13).unwrap();
    assert_eq!(bins.len(), 13);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    for pair in bins.windows(2) {
        assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
    }
}

#[test]
fn box_plot_orders_quartiles_and_widths() {
    let g = box_spec().geometry(Size::new(460.0, 250.0));
    for b in &g.boxes {
        assert!(b.x1 < b.x && b.x < b.x2);
        assert!(b.q1_y >= b.q2_y && b.q2_y >= b.q3_y);
    }
}

#[test]
fn box_plot_hover_feeds_the_tooltip() {
    let g = box_spec().geometry(Size::new(460.0, 250.0));
    let mut tracker = TooltipTracker::new();

    // Box "a": IQR spans y 100..140, Q1 line at y 140.
    let pointer = Point::new(130.0, 137.0);
    let (name, targets) = g.pointer_targets(pointer).unwrap();
    assert_eq!(name, "a");
    let delta = tracker.on_pointer_move(name, pointer, &targets);
    let entered: Vec<&str> = delta.entered.iter().map(String::as_str).collect();
    assert_eq!(entered, ["Q1", "IQR"]);
    assert_eq!(tracker.tooltip().get("IQR").unwrap().value, TooltipValue::Single(20.0));

    let pointer = Point::new(130.0, 150.0);
    let (name, targets) = g.pointer_targets(pointer).unwrap();
    let delta = tracker.on_pointer_move(name, pointer, &targets);
    assert_eq!(delta.left.len(), 2);
    assert!(!tracker.tooltip().is_visible());

    // Moving onto the other box's median, then leaving the widget.
    let pointer = Point::new(330.0, 160.0);
    let (name, targets) = g.pointer_targets(pointer).unwrap();
    assert_eq!(name, "b");
    tracker.on_pointer_move(name, pointer, &targets);
    assert_eq!(tracker.tooltip().name, "b");
    assert!(tracker.tooltip().get("Q2").is_some());
    tracker.on_pointer_leave();
    assert!(!tracker.tooltip().is_visible());
}

#[test]
fn violin_geometry_is_memoized_on_size_and_bins() {
    let values: Vec<f64> = (0..50).map(|i| f64::from(i % 10)).collect();
    let spec = ViolinPlotSpec::new(vec![ViolinSeries::new("v", values)], (0.0, 10.0));
    let mut memo = Memo::new();

    let key = (Size::new(300.0, 200.0), spec.bin_number);
    let first = memo
        .get_or_compute(&key, |(size, _)| spec.geometry(*size))
        .clone();
    let again = memo.get_or_compute(&key, |_| unreachable!("key unchanged"));
    assert_eq!(*again, first);

    let resized = (Size::new(600.0, 200.0), spec.bin_number);
    let wider = memo.get_or_compute(&resized, |(size, _)| spec.geometry(*size));
    assert!(wider.violins[0].band.width > first.violins[0].band.width);
    assert_eq!(memo.computations(), 2);
}

#[test]
fn calendar_weeks_and_months() {
    let cells = build_range(date(2023, 1, 1), date(2023, 1, 7)).unwrap();
    assert_eq!(cells.len(), 7);
    assert!(cells.iter().all(|c| c.week_index == 0));

    let cells = build_range(date(2023, 1, 1), date(2023, 1, 8)).unwrap();
    assert_eq!(cells[6].day_of_week, 6);
    assert_eq!(cells[7].week_index, 1);

    assert_eq!(
        month_ticks(date(2023, 1, 1), date(2023, 3, 1)).unwrap(),
        [1, 2, 3]
    );
}

#[test]
fn calendar_colors_follow_thresholds() {
    let colors = ColorThresholds::new(vec![
        ColorThreshold {
            value: 1.0,
            color: css::LIGHT_GREEN,
        },
        ColorThreshold {
            value: 10.0,
            color: css::DARK_GREEN,
        },
    ]);
    let spec = CalendarHeatMapSpec::new(
        date(2023, 1, 1),
        date(2023, 1, 14),
        vec![
            DayValue {
                date: date(2023, 1, 2),
                value: 10.0,
            },
            DayValue {
                date: date(2023, 1, 3),
                value: 3.0,
            },
        ],
    )
    .with_colors(colors);
    let g = spec.geometry(Size::new(330.0, 240.0)).unwrap();
    assert_eq!(g.days.len(), 14);
    assert_eq!(g.days[1].fill, css::DARK_GREEN);
    assert_eq!(g.days[2].fill, css::LIGHT_GREEN);
    assert_eq!(g.days[0].fill, spec.empty_color);
}

#[test]
fn every_widget_lowers_to_finite_marks() {
    let size = Size::new(480.0, 260.0);
    let mut all = Vec::new();
    all.extend(box_spec().geometry(size).marks());
    all.extend(
        ViolinPlotSpec::new(
            vec![ViolinSeries::new("v", vec![1.0, 2.0, 2.0, 3.0])],
            (0.0, 4.0),
        )
        .geometry(size)
        .marks(),
    );
    all.extend(
        HeatMapSpec::new(
            vec![vec![1.0, 0.2], vec![0.2, 1.0]],
            vec!["x".to_string(), "y".to_string()],
        )
        .geometry(size)
        .marks(),
    );
    all.extend(
        CalendarHeatMapSpec::new(date(2023, 1, 1), date(2023, 3, 31), Vec::new())
            .geometry(size)
            .unwrap()
            .marks(),
    );
    all.extend(
        TimelineSpec::new(
            vec![TimelineEvent {
                category: "work".to_string(),
                text: "release".to_string(),
                color: css::STEEL_BLUE,
                start: date(2023, 2, 1),
                end: date(2023, 4, 15),
            }],
            vec![PointEvent {
                text: "launch".to_string(),
                color: css::ORANGE,
                date: date(2023, 3, 1),
            }],
            date(2023, 5, 1),
        )
        .geometry()
        .marks(),
    );
    all.extend(PieSpec::new(vec![1.0, 2.0], (50.0, 50.0), 30.0).marks());

    assert_finite_bounds(&all);
    sort_marks(&mut all);
    assert!(all.windows(2).all(|w| w[0].z_index <= w[1].z_index));
}

#[test]
fn drag_session_drives_a_slider() {
    let mut drag = DragSession::new(OutOfRange::Ignore);
    let track = Track::new(20.0, 100.0);
    let percent = |t: f64| t * 100.0;

    assert_eq!(drag.start(track, Point::new(45.0, 5.0)).map(percent), Ok(25.0));
    assert_eq!(drag.update(Point::new(70.0, 5.0)).map(percent), Some(50.0));
    assert_eq!(drag.update(Point::new(200.0, 5.0)), None);
    assert_eq!(drag.end().map(percent), Some(50.0));
}
