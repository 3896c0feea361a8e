// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget demos for `vizlet_charts`.
//!
//! Builds every widget from fixed sample data, replays a few pointer interactions against the
//! geometry, and writes an HTML report of inline SVGs. Set `RUST_LOG=debug` to see the
//! recompute summaries logged by the chart core.

mod html;
mod svg;

use std::error::Error;
use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;
use vizlet_charts::{
    BoxPlotSeries, BoxPlotSpec, CalendarHeatMapSpec, ColorThreshold, ColorThresholds, DayValue,
    DragSession, HeatDomain, HeatMapSpec, Mark, Memo, OutOfRange, PieSpec, PointEvent, Size,
    StrokeStyle, TimelineEvent, TimelineSpec, TooltipTracker, Track, ViolinPlotSpec,
    ViolinSeries, month_window,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let sections = vec![
        box_plot_demo(),
        violin_demo(),
        heat_map_demo(),
        calendar_demo()?,
        timeline_demo()?,
        pie_demo(),
        drag_demo()?,
    ];

    let html = html::render_report("Vizlet widgets demo", &sections);
    std::fs::write("vizlet_demo.html", html)?;
    log::info!("wrote {} sections", sections.len());
    println!("wrote vizlet_demo.html");
    Ok(())
}

fn render(size: Size, marks: Vec<Mark>) -> String {
    let mut scene = svg::SvgScene::default();
    scene.set_view_box(Rect::new(0.0, 0.0, size.width, size.height));
    scene.extend(marks);
    scene.to_svg_string()
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, Box<dyn Error>> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| format!("invalid date {y}-{m}-{d}").into())
}

/// Deterministic wavy samples around `center`.
fn samples(center: f64, spread: f64, n: usize, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64 + phase;
            center + spread * (t * 0.37).sin() + 0.5 * spread * (t * 1.31).cos()
        })
        .collect()
}

fn box_plot_demo() -> html::HtmlSection {
    let size = Size::new(520.0, 280.0);
    let spec = BoxPlotSpec::new(
        vec![
            BoxPlotSeries::new("control", 12.0, 31.0, 44.0, 58.0, 81.0),
            BoxPlotSeries::new("treatment", 25.0, 47.0, 60.0, 71.0, 94.0),
            BoxPlotSeries::new("placebo", 8.0, 28.0, 37.0, 52.0, 70.0),
        ],
        (0.0, 100.0),
    )
    .with_y_ticks(vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    let geometry = spec.geometry(size);

    // Replay a hover: onto the first box's lower quartile edge, up to its median, then out.
    let mut tracker = TooltipTracker::new();
    let mut description = String::from(
        "Three five-number summaries. Pointer replay (series: active tooltip entries):\n",
    );
    if let Some(b) = geometry.boxes.first() {
        let path = [
            Point::new(b.x, b.q1_y - 3.0),
            Point::new(b.x, b.q2_y),
            Point::new(b.x, b.maximum_y + 60.0),
        ];
        for pointer in path {
            if let Some((name, targets)) = geometry.pointer_targets(pointer) {
                let delta = tracker.on_pointer_move(name, pointer, &targets);
                log::debug!("hover delta {delta:?}");
            }
            describe_tooltip(&mut description, &tracker);
        }
        tracker.on_pointer_leave();
        describe_tooltip(&mut description, &tracker);
    }

    html::HtmlSection {
        title: "Box plot",
        description,
        svg: render(size, geometry.marks()),
    }
}

fn describe_tooltip(out: &mut String, tracker: &TooltipTracker) {
    let tooltip = tracker.tooltip();
    if !tooltip.is_visible() {
        out.push_str("  (hidden)\n");
        return;
    }
    let _ = write!(out, "  {}:", tooltip.name);
    for entry in &tooltip.entries {
        let _ = write!(out, " {}={}", entry.key, entry.value);
    }
    out.push('\n');
}

fn violin_demo() -> html::HtmlSection {
    let series = ["north", "south", "east"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values = samples(40.0 + 10.0 * i as f64, 15.0, 240, 7.0 * i as f64);
            let center = 40.0 + 10.0 * i as f64;
            ViolinSeries::new(*name, values)
                .with_median(center)
                .with_quartile_interval(center - 9.0, center + 9.0)
                .with_confidence_interval(center - 3.0, center + 3.0)
        })
        .collect();
    let spec = ViolinPlotSpec::new(series, (0.0, 100.0)).with_bin_number(25);

    // A resize sequence: repeated sizes hit the memo.
    let mut memo = Memo::new();
    let mut last = None;
    for width in [480.0, 480.0, 540.0, 540.0, 540.0] {
        let key = (Size::new(width, 300.0), spec.bin_number);
        let geometry = memo.get_or_compute(&key, |(size, _)| spec.geometry(*size));
        last = Some((key.0, geometry.marks()));
    }
    let description = format!(
        "Density outlines from 25 bins per series. Five resize events caused {} geometry recomputes.",
        memo.computations()
    );

    html::HtmlSection {
        title: "Violin plot",
        description,
        svg: last.map_or_else(String::new, |(size, marks)| render(size, marks)),
    }
}

fn heat_map_demo() -> html::HtmlSection {
    let size = Size::new(560.0, 320.0);
    let labels = ["temperature", "humidity", "wind", "pressure"];
    let data = vec![
        vec![1.0, -0.62, 0.18, -0.35],
        vec![-0.62, 1.0, -0.07, 0.41],
        vec![0.18, -0.07, 1.0, -0.74],
        vec![-0.35, 0.41, -0.74, 1.0],
    ];
    let spec = HeatMapSpec::new(data, labels.iter().map(ToString::to_string).collect())
        .with_domain(HeatDomain::new(-1.0, 1.0));
    let geometry = spec.geometry(size);

    let wind_pressure = geometry
        .cells
        .iter()
        .find(|c| c.column == 2 && c.row == 3)
        .map(|c| c.rect.center());
    let hovered = wind_pressure
        .and_then(|p| geometry.cell_at(p))
        .map_or_else(|| "nothing".to_string(), |c| c.label.clone());

    html::HtmlSection {
        title: "Heat map",
        description: format!(
            "A correlation matrix; long labels are truncated. Hovering wind x pressure shows {hovered}."
        ),
        svg: render(size, geometry.marks()),
    }
}

fn calendar_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let size = Size::new(620.0, 200.0);
    let (start, end) = month_window(2023, 6, 5)?;
    let data = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| d.ordinal() % 5 != 0)
        .map(|d| DayValue {
            date: d,
            value: f64::from((d.ordinal() * 37) % 11),
        })
        .collect();
    let colors = ColorThresholds::new(vec![
        ColorThreshold {
            value: 1.0,
            color: Color::from_rgb8(0x9b, 0xe9, 0xa8),
        },
        ColorThreshold {
            value: 4.0,
            color: Color::from_rgb8(0x40, 0xc4, 0x63),
        },
        ColorThreshold {
            value: 7.0,
            color: Color::from_rgb8(0x30, 0xa1, 0x4e),
        },
        ColorThreshold {
            value: 10.0,
            color: Color::from_rgb8(0x21, 0x6e, 0x39),
        },
    ]);
    let geometry = CalendarHeatMapSpec::new(start, end, data)
        .with_colors(colors)
        .geometry(size)?;

    let observed = geometry.days.iter().filter(|d| d.cell.observed).count();
    Ok(html::HtmlSection {
        title: "Calendar heat map",
        description: format!(
            "{start} to {end}: {} days, {observed} with data, thresholds inclusive.",
            geometry.days.len()
        ),
        svg: render(size, geometry.marks()),
    })
}

fn timeline_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let event = |category: &str, text: &str, color: Color, start, end| TimelineEvent {
        category: category.to_string(),
        text: text.to_string(),
        color,
        start,
        end,
    };
    let events = vec![
        event("design", "research", css::STEEL_BLUE, date(2023, 1, 9)?, date(2023, 2, 20)?),
        event("design", "prototype", css::STEEL_BLUE, date(2023, 2, 21)?, date(2023, 4, 2)?),
        event("design", "review", css::STEEL_BLUE, date(2023, 4, 10)?, date(2023, 4, 28)?),
        event("build", "backend", css::SEA_GREEN, date(2023, 3, 1)?, date(2023, 7, 15)?),
        event("build", "frontend", css::SEA_GREEN, date(2023, 4, 1)?, date(2023, 8, 1)?),
    ];
    let points = vec![
        PointEvent {
            text: "kickoff".to_string(),
            color: css::ORANGE,
            date: date(2023, 1, 3)?,
        },
        PointEvent {
            text: "beta".to_string(),
            color: css::CRIMSON,
            date: date(2023, 6, 20)?,
        },
    ];
    let geometry = TimelineSpec::new(events, points, date(2023, 9, 15)?).geometry();

    let mut description = format!("{} lanes.", geometry.lanes.len());
    if let Some(e) = geometry.lanes.first().and_then(|l| l.events.first()) {
        let center = Point::new(0.5 * (e.x1 + e.x2), geometry.lanes[0].y);
        if let Some(hit) = geometry.event_at(center) {
            let _ = write!(
                description,
                " Hovering the first lane shows {:?} ({} to {}).",
                hit.event.text, hit.event.start, hit.event.end
            );
        }
    }

    Ok(html::HtmlSection {
        title: "Timeline",
        description,
        svg: render(geometry.size, geometry.marks()),
    })
}

fn pie_demo() -> html::HtmlSection {
    let size = Size::new(420.0, 200.0);
    let bubbles = [
        (vec![3.0, 1.0, 2.0], Point::new(80.0, 100.0), 60.0),
        (vec![5.0, 5.0], Point::new(220.0, 90.0), 45.0),
        (vec![1.0, 1.0, 1.0, 4.0], Point::new(340.0, 110.0), 70.0),
    ];
    let mut marks = Vec::new();
    for (values, center, radius) in bubbles {
        marks.extend(PieSpec::new(values, center, radius).marks());
    }
    html::HtmlSection {
        title: "Bubble pies",
        description: "Slices keep input order, starting at twelve o'clock.".to_string(),
        svg: render(size, marks),
    }
}

fn drag_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let size = Size::new(360.0, 60.0);
    let track = Track::new(30.0, 300.0);
    let mut progress = DragSession::new(OutOfRange::Clamp);
    let mut slider = DragSession::new(OutOfRange::Ignore);

    let moves = [120.0, 260.0, 400.0, 200.0];
    progress.start(track, Point::new(60.0, 20.0))?;
    slider.start(track, Point::new(60.0, 40.0))?;
    let mut log_lines = String::from("pointer x: progress / slider\n");
    for x in moves {
        let p = progress.update(Point::new(x, 20.0));
        let s = slider.update(Point::new(x, 40.0));
        let _ = writeln!(log_lines, "  {x}: {p:?} / {s:?}");
    }
    let progress_value = progress.end().unwrap_or(0.0);
    let slider_value = slider.end().unwrap_or(0.0);

    let mut marks = Vec::new();
    for (y, value) in [(20.0, progress_value), (40.0, slider_value)] {
        let bar = Rect::new(track.left, y - 3.0, track.left + track.width, y + 3.0);
        marks.push(Mark::rounded_rect(bar, css::LIGHT_GRAY, 3.0, None));
        let filled = Rect::new(bar.x0, bar.y0, bar.x0 + value * track.width, bar.y1);
        marks.push(
            Mark::rounded_rect(filled, css::ROYAL_BLUE, 3.0, None)
                .with_z_index(vizlet_charts::SERIES_STROKE),
        );
        marks.push(Mark::circle((filled.x1, y), 6.0, css::WHITE));
        marks.push(
            Mark::vertical(
                filled.x1,
                y - 6.0,
                y + 6.0,
                StrokeStyle::solid(css::ROYAL_BLUE, 2.0),
            )
            .with_z_index(vizlet_charts::AXIS_RULES),
        );
    }

    Ok(html::HtmlSection {
        title: "Drag sessions",
        description: format!(
            "A clamping progress bar (top) and an out-of-range-ignoring slider (bottom) replaying the same drag.\n{log_lines}"
        ),
        svg: render(size, marks),
    })
}
