// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `vizlet_demo`.

use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Color;
use vizlet_charts::{Mark, MarkKind, StrokeStyle, TextAnchor, TextBaseline, sort_marks};

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: Vec<Mark>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = match (self.view_box, self.content_bounds()) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        let view_box = view_box.unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = write!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push('\n');

        let mut marks = self.marks.clone();
        sort_marks(&mut marks);

        let mut gradients = 0_usize;
        for mark in &marks {
            match &mark.kind {
                MarkKind::Rect {
                    rect,
                    fill,
                    radius,
                    stroke,
                } => {
                    write_rect(&mut out, *rect);
                    if *radius > 0.0 {
                        let _ = write!(out, r#" rx="{radius}""#);
                    }
                    write_color_attr(&mut out, "fill", *fill);
                    write_stroke(&mut out, stroke.as_ref());
                    out.push_str("/>\n");
                }
                MarkKind::GradientRect { rect, stops } => {
                    let id = format!("gradient{gradients}");
                    gradients += 1;
                    let _ = write!(
                        out,
                        r#"<defs><linearGradient id="{id}" x1="0" y1="0" x2="0" y2="1">"#
                    );
                    for (offset, color) in stops {
                        let _ = write!(out, r#"<stop offset="{offset}""#);
                        write_color_attr(&mut out, "stop-color", *color);
                        out.push_str("/>");
                    }
                    out.push_str("</linearGradient></defs>\n");
                    write_rect(&mut out, *rect);
                    let _ = writeln!(out, r#" fill="url(#{id})"/>"#);
                }
                MarkKind::Line { line, stroke } => {
                    let _ = write!(
                        out,
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                        line.p0.x, line.p0.y, line.p1.x, line.p1.y
                    );
                    write_stroke(&mut out, Some(stroke));
                    out.push_str("/>\n");
                }
                MarkKind::Path { path, fill, stroke } => {
                    let _ = write!(out, r#"<path d="{}""#, path.to_svg());
                    write_color_attr(&mut out, "fill", *fill);
                    write_stroke(&mut out, stroke.as_ref());
                    out.push_str("/>\n");
                }
                MarkKind::Circle { circle, fill } => {
                    let _ = write!(
                        out,
                        r#"<circle cx="{}" cy="{}" r="{}""#,
                        circle.center.x, circle.center.y, circle.radius
                    );
                    write_color_attr(&mut out, "fill", *fill);
                    out.push_str("/>\n");
                }
                MarkKind::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                    };
                    let _ = write!(
                        out,
                        r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    );
                    if t.angle != 0.0 {
                        let _ = write!(
                            out,
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        );
                    }
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_color_attr(&mut out, "fill", t.fill);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        for mark in &self.marks {
            let b = match &mark.kind {
                MarkKind::Text(t) => Some(estimate_text_bounds_anchored(
                    t.pos.x,
                    t.pos.y,
                    t.font_size,
                    t.anchor,
                    t.baseline,
                    &t.text,
                )),
                _ => mark.bounds(),
            };
            let Some(b) = b else { continue };
            rect = Some(rect.map_or(b, |r| r.union(b)));
        }

        rect.map(|r| {
            // Add a small padding margin.
            r.inflate(10.0, 10.0)
        })
    }
}

fn write_rect(out: &mut String, rect: Rect) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
    );
}

fn estimate_text_bounds_anchored(
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    text: &str,
) -> Rect {
    // Very rough heuristic: assume ~0.6em average glyph width.
    let glyph_w = 0.6 * font_size;
    let width = glyph_w * text.chars().count() as f64;
    let half_height = 0.5 * font_size;
    let y_midline = match baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * font_size,
        TextBaseline::Hanging => y + 0.3 * font_size,
    };
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    Rect::new(x0, y_midline - half_height, x1, y_midline + half_height)
}

fn svg_color(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

fn write_color_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_color(color);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let opacity_name = match name {
            "stop-color" => "stop-opacity",
            "fill" => "fill-opacity",
            _ => "stroke-opacity",
        };
        let _ = write!(out, r#" {opacity_name}="{o}""#);
    }
}

fn write_stroke(out: &mut String, stroke: Option<&StrokeStyle>) {
    let Some(stroke) = stroke else {
        return;
    };
    write_color_attr(out, "stroke", stroke.color);
    let _ = write!(out, r#" stroke-width="{}""#, stroke.width);
    if let Some((dash, gap)) = stroke.dash {
        let _ = write!(out, r#" stroke-dasharray="{dash} {gap}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn marks_are_written_in_z_order() {
        let mut scene = SvgScene::default();
        scene.extend([
            Mark::text((10.0, 10.0), "a<b", css::BLACK),
            Mark::rect(Rect::new(0.0, 0.0, 20.0, 20.0), css::RED),
        ]);
        let svg = scene.to_svg_string();
        let rect = svg.find("<rect").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < text);
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn dashes_and_gradients_are_emitted() {
        let mut scene = SvgScene::default();
        scene.extend([
            Mark::vertical(
                5.0,
                0.0,
                10.0,
                StrokeStyle::solid(css::BLACK, 4.0).with_dash(3.0, 3.0),
            ),
            Mark::gradient_rect(
                Rect::new(0.0, 0.0, 10.0, 50.0),
                vec![(0.0, css::RED), (1.0, css::BLUE)],
            ),
        ]);
        let svg = scene.to_svg_string();
        assert!(svg.contains(r#"stroke-dasharray="3 3""#));
        assert!(svg.contains(r##"fill="url(#gradient0)""##));
        assert!(svg.contains(r##"stop-color="#0000ff""##));
    }
}
