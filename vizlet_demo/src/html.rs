// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of demo sections.

use std::fmt::Write as _;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; color: #333; }\n\
         section { margin-bottom: 3em; }\n\
         pre { background: #f4f6f8; padding: 0.5em; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(title));
    for section in sections {
        out.push_str("<section>\n");
        let _ = writeln!(out, "<h2>{}</h2>", escape_html(section.title));
        let _ = writeln!(out, "<pre>{}</pre>", escape_html(&section.description));
        out.push_str(&section.svg);
        out.push_str("</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
