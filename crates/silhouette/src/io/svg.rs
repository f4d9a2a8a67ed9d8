//! SVG rendering of normalized outlines.
//!
//! The document always declares a `0 0 100 100` view box with
//! `preserveAspectRatio="none"`, so the polygon stretches to whatever box the
//! consumer lays it over. Non-square sources therefore look distorted unless
//! the consumer matches the source aspect ratio.

use std::fmt::Write;

use crate::{
    error::Result,
    traits::OutlineSerializer,
    types::{NormalizedContour, OutlineDocument},
};

/// Presentation attributes embedded into the document.
///
/// Left off by default: stroke and fill normally come from the consumer's
/// stylesheet via the `outline` and `vertex` classes.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub marker_fill: String,
    pub marker_stroke: String,
    pub marker_stroke_width: f64,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            stroke: "red".to_string(),
            stroke_width: 0.5,
            marker_fill: "white".to_string(),
            marker_stroke: "black".to_string(),
            marker_stroke_width: 0.3,
        }
    }
}

/// Renders a closed `<polygon>` plus one `<circle>` marker per vertex
#[derive(Debug, Clone)]
pub struct SvgSerializer {
    pub marker_radius: f64,
    /// Decimal places for every coordinate
    pub precision: usize,
    pub style: Option<OutlineStyle>,
}

impl Default for SvgSerializer {
    fn default() -> Self {
        Self {
            marker_radius: 1.5,
            precision: 2,
            style: None,
        }
    }
}

/// Escape the five XML special characters for use inside attribute values.
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

impl SvgSerializer {
    pub fn with_style(mut self, style: OutlineStyle) -> Self {
        self.style = Some(style);
        self
    }

    fn points_attribute(&self, contour: &NormalizedContour) -> String {
        let precision = self.precision;
        contour.points
            .iter()
            .map(|p| format!("{:.*},{:.*}", precision, p.x, precision, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl OutlineSerializer for SvgSerializer {
    fn serialize(&self, contour: &NormalizedContour, width: u32, height: u32) -> Result<OutlineDocument> {
        let precision = self.precision;
        let mut out = String::new();

        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            out,
            r#"<svg width="{}" height="{}" viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg" preserveAspectRatio="none">"#,
            width, height,
        );

        let _ = write!(out, r#"  <polygon class="outline" points="{}""#, self.points_attribute(contour));
        match &self.style {
            Some(style) => {
                let _ = writeln!(
                    out,
                    r#" fill="none" stroke="{}" stroke-width="{}" vector-effect="non-scaling-stroke"/>"#,
                    xml_escape(&style.stroke), style.stroke_width,
                );
            }
            None => {
                let _ = writeln!(out, r#" vector-effect="non-scaling-stroke"/>"#);
            }
        }

        for p in &contour.points {
            let _ = write!(
                out,
                r#"  <circle class="vertex" cx="{:.*}" cy="{:.*}" r="{}""#,
                precision, p.x, precision, p.y, self.marker_radius,
            );
            match &self.style {
                Some(style) => {
                    let _ = writeln!(
                        out,
                        r#" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                        xml_escape(&style.marker_fill),
                        xml_escape(&style.marker_stroke),
                        style.marker_stroke_width,
                    );
                }
                None => {
                    let _ = writeln!(out, "/>");
                }
            }
        }

        out.push_str("</svg>\n");

        Ok(OutlineDocument {
            markup: out,
            vertex_count: contour.len(),
        })
    }
}
