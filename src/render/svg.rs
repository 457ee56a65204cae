//! SVG generation

use std::fmt::{self, Write};

use glam::{DVec2, dvec2};

use super::defaults::{BACKGROUND_LABEL_Z, DESCENT, FONT_FAMILY, LABEL_Z, font_px, pt_to_px};
use super::frame::Frame;
use super::primitives::{Draw, Label, LineStyle, Plot, Primitive, Segment};
use super::probe::{align_offsets, text_extent_px};

/// Dash and gap lengths per unit of line weight, in points.
const DASH_PATTERN: [f64; 2] = [3.7, 1.6];

impl Draw for Segment {
    fn z_order(&self) -> u8 {
        self.z_order
    }

    fn draw(&self, frame: &Frame, out: &mut String) -> fmt::Result {
        let from = frame.to_px(self.from);
        let to = frame.to_px(self.to);
        let width = pt_to_px(self.weight);
        write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            self.colour,
            fmt_num(width),
        )?;
        match self.style {
            LineStyle::Solid => out.push_str(r#" stroke-linecap="square""#),
            LineStyle::Dashed => write!(
                out,
                r#" stroke-linecap="butt" stroke-dasharray="{},{}""#,
                fmt_num(DASH_PATTERN[0] * width),
                fmt_num(DASH_PATTERN[1] * width),
            )?,
        }
        out.push_str("/>\n");
        Ok(())
    }
}

impl Draw for Label {
    /// Labels with a background sit below bare labels so the bare ones stay readable.
    fn z_order(&self) -> u8 {
        if self.background.is_some() {
            BACKGROUND_LABEL_Z
        } else {
            LABEL_Z
        }
    }

    fn draw(&self, frame: &Frame, out: &mut String) -> fmt::Result {
        let font = font_px();
        let (top_left, size) = label_box_px(self, frame, font);

        if let Some(background) = self.background {
            writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                fmt_num(top_left.x),
                fmt_num(top_left.y),
                fmt_num(size.x),
                fmt_num(size.y),
                background,
            )?;
        }

        let baseline = top_left.y + size.y - DESCENT * font;
        writeln!(
            out,
            r#"<text x="{}" y="{}" fill="{}" font-family="{}" font-size="{}">{}</text>"#,
            fmt_num(top_left.x),
            fmt_num(baseline),
            self.colour,
            FONT_FAMILY,
            fmt_num(font),
            escape_xml(&self.text),
        )
    }
}

/// Top-left corner and size of a label's box on the canvas.
///
/// Probed labels keep their measured size; unprobed ones are measured from the glyph table.
fn label_box_px(label: &Label, frame: &Frame, font: f64) -> (DVec2, DVec2) {
    let size = match label.bbox {
        Some(bbox) => bbox.size() * frame.scale(),
        None => text_extent_px(&label.text, font),
    };
    let anchor = frame.to_px(label.anchor);
    let offsets = align_offsets(label.halign, label.valign);
    let bottom = anchor.y + offsets.y * size.y;
    (dvec2(anchor.x - offsets.x * size.x, bottom - size.y), size)
}

/// All primitives of a plot in painting order.
///
/// Sorting is stable, so primitives of equal z keep their generation order.
pub fn primitives(plot: &Plot) -> Vec<Primitive> {
    let mut all: Vec<Primitive> = plot
        .segments
        .iter()
        .cloned()
        .map(Primitive::from)
        .chain(plot.labels.iter().cloned().map(Primitive::from))
        .collect();
    all.sort_by_key(|p| p.z_order());
    all
}

/// Serialize a plot to a standalone SVG document.
pub fn to_svg(plot: &Plot) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_document(plot, &mut out);
    out
}

fn write_document(plot: &Plot, out: &mut String) -> fmt::Result {
    let canvas = plot.frame.canvas;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt_num(canvas.x),
        h = fmt_num(canvas.y),
    )?;
    writeln!(out, "<title>{}</title>", escape_xml(plot.title()))?;
    for primitive in primitives(plot) {
        primitive.draw(&plot.frame, out)?;
    }
    out.push_str("</svg>\n");
    Ok(())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a coordinate with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
