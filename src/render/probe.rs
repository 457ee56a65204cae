//! Label measurement

use glam::{DVec2, dvec2};

use super::defaults::{CHARWID, LINE_HEIGHT, font_px};
use super::frame::Frame;
use super::primitives::{HAlign, Label, VAlign};
use crate::types::Rect;

/// Measures labels in data coordinates.
pub trait LabelProbe {
    /// The label's axis-aligned box at its current anchor, honoring its alignments.
    fn measure(&self, label: &Label, frame: &Frame) -> Rect;
}

/// Proportional glyph widths for printable ASCII, in hundredths of a character cell.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Text advance in hundredths of a character cell. Non-ASCII counts as a full cell.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| match c {
            ' '..='~' => AW_CHAR[c as usize - 0x20] as u32,
            _ => 100,
        })
        .sum()
}

/// Line box of `text` in pixels at `font_px`.
pub fn text_extent_px(text: &str, font_px: f64) -> DVec2 {
    dvec2(
        text_length(text) as f64 * 0.01 * CHARWID * font_px,
        LINE_HEIGHT * font_px,
    )
}

/// Fraction of the box lying left of / below the anchor.
pub(crate) fn align_offsets(halign: HAlign, valign: VAlign) -> DVec2 {
    let fx = match halign {
        HAlign::Left => 0.0,
        HAlign::Center => 0.5,
        HAlign::Right => 1.0,
    };
    let fy = match valign {
        VAlign::Bottom => 0.0,
        VAlign::Center => 0.5,
        VAlign::Top => 1.0,
    };
    dvec2(fx, fy)
}

/// Built-in probe using the glyph width table.
#[derive(Clone, Copy, Debug)]
pub struct GlyphProbe {
    pub font_px: f64,
}

impl Default for GlyphProbe {
    fn default() -> Self {
        GlyphProbe { font_px: font_px() }
    }
}

impl LabelProbe for GlyphProbe {
    fn measure(&self, label: &Label, frame: &Frame) -> Rect {
        let size = frame.extent_to_data(text_extent_px(&label.text, self.font_px));
        let origin = label.anchor - size * align_offsets(label.halign, label.valign);
        Rect::at(origin, size)
    }
}

/// Measure every label, attach its box and re-seat its anchor on the lower-left corner.
pub fn probe_labels<P: LabelProbe + ?Sized>(labels: &mut [Label], frame: &Frame, probe: &P) {
    for label in labels {
        let bbox = probe.measure(label, frame);
        label.anchor = bbox.min;
        label.valign = VAlign::Bottom;
        label.halign = HAlign::Left;
        label.bbox = Some(bbox);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitives::LabelKind;
    use crate::types::Colour;

    fn frame() -> Frame {
        Frame::new(dvec2(600.0, 400.0), (0.0, 10.0), (0.0, 100.0))
    }

    fn label(text: &str, valign: VAlign, halign: HAlign) -> Label {
        Label {
            anchor: dvec2(5.0, 50.0),
            text: text.to_string(),
            colour: Colour::Black,
            valign,
            halign,
            background: None,
            kind: LabelKind::LevelName,
            bbox: None,
        }
    }

    #[test]
    fn glyph_widths() {
        assert_eq!(text_length(""), 0);
        assert_eq!(text_length("A"), 102);
        assert_eq!(text_length("(1.0)"), 55 + 91 + 45 + 91 + 55);
        assert_eq!(text_length("é"), 100);
    }

    #[test]
    fn longer_text_is_wider() {
        let short = text_extent_px("TS", 14.0);
        let long = text_extent_px("TS 11 long", 14.0);
        assert!(long.x > short.x);
        assert_eq!(long.y, short.y);
    }

    #[test]
    fn alignment_moves_box() {
        let probe = GlyphProbe::default();
        let frame = frame();
        let bl = probe.measure(&label("Int3", VAlign::Bottom, HAlign::Left), &frame);
        let tc = probe.measure(&label("Int3", VAlign::Top, HAlign::Center), &frame);
        assert_eq!(bl.min, dvec2(5.0, 50.0));
        assert!((tc.max.y - 50.0).abs() < 1e-9);
        assert!(((tc.min.x + tc.max.x) / 2.0 - 5.0).abs() < 1e-9);
        assert!((bl.width() - tc.width()).abs() < 1e-9);
    }

    #[test]
    fn probing_reseats_anchor() {
        let frame = frame();
        let mut labels = vec![label("(-12.5)", VAlign::Top, HAlign::Center)];
        let expected = GlyphProbe::default().measure(&labels[0], &frame);
        probe_labels(&mut labels, &frame, &GlyphProbe::default());

        let probed = &labels[0];
        assert_eq!(probed.anchor, expected.min);
        assert_eq!(probed.valign, VAlign::Bottom);
        assert_eq!(probed.halign, HAlign::Left);
        assert_eq!(probed.bbox, Some(expected));
        assert!((probed.footprint().max - expected.max).length() < 1e-9);
    }
}
