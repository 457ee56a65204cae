//! Drawing primitives and the generator that builds them from a profile

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::defaults::{
    BAR_HALF_WIDTH, BAR_WEIGHT, CONNECTOR_WEIGHT, DELTA_LABEL_OFFSET, LABEL_PAD_PX, SEGMENT_Z,
};
use super::frame::Frame;
use crate::model::{Level, PlotDescriptor, Profile};
use crate::types::{Colour, Rect};

/// Stroke pattern of a segment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Which edge of the text box sits on the anchor vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Which edge of the text box sits on the anchor horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// What a label annotates. Only delta labels are moved by the relaxer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    LevelName,
    LevelValue,
    Delta,
}

/// A straight line in data coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
    pub style: LineStyle,
    pub colour: Colour,
    /// Line weight in points
    pub weight: f64,
    pub z_order: u8,
}

/// A text annotation in data coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub anchor: DVec2,
    pub text: String,
    pub colour: Colour,
    pub valign: VAlign,
    pub halign: HAlign,
    pub background: Option<Colour>,
    pub kind: LabelKind,
    /// Measured extent, attached by the probe.
    pub bbox: Option<Rect>,
}

impl Label {
    pub fn is_delta(&self) -> bool {
        self.kind == LabelKind::Delta
    }

    /// The measured box laid down at the current anchor.
    ///
    /// Only meaningful once the label has been probed (anchor at the lower-left corner).
    pub fn footprint(&self) -> Rect {
        let size = self.bbox.map(|b| b.size()).unwrap_or(DVec2::ZERO);
        Rect::at(self.anchor, size)
    }
}

/// Anything that can be painted onto the canvas.
#[enum_dispatch]
pub trait Draw {
    /// Painting order; higher values are drawn on top.
    fn z_order(&self) -> u8;

    /// Append this primitive's SVG elements to `out`.
    fn draw(&self, frame: &Frame, out: &mut String) -> fmt::Result;
}

#[enum_dispatch(Draw)]
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Segment,
    Label,
}

/// Everything needed to draw one profile.
#[derive(Clone, Debug)]
pub struct Plot {
    pub descriptor: PlotDescriptor,
    pub frame: Frame,
    pub segments: Vec<Segment>,
    pub labels: Vec<Label>,
}

impl Plot {
    /// Generate bars, connectors and labels for a laid-out profile.
    pub fn new(profile: &Profile) -> Self {
        let descriptor = profile.descriptor.clone();
        let movex = (LABEL_PAD_PX / 2.0) * profile.energy_span() / descriptor.height as f64;

        let mut segments = Vec::with_capacity(profile.levels.len() * 2);
        let mut labels = Vec::with_capacity(profile.levels.len() * 3);

        for (k, level) in profile.levels.iter().enumerate() {
            segments.push(level_bar(level));
            labels.push(stacked_label(
                level,
                level.energy + movex,
                level.text.clone(),
                LabelKind::LevelName,
            ));
            labels.push(stacked_label(
                level,
                level.energy - movex,
                format!("{:.1}", level.energy),
                LabelKind::LevelValue,
            ));

            if let Some(child) = profile.levels.get(k + 1) {
                let parent = child
                    .parent_index()
                    .and_then(|p| profile.levels.get(p))
                    .unwrap_or(level);
                segments.push(connector(parent, child));
                labels.push(delta_label(parent, child));
            }
        }

        Plot {
            frame: Frame::for_profile(profile),
            descriptor,
            segments,
            labels,
        }
    }

    pub fn title(&self) -> &str {
        &self.descriptor.title
    }
}

fn level_bar(level: &Level) -> Segment {
    let x = level.xindex as f64;
    Segment {
        from: dvec2(x - BAR_HALF_WIDTH, level.energy),
        to: dvec2(x + BAR_HALF_WIDTH, level.energy),
        style: LineStyle::Solid,
        colour: level.colour,
        weight: BAR_WEIGHT,
        z_order: SEGMENT_Z,
    }
}

/// Name above the bar (`LevelName`) or value below it (`LevelValue`).
fn stacked_label(level: &Level, y: f64, text: String, kind: LabelKind) -> Label {
    let valign = match kind {
        LabelKind::LevelName => VAlign::Bottom,
        _ => VAlign::Top,
    };
    Label {
        anchor: dvec2(level.xindex as f64, y),
        text,
        colour: level.colour,
        valign,
        halign: HAlign::Center,
        background: Some(Colour::White),
        kind,
        bbox: None,
    }
}

fn connector(parent: &Level, child: &Level) -> Segment {
    Segment {
        from: dvec2(parent.xindex as f64 + BAR_HALF_WIDTH, parent.energy),
        to: dvec2(child.xindex as f64 - BAR_HALF_WIDTH, child.energy),
        style: LineStyle::Dashed,
        colour: child.colour,
        weight: CONNECTOR_WEIGHT,
        z_order: SEGMENT_Z,
    }
}

fn delta_label(parent: &Level, child: &Level) -> Label {
    let delta = child.energy - parent.energy;
    Label {
        anchor: dvec2(
            parent.xindex as f64 + DELTA_LABEL_OFFSET,
            (parent.energy + child.energy) / 2.0,
        ),
        text: format!("({delta:.1})"),
        colour: child.colour,
        valign: if delta > 0.0 { VAlign::Top } else { VAlign::Bottom },
        halign: HAlign::Left,
        background: None,
        kind: LabelKind::Delta,
        bbox: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_profile;
    use std::path::Path;

    const BRANCHED: &str = "\
Test
test.png
600, 400
hartrees, kj/mol
1
1, -100, \"1\"
2, -80, \"TS2\"
3, -105, \"Int3\"
4, -92, \"TS4\"
5, -110, \"Int5\"
6, -72, \"TS6\"
7, -120, \"Prod7\"
8, -97, \"Int 8\", 4, blue
9, -85, \"TS9\", 8, blue
10, -102, \"10\", 9, blue
11, -77, \"TS 11\", 10, blue
12, -130, \"12 + 13\", 11, blue
";

    fn plot() -> Plot {
        let profile = parse_profile("test.txt", BRANCHED, Path::new("")).unwrap();
        Plot::new(&profile)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_segment_is_reference_bar() {
        let plot = plot();
        let first = &plot.segments[0];
        assert!(approx(first.from.x, 0.835));
        assert!(approx(first.to.x, 1.165));
        assert_eq!(first.from.y, 0.0);
        assert_eq!(first.to.y, 0.0);
        assert_eq!(first.style, LineStyle::Solid);
        assert_eq!(first.colour, Colour::Black);
        assert_eq!(first.weight, 3.0);
        assert_eq!(first.z_order, 1);
    }

    #[test]
    fn counts_per_level() {
        let plot = plot();
        // one bar per level plus one connector per non-root level
        assert_eq!(plot.segments.len(), 12 + 11);
        assert_eq!(plot.labels.len(), 12 * 2 + 11);
        let deltas = plot.labels.iter().filter(|l| l.is_delta()).count();
        assert_eq!(deltas, 11);
    }

    #[test]
    fn bars_are_horizontal_and_centered() {
        let plot = plot();
        let bars = plot.segments.iter().filter(|s| s.style == LineStyle::Solid);
        for bar in bars {
            assert_eq!(bar.from.y, bar.to.y);
            assert!(approx(bar.to.x - bar.from.x, 2.0 * BAR_HALF_WIDTH));
            let center = (bar.from.x + bar.to.x) / 2.0;
            assert!(approx(center, center.round()));
        }
    }

    #[test]
    fn branch_connector_starts_at_parent() {
        let plot = plot();
        // level 8 hangs off level 4 (x = 4), so its connector leaves x = 4.165
        let branch = plot
            .segments
            .iter()
            .filter(|s| s.style == LineStyle::Dashed)
            .nth(6)
            .unwrap();
        assert!(approx(branch.from.x, 4.165));
        assert!(approx(branch.to.x, 4.835));
        assert_eq!(branch.colour, Colour::Blue);
        assert_eq!(branch.weight, 1.0);
    }

    #[test]
    fn delta_label_alignment_follows_sign() {
        let plot = plot();
        let deltas: Vec<&Label> = plot.labels.iter().filter(|l| l.is_delta()).collect();
        // level 2 is above level 1: label hangs below its anchor
        assert_eq!(deltas[0].valign, VAlign::Top);
        assert_eq!(deltas[1].valign, VAlign::Bottom);
        assert!(deltas.iter().all(|l| l.halign == HAlign::Left));
        assert!(deltas.iter().all(|l| l.background.is_none()));
        assert!(approx(deltas[0].anchor.x, 1.55));
    }

    #[test]
    fn stacked_labels_straddle_bar() {
        let plot = plot();
        let name = &plot.labels[0];
        let value = &plot.labels[1];
        assert_eq!(name.kind, LabelKind::LevelName);
        assert_eq!(value.kind, LabelKind::LevelValue);
        assert_eq!(name.valign, VAlign::Bottom);
        assert_eq!(value.valign, VAlign::Top);
        assert!(name.anchor.y > 0.0 && value.anchor.y < 0.0);
        assert!(approx(name.anchor.y, -value.anchor.y));
        assert_eq!(name.background, Some(Colour::White));
    }

    #[test]
    fn unresolvable_connection_falls_back_to_previous_level() {
        let mut profile =
            parse_profile("test.txt", BRANCHED, Path::new("")).unwrap();
        profile.levels[1].connected_to = Some(0);
        profile.levels[2].connected_to = Some(99);
        let plot = Plot::new(&profile);
        let connectors: Vec<&Segment> = plot
            .segments
            .iter()
            .filter(|s| s.style == LineStyle::Dashed)
            .collect();
        assert!(approx(connectors[0].from.x, 1.165));
        assert!(approx(connectors[1].from.x, 2.165));
    }

    #[test]
    fn label_texts() {
        let plot = plot();
        let texts: Vec<&str> = plot.labels[..8].iter().map(|l| l.text.as_str()).collect();
        insta::assert_debug_snapshot!(texts, @r#"
        [
            "\"1\"",
            "0.0",
            "(52510.0)",
            "\"TS2\"",
            "52510.0",
            "(-65637.5)",
            "\"Int3\"",
            "-13127.5",
        ]
        "#);
    }
}
