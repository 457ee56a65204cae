//! Drawing tunables (data units unless noted)

/// Half the width of a level bar, in x columns.
pub const BAR_HALF_WIDTH: f64 = 0.165;
/// Horizontal offset of a delta label from the parent column.
pub const DELTA_LABEL_OFFSET: f64 = 0.55;
/// Vertical gap between a bar and its stacked labels, in pixels.
pub const LABEL_PAD_PX: f64 = 24.0;

pub const BAR_WEIGHT: f64 = 3.0;
pub const CONNECTOR_WEIGHT: f64 = 1.0;

/// Painting order: segments, then labels with a background, then bare labels.
pub const SEGMENT_Z: u8 = 1;
pub const BACKGROUND_LABEL_Z: u8 = 2;
pub const LABEL_Z: u8 = 3;

/// Upper bound on relaxer passes.
pub const MAX_PASSES: usize = 20;
/// Extra clearance added to every nudge.
pub const NUDGE_EPSILON: f64 = 0.1;

/// Pixels per inch used to size point-based quantities (font, line weights).
pub const NOMINAL_DPI: f64 = 100.0;
pub const FONT_SIZE_PT: f64 = 10.0;
pub const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";
/// Line box height, in ems.
pub const LINE_HEIGHT: f64 = 1.2;
/// Distance from the bottom of the line box to the baseline, in ems.
pub const DESCENT: f64 = 0.25;
/// Width of one hundredth-unit glyph, in ems.
pub const CHARWID: f64 = 0.08 / 0.14;

/// Subplot margins as fractions of the canvas.
pub const MARGIN_LEFT: f64 = 0.125;
pub const MARGIN_RIGHT: f64 = 0.9;
pub const MARGIN_BOTTOM: f64 = 0.11;
pub const MARGIN_TOP: f64 = 0.88;

pub const JPEG_QUALITY: u8 = 90;
/// Largest raster canvas, in pixels (256 MiB of RGBA).
pub const MAX_RASTER_PIXELS: u64 = 64 * 1024 * 1024;

/// Points to canvas pixels.
pub fn pt_to_px(pt: f64) -> f64 {
    pt * NOMINAL_DPI / 72.0
}

/// Font size in canvas pixels.
pub fn font_px() -> f64 {
    pt_to_px(FONT_SIZE_PT)
}
