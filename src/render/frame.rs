//! Mapping between data coordinates and canvas pixels

use glam::{DVec2, dvec2};

use super::defaults::{MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP};
use crate::model::Profile;

/// Data window laid over the plot area of a canvas.
///
/// Data y grows upward, pixel y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Canvas size in pixels
    pub canvas: DVec2,
    /// Lower-left corner of the data window
    pub data_min: DVec2,
    /// Upper-right corner of the data window
    pub data_max: DVec2,
}

impl Frame {
    /// Build a frame, widening degenerate ranges so the transform stays finite.
    pub fn new(canvas: DVec2, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        let widen = |(lo, hi): (f64, f64)| {
            if hi > lo { (lo, hi) } else { (lo - 1.0, hi + 1.0) }
        };
        let (x0, x1) = widen(x_range);
        let (y0, y1) = widen(y_range);
        Frame {
            canvas,
            data_min: dvec2(x0, y0),
            data_max: dvec2(x1, y1),
        }
    }

    /// Frame for a laid-out profile: `x ∈ [0, max_xindex + 1]`, y over the energy envelope.
    pub fn for_profile(profile: &Profile) -> Self {
        let d = &profile.descriptor;
        Self::new(
            dvec2(d.width as f64, d.height as f64),
            (0.0, profile.max_xindex as f64 + 1.0),
            (profile.min_energy, profile.max_energy),
        )
    }

    /// Top-left corner of the plot area, in pixels.
    fn area_origin(&self) -> DVec2 {
        dvec2(
            self.canvas.x * MARGIN_LEFT,
            self.canvas.y * (1.0 - MARGIN_TOP),
        )
    }

    /// Plot area size, in pixels.
    fn area_size(&self) -> DVec2 {
        dvec2(
            self.canvas.x * (MARGIN_RIGHT - MARGIN_LEFT),
            self.canvas.y * (MARGIN_TOP - MARGIN_BOTTOM),
        )
    }

    /// Pixels per data unit along each axis (both positive).
    pub fn scale(&self) -> DVec2 {
        self.area_size() / (self.data_max - self.data_min)
    }

    /// Data point to canvas pixel.
    pub fn to_px(&self, p: DVec2) -> DVec2 {
        let origin = self.area_origin();
        let scale = self.scale();
        dvec2(
            origin.x + (p.x - self.data_min.x) * scale.x,
            origin.y + (self.data_max.y - p.y) * scale.y,
        )
    }

    /// Canvas pixel to data point.
    pub fn to_data(&self, px: DVec2) -> DVec2 {
        let origin = self.area_origin();
        let scale = self.scale();
        dvec2(
            self.data_min.x + (px.x - origin.x) / scale.x,
            self.data_max.y - (px.y - origin.y) / scale.y,
        )
    }

    /// A pixel extent expressed in data units.
    pub fn extent_to_data(&self, extent: DVec2) -> DVec2 {
        extent / self.scale()
    }
}
