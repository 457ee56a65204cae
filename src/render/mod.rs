//! Drawing a laid-out profile
//!
//! This module is organized into submodules:
//! - `defaults`: Sizes, margins and relaxer limits
//! - `frame`: Data to pixel mapping
//! - `primitives`: Segments, labels and the generator that builds them
//! - `probe`: Label measurement
//! - `relax`: Overlap relaxation of delta labels
//! - `svg`: SVG generation
//! - `raster`: PNG and JPEG encoding

pub mod defaults;
pub mod frame;
pub mod primitives;
pub mod probe;
pub mod raster;
pub mod relax;
pub mod svg;

use std::fs;
use std::io;
use std::path::PathBuf;

pub use frame::Frame;
pub use primitives::{Draw, HAlign, Label, LabelKind, LineStyle, Plot, Primitive, Segment, VAlign};
pub use probe::{GlyphProbe, LabelProbe, probe_labels};
pub use relax::{Relaxation, fix_overlap, relax_labels};

use crate::errors::ProfileError;
use crate::log::{debug, info};
use crate::model::OutputFormat;
use raster::RasterError;

/// Output formats the renderer can write, preferred fallback first.
pub const SUPPORTED_FORMATS: [&str; 4] = ["png", "svg", "jpg", "jpeg"];

/// Validate an output file extension.
///
/// Supported extensions come back lowercased; anything else falls back to `png`.
pub fn check_format(ext: &str) -> Result<String, ProfileError> {
    let ext = ext.to_lowercase();
    if SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Ok(ext);
    }
    ["png", "svg"]
        .into_iter()
        .find(|fallback| SUPPORTED_FORMATS.contains(fallback))
        .map(str::to_string)
        .ok_or_else(|| ProfileError::format(format!("no output format available for `{ext}`")))
}

/// Drives probing, relaxation and encoding of a [`Plot`].
#[derive(Clone, Debug, Default)]
pub struct Renderer<P = GlyphProbe> {
    probe: P,
}

impl<P: LabelProbe> Renderer<P> {
    pub fn new(probe: P) -> Self {
        Renderer { probe }
    }

    /// Measure every label, re-seat its anchor and relax overlaps.
    pub fn prepare(&self, plot: &mut Plot) -> Relaxation {
        probe_labels(&mut plot.labels, &plot.frame, &self.probe);
        let outcome = relax_labels(&mut plot.labels);
        debug!(
            passes = outcome.passes,
            converged = outcome.converged,
            "prepared plot"
        );
        outcome
    }

    pub fn to_svg(&self, plot: &Plot) -> String {
        svg::to_svg(plot)
    }

    /// Encode the plot in its descriptor's output format.
    ///
    /// Raster images are `width x height` pixels; dpi is only recorded as JPEG pixel density.
    pub fn encode(&self, plot: &Plot) -> Result<Vec<u8>, ProfileError> {
        let descriptor = &plot.descriptor;
        if descriptor.format != OutputFormat::Svg {
            raster::check_canvas(descriptor.width, descriptor.height).map_err(|e| {
                ProfileError::dimension(format!("{}, {} ({e})", descriptor.width, descriptor.height))
            })?;
        }

        let svg = self.to_svg(plot);
        let encoded = match descriptor.format {
            OutputFormat::Svg => return Ok(svg.into_bytes()),
            OutputFormat::Png => raster::svg_to_png(&svg),
            OutputFormat::Jpeg => raster::svg_to_jpeg(&svg, descriptor.dpi),
        };
        encoded.map_err(|e| match e {
            RasterError::TooLarge { width, height } => {
                ProfileError::dimension(format!("{width}, {height} ({e})"))
            }
            e => ProfileError::file_access(&descriptor.output, io::Error::other(e)),
        })
    }

    /// Encode and write the plot to its output path, returning that path.
    ///
    /// Nothing is written unless encoding succeeds.
    pub fn save(&self, plot: &Plot) -> Result<PathBuf, ProfileError> {
        let bytes = self.encode(plot)?;
        let output = plot.descriptor.output.clone();
        fs::write(&output, &bytes).map_err(|e| ProfileError::file_access(&output, e))?;
        info!(path = %output.display(), bytes = bytes.len(), "wrote profile");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn supported_formats_pass_through() {
        assert_eq!(check_format("jpg").unwrap(), "jpg");
        assert_eq!(check_format("SVG").unwrap(), "svg");
        assert_eq!(check_format("jpeg").unwrap(), "jpeg");
    }

    fn plot(dimensions: &str, output: &str) -> Plot {
        let source = format!(
            "Barrier\n{output}\n{dimensions}\nkcal/mol, kcal/mol\n1\n1, 0.0, \"R\"\n2, 12.5, \"TS\"\n3, -4.0, \"P\"\n"
        );
        let profile = crate::parse_profile("barrier.txt", &source, Path::new("")).unwrap();
        let mut plot = Plot::new(&profile);
        Renderer::<GlyphProbe>::default().prepare(&mut plot);
        plot
    }

    #[test]
    fn png_has_requested_pixel_size() {
        // two dimension fields default dpi to 1200, which must not enlarge the image
        let png = Renderer::<GlyphProbe>::default()
            .encode(&plot("600, 400", "barrier.png"))
            .unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (600, 400));
    }

    #[test]
    fn jpeg_records_dpi() {
        let jpeg = Renderer::<GlyphProbe>::default()
            .encode(&plot("120, 80, 300", "barrier.jpg"))
            .unwrap();
        assert_eq!(u16::from_be_bytes([jpeg[14], jpeg[15]]), 300);
    }

    #[test]
    fn oversized_raster_is_a_dimension_error() {
        let err = Renderer::<GlyphProbe>::default()
            .encode(&plot("60000, 40000", "barrier.jpg"))
            .unwrap_err();
        assert!(matches!(err, ProfileError::Dimension { .. }));
    }

    #[test]
    fn oversized_svg_is_still_written() {
        let svg = Renderer::<GlyphProbe>::default()
            .encode(&plot("60000, 40000", "barrier.svg"))
            .unwrap();
        assert!(svg.starts_with(b"<svg"));
    }

    #[test]
    fn unsupported_format_falls_back_to_png() {
        assert_eq!(check_format("blurg").unwrap(), "png");
        assert_eq!(check_format("").unwrap(), "png");
    }
}
