//! Rasterization of the SVG document (PNG and JPEG)

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use thiserror::Error;

use super::defaults::{JPEG_QUALITY, MAX_RASTER_PIXELS};

/// Failure while turning SVG text into pixels.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("generated SVG could not be parsed: {0}")]
    Svg(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("a {width}x{height} canvas exceeds the raster limit of {} pixels", MAX_RASTER_PIXELS)]
    TooLarge { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Refuse canvases whose pixel buffer would not fit the raster limit.
pub fn check_canvas(width: u32, height: u32) -> Result<(), RasterError> {
    if u64::from(width) * u64::from(height) > MAX_RASTER_PIXELS {
        return Err(RasterError::TooLarge { width, height });
    }
    Ok(())
}

/// Draw the document one canvas pixel per SVG user unit.
fn render_pixmap(
    svg: &str,
    background: Option<tiny_skia::Color>,
) -> Result<tiny_skia::Pixmap, RasterError> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt)?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    check_canvas(width, height)?;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Pixmap { width, height })?;
    if let Some(color) = background {
        pixmap.fill(color);
    }

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// PNG on a transparent canvas.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>, RasterError> {
    render_pixmap(svg, None)?
        .encode_png()
        .map_err(|e| RasterError::Png(e.to_string()))
}

/// JPEG on a white canvas, tagged with `dpi` as its pixel density.
pub fn svg_to_jpeg(svg: &str, dpi: u32) -> Result<Vec<u8>, RasterError> {
    let pixmap = render_pixmap(svg, Some(tiny_skia::Color::WHITE))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // the canvas is opaque, so dropping alpha loses nothing
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut enc = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    enc.set_pixel_density(PixelDensity::dpi(u16::try_from(dpi).unwrap_or(u16::MAX)));
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20">
<line x1="2" y1="10" x2="38" y2="10" stroke="black" stroke-width="4"/>
</svg>"#;

    #[test]
    fn png_signature_and_size() {
        let png = svg_to_png(SVG).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (40, 20));
        // corners are untouched, hence transparent
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
    }

    #[test]
    fn jpeg_signature_and_density() {
        let jpeg = svg_to_jpeg(SVG, 300).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        // JFIF APP0: units byte 1 means dots per inch
        assert_eq!(&jpeg[6..11], b"JFIF\0");
        assert_eq!(jpeg[13], 1);
        assert_eq!(u16::from_be_bytes([jpeg[14], jpeg[15]]), 300);
    }

    #[test]
    fn oversized_canvas_is_refused_before_allocating() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="60000" height="40000"/>"#;
        assert!(matches!(
            svg_to_png(svg),
            Err(RasterError::TooLarge {
                width: 60000,
                height: 40000
            })
        ));
        assert!(check_canvas(6000, 4000).is_ok());
    }

    #[test]
    fn invalid_svg_is_reported() {
        assert!(matches!(
            svg_to_png("<svg"),
            Err(RasterError::Svg(_))
        ));
    }
}
