//! Reaction energy profile diagrams from a compact text description.
//!
//! An input file carries a five-line header (title, output file, dimensions, units,
//! reference level) followed by one row per stationary point. [`render_file`] runs the
//! whole pipeline; the stages are also exposed on their own.

use std::fs;
use std::path::{Path, PathBuf};

use pest_derive::Parser;

pub mod errors;
pub mod layout;
mod log;
pub mod model;
pub mod parse;
pub mod render;
pub mod types;
pub mod validate;

pub use errors::{InputError, ProfileError};
pub use model::{Level, OutputFormat, PlotDescriptor, Profile};
pub use parse::{parse_profile, read_clean_file};
pub use render::{GlyphProbe, LabelProbe, Plot, Relaxation, Renderer, check_format};
pub use types::{Colour, Rect, Unit, convert_units, convert_units_str, test_overlap};
pub use validate::{check_files_exist, clean_float, is_float, is_int, is_positive_int};

#[derive(Parser)]
#[grammar = "profile.pest"]
pub struct ProfileParser;

/// Render a profile file, writing the image next to it.
///
/// Returns the path of the written image, whose extension may differ from the one
/// requested if that format is not supported.
pub fn render_file(path: impl AsRef<Path>) -> Result<PathBuf, miette::Report> {
    let path = path.as_ref();
    if !check_files_exist(&[path]) {
        return Err(ProfileError::not_found(path).into());
    }
    let source =
        fs::read_to_string(path).map_err(|e| ProfileError::file_access(path, e))?;
    let base_dir = path.parent().unwrap_or(Path::new(""));

    let profile = parse_profile(&path.display().to_string(), &source, base_dir)?;
    let mut plot = Plot::new(&profile);
    let renderer = Renderer::new(GlyphProbe::default());
    renderer.prepare(&mut plot);
    Ok(renderer.save(&plot)?)
}

/// Lay out and draw profile source text as SVG, regardless of the requested output format.
///
/// Nothing is written to disk. Sprite paths resolve against the current directory.
pub fn profile_to_svg(source: &str) -> Result<String, miette::Report> {
    let profile = parse_profile("<input>", source, Path::new(""))?;
    let mut plot = Plot::new(&profile);
    let renderer = Renderer::<GlyphProbe>::default();
    renderer.prepare(&mut plot);
    Ok(renderer.to_svg(&plot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn grammar_splits_rows() {
        let pairs = ProfileParser::parse(Rule::row, r#"8, -97, "Int, 8", 4, blue"#).unwrap();
        let fields: Vec<&str> = pairs
            .flatten()
            .filter(|p| p.as_rule() == Rule::field)
            .map(|p| p.as_str())
            .collect();
        assert_eq!(fields, vec!["8", " -97", r#" "Int, 8""#, " 4", " blue"]);
    }

    #[test]
    fn grammar_accepts_empty_fields() {
        assert!(ProfileParser::parse(Rule::row, "1,,").is_ok());
        assert!(ProfileParser::parse(Rule::row, "").is_ok());
    }

    #[test]
    fn svg_from_source() {
        let svg = profile_to_svg(
            "Simple\nout.svg\n300, 200, 100\nkcal/mol, kcal/mol\n1\n1, 0.0, \"A\"\n2, 12.5, \"TS\"\n3, -4.0, \"B\"\n",
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<title>Simple</title>"));
        assert!(svg.contains("(12.5)"));
        assert!(svg.contains("(-16.5)"));
        assert_eq!(svg.matches("<line").count(), 5);
        assert_eq!(svg.matches("<text").count(), 8);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = render_file("definitely/not/here.txt").unwrap_err();
        let kind = err.downcast_ref::<ProfileError>().unwrap();
        assert!(matches!(kind, ProfileError::FileAccess { .. }));
    }
}
