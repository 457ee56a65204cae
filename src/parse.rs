//! Parse profile input files into the data model
//!
//! The first five lines form the header (title, output file, dimensions,
//! units, reference level); every following non-blank line is a level row.

use std::path::{Path, PathBuf};

use miette::SourceSpan;
use pest::Parser;

use crate::errors::{ProfileError, SourceContext};
use crate::layout::layout;
use crate::log::debug;
use crate::model::{Level, MAX_TEXT_LEN, OutputFormat, PlotDescriptor, Profile};
use crate::render::check_format;
use crate::types::{Colour, Unit};
use crate::validate::{check_files_exist, is_int, is_positive_int, parse_float};
use crate::{ProfileParser, Rule};

/// Number of header lines before the level rows.
pub const HEADER_LINES: usize = 5;

/// Dots per inch used when the dimensions line gives only a width and height.
pub const DEFAULT_DPI: u32 = 1200;

const REFERENCE_LINE: usize = 4;

/// A trimmed input line and where it sits in the source text.
#[derive(Clone, Copy, Debug)]
struct SourceLine<'a> {
    text: &'a str,
    span: SourceSpan,
}

fn source_lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in source.split_inclusive('\n') {
        let content = raw.trim_end_matches(['\n', '\r']);
        let lead = content.len() - content.trim_start().len();
        let text = content.trim();
        lines.push(SourceLine {
            text,
            span: SourceSpan::from((offset + lead, text.len())),
        });
        offset += raw.len();
    }
    lines
}

/// Reads a file, cleaning line endings and surrounding whitespace.
pub fn read_clean_file(path: impl AsRef<Path>) -> Result<Vec<String>, ProfileError> {
    let path = path.as_ref();
    let source =
        std::fs::read_to_string(path).map_err(|e| ProfileError::file_access(path, e))?;
    Ok(source_lines(&source)
        .into_iter()
        .map(|line| line.text.to_string())
        .collect())
}

/// Split a row into its comma-separated fields (untrimmed).
pub fn split_fields(line: &str) -> Result<Vec<&str>, ProfileError> {
    let pairs = ProfileParser::parse(Rule::row, line).map_err(|e| {
        ProfileError::format(format!("cannot split `{line}`: {}", e.variant.message()))
    })?;
    Ok(pairs
        .flatten()
        .filter(|pair| pair.as_rule() == Rule::field)
        .map(|pair| pair.as_str())
        .collect())
}

/// Parse a complete profile source: header, level rows and layout.
///
/// `base_dir` is the directory relative output and sprite paths are resolved against.
pub fn parse_profile(name: &str, source: &str, base_dir: &Path) -> Result<Profile, miette::Report> {
    let ctx = SourceContext::new(name, source);
    let lines = source_lines(source);

    if lines.len() < HEADER_LINES {
        let end = SourceSpan::from((source.len(), 0));
        return Err(ctx
            .locate(
                end,
                ProfileError::format(format!(
                    "missing header line: expected {HEADER_LINES}, found {}",
                    lines.len()
                )),
            )
            .into());
    }

    let at = |idx: usize| {
        let span = lines[idx].span;
        let ctx = &ctx;
        move |kind: ProfileError| ctx.locate(span, kind)
    };

    let title = lines[0].text.to_string();
    let (output, format) = parse_output(lines[1].text, base_dir).map_err(at(1))?;
    let (width, height, dpi) = parse_dimensions(lines[2].text).map_err(at(2))?;
    let (in_unit, out_unit) = parse_units(lines[3].text).map_err(at(3))?;
    let reference = parse_reference(lines[REFERENCE_LINE].text).map_err(at(REFERENCE_LINE))?;

    let descriptor = PlotDescriptor {
        title,
        output,
        format,
        width,
        height,
        dpi,
        in_unit,
        out_unit,
        reference,
    };
    debug!(?descriptor, "parsed header");

    let mut levels = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(HEADER_LINES) {
        if line.text.is_empty() {
            continue;
        }
        let position = levels.len() as u32 + 1;
        levels.push(parse_entry(line.text, position, base_dir).map_err(at(idx))?);
    }

    if levels.is_empty() {
        let end = SourceSpan::from((source.len(), 0));
        return Err(ctx
            .locate(end, ProfileError::format("no energy levels after the header"))
            .into());
    }

    Ok(layout(descriptor, levels).map_err(at(REFERENCE_LINE))?)
}

/// Resolve the output path and coerce its extension to a supported format.
pub fn parse_output(line: &str, base_dir: &Path) -> Result<(PathBuf, OutputFormat), ProfileError> {
    if line.is_empty() {
        return Err(ProfileError::format("missing output filename"));
    }
    let mut output = base_dir.join(line);
    let requested = output
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string();
    let chosen = check_format(&requested)?;
    if chosen != requested {
        debug!(%requested, %chosen, "coercing output format");
        output.set_extension(&chosen);
    }
    let format = OutputFormat::from_extension(&chosen)
        .ok_or_else(|| ProfileError::format(format!("unknown file format `{chosen}`")))?;
    Ok((output, format))
}

/// Parse `W, H` or `W, H, DPI`.
pub fn parse_dimensions(line: &str) -> Result<(u32, u32, u32), ProfileError> {
    let fields = split_fields(line).map_err(|_| ProfileError::dimension(line))?;
    let values = fields
        .iter()
        .map(|f| f.trim().parse::<u32>().ok().filter(|&v| v > 0))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ProfileError::dimension(line))?;
    match values[..] {
        [width, height] => Ok((width, height, DEFAULT_DPI)),
        [width, height, dpi] => Ok((width, height, dpi)),
        _ => Err(ProfileError::dimension(line)),
    }
}

/// Parse `IN, OUT` units.
pub fn parse_units(line: &str) -> Result<(Unit, Unit), ProfileError> {
    let fields = split_fields(line).map_err(|_| ProfileError::unit(line))?;
    match fields[..] {
        [from, to] => Ok((from.parse()?, to.parse()?)),
        _ => Err(ProfileError::unit(line)),
    }
}

/// Parse the reference level index. Range is checked by the layout pass.
pub fn parse_reference(line: &str) -> Result<usize, ProfileError> {
    if is_int(line) {
        if let Ok(reference) = line.trim().parse::<usize>() {
            return Ok(reference);
        }
    }
    Err(ProfileError::format(format!(
        "Error in reference line syntax: {line}."
    )))
}

/// Parse one level row: `number, energy, text[, connected_to[, colour[, image]]]`.
///
/// `position` is the 1-based index of the row among the level rows.
pub fn parse_entry(line: &str, position: u32, base_dir: &Path) -> Result<Level, ProfileError> {
    let mut fields = split_fields(line)?;
    if !(3..=6).contains(&fields.len()) {
        return Err(ProfileError::format(format!(
            "expected 3 to 6 fields, found {} in `{line}`",
            fields.len()
        )));
    }
    fields.resize(6, "");

    let number = parse_number(fields[0])?;
    if number != position {
        return Err(ProfileError::format_with_help(
            format!("Number {number} not valid, expected {position}."),
            "level rows must be numbered 1, 2, 3... in file order; \
             a row's position is its number, so reorder or renumber the rows",
        ));
    }

    let energy = parse_float(fields[1])
        .ok_or_else(|| ProfileError::format(format!("Energy {} not valid.", fields[1].trim())))?;

    let text = fields[2]
        .chars()
        .take(MAX_TEXT_LEN)
        .collect::<String>()
        .trim()
        .to_string();

    let connected_to = match fields[3].trim() {
        "" => None,
        token => {
            let parent = parse_number(token)?;
            if parent >= number {
                return Err(ProfileError::format(format!(
                    "Level {number} cannot connect to level {parent}: connections must point to an earlier level."
                )));
            }
            Some(parent)
        }
    };

    let colour = Colour::resolve(fields[4]);

    let image = match fields[5].trim() {
        "" => None,
        token => {
            let path = base_dir.join(token);
            if !check_files_exist(&[&path]) {
                return Err(ProfileError::not_found(path));
            }
            Some(path)
        }
    };

    Ok(Level {
        number,
        connected_to,
        colour,
        energy,
        text,
        image,
        xindex: number,
    })
}

fn parse_number(token: &str) -> Result<u32, ProfileError> {
    let token = token.trim();
    if is_positive_int(token) {
        if let Ok(number) = token.parse::<u32>() {
            return Ok(number);
        }
    }
    Err(ProfileError::format(format!("Number {token} not valid.")))
}
