//! Static tables and small geometric types.
//!
//! - [`Unit`] and the energy conversion matrix
//! - [`Colour`] and the IEC 60757 alias table
//! - [`Rect`], an axis-aligned rectangle in data coordinates

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::ProfileError;

/// Energy unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Hartrees,
    KjPerMol,
    KcalPerMol,
    Ev,
    Wavenumber,
}

impl Unit {
    /// All units, in conversion-matrix order.
    pub const ALL: [Unit; 5] = [
        Unit::Hartrees,
        Unit::KjPerMol,
        Unit::KcalPerMol,
        Unit::Ev,
        Unit::Wavenumber,
    ];

    /// Canonical spelling used in input files.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Hartrees => "hartrees",
            Unit::KjPerMol => "kj/mol",
            Unit::KcalPerMol => "kcal/mol",
            Unit::Ev => "ev",
            Unit::Wavenumber => "cm-1",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "hartrees" | "hartree" => Ok(Unit::Hartrees),
            "kj/mol" => Ok(Unit::KjPerMol),
            "kcal/mol" => Ok(Unit::KcalPerMol),
            "ev" => Ok(Unit::Ev),
            "cm-1" => Ok(Unit::Wavenumber),
            _ => Err(ProfileError::unit(s.trim())),
        }
    }
}

/// Multiplicative factors, `CONVERSION[from][to]`.
#[rustfmt::skip]
const CONVERSION: [[f64; 5]; 5] = [
    // hartrees     kj/mol     kcal/mol   ev          cm-1
    [1.0,           2625.50,   627.51,    27.212,     219474.0],
    [0.00038088,    1.0,       0.23901,   0.010364,   83.593],
    [0.0015936,     4.1840,    1.0,       0.043363,   349.75],
    [0.036749,      96.485,    23.061,    1.0,        8065.5],
    [0.0000045563,  0.011963,  0.0028591, 0.00012398, 1.0],
];

/// Convert `value` from `from` units to `to` units.
pub fn convert_units(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }
    value * CONVERSION[from.index()][to.index()]
}

/// [`convert_units`] for unit names as they appear in input files.
pub fn convert_units_str(value: f64, from: &str, to: &str) -> Result<f64, ProfileError> {
    let from: Unit = from.parse()?;
    let to: Unit = to.parse()?;
    Ok(convert_units(value, from, to))
}

/// Drawing colour, named after IEC 60757.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Colour {
    #[default]
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Cyan,
    Violet,
    Grey,
    White,
    Pink,
    DarkBlue,
    LightBlue,
    Lime,
    Magenta,
    Maroon,
    Olive,
}

/// Canonical colour and the tokens accepted for it (besides its name).
#[rustfmt::skip]
const COLOURS: [(Colour, &[&str]); 18] = [
    (Colour::Black,     &["bk"]),
    (Colour::Brown,     &["bn"]),
    (Colour::Red,       &["rd"]),
    (Colour::Orange,    &["og"]),
    (Colour::Yellow,    &["ye"]),
    (Colour::Green,     &["gn"]),
    (Colour::Blue,      &["bl"]),
    (Colour::Cyan,      &["cy"]),
    (Colour::Violet,    &["purple", "vt", "pr"]),
    (Colour::Grey,      &["gray", "gy"]),
    (Colour::White,     &["wh"]),
    (Colour::Pink,      &["pk"]),
    (Colour::DarkBlue,  &["dark blue", "db"]),
    (Colour::LightBlue, &["light blue", "lb"]),
    (Colour::Lime,      &["lm"]),
    (Colour::Magenta,   &["mg"]),
    (Colour::Maroon,    &["mr"]),
    (Colour::Olive,     &["ov"]),
];

impl Colour {
    /// Canonical name. Every canonical name is also an SVG colour keyword.
    pub fn name(self) -> &'static str {
        match self {
            Colour::Black => "black",
            Colour::Brown => "brown",
            Colour::Red => "red",
            Colour::Orange => "orange",
            Colour::Yellow => "yellow",
            Colour::Green => "green",
            Colour::Blue => "blue",
            Colour::Cyan => "cyan",
            Colour::Violet => "violet",
            Colour::Grey => "grey",
            Colour::White => "white",
            Colour::Pink => "pink",
            Colour::DarkBlue => "darkblue",
            Colour::LightBlue => "lightblue",
            Colour::Lime => "lime",
            Colour::Magenta => "magenta",
            Colour::Maroon => "maroon",
            Colour::Olive => "olive",
        }
    }

    /// Resolve a user token through the alias table. Unknown tokens give black.
    pub fn resolve(token: &str) -> Colour {
        let token = token.trim().to_lowercase();
        COLOURS
            .iter()
            .find(|(colour, aliases)| colour.name() == token || aliases.contains(&token.as_str()))
            .map(|(colour, _)| *colour)
            .unwrap_or_default()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned rectangle in data coordinates (y grows upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// Build from two opposite corners given in any order.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Rect {
            min: dvec2(x1.min(x2), y1.min(y2)),
            max: dvec2(x1.max(x2), y1.max(y2)),
        }
    }

    /// Rectangle with its lower-left corner at `origin`.
    pub fn at(origin: DVec2, size: DVec2) -> Self {
        Self::from_corners(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.max.x > other.min.x
            && other.max.x > self.min.x
            && self.max.y > other.min.y
            && other.max.y > self.min.y
    }
}

/// Overlap test on `[x1, y1, x2, y2]` rectangles whose corners may be reversed.
pub fn test_overlap(a: [f64; 4], b: [f64; 4]) -> bool {
    let a = Rect::from_corners(a[0], a[1], a[2], a[3]);
    let b = Rect::from_corners(b[0], b[1], b[2], b[3]);
    a.overlaps(&b)
}
