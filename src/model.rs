//! Data model: the plot descriptor and level records

use std::path::PathBuf;

use crate::types::{Colour, Unit};

/// Maximum number of characters kept from a level label.
pub const MAX_TEXT_LEN: usize = 24;

/// Encoded output image format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Map a supported file extension to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// Header information of a profile: where and how to draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotDescriptor {
    pub title: String,
    /// Output path, with its extension matching `format`.
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    pub dpi: u32,
    pub in_unit: Unit,
    pub out_unit: Unit,
    /// 0 disables normalization, 1..=N picks the level that sits at zero.
    pub reference: usize,
}

/// One stationary point of the profile
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    /// 1-based ordinal, equal to the row position
    pub number: u32,
    /// Parent level number; `None` until the layout pass fills in the default.
    pub connected_to: Option<u32>,
    pub colour: Colour,
    /// Input units after parsing; output units, normalized, after layout.
    pub energy: f64,
    pub text: String,
    /// Decorative sprite, validated but not drawn.
    pub image: Option<PathBuf>,
    /// Horizontal column, assigned by the layout pass
    pub xindex: u32,
}

impl Level {
    /// Index of the parent record in the level list.
    ///
    /// `None` when unset, or for a `connected_to` of 0, which names no level.
    pub fn parent_index(&self) -> Option<usize> {
        self.connected_to.and_then(|n| (n as usize).checked_sub(1))
    }
}

/// A fully laid-out profile
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub descriptor: PlotDescriptor,
    pub levels: Vec<Level>,
    pub min_energy: f64,
    pub max_energy: f64,
    pub max_xindex: u32,
}

impl Profile {
    /// Height of the energy envelope.
    pub fn energy_span(&self) -> f64 {
        self.max_energy - self.min_energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(connected_to: Option<u32>) -> Level {
        Level {
            number: 3,
            connected_to,
            colour: Colour::Black,
            energy: 0.0,
            text: "\"C\"".to_string(),
            image: None,
            xindex: 3,
        }
    }

    #[test]
    fn parent_index_is_zero_based() {
        assert_eq!(level(Some(1)).parent_index(), Some(0));
        assert_eq!(level(Some(2)).parent_index(), Some(1));
        assert_eq!(level(None).parent_index(), None);
    }

    #[test]
    fn connection_to_zero_has_no_parent() {
        assert_eq!(level(Some(0)).parent_index(), None);
    }
}
