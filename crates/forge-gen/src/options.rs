//! Closed option sets and the field manifest that drives config editing
//!
//! Every enumerated setting is a `strum` enum whose display string is the
//! user-facing label. Configs describe their editable fields through
//! [`ConfigFields`], so front-ends render and edit them without per-field code.

use forge_core::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, VariantNames};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum CardType {
    Attack,
    Skill,
    Resource,
    Creature,
    Event,
    Location,
    Equipment,
    Clue,
    Character,
    Trap,
    Item,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum CardFont {
    Fantasy,
    #[strum(serialize = "Sci-Fi")]
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Medieval,
    Horror,
    Modern,
    Comic,
    Childlike,
    Script,
    Typing,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum CardFrame {
    Classic,
    Minimalist,
    Ornate,
    Industrial,
    Rustic,
    Cartoon,
    Parchment,
    Egyptian,
    Glass,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum CardSize {
    #[strum(serialize = "Standard (2.5x3.5)")]
    #[serde(rename = "Standard (2.5x3.5)")]
    Standard,
    #[strum(serialize = "Square (1x1)")]
    #[serde(rename = "Square (1x1)")]
    Square,
    #[strum(serialize = "Tarot (70x120mm)")]
    #[serde(rename = "Tarot (70x120mm)")]
    Tarot,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum CardFormat {
    Portrait,
    Horizontal,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum ArtStyle {
    #[strum(serialize = "Epic Fantasy")]
    #[serde(rename = "Epic Fantasy")]
    EpicFantasy,
    #[strum(serialize = "Sci-Fi")]
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Anime,
    Watercolor,
    #[strum(serialize = "Pixel Art")]
    #[serde(rename = "Pixel Art")]
    PixelArt,
    Cartoon,
    Photorealistic,
    Abstract,
    Steampunk,
    Cyberpunk,
    Horror,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum MapType {
    World,
    Continent,
    Kingdom,
    City,
    Dungeon,
    Cavern,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum MapStyle {
    Satellite,
    #[strum(serialize = "Fantasy Atlas")]
    #[serde(rename = "Fantasy Atlas")]
    FantasyAtlas,
    Parchment,
    Blueprint,
    #[strum(serialize = "Pixel Art")]
    #[serde(rename = "Pixel Art")]
    PixelArt,
    #[strum(serialize = "Sci-Fi Hologram")]
    #[serde(rename = "Sci-Fi Hologram")]
    SciFiHologram,
    #[strum(serialize = "Hand-drawn")]
    #[serde(rename = "Hand-drawn")]
    HandDrawn,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum GridType {
    #[strum(serialize = "None")]
    #[serde(rename = "None")]
    NoGrid,
    Square,
    #[strum(serialize = "Hexagonal")]
    #[serde(rename = "Hexagonal")]
    Hex,
}

/// Outline of a single map tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum MapShape {
    Square,
    Hexagon,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum Terrain {
    Grassland,
    Forest,
    Desert,
    Water,
    Mountain,
    Swamp,
    Tundra,
    Volcanic,
}

/// Image aspect ratio requested from the image model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
        }
    }

    /// Width and height parts of the ratio
    pub fn parts(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Portrait => (3, 4),
            AspectRatio::Landscape => (4, 3),
            AspectRatio::Tall => (9, 16),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card art aspect ratio for a size/format selection.
///
/// Square size wins over format, horizontal format wins over tarot size.
pub fn aspect_ratio_for(size: CardSize, format: CardFormat) -> AspectRatio {
    if size == CardSize::Square {
        AspectRatio::Square
    } else if format == CardFormat::Horizontal {
        AspectRatio::Landscape
    } else if size == CardSize::Tarot {
        AspectRatio::Tall
    } else {
        AspectRatio::Portrait
    }
}

/// How a config field is edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// One of a closed set of labels
    Choice(&'static [&'static str]),
}

/// One entry of a config's field manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
        }
    }

    pub fn choice<T: VariantNames>(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Choice(T::VARIANTS),
        }
    }
}

/// Data-driven access to a config's editable fields
pub trait ConfigFields {
    /// Field manifest, in display order
    fn fields() -> Vec<FieldSpec>;

    /// Current value of a field, rendered as its label or text
    fn field(&self, name: &str) -> Option<String>;

    /// Set a field from a string. Free-text fields accept anything; choice
    /// fields must name one of their options.
    fn set_field(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Parse a label into one of a closed set of options
pub fn parse_choice<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr + VariantNames,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ForgeError::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
            allowed: T::VARIANTS.iter().map(|s| s.to_string()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn expected_ratio(size: CardSize, format: CardFormat) -> &'static str {
        match (size, format) {
            (CardSize::Square, CardFormat::Portrait) => "1:1",
            (CardSize::Square, CardFormat::Horizontal) => "1:1",
            (CardSize::Standard, CardFormat::Portrait) => "3:4",
            (CardSize::Standard, CardFormat::Horizontal) => "4:3",
            (CardSize::Tarot, CardFormat::Portrait) => "9:16",
            (CardSize::Tarot, CardFormat::Horizontal) => "4:3",
        }
    }

    #[test]
    fn test_aspect_ratio_full_cross_product() {
        let mut checked = 0;
        for size in CardSize::iter() {
            for format in CardFormat::iter() {
                assert_eq!(
                    aspect_ratio_for(size, format).as_str(),
                    expected_ratio(size, format),
                    "size={} format={}",
                    size,
                    format
                );
                checked += 1;
            }
        }
        assert_eq!(checked, 6);
    }

    #[test]
    fn test_labels_match_display() {
        assert_eq!(CardSize::Tarot.to_string(), "Tarot (70x120mm)");
        assert_eq!(ArtStyle::EpicFantasy.to_string(), "Epic Fantasy");
        assert_eq!(MapStyle::HandDrawn.to_string(), "Hand-drawn");
        assert_eq!(GridType::Hex.to_string(), "Hexagonal");
        assert_eq!(CardType::VARIANTS.len(), 11);
        assert_eq!(CardType::VARIANTS[0], "Attack");
    }

    #[test]
    fn test_parse_choice_is_case_insensitive() {
        let font: CardFont = parse_choice("card_font", "sci-fi").unwrap();
        assert_eq!(font, CardFont::SciFi);
        let size: CardSize = parse_choice("card_size", " Square (1x1) ").unwrap();
        assert_eq!(size, CardSize::Square);
    }

    #[test]
    fn test_parse_choice_rejects_unknown() {
        let err = parse_choice::<MapType>("map_type", "Galaxy").unwrap_err();
        match err {
            ForgeError::InvalidEnumValue { field, allowed, .. } => {
                assert_eq!(field, "map_type");
                assert!(allowed.contains(&"Cavern".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&CardSize::Standard).unwrap();
        assert_eq!(json, "\"Standard (2.5x3.5)\"");
        let parsed: MapStyle = serde_json::from_str("\"Sci-Fi Hologram\"").unwrap();
        assert_eq!(parsed, MapStyle::SciFiHologram);
    }

    #[test]
    fn test_choice_spec_lists_variants() {
        let spec = FieldSpec::choice::<GridType>("grid_type", "Grid");
        assert_eq!(spec.kind, FieldKind::Choice(&["None", "Square", "Hexagonal"]));
    }
}
