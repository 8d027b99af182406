use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

static HEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex regex"));

/// An sRGB triple with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub const fn channels(&self) -> [u8; 3] {
        self.0
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Per-channel `255 - c`. Applying it twice yields the original color.
    pub fn inverted(&self) -> Self {
        let [r, g, b] = self.0;
        Self([255 - r, 255 - g, 255 - b])
    }

    /// Multiply every channel by `factor`, flooring and clamping into `[0, 255]`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.map(|channel| scale_channel(channel, factor)))
    }
}

fn scale_channel(channel: u8, factor: f64) -> u8 {
    let scaled = (f64::from(channel) * factor).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{}, {}, {}", r, g, b)
    }
}

/// CMYK percentages as printed in the source dictionary. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cmyk(pub [u8; 4]);

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c, m, y, k] = self.0;
        write!(f, "{}, {}, {}, {}", c, m, y, k)
    }
}

/// CIE L*a*b* coordinates. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lab(pub [f64; 3]);

/// One named reference color from the catalog.
///
/// The hex form is always computed from [`ColorEntry::rgb`], so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorRecord", into = "ColorRecord")]
pub struct ColorEntry {
    pub name: String,
    pub rgb: Rgb,
    pub cmyk: Option<Cmyk>,
    pub lab: Option<Lab>,
    pub combinations: Vec<i64>,
    pub swatch: Option<u32>,
}

impl ColorEntry {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
            cmyk: None,
            lab: None,
            combinations: Vec::new(),
            swatch: None,
        }
    }

    pub fn with_combinations(mut self, combinations: Vec<i64>) -> Self {
        self.combinations = combinations;
        self
    }

    pub fn with_cmyk(mut self, cmyk: Cmyk) -> Self {
        self.cmyk = Some(cmyk);
        self
    }

    pub fn with_lab(mut self, lab: Lab) -> Self {
        self.lab = Some(lab);
        self
    }

    pub fn with_swatch(mut self, swatch: u32) -> Self {
        self.swatch = Some(swatch);
        self
    }

    pub fn hex(&self) -> String {
        self.rgb.hex()
    }
}

/// The JSON shape colors travel in, both in catalog files and in exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combinations: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmyk: Option<Cmyk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<Lab>,
    pub rgb: Rgb,
    #[serde(default)]
    pub hex: String,
}

impl ColorRecord {
    /// Whether the stored hex is well formed and matches the rgb channels.
    pub fn hex_matches_rgb(&self) -> bool {
        HEX_PATTERN.is_match(&self.hex) && self.hex.eq_ignore_ascii_case(&self.rgb.hex())
    }

    pub fn hex_is_well_formed(&self) -> bool {
        HEX_PATTERN.is_match(&self.hex)
    }
}

impl From<ColorRecord> for ColorEntry {
    fn from(record: ColorRecord) -> Self {
        Self {
            name: record.name,
            rgb: record.rgb,
            cmyk: record.cmyk,
            lab: record.lab,
            combinations: record.combinations,
            swatch: record.swatch,
        }
    }
}

impl From<ColorEntry> for ColorRecord {
    fn from(entry: ColorEntry) -> Self {
        let hex = entry.hex();
        Self {
            name: entry.name,
            combinations: entry.combinations,
            swatch: entry.swatch,
            cmyk: entry.cmyk,
            lab: entry.lab,
            rgb: entry.rgb,
            hex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    Random,
    Traditional,
    Analogous,
    Complementary,
    Triadic,
    Tetradic,
    Monochromatic,
}

impl PaletteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteMode::Random => "random",
            PaletteMode::Traditional => "traditional",
            PaletteMode::Analogous => "analogous",
            PaletteMode::Complementary => "complementary",
            PaletteMode::Triadic => "triadic",
            PaletteMode::Tetradic => "tetradic",
            PaletteMode::Monochromatic => "monochromatic",
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaletteMode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(PaletteMode::Random),
            "traditional" | "combination" => Ok(PaletteMode::Traditional),
            "analogous" => Ok(PaletteMode::Analogous),
            "complementary" => Ok(PaletteMode::Complementary),
            "triadic" => Ok(PaletteMode::Triadic),
            "tetradic" => Ok(PaletteMode::Tetradic),
            "monochromatic" => Ok(PaletteMode::Monochromatic),
            other => Err(PaletteError::UnknownMode(other.to_string())),
        }
    }
}

impl ValueEnum for PaletteMode {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [PaletteMode; 7] = [
            PaletteMode::Random,
            PaletteMode::Traditional,
            PaletteMode::Analogous,
            PaletteMode::Complementary,
            PaletteMode::Triadic,
            PaletteMode::Tetradic,
            PaletteMode::Monochromatic,
        ];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = clap::builder::PossibleValue::new(self.as_str());
        Some(match self {
            PaletteMode::Traditional => value.alias("combination"),
            _ => value,
        })
    }
}

/// How analogous palettes walk the catalog around the base color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum AnalogousPolicy {
    /// Window of `size` entries with the base roughly in the middle.
    Centered,
    /// `size` entries walking forward from the base.
    #[default]
    Forward,
}

/// Lightness factor schedule for monochromatic steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum ShadePolicy {
    /// `0.8 - 0.15 * step`: every step is noticeably darker than the base.
    Variation,
    /// `1 - 0.15 * step`: shades descend directly from the base color.
    #[default]
    Step,
}

impl ShadePolicy {
    pub fn factor(&self, step: usize) -> f64 {
        let step = step as f64;
        match self {
            ShadePolicy::Variation => 0.8 - step * 0.15,
            ShadePolicy::Step => 1.0 - step * 0.15,
        }
    }

    /// First step whose factor drops to zero or below. Every later step is
    /// black as well, so monochromatic palettes stop here.
    pub fn last_step(&self) -> usize {
        match self {
            ShadePolicy::Variation => 6,
            ShadePolicy::Step => 7,
        }
    }
}

/// A palette snapshot kept in the local store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedPalette {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub mode: PaletteMode,
    pub colors: Vec<ColorRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub id: String,
    pub deleted: bool,
}
