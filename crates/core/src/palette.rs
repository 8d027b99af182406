use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::model::{Cmyk, ColorEntry, ColorRecord, Lab, PaletteMode, Rgb};

/// A color synthesized from a catalog entry. Only the name and the channels
/// differ from the base; every other field is read through to it.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColor {
    base: Arc<ColorEntry>,
    name: String,
    rgb: Rgb,
}

impl DerivedColor {
    pub fn new(base: Arc<ColorEntry>, name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            base,
            name: name.into(),
            rgb,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

/// One slot of a generated palette.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteColor {
    /// A catalog entry, untouched.
    Original { index: usize, entry: Arc<ColorEntry> },
    /// A shade or complement computed from a catalog entry.
    Derived(DerivedColor),
}

impl PaletteColor {
    pub fn original(index: usize, entry: Arc<ColorEntry>) -> Self {
        PaletteColor::Original { index, entry }
    }

    /// The catalog entry this color is or was computed from.
    pub fn base_entry(&self) -> &Arc<ColorEntry> {
        match self {
            PaletteColor::Original { entry, .. } => entry,
            PaletteColor::Derived(derived) => &derived.base,
        }
    }

    /// Catalog position for unmodified entries.
    pub fn catalog_index(&self) -> Option<usize> {
        match self {
            PaletteColor::Original { index, .. } => Some(*index),
            PaletteColor::Derived(_) => None,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, PaletteColor::Derived(_))
    }

    pub fn name(&self) -> &str {
        match self {
            PaletteColor::Original { entry, .. } => &entry.name,
            PaletteColor::Derived(derived) => derived.name(),
        }
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            PaletteColor::Original { entry, .. } => entry.rgb,
            PaletteColor::Derived(derived) => derived.rgb(),
        }
    }

    pub fn hex(&self) -> String {
        self.rgb().hex()
    }

    pub fn cmyk(&self) -> Option<Cmyk> {
        self.base_entry().cmyk
    }

    pub fn lab(&self) -> Option<Lab> {
        self.base_entry().lab
    }

    pub fn combinations(&self) -> &[i64] {
        &self.base_entry().combinations
    }

    pub fn to_record(&self) -> ColorRecord {
        let rgb = self.rgb();
        ColorRecord {
            name: self.name().to_string(),
            combinations: self.combinations().to_vec(),
            swatch: self.base_entry().swatch,
            cmyk: self.cmyk(),
            lab: self.lab(),
            rgb,
            hex: rgb.hex(),
        }
    }
}

impl Serialize for PaletteColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// The ordered result of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    mode: PaletteMode,
    colors: Vec<PaletteColor>,
}

impl Palette {
    pub fn new(mode: PaletteMode, colors: Vec<PaletteColor>) -> Self {
        Self { mode, colors }
    }

    /// Placeholder held by a generator before its first call.
    pub fn empty(mode: PaletteMode) -> Self {
        Self::new(mode, Vec::new())
    }

    pub fn mode(&self) -> PaletteMode {
        self.mode
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteColor> {
        self.colors.iter()
    }

    pub fn records(&self) -> Vec<ColorRecord> {
        self.colors.iter().map(PaletteColor::to_record).collect()
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.colors.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteColor;
    type IntoIter = std::slice::Iter<'a, PaletteColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
