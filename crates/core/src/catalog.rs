use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::PaletteError;
use crate::model::{Cmyk, ColorEntry, ColorRecord, Lab, Rgb};

/// Immutable, non-empty, ordered set of reference colors.
///
/// Entries are shared behind [`Arc`] so palettes can hold on to them without
/// borrowing the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Arc<ColorEntry>>,
}

impl Catalog {
    pub fn new(entries: Vec<ColorEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyCatalog);
        }
        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        })
    }

    /// The sample dictionary used whenever no catalog file can be read.
    pub fn builtin() -> Self {
        let entries = vec![
            builtin_entry(
                "Hermosa Pink",
                [249, 193, 206],
                [0, 30, 6, 0],
                [83.42717631799802, 22.136186770428026, 1.6381322957198563],
                &[176, 227, 273],
            ),
            builtin_entry(
                "Corinthian Pink",
                [248, 182, 186],
                [0, 35, 15, 0],
                [80.34637979705501, 25.369649805447466, 7.879377431906619],
                &[27, 43, 87, 97, 128, 169, 174, 206, 246, 254, 264, 342],
            ),
            builtin_entry(
                "Cameo Pink",
                [224, 179, 182],
                [10, 32, 19, 0],
                [77.21675440604257, 17.198443579766547, 4.949416342412462],
                &[101, 105, 116, 120, 165, 231],
            ),
            builtin_entry(
                "Rose Pink",
                [240, 160, 170],
                [0, 40, 20, 0],
                [75.34637979705501, 30.369649805447466, 5.879377431906619],
                &[27, 43, 87, 97, 128, 169, 174, 206, 246, 254, 264, 342],
            ),
            builtin_entry(
                "Cherry Blossom Pink",
                [255, 192, 203],
                [5, 25, 15, 0],
                [80.21675440604257, 20.198443579766547, 3.949416342412462],
                &[101, 105, 116, 120, 165, 231],
            ),
        ];
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Arc<ColorEntry>] {
        &self.entries
    }

    /// Reduce any index into `[0, len)`.
    pub fn wrap(&self, index: usize) -> usize {
        index % self.entries.len()
    }

    /// Index `offset` positions away from `base`, wrapping in both directions.
    pub fn offset(&self, base: usize, offset: isize) -> usize {
        let len = self.entries.len() as isize;
        let base = self.wrap(base) as isize;
        (base + offset).rem_euclid(len) as usize
    }

    /// Entry at `index` after wraparound. Never fails on a constructed catalog.
    pub fn wrapped(&self, index: usize) -> (usize, &Arc<ColorEntry>) {
        let index = self.wrap(index);
        (index, &self.entries[index])
    }

    /// Resolve a curator combination index, rejecting anything out of range.
    pub fn resolve(&self, index: i64) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.entries.len())
    }

    /// Case-insensitive lookup by display name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        let needle = name.trim();
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(needle))
    }
}

fn builtin_entry(
    name: &str,
    rgb: [u8; 3],
    cmyk: [u8; 4],
    lab: [f64; 3],
    combinations: &[i64],
) -> ColorEntry {
    let [r, g, b] = rgb;
    ColorEntry::new(name, Rgb::new(r, g, b))
        .with_cmyk(Cmyk(cmyk))
        .with_lab(Lab(lab))
        .with_combinations(combinations.to_vec())
        .with_swatch(0)
}

/// Japanese name of a built-in sample color. Catalog files carry none.
pub fn japanese_name(name: &str) -> Option<&'static str> {
    match name {
        "Hermosa Pink" => Some("ヘルモサピンク"),
        "Corinthian Pink" => Some("コリントピンク"),
        "Cameo Pink" => Some("カメオピンク"),
        "Rose Pink" => Some("ローズピンク"),
        "Cherry Blossom Pink" => Some("桜色"),
        _ => None,
    }
}

/// Where the catalog in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Builtin,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub source: CatalogSource,
}

/// Parse a JSON array of color records.
pub fn parse_catalog(raw: &str) -> Result<Catalog> {
    let records: Vec<ColorRecord> =
        serde_json::from_str(raw).context("Catalog is not a JSON array of color records")?;
    let entries = records.into_iter().map(normalize_record).collect();
    Ok(Catalog::new(entries)?)
}

pub fn load_from_path(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
    let catalog = parse_catalog(&raw)
        .with_context(|| format!("Failed to parse catalog at {}", path.display()))?;
    debug!(path = %path.display(), colors = catalog.len(), "loaded color catalog");
    Ok(catalog)
}

/// Load `path` when given, falling back to [`Catalog::builtin`] on any failure.
pub fn load_or_builtin(path: Option<&Path>) -> LoadedCatalog {
    let Some(path) = path else {
        debug!("no catalog file configured, using built-in sample colors");
        return builtin_loaded();
    };

    match load_from_path(path) {
        Ok(catalog) => LoadedCatalog {
            catalog,
            source: CatalogSource::File(path.to_path_buf()),
        },
        Err(err) => {
            warn!(error = %format!("{err:#}"), "using fallback sample colors");
            builtin_loaded()
        }
    }
}

fn builtin_loaded() -> LoadedCatalog {
    LoadedCatalog {
        catalog: Catalog::builtin(),
        source: CatalogSource::Builtin,
    }
}

fn normalize_record(record: ColorRecord) -> ColorEntry {
    if record.hex.is_empty() {
        return record.into();
    }
    if !record.hex_is_well_formed() {
        warn!(color = %record.name, hex = %record.hex, "ignoring malformed hex value");
    } else if !record.hex_matches_rgb() {
        warn!(
            color = %record.name,
            hex = %record.hex,
            rgb = %record.rgb,
            "hex disagrees with rgb, recomputing"
        );
    }
    record.into()
}
