use anyhow::Result;
use tracing::debug;

use crate::catalog::{self, Catalog, CatalogSource};
use crate::config::AppConfig;
use crate::database::Database;
use crate::engine::{PaletteEngine, StrategyOptions};
use crate::model::{DeleteResult, SavedPalette};
use crate::palette::Palette;

/// Short description of a stored palette for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSummary {
    pub id: String,
    pub mode: String,
    pub created_at: String,
    pub names: Vec<String>,
}

impl From<&SavedPalette> for SavedSummary {
    fn from(saved: &SavedPalette) -> Self {
        Self {
            id: saved.id.clone(),
            mode: saved.mode.to_string(),
            created_at: saved.created_at.format("%Y-%m-%d %H:%M").to_string(),
            names: saved.colors.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PalettesService {
    config: AppConfig,
    catalog: Catalog,
    source: CatalogSource,
}

impl PalettesService {
    /// Load the configured catalog (or the built-in one). The store is only
    /// opened by the saved palette operations.
    pub fn new(config: AppConfig) -> Result<Self> {
        let loaded = catalog::load_or_builtin(config.catalog_path());
        debug!(
            data_dir = %config.data_dir().display(),
            source = ?loaded.source,
            colors = loaded.catalog.len(),
            "palette service ready"
        );
        Ok(Self {
            config,
            catalog: loaded.catalog,
            source: loaded.source,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn engine(&self, options: StrategyOptions) -> PaletteEngine {
        PaletteEngine::new(self.catalog.clone(), options)
    }

    pub fn save(&self, palette: &Palette) -> Result<SavedPalette> {
        let db = self.open_database()?;
        db.save_palette(palette)
    }

    pub fn list_saved(&self) -> Result<Vec<SavedPalette>> {
        let db = self.open_database()?;
        db.list_saved()
    }

    pub fn fetch_saved(&self, id: &str) -> Result<Option<SavedPalette>> {
        let db = self.open_database()?;
        db.fetch_saved(id)
    }

    pub fn delete_saved(&self, ids: &[String]) -> Result<Vec<DeleteResult>> {
        let db = self.open_database()?;
        db.delete_saved(ids)
    }

    fn open_database(&self) -> Result<Database> {
        Database::initialize(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PaletteRequest;
    use crate::model::PaletteMode;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn service_with_temp_dir() -> (PalettesService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        let service = PalettesService::new(config).unwrap();
        (service, temp_dir)
    }

    #[test]
    fn uses_builtin_catalog_without_a_file() {
        let (service, _guard) = service_with_temp_dir();
        assert_eq!(service.catalog_source(), &CatalogSource::Builtin);
        assert_eq!(service.catalog().len(), 5);
    }

    #[test]
    fn generating_does_not_create_the_store() {
        let (service, guard) = service_with_temp_dir();
        let request = PaletteRequest::new(PaletteMode::Triadic).with_base(2);
        let palette = service
            .engine(StrategyOptions::default())
            .generate(&request, &mut StdRng::seed_from_u64(3));
        assert_eq!(palette.len(), 3);
        assert!(!guard.path().join("palettes.sqlite3").exists());

        assert!(service.list_saved().unwrap().is_empty());
        assert!(guard.path().join("palettes.sqlite3").exists());
    }

    #[test]
    fn loads_configured_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("colors.json");
        std::fs::write(
            &path,
            r#"[{"name": "Ink", "rgb": [0, 0, 0]}, {"name": "Paper", "rgb": [250, 250, 240]}]"#,
        )
        .unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf())
            .unwrap()
            .with_catalog_path(Some(path.clone()));

        let service = PalettesService::new(config).unwrap();
        assert_eq!(service.catalog_source(), &CatalogSource::File(path));
        assert_eq!(service.catalog().len(), 2);
    }

    #[test]
    fn generates_saves_and_summarizes() {
        let (service, _guard) = service_with_temp_dir();
        let request = PaletteRequest::new(PaletteMode::Traditional).with_base(0);
        let palette = service
            .engine(StrategyOptions::default())
            .generate(&request, &mut StdRng::seed_from_u64(1));
        // Builtin combinations all point past the five sample colors.
        assert_eq!(palette.len(), 1);

        let saved = service.save(&palette).unwrap();
        let summary = SavedSummary::from(&saved);
        assert_eq!(summary.mode, "traditional");
        assert_eq!(summary.names, vec!["Hermosa Pink".to_string()]);

        assert_eq!(service.list_saved().unwrap().len(), 1);
        assert!(service.fetch_saved(&saved.id).unwrap().is_some());
        assert!(service.delete_saved(&[saved.id.clone()]).unwrap()[0].deleted);
        assert!(service.list_saved().unwrap().is_empty());
    }
}
