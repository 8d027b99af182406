pub mod catalog;
pub mod commands;
pub mod config;
pub mod database;
pub mod derive;
pub mod engine;
pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod palette;
pub mod services;

pub use catalog::{Catalog, CatalogSource, LoadedCatalog};
pub use commands::delete_saved_palettes;
pub use config::AppConfig;
pub use database::Database;
pub use derive::{derive_shade, find_complementary_color};
pub use engine::{PaletteEngine, PaletteRequest, StrategyOptions};
pub use error::PaletteError;
pub use export::ExportFormat;
pub use generator::PaletteGenerator;
pub use model::*;
pub use palette::{DerivedColor, Palette, PaletteColor};
pub use services::{PalettesService, SavedSummary};
