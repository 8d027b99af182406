use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DEFAULT_DB_NAME: &str = "palettes.sqlite3";
static DEFAULT_CATALOG_NAME: &str = "colors.json";
static ENV_DATA_DIR: &str = "SANZO_DATA_DIR";
static ENV_CATALOG: &str = "SANZO_CATALOG";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "sanzo", "sanzo"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    db_path: PathBuf,
    catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Construct [`AppConfig`] by resolving the data directory and catalog file using the
    /// provided overrides, environment variables, and platform defaults.
    pub fn discover(
        data_dir_override: Option<PathBuf>,
        catalog_override: Option<PathBuf>,
    ) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory at {}", data_dir.display())
            })?;
        }
        let catalog_path =
            resolve_catalog_path(catalog_override, env::var(ENV_CATALOG).ok(), &data_dir);
        Ok(Self::from_data_dir(data_dir)?.with_catalog_path(catalog_path))
    }

    /// Construct [`AppConfig`] directly from a resolved data directory.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        let db_path = data_dir.join(DEFAULT_DB_NAME);
        Ok(Self {
            data_dir,
            db_path,
            catalog_path: None,
        })
    }

    pub fn with_catalog_path(mut self, catalog_path: Option<PathBuf>) -> Self {
        self.catalog_path = catalog_path;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Catalog file to load; `None` means the built-in sample colors.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}

fn resolve_catalog_path(
    catalog_override: Option<PathBuf>,
    env_catalog: Option<String>,
    data_dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = catalog_override {
        return Some(path);
    }

    if let Some(env_path) = env_catalog {
        return Some(PathBuf::from(env_path));
    }

    let bundled = data_dir.join(DEFAULT_CATALOG_NAME);
    bundled.exists().then_some(bundled)
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(env_dir));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-sanzo");
        return Ok(dev_dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(base) = BaseDirs::new() {
            return Ok(base.home_dir().join(".sanzo"));
        }
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(".sanzo"));
    }

    Ok(env::current_dir()?.join(".sanzo"))
}
