use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{named_params, Connection, Row};
use tracing::debug;
use ulid::Ulid;

use crate::config::AppConfig;
use crate::model::{ColorRecord, DeleteResult, PaletteMode, SavedPalette};
use crate::palette::Palette;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Store a snapshot of `palette` and return it with its new id.
    pub fn save_palette(&self, palette: &Palette) -> Result<SavedPalette> {
        let saved = SavedPalette {
            id: Ulid::new().to_string(),
            created_at: Utc::now(),
            mode: palette.mode(),
            colors: palette.records(),
        };
        let colors_json = serde_json::to_string(&saved.colors)?;

        self.conn.execute(
            "INSERT INTO saved_palettes (id, mode, colors, created_at)
             VALUES (:id, :mode, :colors, :created_at)",
            named_params![
                ":id": &saved.id,
                ":mode": saved.mode.as_str(),
                ":colors": colors_json,
                ":created_at": saved.created_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %saved.id, colors = saved.colors.len(), "saved palette");
        Ok(saved)
    }

    pub fn fetch_saved(&self, id: &str) -> Result<Option<SavedPalette>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, colors, created_at FROM saved_palettes WHERE id = ? LIMIT 1",
        )?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(map_saved(row)?))
        } else {
            Ok(None)
        }
    }

    /// All snapshots, newest first.
    pub fn list_saved(&self) -> Result<Vec<SavedPalette>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, colors, created_at FROM saved_palettes
             ORDER BY created_at DESC, id DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut saved = Vec::new();
        while let Some(row) = rows.next()? {
            saved.push(map_saved(row)?);
        }
        Ok(saved)
    }

    pub fn delete_saved(&self, ids: &[String]) -> Result<Vec<DeleteResult>> {
        let mut results = Vec::new();
        for id in ids {
            let affected = self.conn.execute(
                "DELETE FROM saved_palettes WHERE id = :id",
                named_params![":id": id],
            )?;
            results.push(DeleteResult {
                id: id.to_string(),
                deleted: affected > 0,
            });
        }
        Ok(results)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS saved_palettes (
                id TEXT PRIMARY KEY,
                mode TEXT NOT NULL,
                colors TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_saved_palettes_created ON saved_palettes(created_at);
            ",
        )?;
        Ok(())
    }
}

fn map_saved(row: &Row<'_>) -> Result<SavedPalette> {
    let colors: String = row.get(2)?;
    let colors: Vec<ColorRecord> =
        serde_json::from_str(&colors).context("Saved palette colors are not valid JSON")?;
    let mode: PaletteMode = row.get::<_, String>(1)?.parse()?;

    Ok(SavedPalette {
        id: row.get(0)?,
        mode,
        colors,
        created_at: parse_datetime_required(row.get::<_, String>(3)?)?,
    })
}

fn parse_datetime_required(raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::engine::{PaletteEngine, PaletteRequest, StrategyOptions};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let data_dir = dir.path().to_path_buf();
        std::fs::create_dir_all(&data_dir).expect("create data dir");
        let config = AppConfig::from_data_dir(data_dir).expect("config");
        (config, dir)
    }

    fn palette(mode: PaletteMode) -> Palette {
        let engine = PaletteEngine::new(Catalog::builtin(), StrategyOptions::default());
        let request = PaletteRequest::new(mode).with_base(1);
        engine.generate(&request, &mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn saves_and_fetches_snapshots() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        let palette = palette(PaletteMode::Monochromatic);

        let saved = db.save_palette(&palette).expect("save");
        assert_eq!(saved.colors.len(), 5);

        let fetched = db.fetch_saved(&saved.id).expect("fetch").expect("present");
        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.mode, PaletteMode::Monochromatic);
        let names: Vec<_> = fetched.colors.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names[0], "Corinthian Pink");
        assert_eq!(names[4], "Corinthian Pink Shade 4");
        assert!(db.fetch_saved("missing").expect("fetch").is_none());
    }

    #[test]
    fn lists_newest_first_and_deletes() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        let first = db.save_palette(&palette(PaletteMode::Triadic)).expect("save");
        let second = db.save_palette(&palette(PaletteMode::Tetradic)).expect("save");

        let listed = db.list_saved().expect("list");
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);
        let ids: Vec<_> = listed.iter().map(|s| s.id.clone()).collect();
        assert!(ids.contains(&first.id) && ids.contains(&second.id));

        let results = db
            .delete_saved(&[first.id.clone(), "missing".into()])
            .expect("delete");
        assert!(results[0].deleted);
        assert!(!results[1].deleted);
        assert_eq!(db.list_saved().expect("list").len(), 1);
    }

    #[test]
    fn migrations_create_only_the_palette_table() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("init db");
        let mut stmt = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .expect("prepare");
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .expect("query")
            .collect::<rusqlite::Result<_>>()
            .expect("rows");
        assert_eq!(tables, vec!["saved_palettes".to_string()]);
    }

    #[test]
    fn survives_reopen() {
        let (config, _dir) = temp_config();
        let id = {
            let db = Database::initialize(&config).expect("init db");
            db.save_palette(&palette(PaletteMode::Complementary))
                .expect("save")
                .id
        };
        let db = Database::initialize(&config).expect("reopen db");
        let fetched = db.fetch_saved(&id).expect("fetch").expect("present");
        assert_eq!(fetched.colors[1].name, "Corinthian Pink Complement");
    }
}
