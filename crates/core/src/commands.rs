use anyhow::Result;

use crate::config::AppConfig;
use crate::database::Database;
use crate::model::DeleteResult;

/// Delete the saved palettes with the provided ids and return per-id results.
pub fn delete_saved_palettes(config: &AppConfig, ids: &[String]) -> Result<Vec<DeleteResult>> {
    let database = Database::initialize(config)?;
    database.delete_saved(ids)
}
