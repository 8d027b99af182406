use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::catalog;
use crate::model::ColorRecord;
use crate::palette::Palette;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Css,
}

pub fn render(palette: &Palette, format: ExportFormat) -> Result<String> {
    render_records(&palette.records(), format)
}

/// Render already snapshotted colors, e.g. a saved palette.
pub fn render_records(records: &[ColorRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Table => Ok(to_table(records)),
        ExportFormat::Json => records_to_json(records),
        ExportFormat::Css => Ok(to_css_variables(records)),
    }
}

/// Pretty printed JSON array in the catalog record shape.
pub fn to_json(palette: &Palette) -> Result<String> {
    serde_json::to_string_pretty(palette).context("Failed to serialize palette")
}

fn records_to_json(records: &[ColorRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize palette")
}

/// One `--color-N: #rrggbb; /* Name */` line per color, numbered from 1.
pub fn to_css_variables(records: &[ColorRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| format!("--color-{}: {}; /* {} */", index + 1, record.hex, record.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human readable listing with the HEX, RGB and CMYK details of each color.
/// Built-in sample colors get their Japanese name on an indented line below.
pub fn to_table(records: &[ColorRecord]) -> String {
    let width = records
        .iter()
        .map(|record| record.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (index, record) in records.iter().enumerate() {
        let cmyk = record.cmyk.unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>2}. {:<width$}  HEX {}  RGB {:<13}  CMYK {}",
            index + 1,
            record.name,
            record.hex,
            record.rgb.to_string(),
            cmyk,
            width = width
        );
        if let Some(japanese) = catalog::japanese_name(&record.name) {
            let _ = writeln!(out, "    {}", japanese);
        }
    }
    out
}
