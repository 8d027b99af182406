use std::fmt;
use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use sanzo_core::generator::PaletteGenerator;
use sanzo_core::palette::Palette;
use sanzo_core::services::{PalettesService, SavedSummary};
use tracing::debug;

use crate::catalog::{Catalog, CatalogSource};
use crate::cli::{CliCommand, DeleteArgs, GenerateArgs, OutputArgs, ShowArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::engine::PaletteRequest;
use crate::export;
use crate::model::DeleteResult;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Generate(args) => handle_generate(config, &args, &mut writer),
        CliCommand::Save(args) => handle_save(config, &args, &mut writer),
        CliCommand::Saved => handle_saved(config, &mut writer),
        CliCommand::Show(args) => handle_show(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::Catalog => handle_catalog(config, &mut writer),
    }
}

fn handle_generate<W: Write>(config: &AppConfig, args: &GenerateArgs, mut writer: W) -> Result<()> {
    let service = PalettesService::new(config.clone())?;
    let palette = generate(&service, args)?;
    emit(&palette, &args.output, &mut writer)
}

fn handle_save<W: Write>(config: &AppConfig, args: &GenerateArgs, mut writer: W) -> Result<()> {
    let service = PalettesService::new(config.clone())?;
    let palette = generate(&service, args)?;
    let saved = service.save(&palette)?;
    emit(&palette, &args.output, &mut writer)?;
    writeln!(writer, "Saved palette {}", saved.id)?;
    Ok(())
}

fn handle_saved<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let service = PalettesService::new(config.clone())?;
    let saved = service.list_saved()?;
    if saved.is_empty() {
        writeln!(writer, "No saved palettes")?;
        return Ok(());
    }
    for palette in &saved {
        writeln!(writer, "{}", SavedLine(SavedSummary::from(palette)))?;
    }
    Ok(())
}

fn handle_show<W: Write>(config: &AppConfig, args: &ShowArgs, mut writer: W) -> Result<()> {
    let service = PalettesService::new(config.clone())?;
    let saved = service
        .fetch_saved(&args.id)?
        .ok_or_else(|| anyhow!("No saved palette with id '{}'", args.id))?;
    let rendered = export::render_records(&saved.colors, args.output.format)?;
    write_rendered(&rendered, saved.colors.len(), &args.output, &mut writer)
}

fn handle_delete<W: Write>(config: &AppConfig, args: &DeleteArgs, mut writer: W) -> Result<()> {
    let results = core_commands::delete_saved_palettes(config, &args.ids)?;
    let summary = DeleteSummary::from_results(&results);
    summary.write_to(&mut writer)?;
    Ok(())
}

fn handle_catalog<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let service = PalettesService::new(config.clone())?;
    writeln!(
        writer,
        "{}",
        SourceLine::new(service.catalog_source(), service.catalog())
    )?;
    let width = service
        .catalog()
        .entries()
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);
    for (index, entry) in service.catalog().entries().iter().enumerate() {
        writeln!(
            writer,
            "{:>4}  {:<width$}  {}  combinations: {:?}",
            index,
            entry.name,
            entry.hex(),
            entry.combinations,
            width = width
        )?;
    }
    Ok(())
}

fn generate(service: &PalettesService, args: &GenerateArgs) -> Result<Palette> {
    let mut request = PaletteRequest::new(args.mode).with_size(args.size);
    if let Some(base) = resolve_base(service.catalog(), args)? {
        request = request.with_base(base);
    }

    let engine = service.engine(args.strategy_options());
    debug!(
        source = ?service.catalog_source(),
        colors = service.catalog().len(),
        seed = ?args.seed,
        "catalog ready"
    );
    let mut generator = match args.seed {
        Some(seed) => PaletteGenerator::seeded(engine, seed),
        None => PaletteGenerator::from_entropy(engine),
    };
    Ok(generator.generate(&request).clone())
}

fn resolve_base(catalog: &Catalog, args: &GenerateArgs) -> Result<Option<usize>> {
    if let Some(name) = &args.color {
        let index = catalog
            .position_of(name)
            .ok_or_else(|| anyhow!("Unknown color '{}': see `sanzo catalog`", name))?;
        return Ok(Some(index));
    }
    Ok(args.base)
}

fn emit<W: Write>(palette: &Palette, output: &OutputArgs, writer: W) -> Result<()> {
    let rendered = export::render(palette, output.format)?;
    write_rendered(&rendered, palette.len(), output, writer)
}

fn write_rendered<W: Write>(
    rendered: &str,
    count: usize,
    output: &OutputArgs,
    mut writer: W,
) -> Result<()> {
    match &output.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write palette to {}", path.display()))?;
            writeln!(
                writer,
                "Wrote {} color{} to {}",
                count,
                if count == 1 { "" } else { "s" },
                path.display()
            )?;
        }
        None => {
            write!(writer, "{}", rendered)?;
            if !rendered.ends_with('\n') {
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

struct SavedLine(SavedSummary);

impl fmt::Display for SavedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.0;
        write!(
            f,
            "{}  {}  {:<13}  {}",
            summary.id,
            summary.created_at,
            summary.mode,
            summary.names.join(", ")
        )
    }
}

struct SourceLine<'a> {
    source: &'a CatalogSource,
    count: usize,
}

impl<'a> SourceLine<'a> {
    fn new(source: &'a CatalogSource, catalog: &Catalog) -> Self {
        Self {
            source,
            count: catalog.len(),
        }
    }
}

impl fmt::Display for SourceLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            CatalogSource::File(path) => {
                write!(f, "Catalog {} ({} colors)", path.display(), self.count)
            }
            CatalogSource::Builtin => write!(f, "Built-in sample catalog ({} colors)", self.count),
        }
    }
}

struct DeleteSummary {
    deleted: usize,
    missing: Vec<String>,
}

impl DeleteSummary {
    fn from_results(results: &[DeleteResult]) -> Self {
        let mut deleted = 0usize;
        let mut missing = Vec::new();
        for result in results {
            if result.deleted {
                deleted += 1;
            } else {
                missing.push(result.id.clone());
            }
        }
        Self { deleted, missing }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", self.missing.join(", "))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => {
                write!(
                    f,
                    "Deleted {} palette{}",
                    count,
                    if *count == 1 { "" } else { "s" }
                )
            }
            SummaryLine::NoneDeleted => write!(f, "No palettes deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaletteMode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let data_dir = dir.path().to_path_buf();
        std::fs::create_dir_all(&data_dir).expect("create data dir");
        let config = AppConfig::from_data_dir(data_dir).expect("config");
        (config, dir)
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute");
        String::from_utf8(output).expect("utf8")
    }

    fn generate_args(mode: PaletteMode) -> GenerateArgs {
        GenerateArgs {
            mode,
            seed: Some(4),
            ..GenerateArgs::default()
        }
    }

    #[test]
    fn generate_complementary_as_css() {
        let (config, _dir) = temp_config();
        let mut args = generate_args(PaletteMode::Complementary);
        args.color = Some("hermosa pink".into());
        args.output.format = export::ExportFormat::Css;

        let output = run(&config, CliCommand::Generate(args));
        assert_eq!(
            output,
            "--color-1: #f9c1ce; /* Hermosa Pink */\n--color-2: #063e31; /* Hermosa Pink Complement */\n"
        );
    }

    #[rstest]
    #[case(PaletteMode::Random, 5)]
    #[case(PaletteMode::Triadic, 3)]
    #[case(PaletteMode::Tetradic, 4)]
    #[case(PaletteMode::Monochromatic, 5)]
    #[case(PaletteMode::Traditional, 1)]
    fn generate_table_lists_each_color(#[case] mode: PaletteMode, #[case] lines: usize) {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Generate(generate_args(mode)));
        let (rows, names): (Vec<_>, Vec<_>) =
            output.lines().partition(|line| line.contains("HEX #"));
        assert_eq!(rows.len(), lines);
        assert!(names.iter().all(|line| line.starts_with("    ")));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let (config, _dir) = temp_config();
        let first = run(&config, CliCommand::Generate(generate_args(PaletteMode::Random)));
        let second = run(&config, CliCommand::Generate(generate_args(PaletteMode::Random)));
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_color_name_is_an_error() {
        let (config, _dir) = temp_config();
        let mut args = generate_args(PaletteMode::Triadic);
        args.color = Some("Vantablack".into());
        let mut output = Vec::new();
        let err = execute(&config, CliCommand::Generate(args), &mut output).unwrap_err();
        assert!(err.to_string().contains("Unknown color 'Vantablack'"));
    }

    #[test]
    fn writes_json_to_file() {
        let (config, dir) = temp_config();
        let path = dir.path().join("palette.json");
        let mut args = generate_args(PaletteMode::Monochromatic);
        args.base = Some(2);
        args.size = 3;
        args.output.format = export::ExportFormat::Json;
        args.output.output = Some(path.clone());

        let output = run(&config, CliCommand::Generate(args));
        assert!(output.starts_with("Wrote 3 colors to"));

        let written = std::fs::read_to_string(&path).expect("read export");
        let value: serde_json::Value = serde_json::from_str(&written).expect("json");
        let colors = value.as_array().expect("array");
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0]["name"], "Cameo Pink");
        assert_eq!(colors[2]["name"], "Cameo Pink Shade 2");
    }

    #[test]
    fn save_list_show_and_delete() {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Save(generate_args(PaletteMode::Triadic)));
        let id = output
            .lines()
            .last()
            .and_then(|line| line.strip_prefix("Saved palette "))
            .expect("saved id")
            .to_string();

        let listed = run(&config, CliCommand::Saved);
        assert!(listed.contains(&id));
        assert!(listed.contains("triadic"));

        let shown = run(
            &config,
            CliCommand::Show(ShowArgs {
                id: id.clone(),
                output: OutputArgs::default(),
            }),
        );
        assert_eq!(shown.lines().filter(|line| line.contains("HEX #")).count(), 3);

        let deleted = run(
            &config,
            CliCommand::Delete(DeleteArgs {
                ids: vec![id, "missing".into()],
            }),
        );
        assert!(deleted.contains("Deleted 1 palette"));
        assert!(deleted.contains("Not found: missing"));
        assert_eq!(run(&config, CliCommand::Saved), "No saved palettes\n");
    }

    #[test]
    fn delete_command_handles_no_matches() {
        let (config, _dir) = temp_config();
        let args = DeleteArgs {
            ids: vec!["missing".into()],
        };
        let output = run(&config, CliCommand::Delete(args));
        assert!(output.contains("No palettes deleted"));
    }

    #[test]
    fn catalog_lists_builtin_colors() {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Catalog);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Built-in sample catalog (5 colors)"));
        assert_eq!(lines.count(), 5);
        assert!(output.contains("Cherry Blossom Pink  #ffc0cb"));
    }
}
