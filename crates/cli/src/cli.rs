use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

use crate::engine::{StrategyOptions, DEFAULT_COMBINATION_LIMIT, DEFAULT_PALETTE_SIZE};
use crate::export::ExportFormat;
use crate::model::{AnalogousPolicy, PaletteMode, ShadePolicy};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sanzo",
    version,
    about = "Generate color palettes from Sanzo Wada's dictionary of color combinations.",
    after_help = "Examples:\n  sanzo                          Random palette of five colors\n  sanzo generate --mode triadic --color \"Cameo Pink\"\n  sanzo generate --mode monochromatic --size 6 --format css\n  sanzo save --mode traditional\n  sanzo delete 01HX..."
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON catalog to load (falls back to the built-in sample colors)
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Generate a palette and print it (default command)
    Generate(GenerateArgs),
    /// Generate a palette and keep it in the local store
    Save(GenerateArgs),
    /// List saved palettes, newest first
    Saved,
    /// Print a saved palette
    Show(ShowArgs),
    /// Delete one or more saved palettes by id
    Delete(DeleteArgs),
    /// List the colors of the loaded catalog with their index
    Catalog,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Selection strategy
    #[arg(long, value_enum, default_value_t = PaletteMode::Random)]
    pub mode: PaletteMode,

    /// Number of colors for random, analogous and monochromatic palettes
    #[arg(long, default_value_t = DEFAULT_PALETTE_SIZE, value_parser = value_parser!(usize))]
    pub size: usize,

    /// Catalog index of the base color (wrapped into range)
    #[arg(long, value_name = "INDEX", conflicts_with = "color")]
    pub base: Option<usize>,

    /// Name of the base color, case-insensitive
    #[arg(long, value_name = "NAME")]
    pub color: Option<String>,

    /// Seed for reproducible palettes
    #[arg(long, value_parser = value_parser!(u64))]
    pub seed: Option<u64>,

    /// How analogous palettes walk the catalog
    #[arg(long, value_enum, default_value_t = AnalogousPolicy::Forward)]
    pub analogous: AnalogousPolicy,

    /// Lightness schedule for monochromatic shades
    #[arg(long, value_enum, default_value_t = ShadePolicy::Step)]
    pub shade: ShadePolicy,

    /// Maximum curator combinations added to a traditional palette
    #[arg(long = "combinations", default_value_t = DEFAULT_COMBINATION_LIMIT)]
    pub combination_limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        let options = StrategyOptions::default();
        Self {
            mode: PaletteMode::Random,
            size: DEFAULT_PALETTE_SIZE,
            base: None,
            color: None,
            seed: None,
            analogous: options.analogous,
            shade: options.shade,
            combination_limit: options.combination_limit,
            output: OutputArgs::default(),
        }
    }
}

impl GenerateArgs {
    pub fn strategy_options(&self) -> StrategyOptions {
        StrategyOptions {
            analogous: self.analogous,
            shade: self.shade,
            combination_limit: self.combination_limit,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Table)]
    pub format: ExportFormat,

    /// Write the rendered palette to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Id of the saved palette (see `sanzo saved`)
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more saved palette ids to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}
