use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = sanzo::cli::Cli::parse();
    sanzo::logging::init_tracing(cli.log_filter.clone())?;

    let command = cli
        .command
        .clone()
        .unwrap_or_else(|| sanzo::cli::CliCommand::Generate(Default::default()));
    let config = sanzo::config::from_cli(&cli)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    sanzo::commands::execute(&config, command, &mut handle)?;

    Ok(())
}
