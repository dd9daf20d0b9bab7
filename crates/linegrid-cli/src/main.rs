mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use linegrid_config::Config;
use linegrid_engine::{Document, SharedDocument};

/// Config file settings with command-line overrides applied.
fn settings(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) => {
            let path = Config::expand_path(path);
            let loaded = Config::load_from_path(&path)?;
            if loaded.is_none() {
                log::warn!("config file {} not found, using defaults", path.display());
            }
            loaded
        }
        None => Config::load()?,
    };
    let mut config = loaded.unwrap_or_default();
    if let Some(tab_width) = cli.tab_width {
        config.tab_width = tab_width;
    }
    config.validate()?;
    log::debug!("using {config:?}");
    Ok(config)
}

fn open(cli: &Cli, config: &Config) -> Result<SharedDocument> {
    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8", cli.file.display()))?;
    let document = Document::with_delimiters(&text, config.line_delimiters.iter().cloned())?;
    Ok(SharedDocument::new(document))
}

fn run(cli: &Cli) -> Result<String> {
    let config = settings(cli)?;
    let document = open(cli, &config)?;
    match &cli.command {
        Command::Lines => report::lines(&document),
        Command::Locate { offset } => report::locate(&document, *offset, config.tab_width),
        Command::Block {
            start_line,
            start_column,
            end_line,
            end_column,
        } => report::block(
            &document,
            (*start_line, *start_column, *end_line, *end_column),
            config.tab_width,
        ),
        Command::Range { offset, length } => report::range(&document, *offset, *length),
        Command::Multi { regions } => report::multi(&document, regions),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let output = run(&cli)?;
    print!("{output}");
    Ok(())
}
