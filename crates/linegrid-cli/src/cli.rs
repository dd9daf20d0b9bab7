use clap::{Parser, Subcommand};
use linegrid_engine::Region;
use std::path::PathBuf;

/// Inspect how linegrid sees a text file: its lines, offsets and selections.
#[derive(Debug, Parser)]
#[command(name = "linegrid", version)]
pub struct Cli {
    /// Visual width of a tab stop (overrides the config file)
    #[arg(short, long, env = "LINEGRID_TAB_WIDTH")]
    pub tab_width: Option<usize>,

    /// Config file to read instead of ~/.config/linegrid/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// UTF-8 text file to inspect
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the line table: number, offset, length and delimiter
    Lines,

    /// Show the line and columns of a character offset
    Locate {
        offset: usize,
    },

    /// Select a rectangle between two line/column corners
    Block {
        start_line: usize,
        start_column: usize,
        end_line: usize,
        end_column: usize,
    },

    /// Select a linear character range
    Range {
        offset: usize,
        length: usize,
    },

    /// Select several ranges at once
    Multi {
        /// Ranges written as OFFSET:LENGTH
        #[arg(required = true, value_parser = parse_region)]
        regions: Vec<Region>,
    },
}

fn parse_region(s: &str) -> Result<Region, String> {
    let (offset, length) = s
        .split_once(':')
        .ok_or_else(|| format!("expected OFFSET:LENGTH, got '{s}'"))?;
    let offset = offset
        .trim()
        .parse()
        .map_err(|e| format!("bad offset '{offset}': {e}"))?;
    let length = length
        .trim()
        .parse()
        .map_err(|e| format!("bad length '{length}': {e}"))?;
    Ok(Region::new(offset, length))
}
