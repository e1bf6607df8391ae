//! CLI for the itempath directory mapper.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use itempath_core::config::{self, MapperConfig};
use itempath_core::PathMapper;
use std::path::{Path, PathBuf};

use commands::{
    run_config, run_escape, run_hash, run_map, run_resolve, run_shorten, run_unescape,
};

/// Top-level CLI for itempath.
#[derive(Debug, Parser)]
#[command(name = "itempath")]
#[command(about = "itempath: map logical item paths onto length-bounded directories", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/itempath/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override max_folder_name_length from the config file.
    #[arg(long, global = true, value_name = "N")]
    pub max_folder_name_length: Option<usize>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Map a logical item path to its physical directory (creates short directories as needed).
    Map {
        /// Slash-delimited logical path, not starting with `/`.
        logical: String,
        /// Root directory the physical path lives under.
        #[arg(long)]
        root: PathBuf,
    },

    /// Escape illegal filename characters as %XX.
    Escape {
        text: String,
    },

    /// Undo %XX escaping.
    Unescape {
        text: String,
    },

    /// Print the 8-character short name for a string.
    Hash {
        text: String,
    },

    /// Print the short directory for an absolute path under a root.
    Shorten {
        /// Absolute path starting with the root.
        path: PathBuf,
        #[arg(long)]
        root: PathBuf,
    },

    /// Recover the logical item path from a physical directory.
    Resolve {
        /// Physical path previously produced by `map`.
        physical: PathBuf,
        #[arg(long)]
        root: PathBuf,
    },

    /// Show the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        run(Cli::parse())
    }
}

pub fn run(cli: Cli) -> Result<()> {
    // `hash` and `shorten` never call this, so they don't create a default
    // config file as a side effect.
    let mapper_config = || -> Result<(MapperConfig, PathBuf)> {
        let loaded = load_config(cli.config.as_deref(), cli.max_folder_name_length)?;
        tracing::debug!("loaded config: {:?}", loaded.0);
        Ok(loaded)
    };
    let mapper = || -> Result<PathMapper> { Ok(PathMapper::new(&mapper_config()?.0)?) };

    match cli.command {
        CliCommand::Map { logical, root } => run_map(&mapper()?, &logical, &root)?,
        CliCommand::Escape { text } => run_escape(&mapper()?, &text)?,
        CliCommand::Unescape { text } => run_unescape(&mapper()?, &text)?,
        CliCommand::Hash { text } => run_hash(&text)?,
        CliCommand::Shorten { path, root } => run_shorten(&path, &root)?,
        CliCommand::Resolve { physical, root } => {
            run_resolve(&mapper()?, &physical, &root)?;
        }
        CliCommand::Config => {
            let (cfg, source) = mapper_config()?;
            run_config(&cfg, &source)?;
        }
    }

    Ok(())
}

/// Read the config file, apply the command-line override, then validate.
fn load_config(
    explicit: Option<&Path>,
    max_folder_name_length: Option<usize>,
) -> Result<(MapperConfig, PathBuf)> {
    let (mut cfg, source) = match explicit {
        Some(path) => (config::read_from(path)?, path.to_path_buf()),
        None => (config::read_or_init()?, config::config_path()?),
    };
    if let Some(n) = max_folder_name_length {
        cfg.max_folder_name_length = n;
    }
    cfg.threshold()?;
    Ok((cfg, source))
}

#[cfg(test)]
mod tests;
