//! CLI command definitions and dispatch.
//!
//! Without a subcommand the tool prints the tags of every given file
//! (`info`). Each command lives in its own submodule:
//! - `info`: print canonical metadata, optionally exporting covers
//! - `set`: write metadata and covers

mod info;
mod set;

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

pub use info::{InfoOptions, cmd_info};
pub use set::{SetArgs, cmd_set};

/// Command-line tool for audio tags.
///
/// If a path is a directory, every file directly inside it is used (not
/// recursively).
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub info: InfoArgs,

    /// Config file (default: <config dir>/audio-tag/config.toml)
    #[arg(long, global = true, env = "AUDIO_TAG_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options for printing tags
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Print info as JSON for parsing
    #[arg(short, long)]
    pub json: bool,

    /// Only write a cover export if the audio file changed since the last export
    #[arg(short = 'u', long)]
    pub update_covers: bool,

    /// Export the cover art of each file (if it has one) to this directory
    #[arg(long, value_name = "DIR")]
    pub export_covers_dir: Option<PathBuf>,

    /// Audio files or directories
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write tag data to the given audio files instead of printing it
    Set(SetArgs),
}

/// Run the command described by `cli`.
///
/// Returns the process exit code.
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<i32> {
    match &cli.command {
        Some(Commands::Set(args)) => cmd_set(args),
        None if cli.info.paths.is_empty() => {
            Cli::command().print_help()?;
            Ok(0)
        }
        None => cmd_info(&cli.info.paths, &InfoOptions::resolve(&cli.info, config)),
    }
}
