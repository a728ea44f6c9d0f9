//! audio-tag - read and write tags of MP3, FLAC and Ogg files.
//!
//! Prints the canonical metadata of each given file, exports embedded
//! cover art, and edits tags and covers with the `set` subcommand.

pub mod batch;
pub mod cli;
pub mod config;
pub mod cover;
pub mod error;
pub mod metadata;
pub mod picture;
pub mod tags;
#[cfg(test)]
pub mod test_utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let level = if args.verbose {
        "audio_tag=debug"
    } else {
        "audio_tag=warn"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    let config = config::load(args.config.as_deref())?;
    let code = cli::run_command(&args, &config)?;

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
