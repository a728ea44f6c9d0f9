//! Command-line interface for audio-tag.
//!
//! Printing tags is the default action; `set` writes them.

mod commands;

pub use commands::{Cli, Commands, run_command};
