//! Print canonical metadata for audio files.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use crate::batch::{Batch, FileScope};
use crate::config::Config;
use crate::error::Result;
use crate::metadata::{Field, TrackInfo};
use crate::{cover, tags};

use super::InfoArgs;

/// Settings for the info command, after merging flags with the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoOptions {
    pub json: bool,
    pub export_dir: Option<PathBuf>,
    pub update_only: bool,
}

impl InfoOptions {
    /// Flags win over config values.
    pub fn resolve(args: &InfoArgs, config: &Config) -> Self {
        Self {
            json: args.json || config.output.json,
            export_dir: args
                .export_covers_dir
                .clone()
                .or_else(|| config.covers.export_dir.clone()),
            update_only: args.update_covers || config.covers.update_only,
        }
    }
}

/// Print the tags of every file named by `paths`.
pub fn cmd_info(paths: &[PathBuf], options: &InfoOptions) -> anyhow::Result<i32> {
    let mut batch = Batch::new(io::stdout().lock(), io::stderr().lock(), !options.json);
    let outcome = batch.run(paths, |path, scope| describe(path, scope, options))?;
    Ok(outcome.exit_code())
}

/// Render one file's record, exporting its covers first when asked to.
pub(crate) fn describe(path: &Path, scope: FileScope, options: &InfoOptions) -> Result<String> {
    let adapter = tags::open(path)?;

    if let Some(dir) = &options.export_dir
        && scope.exports_covers()
    {
        let pictures = adapter.read_pictures();
        cover::export_covers(dir, path, &pictures, options.update_only)?;
    }

    let info = TrackInfo::from_adapter(adapter.as_ref());
    if options.json {
        let mut line = serde_json::to_string(&info)?;
        line.push('\n');
        Ok(line)
    } else {
        Ok(render_text(&info))
    }
}

/// One `key: value` line per present field, `length` as `H:MM:SS`.
pub(crate) fn render_text(info: &TrackInfo) -> String {
    let mut out = String::new();
    if let Some(file) = &info.file {
        let _ = writeln!(out, "file: {file}");
    }
    for field in Field::ALL {
        if let Some(value) = info.metadata.native_value(field) {
            let _ = writeln!(out, "{}: {value}", field.name());
        }
    }
    let _ = writeln!(out, "length: {}", format_length(info.length));
    out
}

/// Format seconds as `H:MM:SS`.
pub(crate) fn format_length(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
