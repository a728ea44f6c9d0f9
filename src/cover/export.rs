//! Write embedded pictures out as image files.
//!
//! For an audio file named `N` and export directory `D`, the first picture
//! goes to `D/N.<ext>` and picture `i` (counting from zero) to
//! `D/N-<i>.<ext>`.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result, ResultExt};
use crate::picture::{ImageMime, Picture};

/// Target path for the picture at `index`, with the extension chosen from
/// `mime` (`jpg` when the type is not recognized).
pub fn export_path(dir: &Path, file_name: &OsStr, index: usize, mime: &str) -> PathBuf {
    let mut name = file_name.to_os_string();
    if index > 0 {
        name.push(format!("-{index}"));
    }
    name.push(".");
    name.push(ImageMime::parse(mime).extension());
    dir.join(name)
}

/// Export every picture of `audio` into `dir`, creating it as needed.
///
/// With `update_only`, a picture whose export is newer than the audio file
/// is left alone. Returns the number of files written.
pub fn export_covers(
    dir: &Path,
    audio: &Path,
    pictures: &[Picture],
    update_only: bool,
) -> Result<usize> {
    let Some(file_name) = audio.file_name() else {
        return Err(Error::io(
            audio,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };

    let mut written = 0;
    for (index, picture) in pictures.iter().enumerate() {
        let target = export_path(dir, file_name, index, picture.mime.as_str());

        if update_only && is_up_to_date(audio, &target)? {
            debug!(export = %target.display(), "Cover export is up to date, skipping");
            continue;
        }

        write_export(&target, &picture.data)?;
        debug!(export = %target.display(), bytes = picture.data.len(), "Exported cover");
        written += 1;
    }

    Ok(written)
}

/// True when `export` exists and was modified after `audio`.
fn is_up_to_date(audio: &Path, export: &Path) -> Result<bool> {
    let export_modified = match fs::metadata(export) {
        Ok(meta) => meta.modified().with_path(export)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io(export, e)),
    };
    let audio_modified = fs::metadata(audio)
        .and_then(|meta| meta.modified())
        .with_path(audio)?;

    Ok(audio_modified < export_modified)
}

fn write_export(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(target, data).with_path(target)
}
