//! Write metadata and covers to audio files.

use clap::Args;
use std::io;
use std::path::PathBuf;

use crate::batch::Batch;
use crate::error::Result;
use crate::metadata::{CanonicalMetadata, CoverAction, TagEditRequest};

/// Options for the `set` subcommand
#[derive(Debug, Args)]
pub struct SetArgs {
    /// Track title
    #[arg(long)]
    pub title: Option<String>,

    /// Artist name
    #[arg(long)]
    pub artist: Option<String>,

    /// Album name
    #[arg(long)]
    pub album: Option<String>,

    /// Album artist name
    #[arg(long)]
    pub album_artist: Option<String>,

    /// Release year
    #[arg(long, value_name = "YEAR")]
    pub release_year: Option<i32>,

    /// Track number, stored as given (e.g. "2" or "2/10")
    #[arg(long, value_name = "NUMBER")]
    pub track_number: Option<String>,

    /// Import an image file (JPEG or PNG) as the front cover
    #[arg(long, value_name = "IMAGE")]
    pub cover: Option<PathBuf>,

    /// Remove the stored cover art (mutually exclusive with --cover)
    #[arg(short = 'r', long)]
    pub remove_cover: bool,

    /// Audio files or directories
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,
}

impl SetArgs {
    /// Validate the options into an edit request. Reads the cover image
    /// but never touches an audio file.
    pub fn to_request(&self) -> Result<TagEditRequest> {
        let fields = CanonicalMetadata {
            title: self.title.clone(),
            album: self.album.clone(),
            artist: self.artist.clone(),
            album_artist: self.album_artist.clone(),
            release_year: self.release_year,
            track_number: self.track_number.clone(),
        };
        let cover = CoverAction::from_options(self.cover.as_deref(), self.remove_cover)?;
        TagEditRequest::new(fields, cover)
    }
}

/// Apply the edit to every file named in `args`.
pub fn cmd_set(args: &SetArgs) -> anyhow::Result<i32> {
    let request = match args.to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(1);
        }
    };

    let mut batch = Batch::new(io::stdout().lock(), io::stderr().lock(), false);
    let outcome = batch.run(&args.paths, |path, _scope| {
        request.apply(path).map(|()| String::new())
    })?;
    Ok(outcome.exit_code())
}
