//! Vorbis comment adapter for FLAC and Ogg (Vorbis, Opus, Speex).
//!
//! Fields are case-insensitive `KEY=value` comments. Pictures live in the
//! multi-valued `METADATA_BLOCK_PICTURE` comment as base64 picture blocks;
//! FLAC additionally stores them as native `PICTURE` metadata blocks. Both
//! sources are merged into one ordered list when the file is opened and
//! written back together on commit.
//!
//! lofty splits a `TRACKNUMBER=n/total` comment into `TRACKNUMBER` and
//! `TRACKTOTAL` while reading. The adapter joins the two again on open, so a
//! track number reads and saves in its combined form.

use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::ogg::{OggPictureStorage, VorbisComments};
use lofty::tag::TagExt;
use tracing::debug;

use super::{FormatVariant, TagAdapter};
use crate::error::{Error, Result};
use crate::picture::Picture;

const TRACK_NUMBER: &str = "TRACKNUMBER";
const TRACK_TOTAL: &str = "TRACKTOTAL";

#[derive(Debug)]
pub struct VorbisAdapter {
    path: PathBuf,
    comments: VorbisComments,
    duration_secs: u64,
}

impl VorbisAdapter {
    pub(crate) fn new(path: PathBuf, mut comments: VorbisComments, duration_secs: u64) -> Self {
        join_track_total(&mut comments);
        Self {
            path,
            comments,
            duration_secs,
        }
    }
}

/// Fold `TRACKTOTAL` back into `TRACKNUMBER` as `n/total`.
fn join_track_total(comments: &mut VorbisComments) {
    let joined = match (comments.get(TRACK_NUMBER), comments.get(TRACK_TOTAL)) {
        (Some(number), Some(total)) if !number.contains('/') => format!("{number}/{total}"),
        _ => return,
    };
    let _ = comments.remove(TRACK_TOTAL);
    comments.insert(TRACK_NUMBER.to_string(), joined);
}

impl TagAdapter for VorbisAdapter {
    fn variant(&self) -> FormatVariant {
        FormatVariant::VorbisComment
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    fn read(&self, key: &str) -> Option<String> {
        self.comments.get(key).map(str::to_string)
    }

    fn write(&mut self, key: &str, value: String) {
        if key.eq_ignore_ascii_case(TRACK_NUMBER) {
            let _ = self.comments.remove(TRACK_TOTAL);
        }
        self.comments.insert(key.to_string(), value);
    }

    fn read_pictures(&self) -> Vec<Picture> {
        super::from_lofty(
            self.comments
                .pictures()
                .iter()
                .map(|(picture, info)| (picture, *info)),
        )
    }

    fn set_picture(&mut self, picture: &Picture) -> Result<()> {
        let (picture, info) = super::to_lofty(picture)?;
        self.remove_pictures();
        self.comments
            .insert_picture(picture, Some(info))
            .map_err(|e| Error::corrupt_picture(e.to_string()))?;
        Ok(())
    }

    fn remove_pictures(&mut self) {
        let removed = OggPictureStorage::remove_pictures(&mut self.comments);
        debug!(path = %self.path.display(), count = removed.len(), "Removed pictures");
    }

    fn commit(self: Box<Self>) -> Result<()> {
        debug!(path = %self.path.display(), "Writing Vorbis comments");
        self.comments
            .save_to_path(&self.path, WriteOptions::default())
            .map_err(|source| Error::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }
}
