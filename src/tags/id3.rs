//! ID3v2 adapter for MPEG audio.
//!
//! Fields are text frames addressed by their four-character id. ID3v2.4 text
//! frames may hold several NUL-separated values; only the first is read.
//! Pictures are independent `APIC` frames.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use lofty::TextEncoding;
use lofty::config::WriteOptions;
use lofty::id3::v2::{Frame, FrameId, Id3v2Tag, TextInformationFrame};
use lofty::picture::PictureInformation;
use lofty::tag::TagExt;
use tracing::debug;

use super::{FormatVariant, TagAdapter};
use crate::error::{Error, Result};
use crate::picture::Picture;

const ATTACHED_PICTURE: &str = "APIC";
const MULTI_VALUE_SEPARATOR: char = '\0';

#[derive(Debug)]
pub struct Id3Adapter {
    path: PathBuf,
    tag: Id3v2Tag,
    duration_secs: u64,
}

impl Id3Adapter {
    pub(crate) fn new(path: PathBuf, tag: Id3v2Tag, duration_secs: u64) -> Self {
        Self {
            path,
            tag,
            duration_secs,
        }
    }
}

fn frame_id(key: &str) -> FrameId<'static> {
    FrameId::Valid(Cow::Owned(key.to_string()))
}

impl TagAdapter for Id3Adapter {
    fn variant(&self) -> FormatVariant {
        FormatVariant::Id3
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    fn read(&self, key: &str) -> Option<String> {
        // Recording time is parsed into a timestamp frame, everything else is text
        match self.tag.get(&frame_id(key))? {
            Frame::Text(frame) => frame
                .value
                .split(MULTI_VALUE_SEPARATOR)
                .next()
                .map(str::to_string),
            Frame::Timestamp(frame) => Some(frame.timestamp.to_string()),
            _ => None,
        }
    }

    fn write(&mut self, key: &str, value: String) {
        // retain keeps the remaining frames in stored order
        self.tag.retain(|frame| frame.id_str() != key);
        self.tag.insert(Frame::Text(TextInformationFrame::new(
            frame_id(key),
            TextEncoding::UTF8,
            value,
        )));
    }

    fn read_pictures(&self) -> Vec<Picture> {
        super::from_lofty((&self.tag).into_iter().filter_map(|frame| match frame {
            Frame::Picture(apic) => Some((&apic.picture, PictureInformation::default())),
            _ => None,
        }))
    }

    fn set_picture(&mut self, picture: &Picture) -> Result<()> {
        let (picture, _) = super::to_lofty(picture)?;
        self.remove_pictures();
        self.tag.insert_picture(picture);
        Ok(())
    }

    fn remove_pictures(&mut self) {
        self.tag.retain(|frame| frame.id_str() != ATTACHED_PICTURE);
    }

    fn commit(self: Box<Self>) -> Result<()> {
        debug!(path = %self.path.display(), "Writing ID3v2 tag");
        self.tag
            .save_to_path(&self.path, WriteOptions::default())
            .map_err(|source| Error::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }
}
