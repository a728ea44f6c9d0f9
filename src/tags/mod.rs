//! Tag schema adapters.
//!
//! A file carries exactly one of two structurally different tag schemas:
//! ID3v2 frames (MPEG audio) or Vorbis comments (FLAC and Ogg). [`open`]
//! probes the container once and hands back a [`TagAdapter`] for the schema
//! it found. The adapter buffers field and picture edits in memory until
//! [`TagAdapter::commit`] persists them in a single write.
//!
//! Adapters speak native keys (`TIT2`, `TITLE`, ...). Mapping canonical
//! fields onto those keys is the job of [`crate::metadata`].
//!
//! # Pictures
//!
//! lofty parses `APIC` frames, FLAC `PICTURE` blocks and the
//! `METADATA_BLOCK_PICTURE` comment itself and drops entries it cannot read.
//! Pictures cross into and out of lofty as base64 picture-block entries, the
//! form a Vorbis comment stores them in, so both schemas share
//! [`block::encode_entry`] on the way in and [`block::decode_entries`] on the
//! way out.

pub mod id3;
pub mod probe;
pub mod vorbis;

pub use probe::open;

use std::fmt;
use std::path::Path;
use std::time::Duration;

use lofty::config::ParsingMode;
use lofty::picture::{Picture as LoftyPicture, PictureInformation};

use crate::error::{Error, Result};
use crate::picture::{Picture, block};

/// The tag schema of an opened file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVariant {
    Id3,
    VorbisComment,
}

impl fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatVariant::Id3 => f.write_str("ID3v2"),
            FormatVariant::VorbisComment => f.write_str("Vorbis comment"),
        }
    }
}

/// Read/write access to one file's tag.
pub trait TagAdapter: fmt::Debug {
    /// Schema of the underlying tag, fixed at open time.
    fn variant(&self) -> FormatVariant;

    /// Path the tag was read from and will be written back to.
    fn path(&self) -> &Path;

    /// Stream length in whole seconds, rounded to nearest.
    fn duration_secs(&self) -> u64;

    /// Value stored under a native key, `None` when the key is absent.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace every value stored under a native key.
    fn write(&mut self, key: &str, value: String);

    /// Embedded pictures in stored order, whatever their MIME type.
    /// Pictures that cannot be decoded are skipped.
    fn read_pictures(&self) -> Vec<Picture>;

    /// Replace all embedded pictures with `picture` as the front cover.
    fn set_picture(&mut self, picture: &Picture) -> Result<()>;

    /// Drop all embedded pictures.
    fn remove_pictures(&mut self);

    /// Persist all buffered edits.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// Round a stream length to whole seconds.
pub(crate) fn round_secs(duration: Duration) -> u64 {
    duration.as_secs_f64().round() as u64
}

/// Convert a picture into lofty's representation by way of its base64 entry.
pub(crate) fn to_lofty(picture: &Picture) -> Result<(LoftyPicture, PictureInformation)> {
    let entry = block::encode_entry(picture);
    LoftyPicture::from_flac_bytes(entry.as_bytes(), true, ParsingMode::Strict)
        .map_err(|e| Error::corrupt_picture(e.to_string()))
}

/// Convert lofty pictures back through the tolerant list decoder.
pub(crate) fn from_lofty<'a, I>(pictures: I) -> Vec<Picture>
where
    I: IntoIterator<Item = (&'a LoftyPicture, PictureInformation)>,
{
    block::decode_entries(
        pictures
            .into_iter()
            .map(|(picture, info)| picture.as_flac_bytes(info, true)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::ImageMime;
    use crate::test_utils::{GIF_BYTES, JPEG_BYTES, PNG_BYTES};
    use lofty::picture::{MimeType, PictureType};

    #[test]
    fn test_round_secs() {
        assert_eq!(round_secs(Duration::from_millis(0)), 0);
        assert_eq!(round_secs(Duration::from_millis(1_499)), 1);
        assert_eq!(round_secs(Duration::from_millis(1_500)), 2);
        assert_eq!(round_secs(Duration::from_secs(245)), 245);
    }

    #[test]
    fn test_lofty_bridge_keeps_bytes_and_mime() {
        let picture = Picture::new(ImageMime::Png, PNG_BYTES.to_vec());
        let (lofty_picture, info) = to_lofty(&picture).unwrap();

        assert_eq!(lofty_picture.pic_type(), PictureType::CoverFront);
        assert_eq!(lofty_picture.mime_type(), Some(&MimeType::Png));
        assert_eq!(lofty_picture.data(), PNG_BYTES);

        let back = from_lofty([(&lofty_picture, info)]);
        assert_eq!(back, vec![picture]);
    }

    #[test]
    fn test_from_lofty_preserves_order() {
        let png = to_lofty(&Picture::new(ImageMime::Png, PNG_BYTES.to_vec())).unwrap();
        let jpeg = to_lofty(&Picture::new(ImageMime::Jpeg, JPEG_BYTES.to_vec())).unwrap();

        let pictures = from_lofty([(&jpeg.0, jpeg.1), (&png.0, png.1)]);
        let mimes: Vec<_> = pictures.into_iter().map(|p| p.mime).collect();
        assert_eq!(mimes, vec![ImageMime::Jpeg, ImageMime::Png]);
    }

    #[test]
    fn test_from_lofty_keeps_unlisted_mime() {
        let gif = LoftyPicture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Gif),
            None,
            GIF_BYTES.to_vec(),
        );
        let jpeg = to_lofty(&Picture::new(ImageMime::Jpeg, JPEG_BYTES.to_vec())).unwrap();

        let pictures = from_lofty([(&gif, PictureInformation::default()), (&jpeg.0, jpeg.1)]);
        assert_eq!(pictures.len(), 2);
        assert_eq!(pictures[0].mime, ImageMime::Other("image/gif".to_string()));
        assert_eq!(pictures[0].data, GIF_BYTES);
        assert_eq!(pictures[1].mime, ImageMime::Jpeg);
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(FormatVariant::Id3.to_string(), "ID3v2");
        assert_eq!(FormatVariant::VorbisComment.to_string(), "Vorbis comment");
    }
}
