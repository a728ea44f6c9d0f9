//! Container detection.
//!
//! The container type is guessed from the leading bytes of the file, never
//! from its extension. Only the tag that belongs to the container's native
//! schema is read.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use lofty::config::{ParseOptions, ParsingMode};
use lofty::error::{ErrorKind, LoftyError};
use lofty::file::{AudioFile, FileType};
use lofty::flac::FlacFile;
use lofty::mpeg::MpegFile;
use lofty::ogg::{OggPictureStorage, OpusFile, SpeexFile, VorbisComments, VorbisFile};
use lofty::probe::Probe;
use tracing::debug;

use super::id3::Id3Adapter;
use super::vorbis::VorbisAdapter;
use super::{TagAdapter, round_secs};
use crate::error::{Error, Result, ResultExt};

fn parse_options() -> ParseOptions {
    ParseOptions::new()
        .parsing_mode(ParsingMode::BestAttempt)
        .read_properties(true)
}

/// Open `path` and return an adapter for the tag schema it carries.
///
/// # Errors
///
/// - [`Error::NotFound`] when the path does not exist
/// - [`Error::UnsupportedFormat`] when the container is not recognized or
///   has no tag of its native schema
/// - [`Error::CorruptTag`] when the container or tag cannot be parsed
pub fn open(path: &Path) -> Result<Box<dyn TagAdapter>> {
    let file = File::open(path).with_path(path)?;
    let probe = Probe::new(BufReader::new(file))
        .guess_file_type()
        .with_path(path)?;

    let Some(file_type) = probe.file_type() else {
        return Err(Error::unsupported_format(path, "unrecognized container"));
    };
    debug!(path = %path.display(), ?file_type, "Probed container");

    let mut reader = probe.into_inner();
    reader.rewind().with_path(path)?;

    match file_type {
        FileType::Mpeg => {
            let mpeg = read_container::<MpegFile, _>(&mut reader, path)?;
            let duration = round_secs(mpeg.properties().duration());
            let tag = mpeg
                .id3v2()
                .cloned()
                .ok_or_else(|| Error::unsupported_format(path, "no ID3v2 tag"))?;
            Ok(Box::new(Id3Adapter::new(path.to_path_buf(), tag, duration)))
        }
        FileType::Flac => {
            let flac = read_container::<FlacFile, _>(&mut reader, path)?;
            let duration = round_secs(flac.properties().duration());
            let mut comments = flac
                .vorbis_comments()
                .cloned()
                .ok_or_else(|| Error::unsupported_format(path, "no Vorbis comment block"))?;

            // Native picture blocks join the comment's own pictures
            for (picture, info) in flac.pictures() {
                comments
                    .insert_picture(picture.clone(), Some(*info))
                    .map_err(|source| corrupt_tag(path, source))?;
            }
            Ok(vorbis(path, comments, duration))
        }
        FileType::Vorbis => {
            let ogg = read_container::<VorbisFile, _>(&mut reader, path)?;
            let duration = round_secs(ogg.properties().duration());
            Ok(vorbis(path, ogg.vorbis_comments().clone(), duration))
        }
        FileType::Opus => {
            let ogg = read_container::<OpusFile, _>(&mut reader, path)?;
            let duration = round_secs(ogg.properties().duration());
            Ok(vorbis(path, ogg.vorbis_comments().clone(), duration))
        }
        FileType::Speex => {
            let ogg = read_container::<SpeexFile, _>(&mut reader, path)?;
            let duration = round_secs(ogg.properties().duration());
            Ok(vorbis(path, ogg.vorbis_comments().clone(), duration))
        }
        other => Err(Error::unsupported_format(
            path,
            format!("{other:?} files are not supported"),
        )),
    }
}

fn vorbis(path: &Path, comments: VorbisComments, duration: u64) -> Box<dyn TagAdapter> {
    Box::new(VorbisAdapter::new(path.to_path_buf(), comments, duration))
}

fn read_container<F, R>(reader: &mut R, path: &Path) -> Result<F>
where
    F: AudioFile,
    R: Read + Seek,
{
    F::read_from(reader, parse_options()).map_err(|source| classify(path, source))
}

fn classify(path: &Path, source: LoftyError) -> Error {
    match source.kind() {
        ErrorKind::UnknownFormat => Error::unsupported_format(path, source.to_string()),
        _ => corrupt_tag(path, source),
    }
}

fn corrupt_tag(path: &Path, source: LoftyError) -> Error {
    Error::CorruptTag {
        path: path.to_path_buf(),
        source,
    }
}
