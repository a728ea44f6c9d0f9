//! Test utilities and fixtures for audio-tag tests.
//!
//! Audio fixtures are synthesized byte by byte and then tagged through lofty
//! itself, so tests never depend on binary files checked into the repo.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::flac_fixture;
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! let path = flac_fixture(dir.path(), "song.flac", "Some Title");
//! // path now holds a 3 second FLAC with TITLE=Some Title
//! ```

use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::id3::v2::Id3v2Tag;
use lofty::ogg::VorbisComments;
use lofty::tag::{Accessor, TagExt};

/// A 1x1 transparent PNG.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// A JFIF header followed by end-of-image; enough for content sniffing.
pub const JPEG_BYTES: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

/// A GIF header, an image type outside the allow-list.
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, mono.
const MPEG_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];
/// 144 * 128000 / 44100, without padding.
const MPEG_FRAME_LEN: usize = 417;
/// About 1.3 seconds of silence.
const MPEG_FRAME_COUNT: usize = 50;

/// Write an MP3 made of silent frames and no tag.
pub fn untagged_mp3(dir: &Path, name: &str) -> PathBuf {
    let mut bytes = Vec::with_capacity(MPEG_FRAME_LEN * MPEG_FRAME_COUNT);
    for _ in 0..MPEG_FRAME_COUNT {
        bytes.extend_from_slice(&MPEG_FRAME_HEADER);
        bytes.resize(bytes.len() + MPEG_FRAME_LEN - MPEG_FRAME_HEADER.len(), 0);
    }

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write MP3 fixture");
    path
}

/// Write an MP3 with an ID3v2 tag holding only a title.
pub fn mp3_fixture(dir: &Path, name: &str, title: &str) -> PathBuf {
    let path = untagged_mp3(dir, name);

    let mut tag = Id3v2Tag::new();
    tag.set_title(title.to_string());
    tag.save_to_path(&path, WriteOptions::default())
        .expect("Failed to tag MP3 fixture");
    path
}

/// FLAC metadata block types.
const FLAC_STREAMINFO: u8 = 0;
const FLAC_PADDING: u8 = 1;
const FLAC_VORBIS_COMMENT: u8 = 4;
/// Header flag marking the last metadata block.
const FLAC_LAST_BLOCK: u8 = 0x80;
/// Frame sync and header bytes standing in for audio.
const FLAC_FRAME_STUB: [u8; 8] = [0xFF, 0xF8, 0x69, 0x18, 0x00, 0x00, 0x00, 0x00];

fn push_flac_block(bytes: &mut Vec<u8>, header: u8, body: &[u8]) {
    bytes.push(header);
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    bytes.extend_from_slice(body);
}

/// A FLAC stream: STREAMINFO for 3 seconds of 44.1 kHz 16-bit stereo,
/// then `blocks`, then a final PADDING block and a frame stub.
fn flac_bytes(blocks: &[(u8, Vec<u8>)]) -> Vec<u8> {
    const SAMPLE_RATE: u64 = 44_100;
    const CHANNELS: u64 = 2;
    const BITS_PER_SAMPLE: u64 = 16;
    const TOTAL_SAMPLES: u64 = SAMPLE_RATE * 3;

    let mut stream_info = Vec::with_capacity(34);
    // min/max block size
    stream_info.extend_from_slice(&4096u16.to_be_bytes());
    stream_info.extend_from_slice(&4096u16.to_be_bytes());
    // min/max frame size, unknown
    stream_info.extend_from_slice(&[0; 6]);
    let packed = (SAMPLE_RATE << 44)
        | ((CHANNELS - 1) << 41)
        | ((BITS_PER_SAMPLE - 1) << 36)
        | TOTAL_SAMPLES;
    stream_info.extend_from_slice(&packed.to_be_bytes());
    // MD5 of the audio, unknown
    stream_info.extend_from_slice(&[0; 16]);

    let mut bytes = b"fLaC".to_vec();
    push_flac_block(&mut bytes, FLAC_STREAMINFO, &stream_info);
    for (block_type, body) in blocks {
        push_flac_block(&mut bytes, *block_type, body);
    }
    push_flac_block(&mut bytes, FLAC_LAST_BLOCK | FLAC_PADDING, &[0; 4]);
    bytes.extend_from_slice(&FLAC_FRAME_STUB);
    bytes
}

/// Write a FLAC without any comments: STREAMINFO, PADDING and a frame stub.
pub fn untagged_flac(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, flac_bytes(&[])).expect("Failed to write FLAC fixture");
    path
}

/// Write a FLAC whose Vorbis comment block holds exactly `comments`
/// (`KEY=value` strings), bypassing lofty's writer.
pub fn flac_with_raw_comments(dir: &Path, name: &str, comments: &[String]) -> PathBuf {
    let vendor = b"audio-tag fixture";
    let mut body = Vec::new();
    body.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    body.extend_from_slice(vendor);
    body.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for comment in comments {
        body.extend_from_slice(&(comment.len() as u32).to_le_bytes());
        body.extend_from_slice(comment.as_bytes());
    }

    let path = dir.join(name);
    std::fs::write(&path, flac_bytes(&[(FLAC_VORBIS_COMMENT, body)]))
        .expect("Failed to write FLAC fixture");
    path
}

/// Write a FLAC with a Vorbis comment block holding only a title.
pub fn flac_fixture(dir: &Path, name: &str, title: &str) -> PathBuf {
    let path = untagged_flac(dir, name);

    let mut comments = VorbisComments::default();
    comments.insert("TITLE".to_string(), title.to_string());
    comments
        .save_to_path(&path, WriteOptions::default())
        .expect("Failed to tag FLAC fixture");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_untagged_mp3_layout() {
        let dir = TempDir::new().unwrap();
        let path = untagged_mp3(dir.path(), "bare.mp3");
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(bytes.len(), MPEG_FRAME_LEN * MPEG_FRAME_COUNT);
        assert_eq!(&bytes[..4], &MPEG_FRAME_HEADER);
        assert_eq!(&bytes[MPEG_FRAME_LEN..MPEG_FRAME_LEN + 4], &MPEG_FRAME_HEADER);
    }

    #[test]
    fn test_untagged_flac_layout() {
        let dir = TempDir::new().unwrap();
        let path = untagged_flac(dir.path(), "bare.flac");
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(&bytes[..4], b"fLaC");
        // STREAMINFO is not the last block
        assert_eq!(&bytes[4..8], &[FLAC_STREAMINFO, 0, 0, 34]);
        assert_eq!(&bytes[42..46], &[FLAC_LAST_BLOCK | FLAC_PADDING, 0, 0, 4]);
        assert_eq!(&bytes[50..], &FLAC_FRAME_STUB);
    }

    #[test]
    fn test_raw_comment_block() {
        let dir = TempDir::new().unwrap();
        let comments = vec!["TITLE=Raw".to_string()];
        let path = flac_with_raw_comments(dir.path(), "raw.flac", &comments);
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(bytes[42], FLAC_VORBIS_COMMENT);
        assert!(bytes.windows(9).any(|w| w == b"TITLE=Raw"));
    }

    #[test]
    fn test_tagged_fixtures_start_with_tag() {
        let dir = TempDir::new().unwrap();
        let mp3 = std::fs::read(mp3_fixture(dir.path(), "a.mp3", "T")).unwrap();
        assert_eq!(&mp3[..3], b"ID3");

        let flac = std::fs::read(flac_fixture(dir.path(), "a.flac", "T")).unwrap();
        assert_eq!(&flac[..4], b"fLaC");
        assert!(flac.len() > flac_bytes(&[]).len());
    }
}
