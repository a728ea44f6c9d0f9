//! The standard cover-art picture block.
//!
//! This is the FLAC `PICTURE` metadata block layout, which Vorbis comments
//! also carry base64-encoded under `METADATA_BLOCK_PICTURE`. Every integer is
//! a big-endian `u32`:
//!
//! ```text
//! type | mime len | mime | desc len | desc | width | height | depth | colors | data len | data
//! ```
//!
//! Single-block decoding propagates errors and only accepts allow-listed
//! MIME types. [`decode_entries`] is the list variant used for pictures
//! already stored in a file: any MIME type is kept, entries that fail to
//! parse are skipped and the rest are returned in their original order.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use super::{ImageMime, Picture};
use crate::error::{Error, Result};

/// Picture type code for a front cover.
pub const COVER_FRONT: u32 = 3;

/// Encode a picture as a front-cover block.
///
/// MIME and data are written verbatim, the description is empty and the
/// dimension fields are zero ("unknown").
pub fn encode(picture: &Picture) -> Vec<u8> {
    let mime = picture.mime.as_str().as_bytes();
    let mut out = Vec::with_capacity(32 + mime.len() + picture.data.len());

    put_u32(&mut out, COVER_FRONT);
    put_bytes(&mut out, mime);
    put_bytes(&mut out, b"");
    // width, height, depth, colors
    for _ in 0..4 {
        put_u32(&mut out, 0);
    }
    put_bytes(&mut out, &picture.data);
    out
}

/// Decode one picture block with an allow-listed MIME type.
pub fn decode(bytes: &[u8]) -> Result<Picture> {
    let picture = decode_any(bytes)?;
    if !picture.mime.is_allowed() {
        return Err(Error::corrupt_picture(format!(
            "MIME type {:?} is not allowed",
            picture.mime.as_str()
        )));
    }
    Ok(picture)
}

/// Decode one picture block, whatever its MIME type.
pub fn decode_any(bytes: &[u8]) -> Result<Picture> {
    let mut reader = BlockReader::new(bytes);

    let _picture_type = reader.u32("picture type")?;
    let mime = reader.string("MIME type")?;
    let _description = reader.string("description")?;
    for field in ["width", "height", "color depth", "color count"] {
        reader.u32(field)?;
    }
    let data = reader.bytes("image data")?;

    Ok(Picture::new(ImageMime::parse(mime), data.to_vec()))
}

/// Encode a picture as a base64 comment value.
pub fn encode_entry(picture: &Picture) -> String {
    BASE64.encode(encode(picture))
}

/// Decode one base64 comment value with an allow-listed MIME type.
pub fn decode_entry(entry: impl AsRef<[u8]>) -> Result<Picture> {
    decode(&unwrap_base64(entry.as_ref())?)
}

fn unwrap_base64(entry: &[u8]) -> Result<Vec<u8>> {
    BASE64
        .decode(entry)
        .map_err(|e| Error::corrupt_picture(format!("invalid base64: {e}")))
}

/// Decode a multi-valued picture field, skipping entries that fail to parse.
pub fn decode_entries<I, E>(entries: I) -> Vec<Picture>
where
    I: IntoIterator<Item = E>,
    E: AsRef<[u8]>,
{
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let decoded = unwrap_base64(entry.as_ref()).and_then(|bytes| decode_any(&bytes));
            match decoded {
                Ok(picture) => Some(picture),
                Err(e) => {
                    debug!(index, error = %e, "Skipping undecodable picture entry");
                    None
                }
            }
        })
        .collect()
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    put_u32(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

/// Bounds-checked cursor over a block.
struct BlockReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BlockReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                Error::corrupt_picture(format!(
                    "truncated {field}: need {len} bytes at offset {}, block is {} bytes",
                    self.pos,
                    self.bytes.len()
                ))
            })?;

        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self, field: &str) -> Result<u32> {
        let raw = self.take(4, field)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// Length-prefixed bytes.
    fn bytes(&mut self, field: &str) -> Result<&'a [u8]> {
        let len = self.u32(field)? as usize;
        self.take(len, field)
    }

    /// Length-prefixed UTF-8.
    fn string(&mut self, field: &str) -> Result<&'a str> {
        let raw = self.bytes(field)?;
        std::str::from_utf8(raw)
            .map_err(|e| Error::corrupt_picture(format!("{field} is not UTF-8: {e}")))
    }
}
