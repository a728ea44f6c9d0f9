//! Embedded cover-art pictures.
//!
//! Pictures are modeled independently of the tag schema they came from.
//! Only JPEG and PNG covers can be imported. Pictures already embedded in a
//! file keep whatever MIME type they were stored with and export with the
//! [`DEFAULT_EXTENSION`] when it is not on the allow-list.
//!
//! The binary picture-block codec shared by both schemas lives in [`block`].

pub mod block;

use std::fmt;

/// Extension used when a MIME type is not on the allow-list.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Image MIME types. Only [`ImageMime::Jpeg`] and [`ImageMime::Png`] are
/// allow-listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Jpeg,
    Png,
    /// Any other type, as stored in a file
    Other(String),
}

impl ImageMime {
    /// Every allow-listed type.
    pub const ALL: [ImageMime; 2] = [ImageMime::Jpeg, ImageMime::Png];

    /// The MIME string, e.g. `image/png`.
    pub fn as_str(&self) -> &str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
            ImageMime::Other(mime) => mime,
        }
    }

    /// File extension for this type.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "jpg",
            ImageMime::Png => "png",
            ImageMime::Other(_) => DEFAULT_EXTENSION,
        }
    }

    pub fn is_allowed(&self) -> bool {
        !matches!(self, ImageMime::Other(_))
    }

    /// Look up an allow-listed type by its MIME string.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == mime)
    }

    /// Any MIME string, allow-listed or not.
    pub fn parse(mime: &str) -> Self {
        Self::from_mime(mime).unwrap_or_else(|| ImageMime::Other(mime.to_string()))
    }

    /// Determine the type from the image bytes themselves.
    ///
    /// On failure the detected MIME string (or `application/octet-stream`
    /// when nothing matched) is returned so callers can report it.
    pub fn sniff(data: &[u8]) -> Result<Self, String> {
        let detected = infer::get(data)
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        Self::from_mime(detected).ok_or_else(|| detected.to_string())
    }
}

/// A single embedded picture.
///
/// Every picture written by this crate is stored as a front cover, so the
/// picture type is not part of the model.
#[derive(Clone, PartialEq, Eq)]
pub struct Picture {
    pub mime: ImageMime,
    pub data: Vec<u8>,
}

impl Picture {
    pub fn new(mime: ImageMime, data: Vec<u8>) -> Self {
        Self { mime, data }
    }
}

// Image bytes are noise in debug output
impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("mime", &self.mime)
            .field("len", &self.data.len())
            .finish()
    }
}
