//! Canonical audio metadata.
//!
//! Maps the schema-independent field set onto the native keys of each tag
//! schema and back. Values pass through verbatim with one exception: the
//! release year is stored as a date string and read back as an integer.
//!
//! | canonical      | ID3v2 | Vorbis comment |
//! |----------------|-------|----------------|
//! | title          | TIT2  | TITLE          |
//! | artist         | TPE1  | ARTIST         |
//! | album          | TALB  | ALBUM          |
//! | album-artist   | TPE2  | ALBUMARTIST    |
//! | release-year   | TDRC  | DATE           |
//! | track-number   | TRCK  | TRACKNUMBER    |

pub mod edit;

pub use edit::{CoverAction, TagEditRequest};

use serde::Serialize;
use tracing::debug;

use crate::tags::{FormatVariant, TagAdapter};

/// A canonical metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Album,
    Artist,
    AlbumArtist,
    ReleaseYear,
    TrackNumber,
}

impl Field {
    /// Every field, in output order.
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Album,
        Field::Artist,
        Field::AlbumArtist,
        Field::ReleaseYear,
        Field::TrackNumber,
    ];

    /// Canonical name as used in output records.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::AlbumArtist => "album-artist",
            Field::ReleaseYear => "release-year",
            Field::TrackNumber => "track-number",
        }
    }

    /// Key this field is stored under in the given schema.
    pub fn native_key(self, variant: FormatVariant) -> &'static str {
        match (variant, self) {
            (FormatVariant::Id3, Field::Title) => "TIT2",
            (FormatVariant::Id3, Field::Artist) => "TPE1",
            (FormatVariant::Id3, Field::Album) => "TALB",
            (FormatVariant::Id3, Field::AlbumArtist) => "TPE2",
            (FormatVariant::Id3, Field::ReleaseYear) => "TDRC",
            (FormatVariant::Id3, Field::TrackNumber) => "TRCK",
            (FormatVariant::VorbisComment, Field::Title) => "TITLE",
            (FormatVariant::VorbisComment, Field::Artist) => "ARTIST",
            (FormatVariant::VorbisComment, Field::Album) => "ALBUM",
            (FormatVariant::VorbisComment, Field::AlbumArtist) => "ALBUMARTIST",
            (FormatVariant::VorbisComment, Field::ReleaseYear) => "DATE",
            (FormatVariant::VorbisComment, Field::TrackNumber) => "TRACKNUMBER",
        }
    }
}

/// Schema-independent metadata. Every field is optional; when used as an
/// edit only the fields that are set get written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CanonicalMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Kept verbatim, may be a "track/total" pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_number: Option<String>,
}

impl CanonicalMetadata {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&field| self.native_value(field).is_none())
    }

    /// The value of `field` in the string form it is stored as.
    pub fn native_value(&self, field: Field) -> Option<String> {
        match field {
            Field::Title => self.title.clone(),
            Field::Artist => self.artist.clone(),
            Field::Album => self.album.clone(),
            Field::AlbumArtist => self.album_artist.clone(),
            Field::ReleaseYear => self.release_year.map(|year| year.to_string()),
            Field::TrackNumber => self.track_number.clone(),
        }
    }

    /// Read every canonical field from an adapter.
    pub fn read_from(adapter: &dyn TagAdapter) -> Self {
        let variant = adapter.variant();
        let read = |field: Field| adapter.read(field.native_key(variant));

        Self {
            title: read(Field::Title),
            album: read(Field::Album),
            artist: read(Field::Artist),
            album_artist: read(Field::AlbumArtist),
            release_year: read(Field::ReleaseYear).and_then(|date| parse_year(&date)),
            track_number: read(Field::TrackNumber),
        }
    }

    /// Buffer every set field as a write on the adapter.
    ///
    /// Returns how many fields were written.
    pub fn apply_to(&self, adapter: &mut dyn TagAdapter) -> usize {
        let variant = adapter.variant();
        let mut written = 0;

        for field in Field::ALL {
            if let Some(value) = self.native_value(field) {
                adapter.write(field.native_key(variant), value);
                written += 1;
            }
        }

        written
    }
}

/// Extract a year from a native date value.
///
/// The whole value is tried as an integer first (`"2020"`), then only the
/// part before the first `-` (`"2020-05-01"`). Anything else has no year.
pub fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(year) = value.parse() {
        return Some(year);
    }

    let first = value.split('-').next().unwrap_or_default().trim();
    match first.parse() {
        Ok(year) => Some(year),
        Err(_) => {
            debug!(value, "Ignoring release date without a leading year");
            None
        }
    }
}

/// The record printed for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(flatten)]
    pub metadata: CanonicalMetadata,
    /// Stream length in whole seconds
    pub length: u64,
}

impl TrackInfo {
    pub fn from_adapter(adapter: &dyn TagAdapter) -> Self {
        Self {
            file: Some(adapter.path().display().to_string()),
            metadata: CanonicalMetadata::read_from(adapter),
            length: adapter.duration_secs(),
        }
    }
}
