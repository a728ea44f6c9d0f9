//! Load an image file to embed as the front cover.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result, ResultExt};
use crate::picture::{ImageMime, Picture};

/// Read an image file and sniff its type from the bytes.
///
/// The file extension is ignored. Types outside the allow-list are
/// rejected with [`Error::UnsupportedImageType`].
pub fn import(path: &Path) -> Result<Picture> {
    let data = std::fs::read(path).with_path(path)?;
    let mime = ImageMime::sniff(&data).map_err(|mime| Error::UnsupportedImageType {
        path: path.to_path_buf(),
        mime,
    })?;

    debug!(path = %path.display(), mime = mime.as_str(), bytes = data.len(), "Imported cover");
    Ok(Picture::new(mime, data))
}
