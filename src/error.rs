//! Application-wide error types.
//!
//! Library modules return [`Result`] with the [`Error`] taxonomy below, while
//! the CLI layer and `main` use `anyhow` for convenient propagation.
//!
//! # Design
//!
//! - Schema and picture errors are recovered locally where an operation is
//!   naturally per-item (one picture in a list, one file in a batch).
//! - Request validation errors ([`Error::MutualExclusionViolation`],
//!   [`Error::UnsupportedImageType`], [`Error::NothingToEdit`]) are raised
//!   before any audio file is opened.

use std::path::{Path, PathBuf};

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path does not exist
    #[error("{}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No recognized tag schema, or the tag container is absent
    #[error("Unsupported format for {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// The tag block is structurally invalid
    #[error("Corrupt tag in {}: {source}", path.display())]
    CorruptTag {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// A picture block could not be decoded
    #[error("Corrupt picture: {0}")]
    CorruptPicture(String),

    /// Cover import with a MIME type outside the allow-list
    #[error("Cover {} is not a JPG or PNG (detected {mime})", path.display())]
    UnsupportedImageType { path: PathBuf, mime: String },

    /// Cover import and cover removal requested together
    #[error("--remove-cover (-r) and --cover are mutually exclusive")]
    MutualExclusionViolation,

    /// A `set` request without any field or cover edit
    #[error("Provide some options to edit")]
    NothingToEdit,

    /// Persisting the buffered tag failed
    #[error("Failed to write tag to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// Rendering an output record failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other file I/O error
    #[error("IO error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a not found error from the OS error that reported it.
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::NotFound {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a corrupt picture error.
    pub fn corrupt_picture(message: impl Into<String>) -> Self {
        Self::CorruptPicture(message.into())
    }

    /// Classify an I/O error on `path`: a missing path is [`Error::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    /// The OS error number behind this error, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::NotFound { source, .. } | Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Extension trait for attaching a path to I/O results.
pub trait ResultExt<T> {
    /// Convert an I/O error into an [`Error`] for `path`.
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}
