//! Validated tag edits.
//!
//! A [`TagEditRequest`] is built and checked once, before any audio file is
//! opened, and then applied to each file with a single commit per file.

use std::path::Path;

use tracing::debug;

use super::CanonicalMetadata;
use crate::cover;
use crate::error::{Error, Result};
use crate::picture::Picture;
use crate::tags;

/// What to do with embedded pictures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CoverAction {
    #[default]
    NoChange,
    /// Replace every picture with this front cover
    Set(Picture),
    /// Remove every picture
    Remove,
}

impl CoverAction {
    /// Build the action from the `--cover` and `--remove-cover` options,
    /// importing the image when one is given.
    pub fn from_options(cover: Option<&Path>, remove: bool) -> Result<Self> {
        match (cover, remove) {
            (Some(_), true) => Err(Error::MutualExclusionViolation),
            (Some(path), false) => Ok(CoverAction::Set(cover::import(path)?)),
            (None, true) => Ok(CoverAction::Remove),
            (None, false) => Ok(CoverAction::NoChange),
        }
    }
}

/// Field changes plus a cover action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditRequest {
    fields: CanonicalMetadata,
    cover: CoverAction,
}

impl TagEditRequest {
    /// Fails with [`Error::NothingToEdit`] when the request would not change
    /// anything.
    pub fn new(fields: CanonicalMetadata, cover: CoverAction) -> Result<Self> {
        if fields.is_empty() && cover == CoverAction::NoChange {
            return Err(Error::NothingToEdit);
        }
        Ok(Self { fields, cover })
    }

    /// Apply the request to one file. Fields not named in the request are
    /// left as they are.
    pub fn apply(&self, path: &Path) -> Result<()> {
        let mut adapter = tags::open(path)?;

        match &self.cover {
            CoverAction::NoChange => {}
            CoverAction::Set(picture) => adapter.set_picture(picture)?,
            CoverAction::Remove => adapter.remove_pictures(),
        }
        let written = self.fields.apply_to(adapter.as_mut());

        debug!(
            path = %path.display(),
            variant = %adapter.variant(),
            fields = written,
            cover = ?self.cover,
            "Applying edit"
        );
        adapter.commit()
    }
}
