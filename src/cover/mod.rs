//! Cover art export and import.
//!
//! - **Export** writes a file's embedded pictures next to each other in an
//!   export directory, named after the audio file.
//! - **Import** reads an image file to embed as the front cover. The image
//!   type is sniffed from its content; only JPEG and PNG are accepted.

mod export;
mod import;

pub use export::{export_covers, export_path};
pub use import::import;
