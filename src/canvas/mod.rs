//! The drawing surface the résumé engine renders onto.
//!
//! [DocumentCanvas] is the narrow set of capabilities the layout engine needs:
//! measure and wrap text, draw text and lines, manage pages and save the result.
//! [PdfCanvas] implements it on top of [Document](crate::Document);
//! [RecordingCanvas] records every call instead, which is what the engine's tests
//! run against.
//!
//! All canvas coordinates are millimetres measured from the top-left corner of the
//! page, and text is anchored at the baseline of its first line.

mod pdf;
mod recording;

pub use pdf::*;
pub use recording::*;

use crate::colour::Colour;
use crate::info::Info;
use crate::units::{Mm, Pt};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// The typeface variants the engine switches between
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Capabilities the layout engine draws through.
///
/// Every fallible call aborts the generation when it fails; the engine doesn't
/// retry anything.
pub trait DocumentCanvas {
    /// Width and height of the current page
    fn page_size(&self) -> (Mm, Mm);

    /// Select the font used by subsequent measurement and text calls
    fn set_font(&mut self, style: FontStyle, size: Pt) -> Result<()>;

    /// Wrap `text` to `width` using the current font, returning the lines in order
    fn split_text_to_size(&self, text: &str, width: Mm) -> Result<Vec<String>>;

    /// Draw `lines` with the current font, the first baseline at (`x`, `y`) and each
    /// following line `line_height` further down
    fn text(&mut self, lines: &[String], x: Mm, y: Mm, line_height: Mm) -> Result<()>;

    /// Stroke colour for subsequent lines
    fn set_draw_colour(&mut self, colour: Colour);

    /// Stroke width for subsequent lines
    fn set_line_width(&mut self, width: Mm);

    /// Draw a straight line between two points
    fn line(&mut self, from: (Mm, Mm), to: (Mm, Mm)) -> Result<()>;

    /// Append a blank page and continue drawing on it
    fn add_page(&mut self) -> Result<()>;

    /// Serialize the document and hand it over under `filename`
    fn save(&mut self, filename: &str) -> Result<()>;

    /// Document metadata; canvases without a metadata block ignore it
    fn set_info(&mut self, _info: Info) {}
}

/// Where a finished document goes when the canvas is saved
pub trait SaveSink {
    fn save(&mut self, filename: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Saves documents as files inside a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    pub directory: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(directory: P) -> DirectorySink {
        DirectorySink {
            directory: directory.into(),
        }
    }
}

impl SaveSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(filename);
        std::fs::write(&path, bytes)?;
        log::debug!("wrote {} to {}", filename, path.display());
        Ok(())
    }
}

/// A saved file, as kept by [MemorySink]
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Keeps saved documents in memory. Clones share the same storage, so one handle
/// can be given to a canvas and another kept to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Arc<Mutex<Vec<SavedFile>>>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// Every file saved so far, oldest first
    pub fn files(&self) -> Vec<SavedFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SaveSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SavedFile {
                filename: filename.to_string(),
                bytes,
            });
        Ok(())
    }
}
