//! Two-column résumé generation into PDF.
//!
//! [generate_resume_document] lays a [ResumeContent] record out onto any
//! [DocumentCanvas](canvas::DocumentCanvas); [render_resume_pdf] does the same onto
//! a [PdfCanvas](canvas::PdfCanvas) built from font files, producing a PDF file.

pub mod canvas;

mod colour;
pub use colour::*;

mod content;

mod content_model;
pub use content_model::*;

mod document;
pub use document::*;

mod download;
pub use download::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (mostly text) on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod resume;
pub use resume::*;

mod sanitize;
pub use sanitize::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

pub mod zip;

/// Re-export PDF-writer functionality
pub use pdf_writer;
