use crate::canvas::FontStyle;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, CvError>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum CvError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// Content or configuration JSON could not be (de)serialized
    Json(#[from] serde_json::Error),

    #[error("no font loaded for the {0:?} style")]
    /// The canvas was asked to draw with a style it has no font for
    FontMissing(FontStyle),

    #[error("page is missing from the document")]
    /// The page order refers to a page that isn't in the document
    PageMissing,

    #[error("nothing can be drawn before a page has been added")]
    /// A draw call was issued on a canvas without pages
    NoPage,

    #[error("the canvas has nowhere to save the document")]
    /// The environment offers no way to save the generated file
    NoSaveTarget,

    #[error("a CV generation is already in progress")]
    /// A second generation was requested while one was still running
    GenerationInFlight,

    #[error("archive exceeds ZIP format limits: {0}")]
    /// The archive can't be represented with 16/32-bit ZIP fields
    ZipLimit(String),
}
