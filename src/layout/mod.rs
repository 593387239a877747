//! Text measurement and wrapping utilities.
//!
//! The résumé engine never positions individual glyphs itself; it asks the canvas
//! to wrap a string to a column width and then places whole lines. The helpers in
//! here are what canvases use to answer that question.
//!
//! # Example
//!
//! ```
//! use cv_gen::layout::wrap_text;
//! use cv_gen::Pt;
//!
//! // every character is 1pt wide
//! let lines = wrap_text("the quick brown fox", Pt(10.0), |s| Pt(s.chars().count() as f32));
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
