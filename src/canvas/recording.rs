use super::{DocumentCanvas, FontStyle};
use crate::colour::Colour;
use crate::info::Info;
use crate::layout::wrap_text;
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use crate::{CvError, Result};

/// One call made against a [RecordingCanvas]
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    SetFont {
        style: FontStyle,
        size: Pt,
    },
    Text {
        /// 1-based page the text was drawn on
        page: usize,
        lines: Vec<String>,
        x: Mm,
        y: Mm,
        line_height: Mm,
        style: FontStyle,
        size: Pt,
    },
    SetDrawColour(Colour),
    SetLineWidth(Mm),
    Line {
        page: usize,
        from: (Mm, Mm),
        to: (Mm, Mm),
    },
    AddPage,
    Save {
        filename: String,
    },
    SetInfo(Info),
}

/// An in-memory [DocumentCanvas] that records every call.
///
/// Text is measured as if every character had the same advance: `size × char_width`
/// points, which keeps wrapping deterministic without any font files.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    page_size: PageSize,
    /// Advance of one character as a fraction of the font size
    pub char_width: f32,
    style: FontStyle,
    size: Pt,
    page: usize,
    ops: Vec<CanvasOp>,
    fallible_calls: usize,
    fail_after: Option<usize>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        RecordingCanvas::new(pagesize::A4)
    }
}

impl RecordingCanvas {
    pub fn new(page_size: PageSize) -> RecordingCanvas {
        RecordingCanvas {
            page_size,
            char_width: 0.5,
            style: FontStyle::Regular,
            size: Pt(10.0),
            page: 1,
            ops: Vec::new(),
            fallible_calls: 0,
            fail_after: None,
        }
    }

    /// Let the first `calls` fallible calls succeed and fail every one after that,
    /// the way an exhausted or broken canvas would
    pub fn failing_after(mut self, calls: usize) -> RecordingCanvas {
        self.fail_after = Some(calls);
        self
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Number of pages, counting the initial one
    pub fn page_count(&self) -> usize {
        self.page
    }

    /// Every line of text drawn, in drawing order
    pub fn text_lines(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Text { lines, .. } => Some(lines.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Filename of the last save call, if any
    pub fn saved_filename(&self) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            CanvasOp::Save { filename } => Some(filename.as_str()),
            _ => None,
        })
    }

    fn check(&mut self) -> Result<()> {
        self.fallible_calls += 1;
        match self.fail_after {
            Some(limit) if self.fallible_calls > limit => Err(CvError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "recording canvas exhausted",
            ))),
            _ => Ok(()),
        }
    }
}

impl DocumentCanvas for RecordingCanvas {
    fn page_size(&self) -> (Mm, Mm) {
        self.page_size
    }

    fn set_font(&mut self, style: FontStyle, size: Pt) -> Result<()> {
        self.check()?;
        self.style = style;
        self.size = size;
        self.ops.push(CanvasOp::SetFont { style, size });
        Ok(())
    }

    fn split_text_to_size(&self, text: &str, width: Mm) -> Result<Vec<String>> {
        let advance = self.size * self.char_width;
        Ok(wrap_text(text, width.into(), |s| {
            advance * s.chars().count() as f32
        }))
    }

    fn text(&mut self, lines: &[String], x: Mm, y: Mm, line_height: Mm) -> Result<()> {
        self.check()?;
        self.ops.push(CanvasOp::Text {
            page: self.page,
            lines: lines.to_vec(),
            x,
            y,
            line_height,
            style: self.style,
            size: self.size,
        });
        Ok(())
    }

    fn set_draw_colour(&mut self, colour: Colour) {
        self.ops.push(CanvasOp::SetDrawColour(colour));
    }

    fn set_line_width(&mut self, width: Mm) {
        self.ops.push(CanvasOp::SetLineWidth(width));
    }

    fn line(&mut self, from: (Mm, Mm), to: (Mm, Mm)) -> Result<()> {
        self.check()?;
        self.ops.push(CanvasOp::Line {
            page: self.page,
            from,
            to,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<()> {
        self.check()?;
        self.page += 1;
        self.ops.push(CanvasOp::AddPage);
        Ok(())
    }

    fn save(&mut self, filename: &str) -> Result<()> {
        self.check()?;
        self.ops.push(CanvasOp::Save {
            filename: filename.to_string(),
        });
        Ok(())
    }

    fn set_info(&mut self, info: Info) {
        self.ops.push(CanvasOp::SetInfo(info));
    }
}
