use super::{DocumentCanvas, FontStyle, SaveSink};
use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::layout::{width_of_text, wrap_text};
use crate::page::{LineLayout, Page, SpanFont, SpanLayout};
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use crate::{CvError, Result};
use id_arena::Id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Font files for each style the engine uses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontPaths {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
}

impl FontPaths {
    fn iter(&self) -> impl Iterator<Item = (FontStyle, &PathBuf)> {
        [
            (FontStyle::Regular, &self.regular),
            (FontStyle::Bold, &self.bold),
            (FontStyle::Italic, &self.italic),
        ]
        .into_iter()
    }
}

fn default_page_size() -> PageSize {
    pagesize::A4
}

/// Everything needed to bring up a [PdfCanvas]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Page (width, height), A4 unless configured otherwise
    #[serde(default = "default_page_size")]
    pub page_size: PageSize,
    pub fonts: FontPaths,
}

impl CanvasConfig {
    pub fn new(fonts: FontPaths) -> CanvasConfig {
        CanvasConfig {
            page_size: default_page_size(),
            fonts,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> CanvasConfig {
        self.page_size = page_size;
        self
    }

    /// Parse a canvas configuration from JSON
    pub fn from_json(json: &str) -> Result<CanvasConfig> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A [DocumentCanvas] that builds a real PDF [Document].
///
/// The canvas starts out with one blank page. Text is set in the fonts registered
/// per [FontStyle]; the document is only serialized when [DocumentCanvas::save] is
/// called, at which point it is handed to the configured [SaveSink].
pub struct PdfCanvas {
    document: Document,
    page_size: PageSize,
    fonts: HashMap<FontStyle, Id<Font>>,
    current_style: FontStyle,
    current_size: Pt,
    current_page: Id<Page>,
    text_colour: Colour,
    draw_colour: Colour,
    line_width: Mm,
    sink: Option<Box<dyn SaveSink + Send>>,
}

impl PdfCanvas {
    /// An empty canvas with a single blank page and no fonts
    pub fn new(page_size: PageSize) -> PdfCanvas {
        let mut document = Document::default();
        let current_page = document.add_page(Page::new(page_size));
        PdfCanvas {
            document,
            page_size,
            fonts: HashMap::new(),
            current_style: FontStyle::Regular,
            current_size: Pt(10.0),
            current_page,
            text_colour: colours::BLACK,
            draw_colour: colours::BLACK,
            line_width: Mm(0.2),
            sink: None,
        }
    }

    /// Reads and parses the configured fonts. This is the initialization step that
    /// has to succeed before any layout work can begin.
    pub fn load(config: &CanvasConfig) -> Result<PdfCanvas> {
        let mut canvas = PdfCanvas::new(config.page_size);
        for (style, path) in config.fonts.iter() {
            log::debug!("loading {:?} font from {}", style, path.display());
            canvas.add_font(style, Font::load_from_path(path)?);
        }
        Ok(canvas)
    }

    /// Like [PdfCanvas::load], reading the font files without blocking the runtime
    #[cfg(feature = "async")]
    pub async fn load_async(config: &CanvasConfig) -> Result<PdfCanvas> {
        let mut canvas = PdfCanvas::new(config.page_size);
        for (style, path) in config.fonts.iter() {
            log::debug!("loading {:?} font from {}", style, path.display());
            let bytes = tokio::fs::read(path).await?;
            canvas.add_font(style, Font::load(bytes)?);
        }
        Ok(canvas)
    }

    /// Register `font` as the face drawn for `style`, replacing any earlier one
    pub fn add_font(&mut self, style: FontStyle, font: Font) {
        let id = self.document.add_font(font);
        self.fonts.insert(style, id);
    }

    /// Send the document to `sink` when the canvas is saved
    pub fn with_sink<S: SaveSink + Send + 'static>(mut self, sink: S) -> PdfCanvas {
        self.sink = Some(Box::new(sink));
        self
    }

    /// The document built so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn font_for(&self, style: FontStyle) -> Result<(Id<Font>, &Font)> {
        let id = *self.fonts.get(&style).ok_or(CvError::FontMissing(style))?;
        let font = self.document.fonts.get(id).ok_or(CvError::FontMissing(style))?;
        Ok((id, font))
    }

    /// Canvas coordinates (mm from the top-left) to PDF coordinates (pt from the bottom-left)
    fn to_pdf(&self, x: Mm, y: Mm) -> (Pt, Pt) {
        let page_height: Pt = self.page_size.1.into();
        (x.into(), page_height - y.into())
    }

    fn page_mut(&mut self) -> Result<&mut Page> {
        self.document
            .page_mut(self.current_page)
            .ok_or(CvError::NoPage)
    }
}

impl DocumentCanvas for PdfCanvas {
    fn page_size(&self) -> (Mm, Mm) {
        self.page_size
    }

    fn set_font(&mut self, style: FontStyle, size: Pt) -> Result<()> {
        self.font_for(style)?;
        self.current_style = style;
        self.current_size = size;
        Ok(())
    }

    fn split_text_to_size(&self, text: &str, width: Mm) -> Result<Vec<String>> {
        let (_, font) = self.font_for(self.current_style)?;
        let size = self.current_size;
        Ok(wrap_text(text, width.into(), |s| {
            width_of_text(s, font, size)
        }))
    }

    fn text(&mut self, lines: &[String], x: Mm, y: Mm, line_height: Mm) -> Result<()> {
        let (font_id, _) = self.font_for(self.current_style)?;
        let font = SpanFont {
            id: font_id,
            size: self.current_size,
        };

        let spans: Vec<SpanLayout> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| SpanLayout {
                text: line.clone(),
                font,
                colour: self.text_colour,
                coords: self.to_pdf(x, y + line_height * i as f32),
            })
            .collect();

        self.page_mut()?.add_spans(spans);
        Ok(())
    }

    fn set_draw_colour(&mut self, colour: Colour) {
        self.draw_colour = colour;
    }

    fn set_line_width(&mut self, width: Mm) {
        self.line_width = width;
    }

    fn line(&mut self, from: (Mm, Mm), to: (Mm, Mm)) -> Result<()> {
        let line = LineLayout {
            from: self.to_pdf(from.0, from.1),
            to: self.to_pdf(to.0, to.1),
            colour: self.draw_colour,
            width: self.line_width.into(),
        };
        self.page_mut()?.add_line(line);
        Ok(())
    }

    fn add_page(&mut self) -> Result<()> {
        self.current_page = self.document.add_page(Page::new(self.page_size));
        log::debug!("started page {}", self.document.page_count());
        Ok(())
    }

    fn save(&mut self, filename: &str) -> Result<()> {
        let sink = self.sink.as_mut().ok_or(CvError::NoSaveTarget)?;
        let bytes = self.document.render()?;
        log::debug!(
            "saving {} ({} pages, {} bytes)",
            filename,
            self.document.page_count(),
            bytes.len()
        );
        sink.save(filename, bytes)
    }

    fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }
}
