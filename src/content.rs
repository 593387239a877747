//! Content stream rendering for pages.

use crate::font::Font;
use crate::page::{LineLayout, PageContents, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Converts the high-level contents of a page into low-level PDF operators.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Line(line) => render_line(&mut content, line)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    write!(content, "{}\n", current_colour.fill_operator())?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write!(content, "{}\n", current_colour.fill_operator())?;
        }

        let Some(font) = fonts.get(current_font.id) else {
            continue;
        };

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_id_or_fallback(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(content, "{}\n", line.colour.stroke_operator())?;
    write!(content, "{} w\n", line.width)?;
    write!(content, "{} {} m\n", line.from.0, line.from.1)?;
    write!(content, "{} {} l\n", line.to.0, line.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}
