//! The résumé layout engine.
//!
//! A résumé is laid out as a full-width header followed by two columns: a narrow
//! left column with short reference sections (contact details, links, highlights,
//! skills) and a wide right column with the flowing sections (profile, experience,
//! projects and the closing note). The left column is laid out first and always
//! stays on the first page. The right column starts no higher than where the left
//! one ended, and breaks onto as many continuation pages as it needs, each starting
//! with an abbreviated header.
//!
//! Every piece of content text is sanitized right before it is measured or drawn,
//! and all drawing goes through a [DocumentCanvas], so the same layout runs against
//! the PDF backend and against a [RecordingCanvas](crate::canvas::RecordingCanvas)
//! in tests.

use crate::canvas::{CanvasConfig, DocumentCanvas, FontStyle, PdfCanvas, SaveSink};
use crate::colour::{colours, Colour};
use crate::content_model::{ExperienceJob, Language, ProjectItem, ResumeContent};
use crate::info::Info;
use crate::layout::Margins;
use crate::sanitize::{sanitize_url, sanitize_with_limit, slugify, SANITIZE_LIMIT};
use crate::units::{Mm, Pt};
use crate::Result;
use serde::{Deserialize, Serialize};

const NAME_SIZE: Pt = Pt(22.0);
const HEADLINE_SIZE: Pt = Pt(12.0);
const TAGLINE_SIZE: Pt = Pt(10.0);
const CONTINUATION_NAME_SIZE: Pt = Pt(12.0);
const SECTION_TITLE_SIZE: Pt = Pt(11.0);
const LEFT_TITLE_SIZE: Pt = Pt(10.0);
const LEFT_BODY_SIZE: Pt = Pt(9.0);
const BODY_SIZE: Pt = Pt(10.0);

const NAME_LINE_HEIGHT: Mm = Mm(8.0);
const HEADLINE_LINE_HEIGHT: Mm = Mm(6.0);
const SECTION_TITLE_STEP: Mm = Mm(6.0);
const LEFT_TITLE_STEP: Mm = Mm(5.0);
const LEFT_SECTION_GAP: Mm = Mm(3.0);
const PARAGRAPH_GAP: Mm = Mm(2.0);
const BLOCK_GAP: Mm = Mm(3.0);
const HEADER_RULE_WIDTH: Mm = Mm(0.3);
const CONTINUATION_RULE_WIDTH: Mm = Mm(0.2);

/// Geometry and spacing of the résumé layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub margins: Margins,
    pub left_column_width: Mm,
    /// Space between the left and right columns
    pub gutter: Mm,
    pub left_line_height: Mm,
    pub right_line_height: Mm,
    /// Distance from the header rule to the first line of both columns
    pub header_offset: Mm,
    /// Where the right column resumes on a continuation page, below the top margin
    pub continuation_offset: Mm,
    /// How close the left column may end to the right cursor before the closing
    /// block is pushed below it
    pub reconcile_buffer: Mm,
    /// Maximum length of any content string, in characters
    pub sanitize_limit: usize,
    pub rule_colour: Colour,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            margins: Margins::all(Mm(15.0)),
            left_column_width: Mm(58.0),
            gutter: Mm(8.0),
            left_line_height: Mm(4.2),
            right_line_height: Mm(4.8),
            header_offset: Mm(6.0),
            continuation_offset: Mm(8.0),
            reconcile_buffer: Mm(4.0),
            sanitize_limit: SANITIZE_LIMIT,
            rule_colour: colours::RULE_GREY,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<LayoutConfig> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Vertical write positions of the two columns during one generation
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCursor {
    left_y: Mm,
    right_y: Mm,
    page: usize,
    fresh_page: bool,
}

impl LayoutCursor {
    /// Both columns start at `top` on the first page
    pub fn new(top: Mm) -> LayoutCursor {
        LayoutCursor {
            left_y: top,
            right_y: top,
            page: 1,
            fresh_page: false,
        }
    }

    pub fn left_y(&self) -> Mm {
        self.left_y
    }

    pub fn right_y(&self) -> Mm {
        self.right_y
    }

    /// 1-based page the right column is on
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn advance_left(&mut self, dy: Mm) {
        self.left_y += dy;
    }

    pub fn advance_right(&mut self, dy: Mm) {
        self.right_y += dy;
        if dy > Mm(0.0) {
            self.fresh_page = false;
        }
    }

    /// Whether nothing has been written on the current continuation page yet
    pub fn on_fresh_page(&self) -> bool {
        self.fresh_page
    }

    /// Whether `height` more of the right column fits above `bottom`. A page nothing
    /// has been written on yet accepts anything, so a break is never asked for twice
    /// in a row.
    pub fn ensure_right_space(&self, height: Mm, bottom: Mm) -> bool {
        self.fresh_page || self.right_y + height <= bottom
    }

    /// How many lines of `line_height` fit in the right column above `bottom`;
    /// at least one on a fresh page
    pub fn lines_fitting_right(&self, line_height: Mm, bottom: Mm) -> usize {
        let fitting = lines_within(bottom - self.right_y, line_height);
        if self.fresh_page {
            fitting.max(1)
        } else {
            fitting
        }
    }

    pub fn lines_fitting_left(&self, line_height: Mm, bottom: Mm) -> usize {
        lines_within(bottom - self.left_y, line_height)
    }

    /// Move to the top of the next page
    pub fn reseed(&mut self, top: Mm) {
        self.page += 1;
        self.left_y = top;
        self.right_y = top;
        self.fresh_page = true;
    }

    /// When the left column ends lower than `buffer` above the right cursor, pull the
    /// right cursor down to match it. The right cursor never moves up, and nothing
    /// happens once the right column has left the first page. Returns whether the
    /// rule applied.
    pub fn reconcile(&mut self, buffer: Mm) -> bool {
        if self.page == 1 && self.left_y > self.right_y - buffer {
            self.right_y = self.right_y.max(self.left_y);
            return true;
        }
        false
    }
}

fn lines_within(space: Mm, line_height: Mm) -> usize {
    if line_height <= Mm(0.0) {
        return usize::MAX;
    }
    let count = (space / line_height).floor();
    if count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// The deterministic download name: `CV_<slug of the name>_<LANGUAGE CODE>.pdf`
pub fn resume_filename(name: &str, language: Language) -> String {
    format!(
        "CV_{}_{}.pdf",
        slugify(name),
        language.code().to_uppercase()
    )
}

/// One résumé generation against a canvas
pub struct ResumeLayout<'a, C: DocumentCanvas + ?Sized> {
    canvas: &'a mut C,
    config: &'a LayoutConfig,
    cursor: LayoutCursor,
    page_width: Mm,
    page_height: Mm,
    name: String,
}

impl<'a, C: DocumentCanvas + ?Sized> ResumeLayout<'a, C> {
    pub fn new(canvas: &'a mut C, config: &'a LayoutConfig) -> ResumeLayout<'a, C> {
        let (page_width, page_height) = canvas.page_size();
        ResumeLayout {
            canvas,
            config,
            cursor: LayoutCursor::new(config.margins.top),
            page_width,
            page_height,
            name: String::new(),
        }
    }

    /// Lay out `content` and save the result under its [resume_filename]
    pub fn render(mut self, content: &ResumeContent, language: Language) -> Result<()> {
        self.name = self.clean(&content.name);

        let rule_y = self.draw_header(content)?;
        self.cursor = LayoutCursor::new(rule_y + self.config.header_offset);

        self.draw_left_column(content, language)?;
        self.draw_right_column(content, language)?;

        let mut info = Info::new();
        info.author(&self.name).title(format!("{} — CV", self.name));
        self.canvas.set_info(info);

        let filename = resume_filename(&content.name, language);
        log::debug!(
            "saving {} after {} page(s)",
            filename,
            self.cursor.page()
        );
        self.canvas.save(&filename)
    }

    fn clean(&self, raw: &str) -> String {
        sanitize_with_limit(raw, self.config.sanitize_limit)
    }

    fn content_width(&self) -> Mm {
        self.page_width - self.config.margins.left - self.config.margins.right
    }

    fn left_x(&self) -> Mm {
        self.config.margins.left
    }

    fn right_x(&self) -> Mm {
        self.config.margins.left + self.config.left_column_width + self.config.gutter
    }

    fn right_width(&self) -> Mm {
        self.page_width - self.config.margins.right - self.right_x()
    }

    fn bottom(&self) -> Mm {
        self.page_height - self.config.margins.bottom
    }

    /// Lines of right-column text a continuation page holds
    fn lines_per_page(&self) -> usize {
        let top = self.config.margins.top + self.config.continuation_offset;
        lines_within(self.bottom() - top, self.config.right_line_height).max(1)
    }

    /// Name, headline, tagline and a rule across the page. Returns the y of the rule.
    fn draw_header(&mut self, content: &ResumeContent) -> Result<Mm> {
        let x = self.left_x();
        let width = self.content_width();
        let mut y = self.config.margins.top + Mm(6.0);

        self.canvas.set_font(FontStyle::Bold, NAME_SIZE)?;
        let name = self.canvas.split_text_to_size(&self.name, width)?;
        if !name.is_empty() {
            self.canvas.text(&name, x, y, NAME_LINE_HEIGHT)?;
            y += NAME_LINE_HEIGHT * name.len() as f32;
        }

        let headline = join_present(
            &[self.clean(&content.title), self.clean(&content.subtitle)],
            " — ",
        );
        self.canvas.set_font(FontStyle::Regular, HEADLINE_SIZE)?;
        let headline = self.canvas.split_text_to_size(&headline, width)?;
        if !headline.is_empty() {
            self.canvas.text(&headline, x, y, HEADLINE_LINE_HEIGHT)?;
            y += HEADLINE_LINE_HEIGHT * headline.len() as f32;
        }

        let line_height = self.config.right_line_height;
        self.canvas.set_font(FontStyle::Italic, TAGLINE_SIZE)?;
        let tagline = self
            .canvas
            .split_text_to_size(&self.clean(&content.tagline), width)?;
        if !tagline.is_empty() {
            self.canvas.text(&tagline, x, y, line_height)?;
            y += line_height * tagline.len() as f32;
        }

        self.canvas.set_draw_colour(self.config.rule_colour);
        self.canvas.set_line_width(HEADER_RULE_WIDTH);
        self.canvas.line((x, y), (x + width, y))?;
        Ok(y)
    }

    /// The abbreviated header at the top of every page after the first
    fn draw_continuation_header(&mut self) -> Result<()> {
        let x = self.left_x();
        let width = self.content_width();
        let top = self.config.margins.top;

        if !self.name.is_empty() {
            self.canvas
                .set_font(FontStyle::Bold, CONTINUATION_NAME_SIZE)?;
            self.canvas.text(
                &[self.name.clone()],
                x,
                top + Mm(3.0),
                self.config.right_line_height,
            )?;
        }

        let rule_y = top + Mm(5.0);
        self.canvas.set_draw_colour(self.config.rule_colour);
        self.canvas.set_line_width(CONTINUATION_RULE_WIDTH);
        self.canvas.line((x, rule_y), (x + width, rule_y))
    }

    fn new_page(&mut self) -> Result<()> {
        self.canvas.add_page()?;
        log::debug!("right column continues on page {}", self.cursor.page() + 1);
        self.draw_continuation_header()?;
        self.cursor
            .reseed(self.config.margins.top + self.config.continuation_offset);
        Ok(())
    }

    fn draw_left_column(&mut self, content: &ResumeContent, language: Language) -> Result<()> {
        let labels = language.labels();
        let sections = &content.sections;

        let contact = self.contact_lines(content);
        self.add_left_section(&self.clean(&sections.contact.title), &contact)?;

        let links = self.link_lines(content);
        self.add_left_section(labels.links, &links)?;

        let highlights = content
            .stats
            .iter()
            .map(|stat| join_present(&[self.clean(&stat.value), self.clean(&stat.label)], " — "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        self.add_left_section(labels.highlights, &highlights)?;

        let skills = sections
            .skills
            .categories
            .iter()
            .map(|category| {
                let items = category
                    .items
                    .iter()
                    .map(|item| self.clean(item))
                    .filter(|item| !item.is_empty())
                    .collect::<Vec<_>>()
                    .join(" • ");
                join_present(&[self.clean(&category.title), items], ": ")
            })
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        self.add_left_section(&self.clean(&sections.skills.title), &skills)
    }

    fn contact_lines(&self, content: &ResumeContent) -> Vec<String> {
        let mut lines: Vec<String> = [&content.location, &content.phone, &content.email]
            .into_iter()
            .map(|field| self.clean(field))
            .filter(|field| !field.is_empty())
            .collect();
        if let Some(whatsapp) = &content.whatsapp {
            let whatsapp = self.clean(whatsapp);
            if !whatsapp.is_empty() {
                lines.push(format!("WhatsApp: {whatsapp}"));
            }
        }
        lines
    }

    fn link_lines(&self, content: &ResumeContent) -> Vec<String> {
        let social = &content.social;
        [
            ("LinkedIn", &social.linkedin),
            ("GitHub", &social.github),
            ("Portfolio", &social.portfolio),
        ]
        .into_iter()
        .filter_map(|(platform, url)| {
            let url = sanitize_url(url.as_deref()?);
            (!url.is_empty()).then(|| format!("{platform}: {url}"))
        })
        .collect()
    }

    /// A titled block of short lines in the left column. Nothing is drawn for an
    /// empty block, and nothing is drawn past the bottom margin: lines that don't fit
    /// on the first page are dropped.
    fn add_left_section(&mut self, title: &str, lines: &[String]) -> Result<()> {
        if lines.is_empty() {
            log::debug!("left section {title:?} is empty, skipping it");
            return Ok(());
        }

        let x = self.left_x();
        let width = self.config.left_column_width;
        let line_height = self.config.left_line_height;
        let bottom = self.bottom();

        if self.cursor.left_y() + LEFT_TITLE_STEP + line_height > bottom {
            log::warn!("no room left for the {title:?} section, dropping it");
            return Ok(());
        }

        self.canvas.set_font(FontStyle::Bold, LEFT_TITLE_SIZE)?;
        self.canvas
            .text(&[title.to_string()], x, self.cursor.left_y(), line_height)?;
        self.cursor.advance_left(LEFT_TITLE_STEP);

        self.canvas.set_font(FontStyle::Regular, LEFT_BODY_SIZE)?;
        let mut dropped = 0;
        for line in lines {
            let wrapped = self.canvas.split_text_to_size(line, width)?;
            let kept = wrapped
                .len()
                .min(self.cursor.lines_fitting_left(line_height, bottom));
            dropped += wrapped.len() - kept;
            if kept > 0 {
                self.canvas
                    .text(&wrapped[..kept], x, self.cursor.left_y(), line_height)?;
                self.cursor.advance_left(line_height * kept as f32);
            }
        }
        if dropped > 0 {
            log::warn!("{dropped} line(s) of the {title:?} section don't fit on the page");
        }

        self.cursor.advance_left(LEFT_SECTION_GAP);
        Ok(())
    }

    fn draw_right_column(&mut self, content: &ResumeContent, language: Language) -> Result<()> {
        let sections = &content.sections;

        self.cursor.reconcile(self.config.reconcile_buffer);
        log::debug!("right column starts at {:?}", self.cursor.right_y());

        let profile = self.clean(&content.description);
        if !profile.is_empty() {
            self.section_title(language.labels().profile)?;
            self.paragraph(&profile)?;
        }

        if !sections.experience.jobs.is_empty() {
            self.section_title(&self.clean(&sections.experience.title))?;
            for job in &sections.experience.jobs {
                self.job_block(job)?;
            }
        }

        if !sections.projects.items.is_empty() {
            self.section_title(&self.clean(&sections.projects.title))?;
            for project in &sections.projects.items {
                self.project_block(project)?;
            }
        }

        let contact = &sections.contact;
        let closing = [&contact.subtitle, &contact.closing, &contact.signature]
            .into_iter()
            .map(|part| self.clean(part))
            .collect::<Vec<_>>();
        if closing.iter().all(String::is_empty) {
            return Ok(());
        }
        self.section_title(&self.clean(&contact.title))?;
        self.write_right(&closing[0], FontStyle::Regular, BODY_SIZE)?;
        self.write_right(&closing[1], FontStyle::Regular, BODY_SIZE)?;
        self.write_right(&closing[2], FontStyle::Italic, BODY_SIZE)?;
        Ok(())
    }

    fn job_block(&mut self, job: &ExperienceJob) -> Result<()> {
        self.write_right(&self.clean(&job.role), FontStyle::Bold, BODY_SIZE)?;

        let employer = join_present(&[self.clean(&job.company), self.clean(&job.period)], " • ");
        self.write_right(&employer, FontStyle::Italic, BODY_SIZE)?;

        self.paragraph(&self.clean(&job.description))?;

        let tags = self.tag_list(&job.tags);
        if !tags.is_empty() {
            self.write_right(&format!("Skills: {tags}"), FontStyle::Regular, BODY_SIZE)?;
        }

        self.cursor.advance_right(BLOCK_GAP);
        Ok(())
    }

    fn project_block(&mut self, project: &ProjectItem) -> Result<()> {
        self.write_right(&self.clean(&project.title), FontStyle::Bold, BODY_SIZE)?;
        self.write_right(&self.clean(&project.description), FontStyle::Regular, BODY_SIZE)?;

        let tags = self.tag_list(&project.tags);
        if !tags.is_empty() {
            self.write_right(&format!("Tags: {tags}"), FontStyle::Regular, BODY_SIZE)?;
        }
        if let Some(link) = &project.link {
            self.write_right(
                &format!("Link: {}", sanitize_url(link)),
                FontStyle::Regular,
                BODY_SIZE,
            )?;
        }

        self.cursor.advance_right(BLOCK_GAP);
        Ok(())
    }

    fn tag_list(&self, tags: &[String]) -> String {
        tags.iter()
            .map(|tag| self.clean(tag))
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn section_title(&mut self, title: &str) -> Result<()> {
        if title.is_empty() {
            return Ok(());
        }
        // keep the title on the same page as the first line under it
        self.ensure_space(SECTION_TITLE_STEP + self.config.right_line_height)?;
        let (x, y) = (self.right_x(), self.cursor.right_y());
        self.canvas.set_font(FontStyle::Bold, SECTION_TITLE_SIZE)?;
        self.canvas
            .text(&[title.to_string()], x, y, self.config.right_line_height)?;
        self.cursor.advance_right(SECTION_TITLE_STEP);
        Ok(())
    }

    fn paragraph(&mut self, text: &str) -> Result<()> {
        if self.write_right(text, FontStyle::Regular, BODY_SIZE)? > 0 {
            self.cursor.advance_right(PARAGRAPH_GAP);
        }
        Ok(())
    }

    fn ensure_space(&mut self, height: Mm) -> Result<()> {
        if !self.cursor.ensure_right_space(height, self.bottom()) {
            self.new_page()?;
        }
        Ok(())
    }

    /// Wrap already sanitized `text` to the right column and write it, returning the
    /// number of lines written
    fn write_right(&mut self, text: &str, style: FontStyle, size: Pt) -> Result<usize> {
        self.canvas.set_font(style, size)?;
        let lines = self.canvas.split_text_to_size(text, self.right_width())?;
        self.write_block(&lines, style, size)?;
        Ok(lines.len())
    }

    /// Writes `lines` in the right column, starting a new page first when they don't
    /// fit. Blocks taller than a page are split across as many pages as they need.
    fn write_block(&mut self, lines: &[String], style: FontStyle, size: Pt) -> Result<()> {
        let line_height = self.config.right_line_height;
        let bottom = self.bottom();
        let mut remaining = lines;

        while !remaining.is_empty() {
            let fitting = self.cursor.lines_fitting_right(line_height, bottom);
            if fitting < remaining.len()
                && (fitting == 0 || remaining.len() <= self.lines_per_page())
                && !self.cursor.on_fresh_page()
            {
                self.new_page()?;
                continue;
            }

            let (chunk, rest) = remaining.split_at(fitting.min(remaining.len()));
            let (x, y) = (self.right_x(), self.cursor.right_y());
            // the continuation header may have switched fonts
            self.canvas.set_font(style, size)?;
            self.canvas.text(chunk, x, y, line_height)?;
            self.cursor.advance_right(line_height * chunk.len() as f32);
            remaining = rest;
        }
        Ok(())
    }
}

/// Joins the non-empty `parts` with `separator`
fn join_present(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Lay out `content` in `language` with the default [LayoutConfig] and save it
/// through `canvas`.
///
/// The whole layout runs to completion or fails; any canvas error aborts the
/// generation and is returned as-is.
pub fn generate_resume_document<C: DocumentCanvas + ?Sized>(
    canvas: &mut C,
    content: &ResumeContent,
    language: Language,
) -> Result<()> {
    generate_resume_document_with(canvas, content, language, &LayoutConfig::default())
}

/// [generate_resume_document] with a custom layout
pub fn generate_resume_document_with<C: DocumentCanvas + ?Sized>(
    canvas: &mut C,
    content: &ResumeContent,
    language: Language,
    config: &LayoutConfig,
) -> Result<()> {
    ResumeLayout::new(canvas, config).render(content, language)
}

/// Load the fonts in `config`, render `content` to PDF and hand the file to `sink`.
/// Returns the name the file was saved under.
pub fn render_resume_pdf<S: SaveSink + Send + 'static>(
    config: &CanvasConfig,
    sink: S,
    content: &ResumeContent,
    language: Language,
) -> Result<String> {
    let mut canvas = PdfCanvas::load(config)?.with_sink(sink);
    generate_resume_document(&mut canvas, content, language)?;
    Ok(resume_filename(&content.name, language))
}

/// Like [render_resume_pdf], loading the fonts asynchronously before layout starts
#[cfg(feature = "async")]
pub async fn generate_resume_pdf<S: SaveSink + Send + 'static>(
    config: &CanvasConfig,
    sink: S,
    content: &ResumeContent,
    language: Language,
) -> Result<String> {
    let mut canvas = PdfCanvas::load_async(config).await?.with_sink(sink);
    generate_resume_document(&mut canvas, content, language)?;
    Ok(resume_filename(&content.name, language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_columns_move_independently() {
        let mut cursor = LayoutCursor::new(Mm(40.0));
        cursor.advance_left(Mm(10.0));
        cursor.advance_right(Mm(3.0));
        assert_eq!(cursor.left_y(), Mm(50.0));
        assert_eq!(cursor.right_y(), Mm(43.0));
    }

    #[test]
    fn cursor_space_checks_respect_the_bottom() {
        let cursor = LayoutCursor::new(Mm(270.0));
        assert!(cursor.ensure_right_space(Mm(12.0), Mm(282.0)));
        assert!(!cursor.ensure_right_space(Mm(12.5), Mm(282.0)));
        assert_eq!(cursor.lines_fitting_right(Mm(5.0), Mm(282.0)), 2);
        assert_eq!(cursor.lines_fitting_left(Mm(5.0), Mm(260.0)), 0);
    }

    #[test]
    fn fresh_pages_accept_anything_once() {
        let mut cursor = LayoutCursor::new(Mm(270.0));
        cursor.reseed(Mm(23.0));
        assert_eq!(cursor.page(), 2);
        assert!(cursor.ensure_right_space(Mm(1000.0), Mm(282.0)));
        assert_eq!(cursor.lines_fitting_right(Mm(500.0), Mm(282.0)), 1);
        cursor.advance_right(Mm(5.0));
        assert!(!cursor.ensure_right_space(Mm(1000.0), Mm(282.0)));
    }

    #[test]
    fn reconciliation_only_pulls_down_on_the_first_page() {
        let mut cursor = LayoutCursor::new(Mm(40.0));
        cursor.advance_left(Mm(60.0));
        cursor.advance_right(Mm(20.0));
        assert!(cursor.reconcile(Mm(4.0)));
        assert_eq!(cursor.right_y(), Mm(100.0));

        // within the buffer, but matching would move the right cursor up
        let mut cursor = LayoutCursor::new(Mm(40.0));
        cursor.advance_left(Mm(58.0));
        cursor.advance_right(Mm(60.0));
        assert!(cursor.reconcile(Mm(4.0)));
        assert_eq!(cursor.right_y(), Mm(100.0));

        // both columns at the same height
        let mut cursor = LayoutCursor::new(Mm(40.0));
        assert!(cursor.reconcile(Mm(4.0)));
        assert_eq!(cursor.right_y(), Mm(40.0));

        // the right column is already further down
        let mut cursor = LayoutCursor::new(Mm(40.0));
        cursor.advance_right(Mm(80.0));
        assert!(!cursor.reconcile(Mm(4.0)));
        assert_eq!(cursor.right_y(), Mm(120.0));

        let mut cursor = LayoutCursor::new(Mm(40.0));
        cursor.advance_left(Mm(200.0));
        cursor.reseed(Mm(23.0));
        cursor.advance_left(Mm(100.0));
        assert!(!cursor.reconcile(Mm(4.0)));
        assert_eq!(cursor.right_y(), Mm(23.0));
    }

    #[test]
    fn filenames_are_deterministic() {
        assert_eq!(
            resume_filename("José Carlos Torres Rivera", Language::TARGET),
            "CV_jose_carlos_torres_rivera_EN.pdf"
        );
        assert_eq!(
            resume_filename("José Carlos Torres Rivera", Language::SOURCE),
            "CV_jose_carlos_torres_rivera_ES.pdf"
        );
        assert_eq!(resume_filename("Dr. X.", Language::TARGET), "CV_dr_x__EN.pdf");
    }

    #[test]
    fn layout_config_defaults_fill_missing_fields() {
        let config = LayoutConfig::from_json(r#"{ "gutter": 10, "sanitize_limit": 80 }"#).unwrap();
        assert_eq!(config.gutter, Mm(10.0));
        assert_eq!(config.sanitize_limit, 80);
        assert_eq!(config.left_column_width, Mm(58.0));
    }

    #[test]
    fn joins_only_present_parts() {
        let parts = ["Acme".to_string(), String::new(), "2020".to_string()];
        assert_eq!(join_present(&parts, " • "), "Acme • 2020");
        assert_eq!(join_present(&[String::new()], " • "), "");
    }
}
