use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    CvError, Result,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document stores all the pages and fonts of the PDF and renders them out
/// with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn page_mut(&mut self, id: Id<Page>) -> Option<&mut Page> {
        self.pages.get_mut(id)
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a font to the document. Fonts are shared by every page.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Write the entire document to the writer. The whole document is rendered in
    /// memory first, then written out in one go.
    pub fn write<W: Write>(&self, mut w: W) -> Result<()> {
        let bytes = self.render()?;
        w.write_all(&bytes).map_err(Into::into)
    }

    /// Render the document into PDF bytes
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, id) in self.page_order.iter().enumerate() {
            let page = self.pages.get(*id).ok_or(CvError::PageMissing)?;
            page.write(&mut refs, page_index, &self.fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        Ok(writer.finish())
    }
}
