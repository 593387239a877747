use crate::{
    refs::{ObjectReferences, RefType},
    units::Pt,
    Result,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed TTF/OTF font. The whole font program is embedded in the generated PDF,
/// so a CV using three styles carries three font files.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font can't be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Read and parse a font file from disk
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Font> {
        let bytes = std::fs::read(path)?;
        Font::load(bytes)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the font declares one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the font declares one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self, size: Pt) -> f32 {
        *size / self.face().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        Pt(self.face().ascender() as f32 * self.scaling(size))
    }

    /// Distance from the baseline to the bottom of the font at the given size (usually negative)
    pub fn descent(&self, size: Pt) -> Pt {
        Pt(self.face().descender() as f32 * self.scaling(size))
    }

    /// How far a second row of text sits below the first one with the font's own spacing
    pub fn line_height(&self, size: Pt) -> Pt {
        let leading = Pt(self.face().line_gap() as f32 * self.scaling(size));
        leading + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph to draw for `ch`: the real glyph when the font has one, otherwise the
    /// replacement character, a question mark, or finally `.notdef`
    pub fn glyph_id_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Horizontal advance of a single character at the given size
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let gid = GlyphId(self.glyph_id_or_fallback(ch));
        let advance = self.face().glyph_hor_advance(gid).unwrap_or_default();
        Pt(advance as f32 * self.scaling(size))
    }

    /// Every glyph reachable through a unicode cmap subtable, keyed by glyph id
    fn unicode_glyphs(&self) -> BTreeMap<u16, char> {
        let mut glyphs = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return glyphs;
        };

        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    glyphs.entry(gid.0).or_insert(ch);
                }
            });
        }
        glyphs
    }

    /// Advances of every mapped glyph in PDF glyph-space units (1/1000 em)
    fn glyph_widths(&self, glyphs: &BTreeMap<u16, char>) -> BTreeMap<u16, f32> {
        let scaling = 1000.0 / self.face().units_per_em() as f32;
        glyphs
            .keys()
            .filter_map(|&gid| {
                self.face()
                    .glyph_hor_advance(GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let index = id.index();
        let glyphs = self.unicode_glyphs();
        let widths = self.glyph_widths(&glyphs);

        let font_id = refs.gen(RefType::Font(index));
        let descriptor_id = self.write_descriptor(refs, index, &widths, writer);
        let cid_font_id = self.write_cid_font(refs, index, descriptor_id, &widths, writer);
        let to_unicode_id = self.write_to_unicode(refs, index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font_name(index).as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid_font(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        descriptor_id: Ref,
        widths: &BTreeMap<u16, f32>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::CidFont(index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font_name(index).as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(most_common_width(widths));

        // group glyph ids into runs of consecutive ids, one W array entry per run
        let mut w = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, &width) in widths.iter() {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => run.push(width),
                Some(start) => {
                    w.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                    run.push(width);
                }
                None => {
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            w.consecutive(start, run.drain(..));
        }
        w.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        widths: &BTreeMap<u16, f32>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let max_width = widths.values().copied().fold(0.0_f32, f32::max);
        let avg_width = if widths.is_empty() {
            0.0
        } else {
            widths.values().sum::<f32>() / widths.len() as f32
        };
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let name = self.name().unwrap_or_else(|| base_font_name(index));
        let family = self.family().unwrap_or_else(|| name.clone());

        let id = refs.gen(RefType::FontDescriptor(index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face.ascender() as f32 * scaling);
        descriptor.cap_height(cap_height);
        descriptor.x_height(face.x_height().map(|h| h as f32 * scaling).unwrap_or(cap_height));
        // no reliable source for the dominant stem width in TrueType fonts
        descriptor.stem_v(if face.is_bold() { 120.0 } else { 80.0 });
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(index));
        let cmap = to_unicode_cmap(glyphs);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);
        id
    }
}

fn base_font_name(index: usize) -> String {
    format!("F{index}")
}

/// The width shared by the most glyphs, used as the CID font's default width
fn most_common_width(widths: &BTreeMap<u16, f32>) -> f32 {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for width in widths.values() {
        *counts.entry(width.round() as u32).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .map(|(width, _)| width as f32)
        .unwrap_or(1000.0)
}

/// Build a ToUnicode CMap so text in the PDF can be searched and copied. `bfchar`
/// blocks hold at most 100 entries and never straddle a change of high byte.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo\n\
         << /Registry (Adobe)\n\
         /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
    for (&gid, &ch) in glyphs.iter() {
        let starts_block = match blocks.last() {
            Some(block) => block.len() >= 100 || block[0].0 >> 8 != gid >> 8,
            None => true,
        };
        if starts_block {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push((gid, ch));
        }
    }

    for block in blocks {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let encoded: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            cmap.push_str(&format!("<{gid:04x}> <{encoded}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    cmap
}
