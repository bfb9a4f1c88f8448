use crate::{
    error::SheetError,
    image::EmbeddedImage,
    info::Info,
    page::Page,
    pagesize::PageSpec,
    units::{format_number, Mm},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use id_arena::{Arena, Id};
use quick_xml::escape::escape;
use std::io::Write;
use tracing::debug;

/// Title used when the [Info] block doesn't provide one
pub const DEFAULT_DOCUMENT_TITLE: &str = "Italic Calligraphy Practice Sheets";

#[derive(Default)]
/// A document stores embedded images and the ordered pages that show them, then renders
/// them out as a flat OpenDocument text file with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub images: Arena<EmbeddedImage>,
    pub pages: Vec<Page>,
}

impl Document {
    /// Sets information about the document. If not provided, a default title is used
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, so several pages may show the same image. The returned value is the ID of
    /// the image.
    pub fn add_image(&mut self, image: EmbeddedImage) -> Id<EmbeddedImage> {
        self.images.alloc(image)
    }

    /// Add a page showing the image identified by `image_id`, centred within the margins of
    /// `spec`. The page is added to the end of the document and its index returned.
    ///
    /// Returns [None] if no such image was added to this document.
    pub fn add_page(&mut self, spec: PageSpec, image_id: Id<EmbeddedImage>) -> Option<usize> {
        let image = self.images.get(image_id)?;
        let page = Page::centered(spec, image_id, image.width, image.height);
        debug!(
            page = self.pages.len(),
            paper = page.spec.name(),
            x = *page.position.x1,
            y = *page.position.y1,
            "placed image"
        );
        self.pages.push(page);
        Some(self.pages.len() - 1)
    }

    /// Convenience for adding an image and a page showing it in one go
    pub fn add_image_page(&mut self, spec: PageSpec, image: EmbeddedImage) -> usize {
        let id = self.add_image(image);
        // the image was just added, so the page can always be placed
        self.add_page(spec, id)
            .unwrap_or_else(|| unreachable!("image {} missing from its own document", id.index()))
    }

    /// Distinct page layouts in order of first appearance, and which layout each page uses
    fn page_layouts(&self) -> (Vec<&PageSpec>, Vec<usize>) {
        let mut layouts: Vec<&PageSpec> = Vec::new();
        let mut assignment = Vec::with_capacity(self.pages.len());
        for page in self.pages.iter() {
            let index = match layouts.iter().position(|l| l.same_layout(&page.spec)) {
                Some(index) => index,
                None => {
                    layouts.push(&page.spec);
                    layouts.len() - 1
                }
            };
            assignment.push(index);
        }
        (layouts, assignment)
    }

    /// Write the entire document to the writer. The document is rendered in memory first
    /// and written with a single call; if that write fails the output is incomplete and
    /// must be discarded.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), SheetError> {
        let rendered = self.render()?;
        w.write_all(rendered.as_slice())?;
        w.flush()?;
        Ok(())
    }

    /// Render the document as a flat OpenDocument text file
    pub fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        let default_info = Info::default();
        let info = self.info.as_ref().unwrap_or(&default_info);
        let now = info.creation_time();
        let timestamp = now.format("%Y-%m-%dT%H:%M:%S").to_string();
        let (layouts, assignment) = self.page_layouts();

        let mut out: Vec<u8> = Vec::new();
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
        writeln!(
            out,
            r#"<office:document xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" xmlns:svg="urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0" office:version="1.2" office:mimetype="application/vnd.oasis.opendocument.text">"#
        )?;

        // metadata
        let mut description = String::new();
        if let Some(text) = &info.description {
            description.push_str(text);
            description.push_str("\n\n");
        }
        let sizes: Vec<String> = layouts
            .iter()
            .map(|spec| {
                format!(
                    "Pages are {}x{} with {} margins.",
                    length(spec, spec.width()),
                    length(spec, spec.height()),
                    length(spec, spec.margin()),
                )
            })
            .collect();
        description.push_str(&sizes.join("  "));
        if let Some(dedication) = info.dedication(now.date_naive()) {
            description.push_str("\n\n");
            description.push_str(&dedication);
        }

        writeln!(out, "\t<office:meta>")?;
        writeln!(out, "\t\t<meta:creation-date>{timestamp}</meta:creation-date>")?;
        writeln!(
            out,
            "\t\t<dc:description>{}</dc:description>",
            escape(description.as_str())
        )?;
        writeln!(
            out,
            "\t\t<dc:title>{}</dc:title>",
            escape(info.title.as_deref().unwrap_or(DEFAULT_DOCUMENT_TITLE))
        )?;
        writeln!(out, "\t\t<dc:date>{timestamp}</dc:date>")?;
        writeln!(out, "\t</office:meta>")?;

        // shared styles
        writeln!(out, "\t<office:styles>")?;
        writeln!(
            out,
            r#"		<style:style style:name="Standard" style:family="paragraph" style:class="text"/>"#
        )?;
        writeln!(
            out,
            r#"		<style:style style:name="Graphics" style:family="graphic">"#
        )?;
        writeln!(
            out,
            r#"			<style:graphic-properties text:anchor-type="paragraph" style:wrap="none" style:vertical-pos="from-top" style:vertical-rel="paragraph" style:horizontal-pos="from-left" style:horizontal-rel="paragraph"/>"#
        )?;
        writeln!(out, "\t\t</style:style>")?;
        writeln!(out, "\t</office:styles>")?;

        // per-layout paragraph styles switch master pages, which also breaks the page
        writeln!(out, "\t<office:automatic-styles>")?;
        for (i, _) in layouts.iter().enumerate() {
            writeln!(
                out,
                r#"		<style:style style:name="M{i}" style:family="paragraph" style:parent-style-name="Standard" style:master-page-name="{}"/>"#,
                master_page_name(i)
            )?;
        }
        writeln!(
            out,
            r#"		<style:style style:name="Break" style:family="paragraph" style:parent-style-name="Standard">"#
        )?;
        writeln!(
            out,
            r#"			<style:paragraph-properties fo:break-before="page"/>"#
        )?;
        writeln!(out, "\t\t</style:style>")?;
        writeln!(
            out,
            r#"		<style:style style:name="fr1" style:family="graphic" style:parent-style-name="Graphics">"#
        )?;
        writeln!(
            out,
            r#"			<style:graphic-properties style:mirror="none"/>"#
        )?;
        writeln!(out, "\t\t</style:style>")?;
        for (i, spec) in layouts.iter().enumerate() {
            let margin = length(spec, spec.margin());
            writeln!(out, r#"		<style:page-layout style:name="pm{i}">"#)?;
            writeln!(
                out,
                r#"			<style:page-layout-properties fo:page-width="{}" fo:page-height="{}" fo:margin-top="{margin}" fo:margin-bottom="{margin}" fo:margin-left="{margin}" fo:margin-right="{margin}"/>"#,
                length(spec, spec.width()),
                length(spec, spec.height()),
            )?;
            writeln!(out, "\t\t</style:page-layout>")?;
        }
        writeln!(out, "\t</office:automatic-styles>")?;

        writeln!(out, "\t<office:master-styles>")?;
        for (i, _) in layouts.iter().enumerate() {
            writeln!(
                out,
                r#"		<style:master-page style:name="{}" style:page-layout-name="pm{i}"/>"#,
                master_page_name(i)
            )?;
        }
        writeln!(out, "\t</office:master-styles>")?;

        // body: one paragraph per page, each anchoring a single frame
        writeln!(out, "\t<office:body>")?;
        writeln!(out, "\t\t<office:text>")?;
        let mut previous_layout: Option<usize> = None;
        for (index, (page, layout)) in self.pages.iter().zip(assignment.iter()).enumerate() {
            let paragraph_style = if previous_layout == Some(*layout) {
                "Break".to_string()
            } else {
                format!("M{layout}")
            };
            previous_layout = Some(*layout);
            self.write_page(&mut out, index, page, &paragraph_style)?;
        }
        writeln!(out, "\t\t</office:text>")?;
        writeln!(out, "\t</office:body>")?;
        writeln!(out, "</office:document>")?;

        Ok(out)
    }

    fn write_page(
        &self,
        out: &mut Vec<u8>,
        index: usize,
        page: &Page,
        paragraph_style: &str,
    ) -> Result<(), std::io::Error> {
        let spec = &page.spec;
        let position = &page.position;
        write!(
            out,
            r#"			<text:p text:style-name="{paragraph_style}"><draw:frame draw:style-name="fr1" draw:name="n{index}" text:anchor-type="paragraph" svg:x="{}" svg:y="{}" svg:width="{}" svg:height="{}" draw:z-index="0">"#,
            length(spec, position.x1),
            length(spec, position.y1),
            length(spec, position.width()),
            length(spec, position.height()),
        )?;
        match self.images.get(page.image_id) {
            Some(image) => write!(
                out,
                r#"<draw:image draw:mime-type="{}"><office:binary-data>{}</office:binary-data></draw:image>"#,
                image.mime_type,
                BASE64.encode(&image.data)
            )?,
            None => write!(out, "<draw:image/>")?,
        }
        writeln!(out, "</draw:frame></text:p>")
    }
}

fn master_page_name(layout: usize) -> String {
    if layout == 0 {
        "Standard".to_string()
    } else {
        format!("Page{layout}")
    }
}

/// A length in the page's unit, with its suffix
fn length(spec: &PageSpec, value: Mm) -> String {
    let unit = spec.unit();
    format!("{}{}", format_number(unit.from_mm(value), 4), unit.suffix())
}
