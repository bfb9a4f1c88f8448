//! Generates practice sheets for every combination of nib width and page, and gathers them
//! into documents.
//!
//! Combinations are visited page specs first, nib widths second: for page specs `[a4,
//! letter]` and nib widths `[2, 3]` the order is `a4/2`, `a4/3`, `letter/2`, `letter/3`.
//! That order is kept in every output no matter how the sheets were computed, so documents
//! always list their pages the same way.
//!
//! # Example
//!
//! ```
//! use italic_sheets::{Batch, BatchConfig, Mm, PageSpec};
//!
//! let pages = vec![PageSpec::new(Mm(210.0), Mm(297.0), Mm(5.0), "a4").unwrap()];
//! let batch = Batch::new(BatchConfig::default(), vec![Mm(2.0), Mm(3.0)], pages).unwrap();
//! let output = batch.run().unwrap();
//!
//! assert_eq!(output.sheets.len(), 2);
//! assert_eq!(output.documents.len(), 1);
//! assert_eq!(output.documents[0].file_name, "italic-sheets.a4.fodt");
//! ```

use crate::error::SheetError;
use crate::hand::HandProportions;
use crate::image::EmbeddedImage;
use crate::image_spec::ImageSpec;
use crate::info::Info;
use crate::layout::check_slant_density;
use crate::pagesize::PageSpec;
use crate::sheet::Sheet;
use crate::style::SheetStyle;
use crate::template::{Template, NIB_WIDTH_KEY, PAPER_SIZE_KEY};
use crate::units::{format_number, LengthUnit, Mm, Resolution};
use crate::validate;
use crate::Document;
use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_SVG_FILENAME: &str = "italic-sheet-{nibwidth}mm.{papersize}.svg";
pub const DEFAULT_DOCUMENT_FILENAME: &str = "italic-sheets.{papersize}.fodt";
pub const DEFAULT_TITLE: &str = "Italic Calligraphy Practice Sheets ({papersize})";

/// How sheets are gathered into documents
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Grouping {
    /// One document per page spec, holding a page for every nib width
    #[default]
    PerPageSpec,
    /// A single document holding every sheet
    Single,
}

/// Everything about a batch except the nib widths and pages themselves
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub proportions: HandProportions,
    pub style: SheetStyle,
    pub resolution: Resolution,
    /// Unit that document lengths are written in
    pub unit: LengthUnit,
    /// Names each sheet's drawing; may use `{nibwidth}` and `{papersize}`
    pub svg_filename: Template,
    /// Names each document; may use `{papersize}`
    pub document_filename: Template,
    /// Each document's title; may use `{papersize}`
    pub title: Template,
    /// Each document's description; may use `{papersize}`
    pub description: Template,
    pub dedication_author: Option<String>,
    pub grouping: Grouping,
    /// Compute sheets on the rayon thread pool
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        // the defaults are known to be well-formed
        let template = |source: &str, keys: &[&str]| {
            Template::new(source, keys).unwrap_or_else(|_| unreachable!("bad default template"))
        };
        BatchConfig {
            proportions: HandProportions::default(),
            style: SheetStyle::default(),
            resolution: Resolution::default(),
            unit: LengthUnit::default(),
            svg_filename: template(DEFAULT_SVG_FILENAME, &[NIB_WIDTH_KEY, PAPER_SIZE_KEY]),
            document_filename: template(DEFAULT_DOCUMENT_FILENAME, &[PAPER_SIZE_KEY]),
            title: template(DEFAULT_TITLE, &[PAPER_SIZE_KEY]),
            description: template("", &[PAPER_SIZE_KEY]),
            dedication_author: None,
            grouping: Grouping::default(),
            parallel: true,
        }
    }
}

/// One generated sheet and the combination it was generated for
#[derive(Debug, Clone)]
pub struct RenderedSheet {
    /// Position in the batch's iteration order
    pub index: usize,
    pub nib_width: Mm,
    pub page: PageSpec,
    pub file_name: String,
    pub sheet: Sheet,
    pub image: EmbeddedImage,
}

pub struct BatchDocument {
    pub file_name: String,
    pub document: Document,
}

pub struct BatchOutput {
    pub sheets: Vec<RenderedSheet>,
    pub documents: Vec<BatchDocument>,
}

impl BatchOutput {
    /// Write every drawing and document into `dir`, returning the paths written in order.
    /// Each file is rendered completely before it is written.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, SheetError> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.sheets.len() + self.documents.len());
        for sheet in self.sheets.iter() {
            let path = dir.join(&sheet.file_name);
            std::fs::write(&path, &sheet.image.data)?;
            debug!(path = %path.display(), "wrote drawing");
            written.push(path);
        }
        for doc in self.documents.iter() {
            let path = dir.join(&doc.file_name);
            let rendered = doc.document.render()?;
            std::fs::write(&path, rendered)?;
            info!(path = %path.display(), pages = doc.document.pages.len(), "wrote document");
            written.push(path);
        }
        Ok(written)
    }
}

/// A validated cross product of nib widths and page specs
#[derive(Debug, Clone)]
pub struct Batch {
    config: BatchConfig,
    nib_widths: Vec<Mm>,
    pages: Vec<PageSpec>,
}

impl Batch {
    /// Check every parameter of the batch up front, so that a bad value is reported before
    /// any sheet is generated
    pub fn new(
        config: BatchConfig,
        nib_widths: Vec<Mm>,
        pages: Vec<PageSpec>,
    ) -> Result<Batch, SheetError> {
        config.proportions.validate()?;
        config.style.validate()?;
        validate::non_empty("nib widths", nib_widths.len(), "must list at least one nib width")?;
        validate::non_empty("page specs", pages.len(), "must list at least one page spec")?;
        for nib in nib_widths.iter() {
            validate::positive("nib width", **nib)?;
        }
        for page in pages.iter() {
            for nib in nib_widths.iter() {
                check_slant_density(
                    config.proportions.slant_angle,
                    *nib * config.style.box_width,
                    page.content_width(),
                    page.content_height(),
                )?;
            }
        }
        let pages = pages
            .into_iter()
            .map(|page| page.with_unit(config.unit))
            .collect();

        Ok(Batch {
            config,
            nib_widths,
            pages,
        })
    }

    /// Every (page, nib width) combination in iteration order
    pub fn combinations(&self) -> Vec<(&PageSpec, Mm)> {
        self.pages
            .iter()
            .flat_map(|page| self.nib_widths.iter().map(move |nib| (page, *nib)))
            .collect()
    }

    /// Generate every sheet and assemble the documents
    pub fn run(&self) -> Result<BatchOutput, SheetError> {
        let created = Local::now();
        let jobs = self.combinations();
        info!(
            sheets = jobs.len(),
            pages = self.pages.len(),
            nib_widths = self.nib_widths.len(),
            "generating sheets"
        );

        // indexed parallel iterators collect in input order regardless of completion order
        let sheets: Vec<RenderedSheet> = if self.config.parallel {
            jobs.par_iter()
                .enumerate()
                .map(|(index, (page, nib))| self.render_sheet(index, page, *nib, created))
                .collect::<Result<_, _>>()?
        } else {
            jobs.iter()
                .enumerate()
                .map(|(index, (page, nib))| self.render_sheet(index, page, *nib, created))
                .collect::<Result<_, _>>()?
        };

        let documents = self.assemble(&sheets, created);
        Ok(BatchOutput { sheets, documents })
    }

    fn render_sheet(
        &self,
        index: usize,
        page: &PageSpec,
        nib_width: Mm,
        created: DateTime<Local>,
    ) -> Result<RenderedSheet, SheetError> {
        let hand = self.config.proportions.with_nib_width(nib_width)?;
        let image_spec = ImageSpec::new(
            page.content_width(),
            page.content_height(),
            self.config.resolution,
        )?;
        let sheet = Sheet::new(hand, image_spec, self.config.style.clone())?;

        let mut info = Info::new();
        info.created(created);
        if let Some(author) = &self.config.dedication_author {
            info.dedicate(author);
        }
        let image = EmbeddedImage::from_sheet(&sheet, &info)?;

        let nib = format_number(*nib_width, 4);
        let file_name = self
            .config
            .svg_filename
            .render(&[(NIB_WIDTH_KEY, nib.as_str()), (PAPER_SIZE_KEY, page.name())]);
        debug!(
            index,
            paper = page.name(),
            nib_width = *nib_width,
            guides = sheet.guides().len(),
            slants = sheet.slants().len(),
            file = %file_name,
            "generated sheet"
        );

        Ok(RenderedSheet {
            index,
            nib_width,
            page: page.clone(),
            file_name,
            sheet,
            image,
        })
    }

    fn assemble(&self, sheets: &[RenderedSheet], created: DateTime<Local>) -> Vec<BatchDocument> {
        match self.config.grouping {
            Grouping::Single => {
                let names: Vec<&str> = self.pages.iter().map(|p| p.name()).collect();
                vec![self.document(&names.join("-"), sheets.iter(), created)]
            }
            Grouping::PerPageSpec => self
                .pages
                .iter()
                .enumerate()
                .map(|(i, page)| {
                    let per_page = self.nib_widths.len();
                    let group = sheets.iter().skip(i * per_page).take(per_page);
                    self.document(page.name(), group, created)
                })
                .collect(),
        }
    }

    fn document<'a>(
        &self,
        paper: &str,
        sheets: impl Iterator<Item = &'a RenderedSheet>,
        created: DateTime<Local>,
    ) -> BatchDocument {
        let values = [(PAPER_SIZE_KEY, paper)];
        let mut info = Info::new();
        info.title(self.config.title.render(&values)).created(created);
        let description = self.config.description.render(&values);
        if !description.is_empty() {
            info.description(description);
        }
        if let Some(author) = &self.config.dedication_author {
            info.dedicate(author);
        }

        let mut document = Document::default();
        document.set_info(info);
        for sheet in sheets {
            document.add_image_page(sheet.page.clone(), sheet.image.clone());
        }

        BatchDocument {
            file_name: self.config.document_filename.render(&values),
            document,
        }
    }
}
