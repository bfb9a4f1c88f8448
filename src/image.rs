use crate::error::SheetError;
use crate::info::Info;
use crate::sheet::Sheet;
use crate::svg::render_svg;
use crate::units::{Mm, Px, Resolution};
use std::path::Path;
use usvg::Tree;

/// A pre-rendered drawing ready to be embedded into a document, along with the physical
/// size it should occupy on the page.
///
/// The document never looks inside the drawing beyond this; it is embedded byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub data: Vec<u8>,
    pub width: Mm,
    pub height: Mm,
    pub mime_type: &'static str,
}

impl EmbeddedImage {
    /// Render a sheet and wrap the result; its physical size is the sheet's image size
    pub fn from_sheet(sheet: &Sheet, info: &Info) -> Result<EmbeddedImage, SheetError> {
        let data = render_svg(sheet, info)?;
        Ok(EmbeddedImage {
            data,
            width: sheet.image().width(),
            height: sheet.image().height(),
            mime_type: "image/svg+xml",
        })
    }

    /// Wrap an existing SVG drawing. Its declared pixel size is read from the drawing and
    /// converted to a physical size with `resolution`.
    pub fn new_svg(data: Vec<u8>, resolution: Resolution) -> Result<EmbeddedImage, SheetError> {
        let tree = Tree::from_data(&data, &usvg::Options::default())?;
        let size = tree.size();
        let width = resolution.to_mm(Px(size.width() as f64));
        let height = resolution.to_mm(Px(size.height() as f64));

        Ok(EmbeddedImage {
            data,
            width,
            height,
            mime_type: "image/svg+xml",
        })
    }

    pub fn new_svg_from_disk<P: AsRef<Path>>(
        path: P,
        resolution: Resolution,
    ) -> Result<EmbeddedImage, SheetError> {
        let data = std::fs::read(path.as_ref())?;
        Self::new_svg(data, resolution)
    }
}
