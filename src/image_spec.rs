use crate::error::SheetError;
use crate::units::{Mm, Px, Resolution};
use crate::validate;

/// The physical size of a practice sheet image and the resolution it is drawn at.
///
/// The pixel canvas is exactly `width × resolution` by `height × resolution`; no implicit
/// scaling happens anywhere. When a sheet is destined for a page, its physical size should
/// be the page size minus the margins so that it prints at true size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ImageSpec {
    width: Mm,
    height: Mm,
    resolution: Resolution,
}

impl ImageSpec {
    pub fn new(width: Mm, height: Mm, resolution: Resolution) -> Result<ImageSpec, SheetError> {
        validate::positive("image width", *width)?;
        validate::positive("image height", *height)?;
        Ok(ImageSpec {
            width,
            height,
            resolution,
        })
    }

    pub fn width(&self) -> Mm {
        self.width
    }

    pub fn height(&self) -> Mm {
        self.height
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn pixel_width(&self) -> Px {
        self.resolution.to_px(self.width)
    }

    pub fn pixel_height(&self) -> Px {
        self.resolution.to_px(self.height)
    }
}
