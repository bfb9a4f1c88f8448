use crate::image::EmbeddedImage;
use crate::pagesize::PageSpec;
use crate::rect::{Point, Rect};
use crate::units::Mm;
use id_arena::Id;

/// Offset that centres a length of `image` within a length of `available`.
///
/// Negative when the image is larger than the space; nothing checks for that, an oversized
/// image simply overflows the margins.
pub fn centering_offset(available: Mm, image: Mm) -> Mm {
    (available - image) / 2.0
}

/// One page of a document: a single embedded image centred inside the page's margins.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub spec: PageSpec,
    pub image_id: Id<EmbeddedImage>,
    /// Where the image sits, relative to the top-left corner of the area inside the
    /// margins
    pub position: Rect,
}

impl Page {
    /// Centre an image of the given physical size on a page of `spec`.
    ///
    /// The image size is taken as given. It is up to the caller to make sure it matches the
    /// page size minus the margins if the image is meant to print at true size.
    pub fn centered(spec: PageSpec, image_id: Id<EmbeddedImage>, width: Mm, height: Mm) -> Page {
        let origin = Point::new(
            centering_offset(spec.content_width(), width),
            centering_offset(spec.content_height(), height),
        );
        Page {
            spec,
            image_id,
            position: Rect::from_origin(origin, width, height),
        }
    }

    /// Where the image sits relative to the physical edge of the page
    pub fn position_on_paper(&self) -> Rect {
        let margin = self.spec.margin();
        Rect {
            x1: self.position.x1 + margin,
            y1: self.position.y1 + margin,
            x2: self.position.x2 + margin,
            y2: self.position.y2 + margin,
        }
    }
}
