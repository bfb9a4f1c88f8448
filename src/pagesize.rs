//! Page specifications and pre-defined paper sizes.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height,
//! in millimetres. Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to
//! convert between portrait and landscape.
//!
//! # Example
//!
//! ```
//! use italic_sheets::pagesize::{PageSpec, PageOrientation, A4};
//! use italic_sheets::Mm;
//!
//! let page = PageSpec::new(A4.0, A4.1, Mm(5.0), "a4").expect("valid page");
//! assert_eq!(page.content_width(), Mm(200.0));
//!
//! let landscape = A4.landscape();
//! assert_eq!(landscape.0, Mm(297.0));
//! ```

use crate::error::SheetError;
use crate::rect::{Point, Rect};
use crate::units::*;
use crate::validate;

/// Paper dimensions as (width, height) in millimetres.
pub type PaperSize = (Mm, Mm);

// north american sizes
pub const LETTER: PaperSize = (Mm(215.9), Mm(279.4));
pub const HALF_LETTER: PaperSize = (Mm(139.7), Mm(215.9));
pub const LEGAL: PaperSize = (Mm(215.9), Mm(355.6));
pub const TABLOID: PaperSize = (Mm(279.4), Mm(431.8));

// iso a-series
pub const A3: PaperSize = (Mm(297.0), Mm(420.0));
pub const A4: PaperSize = (Mm(210.0), Mm(297.0));
pub const A5: PaperSize = (Mm(148.0), Mm(210.0));
pub const A6: PaperSize = (Mm(105.0), Mm(148.0));

/// Convert paper sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PaperSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PaperSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// A page of a given size with a uniform margin on every side, plus the unit its lengths
/// are written in and a nickname (e.g. `a4` or `letter`) used when naming files.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpec {
    width: Mm,
    height: Mm,
    margin: Mm,
    unit: LengthUnit,
    name: String,
}

impl PageSpec {
    /// Create a page; the margin must be less than half of both the width and the height
    pub fn new<S: ToString>(
        width: Mm,
        height: Mm,
        margin: Mm,
        name: S,
    ) -> Result<PageSpec, SheetError> {
        validate::positive("page width", *width)?;
        validate::positive("page height", *height)?;
        validate::margin(*margin, *width, *height)?;
        Ok(PageSpec {
            width,
            height,
            margin,
            unit: LengthUnit::default(),
            name: name.to_string(),
        })
    }

    /// Create a page from one of the pre-defined paper sizes
    pub fn from_paper<S: ToString>(
        paper: PaperSize,
        margin: Mm,
        name: S,
    ) -> Result<PageSpec, SheetError> {
        PageSpec::new(paper.0, paper.1, margin, name)
    }

    /// Write this page's lengths in `unit` instead of millimetres
    pub fn with_unit(mut self, unit: LengthUnit) -> PageSpec {
        self.unit = unit;
        self
    }

    pub fn width(&self) -> Mm {
        self.width
    }

    pub fn height(&self) -> Mm {
        self.height
    }

    pub fn margin(&self) -> Mm {
        self.margin
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of the area inside the margins
    pub fn content_width(&self) -> Mm {
        self.width - self.margin * 2.0
    }

    /// Height of the area inside the margins
    pub fn content_height(&self) -> Mm {
        self.height - self.margin * 2.0
    }

    /// The area inside the margins, measured from the physical page edge
    pub fn content_box(&self) -> Rect {
        Rect::from_origin(
            Point::new(self.margin, self.margin),
            self.content_width(),
            self.content_height(),
        )
    }

    /// Whether two specs would lay out identically in a document, ignoring the nickname
    pub fn same_layout(&self, other: &PageSpec) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.margin == other.margin
            && self.unit == other.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_box_is_inside_margins() {
        let page = PageSpec::new(Mm(210.0), Mm(297.0), Mm(5.0), "a4").unwrap();
        assert_eq!(page.content_width(), Mm(200.0));
        assert_eq!(page.content_height(), Mm(287.0));
        assert_eq!(
            page.content_box(),
            Rect {
                x1: Mm(5.0),
                y1: Mm(5.0),
                x2: Mm(205.0),
                y2: Mm(292.0),
            }
        );
    }

    #[test]
    fn margin_must_leave_room() {
        assert!(PageSpec::new(Mm(210.0), Mm(297.0), Mm(105.0), "a4").is_err());
        assert!(PageSpec::new(Mm(210.0), Mm(297.0), Mm(-1.0), "a4").is_err());
        assert!(PageSpec::new(Mm(0.0), Mm(297.0), Mm(0.0), "a4").is_err());
        assert!(PageSpec::new(Mm(210.0), Mm(297.0), Mm(0.0), "a4").is_ok());
    }

    #[test]
    fn orientation() {
        assert_eq!(A4.landscape(), (Mm(297.0), Mm(210.0)));
        assert_eq!(A4.landscape().portrait(), A4);
    }

    #[test]
    fn layout_comparison_ignores_name() {
        let a = PageSpec::from_paper(LETTER, Mm(6.35), "letter").unwrap();
        let b = PageSpec::from_paper(LETTER, Mm(6.35), "us-letter").unwrap();
        assert!(a.same_layout(&b));
        assert!(!a.same_layout(&b.clone().with_unit(LengthUnit::Inches)));
    }
}
