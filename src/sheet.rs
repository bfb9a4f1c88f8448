use crate::error::SheetError;
use crate::hand::HandProfile;
use crate::image_spec::ImageSpec;
use crate::colour::Colour;
use crate::layout::{
    check_slant_density, grid_lines, layout_guides, slant_segments, GridLines, GridPosition,
};
use crate::rect::Point;
use crate::style::SheetStyle;
use crate::units::Mm;
use crate::validate;

/// What a horizontal guide line marks
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GuideKind {
    Ascender,
    CapHeight,
    Waistline,
    Baseline,
    Descender,
    /// One square of a pen ladder
    PenLadderRung,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StrokeStyle {
    Solid,
    Dotted,
}

/// How much of the sheet's width a guide line covers
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Span {
    /// From the left edge to the right edge of the sheet
    Full,
    Partial { start: Mm, end: Mm },
}

/// A horizontal line at a fixed distance from the top of the sheet
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GuideLine {
    pub offset: Mm,
    pub kind: GuideKind,
    pub stroke: StrokeStyle,
    pub span: Span,
}

impl GuideLine {
    pub(crate) fn full(offset: Mm, kind: GuideKind) -> GuideLine {
        let stroke = match kind {
            GuideKind::CapHeight => StrokeStyle::Dotted,
            _ => StrokeStyle::Solid,
        };
        GuideLine {
            offset,
            kind,
            stroke,
            span: Span::Full,
        }
    }
}

/// A slanted construction line.
///
/// `top` and `bottom` describe the unclipped line, which always spans the full height of
/// the sheet. `start` and `end` are the same line clipped to the sheet's bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlantSegment {
    /// Where the unclipped line meets the top edge
    pub anchor: Mm,
    pub top: Point,
    pub bottom: Point,
    pub start: Point,
    pub end: Point,
}

impl SlantSegment {
    /// Height covered by the unclipped line
    pub fn vertical_extent(&self) -> Mm {
        self.bottom.y - self.top.y
    }

    /// Horizontal distance between the top and bottom of the unclipped line
    pub fn horizontal_displacement(&self) -> Mm {
        self.top.x - self.bottom.x
    }
}

/// The complete vector content of one practice sheet: every guide line top to bottom and
/// every slant line left to right. Sheets are computed once and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    hand: Option<HandProfile>,
    image: ImageSpec,
    style: SheetStyle,
    slant_angle: f64,
    slant_spacing: Mm,
    guides: Vec<GuideLine>,
    slants: Vec<SlantSegment>,
}

impl Sheet {
    /// Lay out a full practice sheet for `hand`, filling `image`
    pub fn new(hand: HandProfile, image: ImageSpec, style: SheetStyle) -> Result<Sheet, SheetError> {
        style.validate()?;
        let slant_spacing = hand.nib_width() * style.box_width;
        check_slant_density(hand.slant_angle(), slant_spacing, image.width(), image.height())?;

        let ladder = style.pen_ladder.then(|| hand.nib_width() * style.rung_size);
        let guides = layout_guides(&hand, image.height(), ladder);
        let slants = slant_segments(
            hand.slant_angle(),
            slant_spacing,
            image.width(),
            image.height(),
        );

        Ok(Sheet {
            hand: Some(hand),
            image,
            style,
            slant_angle: hand.slant_angle(),
            slant_spacing,
            guides,
            slants,
        })
    }

    /// A sheet of nothing but slant lines, to lay under ruled or grid paper
    pub fn slant_guides(
        angle: f64,
        spacing: Mm,
        image: ImageSpec,
        style: SheetStyle,
    ) -> Result<Sheet, SheetError> {
        validate::slant_angle(angle)?;
        validate::positive("slant line spacing", *spacing)?;
        style.validate()?;
        check_slant_density(angle, spacing, image.width(), image.height())?;

        let slants = slant_segments(angle, spacing, image.width(), image.height());
        Ok(Sheet {
            hand: None,
            image,
            style,
            slant_angle: angle,
            slant_spacing: spacing,
            guides: Vec::new(),
            slants,
        })
    }

    pub fn hand(&self) -> Option<&HandProfile> {
        self.hand.as_ref()
    }

    pub fn image(&self) -> &ImageSpec {
        &self.image
    }

    pub fn style(&self) -> &SheetStyle {
        &self.style
    }

    pub fn slant_angle(&self) -> f64 {
        self.slant_angle
    }

    pub fn slant_spacing(&self) -> Mm {
        self.slant_spacing
    }

    pub fn guides(&self) -> &[GuideLine] {
        &self.guides
    }

    pub fn slants(&self) -> &[SlantSegment] {
        &self.slants
    }
}

/// A sheet of plain square grid (or ruled) lines, to lay under practice paper
#[derive(Debug, Clone, PartialEq)]
pub struct GridSheet {
    image: ImageSpec,
    square: Mm,
    thickness: Mm,
    colour: Colour,
    lines: GridLines,
}

impl GridSheet {
    pub fn new(
        square: Mm,
        image: ImageSpec,
        position: GridPosition,
        vertical_lines: bool,
        thickness: Mm,
        colour: Colour,
    ) -> Result<GridSheet, SheetError> {
        validate::positive("grid square size", *square)?;
        validate::positive("grid line thickness", *thickness)?;

        let lines = grid_lines(square, image.width(), image.height(), position, vertical_lines)?;
        Ok(GridSheet {
            image,
            square,
            thickness,
            colour,
            lines,
        })
    }

    pub fn image(&self) -> &ImageSpec {
        &self.image
    }

    pub fn square(&self) -> Mm {
        self.square
    }

    pub fn thickness(&self) -> Mm {
        self.thickness
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn lines(&self) -> &GridLines {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandProportions;
    use crate::units::Resolution;

    fn scenario_image() -> ImageSpec {
        ImageSpec::new(Mm(50.0), Mm(50.0), Resolution::new(30.0).unwrap()).unwrap()
    }

    #[test]
    fn upright_hand_has_guides_and_no_slants() {
        let hand = HandProportions::default().with_nib_width(Mm(2.0)).unwrap();
        let sheet = Sheet::new(hand, scenario_image(), SheetStyle::default()).unwrap();
        assert_eq!(sheet.guides().len(), 5);
        assert!(sheet.slants().is_empty());
        assert_eq!(sheet.slant_spacing(), Mm(6.0));
    }

    #[test]
    fn slanted_hand_has_slants() {
        let hand = HandProportions::default()
            .slant_angle(10.0)
            .with_nib_width(Mm(2.0))
            .unwrap();
        let sheet = Sheet::new(hand, scenario_image(), SheetStyle::default()).unwrap();
        assert!(!sheet.slants().is_empty());
        for slant in sheet.slants() {
            assert!((*slant.vertical_extent() - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_style_is_rejected_before_layout() {
        let hand = HandProportions::default().with_nib_width(Mm(2.0)).unwrap();
        let mut style = SheetStyle::default();
        style.box_width(-3.0);
        assert!(Sheet::new(hand, scenario_image(), style).is_err());
    }

    #[test]
    fn slant_only_sheet() {
        let sheet =
            Sheet::slant_guides(45.0, Mm(10.0), scenario_image(), SheetStyle::default()).unwrap();
        assert!(sheet.guides().is_empty());
        assert!(sheet.hand().is_none());
        assert!(!sheet.slants().is_empty());
        assert!(Sheet::slant_guides(45.0, Mm(0.0), scenario_image(), SheetStyle::default()).is_err());
    }

    #[test]
    fn shallow_slants_are_rejected_before_layout() {
        let image = ImageSpec::new(Mm(200.0), Mm(287.0), Resolution::new(30.0).unwrap()).unwrap();
        let err = Sheet::slant_guides(1e-3, Mm(6.0), image, SheetStyle::default()).unwrap_err();
        assert!(matches!(err, SheetError::InvalidParameter(ref e) if e.parameter == "slant angle"));

        let hand = HandProportions::default()
            .slant_angle(1e-6)
            .with_nib_width(Mm(2.0))
            .unwrap();
        let err = Sheet::new(hand, image, SheetStyle::default()).unwrap_err();
        assert!(matches!(err, SheetError::InvalidParameter(_)));

        // an ordinary italic slant on a full page is well within bounds
        let hand = HandProportions::default()
            .slant_angle(85.0)
            .with_nib_width(Mm(2.0))
            .unwrap();
        assert!(Sheet::new(hand, image, SheetStyle::default()).is_ok());
    }

    #[test]
    fn grid_sheet_rejects_empty_squares() {
        let err = GridSheet::new(
            Mm(0.0),
            scenario_image(),
            GridPosition::Centre,
            true,
            Mm(0.25),
            crate::colour::colours::BLACK,
        )
        .unwrap_err();
        assert!(matches!(err, SheetError::InvalidParameter(_)));

        let grid = GridSheet::new(
            Mm(5.0),
            scenario_image(),
            GridPosition::UpperLeft,
            false,
            Mm(0.25),
            crate::colour::colours::BLACK,
        )
        .unwrap();
        assert!(grid.lines().columns.is_empty());
        assert_eq!(grid.lines().rows.len(), 12);
    }

    #[test]
    fn grid_sheet_rejects_squares_too_small_to_draw() {
        let err = GridSheet::new(
            Mm(1e-300),
            scenario_image(),
            GridPosition::Centre,
            true,
            Mm(0.25),
            crate::colour::colours::BLACK,
        )
        .unwrap_err();
        assert!(matches!(err, SheetError::InvalidParameter(ref e) if e.parameter == "grid square size"));
    }
}
