//! Presentation constants for practice sheets.
//!
//! None of these affect where guide lines are placed, only how they are drawn and how
//! densely slant lines and pen ladder rungs are laid out.

use crate::colour::{colours, Colour};
use crate::error::SheetError;
use crate::units::Mm;
use crate::validate;

/// Horizontal distance between slant lines, in nib widths
pub const DEFAULT_BOX_WIDTH_NIBS: f64 = 3.0;

/// Side length of each pen ladder rung, in nib widths
pub const DEFAULT_RUNG_NIBS: f64 = 1.0;

/// Length of each dash (and each gap) of the cap line, in nib widths
pub const DEFAULT_CAP_LINE_DASH_NIBS: f64 = 0.5;

/// Decimal places written for every coordinate
pub const DEFAULT_PRECISION: usize = 4;

/// Stroke thicknesses and densities used when drawing a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    pub baseline_thickness: Mm,
    pub waistline_thickness: Mm,
    pub cap_line_thickness: Mm,
    pub ascender_descender_thickness: Mm,
    pub slant_line_thickness: Mm,
    /// In nib widths
    pub cap_line_dash_length: f64,
    /// Distance between slant lines, in nib widths
    pub box_width: f64,
    /// Pen ladder rung size, in nib widths
    pub rung_size: f64,
    /// Draw a pen ladder alongside every line of writing
    pub pen_ladder: bool,
    pub colour: Colour,
    /// Decimal places written for coordinates in the emitted drawing
    pub precision: usize,
}

impl Default for SheetStyle {
    fn default() -> Self {
        SheetStyle {
            baseline_thickness: Mm(0.25),
            waistline_thickness: Mm(0.1),
            cap_line_thickness: Mm(0.25),
            ascender_descender_thickness: Mm(0.1),
            slant_line_thickness: Mm(0.1),
            cap_line_dash_length: DEFAULT_CAP_LINE_DASH_NIBS,
            box_width: DEFAULT_BOX_WIDTH_NIBS,
            rung_size: DEFAULT_RUNG_NIBS,
            pen_ladder: false,
            colour: colours::BLACK,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SheetStyle {
    /// Enable or disable the pen ladder, modifying `self`
    pub fn pen_ladder(&mut self, enabled: bool) -> &mut Self {
        self.pen_ladder = enabled;
        self
    }

    /// Set the distance between slant lines in nib widths, modifying `self`
    pub fn box_width(&mut self, nibs: f64) -> &mut Self {
        self.box_width = nibs;
        self
    }

    /// Set the stroke colour, modifying `self`
    pub fn colour(&mut self, colour: Colour) -> &mut Self {
        self.colour = colour;
        self
    }

    pub fn validate(&self) -> Result<(), SheetError> {
        validate::positive("baseline thickness", *self.baseline_thickness)?;
        validate::positive("waistline thickness", *self.waistline_thickness)?;
        validate::positive("cap line thickness", *self.cap_line_thickness)?;
        validate::positive(
            "ascender and descender thickness",
            *self.ascender_descender_thickness,
        )?;
        validate::positive("slant line thickness", *self.slant_line_thickness)?;
        validate::positive("cap line dash length", self.cap_line_dash_length)?;
        validate::positive("box width", self.box_width)?;
        validate::positive("pen ladder rung size", self.rung_size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SheetStyle::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_box_width() {
        let mut style = SheetStyle::default();
        style.box_width(0.0);
        assert!(style.validate().is_err());
    }

    #[test]
    fn rejects_negative_thickness() {
        let style = SheetStyle {
            baseline_thickness: Mm(-0.25),
            ..Default::default()
        };
        assert!(style.validate().is_err());
    }
}
