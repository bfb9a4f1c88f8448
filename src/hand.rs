use crate::error::SheetError;
use crate::units::Mm;
use crate::validate;

/// The shape of a hand, with every height expressed as a multiple of the nib width.
///
/// A shape on its own has no physical size; pair it with a nib width through
/// [HandProportions::with_nib_width] to obtain a [HandProfile].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandProportions {
    /// Distance between the baseline and the waistline, in nib widths
    pub x_height: f64,
    /// Distance between the waistline and the ascender line, in nib widths
    pub ascender: f64,
    /// Distance between the baseline and the descender line, in nib widths
    pub descender: f64,
    /// Distance between the baseline and the cap line, in nib widths
    pub cap_height: f64,
    /// Angle of the slant lines in degrees, measured from the baseline: 90 is upright
    /// and disables slant lines, a typical Italic slant of 5 degrees off vertical is 85
    pub slant_angle: f64,
}

impl Default for HandProportions {
    /// The classic Italic proportions: 5 nib widths for the x-height, ascenders, and
    /// descenders, 7 for capitals, and no slant lines.
    fn default() -> Self {
        HandProportions {
            x_height: 5.0,
            ascender: 5.0,
            descender: 5.0,
            cap_height: 7.0,
            slant_angle: 90.0,
        }
    }
}

impl HandProportions {
    /// Set the x-height in nib widths, modifying `self`
    pub fn x_height(&mut self, nibs: f64) -> &mut Self {
        self.x_height = nibs;
        self
    }

    /// Set the ascender height in nib widths, modifying `self`
    pub fn ascender(&mut self, nibs: f64) -> &mut Self {
        self.ascender = nibs;
        self
    }

    /// Set the descender height in nib widths, modifying `self`
    pub fn descender(&mut self, nibs: f64) -> &mut Self {
        self.descender = nibs;
        self
    }

    /// Set the cap height in nib widths, modifying `self`
    pub fn cap_height(&mut self, nibs: f64) -> &mut Self {
        self.cap_height = nibs;
        self
    }

    /// Set the slant angle in degrees from the baseline, modifying `self`
    pub fn slant_angle(&mut self, degrees: f64) -> &mut Self {
        self.slant_angle = degrees;
        self
    }

    /// Check every proportion without committing to a nib width
    pub fn validate(&self) -> Result<(), SheetError> {
        validate::positive("x-height", self.x_height)?;
        validate::positive("ascender height", self.ascender)?;
        validate::positive("descender height", self.descender)?;
        validate::positive("cap height", self.cap_height)?;
        validate::slant_angle(self.slant_angle)?;
        Ok(())
    }

    /// Resolve these proportions against a concrete nib width
    pub fn with_nib_width(&self, nib_width: Mm) -> Result<HandProfile, SheetError> {
        HandProfile::new(nib_width, *self)
    }
}

/// A fully resolved hand: the proportions it was built from plus the absolute lengths they
/// describe. Lengths are computed once, at construction, and the profile is immutable
/// afterwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandProfile {
    nib_width: Mm,
    proportions: HandProportions,
    x_height: Mm,
    ascender: Mm,
    descender: Mm,
    cap_height: Mm,
}

impl HandProfile {
    /// Validate and resolve a hand. Nothing is constructed if any parameter is out of range.
    pub fn new(nib_width: Mm, proportions: HandProportions) -> Result<HandProfile, SheetError> {
        validate::positive("nib width", *nib_width)?;
        proportions.validate()?;

        Ok(HandProfile {
            nib_width,
            proportions,
            x_height: nib_width * proportions.x_height,
            ascender: nib_width * proportions.ascender,
            descender: nib_width * proportions.descender,
            cap_height: nib_width * proportions.cap_height,
        })
    }

    pub fn nib_width(&self) -> Mm {
        self.nib_width
    }

    pub fn proportions(&self) -> &HandProportions {
        &self.proportions
    }

    pub fn x_height(&self) -> Mm {
        self.x_height
    }

    pub fn ascender(&self) -> Mm {
        self.ascender
    }

    pub fn descender(&self) -> Mm {
        self.descender
    }

    pub fn cap_height(&self) -> Mm {
        self.cap_height
    }

    pub fn slant_angle(&self) -> f64 {
        self.proportions.slant_angle
    }

    /// Space above the baseline taken by one line of writing: whichever of the ascender
    /// line or the cap line sits higher
    pub fn upper_height(&self) -> Mm {
        (self.ascender + self.x_height).max(self.cap_height)
    }

    /// The vertical span of one line of writing including its extenders. Guide line groups
    /// repeat every rhythm unit.
    pub fn rhythm_unit(&self) -> Mm {
        self.upper_height() + self.descender
    }
}
