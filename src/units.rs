//! Length units used throughout the crate.
//!
//! Physical measurements (nib widths, page sizes, margins) are carried as [Mm]. Drawing
//! coordinates are carried as [Px], and the two are coupled by a [Resolution]. Document
//! lengths are written out in whatever [LengthUnit] the caller asks for.

use crate::error::SheetError;
use derive_more::{Add, AddAssign, Deref, Display, Div, From, Into, Mul, Sub};
use std::fmt;
use std::str::FromStr;

/// A physical length in millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    Mul,
    Div,
    Deref,
    Display,
    From,
    Into,
)]
#[display("{_0}")]
pub struct Mm(pub f64);

/// A length in drawing pixels
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    Mul,
    Div,
    Deref,
    Display,
    From,
    Into,
)]
#[display("{_0}")]
pub struct Px(pub f64);

impl Mm {
    /// The smaller of two lengths
    pub fn min(self, other: Mm) -> Mm {
        Mm(self.0.min(other.0))
    }

    /// The larger of two lengths
    pub fn max(self, other: Mm) -> Mm {
        Mm(self.0.max(other.0))
    }
}

impl Px {
    /// Snap to the nearest whole pixel
    pub fn round(self) -> Px {
        Px(self.0.round())
    }
}

/// Drawing pixels per millimetre.
///
/// This is the only coupling between physical dimensions and drawing coordinates; nothing
/// is scaled implicitly.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Deref, Display)]
#[display("{_0}")]
pub struct Resolution(f64);

impl Resolution {
    /// The resolution used when none is given: 30 pixels per millimetre
    pub const DEFAULT: Resolution = Resolution(30.0);

    /// Create a resolution, which must be strictly positive
    pub fn new(px_per_mm: f64) -> Result<Resolution, SheetError> {
        crate::validate::positive("resolution", px_per_mm)?;
        Ok(Resolution(px_per_mm))
    }

    pub fn px_per_mm(&self) -> f64 {
        self.0
    }

    pub fn to_px(&self, length: Mm) -> Px {
        Px(length.0 * self.0)
    }

    pub fn to_mm(&self, length: Px) -> Mm {
        Mm(length.0 / self.0)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::DEFAULT
    }
}

/// Units that lengths can be written in within an OpenDocument file
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    #[default]
    Millimetres,
    Centimetres,
    Inches,
    Points,
    Picas,
}

impl LengthUnit {
    /// The suffix OpenDocument expects after a number in this unit
    pub fn suffix(&self) -> &'static str {
        match self {
            LengthUnit::Millimetres => "mm",
            LengthUnit::Centimetres => "cm",
            LengthUnit::Inches => "in",
            LengthUnit::Points => "pt",
            LengthUnit::Picas => "pc",
        }
    }

    /// Convert a length in millimetres into this unit
    pub fn from_mm(&self, length: Mm) -> f64 {
        let mm = length.0;
        match self {
            LengthUnit::Millimetres => mm,
            LengthUnit::Centimetres => mm / 10.0,
            LengthUnit::Inches => mm / 25.4,
            LengthUnit::Points => mm * 72.0 / 25.4,
            LengthUnit::Picas => mm * 6.0 / 25.4,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for LengthUnit {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mm" => Ok(LengthUnit::Millimetres),
            "cm" => Ok(LengthUnit::Centimetres),
            "in" | "inch" => Ok(LengthUnit::Inches),
            "pt" => Ok(LengthUnit::Points),
            "pc" => Ok(LengthUnit::Picas),
            other => Err(SheetError::UnknownUnit(other.to_string())),
        }
    }
}

/// Format a number with at most `precision` decimal places, trimming trailing zeros so
/// whole values print without a fractional part.
pub fn format_number(value: f64, precision: usize) -> String {
    let mut s = format!("{value:.precision$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_converts_both_ways() {
        let res = Resolution::new(30.0).unwrap();
        assert_eq!(res.to_px(Mm(2.0)), Px(60.0));
        assert_eq!(res.to_mm(Px(1500.0)), Mm(50.0));
    }

    #[test]
    fn resolution_must_be_positive() {
        assert!(Resolution::new(0.0).is_err());
        assert!(Resolution::new(-3.0).is_err());
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(LengthUnit::Millimetres.from_mm(Mm(5.0)), 5.0);
        assert_eq!(LengthUnit::Centimetres.from_mm(Mm(25.0)), 2.5);
        assert!((LengthUnit::Inches.from_mm(Mm(25.4)) - 1.0).abs() < 1e-12);
        assert!((LengthUnit::Points.from_mm(Mm(25.4)) - 72.0).abs() < 1e-9);
        assert!((LengthUnit::Picas.from_mm(Mm(25.4)) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn parse_units() {
        assert_eq!("pt".parse::<LengthUnit>().unwrap(), LengthUnit::Points);
        assert_eq!("inch".parse::<LengthUnit>().unwrap(), LengthUnit::Inches);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(1500.0, 4), "1500");
        assert_eq!(format_number(3.0000000000000004, 4), "3");
        assert_eq!(format_number(7.5, 4), "7.5");
        assert_eq!(format_number(-0.00001, 4), "0");
        assert_eq!(format_number(283.5640, 2), "283.56");
    }
}
