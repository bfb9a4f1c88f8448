//! Numeric domain checks shared by every constructor that accepts raw parameters.
//!
//! Each check either returns the value untouched or an [InvalidParameterError]; nothing is
//! ever clamped or partially applied.

use crate::error::InvalidParameterError;

/// Lengths, resolutions, and thicknesses must be strictly positive (and finite)
pub fn positive(parameter: &'static str, value: f64) -> Result<f64, InvalidParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidParameterError {
            parameter,
            value,
            requirement: "must be positive",
        })
    }
}

/// Margins may be zero, but never negative
pub fn non_negative(parameter: &'static str, value: f64) -> Result<f64, InvalidParameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidParameterError {
            parameter,
            value,
            requirement: "must be zero or positive",
        })
    }
}

/// Slant angles are measured in degrees from the baseline and must lie within [0, 90]
pub fn slant_angle(value: f64) -> Result<f64, InvalidParameterError> {
    if (0.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidParameterError {
            parameter: "slant angle",
            value,
            requirement: "must be between 0 and 90 degrees",
        })
    }
}

/// A uniform margin must leave some room on both axes of the page
pub fn margin(margin: f64, width: f64, height: f64) -> Result<f64, InvalidParameterError> {
    non_negative("margin", margin)?;
    if margin >= width * 0.5 {
        return Err(InvalidParameterError {
            parameter: "margin",
            value: margin,
            requirement: "must be less than half of the page width",
        });
    }
    if margin >= height * 0.5 {
        return Err(InvalidParameterError {
            parameter: "margin",
            value: margin,
            requirement: "must be less than half of the page height",
        });
    }
    Ok(margin)
}

/// Lists of inputs that drive generation must not be empty
pub fn non_empty(
    parameter: &'static str,
    len: usize,
    requirement: &'static str,
) -> Result<usize, InvalidParameterError> {
    if len > 0 {
        Ok(len)
    } else {
        Err(InvalidParameterError {
            parameter,
            value: len as f64,
            requirement,
        })
    }
}

/// Counts of lines derived from other parameters must be finite and at most `limit`.
/// `parameter` and `value` name the input to blame when the count is out of range.
pub fn line_count(
    parameter: &'static str,
    value: f64,
    count: f64,
    limit: usize,
    requirement: &'static str,
) -> Result<usize, InvalidParameterError> {
    if count.is_finite() && count >= 0.0 && count <= limit as f64 {
        Ok(count as usize)
    } else {
        Err(InvalidParameterError {
            parameter,
            value,
            requirement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_negative_and_nan() {
        assert_eq!(positive("nib width", 2.0), Ok(2.0));
        assert!(positive("nib width", 0.0).is_err());
        assert!(positive("nib width", -1.0).is_err());
        assert!(positive("nib width", f64::NAN).is_err());
        assert!(positive("nib width", f64::INFINITY).is_err());
    }

    #[test]
    fn slant_angle_is_a_closed_interval() {
        assert_eq!(slant_angle(0.0), Ok(0.0));
        assert_eq!(slant_angle(90.0), Ok(90.0));
        assert_eq!(slant_angle(5.0), Ok(5.0));
        let err = slant_angle(95.0).unwrap_err();
        assert_eq!(err.parameter, "slant angle");
        assert!(slant_angle(-0.5).is_err());
        assert!(slant_angle(f64::NAN).is_err());
    }

    #[test]
    fn margin_must_fit_inside_page() {
        assert_eq!(margin(5.0, 210.0, 297.0), Ok(5.0));
        assert_eq!(margin(0.0, 210.0, 297.0), Ok(0.0));
        assert!(margin(105.0, 210.0, 297.0).is_err());
        assert!(margin(150.0, 400.0, 297.0).is_err());
        assert!(margin(-1.0, 210.0, 297.0).is_err());
    }

    #[test]
    fn error_message_names_the_parameter() {
        let err = positive("x-height", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "x-height must be positive (got 0)");
    }

    #[test]
    fn empty_lists_are_rejected() {
        assert_eq!(non_empty("nib widths", 3, "must list at least one nib width").unwrap(), 3);
        let err = non_empty("nib widths", 0, "must list at least one nib width").unwrap_err();
        assert_eq!(err.parameter, "nib widths");
        assert_eq!(err.to_string(), "nib widths must list at least one nib width (got 0)");
    }

    #[test]
    fn line_count_blames_the_named_parameter() {
        assert_eq!(line_count("grid square size", 5.0, 41.0, 100, "is too small"), Ok(41));
        let err = line_count("grid square size", 1e-300, f64::INFINITY, 100, "is too small")
            .unwrap_err();
        assert_eq!(err.parameter, "grid square size");
        assert_eq!(err.value, 1e-300);
        assert!(line_count("slant angle", 1.0, 101.0, 100, "is too shallow").is_err());
        assert!(line_count("slant angle", 1.0, f64::NAN, 100, "is too shallow").is_err());
    }
}
