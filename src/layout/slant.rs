use crate::error::InvalidParameterError;
use crate::hand::HandProfile;
use crate::rect::Point;
use crate::sheet::SlantSegment;
use crate::units::Mm;
use crate::validate;

/// Clipped segments shorter than this (as a fraction of the full line) only touch a corner
/// of the canvas and are dropped.
const MIN_VISIBLE_FRACTION: f64 = 1e-9;

/// Most slant lines a single sheet may have. Shallow angles push the anchors far past the
/// right edge, so the count grows without bound as the angle approaches 0.
pub const MAX_SLANT_LINES: usize = 20_000;

/// Number of anchors [slant_segments] steps through for these parameters, before any line
/// is dropped for missing the canvas. Unbounded, and possibly infinite.
pub fn slant_line_count(angle: f64, spacing: Mm, width: Mm, height: Mm) -> f64 {
    if angle <= 0.0 || angle >= 90.0 || *spacing <= 0.0 {
        return 0.0;
    }
    let displacement = *height / angle.to_radians().tan();
    ((*width + displacement) / *spacing).ceil()
}

/// Reject slant parameters that would need more than [MAX_SLANT_LINES] lines, returning
/// the number of anchors otherwise
pub fn check_slant_density(
    angle: f64,
    spacing: Mm,
    width: Mm,
    height: Mm,
) -> Result<usize, InvalidParameterError> {
    validate::line_count(
        "slant angle",
        angle,
        slant_line_count(angle, spacing, width, height),
        MAX_SLANT_LINES,
        "is too shallow for the slant line spacing: it would need more than 20000 slant lines",
    )
}

/// Slant lines for a hand, spaced `box_width` nib widths apart
pub fn slant_lines(hand: &HandProfile, box_width: f64, width: Mm, height: Mm) -> Vec<SlantSegment> {
    slant_segments(hand.slant_angle(), hand.nib_width() * box_width, width, height)
}

/// Generates slanted construction lines covering a `width` × `height` canvas, left to
/// right.
///
/// Every line runs the full height of the canvas. Its top end sits on an anchor on the top
/// edge, and its bottom end is displaced to the left by `height / tan(angle)`. Anchors step
/// along the top edge every `spacing`, starting at the left edge and continuing past the
/// right edge for as long as the line still crosses the canvas. Each line is then clipped
/// to the canvas. At most [MAX_SLANT_LINES] anchors are visited; use
/// [check_slant_density] to reject parameters that would need more.
///
/// An angle of 90 degrees would produce vertical lines and an angle of 0 would produce
/// lines parallel to the guide lines; neither adds any slant information, so both produce
/// no segments.
pub fn slant_segments(angle: f64, spacing: Mm, width: Mm, height: Mm) -> Vec<SlantSegment> {
    if angle <= 0.0 || angle >= 90.0 || *spacing <= 0.0 {
        return Vec::new();
    }

    let displacement = *height / angle.to_radians().tan();
    let (w, h) = (*width, *height);

    let anchors = slant_line_count(angle, spacing, width, height).min(MAX_SLANT_LINES as f64);

    let mut segments = Vec::new();
    for step in 0..anchors as usize {
        let anchor = *spacing * step as f64;
        if anchor >= w + displacement {
            break;
        }

        // parametrize the line by t in [0, 1] from top to bottom, then keep the range of t
        // where x stays within [0, w]
        let t_start = ((anchor - w) / displacement).max(0.0);
        let t_end = (anchor / displacement).min(1.0);
        if t_end - t_start <= MIN_VISIBLE_FRACTION {
            continue;
        }

        let at = |t: f64| {
            Point::new(
                Mm((anchor - t * displacement).clamp(0.0, w)),
                Mm(t * h),
            )
        };

        segments.push(SlantSegment {
            anchor: Mm(anchor),
            top: Point::new(Mm(anchor), Mm(0.0)),
            bottom: Point::new(Mm(anchor - displacement), height),
            start: at(t_start),
            end: at(t_end),
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandProportions;

    fn hand(angle: f64) -> HandProfile {
        HandProportions::default()
            .slant_angle(angle)
            .with_nib_width(Mm(2.0))
            .unwrap()
    }

    #[test]
    fn ninety_degrees_is_empty() {
        for (nib, width, height) in [(2.0, 50.0, 50.0), (0.5, 200.0, 287.0), (10.0, 1.0, 1.0)] {
            let hand = HandProportions::default()
                .slant_angle(90.0)
                .with_nib_width(Mm(nib))
                .unwrap();
            assert!(slant_lines(&hand, 3.0, Mm(width), Mm(height)).is_empty());
        }
    }

    #[test]
    fn zero_degrees_is_empty() {
        assert!(slant_lines(&hand(0.0), 3.0, Mm(50.0), Mm(50.0)).is_empty());
    }

    #[test]
    fn displacement_follows_the_angle() {
        let segments = slant_lines(&hand(10.0), 1.0, Mm(50.0), Mm(50.0));
        assert!(!segments.is_empty());
        let expected = 50.0 / 10f64.to_radians().tan();
        assert!((expected - 283.564).abs() < 1e-3);
        for segment in &segments {
            assert!((*segment.horizontal_displacement() - expected).abs() < 1e-9);
            assert!((*segment.vertical_extent() - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn anchors_step_by_spacing_left_to_right() {
        let segments = slant_lines(&hand(10.0), 1.0, Mm(50.0), Mm(50.0));
        // the line anchored at the very corner only touches the canvas and is dropped
        assert_eq!(segments[0].anchor, Mm(2.0));
        for pair in segments.windows(2) {
            assert!((*pair[1].anchor - *pair[0].anchor - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn segments_are_clipped_to_the_canvas() {
        let (w, h) = (50.0, 50.0);
        let segments = slant_lines(&hand(10.0), 1.0, Mm(w), Mm(h));
        for s in &segments {
            for p in [s.start, s.end] {
                assert!(*p.x >= 0.0 && *p.x <= w, "{p:?}");
                assert!(*p.y >= 0.0 && *p.y <= h, "{p:?}");
            }
            assert!(s.start.y < s.end.y);
        }
        // every anchor is within the range where the line still reaches the canvas
        let last = segments.last().unwrap();
        assert!(*last.anchor < w + 283.57);
        assert!(*last.anchor + 2.0 >= w + 283.56);
    }

    #[test]
    fn steep_lines_run_from_top_to_bottom_edge() {
        // 80 degrees: displacement is small, interior lines are unclipped
        let segments = slant_lines(&hand(80.0), 3.0, Mm(100.0), Mm(50.0));
        let d = 50.0 / 80f64.to_radians().tan();
        let interior = segments
            .iter()
            .find(|s| *s.anchor > d + 1.0 && *s.anchor < 99.0)
            .unwrap();
        assert_eq!(interior.start, interior.top);
        assert!((*interior.end.x - (*interior.anchor - d)).abs() < 1e-9);
        assert!((*interior.end.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn generation_is_repeatable() {
        assert_eq!(
            slant_lines(&hand(5.0), 3.0, Mm(200.0), Mm(287.0)),
            slant_lines(&hand(5.0), 3.0, Mm(200.0), Mm(287.0))
        );
    }

    #[test]
    fn near_zero_angles_stay_bounded() {
        for angle in [1e-3, 1e-6, f64::MIN_POSITIVE] {
            let segments = slant_segments(angle, Mm(6.0), Mm(200.0), Mm(287.0));
            assert!(segments.len() <= MAX_SLANT_LINES);
            assert!(check_slant_density(angle, Mm(6.0), Mm(200.0), Mm(287.0)).is_err());
        }
    }

    #[test]
    fn density_check_counts_anchors() {
        // (50 + 283.56) / 6 rounds up to 56 anchors
        assert_eq!(check_slant_density(10.0, Mm(6.0), Mm(50.0), Mm(50.0)), Ok(56));
        assert_eq!(check_slant_density(90.0, Mm(6.0), Mm(50.0), Mm(50.0)), Ok(0));
        assert_eq!(check_slant_density(0.0, Mm(6.0), Mm(50.0), Mm(50.0)), Ok(0));
        let err = check_slant_density(1e-3, Mm(6.0), Mm(200.0), Mm(287.0)).unwrap_err();
        assert_eq!(err.parameter, "slant angle");
        assert_eq!(err.value, 1e-3);
    }
}
