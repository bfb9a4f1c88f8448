use crate::hand::HandProfile;
use crate::sheet::{GuideKind, GuideLine, Span, StrokeStyle};
use crate::units::Mm;

/// Tolerance for deciding whether a whole group fits; absorbs floating point noise from
/// nib-width multiplication so that e.g. 60mm holds exactly two 30mm groups.
const FIT_EPSILON: f64 = 1e-9;

/// Number of whole rhythm groups that fit into `canvas_height`
pub fn group_count(hand: &HandProfile, canvas_height: Mm) -> usize {
    let groups = (*canvas_height / *hand.rhythm_unit() + FIT_EPSILON).floor();
    if groups > 0.0 {
        groups as usize
    } else {
        0
    }
}

/// Lays out the horizontal guide lines of a sheet, top to bottom.
///
/// Each line of writing gets a group of five lines: the ascender line, the (dotted) cap
/// line, the waistline, the baseline, and the descender line. Groups are stacked directly
/// on top of each other, one rhythm unit apart, starting at the top edge. Only whole groups
/// are laid out; whatever is left at the bottom of the canvas stays empty, and a canvas
/// shorter than one rhythm unit yields no lines at all.
///
/// If `pen_ladder` is given, each group additionally gets a column of squares of that size
/// at the left edge, alternating sides, stacked so that the baseline falls on the boundary
/// between two squares.
pub fn layout_guides(hand: &HandProfile, canvas_height: Mm, pen_ladder: Option<Mm>) -> Vec<GuideLine> {
    let groups = group_count(hand, canvas_height);
    let rhythm = hand.rhythm_unit();

    let mut lines: Vec<GuideLine> = Vec::with_capacity(groups * 5);
    for group in 0..groups {
        let top = rhythm * group as f64;
        let mut group_lines = group_lines(hand, top);
        if let Some(rung) = pen_ladder {
            group_lines.extend(ladder_rungs(hand, top, rung));
        }
        // stable, so coincident lines keep their declaration order
        group_lines.sort_by(|a, b| a.offset.0.total_cmp(&b.offset.0));
        lines.extend(group_lines);
    }
    lines
}

fn group_lines(hand: &HandProfile, top: Mm) -> Vec<GuideLine> {
    let baseline = top + hand.upper_height();
    vec![
        GuideLine::full(baseline - hand.x_height() - hand.ascender(), GuideKind::Ascender),
        GuideLine::full(baseline - hand.cap_height(), GuideKind::CapHeight),
        GuideLine::full(baseline - hand.x_height(), GuideKind::Waistline),
        GuideLine::full(baseline, GuideKind::Baseline),
        GuideLine::full(baseline + hand.descender(), GuideKind::Descender),
    ]
}

fn ladder_rungs(hand: &HandProfile, top: Mm, rung: Mm) -> Vec<GuideLine> {
    let baseline = top + hand.upper_height();
    let above = (*hand.upper_height() / *rung + FIT_EPSILON).floor() as usize;
    let below = (*hand.descender() / *rung + FIT_EPSILON).floor() as usize;
    let first = baseline - rung * above as f64;

    (0..above + below)
        .map(|i| {
            // rungs are drawn as a thick line through their middle, one rung wide
            let start = rung * (i % 2) as f64;
            GuideLine {
                offset: first + rung * i as f64 + rung * 0.5,
                kind: GuideKind::PenLadderRung,
                stroke: StrokeStyle::Solid,
                span: Span::Partial {
                    start,
                    end: start + rung,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandProportions;

    fn scenario_hand() -> HandProfile {
        HandProportions::default().with_nib_width(Mm(2.0)).unwrap()
    }

    fn kinds(lines: &[GuideLine]) -> Vec<GuideKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn one_group_fits_in_fifty_millimetres() {
        let lines = layout_guides(&scenario_hand(), Mm(50.0), None);
        assert_eq!(
            kinds(&lines),
            vec![
                GuideKind::Ascender,
                GuideKind::CapHeight,
                GuideKind::Waistline,
                GuideKind::Baseline,
                GuideKind::Descender,
            ]
        );
        let offsets: Vec<f64> = lines.iter().map(|l| *l.offset).collect();
        assert_eq!(offsets, vec![0.0, 6.0, 10.0, 20.0, 30.0]);
        assert_eq!(lines[1].stroke, StrokeStyle::Dotted);
        assert!(lines
            .iter()
            .filter(|l| l.kind != GuideKind::CapHeight)
            .all(|l| l.stroke == StrokeStyle::Solid));
    }

    #[test]
    fn group_count_is_floor_of_height_over_rhythm() {
        let hand = scenario_hand();
        for (height, expected) in [(29.9, 0), (30.0, 1), (50.0, 1), (60.0, 2), (287.0, 9)] {
            let lines = layout_guides(&hand, Mm(height), None);
            assert_eq!(group_count(&hand, Mm(height)), expected);
            assert_eq!(lines.len(), expected * 5);
            let last_baseline = lines
                .iter()
                .filter(|l| l.kind == GuideKind::Baseline)
                .last();
            if let Some(baseline) = last_baseline {
                assert!(*baseline.offset < height);
            }
        }
    }

    #[test]
    fn short_canvas_yields_nothing() {
        assert!(layout_guides(&scenario_hand(), Mm(10.0), None).is_empty());
    }

    #[test]
    fn groups_advance_by_one_rhythm_unit() {
        let lines = layout_guides(&scenario_hand(), Mm(100.0), None);
        let baselines: Vec<f64> = lines
            .iter()
            .filter(|l| l.kind == GuideKind::Baseline)
            .map(|l| *l.offset)
            .collect();
        assert_eq!(baselines, vec![20.0, 50.0, 80.0]);
    }

    #[test]
    fn lines_are_ordered_top_to_bottom() {
        let lines = layout_guides(&scenario_hand(), Mm(297.0), Some(Mm(2.0)));
        assert!(lines.windows(2).all(|w| w[0].offset <= w[1].offset));
    }

    #[test]
    fn cap_line_above_ascender_leads_the_group() {
        let hand = HandProportions::default()
            .ascender(2.0)
            .x_height(4.0)
            .cap_height(8.0)
            .with_nib_width(Mm(1.0))
            .unwrap();
        let lines = layout_guides(&hand, Mm(13.0), None);
        assert_eq!(lines[0].kind, GuideKind::CapHeight);
        assert_eq!(lines[0].offset, Mm(0.0));
        assert_eq!(lines[1].kind, GuideKind::Ascender);
        assert_eq!(lines[1].offset, Mm(2.0));
        assert_eq!(lines[3].kind, GuideKind::Baseline);
        assert_eq!(lines[3].offset, Mm(8.0));
    }

    #[test]
    fn pen_ladder_straddles_the_baseline() {
        let lines = layout_guides(&scenario_hand(), Mm(30.0), Some(Mm(2.0)));
        let rungs: Vec<&GuideLine> = lines
            .iter()
            .filter(|l| l.kind == GuideKind::PenLadderRung)
            .collect();
        // 10 nib widths above the baseline, 5 below
        assert_eq!(rungs.len(), 15);
        let offsets: Vec<f64> = rungs.iter().map(|r| *r.offset).collect();
        assert!(offsets.contains(&19.0));
        assert!(offsets.contains(&21.0));
        assert_eq!(offsets[0], 1.0);
        assert_eq!(rungs[0].span, Span::Partial { start: Mm(0.0), end: Mm(2.0) });
        assert_eq!(rungs[1].span, Span::Partial { start: Mm(2.0), end: Mm(4.0) });
    }

    #[test]
    fn layout_is_repeatable() {
        let hand = scenario_hand();
        assert_eq!(
            layout_guides(&hand, Mm(287.0), Some(Mm(2.0))),
            layout_guides(&hand, Mm(287.0), Some(Mm(2.0)))
        );
    }
}
