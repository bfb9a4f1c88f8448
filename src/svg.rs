//! Serializes a [Sheet] into a standalone SVG drawing.
//!
//! The drawing declares `width` and `height` in pixels equal to the sheet's physical size
//! times its resolution, and nothing else: there is no `viewBox`, so viewers and documents
//! embedding the image have no scaling hints to apply. The origin is the top-left corner
//! and y grows downwards, matching the sheet geometry.

use crate::error::SheetError;
use crate::info::Info;
use crate::image_spec::ImageSpec;
use crate::sheet::{GridSheet, GuideKind, GuideLine, Sheet, SlantSegment, Span, StrokeStyle};
use crate::style::DEFAULT_PRECISION;
use crate::units::{format_number, Mm, Px, Resolution};
use quick_xml::escape::escape;
use std::io::Write;

/// Title used when the [Info] block doesn't provide one
pub const DEFAULT_SHEET_TITLE: &str = "Italic Calligraphy Practice Sheet";

/// Write the drawing for `sheet` to `w`.
///
/// The whole drawing is rendered in memory first and written with a single call, so a
/// failure while rendering never leaves a partial file behind. A failure while writing
/// does, and the caller must discard the output.
pub fn write_svg<W: Write>(sheet: &Sheet, info: &Info, mut w: W) -> Result<(), SheetError> {
    let rendered = render_svg(sheet, info)?;
    w.write_all(rendered.as_slice())?;
    w.flush()?;
    Ok(())
}

/// Render the drawing for `sheet` into a byte buffer
pub fn render_svg(sheet: &Sheet, info: &Info) -> Result<Vec<u8>, std::io::Error> {
    let image = sheet.image();
    let res = image.resolution();
    let num = |px: Px| format_number(*px, sheet.style().precision);

    let mut out: Vec<u8> = Vec::with_capacity(
        256 + (sheet.guides().len() + sheet.slants().len()) * 96,
    );

    let title = info.title.as_deref().unwrap_or(DEFAULT_SHEET_TITLE);
    write_header(&mut out, image, title, &describe(sheet, info), &num)?;

    writeln!(
        out,
        r#"	<g stroke="{}" fill="none">"#,
        sheet.style().colour
    )?;
    for guide in sheet.guides() {
        write_guide(&mut out, sheet, guide, res, &num)?;
    }
    let slant_thickness = num(res.to_px(sheet.style().slant_line_thickness));
    for slant in sheet.slants() {
        write_slant(&mut out, slant, res, &num, &slant_thickness)?;
    }
    writeln!(out, "\t</g>")?;
    writeln!(out, "</svg>")?;

    Ok(out)
}

/// Write the drawing for a grid sheet to `w`, rendering it in memory first
pub fn write_grid_svg<W: Write>(grid: &GridSheet, info: &Info, mut w: W) -> Result<(), SheetError> {
    let rendered = render_grid_svg(grid, info)?;
    w.write_all(rendered.as_slice())?;
    w.flush()?;
    Ok(())
}

/// Render the drawing for a grid sheet into a byte buffer.
///
/// Lines span the whole grid, which usually overhangs the drawing; the overhang is left
/// for viewers to clip.
pub fn render_grid_svg(grid: &GridSheet, info: &Info) -> Result<Vec<u8>, std::io::Error> {
    let image = grid.image();
    let res = image.resolution();
    let num = |px: Px| format_number(*px, DEFAULT_PRECISION);
    let lines = grid.lines();

    let square = format_number(*grid.square(), 4);
    let default_title = format!("Grid of {square}mm x {square}mm Squares");
    let mut desc = format!(
        "This is an image of a grid of {square}mm x {square}mm squares formatted for a {}mm x \
         {}mm page (with no margins).",
        format_number(*image.width(), 4),
        format_number(*image.height(), 4),
    );
    if let Some(dedication) = info.dedication(info.creation_time().date_naive()) {
        desc.push_str("\n\n");
        desc.push_str(&dedication);
    }

    let mut out: Vec<u8> = Vec::with_capacity(256 + (lines.rows.len() + lines.columns.len()) * 80);
    write_header(
        &mut out,
        image,
        info.title.as_deref().unwrap_or(&default_title),
        &desc,
        &num,
    )?;
    writeln!(
        out,
        r#"	<g stroke="{}" stroke-width="{}" fill="none">"#,
        grid.colour(),
        num(res.to_px(grid.thickness()))
    )?;
    let bounds = &lines.bounds;
    for x in lines.columns.iter() {
        let x = num(res.to_px(*x));
        writeln!(
            out,
            r#"		<line x1="{x}" y1="{}" x2="{x}" y2="{}"/>"#,
            num(res.to_px(bounds.y1)),
            num(res.to_px(bounds.y2)),
        )?;
    }
    for y in lines.rows.iter() {
        let y = num(res.to_px(*y));
        writeln!(
            out,
            r#"		<line x1="{}" y1="{y}" x2="{}" y2="{y}"/>"#,
            num(res.to_px(bounds.x1)),
            num(res.to_px(bounds.x2)),
        )?;
    }
    writeln!(out, "\t</g>")?;
    writeln!(out, "</svg>")?;

    Ok(out)
}

fn write_header(
    out: &mut Vec<u8>,
    image: &ImageSpec,
    title: &str,
    desc: &str,
    num: &impl Fn(Px) -> String,
) -> Result<(), std::io::Error> {
    writeln!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
    )?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}">"#,
        num(image.pixel_width()),
        num(image.pixel_height())
    )?;
    writeln!(out, "\t<title>{}</title>", escape(title))?;
    writeln!(out, "\t<desc>{}</desc>", escape(desc))
}

fn write_guide(
    out: &mut Vec<u8>,
    sheet: &Sheet,
    guide: &GuideLine,
    res: Resolution,
    num: &impl Fn(Px) -> String,
) -> Result<(), std::io::Error> {
    let style = sheet.style();
    let (x1, x2) = match guide.span {
        Span::Full => (Px(0.0), sheet.image().pixel_width()),
        Span::Partial { start, end } => (res.to_px(start), res.to_px(end)),
    };
    let thickness = match guide.kind {
        GuideKind::Ascender | GuideKind::Descender => style.ascender_descender_thickness,
        GuideKind::CapHeight => style.cap_line_thickness,
        GuideKind::Waistline => style.waistline_thickness,
        GuideKind::Baseline => style.baseline_thickness,
        GuideKind::PenLadderRung => match guide.span {
            Span::Partial { start, end } => end - start,
            Span::Full => style.baseline_thickness,
        },
    };
    // guide lines sit on whole pixels; remainders are dropped, not distributed
    let y = num(res.to_px(guide.offset).round());

    write!(
        out,
        r#"		<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke-width="{}""#,
        num(x1),
        num(x2),
        num(res.to_px(thickness)),
    )?;
    if guide.stroke == StrokeStyle::Dotted {
        let nib = sheet.hand().map(|h| h.nib_width()).unwrap_or(Mm(1.0));
        let dash = num(res.to_px(nib * style.cap_line_dash_length));
        write!(out, r#" stroke-dasharray="{dash} {dash}""#)?;
    }
    writeln!(out, "/>")
}

fn write_slant(
    out: &mut Vec<u8>,
    slant: &SlantSegment,
    res: Resolution,
    num: &impl Fn(Px) -> String,
    thickness: &str,
) -> Result<(), std::io::Error> {
    writeln!(
        out,
        r#"		<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{thickness}"/>"#,
        num(res.to_px(slant.start.x)),
        num(res.to_px(slant.start.y)),
        num(res.to_px(slant.end.x)),
        num(res.to_px(slant.end.y)),
    )
}

/// The human-readable description embedded in the drawing
fn describe(sheet: &Sheet, info: &Info) -> String {
    let image = sheet.image();
    let mut desc = String::new();
    if let Some(text) = &info.description {
        desc.push_str(text);
        desc.push_str("\n\n");
    }

    let slant_note = if sheet.slants().is_empty() {
        String::new()
    } else {
        format!(
            "There are slant guide lines at {} degrees from the baseline every {}mm.  ",
            format_number(sheet.slant_angle(), 4),
            format_number(*sheet.slant_spacing(), 4),
        )
    };

    match sheet.hand() {
        Some(hand) => {
            let p = hand.proportions();
            desc.push_str(&format!(
                "This is an Italic calligraphy practice grid for nib widths of {}mm.  {slant_note}\
                 The x-height is {} nib widths.  Ascenders are {} nib widths, descenders are {} \
                 nib widths, and the cap height is {} nib widths.  ",
                format_number(*hand.nib_width(), 4),
                format_number(p.x_height, 4),
                format_number(p.ascender, 4),
                format_number(p.descender, 4),
                format_number(p.cap_height, 4),
            ));
        }
        None => {
            desc.push_str("This is an Italic calligraphy guide sheet.  ");
            desc.push_str(&slant_note);
        }
    }
    desc.push_str(&format!(
        "This is formatted for a {}mm x {}mm page (with no margins).",
        format_number(*image.width(), 4),
        format_number(*image.height(), 4),
    ));

    if let Some(dedication) = info.dedication(info.creation_time().date_naive()) {
        desc.push_str("\n\n");
        desc.push_str(&dedication);
    }
    desc
}
