use crate::error::{InvalidParameterError, SheetError};
use crate::rect::{Point, Rect};
use crate::units::Mm;
use crate::validate;
use std::str::FromStr;

/// Which corner of the canvas the grid is aligned to. A centred grid overhangs every edge
/// equally.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum GridPosition {
    #[default]
    Centre,
    UpperLeft,
    UpperRight,
    BottomLeft,
    BottomRight,
}

impl FromStr for GridPosition {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "c" => Ok(GridPosition::Centre),
            "ul" => Ok(GridPosition::UpperLeft),
            "ur" => Ok(GridPosition::UpperRight),
            "bl" => Ok(GridPosition::BottomLeft),
            "br" => Ok(GridPosition::BottomRight),
            other => Err(SheetError::UnknownGridPosition(other.to_string())),
        }
    }
}

/// Lines of a square grid. The grid always covers the whole canvas and usually overhangs
/// it; whatever falls outside is cut off by the drawing's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    /// Area covered by the grid, relative to the canvas' top-left corner
    pub bounds: Rect,
    /// Positions of the vertical lines, left to right; empty for ruled sheets
    pub columns: Vec<Mm>,
    /// Positions of the horizontal lines, top to bottom
    pub rows: Vec<Mm>,
}

/// Most cells a grid may have along either side of the canvas
pub const MAX_GRID_CELLS: usize = 10_000;

fn cells_along(square: Mm, length: Mm) -> Result<usize, InvalidParameterError> {
    let too_small = InvalidParameterError {
        parameter: "grid square size",
        value: *square,
        requirement: "is too small for the canvas: a side would need more than 10000 cells",
    };
    // one extra cell so that a shifted grid still covers the canvas
    validate::line_count(
        too_small.parameter,
        too_small.value,
        (*length / *square).ceil(),
        MAX_GRID_CELLS,
        too_small.requirement,
    )?
    .checked_add(1)
    .ok_or(too_small)
}

/// Square grid of `square`-sized cells over a `width` × `height` canvas. Fails when
/// `square` is so small that a side would need more than [MAX_GRID_CELLS] cells.
pub fn grid_lines(
    square: Mm,
    width: Mm,
    height: Mm,
    position: GridPosition,
    vertical_lines: bool,
) -> Result<GridLines, InvalidParameterError> {
    let cells_x = cells_along(square, width)?;
    let cells_y = cells_along(square, height)?;
    let grid_width = square * cells_x as f64;
    let grid_height = square * cells_y as f64;

    let (left, top) = match position {
        GridPosition::UpperLeft => (Mm(0.0), Mm(0.0)),
        GridPosition::UpperRight => (width - grid_width, Mm(0.0)),
        GridPosition::Centre => ((width - grid_width) / 2.0, (height - grid_height) / 2.0),
        GridPosition::BottomLeft => (Mm(0.0), height - grid_height),
        GridPosition::BottomRight => (width - grid_width, height - grid_height),
    };

    let columns = if vertical_lines {
        (0..=cells_x).map(|i| left + square * i as f64).collect()
    } else {
        Vec::new()
    };
    let rows = (0..=cells_y).map(|i| top + square * i as f64).collect();

    Ok(GridLines {
        bounds: Rect::from_origin(Point::new(left, top), grid_width, grid_height),
        columns,
        rows,
    })
}
