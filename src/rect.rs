use crate::units::*;

/// A point on a sheet or page. The origin is the top-left corner and y increases downwards.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: Mm,
    pub y: Mm,
}

impl Point {
    pub fn new(x: Mm, y: Mm) -> Point {
        Point { x, y }
    }
}

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (top-left) corner.
    pub x1: Mm,
    /// The y-coordinate of the first (top-left) corner.
    pub y1: Mm,
    /// The x-coordinate of the second (bottom-right) corner.
    pub x2: Mm,
    /// The y-coordinate of the second (bottom-right) corner.
    pub y2: Mm,
}

impl Rect {
    /// A rectangle of the given size with its top-left corner at `origin`
    pub fn from_origin(origin: Point, width: Mm, height: Mm) -> Rect {
        Rect {
            x1: origin.x,
            y1: origin.y,
            x2: origin.x + width,
            y2: origin.y + height,
        }
    }

    pub fn width(&self) -> Mm {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Mm {
        self.y2 - self.y1
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Whether `other` lies entirely within this rectangle (edges included)
    pub fn contains(&self, other: &Rect) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }
}
