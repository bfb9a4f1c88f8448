use crate::error::SheetError;
use std::fmt;
use std::str::FromStr;

/// A stroke colour, expressed in RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// RGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// Grey colour; g ranges from 0.0 (black) to 1.0 (white)
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the grey space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    fn to_bytes(self) -> [u8; 3] {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self {
            Colour::RGB { r, g, b } => [byte(r), byte(g), byte(b)],
            Colour::Grey { g } => [byte(g); 3],
        }
    }
}

/// Formats as an SVG hex colour, e.g. `#000` or `#3366cc`
impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_bytes();
        if r % 17 == 0 && g % 17 == 0 && b % 17 == 0 {
            write!(f, "#{:x}{:x}{:x}", r / 17, g / 17, b / 17)
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// Parses `#rgb`, `#rrggbb`, or one of the names in [colours]
impl FromStr for Colour {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SheetError::UnknownColour(s.to_string());
        let text = s.trim().to_ascii_lowercase();
        match text.as_str() {
            "black" => return Ok(colours::BLACK),
            "grey" | "gray" => return Ok(colours::GREY),
            "red" => return Ok(colours::RED),
            "blue" => return Ok(colours::BLUE),
            _ => {}
        }

        let hex = text.strip_prefix('#').ok_or_else(unknown)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(unknown());
        }
        let digit = |i: usize, len: usize| {
            u8::from_str_radix(&hex[i * len..(i + 1) * len], 16).map_err(|_| unknown())
        };
        match hex.len() {
            3 => Ok(Colour::new_rgb_bytes(
                digit(0, 1)? * 17,
                digit(1, 1)? * 17,
                digit(2, 1)? * 17,
            )),
            6 => Ok(Colour::new_rgb_bytes(digit(0, 2)?, digit(1, 2)?, digit(2, 2)?)),
            _ => Err(unknown()),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.6 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}
