use serde::{Deserialize, Serialize};

/// A colour for text fills and rule strokes
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// PDF operator setting this colour as the fill (text) colour
    pub(crate) fn fill_operator(&self) -> String {
        match self {
            Colour::RGB { r, g, b } => format!("{r} {g} {b} rg"),
            Colour::Grey { g } => format!("{g} g"),
        }
    }

    /// PDF operator setting this colour as the stroke (line) colour
    pub(crate) fn stroke_operator(&self) -> String {
        match self {
            Colour::RGB { r, g, b } => format!("{r} {g} {b} RG"),
            Colour::Grey { g } => format!("{g} G"),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Light grey used for the header and continuation rules
    pub const RULE_GREY: Colour = Colour::Grey {
        g: 180.0 / 255.0,
    };
}
