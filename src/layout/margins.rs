use crate::units::Mm;
use serde::{Deserialize, Serialize};

/// Page margins. Nothing stops content from being drawn inside the margins; they
/// are the bounds the layout engine keeps its columns and page breaks within.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Mm,
    pub right: Mm,
    pub bottom: Mm,
    pub left: Mm,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Mm, right: Mm, bottom: Mm, left: Mm) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all(value: Mm) -> Margins {
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Mm, horizontal: Mm) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::all(Mm(15.0))
    }
}
