//! Pre-defined page sizes for the paper formats a CV is usually printed on.
//!
//! Sizes are (width, height) in portrait orientation, expressed in millimetres since
//! that is the unit the résumé layout works in.

use crate::units::Mm;

/// Page dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

pub const A4: PageSize = (Mm(210.0), Mm(297.0));
pub const A5: PageSize = (Mm(148.0), Mm(210.0));
pub const LETTER: PageSize = (Mm(215.9), Mm(279.4));
pub const LEGAL: PageSize = (Mm(215.9), Mm(355.6));
