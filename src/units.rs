//! Physical units used throughout the crate.
//!
//! The résumé engine lays out in millimetres ([Mm]) with the origin at the top-left
//! corner of the page, while the PDF backend writes points ([Pt]) with the origin at
//! the bottom-left. Both are thin `f32` newtypes so they can't be mixed up by accident.

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul, Neg};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// PDF points (1/72 of an inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[display("{_0}")]
pub struct Pt(pub f32);

/// Millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[display("{_0}mm")]
#[serde(transparent)]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * POINTS_PER_MM)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 / POINTS_PER_MM)
    }
}

macro_rules! scalar_ops {
    ($unit:ident) => {
        impl Mul<f32> for $unit {
            type Output = $unit;

            fn mul(self, rhs: f32) -> $unit {
                $unit(self.0 * rhs)
            }
        }

        impl Mul<$unit> for f32 {
            type Output = $unit;

            fn mul(self, rhs: $unit) -> $unit {
                $unit(self * rhs.0)
            }
        }

        impl Div<f32> for $unit {
            type Output = $unit;

            fn div(self, rhs: f32) -> $unit {
                $unit(self.0 / rhs)
            }
        }

        /// Dividing two lengths yields a plain ratio
        impl Div<$unit> for $unit {
            type Output = f32;

            fn div(self, rhs: $unit) -> f32 {
                self.0 / rhs.0
            }
        }

        impl Neg for $unit {
            type Output = $unit;

            fn neg(self) -> $unit {
                $unit(-self.0)
            }
        }

        impl $unit {
            /// The larger of two lengths
            pub fn max(self, other: $unit) -> $unit {
                $unit(self.0.max(other.0))
            }

            /// The smaller of two lengths
            pub fn min(self, other: $unit) -> $unit {
                $unit(self.0.min(other.0))
            }
        }
    };
}

scalar_ops!(Pt);
scalar_ops!(Mm);
