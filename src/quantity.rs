pub mod cost;
pub mod energy;
pub mod proportions;
pub mod rate;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Annual quantity tagged with its energy and currency dimensions.
///
/// Everything in this crate is a steady yearly value, so time does not appear as a dimension.
#[derive(
    Clone,
    Copy,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
#[must_use]
pub struct Quantity<const ENERGY: isize, const COST: isize>(pub f64);

impl<const ENERGY: isize, const COST: isize> Quantity<ENERGY, COST> {
    pub const ZERO: Self = Self(0.0);

    pub fn min(mut self, rhs: Self) -> Self {
        if rhs < self {
            self = rhs;
        }
        self
    }

    pub fn max(mut self, rhs: Self) -> Self {
        if rhs > self {
            self = rhs;
        }
        self
    }
}

impl<const ENERGY: isize, const COST: isize> Mul<f64> for Quantity<ENERGY, COST> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Dimensionless ratio of two like quantities.
impl<const ENERGY: isize, const COST: isize> Div<Self> for Quantity<ENERGY, COST> {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
