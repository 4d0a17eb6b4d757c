use serde::Serialize;

use crate::quantity::cost::Euros;

/// Simple (undiscounted) payback period.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Payback {
    /// The investment is recovered after this many years; zero when nothing was invested.
    Years(f64),

    /// The annual cash flow never recovers the investment.
    Never,
}

impl Payback {
    pub const IMMEDIATE: Self = Self::Years(0.0);

    pub fn new(investment: Euros, annual_cashflow: Euros) -> Self {
        if investment <= Euros::ZERO {
            Self::IMMEDIATE
        } else if annual_cashflow <= Euros::ZERO {
            Self::Never
        } else {
            Self::Years(investment / annual_cashflow)
        }
    }

    pub const fn years(self) -> Option<f64> {
        match self {
            Self::Years(years) => Some(years),
            Self::Never => None,
        }
    }
}

impl From<Payback> for Option<f64> {
    fn from(payback: Payback) -> Self {
        payback.years()
    }
}
