use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Share of the generated energy, nominally `0..=100`.
#[derive(
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
#[must_use]
pub struct Percentage(pub f64);

impl Percentage {
    pub const ZERO: Self = Self(0.0);
    pub const HUNDRED: Self = Self(100.0);

    /// Bring the percentage into `0..=100`. Out-of-range input is tolerated, not rejected.
    pub const fn clamped(self) -> Self {
        Self(self.0.clamp(Self::ZERO.0, Self::HUNDRED.0))
    }

    /// Convert the percentage into `0.0..=1.0` (if it has been clamped).
    pub fn to_proportion(self) -> f64 {
        self.0 / 100.0
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} %", self.0)
    }
}

impl Debug for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped() {
        assert_eq!(Percentage(150.0).clamped(), Percentage::HUNDRED);
        assert_eq!(Percentage(-5.0).clamped(), Percentage::ZERO);
        assert_eq!(Percentage(35.0).clamped(), Percentage(35.0));
    }
}
