use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;

/// Euro per kilowatt-hour.
pub type KilowattHourRate = Quantity<-1, 1>;

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} €/kWh", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}€/kWh", self.0)
    }
}

/// Price in euro cents per kilowatt-hour, the way tariffs are usually quoted.
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
pub struct CentsPerKilowattHour(pub f64);

impl CentsPerKilowattHour {
    /// Convert the cent price into a euro price.
    pub fn to_rate(self) -> KilowattHourRate {
        Quantity(self.0 / 100.0)
    }
}

impl Display for CentsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ct/kWh", self.0)
    }
}

impl Debug for CentsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}ct/kWh", self.0)
    }
}
