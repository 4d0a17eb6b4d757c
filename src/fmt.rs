//! Display rules for the reports: whole euros and kilowatt-hours with `.` grouping.

use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::{
    core::payback::Payback,
    quantity::{cost::Euros, energy::KilowattHours, rate::CentsPerKilowattHour},
};

/// Rendered in place of a payback period that never comes.
pub const NEVER: &str = "—";

pub struct FormattedEuros(pub Euros);

impl Display for FormattedEuros {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} €", group_thousands(self.0.0))
    }
}

pub struct FormattedEnergy(pub KilowattHours);

impl Display for FormattedEnergy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kWh", group_thousands(self.0.0))
    }
}

pub struct FormattedPayback(pub Payback);

impl Display for FormattedPayback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Payback::Years(years) => write!(f, "{years:.1} J"),
            Payback::Never => f.write_str(NEVER),
        }
    }
}

pub struct FormattedCents(pub CentsPerKilowattHour);

impl Display for FormattedCents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} ct/kWh", self.0.0)
    }
}

/// Round to a whole number and group the digits by thousands with dots.
///
/// Anything that rounds to zero loses its sign.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let grouped: String = digits
        .chars()
        .rev()
        .chunks(3)
        .into_iter()
        .map(|chunk| chunk.collect::<String>())
        .join(".")
        .chars()
        .rev()
        .collect();
    if value.is_sign_negative() && digits != "0" { format!("-{grouped}") } else { grouped }
}
