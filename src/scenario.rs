//! Scenario inputs: the built-in baseline, TOML loading, and validation.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::variant::BatteryInvestment,
    prelude::*,
    quantity::{
        cost::Euros,
        energy::KilowattHours,
        proportions::Percentage,
        rate::{CentsPerKilowattHour, KilowattHourRate},
    },
};

/// Everything the comparison needs, with every field defaulting to the baseline.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub site: Site,
    pub prices: Prices,
    pub self_consumption: SelfConsumption,
    pub battery: Battery,
    pub new_system: NewSystem,
}

/// The existing array and the household behind the meter.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Site {
    /// Annual generation of the existing array.
    pub generation: KilowattHours,

    /// Annual household consumption.
    pub consumption: KilowattHours,
}

impl Default for Site {
    fn default() -> Self {
        Self { generation: KilowattHours::from(4500.0), consumption: KilowattHours::from(4000.0) }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Prices {
    /// Market value paid for exported energy once the subsidy has ended.
    pub market: CentsPerKilowattHour,

    /// Purchase price of grid energy.
    pub retail: CentsPerKilowattHour,
}

impl Default for Prices {
    fn default() -> Self {
        Self { market: CentsPerKilowattHour(3.5), retail: CentsPerKilowattHour(32.0) }
    }
}

/// Variant 2.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelfConsumption {
    pub target_share: Percentage,

    /// Rewiring and re-registration cost.
    pub rewiring: Euros,
}

impl Default for SelfConsumption {
    fn default() -> Self {
        Self { target_share: Percentage(30.0), rewiring: Euros::from(1200.0) }
    }
}

/// Variant 3.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Battery {
    pub target_share: Percentage,
    pub rewiring: Euros,
    pub capacity: KilowattHours,

    /// Battery price per kilowatt-hour of capacity.
    pub price_per_kwh: KilowattHourRate,
}

impl Default for Battery {
    fn default() -> Self {
        Self {
            target_share: Percentage(60.0),
            rewiring: Euros::from(1200.0),
            capacity: KilowattHours::from(8.0),
            price_per_kwh: KilowattHourRate::from(500.0),
        }
    }
}

/// Variant 4.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewSystem {
    /// Decommissioning plus the new system.
    pub investment: Euros,

    /// Annual generation of the new array.
    pub generation: KilowattHours,

    pub target_share: Percentage,

    /// Fixed feed-in tariff of the new system.
    pub feed_in_tariff: CentsPerKilowattHour,
}

impl Default for NewSystem {
    fn default() -> Self {
        Self {
            investment: Euros::from(16000.0),
            generation: KilowattHours::from(7000.0),
            target_share: Percentage(35.0),
            feed_in_tariff: CentsPerKilowattHour(8.0),
        }
    }
}

impl Scenario {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid scenario `{}`", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub const fn battery_investment(&self) -> BatteryInvestment {
        BatteryInvestment {
            rewiring: self.battery.rewiring,
            capacity: self.battery.capacity,
            price_per_kwh: self.battery.price_per_kwh,
        }
    }

    /// Reject amounts the formulas are not meant for.
    ///
    /// Percentages are only required to be finite, the allocation clamps them.
    pub fn validate(&self) -> Result {
        ensure_amount("site.generation", self.site.generation.0)?;
        ensure_amount("site.consumption", self.site.consumption.0)?;
        ensure_amount("prices.market", self.prices.market.0)?;
        ensure_amount("prices.retail", self.prices.retail.0)?;
        ensure_share("self_consumption.target_share", self.self_consumption.target_share)?;
        ensure_amount("self_consumption.rewiring", self.self_consumption.rewiring.0)?;
        ensure_share("battery.target_share", self.battery.target_share)?;
        ensure_amount("battery.rewiring", self.battery.rewiring.0)?;
        ensure_amount("battery.capacity", self.battery.capacity.0)?;
        ensure_amount("battery.price_per_kwh", self.battery.price_per_kwh.0)?;
        ensure_amount("new_system.investment", self.new_system.investment.0)?;
        ensure_amount("new_system.generation", self.new_system.generation.0)?;
        ensure_share("new_system.target_share", self.new_system.target_share)?;
        ensure_amount("new_system.feed_in_tariff", self.new_system.feed_in_tariff.0)?;
        Ok(())
    }
}

fn ensure_amount(field: &str, value: f64) -> Result {
    ensure!(
        value.is_finite() && value >= 0.0,
        "`{field}` must be a non-negative number, got {value}"
    );
    Ok(())
}

fn ensure_share(field: &str, share: Percentage) -> Result {
    ensure!(share.0.is_finite(), "`{field}` must be a finite percentage, got {}", share.0);
    if share != share.clamped() {
        warn!(field, share = share.0, "percentage is out of range and will be clamped");
    }
    Ok(())
}
