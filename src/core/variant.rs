use std::fmt::{Display, Formatter};

use bon::builder;
use comfy_table::Color;
use serde::Serialize;

use crate::{
    core::{allocation::Allocation, outcome::Outcome},
    prelude::*,
    quantity::{
        cost::Euros,
        energy::KilowattHours,
        proportions::Percentage,
        rate::KilowattHourRate,
    },
};

/// How to carry on once the feed-in subsidy has ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Keep exporting everything at the market value.
    FullFeedIn,

    /// Consume on-site, export the rest at the market value.
    SelfConsumption,

    /// Same as [`Variant::SelfConsumption`], with a battery raising the self-consumption.
    SelfConsumptionWithBattery,

    /// Tear the old array down and install a new one with a fixed feed-in tariff.
    NewSystem,
}

impl Variant {
    /// Evaluation order, which also breaks ties.
    pub const ALL: [Self; 4] = [
        Self::FullFeedIn,
        Self::SelfConsumption,
        Self::SelfConsumptionWithBattery,
        Self::NewSystem,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullFeedIn => "V1 Full feed-in (market value)",
            Self::SelfConsumption => "V2 Self-consumption (no storage)",
            Self::SelfConsumptionWithBattery => "V3 Self-consumption + battery",
            Self::NewSystem => "V4 New system (tariff + self-consumption)",
        }
    }

    /// What the exported energy is paid at.
    pub const fn export_label(self) -> &'static str {
        match self {
            Self::FullFeedIn | Self::SelfConsumption | Self::SelfConsumptionWithBattery => {
                "market value"
            }
            Self::NewSystem => "feed-in tariff",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::FullFeedIn => Color::Cyan,
            Self::SelfConsumption => Color::DarkYellow,
            Self::SelfConsumptionWithBattery => Color::Green,
            Self::NewSystem => Color::Magenta,
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Variant 3 investment: rewiring plus the battery priced per kilowatt-hour of capacity.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BatteryInvestment {
    pub rewiring: Euros,
    pub capacity: KilowattHours,
    pub price_per_kwh: KilowattHourRate,
}

impl BatteryInvestment {
    pub fn battery(&self) -> Euros {
        self.capacity * self.price_per_kwh
    }

    pub fn total(&self) -> Euros {
        self.rewiring + self.battery()
    }
}

/// Variant 1: the whole generation is sold at the market value, nothing is invested.
#[instrument(skip_all, fields(generation = %generation))]
pub fn full_feed_in(generation: KilowattHours, market_rate: KilowattHourRate) -> Outcome {
    let allocation = Allocation::full_export(generation);
    let outcome = Outcome::builder()
        .variant(Variant::FullFeedIn)
        .investment(Euros::ZERO)
        .annual_cashflow(allocation.value(KilowattHourRate::ZERO, market_rate))
        .allocation(allocation)
        .build();
    debug!(annual_cashflow = %outcome.annual_cashflow, "evaluated");
    outcome
}

/// Variants 2 and 3: self-consumption saves the purchase price, the rest earns the market value.
#[builder]
pub fn self_consumption(
    #[builder(default = Variant::SelfConsumption)] variant: Variant,
    generation: KilowattHours,
    consumption: KilowattHours,
    target_share: Percentage,
    investment: Euros,
    purchase_rate: KilowattHourRate,
    market_rate: KilowattHourRate,
) -> Outcome {
    let allocation = Allocation::new(generation, consumption, target_share);
    let outcome = Outcome::builder()
        .variant(variant)
        .investment(investment)
        .annual_cashflow(allocation.value(purchase_rate, market_rate))
        .allocation(allocation)
        .build();
    debug!(
        ?variant,
        self_consumed = %allocation.self_consumed,
        exported = %allocation.exported,
        annual_cashflow = %outcome.annual_cashflow,
        "evaluated"
    );
    outcome
}

/// Variant 3: [`self_consumption`] financed by rewiring plus a battery.
#[builder]
pub fn self_consumption_with_battery(
    generation: KilowattHours,
    consumption: KilowattHours,
    target_share: Percentage,
    investment: BatteryInvestment,
    purchase_rate: KilowattHourRate,
    market_rate: KilowattHourRate,
) -> Outcome {
    self_consumption()
        .variant(Variant::SelfConsumptionWithBattery)
        .generation(generation)
        .consumption(consumption)
        .target_share(target_share)
        .investment(investment.total())
        .purchase_rate(purchase_rate)
        .market_rate(market_rate)
        .call()
}

/// Variant 4: a new array whose export is paid at the fixed feed-in tariff.
#[builder]
pub fn new_system(
    generation: KilowattHours,
    consumption: KilowattHours,
    target_share: Percentage,
    investment: Euros,
    purchase_rate: KilowattHourRate,
    feed_in_rate: KilowattHourRate,
) -> Outcome {
    let allocation = Allocation::new(generation, consumption, target_share);
    let outcome = Outcome::builder()
        .variant(Variant::NewSystem)
        .investment(investment)
        .annual_cashflow(allocation.value(purchase_rate, feed_in_rate))
        .allocation(allocation)
        .build();
    debug!(
        self_consumed = %allocation.self_consumed,
        exported = %allocation.exported,
        annual_cashflow = %outcome.annual_cashflow,
        "evaluated"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{core::payback::Payback, quantity::rate::CentsPerKilowattHour};

    const RETAIL: CentsPerKilowattHour = CentsPerKilowattHour(32.0);
    const MARKET: CentsPerKilowattHour = CentsPerKilowattHour(3.5);

    #[test]
    fn full_feed_in_ok() {
        let outcome = full_feed_in(KilowattHours::from(4500.0), MARKET.to_rate());
        assert_abs_diff_eq!(outcome.annual_cashflow.0, 157.5, epsilon = 1e-9);
        assert_eq!(outcome.investment, Euros::ZERO);
        assert_eq!(outcome.payback, Payback::IMMEDIATE);
        assert_abs_diff_eq!(outcome.total_20_years.0, 3150.0, epsilon = 1e-9);
        assert_eq!(outcome.allocation.exported, KilowattHours::from(4500.0));
    }

    #[test]
    fn self_consumption_ok() {
        let outcome = self_consumption()
            .generation(KilowattHours::from(4500.0))
            .consumption(KilowattHours::from(4000.0))
            .target_share(Percentage(30.0))
            .investment(Euros::from(1200.0))
            .purchase_rate(RETAIL.to_rate())
            .market_rate(MARKET.to_rate())
            .call();
        assert_eq!(outcome.variant, Variant::SelfConsumption);
        assert_abs_diff_eq!(outcome.allocation.self_consumed.0, 1350.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.allocation.exported.0, 3150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.annual_cashflow.0, 542.25, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.total_10_years.0, 4222.5, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.payback.years().unwrap(), 1200.0 / 542.25, epsilon = 1e-9);
    }

    #[test]
    fn battery_investment_ok() {
        let investment = BatteryInvestment {
            rewiring: Euros::from(1200.0),
            capacity: KilowattHours::from(8.0),
            price_per_kwh: KilowattHourRate::from(500.0),
        };
        assert_eq!(investment.battery(), Euros::from(4000.0));
        assert_eq!(investment.total(), Euros::from(5200.0));
    }

    #[test]
    fn self_consumption_with_battery_ok() {
        let outcome = self_consumption_with_battery()
            .generation(KilowattHours::from(4500.0))
            .consumption(KilowattHours::from(4000.0))
            .target_share(Percentage(60.0))
            .investment(BatteryInvestment {
                rewiring: Euros::from(1200.0),
                capacity: KilowattHours::from(8.0),
                price_per_kwh: KilowattHourRate::from(500.0),
            })
            .purchase_rate(RETAIL.to_rate())
            .market_rate(MARKET.to_rate())
            .call();
        assert_eq!(outcome.variant, Variant::SelfConsumptionWithBattery);
        assert_eq!(outcome.investment, Euros::from(5200.0));
        assert_abs_diff_eq!(outcome.annual_cashflow.0, 927.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.total_20_years.0, 13340.0, epsilon = 1e-9);
    }

    #[test]
    fn new_system_ok() {
        let outcome = new_system()
            .generation(KilowattHours::from(7000.0))
            .consumption(KilowattHours::from(4000.0))
            .target_share(Percentage(35.0))
            .investment(Euros::from(16000.0))
            .purchase_rate(RETAIL.to_rate())
            .feed_in_rate(CentsPerKilowattHour(8.0).to_rate())
            .call();
        assert_abs_diff_eq!(outcome.allocation.self_consumed.0, 2450.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.allocation.exported.0, 4550.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.annual_cashflow.0, 1148.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.total_10_years.0, -4520.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outcome.total_20_years.0, 6960.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_cashflow_never_pays_back() {
        let outcome = new_system()
            .generation(KilowattHours::from(7000.0))
            .consumption(KilowattHours::ZERO)
            .target_share(Percentage(35.0))
            .investment(Euros::from(16000.0))
            .purchase_rate(RETAIL.to_rate())
            .feed_in_rate(KilowattHourRate::ZERO)
            .call();
        assert_eq!(outcome.annual_cashflow, Euros::ZERO);
        assert_eq!(outcome.payback, Payback::Never);
    }
}
