use serde::Serialize;

use crate::{
    core::{
        outcome::Outcome,
        variant::{self, Variant},
    },
    fmt::{FormattedEuros, FormattedPayback},
    prelude::*,
    quantity::cost::Euros,
    scenario::Scenario,
};

/// Last year of the projections.
pub const HORIZON_YEARS: u32 = 20;

/// All four variants evaluated against the same scenario, in [`Variant::ALL`] order.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    pub outcomes: [Outcome; 4],
}

impl Comparison {
    #[instrument(skip_all)]
    pub fn evaluate(scenario: &Scenario) -> Self {
        let market_rate = scenario.prices.market.to_rate();
        let purchase_rate = scenario.prices.retail.to_rate();
        let outcomes = [
            variant::full_feed_in(scenario.site.generation, market_rate),
            variant::self_consumption()
                .generation(scenario.site.generation)
                .consumption(scenario.site.consumption)
                .target_share(scenario.self_consumption.target_share)
                .investment(scenario.self_consumption.rewiring)
                .purchase_rate(purchase_rate)
                .market_rate(market_rate)
                .call(),
            variant::self_consumption_with_battery()
                .generation(scenario.site.generation)
                .consumption(scenario.site.consumption)
                .target_share(scenario.battery.target_share)
                .investment(scenario.battery_investment())
                .purchase_rate(purchase_rate)
                .market_rate(market_rate)
                .call(),
            variant::new_system()
                .generation(scenario.new_system.generation)
                .consumption(scenario.site.consumption)
                .target_share(scenario.new_system.target_share)
                .investment(scenario.new_system.investment)
                .purchase_rate(purchase_rate)
                .feed_in_rate(scenario.new_system.feed_in_tariff.to_rate())
                .call(),
        ];
        let this = Self { outcomes };
        let recommended = this.recommended();
        info!(
            variant = recommended.name,
            total_20_years = %recommended.total_20_years,
            "recommended"
        );
        this
    }

    /// Variant with the greatest 20-year total. Exact ties go to the earlier variant.
    pub fn recommended(&self) -> &Outcome {
        let [first, rest @ ..] = &self.outcomes;
        rest.iter().fold(first, |best, outcome| {
            if outcome.total_20_years > best.total_20_years { outcome } else { best }
        })
    }

    /// Cumulative cash flow of every variant for the years `0..=HORIZON_YEARS`.
    pub fn series(&self) -> Vec<Series> {
        self.outcomes
            .iter()
            .map(|outcome| Series {
                variant: outcome.variant,
                values: (0..=HORIZON_YEARS).map(|year| outcome.cashflow_at(year)).collect(),
            })
            .collect()
    }

    /// Metrics as rows, variants as columns, cells formatted for display.
    pub fn matrix(&self) -> Matrix {
        Matrix {
            columns: self.outcomes.iter().map(|outcome| outcome.variant).collect(),
            rows: Metric::ALL
                .into_iter()
                .map(|metric| {
                    (metric, self.outcomes.iter().map(|outcome| metric.format(outcome)).collect())
                })
                .collect(),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Series {
    pub variant: Variant,

    /// Indexed by year, year zero being the negated investment.
    pub values: Vec<Euros>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Metric {
    Investment,
    Total10Years,
    Total20Years,
    Payback,
    AnnualCashflow,
}

impl Metric {
    pub const ALL: [Self; 5] = [
        Self::Investment,
        Self::Total10Years,
        Self::Total20Years,
        Self::Payback,
        Self::AnnualCashflow,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Investment => "Investment",
            Self::Total10Years => "10-year total",
            Self::Total20Years => "20-year total",
            Self::Payback => "Payback period",
            Self::AnnualCashflow => "Annual cash flow",
        }
    }

    pub fn format(self, outcome: &Outcome) -> String {
        match self {
            Self::Investment => FormattedEuros(outcome.investment).to_string(),
            Self::Total10Years => FormattedEuros(outcome.total_10_years).to_string(),
            Self::Total20Years => FormattedEuros(outcome.total_20_years).to_string(),
            Self::Payback => FormattedPayback(outcome.payback).to_string(),
            Self::AnnualCashflow => FormattedEuros(outcome.annual_cashflow).to_string(),
        }
    }
}

/// Display-ready comparison.
#[must_use]
pub struct Matrix {
    pub columns: Vec<Variant>,
    pub rows: Vec<(Metric, Vec<String>)>,
}
