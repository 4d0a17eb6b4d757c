use bon::bon;
use serde::Serialize;

use crate::{
    core::{allocation::Allocation, payback::Payback, variant::Variant},
    quantity::cost::Euros,
};

/// Financial outcome of a single variant.
///
/// Totals are linear projections of the steady annual cash flow, without discounting.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome {
    pub variant: Variant,
    pub name: &'static str,

    #[serde(rename = "invest_eur")]
    pub investment: Euros,

    #[serde(rename = "annual_cashflow_eur")]
    pub annual_cashflow: Euros,

    #[serde(rename = "total_10y_eur")]
    pub total_10_years: Euros,

    #[serde(rename = "total_20y_eur")]
    pub total_20_years: Euros,

    #[serde(rename = "payback_years")]
    pub payback: Payback,

    pub allocation: Allocation,
}

#[bon]
impl Outcome {
    #[builder]
    pub fn new(
        variant: Variant,
        investment: Euros,
        annual_cashflow: Euros,
        allocation: Allocation,
    ) -> Self {
        Self {
            variant,
            name: variant.label(),
            investment,
            annual_cashflow,
            total_10_years: cumulative_cashflow(investment, annual_cashflow, 10),
            total_20_years: cumulative_cashflow(investment, annual_cashflow, 20),
            payback: Payback::new(investment, annual_cashflow),
            allocation,
        }
    }
}

impl Outcome {
    /// Net position at the end of the year, year zero being the investment itself.
    pub fn cashflow_at(&self, year: u32) -> Euros {
        cumulative_cashflow(self.investment, self.annual_cashflow, year)
    }
}

fn cumulative_cashflow(investment: Euros, annual_cashflow: Euros, years: u32) -> Euros {
    -investment + annual_cashflow * f64::from(years)
}
