use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        comparison::{Comparison, Metric},
        variant::Variant,
    },
    fmt::{FormattedCents, FormattedEnergy, FormattedEuros},
    quantity::{cost::Euros, rate::CentsPerKilowattHour},
    scenario::Scenario,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn header(comparison: &Comparison, first: &str) -> Vec<Cell> {
    let recommended = comparison.recommended().variant;
    let mut header = vec![Cell::new(first)];
    header.extend(comparison.outcomes.iter().map(|outcome| {
        let cell = Cell::new(outcome.name).fg(outcome.variant.color());
        if outcome.variant == recommended { cell.add_attribute(Attribute::Bold) } else { cell }
    }));
    header
}

const fn sign_color(value: Euros) -> Color {
    if value.0 >= 0.0 { Color::Green } else { Color::Red }
}

/// Metrics as rows, variants as columns, the recommended variant in bold.
#[must_use]
pub fn build_comparison_table(comparison: &Comparison) -> Table {
    let recommended = comparison.recommended().variant;
    let matrix = comparison.matrix();

    let mut table = new_table();
    table.set_header(header(comparison, "Metric"));
    for (metric, cells) in matrix.rows {
        let mut row = vec![Cell::new(metric.label()).add_attribute(Attribute::Dim)];
        row.extend(cells.into_iter().zip(&comparison.outcomes).map(|(text, outcome)| {
            let cell = Cell::new(text).set_alignment(CellAlignment::Right);
            let cell = match metric {
                Metric::Total10Years => cell.fg(sign_color(outcome.total_10_years)),
                Metric::Total20Years => cell.fg(sign_color(outcome.total_20_years)),
                Metric::Investment | Metric::Payback | Metric::AnnualCashflow => cell,
            };
            if outcome.variant == recommended { cell.add_attribute(Attribute::Bold) } else { cell }
        }));
        table.add_row(row);
    }
    table
}

/// Recommendation and the key inputs behind it.
#[must_use]
pub fn build_summary_table(scenario: &Scenario, comparison: &Comparison) -> Table {
    let recommended = comparison.recommended();
    let battery_investment = scenario.battery_investment();

    let mut table = new_table();
    table.set_header(vec!["Summary", ""]);
    table.add_row(vec![
        Cell::new("Best after 20 years"),
        Cell::new(format!(
            "{} with {}",
            recommended.name,
            FormattedEuros(recommended.total_20_years),
        ))
        .fg(recommended.variant.color())
        .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Existing generation"),
        Cell::new(format!("{} per year", FormattedEnergy(scenario.site.generation))),
    ]);
    table.add_row(vec![
        Cell::new("Consumption"),
        Cell::new(format!("{} per year", FormattedEnergy(scenario.site.consumption))),
    ]);
    table.add_row(vec![
        Cell::new("Retail price"),
        Cell::new(format!("{:.1} ct/kWh", scenario.prices.retail.0)),
    ]);
    table.add_row(vec![
        Cell::new("Market value"),
        Cell::new(format!("{:.1} ct/kWh", scenario.prices.market.0)),
    ]);
    table.add_row(vec![
        Cell::new("V3 battery"),
        Cell::new(format!(
            "{:.1} kWh × {:.0} €/kWh = {}",
            battery_investment.capacity.0,
            battery_investment.price_per_kwh.0,
            FormattedEuros(battery_investment.battery()),
        )),
    ]);
    table.add_row(vec![
        Cell::new("V3 rewiring"),
        Cell::new(FormattedEuros(battery_investment.rewiring)),
    ]);
    table.add_row(vec![
        Cell::new("V3 total investment"),
        Cell::new(FormattedEuros(battery_investment.total())).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Cumulative cash flow per year. A variant breaks even where its column turns green.
#[must_use]
pub fn build_cashflow_table(comparison: &Comparison) -> Table {
    let series = comparison.series();

    let mut table = new_table();
    table.set_header(header(comparison, "Year"));
    let n_years = series.first().map_or(0, |series| series.values.len());
    for year in 0..n_years {
        let mut row = vec![Cell::new(year).add_attribute(Attribute::Dim)];
        row.extend(series.iter().map(|series| {
            let value = series.values[year];
            Cell::new(FormattedEuros(value))
                .set_alignment(CellAlignment::Right)
                .fg(sign_color(value))
        }));
        table.add_row(row);
    }
    table
}

/// Energy split behind each variant.
#[must_use]
pub fn build_details_table(scenario: &Scenario, comparison: &Comparison) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Variant",
        "Generation",
        "Target",
        "Self-consumed",
        "Exported",
        "Export price",
        "Paid at",
    ]);
    for outcome in &comparison.outcomes {
        let allocation = &outcome.allocation;
        table.add_row(vec![
            Cell::new(outcome.name).fg(outcome.variant.color()),
            Cell::new(FormattedEnergy(allocation.generation)).set_alignment(CellAlignment::Right),
            Cell::new(allocation.target_share).set_alignment(CellAlignment::Right),
            Cell::new(FormattedEnergy(allocation.self_consumed))
                .set_alignment(CellAlignment::Right),
            Cell::new(FormattedEnergy(allocation.exported)).set_alignment(CellAlignment::Right),
            Cell::new(FormattedCents(export_price(scenario, outcome.variant)))
                .set_alignment(CellAlignment::Right),
            Cell::new(outcome.variant.export_label()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

const fn export_price(scenario: &Scenario, variant: Variant) -> CentsPerKilowattHour {
    match variant {
        Variant::FullFeedIn | Variant::SelfConsumption | Variant::SelfConsumptionWithBattery => {
            scenario.prices.market
        }
        Variant::NewSystem => scenario.new_system.feed_in_tariff,
    }
}
