use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    prelude::*,
    quantity::{
        cost::Euros,
        energy::KilowattHours,
        proportions::Percentage,
        rate::{CentsPerKilowattHour, KilowattHourRate},
    },
    scenario::Scenario,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare the four variants and recommend the best one after 20 years.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),

    /// Print the cumulative cash flow of every variant, year by year.
    #[clap(name = "cashflow")]
    Cashflow(Box<ScenarioArgs>),

    /// Print how the generated energy is split and priced in every variant.
    #[clap(name = "details")]
    Details(Box<ScenarioArgs>),
}

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub scenario: ScenarioArgs,

    /// Print the comparison as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ScenarioArgs {
    /// TOML scenario file. Missing fields fall back to the built-in baseline.
    #[clap(long = "scenario", env = "SCENARIO_PATH")]
    pub path: Option<PathBuf>,

    #[clap(flatten)]
    pub overrides: ScenarioOverrides,
}

impl ScenarioArgs {
    /// Read the scenario file (or take the baseline), apply the flags, and validate the result.
    pub fn load(&self) -> Result<Scenario> {
        let mut scenario = match &self.path {
            Some(path) => Scenario::from_toml_file(path)?,
            None => Scenario::default(),
        };
        self.overrides.apply_to(&mut scenario);
        scenario.validate()?;
        info!(
            generation = %scenario.site.generation,
            consumption = %scenario.site.consumption,
            "loaded the scenario"
        );
        Ok(scenario)
    }
}

/// Flags that take precedence over the scenario file.
#[derive(Copy, Clone, Parser)]
pub struct ScenarioOverrides {
    /// Annual generation of the existing array.
    #[clap(long = "generation-kwh", env = "GENERATION_KWH")]
    pub generation: Option<KilowattHours>,

    /// Annual household consumption.
    #[clap(long = "consumption-kwh", env = "CONSUMPTION_KWH")]
    pub consumption: Option<KilowattHours>,

    /// Market value of the exported energy.
    #[clap(long = "market-cents", env = "MARKET_CENTS")]
    pub market: Option<CentsPerKilowattHour>,

    /// Purchase price of the grid energy.
    #[clap(long = "retail-cents", env = "RETAIL_CENTS")]
    pub retail: Option<CentsPerKilowattHour>,

    /// Target self-consumption share without storage.
    #[clap(long = "self-consumption-percent", env = "SELF_CONSUMPTION_PERCENT")]
    pub self_consumption_share: Option<Percentage>,

    /// Rewiring and re-registration cost for self-consumption without storage.
    #[clap(long = "rewiring", env = "REWIRING")]
    pub rewiring: Option<Euros>,

    /// Target self-consumption share with the battery.
    #[clap(long = "battery-self-consumption-percent", env = "BATTERY_SELF_CONSUMPTION_PERCENT")]
    pub battery_share: Option<Percentage>,

    /// Rewiring cost for self-consumption with the battery.
    #[clap(long = "battery-rewiring", env = "BATTERY_REWIRING")]
    pub battery_rewiring: Option<Euros>,

    #[clap(long = "battery-capacity-kwh", env = "BATTERY_CAPACITY_KWH")]
    pub battery_capacity: Option<KilowattHours>,

    /// Battery price in euros per kilowatt-hour of capacity.
    #[clap(long = "battery-price-per-kwh", env = "BATTERY_PRICE_PER_KWH")]
    pub battery_price: Option<KilowattHourRate>,

    /// Total investment into the new system, decommissioning included.
    #[clap(long = "new-system-investment", env = "NEW_SYSTEM_INVESTMENT")]
    pub new_system_investment: Option<Euros>,

    /// Annual generation of the new array.
    #[clap(long = "new-system-generation-kwh", env = "NEW_SYSTEM_GENERATION_KWH")]
    pub new_system_generation: Option<KilowattHours>,

    /// Target self-consumption share of the new array.
    #[clap(
        long = "new-system-self-consumption-percent",
        env = "NEW_SYSTEM_SELF_CONSUMPTION_PERCENT"
    )]
    pub new_system_share: Option<Percentage>,

    /// Fixed feed-in tariff of the new system.
    #[clap(long = "feed-in-tariff-cents", env = "FEED_IN_TARIFF_CENTS")]
    pub feed_in_tariff: Option<CentsPerKilowattHour>,
}

impl ScenarioOverrides {
    pub fn apply_to(self, scenario: &mut Scenario) {
        if let Some(generation) = self.generation {
            scenario.site.generation = generation;
        }
        if let Some(consumption) = self.consumption {
            scenario.site.consumption = consumption;
        }
        if let Some(market) = self.market {
            scenario.prices.market = market;
        }
        if let Some(retail) = self.retail {
            scenario.prices.retail = retail;
        }
        if let Some(share) = self.self_consumption_share {
            scenario.self_consumption.target_share = share;
        }
        if let Some(rewiring) = self.rewiring {
            scenario.self_consumption.rewiring = rewiring;
        }
        if let Some(share) = self.battery_share {
            scenario.battery.target_share = share;
        }
        if let Some(rewiring) = self.battery_rewiring {
            scenario.battery.rewiring = rewiring;
        }
        if let Some(capacity) = self.battery_capacity {
            scenario.battery.capacity = capacity;
        }
        if let Some(price) = self.battery_price {
            scenario.battery.price_per_kwh = price;
        }
        if let Some(investment) = self.new_system_investment {
            scenario.new_system.investment = investment;
        }
        if let Some(generation) = self.new_system_generation {
            scenario.new_system.generation = generation;
        }
        if let Some(share) = self.new_system_share {
            scenario.new_system.target_share = share;
        }
        if let Some(tariff) = self.feed_in_tariff {
            scenario.new_system.feed_in_tariff = tariff;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::CommandFactory;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn args_ok() {
        Args::command().debug_assert();
    }

    #[test]
    fn overrides_take_precedence() {
        let args = Args::try_parse_from([
            "subsidy-sunset",
            "compare",
            "--generation-kwh",
            "5200",
            "--battery-capacity-kwh",
            "10",
            "--retail-cents",
            "35.5",
            "--rewiring",
            "900",
            "--battery-rewiring",
            "1500",
            "--new-system-generation-kwh",
            "6500",
            "--new-system-self-consumption-percent",
            "40",
            "--json",
        ])
        .unwrap();
        let Command::Compare(args) = args.command else {
            panic!("expected the `compare` command");
        };
        assert!(args.json);

        let mut scenario = Scenario::default();
        args.scenario.overrides.apply_to(&mut scenario);
        assert_eq!(scenario.site.generation, KilowattHours::from(5200.0));
        assert_eq!(scenario.battery.capacity, KilowattHours::from(10.0));
        assert_eq!(scenario.prices.retail, CentsPerKilowattHour(35.5));
        assert_eq!(scenario.self_consumption.rewiring, Euros::from(900.0));
        assert_eq!(scenario.battery.rewiring, Euros::from(1500.0));
        assert_eq!(scenario.new_system.generation, KilowattHours::from(6500.0));
        assert_eq!(scenario.new_system.target_share, Percentage(40.0));
        assert_eq!(scenario.site.consumption, KilowattHours::from(4000.0));
        assert_eq!(scenario.new_system.investment, Euros::from(16000.0));
    }

    #[test]
    fn loads_scenario_file_with_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[site]\nconsumption = 3000\n\n[battery]\nrewiring = 800").unwrap();
        let args = ScenarioArgs {
            path: Some(file.path().to_path_buf()),
            overrides: ScenarioOverrides {
                consumption: Some(KilowattHours::from(3500.0)),
                ..no_overrides()
            },
        };
        let scenario = args.load().unwrap();
        assert_eq!(scenario.site.consumption, KilowattHours::from(3500.0));
        assert_eq!(scenario.battery.rewiring, Euros::from(800.0));
        assert_eq!(scenario.site.generation, KilowattHours::from(4500.0));
    }

    #[test]
    fn invalid_scenario_file_names_the_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[battery]\nvoltage = 48").unwrap();
        let args = ScenarioArgs { path: Some(file.path().to_path_buf()), overrides: no_overrides() };
        let error = format!("{:#}", args.load().unwrap_err());
        assert!(error.contains("invalid scenario"));
        assert!(error.contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_scenario_file_is_reported() {
        let args = ScenarioArgs {
            path: Some(PathBuf::from("does-not-exist/scenario.toml")),
            overrides: no_overrides(),
        };
        let error = format!("{:#}", args.load().unwrap_err());
        assert!(error.contains("failed to read"));
    }

    #[test]
    fn negative_override_is_rejected() {
        let mut scenario = Scenario::default();
        ScenarioOverrides { consumption: Some(KilowattHours::from(-1.0)), ..no_overrides() }
            .apply_to(&mut scenario);
        assert!(scenario.validate().is_err());
    }

    const fn no_overrides() -> ScenarioOverrides {
        ScenarioOverrides {
            generation: None,
            consumption: None,
            market: None,
            retail: None,
            self_consumption_share: None,
            rewiring: None,
            battery_share: None,
            battery_rewiring: None,
            battery_capacity: None,
            battery_price: None,
            new_system_investment: None,
            new_system_generation: None,
            new_system_share: None,
            feed_in_tariff: None,
        }
    }
}
