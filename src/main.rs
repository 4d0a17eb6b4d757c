#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod scenario;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, CompareArgs, ScenarioArgs},
    core::comparison::Comparison,
    prelude::*,
    scenario::Scenario,
    tables::{
        build_cashflow_table,
        build_comparison_table,
        build_details_table,
        build_summary_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Compare(args) => compare(&args),
        Command::Cashflow(args) => cashflow(&args),
        Command::Details(args) => details(&args),
    }
}

#[instrument(skip_all)]
fn compare(args: &CompareArgs) -> Result {
    let scenario = args.scenario.load()?;
    let comparison = Comparison::evaluate(&scenario);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&build_report(&scenario, &comparison))?);
    } else {
        println!("{}", build_comparison_table(&comparison));
        println!("{}", build_summary_table(&scenario, &comparison));
    }
    Ok(())
}

fn build_report(scenario: &Scenario, comparison: &Comparison) -> serde_json::Value {
    serde_json::json!({
        "scenario": scenario,
        "recommended": comparison.recommended().variant,
        "outcomes": comparison.outcomes,
    })
}

#[instrument(skip_all)]
fn cashflow(args: &ScenarioArgs) -> Result {
    let comparison = Comparison::evaluate(&args.load()?);
    println!("{}", build_cashflow_table(&comparison));
    Ok(())
}

#[instrument(skip_all)]
fn details(args: &ScenarioArgs) -> Result {
    let scenario = args.load()?;
    let comparison = Comparison::evaluate(&scenario);
    println!("{}", build_details_table(&scenario, &comparison));
    println!("{}", build_summary_table(&scenario, &comparison));
    Ok(())
}
