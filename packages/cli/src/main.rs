#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the bike map toolchain.
//!
//! `bike-map serve` runs the aggregation API; `report` and `export`
//! run the same aggregations offline against the CSV dataset, with the
//! same validation the dashboard applies before it ever issues a
//! request.

use std::path::{Path, PathBuf};

use bike_map_dataset::TheftDataset;
use bike_map_filter::FilterState;
use bike_map_theft_models::{DayOfWeek, ExportFormat, TimeOfDay, VehicleCategory};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bike-map", about = "Bike theft analytics toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the aggregation API server.
    Serve,
    /// Generate the analysis report for a station and date range.
    Report(ReportArgs),
    /// Render the filtered listing to a downloadable document.
    Export(ExportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Police station to report on (free text; omit for all).
    #[arg(long)]
    station: Option<String>,
    /// Range start (YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,
    /// Range end (YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
    /// Path to the theft CSV.
    #[arg(long, default_value = "data/thefts.csv")]
    data: PathBuf,
    /// Where to write the report JSON (defaults to a name derived from
    /// the range).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ExportArgs {
    /// Output format.
    #[arg(long)]
    format: ExportFormat,
    /// Path to the theft CSV.
    #[arg(long, default_value = "data/thefts.csv")]
    data: PathBuf,
    /// Where to write the document (defaults to the download filename).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Lower incident-date bound (YYYY-MM-DD, inclusive).
    #[arg(long)]
    date_from: Option<NaiveDate>,
    /// Upper incident-date bound (YYYY-MM-DD, inclusive).
    #[arg(long)]
    date_to: Option<NaiveDate>,
    /// Lower clock-time bound (HH:MM, inclusive).
    #[arg(long)]
    time_from: Option<NaiveTime>,
    /// Upper clock-time bound (HH:MM, inclusive).
    #[arg(long)]
    time_to: Option<NaiveTime>,
    /// Police station to include (repeatable).
    #[arg(long = "locality")]
    localities: Vec<String>,
    /// Place to include (repeatable).
    #[arg(long = "place")]
    places: Vec<String>,
    /// Vehicle make.
    #[arg(long)]
    company: Option<String>,
    /// Vehicle category to include (repeatable).
    #[arg(long = "category")]
    categories: Vec<VehicleCategory>,
    /// Time-of-day bucket.
    #[arg(long)]
    time_of_day: Option<TimeOfDay>,
    /// Day of week to include (repeatable, uppercase names).
    #[arg(long = "day")]
    days: Vec<DayOfWeek>,
    /// Spot type to include (repeatable).
    #[arg(long = "spot-type")]
    spot_types: Vec<String>,
}

impl ExportArgs {
    fn to_filter(&self) -> Result<FilterState, String> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err("--date-from must not be after --date-to".to_string());
            }
        }
        if let (Some(from), Some(to)) = (self.time_from, self.time_to) {
            if from > to {
                return Err("--time-from must not be after --time-to".to_string());
            }
        }
        let mut filter = FilterState::new();
        filter.set_date_from(self.date_from);
        filter.set_date_to(self.date_to);
        filter.set_time_from(self.time_from);
        filter.set_time_to(self.time_to);
        for locality in &self.localities {
            filter.toggle_locality(locality.clone());
        }
        for place in &self.places {
            filter.toggle_place(place.clone());
        }
        filter.set_company(self.company.clone());
        for category in &self.categories {
            filter.toggle_category(*category);
        }
        if let Some(bucket) = self.time_of_day {
            filter.set_time_of_day(bucket);
        }
        for day in &self.days {
            filter.toggle_day(*day);
        }
        for spot_type in &self.spot_types {
            filter.toggle_spot_type(spot_type.clone());
        }
        Ok(filter)
    }
}

fn run_report(args: &ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.from > args.to {
        return Err("Start date cannot be after end date.".into());
    }
    let dataset = TheftDataset::load_csv(&args.data)?;
    let generated_on = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let report = bike_map_analytics::generate_report(
        dataset.records(),
        args.station.as_deref(),
        args.from,
        args.to,
        &generated_on,
    );
    let Some(report) = report else {
        return Err("No theft records found for the selected criteria.".into());
    };

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "report_{}.json",
            report.date_range.replace(' ', "_")
        ))
    });
    std::fs::write(&output, serde_json::to_vec_pretty(&report)?)?;
    log::info!("Wrote report to {}", output.display());
    println!(
        "{}: {} thefts, peak {} at {}",
        report.date_range,
        report.total_thefts,
        report.highest_theft_day,
        report.most_common_time
    );
    Ok(())
}

fn run_export(args: &ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let filter = args.to_filter()?;
    let dataset = TheftDataset::load_csv(&args.data)?;
    let records: Vec<_> = dataset
        .records()
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();
    let bytes = bike_map_export::render(args.format, &records)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| Path::new(args.format.download_filename()).to_path_buf());
    std::fs::write(&output, bytes)?;
    log::info!(
        "Wrote {} {} records to {}",
        records.len(),
        args.format,
        output.display()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    match cli.command {
        Command::Serve => bike_map_server::run_blocking()?,
        Command::Report(args) => run_report(&args)?,
        Command::Export(args) => run_export(&args)?,
    }
    Ok(())
}
