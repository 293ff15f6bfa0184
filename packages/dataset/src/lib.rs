#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV-backed theft record set.
//!
//! Loads the incident CSV (legacy column names and all), cleans the
//! hand-entered fields, derives the bucketed time columns where the
//! source left them blank, and hands the rest of the system an
//! in-memory `Vec<TheftRecord>`. Rows that cannot be made sense of are
//! skipped with a warning rather than failing the whole load.

pub mod parsing;

use std::io::Read;
use std::path::Path;

use bike_map_theft_models::{
    CaseStatus, DayNight, DayOfWeek, TheftRecord, TimeOfDay, VehicleCategory,
};
use serde::Deserialize;

use crate::parsing::{clean_coordinate, non_empty, parse_clock_time, parse_incident_date};

/// Errors raised while loading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The CSV file could not be read or parsed at the transport level.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One CSV row in the dataset's own column vocabulary.
///
/// `MAKE` is the company and `Make` the model — that is how the source
/// data ships and the export/report surfaces preserve it.
#[derive(Debug, Deserialize)]
struct RawTheftRow {
    #[serde(rename = "CaseNo")]
    case_no: String,
    #[serde(rename = "MAKE")]
    company: String,
    #[serde(rename = "Make")]
    model: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "POLICE_STATION")]
    police_station: String,
    #[serde(rename = "PLACE")]
    place: String,
    #[serde(rename = "SPOT", default)]
    spot_type: String,
    #[serde(rename = "LATITUDE", default)]
    latitude: String,
    #[serde(rename = "LONGITUDE", default)]
    longitude: String,
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "TIME", default)]
    time_of_theft: String,
    #[serde(rename = "Time_of_day", default)]
    time_of_day: String,
    #[serde(rename = "DAY", default)]
    day: String,
    #[serde(rename = "day_or_night", default)]
    day_or_night: String,
    #[serde(rename = "STATUS")]
    status: String,
    #[serde(rename = "contactNumber", default)]
    contact_number: String,
    #[serde(rename = "officer", default)]
    officer: String,
}

impl RawTheftRow {
    /// Cleans and derives a full record, or explains why the row is
    /// unusable.
    fn into_record(self) -> Result<TheftRecord, &'static str> {
        let Some(date) = parse_incident_date(&self.date) else {
            return Err("unparseable DATE");
        };
        let time_of_theft = non_empty(&self.time_of_theft).and_then(parse_clock_time);

        // Explicit bucket column wins; otherwise derive from the clock
        // time; a row with neither carries no usable time signal.
        let time_of_day = match non_empty(&self.time_of_day).and_then(|v| v.parse().ok()) {
            Some(TimeOfDay::All) | None => match time_of_theft {
                Some(time) => TimeOfDay::from_time(time),
                None => return Err("no Time_of_day and no TIME"),
            },
            Some(bucket) => bucket,
        };
        let day = non_empty(&self.day)
            .and_then(|v| v.parse::<DayOfWeek>().ok())
            .unwrap_or_else(|| DayOfWeek::from_date(date));
        let day_or_night = match non_empty(&self.day_or_night).and_then(|v| v.parse().ok()) {
            Some(split) => split,
            None => time_of_theft.map_or_else(
                || match time_of_day {
                    TimeOfDay::Morning | TimeOfDay::Afternoon => DayNight::Day,
                    _ => DayNight::Night,
                },
                DayNight::from_time,
            ),
        };

        let Some(status) = non_empty(&self.status).and_then(|v| v.parse::<CaseStatus>().ok())
        else {
            return Err("unparseable STATUS");
        };
        let Some(police_station) = non_empty(&self.police_station) else {
            return Err("missing POLICE_STATION");
        };

        Ok(TheftRecord {
            case_no: self.case_no.trim().to_string(),
            company: self.company.trim().to_string(),
            model: self.model.trim().to_string(),
            category: self
                .category
                .trim()
                .parse::<VehicleCategory>()
                .unwrap_or(VehicleCategory::Other),
            police_station: police_station.to_string(),
            place: self.place.trim().to_string(),
            spot_type: self.spot_type.trim().to_string(),
            latitude: clean_coordinate(&self.latitude),
            longitude: clean_coordinate(&self.longitude),
            date,
            time_of_theft,
            time_of_day,
            day,
            day_or_night,
            status,
            contact_number: non_empty(&self.contact_number).map(ToString::to_string),
            officer: non_empty(&self.officer).map(ToString::to_string),
        })
    }
}

/// The in-memory record set every aggregation runs against.
#[derive(Debug, Clone, Default)]
pub struct TheftDataset {
    records: Vec<TheftRecord>,
}

impl TheftDataset {
    /// Wraps an already-built record list (used by tests and fixtures).
    #[must_use]
    pub const fn from_records(records: Vec<TheftRecord>) -> Self {
        Self { records }
    }

    /// Loads the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be opened or read.
    /// Individual rows that fail cleaning are skipped with a warning,
    /// not treated as a load failure.
    pub fn load_csv(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_csv_reader(file)?;
        log::info!(
            "Loaded {} theft records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Loads the dataset from any CSV byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if a row cannot be read at the CSV
    /// level (I/O failure, malformed quoting).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in csv_reader.deserialize::<RawTheftRow>() {
            let raw = row?;
            let case_no = raw.case_no.clone();
            match raw.into_record() {
                Ok(record) => records.push(record),
                Err(reason) => {
                    skipped += 1;
                    log::warn!("Skipping row {case_no}: {reason}");
                }
            }
        }
        if skipped > 0 {
            log::warn!("Skipped {skipped} unusable rows");
        }
        Ok(Self { records })
    }

    /// All loaded records.
    #[must_use]
    pub fn records(&self) -> &[TheftRecord] {
        &self.records
    }

    /// Number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "CaseNo,MAKE,Make,Category,POLICE_STATION,PLACE,SPOT,LATITUDE,LONGITUDE,DATE,TIME,Time_of_day,DAY,day_or_night,STATUS,contactNumber,officer";

    fn load(rows: &[&str]) -> TheftDataset {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        TheftDataset::from_csv_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn loads_a_clean_row() {
        let dataset = load(&[
            "CR-1,Hero,Splendor,Motorcycle,KARVIR,KOLHAPUR,ROAD,16.705,74.243,2024-03-05,09:30,,,,Active,9876543210,Patil",
        ]);
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.case_no, "CR-1");
        assert_eq!(record.company, "Hero");
        assert_eq!(record.model, "Splendor");
        assert_eq!(record.time_of_day, TimeOfDay::Morning);
        assert_eq!(record.day, DayOfWeek::Tuesday);
        assert_eq!(record.day_or_night, DayNight::Day);
        assert_eq!(record.officer.as_deref(), Some("Patil"));
        assert!(record.has_coordinates());
    }

    #[test]
    fn explicit_bucket_and_day_columns_win_over_derivation() {
        let dataset = load(&[
            "CR-2,Honda,Activa,Scooter,AJARA,AJARA,PARKING,,,15.03.25,09:30,Evening,SUNDAY,Night,Case Closed,,",
        ]);
        let record = &dataset.records()[0];
        assert_eq!(record.time_of_day, TimeOfDay::Evening);
        assert_eq!(record.day, DayOfWeek::Sunday);
        assert_eq!(record.day_or_night, DayNight::Night);
        assert_eq!(record.status, CaseStatus::CaseClosed);
        assert_eq!(
            record.date,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
        );
        assert!(!record.has_coordinates());
    }

    #[test]
    fn skips_rows_without_any_time_signal() {
        let dataset = load(&[
            "CR-3,TVS,Jupiter,Scooter,KAGAL,KAGAL,SHOP,,,2024-06-01,,,,,Active,,",
            "CR-4,Hero,HF Deluxe,Motorcycle,KAGAL,KAGAL,SHOP,,,2024-06-01,10:00,,,,Active,,",
        ]);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].case_no, "CR-4");
    }

    #[test]
    fn skips_rows_with_bad_dates_or_status() {
        let dataset = load(&[
            "CR-5,Hero,Splendor,Motorcycle,KARVIR,KOLHAPUR,ROAD,,,garbage,09:30,,,,Active,,",
            "CR-6,Hero,Splendor,Motorcycle,KARVIR,KOLHAPUR,ROAD,,,2024-03-05,09:30,,,,Lost,,",
        ]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn unknown_categories_fall_back_to_other() {
        let dataset = load(&[
            "CR-7,Vespa,VXL,Moped,SHIROL,SHIROL,MARKET,,,2024-01-10,18:45,,,,Under Investigation,,",
        ]);
        assert_eq!(dataset.records()[0].category, VehicleCategory::Other);
        assert_eq!(
            dataset.records()[0].status,
            CaseStatus::UnderInvestigation
        );
    }

    #[test]
    fn cleans_noisy_coordinates() {
        let dataset = load(&[
            "CR-8,KTM,Duke,Motorcycle,KARVIR,KOLHAPUR,ATM,16.69° N,74.46 E,2024-02-02,21:15,,,,Active,,",
        ]);
        let record = &dataset.records()[0];
        assert!((record.latitude.unwrap() - 16.69).abs() < f64::EPSILON);
        assert!((record.longitude.unwrap() - 74.46).abs() < f64::EPSILON);
    }
}
