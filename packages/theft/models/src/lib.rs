#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Bike theft domain taxonomy and record types.
//!
//! This crate defines the canonical vocabulary used across the entire
//! bike-map system: the closed enumerations (vehicle category, time-of-day
//! bucket, day of week, case status) and the fixed data-derived
//! vocabularies (police stations, places, spot types, vehicle makes)
//! that every filter field draws its values from.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Vehicle category of a stolen bike.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum VehicleCategory {
    /// Geared motorcycles.
    Motorcycle,
    /// Gearless scooters and mopeds.
    Scooter,
    /// Anything that fits neither of the above.
    Other,
}

impl VehicleCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Motorcycle, Self::Scooter, Self::Other]
    }
}

/// Coarse time-of-day bucket for an incident.
///
/// `All` is the filter default and means "no bucket filtering". It is
/// never assigned to a record; records always carry one of the four
/// concrete buckets.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TimeOfDay {
    /// No bucket filtering (filter default, not a record value).
    #[default]
    All,
    /// 05:00–11:59.
    Morning,
    /// 12:00–16:59.
    Afternoon,
    /// 17:00–22:59.
    Evening,
    /// 23:00–04:59.
    Midnight,
}

impl TimeOfDay {
    /// The four concrete buckets a record can carry.
    #[must_use]
    pub const fn buckets() -> &'static [Self] {
        &[Self::Morning, Self::Afternoon, Self::Evening, Self::Midnight]
    }

    /// Buckets a clock time into one of the four concrete variants.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        match time.hour() {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=22 => Self::Evening,
            _ => Self::Midnight,
        }
    }

    /// Whether this is the "no filtering" sentinel.
    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

/// Day of week, in the uppercase wire form the dataset uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Returns all variants of this enum, Monday first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    /// Day of week for a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Day/night split used by the per-company comparison chart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DayNight {
    /// 06:00–17:59.
    Day,
    /// 18:00–05:59.
    Night,
}

impl DayNight {
    /// Splits a clock time into day or night.
    #[must_use]
    pub fn from_time(time: NaiveTime) -> Self {
        match time.hour() {
            6..=17 => Self::Day,
            _ => Self::Night,
        }
    }
}

/// Investigation status of a theft case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CaseStatus {
    /// Freshly reported.
    Active,
    /// Assigned to an officer.
    #[serde(rename = "Under Investigation")]
    #[strum(serialize = "Under Investigation")]
    UnderInvestigation,
    /// Resolved and closed.
    #[serde(rename = "Case Closed")]
    #[strum(serialize = "Case Closed")]
    CaseClosed,
}

impl CaseStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Active, Self::UnderInvestigation, Self::CaseClosed]
    }
}

/// Download format for the filtered report listing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
    Word,
}

impl ExportFormat {
    /// MIME type for the rendered document.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Csv => "text/csv",
            Self::Word => "application/msword",
        }
    }

    /// Download filename for the filtered listing in this format.
    #[must_use]
    pub const fn download_filename(self) -> &'static str {
        match self {
            Self::Pdf => "filtered_reports.pdf",
            Self::Csv => "filtered_reports.csv",
            Self::Word => "filtered_reports.doc",
        }
    }
}

/// Police stations covered by the dataset.
///
/// The spellings are the dataset's own and must be preserved exactly —
/// filter values round-trip through the query contract byte-for-byte.
pub const POLICE_STATIONS: &[&str] = &[
    "AJARA",
    "BHUDARGAD",
    "CHANDGAD",
    "GADHINGLAJ",
    "GAGAN BAWADA",
    "GANDHINAGAR",
    "GOKUL SHIRGAON",
    "HATKANAGALE",
    "HUPARI",
    "ICHALKARANJI",
    "ISPURLI",
    "JAYSINGPUR",
    "JUNA RAJWADA",
    "KAGAL",
    "KALE",
    "KARVIR",
    "KODOLI",
    "KURUNDVAD",
    "LAXMIPURI",
    "MURGUD",
    "PANHALA",
    "RADHANAGARI",
    "RAJARAMPURI",
    "SHAHAPUR",
    "SHAHUPURI",
    "SHAHUWADI",
    "SHIROL",
    "SHIROLI MIDC",
    "SHIVAJINAGAR",
    "VADGAON",
];

/// Most common place names in the dataset.
pub const PLACES: &[&str] = &[
    "KOLHAPUR",
    "ICHALKARANJI",
    "GADHINGLAJ",
    "KAGAL",
    "HATKANAGALE",
    "JAYSINGPUR",
    "SHAHAPUR",
    "GOKUL SHIRGAON",
    "AJARA",
    "BHUDARGAD",
    "CHANDGAD",
    "HUPARI",
    "KARVIR",
    "KODOLI",
    "PANHALA",
];

/// Incident location types as recorded in the dataset, misspellings
/// included — they are values, not labels.
pub const SPOT_TYPES: &[&str] = &[
    "ROAD",
    "HOME",
    "NEAR TEMPLE",
    "PARKING",
    "ON ROAD",
    "FARM",
    "SHOP",
    "HOTEL",
    "TEMPLE",
    "ST STAND",
    "BANK",
    "HOSPITAL",
    "SCHOOL",
    "CHOWK",
    "COLONEY",
    "MARKET",
    "SOCIETY",
    "GROUND",
    "LOAGE",
    "FARM ROAD",
    "BLOOD BANK",
    "COMPANI",
    "INDASTRI",
    "MIDC",
    "ATM",
    "MANDIR",
    "COLLAGE",
    "COURT PARKING",
    "PUBLIC PLACE",
    "HAWKERS ZONE",
];

/// Vehicle makes offered by the make filter.
pub const MAKES: &[&str] = &[
    "Hero",
    "Honda",
    "Yamaha",
    "TVS",
    "Bajaj",
    "Suzuki",
    "Royal Enfield",
    "KTM",
    "Kawasaki",
    "Vespa",
    "Unknown",
];

/// Whether `name` is one of the known police stations.
#[must_use]
pub fn is_known_station(name: &str) -> bool {
    POLICE_STATIONS.contains(&name)
}

/// Whether `name` is one of the known places.
#[must_use]
pub fn is_known_place(name: &str) -> bool {
    PLACES.contains(&name)
}

/// Whether `name` is one of the known spot types.
#[must_use]
pub fn is_known_spot_type(name: &str) -> bool {
    SPOT_TYPES.contains(&name)
}

/// Whether `name` is one of the known vehicle makes.
#[must_use]
pub fn is_known_make(name: &str) -> bool {
    MAKES.contains(&name)
}

/// A single bike theft incident.
///
/// Records are produced by the dataset loader and only ever read after
/// that; consumers display and export them but never construct or
/// mutate one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheftRecord {
    /// Case number assigned by the police station.
    pub case_no: String,
    /// Vehicle make (company), e.g. "Hero".
    pub company: String,
    /// Vehicle model, e.g. "Splendor".
    pub model: String,
    /// Vehicle category.
    pub category: VehicleCategory,
    /// Police station the case is registered at.
    pub police_station: String,
    /// Place where the theft happened.
    pub place: String,
    /// Location type within the place.
    pub spot_type: String,
    /// Latitude, if the record geocoded cleanly.
    pub latitude: Option<f64>,
    /// Longitude, if the record geocoded cleanly.
    pub longitude: Option<f64>,
    /// Date of the incident.
    pub date: NaiveDate,
    /// Clock time of the incident, when recorded.
    pub time_of_theft: Option<NaiveTime>,
    /// Coarse time bucket.
    pub time_of_day: TimeOfDay,
    /// Day of week (derivable from `date`, stored for display).
    pub day: DayOfWeek,
    /// Day/night split.
    pub day_or_night: DayNight,
    /// Investigation status.
    pub status: CaseStatus,
    /// Complainant contact number.
    pub contact_number: Option<String>,
    /// Assigned investigating officer.
    pub officer: Option<String>,
}

impl TheftRecord {
    /// Whether this record has a usable coordinate pair.
    #[must_use]
    pub const fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn buckets_morning_afternoon_evening_midnight() {
        assert_eq!(TimeOfDay::from_time(t(5, 0)), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_time(t(11, 59)), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_time(t(12, 0)), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_time(t(16, 59)), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_time(t(17, 0)), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_time(t(22, 59)), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_time(t(23, 0)), TimeOfDay::Midnight);
        assert_eq!(TimeOfDay::from_time(t(4, 59)), TimeOfDay::Midnight);
    }

    #[test]
    fn all_is_never_a_bucket() {
        assert!(!TimeOfDay::buckets().contains(&TimeOfDay::All));
        assert!(TimeOfDay::All.is_all());
    }

    #[test]
    fn splits_day_and_night() {
        assert_eq!(DayNight::from_time(t(6, 0)), DayNight::Day);
        assert_eq!(DayNight::from_time(t(17, 59)), DayNight::Day);
        assert_eq!(DayNight::from_time(t(18, 0)), DayNight::Night);
        assert_eq!(DayNight::from_time(t(5, 59)), DayNight::Night);
    }

    #[test]
    fn day_names_are_uppercase_on_the_wire() {
        assert_eq!(DayOfWeek::Monday.to_string(), "MONDAY");
        assert_eq!("SUNDAY".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
    }

    #[test]
    fn day_of_week_from_date() {
        // 2024-01-01 was a Monday.
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(DayOfWeek::from_date(date), DayOfWeek::Monday);
    }

    #[test]
    fn case_status_wire_names_have_spaces() {
        assert_eq!(
            CaseStatus::UnderInvestigation.to_string(),
            "Under Investigation"
        );
        assert_eq!(
            "Case Closed".parse::<CaseStatus>().unwrap(),
            CaseStatus::CaseClosed
        );
    }

    #[test]
    fn vocabulary_sizes_match_the_dataset() {
        assert_eq!(POLICE_STATIONS.len(), 30);
        assert_eq!(PLACES.len(), 15);
        assert_eq!(SPOT_TYPES.len(), 30);
        assert_eq!(MAKES.len(), 11);
    }

    #[test]
    fn known_value_predicates() {
        assert!(is_known_station("KARVIR"));
        assert!(!is_known_station("karvir"));
        assert!(is_known_place("KOLHAPUR"));
        assert!(is_known_spot_type("HAWKERS ZONE"));
        assert!(is_known_make("Royal Enfield"));
        assert!(!is_known_make("Harley"));
    }

    #[test]
    fn export_format_metadata() {
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(ExportFormat::Csv.download_filename(), "filtered_reports.csv");
        assert_eq!(ExportFormat::Word.download_filename(), "filtered_reports.doc");
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }
}
