#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result types.
//!
//! These are the JSON shapes the analytics endpoints answer with. Field
//! names follow the established wire contract of the dashboard
//! (`total_thefts`, `highest_area`, `Day`/`Night`, the capitalized
//! report keys) rather than any Rust convention — the consumers parse
//! these exact names.

use serde::{Deserialize, Serialize};

/// Wrapper for endpoints that answer `{ "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<T> {
    /// The aggregated rows.
    pub data: Vec<T>,
}

impl<T> Series<T> {
    /// Wraps aggregated rows in the `data` envelope.
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Response of the total-thefts endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalThefts {
    /// Number of records matching the filter.
    pub total_thefts: u64,
}

/// Response of the highest-area endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighestArea {
    /// Station with the most matching thefts, `None` on an empty set.
    pub highest_area: Option<String>,
    /// Theft count at that station.
    pub thefts: u64,
}

/// Response of the most-model endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostModel {
    /// Most stolen model, `None` on an empty set.
    pub most_model: Option<String>,
    /// Theft count for that model.
    pub count: u64,
}

/// Response of the peak-time endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakTime {
    /// Peak hour label, e.g. `"17:00-17:59"`; `None` when no record
    /// carries a clock time.
    pub peak_hour: Option<String>,
    /// Theft count within that hour.
    pub count: u64,
}

/// One row of the by-locality breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityCount {
    /// Police station name.
    pub locality: String,
    /// Theft count at that station.
    pub count: u64,
}

/// One point of the theft-trends series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    /// Theft count on that date.
    pub count: u64,
}

/// One row of the day/night-by-company matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDayNight {
    /// Vehicle make.
    pub company: String,
    /// Daytime theft count.
    #[serde(rename = "Day")]
    pub day: u64,
    /// Nighttime theft count.
    #[serde(rename = "Night")]
    pub night: u64,
}

/// One heatmap point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// The generated analysis report.
///
/// Key casing is the report page's own (`Report_Title`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheftReport {
    /// Report heading.
    #[serde(rename = "Report_Title")]
    pub title: String,
    /// Covered range, e.g. `"2024-01-01 to 2024-03-31"`.
    #[serde(rename = "Date_Range")]
    pub date_range: String,
    /// Server-side generation timestamp.
    #[serde(rename = "Generated_On")]
    pub generated_on: String,
    /// Total thefts in range.
    #[serde(rename = "Total_Thefts")]
    pub total_thefts: u64,
    /// Mean thefts per day across the covered range.
    #[serde(rename = "Average_Per_Day")]
    pub average_per_day: f64,
    /// Day of week with the most thefts.
    #[serde(rename = "Highest_Theft_Day")]
    pub highest_theft_day: String,
    /// Station with the most thefts.
    #[serde(rename = "Most_Targeted_Station")]
    pub most_targeted_station: String,
    /// Peak hour label.
    #[serde(rename = "Most_Common_Time")]
    pub most_common_time: String,
    /// Most stolen model.
    #[serde(rename = "Most_Stolen_Model")]
    pub most_stolen_model: String,
    /// One-paragraph prose summary of the above.
    #[serde(rename = "Summary")]
    pub summary: String,
}
