#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the bike map server.
//!
//! Query parameters arrive in the serialized form of the filter
//! contract (`date_from=…&localities=A,B&…`) and are parsed back into a
//! [`FilterState`] here. The record projection [`ApiTheftRecord`]
//! keeps the listing's legacy field names (`CaseNo`, `MAKE`,
//! `POLICE_STATION`, …) on the wire while the rest of the system works
//! with the clean internal type.

use bike_map_filter::FilterState;
use bike_map_theft_models::{
    CaseStatus, DayNight, DayOfWeek, TheftRecord, TimeOfDay, VehicleCategory,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Errors raised while turning query parameters into a filter.
///
/// Unknown members of the enumerated set fields are silently skipped;
/// only malformed scalars and inverted ranges are rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A date parameter was not `YYYY-MM-DD`.
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time parameter was not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time {0:?}: expected HH:MM")]
    InvalidTime(String),

    /// `date_from` was after `date_to`.
    #[error("date_from must not be after date_to")]
    InvertedDateRange,

    /// `time_from` was after `time_to`.
    #[error("time_from must not be after time_to")]
    InvertedTimeRange,
}

fn parse_date(raw: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| QueryError::InvalidDate(raw.to_string()))
}

fn parse_time(raw: &str) -> Result<NaiveTime, QueryError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| QueryError::InvalidTime(raw.to_string()))
}

/// Splits a comma-joined multi-value parameter, dropping empty parts.
fn split_members(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|part| !part.is_empty())
}

/// The filter query contract, one optional parameter per filter field.
///
/// Multi-valued fields are comma-joined strings; absent keys mean "no
/// filtering on this field" — the parameter shapes mirror
/// `FilterState::to_query` exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TheftQueryParams {
    /// Lower incident-date bound (`YYYY-MM-DD`, inclusive).
    pub date_from: Option<String>,
    /// Upper incident-date bound (`YYYY-MM-DD`, inclusive).
    pub date_to: Option<String>,
    /// Lower clock-time bound (`HH:MM`, inclusive).
    pub time_from: Option<String>,
    /// Upper clock-time bound (`HH:MM`, inclusive).
    pub time_to: Option<String>,
    /// Comma-joined police station names.
    pub localities: Option<String>,
    /// Comma-joined place names.
    pub places: Option<String>,
    /// Single vehicle make.
    pub company: Option<String>,
    /// Comma-joined vehicle categories.
    pub categories: Option<String>,
    /// Time-of-day bucket (absent or `All` = no bucket filtering).
    pub time_of_day: Option<String>,
    /// Comma-joined uppercase day names.
    pub days: Option<String>,
    /// Comma-joined spot types.
    pub spot_types: Option<String>,
}

impl TheftQueryParams {
    /// Reconstructs the filter these parameters serialize.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for malformed dates/times or inverted
    /// ranges. The upstream implementation forwarded inverted ranges to
    /// the backend with undefined results; they are rejected here.
    pub fn to_filter(&self) -> Result<FilterState, QueryError> {
        let date_from = self.date_from.as_deref().map(parse_date).transpose()?;
        let date_to = self.date_to.as_deref().map(parse_date).transpose()?;
        if let (Some(from), Some(to)) = (date_from, date_to) {
            if from > to {
                return Err(QueryError::InvertedDateRange);
            }
        }
        let time_from = self.time_from.as_deref().map(parse_time).transpose()?;
        let time_to = self.time_to.as_deref().map(parse_time).transpose()?;
        if let (Some(from), Some(to)) = (time_from, time_to) {
            if from > to {
                return Err(QueryError::InvertedTimeRange);
            }
        }

        let mut filter = FilterState::new();
        filter.set_date_from(date_from);
        filter.set_date_to(date_to);
        filter.set_time_from(time_from);
        filter.set_time_to(time_to);
        for member in self.localities.as_deref().into_iter().flat_map(split_members) {
            filter.toggle_locality(member);
        }
        for member in self.places.as_deref().into_iter().flat_map(split_members) {
            filter.toggle_place(member);
        }
        filter.set_company(self.company.clone().map(|c| c.trim().to_string()));
        for member in self.categories.as_deref().into_iter().flat_map(split_members) {
            if let Ok(category) = member.parse::<VehicleCategory>() {
                filter.toggle_category(category);
            }
        }
        if let Some(bucket) = self
            .time_of_day
            .as_deref()
            .and_then(|v| v.trim().parse::<TimeOfDay>().ok())
        {
            filter.set_time_of_day(bucket);
        }
        for member in self.days.as_deref().into_iter().flat_map(split_members) {
            if let Ok(day) = member.parse::<DayOfWeek>() {
                filter.toggle_day(day);
            }
        }
        for member in self.spot_types.as_deref().into_iter().flat_map(split_members) {
            filter.toggle_spot_type(member);
        }
        Ok(filter)
    }
}

/// Query parameters for the heatmap endpoint: the full filter contract
/// plus the map view's own day/night narrowing control.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatmapQueryParams {
    /// Lower incident-date bound (`YYYY-MM-DD`, inclusive).
    pub date_from: Option<String>,
    /// Upper incident-date bound (`YYYY-MM-DD`, inclusive).
    pub date_to: Option<String>,
    /// Lower clock-time bound (`HH:MM`, inclusive).
    pub time_from: Option<String>,
    /// Upper clock-time bound (`HH:MM`, inclusive).
    pub time_to: Option<String>,
    /// Comma-joined police station names.
    pub localities: Option<String>,
    /// Comma-joined place names.
    pub places: Option<String>,
    /// Single vehicle make.
    pub company: Option<String>,
    /// Comma-joined vehicle categories.
    pub categories: Option<String>,
    /// Time-of-day bucket (absent or `All` = no bucket filtering).
    pub time_of_day: Option<String>,
    /// Comma-joined uppercase day names.
    pub days: Option<String>,
    /// Comma-joined spot types.
    pub spot_types: Option<String>,
    /// `Day` or `Night`; anything else is ignored.
    pub day_or_night: Option<String>,
}

impl HeatmapQueryParams {
    /// The filter portion of the parameters.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TheftQueryParams::to_filter`].
    pub fn to_filter(&self) -> Result<FilterState, QueryError> {
        TheftQueryParams {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            time_from: self.time_from.clone(),
            time_to: self.time_to.clone(),
            localities: self.localities.clone(),
            places: self.places.clone(),
            company: self.company.clone(),
            categories: self.categories.clone(),
            time_of_day: self.time_of_day.clone(),
            days: self.days.clone(),
            spot_types: self.spot_types.clone(),
        }
        .to_filter()
    }

    /// The parsed day/night control, if present and well-formed.
    #[must_use]
    pub fn day_night(&self) -> Option<DayNight> {
        self.day_or_night
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Query parameters for the report-generation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQueryParams {
    /// Police station to report on (free text, optional).
    pub police_station: Option<String>,
    /// Report range start (`YYYY-MM-DD`, required).
    pub start_date: Option<String>,
    /// Report range end (`YYYY-MM-DD`, required).
    pub end_date: Option<String>,
}

/// A theft record in the listing's legacy wire vocabulary.
///
/// `MAKE` is the company, `Make` the model. The record listing and the
/// export bodies both use this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ApiTheftRecord {
    /// Case number.
    pub CaseNo: String,
    /// Vehicle make (company).
    pub MAKE: String,
    /// Vehicle model.
    pub Make: String,
    /// Vehicle category.
    pub Category: VehicleCategory,
    /// Police station.
    pub POLICE_STATION: String,
    /// Place of the theft.
    pub PLACE: String,
    /// Location type.
    #[serde(default)]
    pub SPOT: String,
    /// Latitude, when geocoded.
    pub LATITUDE: Option<f64>,
    /// Longitude, when geocoded.
    pub LONGITUDE: Option<f64>,
    /// Incident date (`YYYY-MM-DD`).
    pub DATE: NaiveDate,
    /// Time-of-day bucket.
    pub Time_of_day: TimeOfDay,
    /// Day of week.
    pub DAY: DayOfWeek,
    /// Case status.
    pub STATUS: CaseStatus,
    /// Complainant contact number.
    #[serde(default)]
    pub contactNumber: Option<String>,
    /// Investigating officer.
    #[serde(default)]
    pub officer: Option<String>,
}

impl From<TheftRecord> for ApiTheftRecord {
    fn from(record: TheftRecord) -> Self {
        Self {
            CaseNo: record.case_no,
            MAKE: record.company,
            Make: record.model,
            Category: record.category,
            POLICE_STATION: record.police_station,
            PLACE: record.place,
            SPOT: record.spot_type,
            LATITUDE: record.latitude,
            LONGITUDE: record.longitude,
            DATE: record.date,
            Time_of_day: record.time_of_day,
            DAY: record.day,
            STATUS: record.status,
            contactNumber: record.contact_number,
            officer: record.officer,
        }
    }
}

impl From<ApiTheftRecord> for TheftRecord {
    fn from(record: ApiTheftRecord) -> Self {
        // The listing drops the exact clock time; the coarse bucket is
        // the best day/night signal left.
        let day_or_night = match record.Time_of_day {
            TimeOfDay::Morning | TimeOfDay::Afternoon => DayNight::Day,
            _ => DayNight::Night,
        };
        Self {
            case_no: record.CaseNo,
            company: record.MAKE,
            model: record.Make,
            category: record.Category,
            police_station: record.POLICE_STATION,
            place: record.PLACE,
            spot_type: record.SPOT,
            latitude: record.LATITUDE,
            longitude: record.LONGITUDE,
            date: record.DATE,
            time_of_theft: None,
            time_of_day: record.Time_of_day,
            day: record.DAY,
            day_or_night,
            status: record.STATUS,
            contact_number: record.contactNumber,
            officer: record.officer,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Informational response carrying only a message (e.g. an empty
/// report result).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
