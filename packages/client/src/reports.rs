//! Reports-view helpers: status summary, listing narrowing, and the
//! report-form validation that runs before any request leaves the
//! client.

use bike_map_server_models::ApiTheftRecord;
use bike_map_theft_models::CaseStatus;
use chrono::NaiveDate;

/// The four summary tiles above the reports table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSummary {
    /// All fetched reports.
    pub total: usize,
    /// Reports with status "Under Investigation".
    pub under_investigation: usize,
    /// Reports with status "Case Closed".
    pub cases_closed: usize,
    /// Reports surviving the current narrowing.
    pub filtered: usize,
}

impl ListingSummary {
    /// Computes the tiles from the full listing and the narrowed count.
    #[must_use]
    pub fn compute(listing: &[ApiTheftRecord], filtered: usize) -> Self {
        Self {
            total: listing.len(),
            under_investigation: listing
                .iter()
                .filter(|r| r.STATUS == CaseStatus::UnderInvestigation)
                .count(),
            cases_closed: listing
                .iter()
                .filter(|r| r.STATUS == CaseStatus::CaseClosed)
                .count(),
            filtered,
        }
    }
}

/// In-view narrowing of an already-fetched listing.
///
/// This runs on data the table has in hand — it is not part of the
/// query contract. Search matches make, station, or case number,
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingNarrowing {
    /// Free-text search term.
    pub search: String,
    /// Exact incident date.
    pub date: Option<NaiveDate>,
    /// Case status.
    pub status: Option<CaseStatus>,
    /// Police station.
    pub station: Option<String>,
}

impl ListingNarrowing {
    /// Rows surviving every set control.
    #[must_use]
    pub fn apply<'a>(&self, listing: &'a [ApiTheftRecord]) -> Vec<&'a ApiTheftRecord> {
        let needle = self.search.trim().to_lowercase();
        listing
            .iter()
            .filter(|row| {
                if !needle.is_empty() {
                    let hit = row.MAKE.to_lowercase().contains(&needle)
                        || row.POLICE_STATION.to_lowercase().contains(&needle)
                        || row.CaseNo.to_lowercase().contains(&needle);
                    if !hit {
                        return false;
                    }
                }
                if self.date.is_some_and(|date| row.DATE != date) {
                    return false;
                }
                if self.status.is_some_and(|status| row.STATUS != status) {
                    return false;
                }
                if self
                    .station
                    .as_deref()
                    .is_some_and(|station| row.POLICE_STATION != station)
                {
                    return false;
                }
                true
            })
            .collect()
    }
}

/// Validation errors of the report-generation form.
///
/// The messages are the inline texts the form shows; nothing is sent
/// to the server until validation passes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportFormError {
    /// One or both date bounds are missing.
    #[error("Please select both start date and end date.")]
    MissingDates,

    /// A bound is not a parseable date.
    #[error("Dates must be in YYYY-MM-DD form.")]
    InvalidDate,

    /// The range is inverted.
    #[error("Start date cannot be after end date.")]
    InvertedRange,
}

/// The report-generation form's fields, as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    /// Free-text police station (optional).
    pub police_station: String,
    /// Range start, `YYYY-MM-DD`.
    pub start_date: String,
    /// Range end, `YYYY-MM-DD`.
    pub end_date: String,
}

impl ReportForm {
    /// Validates the form, yielding the request arguments.
    ///
    /// # Errors
    ///
    /// Returns the inline [`ReportFormError`] to display when a bound
    /// is missing, malformed, or the range is inverted.
    pub fn validate(&self) -> Result<(Option<&str>, NaiveDate, NaiveDate), ReportFormError> {
        if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            return Err(ReportFormError::MissingDates);
        }
        let start = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d")
            .map_err(|_| ReportFormError::InvalidDate)?;
        let end = NaiveDate::parse_from_str(self.end_date.trim(), "%Y-%m-%d")
            .map_err(|_| ReportFormError::InvalidDate)?;
        if start > end {
            return Err(ReportFormError::InvertedRange);
        }
        let station = self.police_station.trim();
        let station = if station.is_empty() {
            None
        } else {
            Some(station)
        };
        Ok((station, start, end))
    }
}
