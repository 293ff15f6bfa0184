//! Typed client for the aggregation API.

use std::time::Duration;

use bike_map_analytics_models::{
    CompanyDayNight, HeatmapPoint, HighestArea, LocalityCount, MostModel, PeakTime, Series,
    TheftReport, TotalThefts, TrendPoint,
};
use bike_map_filter::FilterState;
use bike_map_server_models::ApiTheftRecord;
use bike_map_theft_models::{DayNight, ExportFormat};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::ApiError;

/// Per-request deadline. Timeouts surface as a fetch failure; there is
/// no automatic retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A rendered export ready to hand to the browser's download path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested filename, e.g. `filtered_reports.pdf`.
    pub filename: String,
    /// MIME type of the payload.
    pub content_type: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Outcome of a report-generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// A report was generated.
    Report(Box<TheftReport>),
    /// Nothing matched; the server explains why.
    NoData(String),
}

impl ReportOutcome {
    /// Splits the endpoint's two response shapes apart.
    fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return Ok(Self::NoData(message.to_string()));
        }
        serde_json::from_value::<TheftReport>(value)
            .map(|report| Self::Report(Box::new(report)))
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

/// HTTP client for the aggregation service.
///
/// One instance is shared by every widget; each widget issues its own
/// requests with the filter snapshot it observed.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client against `base_url` (e.g. `http://127.0.0.1:8000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client from the `BIKE_MAP_API` environment variable,
    /// falling back to the local development server. This is the whole
    /// configuration surface of the consumer side.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BIKE_MAP_API").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        Self::new(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// `GET /api/total-thefts`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure, non-success status, or
    /// a malformed body. All endpoint methods share these failure modes.
    pub async fn total_thefts(&self, filter: &FilterState) -> Result<TotalThefts, ApiError> {
        self.get_json("total-thefts", &filter.to_query()).await
    }

    /// `GET /api/highest-area`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn highest_area(&self, filter: &FilterState) -> Result<HighestArea, ApiError> {
        self.get_json("highest-area", &filter.to_query()).await
    }

    /// `GET /api/most-model`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn most_model(&self, filter: &FilterState) -> Result<MostModel, ApiError> {
        self.get_json("most-model", &filter.to_query()).await
    }

    /// `GET /api/peak-time`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn peak_time(&self, filter: &FilterState) -> Result<PeakTime, ApiError> {
        self.get_json("peak-time", &filter.to_query()).await
    }

    /// `GET /api/thefts-by-locality`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn thefts_by_locality(
        &self,
        filter: &FilterState,
    ) -> Result<Vec<LocalityCount>, ApiError> {
        let series: Series<LocalityCount> =
            self.get_json("thefts-by-locality", &filter.to_query()).await?;
        Ok(series.data)
    }

    /// `GET /api/theft-trends`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn theft_trends(&self, filter: &FilterState) -> Result<Vec<TrendPoint>, ApiError> {
        let series: Series<TrendPoint> =
            self.get_json("theft-trends", &filter.to_query()).await?;
        Ok(series.data)
    }

    /// `GET /api/day-night-by-company`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn day_night_by_company(
        &self,
        filter: &FilterState,
    ) -> Result<Vec<CompanyDayNight>, ApiError> {
        let series: Series<CompanyDayNight> = self
            .get_json("day-night-by-company", &filter.to_query())
            .await?;
        Ok(series.data)
    }

    /// `GET /api/thefts-heatmap`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn heatmap_points(
        &self,
        filter: &FilterState,
        day_or_night: Option<DayNight>,
    ) -> Result<Vec<HeatmapPoint>, ApiError> {
        let mut query = filter.to_query();
        if let Some(split) = day_or_night {
            query.push(("day_or_night", split.to_string()));
        }
        let series: Series<HeatmapPoint> = self.get_json("thefts-heatmap", &query).await?;
        Ok(series.data)
    }

    /// `GET /api/theft-data`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`].
    pub async fn theft_data(
        &self,
        filter: &FilterState,
    ) -> Result<Vec<ApiTheftRecord>, ApiError> {
        let series: Series<ApiTheftRecord> =
            self.get_json("theft-data", &filter.to_query()).await?;
        Ok(series.data)
    }

    /// `POST /api/download/{format}` with the already-filtered listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure or a non-success status;
    /// callers surface it to the user naming the failed format.
    pub async fn download(
        &self,
        format: ExportFormat,
        listing: &[ApiTheftRecord],
    ) -> Result<Download, ApiError> {
        let response = self
            .http
            .post(self.url(&format!("download/{format}")))
            .json(listing)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let bytes = response.bytes().await?.to_vec();
        Ok(Download {
            filename: format.download_filename().to_string(),
            content_type: format.content_type().to_string(),
            bytes,
        })
    }

    /// `POST /api/generate-report`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::total_thefts`]. Callers validate the form
    /// ([`crate::ReportForm`]) before calling, so a 400 here means the
    /// client and server disagree about the contract.
    pub async fn generate_report(
        &self,
        police_station: Option<&str>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ReportOutcome, ApiError> {
        let mut query: Vec<(&'static str, String)> = Vec::new();
        if let Some(station) = police_station {
            query.push(("police_station", station.to_string()));
        }
        query.push(("start_date", start_date.format("%Y-%m-%d").to_string()));
        query.push(("end_date", end_date.format("%Y-%m-%d").to_string()));

        let response = self
            .http
            .post(self.url("generate-report"))
            .query(&query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        ReportOutcome::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_outcome_splits_message_and_report_payloads() {
        let outcome = ReportOutcome::from_value(serde_json::json!({
            "message": "No theft records found for the selected criteria."
        }))
        .unwrap();
        assert!(matches!(outcome, ReportOutcome::NoData(m) if m.contains("No theft records")));

        let outcome = ReportOutcome::from_value(serde_json::json!({
            "Report_Title": "Bike Theft Analysis Report",
            "Date_Range": "2024-03-01 to 2024-03-31",
            "Generated_On": "2024-04-01 10:00:00 UTC",
            "Total_Thefts": 3,
            "Average_Per_Day": 0.1,
            "Highest_Theft_Day": "FRIDAY",
            "Most_Targeted_Station": "KARVIR",
            "Most_Common_Time": "9:00-9:59",
            "Most_Stolen_Model": "Splendor",
            "Summary": "…"
        }))
        .unwrap();
        match outcome {
            ReportOutcome::Report(report) => {
                assert_eq!(report.total_thefts, 3);
                assert_eq!(report.most_targeted_station, "KARVIR");
            }
            ReportOutcome::NoData(_) => panic!("expected a report"),
        }
    }

    #[test]
    fn report_outcome_rejects_unrecognized_payloads() {
        assert!(ReportOutcome::from_value(serde_json::json!({ "totals": [] })).is_err());
    }

    #[test]
    fn urls_join_without_doubled_slashes() {
        let client = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(
            client.url("total-thefts"),
            "http://127.0.0.1:8000/api/total-thefts"
        );
    }
}
