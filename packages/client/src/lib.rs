#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard-side consumers of the aggregation API.
//!
//! Each widget (metric card, chart, heatmap, reports table) owns an
//! [`ApiClient`] call plus a [`Widget`] fetch state. The client builds
//! every request from `FilterState::to_query()` — nothing else ever
//! shapes a query string — and the widget state enforces
//! last-write-wins: a response stamped with an out-of-date filter
//! version is discarded, never rendered over fresher data. Failures
//! stay local to their widget; the prior value keeps showing and the
//! error is logged.

mod api;
mod reports;
mod widget;

pub use api::{ApiClient, Download, ReportOutcome};
pub use reports::{ListingNarrowing, ListingSummary, ReportForm, ReportFormError};
pub use widget::Widget;

/// Errors a single widget fetch can fail with.
///
/// Failures are isolated per widget: one card failing to refresh never
/// tears down its siblings.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or timed out.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
