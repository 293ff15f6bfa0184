#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rendering of the filtered report listing to downloadable documents.
//!
//! All three formats render the same [`ListingTable`] projection of the
//! records. Layout and typography are intentionally minimal — these are
//! data exports, not typeset documents: CSV goes through the `csv`
//! crate, Word is the HTML-bodied `.doc` interop form, and PDF is a
//! small self-contained writer producing a fixed-pitch table (the
//! stack carries no PDF generation library).

mod pdf;
mod table;
mod word;

pub use table::ListingTable;

use bike_map_theft_models::{ExportFormat, TheftRecord};

/// Errors raised while rendering an export document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A renderer failed to assemble its output.
    #[error("Render error: {0}")]
    Render(String),
}

/// Renders `records` into the requested format's document bytes.
///
/// # Errors
///
/// Returns [`ExportError`] if the underlying renderer fails.
pub fn render(format: ExportFormat, records: &[TheftRecord]) -> Result<Vec<u8>, ExportError> {
    let table = ListingTable::from_records(records);
    match format {
        ExportFormat::Csv => table.to_csv(),
        ExportFormat::Pdf => Ok(pdf::render(
            "Filtered Theft Reports",
            &table.to_fixed_width_lines(),
        )),
        ExportFormat::Word => Ok(word::render("Filtered Theft Reports", &table)),
    }
}
