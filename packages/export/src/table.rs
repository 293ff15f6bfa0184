//! The tabular projection shared by every export format.

use bike_map_theft_models::TheftRecord;

use crate::ExportError;

/// Column headers in the listing's own vocabulary (`MAKE` is the
/// company, `Make` the model — preserved as the data ships).
const COLUMNS: &[&str] = &[
    "CaseNo",
    "MAKE",
    "Make",
    "Category",
    "POLICE_STATION",
    "PLACE",
    "SPOT",
    "DATE",
    "Time_of_day",
    "DAY",
    "STATUS",
    "contactNumber",
    "officer",
];

/// The filtered listing as rows of display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTable {
    rows: Vec<Vec<String>>,
}

impl ListingTable {
    /// Projects records into display rows, one per record.
    #[must_use]
    pub fn from_records(records: &[TheftRecord]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                vec![
                    record.case_no.clone(),
                    record.company.clone(),
                    record.model.clone(),
                    record.category.to_string(),
                    record.police_station.clone(),
                    record.place.clone(),
                    record.spot_type.clone(),
                    record.date.format("%Y-%m-%d").to_string(),
                    record.time_of_day.to_string(),
                    record.day.to_string(),
                    record.status.to_string(),
                    record.contact_number.clone().unwrap_or_default(),
                    record.officer.clone().unwrap_or_default(),
                ]
            })
            .collect();
        Self { rows }
    }

    /// Column headers.
    #[must_use]
    pub const fn columns() -> &'static [&'static str] {
        COLUMNS
    }

    /// Data rows, in record order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Serializes the table as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if CSV serialization fails.
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(COLUMNS)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| ExportError::Render(e.to_string()))
    }

    /// Lays the table out as fixed-width text lines (header, rule,
    /// rows) for the fixed-pitch PDF renderer.
    #[must_use]
    pub fn to_fixed_width_lines(&self) -> Vec<String> {
        let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }

        let layout = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(idx, cell)| format!("{cell:<width$}", width = widths[idx]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = COLUMNS.iter().map(ToString::to_string).collect();
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = vec![layout(&header), layout(&rule)];
        lines.extend(self.rows.iter().map(|row| layout(row)));
        lines
    }
}
