#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the bike theft analytics endpoints.
//!
//! Every operation here runs the same way: apply the one shared filter
//! predicate ([`FilterState::matches`]), then fold the survivors. The
//! dashboard assumes cross-endpoint consistency — the total count must
//! equal the sum of any breakdown computed for the same filter — and
//! that holds by construction because there is exactly one predicate.
//!
//! Orderings are deterministic: breakdowns sort by count descending
//! with ties on the lexically smaller key, trends sort by date, the
//! company matrix sorts by company name. The upstream data store gave
//! no such guarantee; stable fixtures need one.

use std::collections::BTreeMap;

use bike_map_analytics_models::{
    CompanyDayNight, HeatmapPoint, HighestArea, LocalityCount, MostModel, PeakTime, TheftReport,
    TotalThefts, TrendPoint,
};
use bike_map_filter::FilterState;
use bike_map_theft_models::{DayNight, TheftRecord};
use chrono::{NaiveDate, Timelike};

/// Records surviving the filter.
fn filtered<'a>(
    records: &'a [TheftRecord],
    filter: &'a FilterState,
) -> impl Iterator<Item = &'a TheftRecord> {
    records.iter().filter(|record| filter.matches(record))
}

/// Entry with the highest count; ties go to the smaller key.
fn top_entry(counts: &BTreeMap<String, u64>) -> Option<(String, u64)> {
    let mut best: Option<(&String, u64)> = None;
    for (key, count) in counts {
        if best.is_none_or(|(_, best_count)| *count > best_count) {
            best = Some((key, *count));
        }
    }
    best.map(|(key, count)| (key.clone(), count))
}

/// Total number of records matching the filter.
#[must_use]
pub fn total_thefts(records: &[TheftRecord], filter: &FilterState) -> TotalThefts {
    TotalThefts {
        total_thefts: filtered(records, filter).count() as u64,
    }
}

/// Police station with the most matching thefts.
#[must_use]
pub fn highest_area(records: &[TheftRecord], filter: &FilterState) -> HighestArea {
    let mut counts = BTreeMap::new();
    for record in filtered(records, filter) {
        *counts.entry(record.police_station.clone()).or_insert(0) += 1;
    }
    let top = top_entry(&counts);
    HighestArea {
        thefts: top.as_ref().map_or(0, |(_, count)| *count),
        highest_area: top.map(|(station, _)| station),
    }
}

/// Most stolen vehicle model.
#[must_use]
pub fn most_model(records: &[TheftRecord], filter: &FilterState) -> MostModel {
    let mut counts = BTreeMap::new();
    for record in filtered(records, filter) {
        *counts.entry(record.model.clone()).or_insert(0) += 1;
    }
    let top = top_entry(&counts);
    MostModel {
        count: top.as_ref().map_or(0, |(_, count)| *count),
        most_model: top.map(|(model, _)| model),
    }
}

/// Clock hour with the most matching thefts.
///
/// Records without a recorded clock time cannot be bucketed and are
/// left out of this aggregation only.
#[must_use]
pub fn peak_time(records: &[TheftRecord], filter: &FilterState) -> PeakTime {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for record in filtered(records, filter) {
        if let Some(time) = record.time_of_theft {
            *counts.entry(time.hour()).or_insert(0) += 1;
        }
    }
    let mut best: Option<(u32, u64)> = None;
    for (hour, count) in &counts {
        if best.is_none_or(|(_, best_count)| *count > best_count) {
            best = Some((*hour, *count));
        }
    }
    PeakTime {
        peak_hour: best.map(|(hour, _)| format!("{hour}:00-{hour}:59")),
        count: best.map_or(0, |(_, count)| count),
    }
}

/// Theft counts per police station, most-hit first.
#[must_use]
pub fn thefts_by_locality(records: &[TheftRecord], filter: &FilterState) -> Vec<LocalityCount> {
    let mut counts = BTreeMap::new();
    for record in filtered(records, filter) {
        *counts.entry(record.police_station.clone()).or_insert(0) += 1;
    }
    let mut rows: Vec<LocalityCount> = counts
        .into_iter()
        .map(|(locality, count)| LocalityCount { locality, count })
        .collect();
    // BTreeMap iteration is name-ascending, so a stable sort on count
    // keeps name order within equal counts.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Daily theft counts, oldest first.
#[must_use]
pub fn theft_trends(records: &[TheftRecord], filter: &FilterState) -> Vec<TrendPoint> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in filtered(records, filter) {
        *counts.entry(record.date).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| TrendPoint {
            date: date.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

/// Day/night theft counts per vehicle make, name-ascending.
#[must_use]
pub fn day_night_by_company(records: &[TheftRecord], filter: &FilterState) -> Vec<CompanyDayNight> {
    let mut counts: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for record in filtered(records, filter) {
        let entry = counts.entry(record.company.clone()).or_insert((0, 0));
        match record.day_or_night {
            DayNight::Day => entry.0 += 1,
            DayNight::Night => entry.1 += 1,
        }
    }
    counts
        .into_iter()
        .map(|(company, (day, night))| CompanyDayNight {
            company,
            day,
            night,
        })
        .collect()
}

/// Coordinates of matching records, for the heatmap layer.
///
/// `day_or_night` is the map view's extra narrowing control; it ANDs
/// with the regular filter like every other conjunct. Records without
/// a usable coordinate pair are omitted.
#[must_use]
pub fn heatmap_points(
    records: &[TheftRecord],
    filter: &FilterState,
    day_or_night: Option<DayNight>,
) -> Vec<HeatmapPoint> {
    filtered(records, filter)
        .filter(|record| day_or_night.is_none_or(|split| record.day_or_night == split))
        .filter_map(|record| {
            Some(HeatmapPoint {
                latitude: record.latitude?,
                longitude: record.longitude?,
            })
        })
        .collect()
}

/// Builds the analysis report for a station and date range.
///
/// The station filter is optional free text matched case-insensitively
/// (the report form accepts stations that are not in the fixed list).
/// Returns `None` when nothing matches — the caller answers with a
/// "no records" message instead of an all-zero report. `generated_on`
/// is stamped by the caller so this stays clock-free.
#[must_use]
pub fn generate_report(
    records: &[TheftRecord],
    police_station: Option<&str>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    generated_on: &str,
) -> Option<TheftReport> {
    let matching: Vec<&TheftRecord> = records
        .iter()
        .filter(|record| record.date >= start_date && record.date <= end_date)
        .filter(|record| {
            police_station.is_none_or(|station| {
                record.police_station.eq_ignore_ascii_case(station.trim())
            })
        })
        .collect();
    if matching.is_empty() {
        return None;
    }
    log::debug!(
        "Generating report over {} records ({start_date} to {end_date})",
        matching.len()
    );

    let total = matching.len() as u64;
    let days_covered = (end_date - start_date).num_days() + 1;
    #[allow(clippy::cast_precision_loss)]
    let average_per_day = (total as f64 / days_covered as f64 * 100.0).round() / 100.0;

    let mut by_day = BTreeMap::new();
    let mut by_station = BTreeMap::new();
    let mut by_model = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, u64> = BTreeMap::new();
    for record in &matching {
        *by_day.entry(record.day.to_string()).or_insert(0) += 1;
        *by_station
            .entry(record.police_station.clone())
            .or_insert(0) += 1;
        *by_model.entry(record.model.clone()).or_insert(0) += 1;
        if let Some(time) = record.time_of_theft {
            *by_hour.entry(time.hour()).or_insert(0u64) += 1;
        }
    }

    let highest_theft_day = top_entry(&by_day).map_or_else(String::new, |(day, _)| day);
    let most_targeted_station =
        top_entry(&by_station).map_or_else(String::new, |(station, _)| station);
    let most_stolen_model = top_entry(&by_model).map_or_else(String::new, |(model, _)| model);
    let mut best_hour: Option<(u32, u64)> = None;
    for (hour, count) in &by_hour {
        if best_hour.is_none_or(|(_, best_count)| *count > best_count) {
            best_hour = Some((*hour, *count));
        }
    }
    let most_common_time = best_hour.map_or_else(
        || "unknown".to_string(),
        |(hour, _)| format!("{hour}:00-{hour}:59"),
    );

    let date_range = format!("{start_date} to {end_date}");
    let scope = police_station.map_or_else(
        || "all police stations".to_string(),
        |station| format!("police station {}", station.trim().to_uppercase()),
    );
    let summary = format!(
        "Between {date_range}, {total} bike thefts were recorded for {scope} \
         (about {average_per_day} per day). Thefts peaked on {highest_theft_day}s \
         around {most_common_time}; {most_targeted_station} registered the most \
         cases and {most_stolen_model} was the most stolen model."
    );

    Some(TheftReport {
        title: "Bike Theft Analysis Report".to_string(),
        date_range,
        generated_on: generated_on.to_string(),
        total_thefts: total,
        average_per_day,
        highest_theft_day,
        most_targeted_station,
        most_common_time,
        most_stolen_model,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_map_theft_models::{
        CaseStatus, DayOfWeek, TimeOfDay, VehicleCategory,
    };
    use chrono::NaiveTime;

    fn rec(
        case_no: &str,
        station: &str,
        company: &str,
        model: &str,
        date: (i32, u32, u32),
        time: Option<(u32, u32)>,
        category: VehicleCategory,
    ) -> TheftRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        let time_of_theft =
            time.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap());
        TheftRecord {
            case_no: case_no.into(),
            company: company.into(),
            model: model.into(),
            category,
            police_station: station.into(),
            place: "KOLHAPUR".into(),
            spot_type: "ROAD".into(),
            latitude: Some(16.7),
            longitude: Some(74.2),
            date,
            time_of_theft,
            time_of_day: time_of_theft.map_or(TimeOfDay::Midnight, TimeOfDay::from_time),
            day: DayOfWeek::from_date(date),
            day_or_night: time_of_theft.map_or(DayNight::Night, DayNight::from_time),
            status: CaseStatus::Active,
            contact_number: None,
            officer: None,
        }
    }

    /// Ten incidents, three of them at KARVIR.
    fn fixture() -> Vec<TheftRecord> {
        use VehicleCategory::{Motorcycle, Scooter};
        vec![
            rec("CR-1", "KARVIR", "Hero", "Splendor", (2024, 3, 1), Some((9, 30)), Motorcycle),
            rec("CR-2", "KARVIR", "Hero", "Splendor", (2024, 3, 1), Some((21, 0)), Motorcycle),
            rec("CR-3", "KARVIR", "Honda", "Activa", (2024, 3, 2), Some((14, 0)), Scooter),
            rec("CR-4", "AJARA", "Hero", "HF Deluxe", (2024, 3, 2), Some((9, 30)), Motorcycle),
            rec("CR-5", "AJARA", "Honda", "Shine", (2024, 3, 3), Some((18, 30)), Motorcycle),
            rec("CR-6", "KAGAL", "TVS", "Jupiter", (2024, 3, 3), Some((23, 30)), Scooter),
            rec("CR-7", "KAGAL", "Hero", "Splendor", (2024, 3, 4), Some((10, 15)), Motorcycle),
            rec("CR-8", "SHIROL", "Bajaj", "Pulsar", (2024, 3, 5), Some((2, 0)), Motorcycle),
            rec("CR-9", "SHIROL", "Hero", "Splendor", (2024, 3, 5), Some((9, 30)), Motorcycle),
            rec("CR-10", "VADGAON", "Yamaha", "FZ", (2024, 3, 6), Some((17, 45)), Motorcycle),
        ]
    }

    #[test]
    fn karvir_filter_yields_three_and_breakdown_agrees() {
        let records = fixture();
        let mut filter = FilterState::new();
        filter.toggle_locality("KARVIR");

        let total = total_thefts(&records, &filter);
        assert_eq!(total.total_thefts, 3);

        let by_locality = thefts_by_locality(&records, &filter);
        assert_eq!(by_locality.len(), 1);
        assert_eq!(by_locality[0].locality, "KARVIR");
        let sum: u64 = by_locality.iter().map(|row| row.count).sum();
        assert_eq!(sum, 3);
    }

    #[test]
    fn every_breakdown_sums_to_the_total_for_the_same_filter() {
        let records = fixture();
        let mut filter = FilterState::new();
        filter.toggle_category(VehicleCategory::Motorcycle);
        filter.set_date_from(Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));

        let total = total_thefts(&records, &filter).total_thefts;
        assert!(total > 0);

        let locality_sum: u64 = thefts_by_locality(&records, &filter)
            .iter()
            .map(|row| row.count)
            .sum();
        assert_eq!(locality_sum, total);

        let trend_sum: u64 = theft_trends(&records, &filter)
            .iter()
            .map(|point| point.count)
            .sum();
        assert_eq!(trend_sum, total);

        let matrix_sum: u64 = day_night_by_company(&records, &filter)
            .iter()
            .map(|row| row.day + row.night)
            .sum();
        assert_eq!(matrix_sum, total);
    }

    #[test]
    fn highest_area_and_most_model_on_the_unfiltered_set() {
        let records = fixture();
        let filter = FilterState::new();

        let area = highest_area(&records, &filter);
        assert_eq!(area.highest_area.as_deref(), Some("KARVIR"));
        assert_eq!(area.thefts, 3);

        let model = most_model(&records, &filter);
        assert_eq!(model.most_model.as_deref(), Some("Splendor"));
        assert_eq!(model.count, 4);
    }

    #[test]
    fn ties_break_on_the_smaller_key() {
        let records = vec![
            rec("A", "VADGAON", "Hero", "Splendor", (2024, 1, 1), Some((9, 0)), VehicleCategory::Motorcycle),
            rec("B", "AJARA", "Honda", "Activa", (2024, 1, 2), Some((9, 0)), VehicleCategory::Scooter),
        ];
        let area = highest_area(&records, &FilterState::new());
        assert_eq!(area.highest_area.as_deref(), Some("AJARA"));
        assert_eq!(area.thefts, 1);
    }

    #[test]
    fn peak_time_buckets_by_hour_and_skips_untimed_records() {
        let mut records = fixture();
        records.push(rec(
            "CR-11",
            "KARVIR",
            "Hero",
            "Splendor",
            (2024, 3, 7),
            None,
            VehicleCategory::Motorcycle,
        ));
        let peak = peak_time(&records, &FilterState::new());
        assert_eq!(peak.peak_hour.as_deref(), Some("9:00-9:59"));
        assert_eq!(peak.count, 3);
    }

    #[test]
    fn peak_time_is_none_when_no_record_has_a_clock_time() {
        let records = vec![rec(
            "CR-1",
            "KARVIR",
            "Hero",
            "Splendor",
            (2024, 3, 1),
            None,
            VehicleCategory::Motorcycle,
        )];
        let peak = peak_time(&records, &FilterState::new());
        assert!(peak.peak_hour.is_none());
        assert_eq!(peak.count, 0);
    }

    #[test]
    fn by_locality_sorts_count_descending_then_name() {
        let rows = thefts_by_locality(&fixture(), &FilterState::new());
        assert_eq!(rows[0].locality, "KARVIR");
        assert_eq!(rows[0].count, 3);
        let counts: Vec<u64> = rows.iter().map(|row| row.count).collect();
        let mut sorted = counts.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
        // AJARA, KAGAL and SHIROL all have 2; name order within the tie.
        assert_eq!(rows[1].locality, "AJARA");
        assert_eq!(rows[2].locality, "KAGAL");
        assert_eq!(rows[3].locality, "SHIROL");
    }

    #[test]
    fn trends_are_date_ascending_dense_over_observed_days() {
        let points = theft_trends(&fixture(), &FilterState::new());
        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-03-01",
                "2024-03-02",
                "2024-03-03",
                "2024-03-04",
                "2024-03-05",
                "2024-03-06"
            ]
        );
        assert_eq!(points[0].count, 2);
    }

    #[test]
    fn company_matrix_splits_day_and_night() {
        let rows = day_night_by_company(&fixture(), &FilterState::new());
        let hero = rows.iter().find(|row| row.company == "Hero").unwrap();
        assert_eq!(hero.day, 4);
        assert_eq!(hero.night, 1);
        let companies: Vec<&str> = rows.iter().map(|row| row.company.as_str()).collect();
        let mut sorted = companies.clone();
        sorted.sort_unstable();
        assert_eq!(companies, sorted);
    }

    #[test]
    fn heatmap_drops_unlocated_records_and_honors_day_night() {
        let mut records = fixture();
        records[0].latitude = None;
        let all = heatmap_points(&records, &FilterState::new(), None);
        assert_eq!(all.len(), 9);

        let night = heatmap_points(&records, &FilterState::new(), Some(DayNight::Night));
        assert_eq!(night.len(), 4);
    }

    #[test]
    fn report_covers_the_inclusive_range() {
        let records = fixture();
        let report = generate_report(
            &records,
            None,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            "2024-04-01 10:00",
        )
        .unwrap();
        assert_eq!(report.total_thefts, 10);
        assert!((report.average_per_day - 1.67).abs() < 1e-9);
        assert_eq!(report.most_targeted_station, "KARVIR");
        assert_eq!(report.most_stolen_model, "Splendor");
        assert_eq!(report.most_common_time, "9:00-9:59");
        assert_eq!(report.date_range, "2024-03-01 to 2024-03-06");
        assert_eq!(report.generated_on, "2024-04-01 10:00");
        assert!(report.summary.contains("10 bike thefts"));
    }

    #[test]
    fn report_station_filter_is_case_insensitive_free_text() {
        let records = fixture();
        let report = generate_report(
            &records,
            Some("karvir"),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            "now",
        )
        .unwrap();
        assert_eq!(report.total_thefts, 3);
        assert!(report.summary.contains("KARVIR"));
    }

    #[test]
    fn report_is_none_when_nothing_matches() {
        let records = fixture();
        assert!(generate_report(
            &records,
            Some("PANHALA"),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            "now",
        )
        .is_none());
    }
}
