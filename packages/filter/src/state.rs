//! Filter state and its query-contract projection.

use bike_map_theft_models::{DayOfWeek, TheftRecord, TimeOfDay, VehicleCategory};
use chrono::{NaiveDate, NaiveTime};

/// The current record-subset selection.
///
/// Set-valued fields behave as insertion-ordered sets: toggling a member
/// in appends it, toggling it out removes it without reordering the
/// survivors, and re-adding a removed member appends it again. That
/// order is what [`FilterState::to_query`] emits, so serialization is
/// reproducible run to run.
///
/// The state performs no membership or cross-field validation. Values
/// are expected to come from the fixed vocabularies in
/// `bike_map_theft_models`, and an inverted range (`from > to`) is the
/// request boundary's problem to reject, not this type's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    time_from: Option<NaiveTime>,
    time_to: Option<NaiveTime>,
    localities: Vec<String>,
    places: Vec<String>,
    company: Option<String>,
    categories: Vec<VehicleCategory>,
    time_of_day: TimeOfDay,
    days: Vec<DayOfWeek>,
    spot_types: Vec<String>,
}

/// Toggles `value` in an insertion-ordered set.
fn toggle_member<T: PartialEq>(set: &mut Vec<T>, value: T) {
    if let Some(pos) = set.iter().position(|v| *v == value) {
        set.remove(pos);
    } else {
        set.push(value);
    }
}

impl FilterState {
    /// Creates the default state: no filtering, return all records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower bound on incident date (inclusive).
    #[must_use]
    pub const fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Upper bound on incident date (inclusive).
    #[must_use]
    pub const fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    /// Lower bound on incident clock time (inclusive).
    #[must_use]
    pub const fn time_from(&self) -> Option<NaiveTime> {
        self.time_from
    }

    /// Upper bound on incident clock time (inclusive).
    #[must_use]
    pub const fn time_to(&self) -> Option<NaiveTime> {
        self.time_to
    }

    /// Selected police stations, in insertion order.
    #[must_use]
    pub fn localities(&self) -> &[String] {
        &self.localities
    }

    /// Selected places, in insertion order.
    #[must_use]
    pub fn places(&self) -> &[String] {
        &self.places
    }

    /// Selected vehicle make, if any.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Selected vehicle categories, in insertion order.
    #[must_use]
    pub fn categories(&self) -> &[VehicleCategory] {
        &self.categories
    }

    /// Selected time-of-day bucket (`All` = no bucket filtering).
    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Selected days of week, in insertion order.
    #[must_use]
    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    /// Selected spot types, in insertion order.
    #[must_use]
    pub fn spot_types(&self) -> &[String] {
        &self.spot_types
    }

    /// Replaces the lower date bound. `None` = unbounded.
    pub fn set_date_from(&mut self, value: Option<NaiveDate>) {
        self.date_from = value;
    }

    /// Replaces the upper date bound. `None` = unbounded.
    pub fn set_date_to(&mut self, value: Option<NaiveDate>) {
        self.date_to = value;
    }

    /// Replaces the lower time bound. `None` = unbounded.
    pub fn set_time_from(&mut self, value: Option<NaiveTime>) {
        self.time_from = value;
    }

    /// Replaces the upper time bound. `None` = unbounded.
    pub fn set_time_to(&mut self, value: Option<NaiveTime>) {
        self.time_to = value;
    }

    /// XOR-toggles a police station. This is what every station
    /// checkbox binds to: present removes, absent appends.
    pub fn toggle_locality(&mut self, value: impl Into<String>) {
        toggle_member(&mut self.localities, value.into());
    }

    /// XOR-toggles a place.
    pub fn toggle_place(&mut self, value: impl Into<String>) {
        toggle_member(&mut self.places, value.into());
    }

    /// XOR-toggles a vehicle category.
    pub fn toggle_category(&mut self, value: VehicleCategory) {
        toggle_member(&mut self.categories, value);
    }

    /// XOR-toggles a day of week.
    pub fn toggle_day(&mut self, value: DayOfWeek) {
        toggle_member(&mut self.days, value);
    }

    /// XOR-toggles a spot type.
    pub fn toggle_spot_type(&mut self, value: impl Into<String>) {
        toggle_member(&mut self.spot_types, value.into());
    }

    /// Replaces the vehicle-make selection outright. `None` or an empty
    /// string clears it.
    pub fn set_company(&mut self, value: Option<String>) {
        self.company = value.filter(|v| !v.is_empty());
    }

    /// Replaces the time-of-day bucket outright. [`TimeOfDay::All`]
    /// clears the selection.
    pub fn set_time_of_day(&mut self, value: TimeOfDay) {
        self.time_of_day = value;
    }

    /// Restores the canonical default: all fields empty/unbounded.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether this is the default "no filtering" state.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Projects the state into the query-parameter contract.
    ///
    /// Pure and deterministic: byte-identical state yields byte-identical
    /// pairs, across repeated calls. Keys appear in a fixed order;
    /// fields at their default value are omitted entirely (no empty
    /// `localities=`, no `time_of_day=All`); multi-valued fields are
    /// comma-joined in insertion order. Values are not percent-encoded —
    /// that is the transport's job.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(date) = self.date_from {
            pairs.push(("date_from", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.date_to {
            pairs.push(("date_to", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(time) = self.time_from {
            pairs.push(("time_from", time.format("%H:%M").to_string()));
        }
        if let Some(time) = self.time_to {
            pairs.push(("time_to", time.format("%H:%M").to_string()));
        }
        if !self.localities.is_empty() {
            pairs.push(("localities", self.localities.join(",")));
        }
        if !self.places.is_empty() {
            pairs.push(("places", self.places.join(",")));
        }
        if let Some(company) = &self.company {
            pairs.push(("company", company.clone()));
        }
        if !self.categories.is_empty() {
            pairs.push(("categories", join(&self.categories)));
        }
        if !self.time_of_day.is_all() {
            pairs.push(("time_of_day", self.time_of_day.to_string()));
        }
        if !self.days.is_empty() {
            pairs.push(("days", join(&self.days)));
        }
        if !self.spot_types.is_empty() {
            pairs.push(("spot_types", self.spot_types.join(",")));
        }

        pairs
    }

    /// The single AND-predicate behind every aggregation endpoint.
    ///
    /// Each non-default field contributes one conjunct: inclusive range
    /// checks for the date/time bounds, membership for the set fields,
    /// equality for the make and the time bucket. A record with no
    /// recorded clock time fails an explicit time-range conjunct — its
    /// inclusion cannot be established.
    #[must_use]
    pub fn matches(&self, record: &TheftRecord) -> bool {
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        if self.time_from.is_some() || self.time_to.is_some() {
            let Some(time) = record.time_of_theft else {
                return false;
            };
            if self.time_from.is_some_and(|from| time < from) {
                return false;
            }
            if self.time_to.is_some_and(|to| time > to) {
                return false;
            }
        }
        if !self.localities.is_empty()
            && !self.localities.iter().any(|l| *l == record.police_station)
        {
            return false;
        }
        if !self.places.is_empty() && !self.places.iter().any(|p| *p == record.place) {
            return false;
        }
        if let Some(company) = &self.company {
            if *company != record.company {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }
        if !self.time_of_day.is_all() && self.time_of_day != record.time_of_day {
            return false;
        }
        if !self.days.is_empty() && !self.days.contains(&record.day) {
            return false;
        }
        if !self.spot_types.is_empty() && !self.spot_types.iter().any(|s| *s == record.spot_type) {
            return false;
        }

        true
    }
}

/// Comma-joins displayable set members in insertion order.
fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
