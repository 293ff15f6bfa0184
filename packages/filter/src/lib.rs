#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The canonical filter model shared by every bike-map view.
//!
//! [`FilterState`] is the single source of truth for "which subset of
//! theft records is currently of interest". It serializes into the
//! query-parameter contract every aggregation endpoint consumes
//! ([`FilterState::to_query`]) and carries the one AND-predicate
//! ([`FilterState::matches`]) those endpoints apply, so a total count
//! and a breakdown computed for the same filter can never disagree.
//!
//! [`FilterStore`] wraps the state in a watch channel: the sidebar
//! mutates, every chart/table/map consumer observes version-stamped
//! snapshots and re-fetches. The store itself performs no I/O.

mod state;
mod store;

pub use state::FilterState;
pub use store::{FilterSnapshot, FilterStore, FilterSubscription};
