//! The shared filter store.
//!
//! One store instance exists per session. The sidebar is its writer;
//! dashboards, charts, the map, metric cards, and the reports table
//! subscribe and re-fetch whenever a new snapshot is published. State
//! changes and data fetches are deliberately decoupled: the store only
//! publishes, and each consumer decides what to fetch and when, so one
//! slow chart never blocks another.

use tokio::sync::watch;

use crate::FilterState;

/// A version-stamped copy of the filter state.
///
/// The version increases by one on every mutation. Consumers stamp each
/// request they issue with the snapshot's version and drop any response
/// whose stamp is no longer the latest they issued — rendering stale
/// data over newer data is a correctness bug, not a cosmetic one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSnapshot {
    /// Mutation counter, starting at 0 for the pristine default state.
    pub version: u64,
    /// The filter state as of this version.
    pub state: FilterState,
}

/// A consumer's handle onto the store.
///
/// Wraps a watch receiver: [`FilterSubscription::changed`] resolves when
/// a snapshot newer than the last-seen one is published, and
/// [`FilterSubscription::snapshot`] reads the latest without waiting.
#[derive(Debug, Clone)]
pub struct FilterSubscription {
    rx: watch::Receiver<FilterSnapshot>,
}

impl FilterSubscription {
    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FilterSnapshot {
        self.rx.borrow().clone()
    }

    /// Waits until a snapshot newer than the last observed one is
    /// published, then returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store has been dropped.
    pub async fn changed(&mut self) -> Result<FilterSnapshot, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }
}

/// Owner of the canonical [`FilterState`].
///
/// All mutation goes through [`FilterStore::update`], which bumps the
/// version and publishes the new snapshot to every subscription. The
/// store performs no I/O and never blocks.
#[derive(Debug)]
pub struct FilterStore {
    tx: watch::Sender<FilterSnapshot>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore {
    /// Creates a store holding the default "no filtering" state at
    /// version 0.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FilterSnapshot {
            version: 0,
            state: FilterState::new(),
        });
        Self { tx }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> FilterSnapshot {
        self.tx.borrow().clone()
    }

    /// Registers a new consumer. The subscription immediately sees the
    /// current snapshot.
    #[must_use]
    pub fn subscribe(&self) -> FilterSubscription {
        FilterSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Applies `mutate` to the state, bumps the version, publishes the
    /// result, and returns it.
    pub fn update(&self, mutate: impl FnOnce(&mut FilterState)) -> FilterSnapshot {
        let mut next = self.tx.borrow().clone();
        next.version += 1;
        mutate(&mut next.state);
        self.tx.send_replace(next.clone());
        next
    }

    /// Replaces the state with the canonical default.
    pub fn reset(&self) -> FilterSnapshot {
        self.update(FilterState::reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_map_theft_models::TimeOfDay;

    #[test]
    fn starts_at_version_zero_with_default_state() {
        let store = FilterStore::new();
        let snap = store.snapshot();
        assert_eq!(snap.version, 0);
        assert!(snap.state.is_default());
    }

    #[test]
    fn every_mutation_bumps_the_version() {
        let store = FilterStore::new();
        store.update(|s| s.toggle_locality("KARVIR"));
        store.update(|s| s.set_time_of_day(TimeOfDay::Morning));
        let snap = store.reset();
        assert_eq!(snap.version, 3);
        assert!(snap.state.is_default());
    }

    #[test]
    fn subscriptions_observe_the_same_snapshot() {
        let store = FilterStore::new();
        let a = store.subscribe();
        let b = store.subscribe();
        store.update(|s| s.toggle_locality("KARVIR"));
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.snapshot().state.localities(), ["KARVIR"]);
    }

    #[tokio::test]
    async fn changed_resolves_with_the_new_snapshot() {
        let store = FilterStore::new();
        let mut sub = store.subscribe();
        store.update(|s| s.toggle_place("KOLHAPUR"));
        let snap = sub.changed().await.unwrap();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.state.places(), ["KOLHAPUR"]);
    }

    #[test]
    fn late_subscriber_only_sees_the_latest_state() {
        let store = FilterStore::new();
        store.update(|s| s.toggle_locality("KARVIR"));
        store.update(|s| s.toggle_locality("KARVIR"));
        let sub = store.subscribe();
        let snap = sub.snapshot();
        assert_eq!(snap.version, 2);
        assert!(snap.state.localities().is_empty());
    }
}
