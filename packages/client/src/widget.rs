//! Per-widget fetch state with last-write-wins ordering.

use crate::ApiError;

/// Fetch state for one dashboard widget.
///
/// Responses may resolve out of order relative to request issuance.
/// The widget stamps every request with the filter version it was
/// issued for ([`Widget::issue`]) and [`Widget::observe`] discards any
/// response whose stamp is not the latest issued — so a slow response
/// for an old filter can never overwrite data for the current one.
///
/// Failures are absorbed locally: the prior value keeps showing, the
/// error is logged, and nothing propagates to sibling widgets. No
/// retry is attempted.
#[derive(Debug, Clone)]
pub struct Widget<T> {
    name: &'static str,
    latest_issued: u64,
    value: Option<T>,
}

impl<T> Widget<T> {
    /// Creates an empty widget. `name` labels log lines only.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            latest_issued: 0,
            value: None,
        }
    }

    /// Records that a request was issued for filter `version`.
    pub fn issue(&mut self, version: u64) {
        self.latest_issued = self.latest_issued.max(version);
    }

    /// Feeds a resolved response back into the widget.
    ///
    /// Returns `true` if the widget's value changed (the caller should
    /// re-render), `false` if the response was stale or failed.
    pub fn observe(&mut self, version: u64, result: Result<T, ApiError>) -> bool {
        if version != self.latest_issued {
            log::debug!(
                "{}: discarding stale response for filter version {version} (latest {})",
                self.name,
                self.latest_issued
            );
            return false;
        }
        match result {
            Ok(value) => {
                self.value = Some(value);
                true
            }
            Err(e) => {
                log::error!("{}: fetch failed, keeping prior value: {e}", self.name);
                false
            }
        }
    }

    /// The most recent successfully observed value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Latest filter version a request was issued for.
    #[must_use]
    pub const fn latest_issued(&self) -> u64 {
        self.latest_issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_error() -> ApiError {
        ApiError::MalformedResponse("truncated".to_string())
    }

    #[test]
    fn renders_the_response_for_the_latest_issue() {
        let mut widget = Widget::new("total-thefts");
        widget.issue(1);
        assert!(widget.observe(1, Ok(10)));
        assert_eq!(widget.value(), Some(&10));
    }

    #[test]
    fn discards_a_stale_response_that_resolves_late() {
        let mut widget = Widget::new("total-thefts");
        widget.issue(1);
        widget.issue(2);
        assert!(widget.observe(2, Ok(5)));
        // Request 1 resolves after request 2 already rendered.
        assert!(!widget.observe(1, Ok(99)));
        assert_eq!(widget.value(), Some(&5));
    }

    #[test]
    fn a_failure_keeps_the_prior_value() {
        let mut widget = Widget::new("by-locality");
        widget.issue(1);
        assert!(widget.observe(1, Ok(vec!["KARVIR"])));
        widget.issue(2);
        assert!(!widget.observe(2, Err(network_error())));
        assert_eq!(widget.value(), Some(&vec!["KARVIR"]));
    }

    #[test]
    fn issue_never_moves_backwards() {
        let mut widget: Widget<u32> = Widget::new("peak-time");
        widget.issue(5);
        widget.issue(3);
        assert_eq!(widget.latest_issued(), 5);
        assert!(!widget.observe(3, Ok(1)));
    }
}
