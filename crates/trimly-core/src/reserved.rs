//! Reserved-slot query state with a stale-response guard.
//!
//! The backend provides no ordering guarantee across in-flight requests:
//! if the user flips date or barber quickly, a slow response for an old
//! pair can land after the newer one. Each request is therefore tagged
//! with its `(date, barber)` pair; a completion is applied only when its
//! tag still matches the current pair -- "last input change wins".

use chrono::NaiveDate;
use tracing::debug;

/// The exact input pair a reserved-slot query is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub date: NaiveDate,
    /// `None` = "any barber" (server-defined reservation semantics).
    pub barber: Option<String>,
}

impl SlotQuery {
    pub fn new(date: NaiveDate, barber: Option<String>) -> Self {
        Self { date, barber }
    }
}

/// Reserved slots for the current query pair.
///
/// `begin()` clears the previous result set immediately on any input
/// change, so stale slots are never shown while the new query is in
/// flight; `apply()` discards completions whose tag no longer matches.
#[derive(Debug, Default)]
pub struct ReservedSlots {
    current: Option<SlotQuery>,
    slots: Vec<String>,
}

impl ReservedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new in-flight query, clearing the previous results.
    pub fn begin(&mut self, query: SlotQuery) {
        if self.current.as_ref() != Some(&query) {
            self.slots.clear();
        }
        self.current = Some(query);
    }

    /// Apply a completed query's results. Returns `false` (and changes
    /// nothing) when the tag no longer matches the current pair.
    pub fn apply(&mut self, query: &SlotQuery, times: Vec<String>) -> bool {
        if self.current.as_ref() == Some(query) {
            self.slots = times;
            true
        } else {
            debug!(?query, "discarding reserved-slot response for stale pair");
            false
        }
    }

    /// Forget the query and results (inputs became incomplete).
    pub fn reset(&mut self) {
        self.current = None;
        self.slots.clear();
    }

    /// The current query pair, if one is active.
    pub fn query(&self) -> Option<&SlotQuery> {
        self.current.as_ref()
    }

    /// Reserved slot labels for the current pair.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn is_reserved(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(date: &str, barber: Option<&str>) -> SlotQuery {
        SlotQuery::new(date.parse().expect("date"), barber.map(str::to_owned))
    }

    #[test]
    fn matching_response_is_applied() {
        let mut reserved = ReservedSlots::new();
        let query = q("2025-03-10", Some("b1"));
        reserved.begin(query.clone());

        assert!(reserved.apply(&query, vec!["10:00".into(), "10:30".into()]));
        assert!(reserved.is_reserved("10:00"));
        assert!(!reserved.is_reserved("11:00"));
    }

    #[test]
    fn input_change_clears_previous_results_immediately() {
        let mut reserved = ReservedSlots::new();
        let first = q("2025-03-10", Some("b1"));
        reserved.begin(first.clone());
        reserved.apply(&first, vec!["10:00".into()]);

        // Flip the barber: old slots must not linger while the new query
        // is in flight.
        reserved.begin(q("2025-03-10", Some("b2")));
        assert!(reserved.slots().is_empty());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut reserved = ReservedSlots::new();
        let old = q("2025-03-10", Some("b1"));
        let new = q("2025-03-11", Some("b1"));

        reserved.begin(old.clone());
        reserved.begin(new.clone());

        // The old pair's (slower) response arrives after the input changed.
        assert!(!reserved.apply(&old, vec!["10:00".into()]));
        assert!(reserved.slots().is_empty());

        // The current pair's response still lands.
        assert!(reserved.apply(&new, vec!["12:00".into()]));
        assert_eq!(reserved.slots(), ["12:00".to_owned()]);
    }

    #[test]
    fn out_of_order_completion_keeps_newest() {
        let mut reserved = ReservedSlots::new();
        let old = q("2025-03-10", None);
        let new = q("2025-03-10", Some("b1"));

        reserved.begin(old.clone());
        reserved.begin(new.clone());

        // Responses arrive newest first, then the stale one.
        assert!(reserved.apply(&new, vec!["15:00".into()]));
        assert!(!reserved.apply(&old, vec!["10:00".into()]));
        assert_eq!(reserved.slots(), ["15:00".to_owned()]);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut reserved = ReservedSlots::new();
        let query = q("2025-03-10", Some("b1"));
        reserved.begin(query.clone());
        reserved.apply(&query, vec!["10:00".into()]);

        reserved.reset();
        assert!(reserved.query().is_none());
        assert!(reserved.slots().is_empty());
        assert!(!reserved.apply(&query, vec!["10:00".into()]));
    }
}
