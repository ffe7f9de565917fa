use std::{cell::RefCell, collections::BTreeMap};

///
/// QueryMetrics
/// Ephemeral, in-memory counters for actor lookups.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryMetrics {
    pub select_calls: u64,
    pub rows_loaded: u64,
    pub source_errors: u64,
    pub invariant_errors: u64,
    /// One entry per distinct caller label, kept until `metrics_reset()`.
    /// Labels should be static call-site names; the map is not capped.
    pub callers: BTreeMap<String, CallerCounters>,
}

///
/// CallerCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallerCounters {
    pub select_calls: u64,
    pub rows_loaded: u64,
    pub errors: u64,
}

thread_local! {
    static QUERY_METRICS: RefCell<QueryMetrics> = RefCell::new(QueryMetrics::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&QueryMetrics) -> R) -> R {
    QUERY_METRICS.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut QueryMetrics) -> R) -> R {
    QUERY_METRICS.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset() {
    with_state_mut(|m| *m = QueryMetrics::default());
}
