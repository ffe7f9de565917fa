//! Metrics sink boundary.
//!
//! Executor code MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{error::ErrorClass, obs::metrics};

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent<'a> {
    SelectStart { caller: &'a str },
    SelectFinish { caller: &'a str, rows: u64 },
    SelectError { caller: &'a str, class: ErrorClass },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default process-local sink that writes into the thread-local metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::SelectStart { caller } => metrics::with_state_mut(|m| {
                m.select_calls = m.select_calls.saturating_add(1);
                let entry = m.callers.entry(caller.to_string()).or_default();
                entry.select_calls = entry.select_calls.saturating_add(1);
            }),

            MetricsEvent::SelectFinish { caller, rows } => metrics::with_state_mut(|m| {
                m.rows_loaded = m.rows_loaded.saturating_add(rows);
                let entry = m.callers.entry(caller.to_string()).or_default();
                entry.rows_loaded = entry.rows_loaded.saturating_add(rows);
            }),

            MetricsEvent::SelectError { caller, class } => metrics::with_state_mut(|m| {
                match class {
                    ErrorClass::Unavailable => {
                        m.source_errors = m.source_errors.saturating_add(1);
                    }
                    ErrorClass::InvariantViolation => {
                        m.invariant_errors = m.invariant_errors.saturating_add(1);
                    }
                    ErrorClass::Conflict
                    | ErrorClass::Internal
                    | ErrorClass::Unsupported
                    | ErrorClass::Validation => {}
                }
                let entry = m.callers.entry(caller.to_string()).or_default();
                entry.errors = entry.errors.saturating_add(1);
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    GLOBAL_METRICS_SINK.record(event);
}

/// Snapshot the current thread's metrics.
#[must_use]
pub fn metrics_report() -> metrics::QueryMetrics {
    metrics::with_state(Clone::clone)
}

/// Reset all metrics state, including every per-caller entry.
pub fn metrics_reset() {
    metrics::reset();
}
