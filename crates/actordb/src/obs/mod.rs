//! Observability: process-local query metrics and the sink that feeds them.
//!
//! Query tracing lives with the executor in `db::executor::trace`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{CallerCounters, QueryMetrics};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset};
