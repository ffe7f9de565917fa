//! Module: db::executor
//! Responsibility: run one `SelectPlan` against an `ActorSource` and check what comes back.
//! Does not own: plan construction, normalization or result shaping.
//! Boundary: every source call is traced and counted here, exactly once.

mod trace;


pub use trace::{QueryTraceEvent, QueryTraceSink, TracingSink};

use crate::{
    db::{
        query::{QueryError, SelectPlan},
        source::{ActorRow, ActorSource, SelectRequest},
    },
    error::InternalError,
    obs::sink::{self as metrics_sink, MetricsEvent},
};
use std::collections::BTreeSet;
use trace::{TRACING_SINK, TraceScope};

///
/// SelectExecutor
///
/// Issues a single source read per plan. Source failures are returned
/// unchanged and never retried.
///

pub(crate) struct SelectExecutor<'a, S: ActorSource + ?Sized> {
    source: &'a S,
    trace: &'a dyn QueryTraceSink,
}

impl<'a, S: ActorSource + ?Sized> SelectExecutor<'a, S> {
    pub(crate) fn new(source: &'a S, trace: Option<&'a dyn QueryTraceSink>) -> Self {
        Self {
            source,
            trace: trace.unwrap_or(&TRACING_SINK),
        }
    }

    pub(crate) fn execute(&self, plan: &SelectPlan) -> Result<Vec<ActorRow>, QueryError> {
        let scope = TraceScope::start(
            self.trace,
            &plan.caller,
            plan.fingerprint(),
            plan.projection,
        );
        metrics_sink::record(MetricsEvent::SelectStart {
            caller: &plan.caller,
        });

        let result = self
            .source
            .select(&SelectRequest::from_plan(plan))
            .map_err(QueryError::from)
            .and_then(|rows| check_rows(plan, rows));

        match &result {
            Ok(rows) => {
                let rows = u64::try_from(rows.len()).unwrap_or(u64::MAX);
                metrics_sink::record(MetricsEvent::SelectFinish {
                    caller: &plan.caller,
                    rows,
                });
                scope.finish(rows);
            }
            Err(err) => {
                metrics_sink::record(MetricsEvent::SelectError {
                    caller: &plan.caller,
                    class: err.class(),
                });
                scope.error(err);
            }
        }

        result
    }
}

// A source must honor the limit and return each actor at most once.
fn check_rows(plan: &SelectPlan, rows: Vec<ActorRow>) -> Result<Vec<ActorRow>, QueryError> {
    if let Some(limit) = plan.limit
        && rows.len() > usize::try_from(limit).unwrap_or(usize::MAX)
    {
        return Err(InternalError::executor_invariant(format!(
            "actor source returned {} rows for limit {limit}",
            rows.len()
        ))
        .into());
    }

    let mut seen = BTreeSet::new();
    for row in &rows {
        if !seen.insert(row.actor_id) {
            return Err(InternalError::executor_invariant(format!(
                "actor source returned actor {} more than once",
                row.actor_id
            ))
            .into());
        }
    }

    Ok(rows)
}
