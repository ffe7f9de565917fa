//! Executor query tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect execution semantics.

use crate::{
    db::query::{PlanFingerprint, Projection, QueryError},
    error::{ErrorClass, ErrorOrigin},
};

///
/// QueryTraceSink
///

pub trait QueryTraceSink {
    fn on_event(&self, event: QueryTraceEvent<'_>);
}

///
/// QueryTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryTraceEvent<'a> {
    Start {
        caller: &'a str,
        fingerprint: PlanFingerprint,
        projection: Projection,
    },
    Finish {
        caller: &'a str,
        fingerprint: PlanFingerprint,
        rows: u64,
    },
    Error {
        caller: &'a str,
        fingerprint: PlanFingerprint,
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// TracingSink
///
/// Default sink. Forwards every event to the `tracing` subscriber, if any.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl QueryTraceSink for TracingSink {
    fn on_event(&self, event: QueryTraceEvent<'_>) {
        match event {
            QueryTraceEvent::Start {
                caller,
                fingerprint,
                projection,
            } => {
                tracing::debug!(caller, %fingerprint, ?projection, "actor select started");
            }
            QueryTraceEvent::Finish {
                caller,
                fingerprint,
                rows,
            } => {
                tracing::debug!(caller, %fingerprint, rows, "actor select finished");
            }
            QueryTraceEvent::Error {
                caller,
                fingerprint,
                class,
                origin,
            } => {
                tracing::warn!(caller, %fingerprint, %class, %origin, "actor select failed");
            }
        }
    }
}

pub(crate) static TRACING_SINK: TracingSink = TracingSink;

///
/// TraceScope
///

pub(crate) struct TraceScope<'a> {
    sink: &'a dyn QueryTraceSink,
    caller: &'a str,
    fingerprint: PlanFingerprint,
}

impl<'a> TraceScope<'a> {
    pub(crate) fn start(
        sink: &'a dyn QueryTraceSink,
        caller: &'a str,
        fingerprint: PlanFingerprint,
        projection: Projection,
    ) -> Self {
        sink.on_event(QueryTraceEvent::Start {
            caller,
            fingerprint,
            projection,
        });

        Self {
            sink,
            caller,
            fingerprint,
        }
    }

    pub(crate) fn finish(self, rows: u64) {
        self.sink.on_event(QueryTraceEvent::Finish {
            caller: self.caller,
            fingerprint: self.fingerprint,
            rows,
        });
    }

    pub(crate) fn error(self, err: &QueryError) {
        self.sink.on_event(QueryTraceEvent::Error {
            caller: self.caller,
            fingerprint: self.fingerprint,
            class: err.class(),
            origin: err.origin(),
        });
    }
}
