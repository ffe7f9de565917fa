use crate::{
    db::{
        executor::{QueryTraceEvent, QueryTraceSink},
        query::PlanFingerprint,
        source::{ActorRow, ActorSource, MemoryActorStore, SelectRequest, SourceError},
    },
    error::ErrorClass,
};
use std::cell::RefCell;

pub(crate) const IP_NAME: &str = "2600:1004:B14A:5DDD:3EBE:BBA4:BFBA:F37E";

/// The three-actor relation most lookup tests run against.
pub(crate) fn actor_store() -> MemoryActorStore {
    let mut store = MemoryActorStore::new();
    for row in actor_rows() {
        store.insert(row).expect("fixture row should insert");
    }

    store
}

pub(crate) fn actor_rows() -> Vec<ActorRow> {
    vec![
        ActorRow::new(42, 24, "TestUser"),
        ActorRow::anon(43, IP_NAME),
        ActorRow::new(44, 25, "TestUser1"),
    ]
}

///
/// FailingSource
///
/// Rejects every read and counts how often it was asked.
///

pub(crate) struct FailingSource {
    pub(crate) error: SourceError,
    pub(crate) calls: RefCell<u32>,
}

impl FailingSource {
    pub(crate) fn unavailable() -> Self {
        Self {
            error: SourceError::Unavailable {
                message: "replica lag".to_string(),
            },
            calls: RefCell::new(0),
        }
    }
}

impl ActorSource for FailingSource {
    fn select(&self, _: &SelectRequest<'_>) -> Result<Vec<ActorRow>, SourceError> {
        *self.calls.borrow_mut() += 1;
        Err(self.error.clone())
    }
}

///
/// CannedSource
///
/// Returns fixed rows regardless of the request.
///

pub(crate) struct CannedSource(pub(crate) Vec<ActorRow>);

impl ActorSource for CannedSource {
    fn select(&self, _: &SelectRequest<'_>) -> Result<Vec<ActorRow>, SourceError> {
        Ok(self.0.clone())
    }
}

///
/// TraceRecord
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TraceRecord {
    Start {
        caller: String,
        fingerprint: PlanFingerprint,
    },
    Finish {
        fingerprint: PlanFingerprint,
        rows: u64,
    },
    Error {
        fingerprint: PlanFingerprint,
        class: ErrorClass,
    },
}

///
/// RecordingSink
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: RefCell<Vec<TraceRecord>>,
}

impl RecordingSink {
    pub(crate) fn take(&self) -> Vec<TraceRecord> {
        self.events.take()
    }
}

impl QueryTraceSink for RecordingSink {
    fn on_event(&self, event: QueryTraceEvent<'_>) {
        let record = match event {
            QueryTraceEvent::Start {
                caller,
                fingerprint,
                ..
            } => TraceRecord::Start {
                caller: caller.to_string(),
                fingerprint,
            },
            QueryTraceEvent::Finish {
                fingerprint, rows, ..
            } => TraceRecord::Finish { fingerprint, rows },
            QueryTraceEvent::Error {
                fingerprint, class, ..
            } => TraceRecord::Error { fingerprint, class },
        };
        self.events.borrow_mut().push(record);
    }
}
