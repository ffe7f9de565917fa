//! Module: db::source
//! Responsibility: the relational actor source boundary and its in-memory implementation.
//! Does not own: query construction, normalization or result shaping.
//! Boundary: everything a builder hands to a source travels in `SelectRequest`.

mod conds;
mod memory;

#[cfg(test)]
mod tests;

pub use conds::Conds;
pub use memory::MemoryActorStore;

use crate::{
    db::{
        predicate::{FieldPresence, Predicate, Row},
        query::{OrderSpec, Projection, SelectPlan},
    },
    value::Value,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// field
///
/// Column names every actor source understands.
///

pub mod field {
    pub const ACTOR_ID: &str = "actor_id";
    pub const USER_ID: &str = "id";
    pub const NAME: &str = "name";
    pub const HIDDEN: &str = "hidden";
}

///
/// SourceError
///
/// Execution-time faults raised by an actor source. The core never retries
/// or swallows these; they reach the caller unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SourceError {
    #[error("actor source unavailable: {message}")]
    Unavailable { message: String },

    #[error("actor source timed out (caller '{caller}')")]
    Timeout { caller: String },

    #[error("actor source rejected query: {message}")]
    Rejected { message: String },
}

///
/// ActorRow
///
/// One row of the actor relation. `extra` carries any column beyond the
/// three identity columns, e.g. `hidden`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActorRow {
    pub actor_id: u64,
    pub user_id: u64,
    pub name: String,
    pub extra: BTreeMap<String, Value>,
}

impl ActorRow {
    #[must_use]
    pub fn new(actor_id: u64, user_id: u64, name: impl Into<String>) -> Self {
        Self {
            actor_id,
            user_id,
            name: name.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Row for an unregistered actor.
    #[must_use]
    pub fn anon(actor_id: u64, name: impl Into<String>) -> Self {
        Self::new(actor_id, 0, name)
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn hidden(self) -> Self {
        self.with_field(field::HIDDEN, true)
    }

    /// Keep only what `projection` asks for.
    #[must_use]
    pub fn project(mut self, projection: Projection) -> Self {
        match projection {
            Projection::Identity => {
                self.extra.clear();
            }
            Projection::Names => {
                self.user_id = 0;
                self.extra.clear();
            }
        }
        self
    }
}

impl Row for ActorRow {
    fn field(&self, name: &str) -> FieldPresence {
        match name {
            field::ACTOR_ID => FieldPresence::Present(Value::Uint(self.actor_id)),
            field::USER_ID => FieldPresence::Present(Value::Uint(self.user_id)),
            field::NAME => FieldPresence::Present(Value::Text(self.name.clone())),
            other => match self.extra.get(other) {
                Some(value) => FieldPresence::Present(value.clone()),
                None => FieldPresence::Missing,
            },
        }
    }
}

///
/// SelectRequest
///
/// A single filtered, ordered, limited read against the actor relation.
/// `caller` is a diagnostics label only.
///

#[derive(Clone, Copy, Debug)]
pub struct SelectRequest<'a> {
    pub projection: Projection,
    pub predicate: &'a Predicate,
    pub order: Option<&'a OrderSpec>,
    pub limit: Option<u32>,
    pub caller: &'a str,
}

impl<'a> SelectRequest<'a> {
    #[must_use]
    pub fn from_plan(plan: &'a SelectPlan) -> Self {
        Self {
            projection: plan.projection,
            predicate: &plan.predicate,
            order: plan.order.as_ref(),
            limit: plan.limit,
            caller: &plan.caller,
        }
    }
}

///
/// ActorSource
///
/// Relational read collaborator. Implementations must return rows matching
/// `predicate`, ordered by `order` (stable for equal keys, scan order when
/// `None`) and truncated to `limit`. No two returned rows may share an
/// `actor_id`.
///

pub trait ActorSource {
    fn select(&self, request: &SelectRequest<'_>) -> Result<Vec<ActorRow>, SourceError>;
}

impl<T: ActorSource + ?Sized> ActorSource for &T {
    fn select(&self, request: &SelectRequest<'_>) -> Result<Vec<ActorRow>, SourceError> {
        (**self).select(request)
    }
}
