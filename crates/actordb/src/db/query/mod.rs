//! Module: db::query
//! Responsibility: fluent actor lookups, validation and immutable select plans.
//! Does not own: row access, ordering mechanics or result materialization.
//! Boundary: builders lower into `SelectPlan`; the executor runs plans.

mod builder;
mod plan;
mod validate;


pub use builder::{IntoUserIds, IntoUserNames, UserSelectQueryBuilder};
pub use plan::{OrderDirection, OrderSpec, PlanFingerprint, Projection, SelectPlan};
pub use validate::ValidateError;

use crate::{
    db::source::SourceError,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Everything a terminal lookup can fail with. Validation failures happen
/// before the source is touched; source failures are passed through as-is.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Validate(#[from] ValidateError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Execute(#[from] InternalError),
}

impl QueryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validate(_) => ErrorClass::Validation,
            Self::Source(_) => ErrorClass::Unavailable,
            Self::Execute(err) => err.class,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Validate(_) => ErrorOrigin::Query,
            Self::Source(_) => ErrorOrigin::Source,
            Self::Execute(err) => err.origin,
        }
    }

    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}
