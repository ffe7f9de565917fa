//! Module: db
//! Responsibility: actor lookup pipeline from builder to resolved identities.
//! Does not own: identity values, configuration parsing or metrics state.

pub mod executor;
pub mod predicate;
pub mod query;
pub mod response;
pub mod source;
