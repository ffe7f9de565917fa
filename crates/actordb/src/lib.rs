//! Actor identity lookups: values, identities, predicates, the fluent
//! `UserSelectQueryBuilder`, the `ActorSource` boundary and observability.
#![warn(unreachable_pub)]

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod obs;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use config::{ActorQueryConfig, ConfigError};
pub use error::InternalError;

///
/// Prelude
///
/// Prelude contains only the lookup vocabulary.
/// No executors, sinks or metrics helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            query::{OrderDirection, QueryError, UserSelectQueryBuilder, ValidateError},
            response::{UserIdentities, UserNames},
            source::{ActorRow, ActorSource, Conds, MemoryActorStore, SourceError},
        },
        identity::UserIdentity,
        value::Value,
    };
}
