use crate::{
    config::ActorQueryConfig,
    db::predicate::{ComparePredicate, Predicate},
    value::Value,
};
use thiserror::Error as ThisError;

///
/// ValidateError
///
/// Builder configuration rejected before any source access.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("limit must be greater than zero")]
    ZeroLimit,

    #[error("limit {limit} exceeds the configured maximum of {max}")]
    LimitExceedsMax { limit: u32, max: u32 },

    #[error("condition field name must not be empty")]
    EmptyField,

    #[error("condition on '{field}' contains a nested list")]
    NestedList { field: String },

    #[error("invalid actor query config: {0}")]
    Config(String),
}

pub(crate) fn validate_config(config: &ActorQueryConfig) -> Result<(), ValidateError> {
    config
        .validate()
        .map_err(|err| ValidateError::Config(err.to_string()))
}

pub(crate) fn validate_limit(
    limit: Option<u32>,
    config: &ActorQueryConfig,
) -> Result<(), ValidateError> {
    let Some(limit) = limit else {
        return Ok(());
    };

    if limit == 0 {
        return Err(ValidateError::ZeroLimit);
    }
    if let Some(max) = config.max_limit
        && limit > max
    {
        return Err(ValidateError::LimitExceedsMax { limit, max });
    }

    Ok(())
}

/// Structural checks over every comparison in the tree.
pub(crate) fn validate_predicate(predicate: &Predicate) -> Result<(), ValidateError> {
    match predicate {
        Predicate::True | Predicate::False => Ok(()),
        Predicate::And(children) | Predicate::Or(children) => {
            children.iter().try_for_each(validate_predicate)
        }
        Predicate::Not(inner) => validate_predicate(inner),
        Predicate::Compare(cmp) => validate_compare(cmp),
    }
}

fn validate_compare(cmp: &ComparePredicate) -> Result<(), ValidateError> {
    validate_field(&cmp.field)?;

    if let Value::List(items) = &cmp.value
        && items.iter().any(Value::is_list)
    {
        return Err(ValidateError::NestedList {
            field: cmp.field.clone(),
        });
    }

    Ok(())
}

fn validate_field(field: &str) -> Result<(), ValidateError> {
    if field.trim().is_empty() {
        return Err(ValidateError::EmptyField);
    }

    Ok(())
}
