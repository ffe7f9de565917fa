use crate::{
    config::ActorQueryConfig,
    db::{
        predicate::{FieldPresence, Row, eval},
        query::{OrderDirection, OrderSpec, UserSelectQueryBuilder},
        source::{ActorRow, ActorSource, SelectRequest, SourceError},
    },
    error::InternalError,
    identity::normalize_user_name,
};
use std::cmp::Ordering;

///
/// MemoryActorStore
///
/// In-memory actor relation. Insertion order is scan order; actor ids,
/// names and registered user ids are unique.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryActorStore {
    rows: Vec<ActorRow>,
    config: ActorQueryConfig,
}

impl MemoryActorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: ActorQueryConfig) -> Self {
        Self {
            rows: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ActorQueryConfig {
        &self.config
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, actor_id: u64) -> Option<&ActorRow> {
        self.rows.iter().find(|row| row.actor_id == actor_id)
    }

    /// Start a lookup against this store using its configuration.
    #[must_use]
    pub fn new_select_query_builder(&self) -> UserSelectQueryBuilder<'_, Self> {
        UserSelectQueryBuilder::with_config(self, self.config.clone())
    }

    /// Append a row, enforcing key and name uniqueness.
    pub fn insert(&mut self, row: ActorRow) -> Result<(), InternalError> {
        if row.actor_id == 0 {
            return Err(InternalError::store_unsupported(
                "actor id 0 is reserved and cannot be stored",
            ));
        }
        if normalize_user_name(&row.name).as_deref() != Some(row.name.as_str()) {
            return Err(InternalError::store_unsupported(format!(
                "actor name '{}' is not in canonical form",
                row.name
            )));
        }

        for existing in &self.rows {
            if existing.actor_id == row.actor_id {
                return Err(InternalError::store_conflict(format!(
                    "duplicate actor id {}",
                    row.actor_id
                )));
            }
            if existing.name == row.name {
                return Err(InternalError::store_conflict(format!(
                    "duplicate actor name '{}'",
                    row.name
                )));
            }
            if row.user_id != 0 && existing.user_id == row.user_id {
                return Err(InternalError::store_conflict(format!(
                    "user id {} already has actor {}",
                    row.user_id, existing.actor_id
                )));
            }
        }

        self.rows.push(row);
        Ok(())
    }
}

impl ActorSource for MemoryActorStore {
    fn select(&self, request: &SelectRequest<'_>) -> Result<Vec<ActorRow>, SourceError> {
        let mut rows: Vec<&ActorRow> = self
            .rows
            .iter()
            .filter(|row| eval(*row, request.predicate))
            .collect();

        // `sort_by` is stable, so ties keep scan order.
        if let Some(order) = request.order {
            rows.sort_by(|a, b| compare_rows(*a, *b, order));
        }
        if let Some(limit) = request.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(rows
            .into_iter()
            .map(|row| row.clone().project(request.projection))
            .collect())
    }
}

fn compare_rows(a: &ActorRow, b: &ActorRow, order: &OrderSpec) -> Ordering {
    for (field, direction) in &order.fields {
        let ordering = compare_field(&a.field(field), &b.field(field));
        let ordering = match direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        };
        if ordering.is_ne() {
            return ordering;
        }
    }

    Ordering::Equal
}

// Missing sorts before present; incomparable values tie.
fn compare_field(left: &FieldPresence, right: &FieldPresence) -> Ordering {
    match (left, right) {
        (FieldPresence::Missing, FieldPresence::Missing) => Ordering::Equal,
        (FieldPresence::Missing, FieldPresence::Present(_)) => Ordering::Less,
        (FieldPresence::Present(_), FieldPresence::Missing) => Ordering::Greater,
        (FieldPresence::Present(l), FieldPresence::Present(r)) => {
            l.strict_cmp(r).unwrap_or(Ordering::Equal)
        }
    }
}
