//! Module: db::response
//! Responsibility: shape executor rows into what terminal lookups return.
//! Does not own: execution, ordering or filtering.

use crate::{db::source::ActorRow, identity::UserIdentity};
use derive_more::{Deref, IntoIterator};
use std::{collections::BTreeSet, iter::FusedIterator, vec};

///
/// UserIdentities
///
/// Forward-only sequence of resolved identities in result order.
/// Consumed once; run the lookup again for a second pass.
///

#[derive(Debug)]
pub struct UserIdentities {
    rows: vec::IntoIter<ActorRow>,
}

impl UserIdentities {
    pub(crate) fn new(rows: Vec<ActorRow>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl Iterator for UserIdentities {
    type Item = UserIdentity;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows
            .next()
            .map(|row| UserIdentity::new(row.user_id, row.name, row.actor_id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for UserIdentities {}

impl FusedIterator for UserIdentities {}

///
/// UserNames
///
/// Distinct names returned by a name-only lookup.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct UserNames(BTreeSet<String>);

impl UserNames {
    pub(crate) fn from_rows(rows: Vec<ActorRow>) -> Self {
        Self(rows.into_iter().map(|row| row.name).collect())
    }

    /// Names in ascending order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}
