//! Module: identity
//! Responsibility: the resolved actor identity value and user-name canonicalization.
//! Does not own: storage of actors or lookup semantics.

mod name;


pub use name::{canonical_ip, is_ip_name, normalize_user_name};

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// UserIdentity
///
/// Resolved actor identity: user id (0 when unregistered), display name
/// and the actor key that attributes actions to it.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct UserIdentity {
    id: u64,
    name: String,
    actor_id: u64,
}

impl UserIdentity {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, actor_id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            actor_id,
        }
    }

    /// Identity of an unregistered actor.
    #[must_use]
    pub fn anon(name: impl Into<String>, actor_id: u64) -> Self {
        Self::new(0, name, actor_id)
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn actor_id(&self) -> u64 {
        self.actor_id
    }

    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.id != 0
    }

    #[must_use]
    pub const fn is_anon(&self) -> bool {
        self.id == 0
    }

    /// True when both identities describe the same actor.
    ///
    /// Names compare in canonical form, so IP spellings that differ only in
    /// case or zero padding are the same actor.
    #[must_use]
    pub fn same_actor(&self, other: &Self) -> bool {
        self.actor_id == other.actor_id
            && self.id == other.id
            && normalize_user_name(&self.name) == normalize_user_name(&other.name)
    }

    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (actor {})", self.name, self.actor_id)
    }
}
