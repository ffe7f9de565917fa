use crate::db::predicate::{Predicate, predicate_key};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    const fn tag(self) -> u8 {
        match self {
            Self::Asc => 0x01,
            Self::Desc => 0x02,
        }
    }
}

///
/// OrderSpec
///
/// Sort keys applied in sequence; the first non-equal key decides.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

impl OrderSpec {
    #[must_use]
    pub fn single(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            fields: vec![(field.into(), direction)],
        }
    }
}

///
/// Projection
///
/// Which columns a terminal operation needs back from the source.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Projection {
    /// `id`, `name` and `actor_id`.
    Identity,
    /// `name` only (plus the row key).
    Names,
}

impl Projection {
    const fn tag(self) -> u8 {
        match self {
            Self::Identity => 0x01,
            Self::Names => 0x02,
        }
    }
}

///
/// SelectPlan
///
/// Validated, normalized and immutable form of a builder, ready to hand to
/// an `ActorSource`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectPlan {
    pub predicate: Predicate,
    pub order: Option<OrderSpec>,
    pub limit: Option<u32>,
    pub projection: Projection,
    pub caller: String,
}

impl SelectPlan {
    /// Compute a stable fingerprint for this plan.
    ///
    /// The caller label is diagnostics only and does not contribute.
    #[must_use]
    pub fn fingerprint(&self) -> PlanFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"actorplanfp:v1");

        write_tag(&mut hasher, 0x01);
        let key = predicate_key(&self.predicate);
        write_len(&mut hasher, key.len());
        hasher.update(&key);

        write_tag(&mut hasher, 0x02);
        match &self.order {
            Some(order) => {
                write_tag(&mut hasher, 0x01);
                write_len(&mut hasher, order.fields.len());
                for (field, direction) in &order.fields {
                    write_len(&mut hasher, field.len());
                    hasher.update(field.as_bytes());
                    write_tag(&mut hasher, direction.tag());
                }
            }
            None => write_tag(&mut hasher, 0x00),
        }

        write_tag(&mut hasher, 0x03);
        match self.limit {
            Some(limit) => {
                write_tag(&mut hasher, 0x01);
                hasher.update(limit.to_be_bytes());
            }
            None => write_tag(&mut hasher, 0x00),
        }

        write_tag(&mut hasher, 0x04);
        write_tag(&mut hasher, self.projection.tag());

        PlanFingerprint(hasher.finalize().into())
    }
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

#[expect(clippy::cast_possible_truncation)]
fn write_len(hasher: &mut Sha256, len: usize) {
    hasher.update((len as u32).to_be_bytes());
}

///
/// PlanFingerprint
///
/// Stable, deterministic fingerprint for select plans.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PlanFingerprint([u8; 32]);

impl PlanFingerprint {
    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}
