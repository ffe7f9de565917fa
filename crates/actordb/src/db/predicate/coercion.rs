use crate::value::Value;
use std::{cmp::Ordering, mem::discriminant};

///
/// CoercionId
///
/// How a row value is compared against a predicate literal.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CoercionId {
    Strict,
    NumericWiden,
}

impl CoercionId {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Strict => 0x01,
            Self::NumericWiden => 0x02,
        }
    }
}

///
/// CoercionSpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoercionSpec {
    pub id: CoercionId,
}

impl CoercionSpec {
    #[must_use]
    pub const fn new(id: CoercionId) -> Self {
        Self { id }
    }
}

impl Default for CoercionSpec {
    fn default() -> Self {
        Self::new(CoercionId::Strict)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextOp {
    StartsWith,
    Like,
}

/// Equality under a coercion; `None` when the comparison is undefined.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value, coercion: &CoercionSpec) -> Option<bool> {
    match coercion.id {
        CoercionId::Strict => same_variant(left, right).then(|| left == right),
        CoercionId::NumericWiden => left.cmp_numeric(right).map(Ordering::is_eq),
    }
}

/// Text matching; only defined under strict coercion.
///
/// `Like` expects a two-element `[prefix, suffix]` text list.
#[must_use]
pub fn compare_text(
    left: &Value,
    right: &Value,
    coercion: &CoercionSpec,
    op: TextOp,
) -> Option<bool> {
    if coercion.id != CoercionId::Strict {
        return None;
    }

    match op {
        TextOp::StartsWith => left.text_starts_with(right),
        TextOp::Like => {
            let Value::List(parts) = right else {
                return None;
            };
            let [Value::Text(prefix), Value::Text(suffix)] = parts.as_slice() else {
                return None;
            };

            left.text_like(prefix, suffix)
        }
    }
}

fn same_variant(left: &Value, right: &Value) -> bool {
    discriminant(left) == discriminant(right)
}
