//! Module: value
//! Responsibility: dynamic field values shared by rows, predicates and conditions.
//! Does not own: coercion policy (see `db::predicate::coercion`).


use std::cmp::Ordering;

///
/// Value
///
/// Dynamic value carried by actor rows and predicate literals.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
    List(Vec<Self>),
}

impl Value {
    /// Build a list value from anything convertible into values.
    pub fn from_list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(n) => Some(*n),
            Self::Int(n) if *n >= 0 => Some(n.unsigned_abs()),
            _ => None,
        }
    }

    /// Stable one-byte tag used by canonical encodings.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        match self {
            Self::Null => 0x00,
            Self::Bool(_) => 0x01,
            Self::Int(_) => 0x02,
            Self::Uint(_) => 0x03,
            Self::Text(_) => 0x04,
            Self::List(_) => 0x05,
        }
    }

    /// Compare two numeric values, widening across signed/unsigned.
    #[must_use]
    pub fn cmp_numeric(&self, other: &Self) -> Option<Ordering> {
        let left = self.as_i128()?;
        let right = other.as_i128()?;

        Some(left.cmp(&right))
    }

    /// Ordering between two values of the same variant.
    ///
    /// Returns `None` for mismatched variants and for lists.
    #[must_use]
    pub fn strict_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Case-sensitive prefix test; `None` unless both sides are text.
    #[must_use]
    pub fn text_starts_with(&self, prefix: &Self) -> Option<bool> {
        let (Self::Text(text), Self::Text(prefix)) = (self, prefix) else {
            return None;
        };

        Some(text.starts_with(prefix.as_str()))
    }

    /// SQL `LIKE 'prefix%suffix'` with both affixes taken literally.
    ///
    /// The suffix is matched only after the prefix, so a text shorter than
    /// both affixes together never matches even when they overlap.
    #[must_use]
    pub fn text_like(&self, prefix: &str, suffix: &str) -> Option<bool> {
        let Self::Text(text) = self else {
            return None;
        };

        Some(text.strip_prefix(prefix).is_some_and(|rest| rest.ends_with(suffix)))
    }

    fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Int(n) => Some(i128::from(*n)),
            Self::Uint(n) => Some(i128::from(*n)),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
