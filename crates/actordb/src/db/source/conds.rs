use crate::{
    db::predicate::{CoercionId, CompareOp, ComparePredicate, Predicate},
    value::Value,
};

///
/// Conds
///
/// Raw equality / membership conditions for the builder's escape hatch.
/// A scalar value means `field = value`; a list value means `field IN list`.
/// Integer values compare numerically, so signed literals match unsigned
/// columns.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Conds(Vec<(String, Value)>);

impl Conds {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add `field = value`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((field.into(), value.into()));
        self
    }

    /// Add `field IN values`.
    #[must_use]
    pub fn in_list<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.0.push((field.into(), Value::from_list(values)));
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Lower every condition into its comparison predicate.
    pub(crate) fn into_predicates(self) -> impl Iterator<Item = Predicate> {
        self.0.into_iter().map(|(field, value)| {
            let op = if value.is_list() {
                CompareOp::In
            } else {
                CompareOp::Eq
            };
            let coercion = coercion_for(&value);

            Predicate::Compare(ComparePredicate::with_coercion(field, op, value, coercion))
        })
    }
}

fn coercion_for(value: &Value) -> CoercionId {
    let numeric = |value: &Value| matches!(value, Value::Int(_) | Value::Uint(_));
    let all_numeric = match value {
        Value::List(items) => !items.is_empty() && items.iter().all(numeric),
        scalar => numeric(scalar),
    };

    if all_numeric {
        CoercionId::NumericWiden
    } else {
        CoercionId::Strict
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Conds
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}
