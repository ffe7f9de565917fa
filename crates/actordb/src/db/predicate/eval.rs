use crate::{
    db::predicate::{
        CompareOp, ComparePredicate, Predicate,
        coercion::{CoercionSpec, TextOp, compare_eq, compare_text},
    },
    value::Value,
};

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Value::Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    /// Field exists and has a value (including `Value::Null`).
    Present(Value),
    /// Field is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// Sources implement this for their own row types to reuse `eval`.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

///
/// Evaluate a predicate against a single row.
///
/// Pure runtime evaluation with no validation; any undefined comparison
/// evaluates to `false`.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare(cmp) => eval_compare(row, cmp),
    }
}

///
/// Evaluate a single comparison predicate against a row.
///
/// Returns `false` if the field is missing or the comparison is not
/// defined under the given coercion.
///
fn eval_compare<R: Row + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let ComparePredicate {
        field,
        op,
        value,
        coercion,
    } = cmp;

    let FieldPresence::Present(actual) = row.field(field) else {
        return false;
    };

    match op {
        CompareOp::Eq => compare_eq(&actual, value, coercion).unwrap_or(false),
        CompareOp::Ne => compare_eq(&actual, value, coercion).is_some_and(|v| !v),

        CompareOp::In => in_list(&actual, value, coercion).unwrap_or(false),

        CompareOp::StartsWith => {
            compare_text(&actual, value, coercion, TextOp::StartsWith).unwrap_or(false)
        }
        CompareOp::Like => compare_text(&actual, value, coercion, TextOp::Like).unwrap_or(false),
    }
}

///
/// Check whether a value equals any element in a list.
///
/// An empty list is a valid comparison that never matches.
///
fn in_list(actual: &Value, list: &Value, coercion: &CoercionSpec) -> Option<bool> {
    let Value::List(items) = list else {
        return None;
    };
    if items.is_empty() {
        return Some(false);
    }

    let mut saw_valid = false;
    for item in items {
        match compare_eq(actual, item, coercion) {
            Some(true) => return Some(true),
            Some(false) => saw_valid = true,
            None => {}
        }
    }

    saw_valid.then_some(false)
}
