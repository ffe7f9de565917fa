use crate::{
    db::predicate::{
        ast::{ComparePredicate, Predicate},
        coercion::CoercionSpec,
    },
    value::Value,
};

///
/// Normalize a predicate into a canonical, deterministic form.
///
/// Normalization guarantees:
/// - Logical equivalence is preserved
/// - Nested AND / OR nodes are flattened
/// - Neutral elements are removed (True / False)
/// - Double negation is eliminated
/// - Child predicates are deterministically ordered
/// - Identical children collapse to one (AND/OR are idempotent)
/// - IN members are ordered and deduplicated; IN [] folds to False
///
/// Used for stable fingerprints and for predictable test behavior.
///
#[must_use]
pub fn normalize(predicate: &Predicate) -> Predicate {
    match predicate {
        Predicate::True => Predicate::True,
        Predicate::False => Predicate::False,

        Predicate::And(children) => normalize_and(children),
        Predicate::Or(children) => normalize_or(children),
        Predicate::Not(inner) => normalize_not(inner),

        Predicate::Compare(cmp) => normalize_compare(cmp),
    }
}

///
/// Normalize a comparison predicate.
///
/// Membership lists are sorted by canonical key and deduplicated.
///
fn normalize_compare(cmp: &ComparePredicate) -> Predicate {
    if !cmp.op.is_membership() {
        return Predicate::Compare(cmp.clone());
    }

    let Value::List(items) = &cmp.value else {
        return Predicate::Compare(cmp.clone());
    };

    if items.is_empty() {
        return Predicate::False;
    }

    let mut keyed: Vec<(Vec<u8>, Value)> = items
        .iter()
        .map(|item| (value_key(item), item.clone()))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);

    Predicate::Compare(ComparePredicate {
        field: cmp.field.clone(),
        op: cmp.op,
        value: Value::List(keyed.into_iter().map(|(_, item)| item).collect()),
        coercion: cmp.coercion.clone(),
    })
}

///
/// Normalize a NOT expression.
///
/// Eliminates double negation and folds constants:
///     NOT (NOT x)  →  x
///     NOT True     →  False
///
fn normalize_not(inner: &Predicate) -> Predicate {
    let normalized = normalize(inner);

    match normalized {
        Predicate::Not(double) => *double,
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        other => Predicate::Not(Box::new(other)),
    }
}

///
/// Normalize an AND expression.
///
/// Rules:
/// - AND(True, x)        → x
/// - AND(False, x)       → False
/// - AND(AND(a, b), c)   → AND(a, b, c)
/// - AND(x, x)           → x
/// - AND()               → True
///
fn normalize_and(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::True => {}
            Predicate::False => return Predicate::False,
            Predicate::And(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    finish_group(out, Predicate::True, Predicate::And)
}

///
/// Normalize an OR expression.
///
/// Rules:
/// - OR(False, x)       → x
/// - OR(True, x)        → True
/// - OR(OR(a, b), c)    → OR(a, b, c)
/// - OR(x, x)           → x
/// - OR()               → False
///
fn normalize_or(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::False => {}
            Predicate::True => return Predicate::True,
            Predicate::Or(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    finish_group(out, Predicate::False, Predicate::Or)
}

// Sort, dedupe and unwrap single-child groups.
fn finish_group(
    children: Vec<Predicate>,
    empty: Predicate,
    wrap: fn(Vec<Predicate>) -> Predicate,
) -> Predicate {
    let mut keyed: Vec<(Vec<u8>, Predicate)> = children
        .into_iter()
        .map(|child| (predicate_key(&child), child))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);

    let mut out: Vec<Predicate> = keyed.into_iter().map(|(_, child)| child).collect();
    match out.len() {
        0 => empty,
        1 => out.remove(0),
        _ => wrap(out),
    }
}

///
/// Generate a deterministic, length-prefixed key for a predicate.
///
/// Used for ordering, deduplication and plan fingerprints; never for display.
///
#[must_use]
pub(crate) fn predicate_key(predicate: &Predicate) -> Vec<u8> {
    let mut out = Vec::new();
    encode_predicate_key(&mut out, predicate);
    out
}

fn value_key(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_value_key(&mut out, value);
    out
}

const PRED_TRUE: u8 = 0x00;
const PRED_FALSE: u8 = 0x01;
const PRED_AND: u8 = 0x02;
const PRED_OR: u8 = 0x03;
const PRED_NOT: u8 = 0x04;
const PRED_COMPARE: u8 = 0x05;

// Encode predicate keys with length-prefixed segments to avoid collisions.
fn encode_predicate_key(out: &mut Vec<u8>, predicate: &Predicate) {
    match predicate {
        Predicate::True => out.push(PRED_TRUE),
        Predicate::False => out.push(PRED_FALSE),
        Predicate::And(children) => {
            out.push(PRED_AND);
            push_len(out, children.len());
            for child in children {
                push_predicate(out, child);
            }
        }
        Predicate::Or(children) => {
            out.push(PRED_OR);
            push_len(out, children.len());
            for child in children {
                push_predicate(out, child);
            }
        }
        Predicate::Not(inner) => {
            out.push(PRED_NOT);
            push_predicate(out, inner);
        }
        Predicate::Compare(cmp) => {
            out.push(PRED_COMPARE);
            push_str(out, &cmp.field);
            out.push(cmp.op.tag());
            push_value(out, &cmp.value);
            push_coercion(out, &cmp.coercion);
        }
    }
}

fn encode_value_key(out: &mut Vec<u8>, value: &Value) {
    out.push(value.tag());

    match value {
        Value::Null => {}
        Value::Bool(v) => out.push(u8::from(*v)),
        Value::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Uint(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Text(v) => push_str(out, v),
        Value::List(items) => {
            push_len(out, items.len());
            for item in items {
                push_value(out, item);
            }
        }
    }
}

fn push_predicate(out: &mut Vec<u8>, predicate: &Predicate) {
    let key = predicate_key(predicate);
    push_len(out, key.len());
    out.extend_from_slice(&key);
}

fn push_value(out: &mut Vec<u8>, value: &Value) {
    let key = value_key(value);
    push_len(out, key.len());
    out.extend_from_slice(&key);
}

fn push_coercion(out: &mut Vec<u8>, coercion: &CoercionSpec) {
    out.push(coercion.id.tag());
}

fn push_str(out: &mut Vec<u8>, s: &str) {
    push_len(out, s.len());
    out.extend_from_slice(s.as_bytes());
}

#[expect(clippy::cast_possible_truncation)]
fn push_len(out: &mut Vec<u8>, len: usize) {
    out.extend_from_slice(&(len as u32).to_be_bytes());
}
