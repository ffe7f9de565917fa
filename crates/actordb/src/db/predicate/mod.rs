//! Module: db::predicate
//! Responsibility: predicate AST, coercion, row evaluation and normalization.
//! Does not own: query construction or source access.

mod ast;
pub mod coercion;
mod eval;
mod normalize;


pub use ast::{CompareOp, ComparePredicate, Predicate};
pub use coercion::{CoercionId, CoercionSpec};
pub use eval::{FieldPresence, Row, eval};
pub use normalize::normalize;
pub(crate) use normalize::predicate_key;
