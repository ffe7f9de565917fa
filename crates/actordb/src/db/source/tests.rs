use super::*;
use crate::{
    db::{
        predicate::{CoercionId, CompareOp, ComparePredicate},
        query::OrderDirection,
    },
    error::ErrorClass,
    test_fixtures::{IP_NAME, actor_store},
};

fn request<'a>(
    predicate: &'a Predicate,
    order: Option<&'a OrderSpec>,
    limit: Option<u32>,
) -> SelectRequest<'a> {
    SelectRequest {
        projection: Projection::Identity,
        predicate,
        order,
        limit,
        caller: "source::tests",
    }
}

fn names(rows: &[ActorRow]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

#[test]
fn unordered_select_follows_insertion_order() {
    let store = actor_store();

    let rows = store
        .select(&request(&Predicate::True, None, None))
        .expect("select should succeed");

    assert_eq!(names(&rows), vec!["TestUser", IP_NAME, "TestUser1"]);
}

#[test]
fn ordered_select_sorts_before_limiting() {
    let store = actor_store();
    let predicate = Predicate::starts_with(field::NAME, "Test");
    let desc = OrderSpec::single(field::NAME, OrderDirection::Desc);

    let rows = store
        .select(&request(&predicate, Some(&desc), Some(1)))
        .expect("select should succeed");

    assert_eq!(names(&rows), vec!["TestUser1"]);
}

#[test]
fn equal_sort_keys_keep_scan_order() {
    let mut store = MemoryActorStore::new();
    for (actor_id, name) in [(7, "Zed"), (3, "Amy"), (5, "Bob")] {
        store
            .insert(ActorRow::anon(actor_id, name))
            .expect("row should insert");
    }
    let by_user_id = OrderSpec::single(field::USER_ID, OrderDirection::Asc);

    let rows = store
        .select(&request(&Predicate::True, Some(&by_user_id), None))
        .expect("select should succeed");

    assert_eq!(names(&rows), vec!["Zed", "Amy", "Bob"]);
}

#[test]
fn names_projection_blanks_user_ids_and_extra_fields() {
    let mut store = MemoryActorStore::new();
    store
        .insert(ActorRow::new(9, 90, "Hidden").hidden())
        .expect("row should insert");
    let predicate = Predicate::True;
    let mut req = request(&predicate, None, None);
    req.projection = Projection::Names;

    let rows = store.select(&req).expect("select should succeed");

    assert_eq!(rows, vec![ActorRow::new(9, 0, "Hidden")]);
}

#[test]
fn extra_fields_are_visible_to_predicates() {
    let mut store = actor_store();
    store
        .insert(ActorRow::new(45, 26, "Ghost").hidden())
        .expect("row should insert");
    let predicate = Predicate::eq(field::HIDDEN, true);

    let rows = store
        .select(&request(&predicate, None, None))
        .expect("select should succeed");

    assert_eq!(names(&rows), vec!["Ghost"]);
}

#[test]
fn insert_rejects_duplicate_keys_and_names() {
    let mut store = actor_store();

    let dup_actor = store
        .insert(ActorRow::new(42, 99, "Other"))
        .expect_err("duplicate actor id should be rejected");
    let dup_name = store
        .insert(ActorRow::new(99, 99, "TestUser"))
        .expect_err("duplicate name should be rejected");
    let dup_user = store
        .insert(ActorRow::new(99, 24, "Other"))
        .expect_err("second actor for a user should be rejected");

    for err in [dup_actor, dup_name, dup_user] {
        assert!(err.is_conflict(), "unexpected error: {err:?}");
    }
    assert_eq!(store.len(), 3);
}

#[test]
fn insert_rejects_reserved_id_and_non_canonical_names() {
    let mut store = MemoryActorStore::new();

    let zero = store
        .insert(ActorRow::new(0, 1, "Zero"))
        .expect_err("actor id 0 should be rejected");
    let padded = store
        .insert(ActorRow::new(1, 1, " Padded"))
        .expect_err("untrimmed name should be rejected");
    let lower_ip = store
        .insert(ActorRow::anon(2, IP_NAME.to_lowercase()))
        .expect_err("lowercase IP should be rejected");

    for err in [zero, padded, lower_ip] {
        assert_eq!(err.class, ErrorClass::Unsupported);
    }
    assert!(store.is_empty());
}

#[test]
fn anonymous_actors_may_share_user_id_zero() {
    let mut store = MemoryActorStore::new();
    store
        .insert(ActorRow::anon(1, "10.0.0.1"))
        .expect("first anon should insert");
    store
        .insert(ActorRow::anon(2, "10.0.0.2"))
        .expect("second anon should insert");

    assert_eq!(store.get(2).map(|row| row.name.as_str()), Some("10.0.0.2"));
}

#[test]
fn conds_lower_lists_to_membership() {
    let conds = Conds::new()
        .eq(field::ACTOR_ID, 42u64)
        .in_list(field::USER_ID, [24u64, 25]);

    let predicates: Vec<_> = conds.into_predicates().collect();

    assert_eq!(
        predicates,
        vec![
            Predicate::Compare(ComparePredicate::with_coercion(
                field::ACTOR_ID,
                CompareOp::Eq,
                Value::Uint(42),
                CoercionId::NumericWiden,
            )),
            Predicate::Compare(ComparePredicate::with_coercion(
                field::USER_ID,
                CompareOp::In,
                Value::List(vec![Value::Uint(24), Value::Uint(25)]),
                CoercionId::NumericWiden,
            )),
        ]
    );
}

#[test]
fn signed_conds_match_unsigned_columns() {
    let store = actor_store();
    let predicate = Predicate::and(
        Conds::from([(field::ACTOR_ID, 44)])
            .into_predicates()
            .collect(),
    );

    let rows = store
        .select(&request(&predicate, None, None))
        .expect("select should succeed");

    assert_eq!(names(&rows), vec!["TestUser1"]);
}

#[test]
fn text_conds_stay_strict() {
    let store = actor_store();
    let predicate = Predicate::and(
        Conds::new()
            .eq(field::NAME, "testuser")
            .into_predicates()
            .collect(),
    );

    let rows = store
        .select(&request(&predicate, None, None))
        .expect("select should succeed");

    assert!(rows.is_empty());
}
