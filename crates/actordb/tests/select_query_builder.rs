mod fixtures;

use actordb::{
    db::source::field,
    prelude::*,
};
use fixtures::{IP_NAME, actor_store, identities, names};
use proptest::prelude::*;

#[test]
fn prefix_lookup_returns_matching_actors_in_name_order() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .user_name_prefix("Test")
        .order_by_name(OrderDirection::Asc)
        .limit(100)
        .caller("select_query_builder")
        .fetch_user_identities()
        .expect("prefix lookup should succeed");

    assert_eq!(
        identities(found),
        vec![
            (24, "TestUser".to_string(), 42),
            (25, "TestUser1".to_string(), 44),
        ]
    );
}

#[test]
fn prefix_lookup_honors_limit_after_sort() {
    let store = actor_store();

    let asc = store
        .new_select_query_builder()
        .user_name_prefix("Test")
        .order_by_name(OrderDirection::Asc)
        .limit(1)
        .fetch_user_identities()
        .expect("lookup should succeed");
    let desc = store
        .new_select_query_builder()
        .user_name_prefix("Test")
        .order_by_name(OrderDirection::Desc)
        .limit(1)
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(names(asc), vec!["TestUser"]);
    assert_eq!(names(desc), vec!["TestUser1"]);
}

#[test]
fn descending_prefix_lookup_reverses_order() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .user_name_prefix("Test")
        .order_by_name(OrderDirection::Desc)
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(names(found), vec!["TestUser1", "TestUser"]);
}

#[test]
fn unknown_prefix_yields_nothing() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .user_name_prefix("z_z_Z_Z_z_Z_z_z")
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(found.len(), 0);
}

#[test]
fn prefix_is_case_sensitive_and_literal() {
    let store = actor_store();

    let lower = store
        .new_select_query_builder()
        .user_name_prefix("test")
        .fetch_user_identities()
        .expect("lookup should succeed");
    let wildcard = store
        .new_select_query_builder()
        .user_name_prefix("Test%")
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(lower.len(), 0);
    assert_eq!(wildcard.len(), 0);
}

#[test]
fn user_ids_lookup_sorts_by_user_id() {
    let store = actor_store();

    let asc = store
        .new_select_query_builder()
        .user_ids([24u64, 25])
        .order_by_user_id(OrderDirection::Asc)
        .fetch_user_identities()
        .expect("lookup should succeed");
    let desc = store
        .new_select_query_builder()
        .user_ids(vec![24u64, 25])
        .order_by_user_id(OrderDirection::Desc)
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(names(asc), vec!["TestUser", "TestUser1"]);
    assert_eq!(names(desc), vec!["TestUser1", "TestUser"]);
}

#[test]
fn user_names_lookup_canonicalizes_ip_names() {
    let store = actor_store();
    let lowered = IP_NAME.to_lowercase();

    let found = store
        .new_select_query_builder()
        .user_names([IP_NAME, lowered.as_str(), "TestUser", "TestUser"])
        .order_by_name(OrderDirection::Asc)
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(
        identities(found),
        vec![
            (0, IP_NAME.to_string(), 43),
            (24, "TestUser".to_string(), 42),
        ]
    );
}

#[test]
fn user_names_do_not_fold_case_of_account_names() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .user_names("testuser")
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(found.len(), 0);
}

#[test]
fn single_identity_lookup_resolves_user_24() {
    let store = actor_store();

    let identity = store
        .new_select_query_builder()
        .user_ids(24u64)
        .fetch_user_identity()
        .expect("lookup should succeed")
        .expect("user 24 should exist");

    assert_eq!(identity, UserIdentity::new(24, "TestUser", 42));
    assert!(identity.is_registered());
}

#[test]
fn single_identity_lookup_without_match_is_none() {
    let store = actor_store();

    let identity = store
        .new_select_query_builder()
        .user_ids(999u64)
        .fetch_user_identity()
        .expect("lookup should succeed");

    assert_eq!(identity, None);
}

#[test]
fn name_lookup_by_actor_conditions() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .conds([(field::ACTOR_ID, Value::from_list([42u64, 44]))])
        .fetch_user_names()
        .expect("lookup should succeed");

    assert_eq!(found.into_vec(), vec!["TestUser", "TestUser1"]);
}

#[test]
fn registered_excludes_anonymous_actors() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .conds(Conds::new().in_list(field::ACTOR_ID, [42u64, 43]))
        .registered()
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(names(found), vec!["TestUser"]);
}

#[test]
fn anon_keeps_only_anonymous_actors() {
    let store = actor_store();

    let found = store
        .new_select_query_builder()
        .limit(100)
        .user_name_prefix("")
        .anon()
        .fetch_user_identities()
        .expect("lookup should succeed");

    assert_eq!(identities(found), vec![(0, IP_NAME.to_string(), 43)]);
}

#[test]
fn rebuilt_queries_return_identical_results() {
    let store = actor_store();
    let run = || {
        store
            .new_select_query_builder()
            .user_name_prefix("Test")
            .registered()
            .order_by_name(OrderDirection::Desc)
            .limit(5)
            .fetch_user_identities()
            .map(identities)
            .expect("lookup should succeed")
    };

    assert_eq!(run(), run());
}

#[test]
fn query_errors_render_their_cause() {
    let store = actor_store();

    let err = store
        .new_select_query_builder()
        .limit(0)
        .fetch_user_identities()
        .expect_err("zero limit should be rejected");

    assert_eq!(err.to_string(), "limit must be greater than zero");
}

fn ids_lookup(store: &MemoryActorStore, ids: &[u64]) -> Vec<u64> {
    let mut actors: Vec<u64> = store
        .new_select_query_builder()
        .user_ids(ids)
        .fetch_user_identities()
        .expect("lookup should succeed")
        .map(|identity| identity.actor_id())
        .collect();
    actors.sort_unstable();
    actors
}

proptest! {
    #[test]
    fn disjoint_id_sets_union(
        ids in proptest::sample::subsequence(vec![0u64, 24, 25, 26, 999], 0..=5),
        split in 0usize..=5,
    ) {
        let store = actor_store();
        let (a, b) = ids.split_at(split.min(ids.len()));

        let mut expected = ids_lookup(&store, a);
        expected.extend(ids_lookup(&store, b));
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(ids_lookup(&store, &ids), expected);
    }
}
