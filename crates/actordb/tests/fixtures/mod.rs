use actordb::prelude::*;

pub const IP_NAME: &str = "2600:1004:B14A:5DDD:3EBE:BBA4:BFBA:F37E";

/// Registered `TestUser` (actor 42), an anonymous IPv6 actor (43) and
/// registered `TestUser1` (actor 44), inserted in that order.
pub fn actor_store() -> MemoryActorStore {
    let mut store = MemoryActorStore::new();
    for row in [
        ActorRow::new(42, 24, "TestUser"),
        ActorRow::anon(43, IP_NAME),
        ActorRow::new(44, 25, "TestUser1"),
    ] {
        store.insert(row).expect("fixture row should insert");
    }

    store
}

pub fn identities(found: UserIdentities) -> Vec<(u64, String, u64)> {
    found
        .map(|identity| (identity.id(), identity.name().to_string(), identity.actor_id()))
        .collect()
}

pub fn names(found: UserIdentities) -> Vec<String> {
    found.map(UserIdentity::into_name).collect()
}
