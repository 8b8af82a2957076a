use dailytracker_core::db::open_db_in_memory;
use dailytracker_core::{KeyValueStore, SqliteKeyValueStore};

#[test]
fn get_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(store.get("foodEntries").unwrap(), None);
}

#[test]
fn set_overwrites_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.set("hasSetupGoals", "false").unwrap();
    store.set("hasSetupGoals", "true").unwrap();

    assert_eq!(store.get("hasSetupGoals").unwrap().as_deref(), Some("true"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn remove_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.set("proteinGoal", "120").unwrap();
    store.remove("proteinGoal").unwrap();
    store.remove("proteinGoal").unwrap();

    assert_eq!(store.get("proteinGoal").unwrap(), None);
}
