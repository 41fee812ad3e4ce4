use diary_core::db::open_db_in_memory;
use diary_core::{
    DeleteOutcome, Entry, EntryListQuery, EntryRepository, EntryService, EntryServiceError,
    EntryValidationError, RepoError, SqliteEntryRepository,
};
use rusqlite::{params, Connection};
use std::collections::HashSet;

fn contents(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.content.as_str()).collect()
}

#[test]
fn single_created_entry_is_listed() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let created = service.create_entry("hello world").unwrap();

    let listed = service.list_descending().unwrap();
    assert_eq!(listed, vec![created]);
    assert_eq!(listed[0].content, "hello world");
}

#[test]
fn list_is_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    service.create_entry("alpha").unwrap();
    service.create_entry("beta").unwrap();

    assert_eq!(contents(&service.list_descending().unwrap()), ["beta", "alpha"]);
}

#[test]
fn timestamp_orders_first_and_insertion_breaks_ties() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let first = service.create_entry("first").unwrap();
    service.create_entry("second").unwrap();
    service.create_entry("third").unwrap();

    conn.execute("UPDATE entries SET timestamp = 1000;", []).unwrap();
    assert_eq!(
        contents(&service.list_descending().unwrap()),
        ["third", "second", "first"]
    );

    conn.execute(
        "UPDATE entries SET timestamp = 2000 WHERE uuid = ?1;",
        params![first.id.to_string()],
    )
    .unwrap();
    assert_eq!(
        contents(&service.list_descending().unwrap()),
        ["first", "third", "second"]
    );
}

#[test]
fn search_filters_by_substring() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    service.create_entry("foo bar").unwrap();
    service.create_entry("baz").unwrap();

    assert_eq!(contents(&service.search("foo").unwrap()), ["foo bar"]);
    assert!(service.search("zzz").unwrap().is_empty());
}

#[test]
fn search_is_ordered_subset_and_empty_query_lists_all() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    for content in ["rain today", "sunny", "rain again", "snow", "more rain"] {
        service.create_entry(content).unwrap();
    }

    let all = service.list_descending().unwrap();
    let rainy = service.search("rain").unwrap();
    let expected: Vec<Entry> = all
        .iter()
        .filter(|entry| entry.content.contains("rain"))
        .cloned()
        .collect();
    assert_eq!(rainy, expected);
    assert_eq!(service.search("").unwrap(), all);
}

#[test]
fn search_is_case_sensitive_and_literal() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    service.create_entry("Rust notes").unwrap();
    service.create_entry("100% done").unwrap();
    service.create_entry("snake_case").unwrap();
    service.create_entry("plain").unwrap();

    assert_eq!(contents(&service.search("Rust").unwrap()), ["Rust notes"]);
    assert!(service.search("rust").unwrap().is_empty());
    assert_eq!(contents(&service.search("%").unwrap()), ["100% done"]);
    assert_eq!(contents(&service.search("_").unwrap()), ["snake_case"]);
}

#[test]
fn empty_or_whitespace_content_is_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    service.create_entry("existing").unwrap();

    for content in ["", "   ", "\n\t"] {
        let err = service.create_entry(content).unwrap_err();
        assert!(matches!(
            err,
            EntryServiceError::InvalidEntry(EntryValidationError::EmptyContent)
        ));
    }

    assert_eq!(contents(&service.list_descending().unwrap()), ["existing"]);
}

#[test]
fn deleted_entry_disappears_from_list_and_search() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let keep = service.create_entry("keep this note").unwrap();
    let gone = service.create_entry("drop this note").unwrap();

    assert_eq!(service.delete_entry(&gone).unwrap(), DeleteOutcome::Deleted);

    assert_eq!(service.list_descending().unwrap(), vec![keep.clone()]);
    assert_eq!(service.search("note").unwrap(), vec![keep]);
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    assert!(repo.get_entry(gone.id).unwrap().is_none());
}

#[test]
fn deleting_twice_reports_already_deleted() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let entry = service.create_entry("short lived").unwrap();
    assert_eq!(service.delete_entry(&entry).unwrap(), DeleteOutcome::Deleted);
    assert_eq!(
        service.delete_entry(&entry).unwrap(),
        DeleteOutcome::AlreadyDeleted
    );
}

#[test]
fn repository_delete_of_missing_entry_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = Entry::new("never stored");
    let err = repo.delete_entry(entry.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == entry.id));
}

#[test]
fn identities_and_sequence_numbers_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let mut seen = HashSet::new();
    let mut last_seq = 0_i64;
    for round in 0..3 {
        let entry = service.create_entry(format!("round {round}")).unwrap();
        assert!(seen.insert(entry.id));
        let seq: i64 = conn
            .query_row(
                "SELECT seq FROM entries WHERE uuid = ?1;",
                [entry.id.to_string()],
                |row| row.get(0),
            )
            .unwrap();
        assert!(seq > last_seq);
        last_seq = seq;
        service.delete_entry(&entry).unwrap();
    }
}

#[test]
fn list_query_filter_matches_service_search() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    repo.create_entry(&Entry::new("morning walk")).unwrap();
    repo.create_entry(&Entry::new("evening read")).unwrap();

    let walks = repo
        .list_entries(&EntryListQuery::containing("walk"))
        .unwrap();
    assert_eq!(contents(&walks), ["morning walk"]);
    assert_eq!(repo.list_entries(&EntryListQuery::all()).unwrap().len(), 2);
}

#[test]
fn repository_requires_migrated_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteEntryRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("entries")));
}

#[test]
fn invalid_persisted_rows_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entries (uuid, content, timestamp) VALUES ('not-a-uuid', 'text', 0);",
        [],
    )
    .unwrap();

    let service = EntryService::new(SqliteEntryRepository::try_new(&conn).unwrap());
    let err = service.list_descending().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn entry_serializes_with_stable_field_names() {
    let entry = Entry::new("serialized");
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["content"], "serialized");
    assert_eq!(value["id"], entry.id.to_string());
    assert_eq!(value["timestamp"], entry.timestamp);

    let back: Entry = serde_json::from_value(value).unwrap();
    assert_eq!(back, entry);
}
