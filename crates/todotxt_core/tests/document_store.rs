use todotxt_core::db::migrations::latest_version;
use todotxt_core::db::{open_db, open_db_in_memory};
use todotxt_core::{Document, DocumentEvent, DocumentService, DocumentStore, SqliteDocumentStore};

#[test]
fn migrations_set_user_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(latest_version() >= 1);
}

#[test]
fn missing_document_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    assert_eq!(store.read_document("todo").unwrap(), None);
}

#[test]
fn write_then_read_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    store.write_document("todo", "Line1\nLine2").unwrap();
    assert_eq!(
        store.read_document("todo").unwrap().as_deref(),
        Some("Line1\nLine2")
    );

    store.write_document("todo", "replaced").unwrap();
    assert_eq!(
        store.read_document("todo").unwrap().as_deref(),
        Some("replaced")
    );
}

#[test]
fn documents_are_keyed_by_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::new(&conn);

    store.write_document("todo", "tasks").unwrap();
    store.write_document("done", "archive").unwrap();

    assert_eq!(store.read_document("todo").unwrap().as_deref(), Some("tasks"));
    assert_eq!(store.read_document("done").unwrap().as_deref(), Some("archive"));
}

#[test]
fn file_backed_store_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todotxt.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteDocumentStore::new(&conn);
        store.write_document("todo", "survives reopen").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteDocumentStore::new(&conn);
    assert_eq!(
        store.read_document("todo").unwrap().as_deref(),
        Some("survives reopen")
    );
}

#[test]
fn service_opens_missing_documents_as_a_single_empty_line() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentStore::new(&conn));

    let document = service.open("todo").unwrap();
    assert_eq!(document.len(), 1);
    assert_eq!(document.serialize(), "");
}

#[test]
fn service_persist_and_reload_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentStore::new(&conn));

    let mut document = Document::from_text("todo", "2014-01-01 first\nsecond");
    service.persist(&document).unwrap();

    let reloaded = service.open("todo").unwrap();
    assert_eq!(reloaded.serialize(), "2014-01-01 first\nsecond");

    // A reload overwrites unsaved edits unconditionally.
    document.load_text("scratch edits");
    let raw = service.load(&mut document).unwrap();
    assert_eq!(raw, "2014-01-01 first\nsecond");
    assert_eq!(document.serialize(), raw);
}

#[test]
fn archive_completed_removes_done_tasks_in_one_batch() {
    let conn = open_db_in_memory().unwrap();
    let service = DocumentService::new(SqliteDocumentStore::new(&conn));

    let mut document = Document::from_text(
        "todo",
        "x 2014-01-01 shipped\ncall mom\nX PAID RENT\nxylophone practice\nx done",
    );

    let events = service.archive_completed(&mut document);

    assert_eq!(document.serialize(), "call mom\nxylophone practice");
    match events.as_slice() {
        [DocumentEvent::LinesRemoved(removed)] => {
            let texts: Vec<&str> = removed.iter().map(|l| l.text()).collect();
            assert_eq!(texts, ["x 2014-01-01 shipped", "X PAID RENT", "x done"]);
        }
        other => panic!("expected a single removal event, got {other:?}"),
    }

    // Nothing left to archive: no event, document untouched.
    assert!(service.archive_completed(&mut document).is_empty());
    assert_eq!(document.serialize(), "call mom\nxylophone practice");
}
