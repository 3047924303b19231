use pretty_assertions::assert_eq;
use sqlseed::{load, load_file, load_files, Dialect, Error};
use sqlseed_driver_sqlite::Sqlite;

const SCHEMA: &str = "CREATE TABLE some_table(
  id INT PRIMARY KEY NOT NULL,
  string_field CHAR(50) NOT NULL,
  boolean_field BOOL NOT NULL,
  created_at DATETIME,
  updated_at DATETIME
);

CREATE TABLE other_table(
  id INT PRIMARY KEY NOT NULL,
  int_field INT NOT NULL,
  boolean_field BOOL NOT NULL,
  created_at DATETIME,
  updated_at DATETIME
);

CREATE TABLE join_table(
  some_id INT NOT NULL,
  other_id INT NOT NULL,
  PRIMARY KEY(some_id, other_id)
);

CREATE TABLE string_key_table(
  id VARCHAR(50) PRIMARY KEY NOT NULL,
  created_at DATETIME,
  updated_at DATETIME
)";

const DOCUMENT: &str = r#"
---

- table: 'some_table'
  pk:
    id: 1
  fields:
    string_field: 'foobar'
    boolean_field: true
    created_at: 'ON_INSERT_NOW()'
    updated_at: 'ON_UPDATE_NOW()'

- table: 'other_table'
  pk:
    id: 2
  fields:
    int_field: 123
    boolean_field: false
    created_at: 'ON_INSERT_NOW()'
    updated_at: 'ON_UPDATE_NOW()'

- table: 'join_table'
  pk:
    some_id: 1
    other_id: 2

- table: 'string_key_table'
  pk:
    id: 'new_id'
  fields:
    created_at: 'ON_INSERT_NOW()'
    updated_at: 'ON_UPDATE_NOW()'
"#;

fn setup() -> Sqlite {
    let db = Sqlite::in_memory().unwrap();
    db.connection().execute_batch(SCHEMA).unwrap();
    db
}

fn count(db: &Sqlite, table: &str) -> i64 {
    db.connection()
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap()
}

fn timestamps(db: &Sqlite, table: &str) -> (Option<String>, Option<String>) {
    db.connection()
        .query_row(
            &format!("SELECT created_at, updated_at FROM {table} LIMIT 1"),
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap()
}

#[test]
fn loading_twice_is_idempotent() {
    let mut db = setup();

    load(DOCUMENT.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    for table in ["some_table", "other_table", "join_table", "string_key_table"] {
        assert_eq!(count(&db, table), 1, "{table} after first load");
    }

    let (string_field, boolean_field): (String, bool) = db
        .connection()
        .query_row(
            "SELECT string_field, boolean_field FROM some_table WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(string_field, "foobar");
    assert!(boolean_field);

    let (created, updated) = timestamps(&db, "some_table");
    let created_first = created.expect("created_at set on insert");
    assert_eq!(updated, None, "updated_at stays null on insert");

    load(DOCUMENT.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    for table in ["some_table", "other_table", "join_table", "string_key_table"] {
        assert_eq!(count(&db, table), 1, "{table} after second load");
    }

    let (created, updated) = timestamps(&db, "some_table");
    assert_eq!(created, Some(created_first), "created_at survives the update");
    assert!(updated.is_some(), "updated_at populates on update");
}

#[test]
fn update_rewrites_changed_fields() {
    let mut db = setup();
    load(DOCUMENT.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    let changed = r#"
- table: 'some_table'
  pk:
    id: 1
  fields:
    string_field: 'updated'
    boolean_field: false
"#;
    load(changed.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    let (string_field, boolean_field): (String, bool) = db
        .connection()
        .query_row(
            "SELECT string_field, boolean_field FROM some_table WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(string_field, "updated");
    assert!(!boolean_field);
    assert_eq!(count(&db, "some_table"), 1);
}

#[test]
fn composite_key_matches_on_both_columns() {
    let mut db = setup();
    load(DOCUMENT.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    let more = r#"
- table: 'join_table'
  pk:
    some_id: 1
    other_id: 2

- table: 'join_table'
  pk:
    some_id: 1
    other_id: 3
"#;
    load(more.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    // The (1, 2) row matched the existing one; only (1, 3) is new.
    assert_eq!(count(&db, "join_table"), 2);
}

#[test]
fn failing_row_rolls_back_the_whole_document() {
    let mut db = setup();

    let document = r#"
- table: 'some_table'
  pk:
    id: 1
  fields:
    string_field: 'foobar'
    boolean_field: true

- table: 'missing_table'
  pk:
    id: 1
"#;

    let err = load(document.as_bytes(), &mut db, Dialect::Sqlite).unwrap_err();
    match err {
        Error::Row { row, .. } => assert_eq!(row, 2),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(count(&db, "some_table"), 0, "first row rolled back");
}

#[test]
fn malformed_document_leaves_counts_unchanged() {
    let mut db = setup();
    load(DOCUMENT.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    let err = load(b"- table: [not, a, string", &mut db, Dialect::Sqlite).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));

    assert_eq!(count(&db, "some_table"), 1);
    assert_eq!(count(&db, "other_table"), 1);
}

#[test]
fn load_file_reports_the_missing_path() {
    let mut db = setup();

    let err = load_file("fixtures/no_such_file.yml", &mut db, Dialect::Sqlite).unwrap_err();

    match err {
        Error::File { ref path, .. } => assert_eq!(path, "fixtures/no_such_file.yml"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("fixtures/no_such_file.yml"));
}

#[test]
fn load_files_stops_at_the_first_failure() {
    let mut db = setup();

    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.yml");
    let third = dir.path().join("third.yml");
    std::fs::write(
        &first,
        "- table: 'some_table'\n  pk:\n    id: 1\n  fields:\n    string_field: 'foobar'\n    boolean_field: true\n",
    )
    .unwrap();
    std::fs::write(
        &third,
        "- table: 'other_table'\n  pk:\n    id: 2\n  fields:\n    int_field: 123\n    boolean_field: false\n",
    )
    .unwrap();

    let missing = dir.path().join("missing.yml");
    let paths = [first, missing.clone(), third];

    let err = load_files(&paths, &mut db, Dialect::Sqlite).unwrap_err();
    match err {
        Error::File { ref path, .. } => assert_eq!(path, &missing.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }

    // The first file committed before the failure; the third never ran.
    assert_eq!(count(&db, "some_table"), 1);
    assert_eq!(count(&db, "other_table"), 0);
}

#[test]
fn null_and_numeric_scalars_round_trip() {
    let mut db = setup();
    db.connection()
        .execute_batch("CREATE TABLE scalar_table(id INT PRIMARY KEY NOT NULL, num REAL, note TEXT)")
        .unwrap();

    let document = r#"
- table: 'scalar_table'
  pk:
    id: 7
  fields:
    num: 1.5
    note: ~
"#;
    load(document.as_bytes(), &mut db, Dialect::Sqlite).unwrap();

    let (num, note): (f64, Option<String>) = db
        .connection()
        .query_row("SELECT num, note FROM scalar_table WHERE id = 7", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(num, 1.5);
    assert_eq!(note, None);
}
