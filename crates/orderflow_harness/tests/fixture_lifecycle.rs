use orderflow_harness::{DbFixture, FixtureError};
use rusqlite::types::Value;
use rusqlite::Connection;

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

const CREATE_USERS: &str = "create table users (name varchar(256))";
const INSERT_USER: &str = "insert into users (name) values (?1)";

fn user_count(conn: &Connection) -> i64 {
    conn.query_row("select count(*) from users", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn connect_returns_the_cached_connection_and_does_not_reseed() {
    let mut db = DbFixture::for_current_test();
    db.seed_sql(CREATE_USERS).seed(INSERT_USER, [text("valid")]);

    let first = db.connect().unwrap() as *const Connection;
    let second = db.connect().unwrap() as *const Connection;
    assert_eq!(first, second);

    // A replayed seed queue would have doubled the row.
    assert_eq!(user_count(db.connect().unwrap()), 1);
}

#[test]
fn commit_before_connect_is_a_precondition_error() {
    let mut db = DbFixture::for_current_test();
    let err = db.commit().unwrap_err();
    assert!(matches!(err, FixtureError::Precondition(_)));
    assert!(err.to_string().contains("connect()"));
}

#[test]
fn seed_statement_changing_no_rows_fails_connect() {
    let mut db = DbFixture::for_current_test();
    db.seed_sql(CREATE_USERS)
        .seed_sql("update users set name = 'renamed'");

    let err = db.connect().unwrap_err();
    assert!(matches!(err, FixtureError::Seeding { .. }));
    assert!(err.to_string().contains("update users set name = 'renamed'"));
}

#[test]
fn failed_seeding_poisons_the_session() {
    let mut db = DbFixture::for_current_test();
    db.seed_sql(CREATE_USERS)
        .seed_sql("update users set name = 'renamed'");

    let first = db.connect().unwrap_err();
    assert!(matches!(first, FixtureError::Seeding { .. }));

    // Reconnecting must keep failing with the original cause, never hand
    // back a fresh unseeded database.
    let second = db.connect().unwrap_err();
    assert!(matches!(second, FixtureError::SessionFailed { .. }));
    assert!(second
        .to_string()
        .contains("update users set name = 'renamed'"));

    let dump = db.dump_query("select * from users").unwrap_err();
    assert!(matches!(dump, FixtureError::SessionFailed { .. }));

    let commit = db.commit().unwrap_err();
    assert!(matches!(commit, FixtureError::SessionFailed { .. }));
}

#[test]
fn failing_seed_statement_reports_sql_and_values() {
    let mut db = DbFixture::for_current_test();
    db.seed(INSERT_USER, [text("valid")]); // the table was never created

    let err = db.connect().unwrap_err();
    let message = err.to_string();
    assert!(message.contains(INSERT_USER));
    assert!(message.contains("valid"));
    assert!(matches!(err, FixtureError::Seeding { source: Some(_), .. }));
}

#[test]
fn sessions_with_identical_seeds_are_isolated() {
    let mut first = DbFixture::new("isolation_first");
    let mut second = DbFixture::new("isolation_second");
    for db in [&mut first, &mut second] {
        db.seed_sql(CREATE_USERS).seed(INSERT_USER, [text("valid")]);
    }

    first
        .connect()
        .unwrap()
        .execute(INSERT_USER, ["only in first"])
        .unwrap();

    assert_eq!(user_count(first.connect().unwrap()), 2);
    assert_eq!(user_count(second.connect().unwrap()), 1);
}

#[test]
fn seeded_rows_come_back_in_insertion_order() {
    let mut db = DbFixture::for_current_test();
    db.seed_sql(CREATE_USERS)
        .seed(INSERT_USER, [text("first")])
        .seed(INSERT_USER, [text("second")])
        .seed(INSERT_USER, [text("third")]);

    let dump = db.dump_query("select * from users").unwrap();
    assert_eq!(
        dump,
        "select * from users:\nNAME\nfirst\nsecond\nthird"
    );
}

#[test]
fn seeds_registered_after_connect_are_ignored() {
    let mut db = DbFixture::for_current_test();
    db.seed_sql(CREATE_USERS);
    db.connect().unwrap();

    db.seed(INSERT_USER, [text("too late")]);
    assert_eq!(user_count(db.connect().unwrap()), 0);
}

#[test]
fn commit_keeps_the_session_usable() {
    let mut db = DbFixture::for_current_test();
    db.seed_sql(CREATE_USERS);

    db.connect()
        .unwrap()
        .execute(INSERT_USER, ["committed"])
        .unwrap();
    db.commit().unwrap();

    db.connect()
        .unwrap()
        .execute(INSERT_USER, ["after commit"])
        .unwrap();
    assert_eq!(user_count(db.connect().unwrap()), 2);
}

#[test]
fn identity_is_derived_from_the_running_test() {
    let db = DbFixture::for_current_test();
    assert!(db.identity().contains("identity_is_derived_from_the_running_test"));
}
