//! Per-test database session lifecycle.
//!
//! # Responsibility
//! - Provision one isolated, uniquely named in-memory database per test.
//! - Replay queued seed statements and commit before the test body runs.
//! - Guarantee the connection is closed on every exit path.
//!
//! # Invariants
//! - The session moves through at most one transition: unopened to open on
//!   the first successful `connect()`, or unopened to failed when opening or
//!   seeding fails. Repeated `connect()` calls return the cached connection
//!   without re-seeding; a failed session keeps returning its original cause.
//! - While the session is open a transaction is always active, so `commit()`
//!   can always issue `COMMIT; BEGIN;`.
//! - The seed queue is consumed exactly once, in append order.

use crate::dump::DumpResult;
use crate::error::{FixtureError, FixtureResult};
use crate::seed::SeedStatement;
use log::{debug, error, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

enum SessionState {
    Unopened,
    Open(Connection),
    /// Opening or seeding failed; the rendered cause is replayed to every
    /// later call so a broken session can never hand out an unseeded database.
    Failed(String),
}

/// One disposable database per test: seeded declaratively, queried live,
/// snapshot-asserted, and torn down automatically on drop.
pub struct DbFixture {
    identity: String,
    options: Vec<(String, String)>,
    seeds: Vec<SeedStatement>,
    state: SessionState,
}

impl DbFixture {
    /// Creates an unopened session whose database is named after `identity`.
    ///
    /// The identity is sanitized to URI-safe characters; it appears in every
    /// log event so a test's database is trivially correlatable.
    pub fn new(identity: impl AsRef<str>) -> Self {
        Self {
            identity: sanitize_identity(identity.as_ref()),
            options: Vec::new(),
            seeds: Vec::new(),
            state: SessionState::Unopened,
        }
    }

    /// Creates a session named after the running test.
    ///
    /// The libtest runner names each test thread after the test path, which
    /// gives every test a deterministic, collision-free database identity.
    /// With `--test-threads=1` tests run on the main thread and all share the
    /// identity `main`; isolation still holds (each session opens a private
    /// in-memory database), but pass an explicit name via [`DbFixture::new`]
    /// when log correlation matters in that mode.
    pub fn for_current_test() -> Self {
        let current = std::thread::current();
        Self::new(current.name().unwrap_or("unnamed_test"))
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Appends an extra URI query parameter to the connection string.
    pub fn option(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Queues a parameterized seed statement. Must be called before
    /// `connect()`; statements registered afterwards are ignored with a
    /// warning, because the queue has already been replayed.
    pub fn seed(
        &mut self,
        sql: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        self.push_seed(SeedStatement::new(sql, values))
    }

    /// Queues a seed statement without bind parameters (typically DDL).
    pub fn seed_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.push_seed(SeedStatement::new(sql, std::iter::empty::<Value>()))
    }

    fn push_seed(&mut self, statement: SeedStatement) -> &mut Self {
        match self.state {
            SessionState::Unopened => self.seeds.push(statement),
            SessionState::Open(_) | SessionState::Failed(_) => warn!(
                "event=db_seed module=harness status=ignored db={} reason=registered_after_connect statement={}",
                self.identity, statement
            ),
        }
        self
    }

    /// Opens the session on first call and returns the cached connection on
    /// every call after that.
    ///
    /// First call: opens a private in-memory database under this session's
    /// identity, starts a transaction, replays the seed queue in append
    /// order, and commits the seeded state. If any step fails the whole
    /// session is failed: the error propagates, and every later call on the
    /// session keeps reporting it instead of handing out an unseeded
    /// database.
    pub fn connect(&mut self) -> FixtureResult<&Connection> {
        if matches!(self.state, SessionState::Unopened) {
            match self.open_and_seed() {
                Ok(conn) => {
                    debug!(
                        "event=db_connect module=harness status=ok db={}",
                        self.identity
                    );
                    self.state = SessionState::Open(conn);
                }
                Err(err) => {
                    error!(
                        "event=db_connect module=harness status=error db={} error={err}",
                        self.identity
                    );
                    self.state = SessionState::Failed(err.to_string());
                    return Err(err);
                }
            }
        }

        self.cached_connection()
    }

    fn open_and_seed(&mut self) -> FixtureResult<Connection> {
        let conn = self.open_database()?;
        self.replay_seeds(&conn)?;
        conn.execute_batch("COMMIT; BEGIN;")
            .map_err(|source| FixtureError::Query {
                sql: "COMMIT; BEGIN;".to_string(),
                source,
            })?;
        Ok(conn)
    }

    /// Commits the current transaction and starts the next one.
    pub fn commit(&mut self) -> FixtureResult<()> {
        let conn = self.cached_connection()?;
        debug!(
            "event=db_commit module=harness status=start db={}",
            self.identity
        );
        conn.execute_batch("COMMIT; BEGIN;")
            .map_err(|source| FixtureError::Query {
                sql: "COMMIT; BEGIN;".to_string(),
                source,
            })?;
        Ok(())
    }

    /// Runs `sql` and returns `"<sql>:\n"` followed by the canonical dump of
    /// its result. Connects lazily if the session is still unopened.
    pub fn dump_query(&mut self, sql: &str) -> FixtureResult<String> {
        self.connect()?;
        let conn = self.cached_connection()?;
        debug!(
            "event=dump_query module=harness status=start db={} sql={sql}",
            self.identity
        );
        let mut out = format!("{sql}:\n");
        out.push_str(&run_dump(conn, sql)?);
        Ok(out)
    }

    /// Snapshot assertion over whole tables: dumps `select * from <table>`
    /// for each table in the order given and compares the concatenated text
    /// against `expected`, ignoring trailing whitespace on both sides.
    ///
    /// On mismatch the returned error carries both full texts so they can be
    /// diffed directly.
    pub fn assert_table_content(&mut self, expected: &str, tables: &[&str]) -> FixtureResult<()> {
        self.connect()?;
        let conn = self.cached_connection()?;

        let mut actual = String::new();
        for table in tables {
            let sql = format!("select * from {table}");
            actual.push_str(&sql);
            actual.push_str(":\n");
            actual.push_str(&run_dump(conn, &sql)?);
            actual.push('\n');
        }

        if expected.trim_end() != actual.trim_end() {
            return Err(FixtureError::SnapshotMismatch {
                expected: expected.trim_end().to_string(),
                actual: actual.trim_end().to_string(),
            });
        }
        Ok(())
    }

    fn cached_connection(&self) -> FixtureResult<&Connection> {
        match &self.state {
            SessionState::Open(conn) => Ok(conn),
            SessionState::Unopened => {
                Err(FixtureError::Precondition("please call connect() first"))
            }
            SessionState::Failed(cause) => Err(FixtureError::SessionFailed {
                cause: cause.clone(),
            }),
        }
    }

    fn open_database(&self) -> FixtureResult<Connection> {
        let url = self.database_url();
        debug!(
            "event=db_connect module=harness status=start db={} url={url}",
            self.identity
        );

        let conn = Connection::open(&url).map_err(|source| FixtureError::Connection {
            identity: self.identity.clone(),
            url: url.clone(),
            source,
        })?;

        // Manual-commit discipline: keep a transaction open for the whole
        // session so seeded and test-written rows share commit boundaries.
        conn.execute_batch("BEGIN;")
            .map_err(|source| FixtureError::Connection {
                identity: self.identity.clone(),
                url,
                source,
            })?;

        Ok(conn)
    }

    fn replay_seeds(&mut self, conn: &Connection) -> FixtureResult<()> {
        let seeds = std::mem::take(&mut self.seeds);
        for statement in &seeds {
            debug!(
                "event=db_seed module=harness status=start db={} statement={statement}",
                self.identity
            );
            let changed = conn
                .execute(statement.sql(), params_from_iter(statement.values().iter()))
                .map_err(|source| FixtureError::Seeding {
                    statement: statement.to_string(),
                    source: Some(source),
                })?;

            if changed == 0 && statement.expects_row_changes() {
                return Err(FixtureError::Seeding {
                    statement: statement.to_string(),
                    source: None,
                });
            }
        }
        Ok(())
    }

    fn database_url(&self) -> String {
        let mut url = format!("file:{}?mode=memory", self.identity);
        for (key, value) in &self.options {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }
}

impl Drop for DbFixture {
    fn drop(&mut self) {
        if let SessionState::Open(conn) = std::mem::replace(&mut self.state, SessionState::Unopened)
        {
            // Uncommitted test writes are discarded with the transaction,
            // matching the disposable-database contract.
            match conn.close() {
                Ok(()) => debug!(
                    "event=db_close module=harness status=ok db={}",
                    self.identity
                ),
                Err((_, err)) => error!(
                    "event=db_close module=harness status=error db={} error={err}",
                    self.identity
                ),
            }
        }
    }
}

fn run_dump(conn: &Connection, sql: &str) -> FixtureResult<String> {
    let mut stmt = conn.prepare(sql).map_err(|source| FixtureError::Query {
        sql: sql.to_string(),
        source,
    })?;
    let dump = DumpResult::collect(&mut stmt).map_err(|source| FixtureError::Query {
        sql: sql.to_string(),
        source,
    })?;
    Ok(dump.render())
}

fn sanitize_identity(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "unnamed_test".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_identity;

    #[test]
    fn identity_is_uri_safe() {
        assert_eq!(
            sanitize_identity("fixture_lifecycle::connect_is_idempotent"),
            "fixture_lifecycle__connect_is_idempotent"
        );
        assert_eq!(sanitize_identity(""), "unnamed_test");
    }
}
