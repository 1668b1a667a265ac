//! User fetch boundary.

use crate::model::User;
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

const FETCH_USERS_SQL: &str = "select name from users";

/// Source of users for the pipeline.
pub trait UserRepository {
    /// Returns every user in the order the store reports them.
    fn fetch_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user source.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn fetch_users(&self) -> RepoResult<Vec<User>> {
        let query = || -> rusqlite::Result<Vec<User>> {
            let mut stmt = self.conn.prepare(FETCH_USERS_SQL)?;
            let mut rows = stmt.query([])?;
            let mut users = Vec::new();
            while let Some(row) = rows.next()? {
                users.push(User::new(row.get::<_, String>("name")?));
            }
            Ok(users)
        };

        query().map_err(|source| RepoError::Query {
            sql: FETCH_USERS_SQL,
            source,
        })
    }
}
