//! Persistence boundary for the order pipeline.
//!
//! # Responsibility
//! - Keep SQL details behind repository traits so the pipeline stays
//!   storage-agnostic and trivially testable.
//!
//! # Invariants
//! - Error messages always carry the SQL that failed.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod order_repo;
pub mod user_repo;

pub use order_repo::{OrderRepository, SqliteOrderRepository};
pub use user_repo::{SqliteUserRepository, UserRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure with the offending statement attached.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Query {
        sql: &'static str,
        source: rusqlite::Error,
    },
    /// The insert executed but did not change exactly one row.
    StoreRejected {
        sql: &'static str,
        user_name: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Query { sql, source } => write!(f, "unable to query database: {sql}: {source}"),
            Self::StoreRejected { sql, user_name } => write!(
                f,
                "unable to store order in database\nsql: {sql}\nuser_name: {user_name}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Query { source, .. } => Some(source),
            Self::StoreRejected { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}
