//! Harness error taxonomy.
//!
//! # Responsibility
//! - Classify every fixture failure mode with maximal diagnostic context.
//! - Preserve the underlying driver error for chaining via `source()`.
//!
//! # Invariants
//! - Errors that concern a statement carry the statement text verbatim.
//! - Snapshot mismatches carry both full texts, never just a boolean.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Fatal fixture failure. None of these are retried or recovered.
#[derive(Debug)]
pub enum FixtureError {
    /// The isolated database could not be opened or configured.
    Connection {
        identity: String,
        url: String,
        source: rusqlite::Error,
    },
    /// A seed statement failed or changed no rows when it was expected to.
    /// `statement` is the rendered SQL plus its bound values.
    Seeding {
        statement: String,
        source: Option<rusqlite::Error>,
    },
    /// An operation was invoked out of lifecycle order.
    Precondition(&'static str),
    /// The session already failed during initialization; every later
    /// operation keeps failing with the original cause.
    SessionFailed { cause: String },
    /// A dump or snapshot query failed.
    Query {
        sql: String,
        source: rusqlite::Error,
    },
    /// Serialized table content differs from the expected literal.
    SnapshotMismatch { expected: String, actual: String },
}

impl Display for FixtureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection {
                identity,
                url,
                source,
            } => write!(
                f,
                "unable to open test database `{identity}` (url={url}): {source}"
            ),
            Self::Seeding { statement, source } => match source {
                Some(source) => write!(f, "error executing seed statement {statement}: {source}"),
                None => write!(f, "seed statement changed no rows: {statement}"),
            },
            Self::Precondition(message) => write!(f, "{message}"),
            Self::SessionFailed { cause } => {
                write!(f, "database session previously failed: {cause}")
            }
            Self::Query { sql, source } => write!(f, "unable to execute `{sql}`: {source}"),
            Self::SnapshotMismatch { expected, actual } => write!(
                f,
                "table snapshot mismatch\n--- expected ---\n{expected}\n--- actual ---\n{actual}"
            ),
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection { source, .. } => Some(source),
            Self::Seeding { source, .. } => source.as_ref().map(|err| err as &(dyn Error + 'static)),
            Self::Precondition(_) => None,
            Self::SessionFailed { .. } => None,
            Self::Query { source, .. } => Some(source),
            Self::SnapshotMismatch { .. } => None,
        }
    }
}
