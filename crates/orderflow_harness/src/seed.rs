//! Seed statements queued for replay at connection open.
//!
//! # Invariants
//! - A `SeedStatement` is immutable once constructed.
//! - Queue order equals replay order, so later statements may depend on
//!   rows inserted by earlier ones.

use crate::dump::render_value;
use rusqlite::types::Value;
use std::fmt::{Display, Formatter};

/// One parameterized statement to apply before the test body runs.
#[derive(Debug, Clone)]
pub struct SeedStatement {
    sql: String,
    values: Vec<Value>,
}

impl SeedStatement {
    pub fn new(sql: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            sql: sql.into(),
            values: values.into_iter().collect(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Whether this statement is expected to change at least one row.
    ///
    /// DDL legitimately reports zero changed rows; data-modifying statements
    /// that report zero changes indicate a broken seed and must fail replay.
    pub fn expects_row_changes(&self) -> bool {
        let keyword = self
            .sql
            .trim_start()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        matches!(keyword.as_str(), "insert" | "update" | "delete" | "replace")
    }
}

impl Display for SeedStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [", self.sql)?;
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", render_value(value))?;
        }
        write!(f, "]")
    }
}
