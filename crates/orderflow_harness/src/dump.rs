//! Canonical text rendering of query results.
//!
//! # Responsibility
//! - Capture any tabular result as an explicit `DumpResult`, independent of
//!   domain types.
//! - Render it as a stable, locale-independent text block for diff-based
//!   assertions.
//!
//! # Invariants
//! - Equal inputs yield byte-identical output.
//! - Row order is the order reported by the query, never re-sorted.

use rusqlite::types::Value;
use rusqlite::Statement;
use std::fmt::Write as _;

/// Sentinel line emitted instead of rows when a result set is empty.
pub const NO_DATA_SENTINEL: &str = "*no data*";

/// In-memory form of one query result, built transiently and rendered
/// immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DumpResult {
    /// Runs the prepared statement and captures columns plus every row value.
    pub fn collect(stmt: &mut Statement<'_>) -> rusqlite::Result<Self> {
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        let column_count = columns.len();

        let mut rows = stmt.query([])?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(row.get::<_, Value>(index)?);
            }
            collected.push(values);
        }

        Ok(Self {
            columns,
            rows: collected,
        })
    }

    /// Renders the canonical text block: an uppercased header line, then one
    /// line per row, or the no-data sentinel when the result is empty.
    pub fn render(&self) -> String {
        let mut out = self
            .columns
            .iter()
            .map(|column| column.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(",");

        if self.rows.is_empty() {
            out.push('\n');
            out.push_str(NO_DATA_SENTINEL);
            return out;
        }

        for row in &self.rows {
            out.push('\n');
            for (index, value) in row.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&render_value(value));
            }
        }

        out
    }
}

/// Stable string form for each scalar the driver can report.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Integer(number) => number.to_string(),
        Value::Real(number) => number.to_string(),
        Value::Text(text) => text.clone(),
        Value::Blob(bytes) => {
            let mut rendered = String::with_capacity(bytes.len() * 2 + 3);
            rendered.push_str("x'");
            for byte in bytes {
                let _ = write!(rendered, "{byte:02x}");
            }
            rendered.push('\'');
            rendered
        }
    }
}
