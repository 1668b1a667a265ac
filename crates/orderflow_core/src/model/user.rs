//! User domain model and order-eligibility predicate.
//!
//! # Invariants
//! - `name` is stored exactly as fetched; eligibility is a read-only check,
//!   never a normalization.

use serde::{Deserialize, Serialize};

/// A user row fetched from the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether an order may be created for this user.
    ///
    /// A name qualifies when it is non-empty and contains no whitespace;
    /// padded or blank names are rejected rather than trimmed.
    pub fn is_orderable(&self) -> bool {
        !self.name.is_empty() && !self.name.contains(char::is_whitespace)
    }
}
