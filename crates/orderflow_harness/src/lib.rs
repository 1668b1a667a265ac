//! Ephemeral SQLite fixtures for database-facing tests.
//!
//! Each test gets its own disposable, uniquely named in-memory database,
//! seeded declaratively before the test body runs. Query results are rendered
//! to canonical text so assertions are diffable snapshots instead of bespoke
//! object comparisons.

pub mod dump;
pub mod error;
pub mod seed;
pub mod session;

pub use dump::{render_value, DumpResult, NO_DATA_SENTINEL};
pub use error::{FixtureError, FixtureResult};
pub use seed::SeedStatement;
pub use session::DbFixture;
