//! Order pipeline core: fetch users, validate, store derived orders.
//!
//! The pipeline is deliberately small glue over SQLite; its tests lean on
//! `orderflow_harness` for disposable, seeded databases and snapshot
//! assertions.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::init_logging;
pub use model::{Order, User};
pub use repo::{
    OrderRepository, RepoError, RepoResult, SqliteOrderRepository, SqliteUserRepository,
    UserRepository,
};
pub use service::OrderPipeline;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
