//! Order store boundary.

use crate::model::Order;
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

const SAVE_ORDER_SQL: &str = "insert into orders (user_name) values (?1)";

/// Sink for derived orders.
pub trait OrderRepository {
    fn save_order(&self, order: &Order) -> RepoResult<()>;
}

/// SQLite-backed order sink.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn save_order(&self, order: &Order) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(SAVE_ORDER_SQL, [order.user_name.as_str()])
            .map_err(|source| RepoError::Query {
                sql: SAVE_ORDER_SQL,
                source,
            })?;

        if changed != 1 {
            return Err(RepoError::StoreRejected {
                sql: SAVE_ORDER_SQL,
                user_name: order.user_name.clone(),
            });
        }

        Ok(())
    }
}
