//! Fetch → validate → store pipeline.
//!
//! # Responsibility
//! - Drive one pipeline run over injected repositories.
//!
//! # Invariants
//! - The service never bypasses the repository traits; any storage works.
//! - Users are processed in the order the source reports them.

use crate::model::Order;
use crate::repo::{OrderRepository, RepoResult, UserRepository};
use log::{debug, info};

/// One pipeline run: fetch users, keep the orderable ones, store one order
/// per kept user.
pub struct OrderPipeline<U, O> {
    users: U,
    orders: O,
}

impl<U: UserRepository, O: OrderRepository> OrderPipeline<U, O> {
    pub fn new(users: U, orders: O) -> Self {
        Self { users, orders }
    }

    /// Runs the pipeline and returns how many orders were stored.
    pub fn run(&self) -> RepoResult<usize> {
        let users = self.users.fetch_users()?;
        let fetched = users.len();

        let mut stored = 0;
        for user in &users {
            if !user.is_orderable() {
                debug!(
                    "event=pipeline_skip module=service reason=name_not_orderable name={:?}",
                    user.name
                );
                continue;
            }
            self.orders.save_order(&Order::for_user(user))?;
            stored += 1;
        }

        info!("event=pipeline_run module=service status=ok fetched={fetched} stored={stored}");
        Ok(stored)
    }
}
