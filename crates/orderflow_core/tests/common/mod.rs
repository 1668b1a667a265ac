//! Shared test data, linking the integration tests to the unit tests: the
//! user the fetch tests prove readable is the same user the pipeline tests
//! prove processable and the store tests prove writable.
#![allow(dead_code)]

use orderflow_core::{Order, User};
use orderflow_harness::DbFixture;
use rusqlite::types::Value;

pub const CREATE_USERS: &str = "create table users (name varchar(256))";
pub const CREATE_ORDERS: &str = "create table orders (user_name varchar(256))";

pub fn valid_user() -> User {
    User::new("valid")
}

pub fn second_valid_user() -> User {
    User::new("valid2")
}

pub fn user_with_space() -> User {
    User::new("a b")
}

pub fn valid_order() -> Order {
    Order::for_user(&valid_user())
}

pub fn seed_user(db: &mut DbFixture, user: &User) {
    db.seed(
        "insert into users (name) values (?1)",
        [Value::Text(user.name.clone())],
    );
}

/// Renders users as one line each so mismatches show up in a text diff.
pub fn users_to_text(users: &[User]) -> String {
    users
        .iter()
        .map(|user| format!("name={}", user.name))
        .collect::<Vec<_>>()
        .join("\n")
}
