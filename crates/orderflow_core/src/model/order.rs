//! Order domain model.

use crate::model::user::User;
use serde::{Deserialize, Serialize};

/// A derived order row written back to the backing store.
///
/// Orders reference users by name; the demonstration schema carries no
/// surrogate ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub user_name: String,
}

impl Order {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_name: user.name.clone(),
        }
    }
}
