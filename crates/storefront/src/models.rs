//! Session-scoped models and keys.

use serde::{Deserialize, Serialize};

use ridegear_core::{Email, UserId, UserRole};
use ridegear_store::entities::User;

/// Keys under which values are stored in the session.
pub mod session_keys {
    /// The current cart's id.
    pub const CART_ID: &str = "cart_id";
    /// The logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

/// The logged-in user, as carried in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
