//! Session-scoped models and keys for the admin surface.

use serde::{Deserialize, Serialize};

use ridegear_core::{Email, UserId};
use ridegear_store::entities::User;

/// Keys under which values are stored in the admin session.
pub mod session_keys {
    /// The logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The logged-in admin, as carried in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

impl From<&User> for CurrentAdmin {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}
