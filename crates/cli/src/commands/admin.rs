//! Create admin users.
//!
//! Registration through the storefront always produces customers; this
//! command is the only path that mints an admin-role user.

use std::sync::Arc;

use tracing::info;

use ridegear_core::{Email, UserRole};
use ridegear_store::backend::{FileBackend, StoreBackend};
use ridegear_store::{NewUser, UserStore};

/// Create an admin user in the file-backed store.
///
/// # Errors
///
/// Returns an error if the email is invalid, already registered, or the
/// store cannot be opened.
pub async fn create_user(
    email: &str,
    name: &str,
    data_dir: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = Email::parse(email)?;

    let backend = Arc::new(FileBackend::open(data_dir).await?);
    let users = UserStore::new(backend as Arc<dyn StoreBackend>);

    let user = users
        .create(NewUser {
            email,
            name: name.to_string(),
            role: UserRole::Admin,
        })
        .await?;

    info!(id = %user.id, email = %user.email, "Admin user created");
    Ok(())
}
