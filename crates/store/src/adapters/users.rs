//! User store adapter.
//!
//! Emails are the unique index. Role is set at create time: registration
//! paths always pass `Customer`; only the CLI mints admins.

use std::sync::Arc;

use chrono::Utc;

use ridegear_core::{Email, UserId, UserRole};

use super::{decode, encode};
use crate::backend::StoreBackend;
use crate::entities::User;
use crate::{stores, StoreError};

/// Fields required to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub name: String,
    pub role: UserRole,
}

/// Adapter for the `users` object store.
#[derive(Clone)]
pub struct UserStore {
    backend: Arc<dyn StoreBackend>,
}

impl UserStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// All users, oldest first.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self
            .backend
            .load(stores::USERS)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<_, _>>()?;
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        match self.backend.get(stores::USERS, &id.to_string()).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Unique-index lookup by email.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        Ok(self.list().await?.into_iter().find(|u| u.email == *email))
    }

    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email is already registered.
    pub async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        if self.get_by_email(&new.email).await?.is_some() {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            email: new.email,
            name: new.name,
            role: new.role,
            created_at: now,
            updated_at: now,
        };

        self.backend
            .put(stores::USERS, &user.id.to_string(), encode(&user)?)
            .await?;
        Ok(user)
    }

    /// # Errors
    ///
    /// Backend errors only.
    pub async fn remove(&self, id: UserId) -> Result<bool, StoreError> {
        self.backend.remove(stores::USERS, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn store() -> UserStore {
        UserStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn create_then_lookup_by_email() {
        let store = store();
        let email = Email::parse("rider@example.com").expect("valid");
        let created = store
            .create(NewUser {
                email: email.clone(),
                name: "Rider".into(),
                role: UserRole::Customer,
            })
            .await
            .expect("create");

        let fetched = store
            .get_by_email(&email)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = store();
        let new = NewUser {
            email: Email::parse("rider@example.com").expect("valid"),
            name: "Rider".into(),
            role: UserRole::Customer,
        };
        store.create(new.clone()).await.expect("create");
        let err = store.create(new).await.expect_err("duplicate");
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
