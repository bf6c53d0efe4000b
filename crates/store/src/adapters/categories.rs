//! Category store adapter.

use std::sync::Arc;

use chrono::Utc;

use ridegear_core::slug::slugify;
use ridegear_core::CategoryId;

use super::{decode, encode};
use crate::backend::StoreBackend;
use crate::entities::Category;
use crate::{stores, StoreError};

/// Fields required to create a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent: Option<CategoryId>,
}

/// Partial update merged onto an existing category.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
    pub parent: Option<Option<CategoryId>>,
}

/// Adapter for the `categories` object store.
#[derive(Clone)]
pub struct CategoryStore {
    backend: Arc<dyn StoreBackend>,
}

impl CategoryStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// All categories, sorted by name.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self
            .backend
            .load(stores::CATEGORIES)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<_, _>>()?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        match self.backend.get(stores::CATEGORIES, &id.to_string()).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.list().await?.into_iter().find(|c| c.slug == slug))
    }

    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the derived slug is already taken.
    pub async fn create(&self, new: NewCategory) -> Result<Category, StoreError> {
        let slug = slugify(&new.name);
        if self.get_by_slug(&slug).await?.is_some() {
            return Err(StoreError::Conflict(format!("slug already exists: {slug}")));
        }

        let now = Utc::now();
        let category = Category {
            id: CategoryId::generate(),
            slug,
            name: new.name,
            description: new.description,
            image: new.image,
            parent: new.parent,
            created_at: now,
            updated_at: now,
        };

        self.backend
            .put(
                stores::CATEGORIES,
                &category.id.to_string(),
                encode(&category)?,
            )
            .await?;
        Ok(category)
    }

    /// # Errors
    ///
    /// `StoreError::NotFound` for an absent id, `StoreError::Conflict` when
    /// a renamed category's slug collides.
    pub async fn update(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category, StoreError> {
        let mut category = self.get(id).await?.ok_or(StoreError::NotFound)?;

        if let Some(name) = patch.name {
            let slug = slugify(&name);
            if slug != category.slug
                && let Some(other) = self.get_by_slug(&slug).await?
                && other.id != id
            {
                return Err(StoreError::Conflict(format!("slug already exists: {slug}")));
            }
            category.slug = slug;
            category.name = name;
        }
        if let Some(description) = patch.description {
            category.description = description;
        }
        if let Some(image) = patch.image {
            category.image = image;
        }
        if let Some(parent) = patch.parent {
            category.parent = parent;
        }
        category.updated_at = Utc::now();

        self.backend
            .put(stores::CATEGORIES, &id.to_string(), encode(&category)?)
            .await?;
        Ok(category)
    }

    /// Delete by id; referencing products keep their embedded copy.
    ///
    /// # Errors
    ///
    /// Backend errors only.
    pub async fn remove(&self, id: CategoryId) -> Result<bool, StoreError> {
        self.backend
            .remove(stores::CATEGORIES, &id.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn store() -> CategoryStore {
        CategoryStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn create_then_lookup_by_slug() {
        let store = store();
        let created = store
            .create(NewCategory {
                name: "Riding Jackets".into(),
                description: None,
                image: None,
                parent: None,
            })
            .await
            .expect("create");

        assert_eq!(created.slug, "riding-jackets");
        let fetched = store
            .get_by_slug("riding-jackets")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn rename_reslugifies() {
        let store = store();
        let created = store
            .create(NewCategory {
                name: "Gloves".into(),
                description: None,
                image: None,
                parent: None,
            })
            .await
            .expect("create");

        let updated = store
            .update(
                created.id,
                CategoryPatch {
                    name: Some("Summer Gloves".into()),
                    ..CategoryPatch::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.slug, "summer-gloves");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let err = store()
            .update(CategoryId::generate(), CategoryPatch::default())
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound));
    }
}
