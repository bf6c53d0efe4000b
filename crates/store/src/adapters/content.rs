//! Content block store adapter.

use std::sync::Arc;

use chrono::Utc;

use ridegear_core::slug::slugify;
use ridegear_core::ContentBlockId;

use super::{decode, encode};
use crate::backend::StoreBackend;
use crate::entities::ContentBlock;
use crate::{stores, StoreError};

/// Fields required to create a content block.
#[derive(Debug, Clone)]
pub struct NewContentBlock {
    pub title: String,
    pub body: String,
    pub published: bool,
}

/// Partial update merged onto an existing content block.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

/// Adapter for the `content_blocks` object store.
#[derive(Clone)]
pub struct ContentStore {
    backend: Arc<dyn StoreBackend>,
}

impl ContentStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// All content blocks, by title.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn list(&self) -> Result<Vec<ContentBlock>, StoreError> {
        let mut blocks: Vec<ContentBlock> = self
            .backend
            .load(stores::CONTENT_BLOCKS)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<_, _>>()?;
        blocks.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(blocks)
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get(&self, id: ContentBlockId) -> Result<Option<ContentBlock>, StoreError> {
        match self
            .backend
            .get(stores::CONTENT_BLOCKS, &id.to_string())
            .await?
        {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<ContentBlock>, StoreError> {
        Ok(self.list().await?.into_iter().find(|b| b.slug == slug))
    }

    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the derived slug is already taken.
    pub async fn create(&self, new: NewContentBlock) -> Result<ContentBlock, StoreError> {
        let slug = slugify(&new.title);
        if self.get_by_slug(&slug).await?.is_some() {
            return Err(StoreError::Conflict(format!("slug already exists: {slug}")));
        }

        let now = Utc::now();
        let block = ContentBlock {
            id: ContentBlockId::generate(),
            slug,
            title: new.title,
            body: new.body,
            published: new.published,
            created_at: now,
            updated_at: now,
        };

        self.backend
            .put(
                stores::CONTENT_BLOCKS,
                &block.id.to_string(),
                encode(&block)?,
            )
            .await?;
        Ok(block)
    }

    /// # Errors
    ///
    /// `StoreError::NotFound` for an absent id; `StoreError::Conflict` when
    /// a retitled block's slug collides.
    pub async fn update(
        &self,
        id: ContentBlockId,
        patch: ContentPatch,
    ) -> Result<ContentBlock, StoreError> {
        let mut block = self.get(id).await?.ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            let slug = slugify(&title);
            if slug != block.slug
                && let Some(other) = self.get_by_slug(&slug).await?
                && other.id != id
            {
                return Err(StoreError::Conflict(format!("slug already exists: {slug}")));
            }
            block.slug = slug;
            block.title = title;
        }
        if let Some(body) = patch.body {
            block.body = body;
        }
        if let Some(published) = patch.published {
            block.published = published;
        }
        block.updated_at = Utc::now();

        self.backend
            .put(stores::CONTENT_BLOCKS, &id.to_string(), encode(&block)?)
            .await?;
        Ok(block)
    }

    /// # Errors
    ///
    /// Backend errors only.
    pub async fn remove(&self, id: ContentBlockId) -> Result<bool, StoreError> {
        self.backend
            .remove(stores::CONTENT_BLOCKS, &id.to_string())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn create_then_lookup_by_slug() {
        let store = ContentStore::new(Arc::new(MemoryBackend::new()));
        store
            .create(NewContentBlock {
                title: "Shipping & Returns".into(),
                body: "# Shipping\nOrders ship in 2 days.".into(),
                published: true,
            })
            .await
            .expect("create");

        let block = store
            .get_by_slug("shipping-returns")
            .await
            .expect("lookup")
            .expect("present");
        assert!(block.published);
    }
}
