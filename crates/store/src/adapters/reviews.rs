//! Review store adapter.

use std::sync::Arc;

use chrono::Utc;

use ridegear_core::{ProductId, ReviewId};

use super::{decode, encode};
use crate::backend::StoreBackend;
use crate::entities::Review;
use crate::{stores, StoreError};

/// Fields required to create a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub author: String,
    pub rating: u8,
    pub body: String,
}

/// Adapter for the `reviews` object store.
#[derive(Clone)]
pub struct ReviewStore {
    backend: Arc<dyn StoreBackend>,
}

impl ReviewStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Reviews for one product, newest first.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, StoreError> {
        let mut reviews: Vec<Review> = self
            .backend
            .load(stores::REVIEWS)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<Review>, _>>()?
            .into_iter()
            .filter(|r| r.product_id == product_id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    /// Create a review. Ratings are clamped to the 1..=5 scale.
    ///
    /// # Errors
    ///
    /// Backend or serialization errors only.
    pub async fn create(&self, new: NewReview) -> Result<Review, StoreError> {
        let review = Review {
            id: ReviewId::generate(),
            product_id: new.product_id,
            author: new.author,
            rating: new.rating.clamp(1, 5),
            body: new.body,
            created_at: Utc::now(),
        };

        self.backend
            .put(stores::REVIEWS, &review.id.to_string(), encode(&review)?)
            .await?;
        Ok(review)
    }

    /// # Errors
    ///
    /// Backend errors only.
    pub async fn remove(&self, id: ReviewId) -> Result<bool, StoreError> {
        self.backend.remove(stores::REVIEWS, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn lists_only_the_requested_product() {
        let store = ReviewStore::new(Arc::new(MemoryBackend::new()));
        let product = ProductId::generate();
        let other = ProductId::generate();

        store
            .create(NewReview {
                product_id: product,
                author: "Sam".into(),
                rating: 5,
                body: "Great lid".into(),
            })
            .await
            .expect("create");
        store
            .create(NewReview {
                product_id: other,
                author: "Alex".into(),
                rating: 3,
                body: "Runs small".into(),
            })
            .await
            .expect("create");

        let reviews = store.list_for_product(product).await.expect("list");
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author, "Sam");
    }

    #[tokio::test]
    async fn ratings_clamp_to_scale() {
        let store = ReviewStore::new(Arc::new(MemoryBackend::new()));
        let review = store
            .create(NewReview {
                product_id: ProductId::generate(),
                author: "Sam".into(),
                rating: 9,
                body: "!!".into(),
            })
            .await
            .expect("create");
        assert_eq!(review.rating, 5);
    }
}
