//! Product store adapter.
//!
//! The richest of the adapters: list filtering spans category, brand,
//! free-text search, featured flag, and a price window, with a fixed enum
//! of sort keys. The owning category is embedded into the product document
//! at write time.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use ridegear_core::slug::slugify;
use ridegear_core::{Money, ProductId};

use super::{contains_ignore_case, decode, encode, paginate, Page};
use crate::backend::StoreBackend;
use crate::entities::{Category, Product, Variant};
use crate::{stores, StoreError};

/// Sort keys for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
    Title,
}

/// Filter, sort, and pagination parameters for [`ProductStore::list`].
#[derive(Debug, Clone, Default)]
pub struct ProductListParams {
    /// Equality on the embedded category's slug.
    pub category: Option<String>,
    /// Equality on brand (case-insensitive).
    pub brand: Option<String>,
    /// Substring search over title, brand, and tags.
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub sort: ProductSort,
    pub offset: usize,
    pub limit: usize,
}

impl ProductListParams {
    /// Default page size when the caller passes zero.
    pub const DEFAULT_LIMIT: usize = 20;
}

/// Fields required to create a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub brand: String,
    /// Embedded as-is; the caller resolves the category first.
    pub category: Category,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub stock: u32,
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
    pub images: Vec<String>,
    pub description: String,
    pub specs: BTreeMap<String, String>,
    pub features: Vec<String>,
    pub featured: bool,
}

/// Partial update merged onto an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Money>,
    pub compare_at_price: Option<Option<Money>>,
    pub stock: Option<u32>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub variants: Option<Vec<Variant>>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub features: Option<Vec<String>>,
    pub featured: Option<bool>,
}

/// Adapter for the `products` object store.
#[derive(Clone)]
pub struct ProductStore {
    backend: Arc<dyn StoreBackend>,
}

impl ProductStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        self.backend
            .load(stores::PRODUCTS)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// List products matching `params`, sorted and paged.
    ///
    /// Never fails for empty stores or filters that match nothing.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails or a document is corrupt.
    pub async fn list(&self, params: &ProductListParams) -> Result<Page<Product>, StoreError> {
        let mut products: Vec<Product> = self
            .all()
            .await?
            .into_iter()
            .filter(|p| {
                params
                    .category
                    .as_ref()
                    .is_none_or(|slug| p.category.slug == *slug)
            })
            .filter(|p| {
                params
                    .brand
                    .as_ref()
                    .is_none_or(|brand| p.brand.eq_ignore_ascii_case(brand))
            })
            .filter(|p| params.featured.is_none_or(|featured| p.featured == featured))
            .filter(|p| params.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| params.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| {
                params.search.as_ref().is_none_or(|q| {
                    contains_ignore_case(&p.title, q)
                        || contains_ignore_case(&p.brand, q)
                        || p.tags.iter().any(|t| contains_ignore_case(t, q))
                })
            })
            .collect();

        match params.sort {
            ProductSort::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::PriceAsc => products.sort_by_key(|p| p.price),
            ProductSort::PriceDesc => {
                products.sort_by_key(|p| std::cmp::Reverse(p.price));
            }
            ProductSort::Rating => {
                products.sort_by(|a, b| {
                    b.rating
                        .partial_cmp(&a.rating)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            ProductSort::Title => products.sort_by(|a, b| a.title.cmp(&b.title)),
        }

        let limit = if params.limit == 0 {
            ProductListParams::DEFAULT_LIMIT
        } else {
            params.limit
        };
        Ok(paginate(products, params.offset, limit))
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        match self.backend.get(stores::PRODUCTS, &id.to_string()).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Unique-index lookup by slug.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.all().await?.into_iter().find(|p| p.slug == slug))
    }

    /// Create a product: assigns a generated id and a slug derived from the
    /// title, stamps timestamps.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the derived slug is already taken.
    pub async fn create(&self, new: NewProduct) -> Result<Product, StoreError> {
        let slug = slugify(&new.title);
        if self.get_by_slug(&slug).await?.is_some() {
            return Err(StoreError::Conflict(format!("slug already exists: {slug}")));
        }

        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            slug,
            title: new.title,
            brand: new.brand,
            category: new.category,
            price: new.price,
            compare_at_price: new.compare_at_price,
            stock: new.stock,
            rating: 0.0,
            review_count: 0,
            tags: new.tags,
            variants: new.variants,
            images: new.images,
            description: new.description,
            specs: new.specs,
            features: new.features,
            featured: new.featured,
            created_at: now,
            updated_at: now,
        };

        self.backend
            .put(stores::PRODUCTS, &product.id.to_string(), encode(&product)?)
            .await?;
        Ok(product)
    }

    /// Merge a partial patch onto an existing product. Re-slugifies when the
    /// title changes and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is absent, or
    /// `StoreError::Conflict` if a new title collides with another slug.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut product = self.get(id).await?.ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            let slug = slugify(&title);
            if slug != product.slug
                && let Some(other) = self.get_by_slug(&slug).await?
                && other.id != id
            {
                return Err(StoreError::Conflict(format!("slug already exists: {slug}")));
            }
            product.slug = slug;
            product.title = title;
        }
        if let Some(brand) = patch.brand {
            product.brand = brand;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(compare_at) = patch.compare_at_price {
            product.compare_at_price = compare_at;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(rating) = patch.rating {
            product.rating = rating;
        }
        if let Some(review_count) = patch.review_count {
            product.review_count = review_count;
        }
        if let Some(tags) = patch.tags {
            product.tags = tags;
        }
        if let Some(variants) = patch.variants {
            product.variants = variants;
        }
        if let Some(images) = patch.images {
            product.images = images;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(specs) = patch.specs {
            product.specs = specs;
        }
        if let Some(features) = patch.features {
            product.features = features;
        }
        if let Some(featured) = patch.featured {
            product.featured = featured;
        }
        product.updated_at = Utc::now();

        self.backend
            .put(stores::PRODUCTS, &id.to_string(), encode(&product)?)
            .await?;
        Ok(product)
    }

    /// Delete by id. Returns whether anything was deleted; no cascade.
    ///
    /// # Errors
    ///
    /// Backend errors only.
    pub async fn remove(&self, id: ProductId) -> Result<bool, StoreError> {
        self.backend.remove(stores::PRODUCTS, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::entities::Category;
    use ridegear_core::CategoryId;

    fn helmets() -> Category {
        let now = Utc::now();
        Category {
            id: CategoryId::generate(),
            slug: "helmets".into(),
            name: "Helmets".into(),
            description: None,
            image: None,
            parent: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_product(title: &str, price: i64) -> NewProduct {
        NewProduct {
            title: title.into(),
            brand: "Vortex".into(),
            category: helmets(),
            price: Money::from_cents(price),
            compare_at_price: None,
            stock: 10,
            tags: vec!["touring".into()],
            variants: vec![],
            images: vec![],
            description: String::new(),
            specs: BTreeMap::new(),
            features: vec![],
            featured: false,
        }
    }

    fn store() -> ProductStore {
        ProductStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn create_assigns_slug_and_round_trips_by_slug() {
        let store = store();
        let created = store
            .create(new_product("Apex Pro Helmet", 5999))
            .await
            .expect("create");

        assert_eq!(created.slug, "apex-pro-helmet");

        let fetched = store
            .get_by_slug("apex-pro-helmet")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, created.title);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = store();
        store
            .create(new_product("Apex Pro Helmet", 5999))
            .await
            .expect("create");

        let err = store
            .create(new_product("Apex Pro Helmet", 4999))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = store();
        let err = store
            .update(ProductId::generate(), ProductPatch::default())
            .await
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn update_reslugifies_on_title_change() {
        let store = store();
        let created = store
            .create(new_product("Apex Pro Helmet", 5999))
            .await
            .expect("create");

        let updated = store
            .update(
                created.id,
                ProductPatch {
                    title: Some("Apex Pro Helmet MK2".into()),
                    ..ProductPatch::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.slug, "apex-pro-helmet-mk2");
        assert!(store
            .get_by_slug("apex-pro-helmet")
            .await
            .expect("lookup")
            .is_none());
    }

    #[tokio::test]
    async fn list_filters_and_sorts() {
        let store = store();
        store
            .create(new_product("Cheap Lid", 2999))
            .await
            .expect("create");
        store
            .create(new_product("Mid Lid", 5999))
            .await
            .expect("create");
        store
            .create(new_product("Race Lid", 29_999))
            .await
            .expect("create");

        let page = store
            .list(&ProductListParams {
                sort: ProductSort::PriceAsc,
                ..ProductListParams::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 3);
        let prices: Vec<i64> = page.items.iter().map(|p| p.price.cents()).collect();
        assert_eq!(prices, vec![2999, 5999, 29_999]);

        let page = store
            .list(&ProductListParams {
                max_price: Some(Money::from_cents(6000)),
                ..ProductListParams::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 2);

        let page = store
            .list(&ProductListParams {
                search: Some("race".into()),
                ..ProductListParams::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn list_on_empty_store_returns_empty_page() {
        let page = store()
            .list(&ProductListParams::default())
            .await
            .expect("list");
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn pagination_slices_after_filtering() {
        let store = store();
        for i in 0..5 {
            store
                .create(new_product(&format!("Lid {i}"), 1000 + i))
                .await
                .expect("create");
        }

        let page = store
            .list(&ProductListParams {
                sort: ProductSort::Title,
                offset: 2,
                limit: 2,
                ..ProductListParams::default()
            })
            .await
            .expect("list");
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Lid 2");
    }
}
