//! Seed the store with catalog data from a YAML file.
//!
//! The file carries categories, products, coupons, and content blocks.
//! Everything is validated before the first write: category references
//! must resolve, prices must be non-negative, coupon kinds must be known.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use ridegear_core::slug::slugify;
use ridegear_core::{CouponKind, Money};
use ridegear_store::backend::{FileBackend, StoreBackend};
use ridegear_store::{
    CategoryStore, ContentStore, CouponStore, NewCategory, NewContentBlock, NewCoupon,
    NewProduct, ProductStore, stores,
};

/// The seed file's shape.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    categories: Vec<SeedCategory>,
    #[serde(default)]
    products: Vec<SeedProduct>,
    #[serde(default)]
    coupons: Vec<SeedCoupon>,
    #[serde(default)]
    content: Vec<SeedContent>,
}

#[derive(Debug, Deserialize)]
struct SeedCategory {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedProduct {
    title: String,
    brand: String,
    /// Category slug; must match one of the seeded categories.
    category: String,
    /// Cents.
    price: i64,
    #[serde(default)]
    compare_at_price: Option<i64>,
    #[serde(default)]
    stock: u32,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    variants: Vec<SeedVariant>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    specs: BTreeMap<String, String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    featured: bool,
}

#[derive(Debug, Deserialize)]
struct SeedVariant {
    name: String,
    options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SeedCoupon {
    code: String,
    kind: CouponKind,
    value: Decimal,
    #[serde(default = "default_true")]
    active: bool,
    #[serde(default)]
    scope: Option<String>,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SeedContent {
    title: String,
    body: String,
    #[serde(default = "default_true")]
    published: bool,
}

/// Validate the parsed seed file, returning every problem found.
fn validate(seed: &SeedFile) -> Vec<String> {
    let mut errors = Vec::new();

    let category_slugs: BTreeSet<String> =
        seed.categories.iter().map(|c| slugify(&c.name)).collect();
    if category_slugs.len() != seed.categories.len() {
        errors.push("duplicate category names".to_string());
    }

    for product in &seed.products {
        if !category_slugs.contains(&product.category) {
            errors.push(format!(
                "product '{}' references unknown category '{}'",
                product.title, product.category
            ));
        }
        if product.price < 0 {
            errors.push(format!("product '{}' has a negative price", product.title));
        }
    }

    let mut coupon_codes = BTreeSet::new();
    for coupon in &seed.coupons {
        if !coupon_codes.insert(coupon.code.to_uppercase()) {
            errors.push(format!("duplicate coupon code '{}'", coupon.code));
        }
        if coupon.value.is_sign_negative() {
            errors.push(format!("coupon '{}' has a negative value", coupon.code));
        }
    }

    errors
}

/// Remove every document from the catalog stores (not users or orders).
async fn clear_catalog(backend: &Arc<FileBackend>) -> Result<(), Box<dyn std::error::Error>> {
    for store in [
        stores::PRODUCTS,
        stores::CATEGORIES,
        stores::COUPONS,
        stores::CONTENT_BLOCKS,
    ] {
        let docs = backend.load(store).await?;
        for doc in &docs {
            if let Some(id) = doc.get("id").and_then(|v| v.as_str()) {
                backend.remove(store, id).await?;
            }
        }
        info!(store, cleared = docs.len(), "store cleared");
    }
    Ok(())
}

/// Seed the store from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, validation
/// fails, or any write fails.
pub async fn run(
    file_path: &str,
    data_dir: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");

    // Read and validate the YAML before touching the store
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(
        categories = seed.categories.len(),
        products = seed.products.len(),
        coupons = seed.coupons.len(),
        content = seed.content.len(),
        "Parsed seed file"
    );

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Seed validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let backend = Arc::new(FileBackend::open(data_dir).await?);
    info!(dir = %data_dir, "Opened data directory");

    if clear_existing {
        clear_catalog(&backend).await?;
    }

    let categories = CategoryStore::new(Arc::clone(&backend) as Arc<dyn StoreBackend>);
    let products = ProductStore::new(Arc::clone(&backend) as Arc<dyn StoreBackend>);
    let coupons = CouponStore::new(Arc::clone(&backend) as Arc<dyn StoreBackend>);
    let content_blocks = ContentStore::new(Arc::clone(&backend) as Arc<dyn StoreBackend>);

    let mut created = 0usize;
    let mut skipped = 0usize;

    for category in seed.categories {
        match categories
            .create(NewCategory {
                name: category.name,
                description: category.description,
                image: category.image,
                parent: None,
            })
            .await
        {
            Ok(_) => created += 1,
            Err(ridegear_store::StoreError::Conflict(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    for product in seed.products {
        let Some(category) = categories.get_by_slug(&product.category).await? else {
            // Validated above; a conflict-skipped category still resolves.
            continue;
        };
        match products
            .create(NewProduct {
                title: product.title,
                brand: product.brand,
                category,
                price: Money::from_cents(product.price),
                compare_at_price: product.compare_at_price.map(Money::from_cents),
                stock: product.stock,
                tags: product.tags,
                variants: product
                    .variants
                    .into_iter()
                    .map(|v| ridegear_store::entities::Variant {
                        name: v.name,
                        options: v.options,
                    })
                    .collect(),
                images: product.images,
                description: product.description,
                specs: product.specs,
                features: product.features,
                featured: product.featured,
            })
            .await
        {
            Ok(_) => created += 1,
            Err(ridegear_store::StoreError::Conflict(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    for coupon in seed.coupons {
        match coupons
            .create(NewCoupon {
                code: coupon.code,
                kind: coupon.kind,
                value: coupon.value,
                active: coupon.active,
                scope: coupon.scope,
            })
            .await
        {
            Ok(_) => created += 1,
            Err(ridegear_store::StoreError::Conflict(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    for block in seed.content {
        match content_blocks
            .create(NewContentBlock {
                title: block.title,
                body: block.body,
                published: block.published,
            })
            .await
        {
            Ok(_) => created += 1,
            Err(ridegear_store::StoreError::Conflict(_)) => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }

    info!("Seeding complete!");
    info!("  Records created: {created}");
    info!("  Records skipped (already exist): {skipped}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_catches_unknown_category_and_dup_codes() {
        let seed: SeedFile = serde_yaml::from_str(
            r"
categories:
  - name: Helmets
products:
  - title: Apex Pro Helmet
    brand: Vortex
    category: gloves
    price: 5999
coupons:
  - code: save10
    kind: fixed
    value: 1000
  - code: SAVE10
    kind: percent
    value: 10
",
        )
        .expect("parse");

        let errors = validate(&seed);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("unknown category"));
        assert!(errors[1].contains("duplicate coupon code"));
    }

    #[test]
    fn a_clean_seed_validates() {
        let seed: SeedFile = serde_yaml::from_str(
            r"
categories:
  - name: Helmets
products:
  - title: Apex Pro Helmet
    brand: Vortex
    category: helmets
    price: 5999
    stock: 4
coupons:
  - code: FREE20
    kind: percent
    value: 20
content:
  - title: About Us
    body: We sell gear.
",
        )
        .expect("parse");

        assert!(validate(&seed).is_empty());
    }
}
