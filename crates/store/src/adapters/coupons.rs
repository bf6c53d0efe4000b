//! Coupon store adapter.
//!
//! Codes are normalized to uppercase on write and on lookup, so
//! `save10` and `SAVE10` name the same coupon.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use ridegear_core::{CouponId, CouponKind};

use super::{decode, encode};
use crate::backend::StoreBackend;
use crate::entities::Coupon;
use crate::{stores, StoreError};

/// Fields required to create a coupon.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub kind: CouponKind,
    pub value: Decimal,
    pub active: bool,
    pub scope: Option<String>,
}

/// Partial update merged onto an existing coupon.
#[derive(Debug, Clone, Default)]
pub struct CouponPatch {
    pub kind: Option<CouponKind>,
    pub value: Option<Decimal>,
    pub active: Option<bool>,
    pub scope: Option<Option<String>>,
}

/// Adapter for the `coupons` object store.
#[derive(Clone)]
pub struct CouponStore {
    backend: Arc<dyn StoreBackend>,
}

impl CouponStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// All coupons, newest first.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn list(&self) -> Result<Vec<Coupon>, StoreError> {
        let mut coupons: Vec<Coupon> = self
            .backend
            .load(stores::COUPONS)
            .await?
            .into_iter()
            .map(decode)
            .collect::<Result<_, _>>()?;
        coupons.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(coupons)
    }

    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get(&self, id: CouponId) -> Result<Option<Coupon>, StoreError> {
        match self.backend.get(stores::COUPONS, &id.to_string()).await? {
            Some(doc) => Ok(Some(decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Unique-index lookup by code, case-insensitive.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only; absence is `Ok(None)`.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError> {
        let code = code.to_uppercase();
        Ok(self.list().await?.into_iter().find(|c| c.code == code))
    }

    /// # Errors
    ///
    /// Returns `StoreError::Conflict` for a duplicate code.
    pub async fn create(&self, new: NewCoupon) -> Result<Coupon, StoreError> {
        let code = new.code.to_uppercase();
        if self.get_by_code(&code).await?.is_some() {
            return Err(StoreError::Conflict(format!("code already exists: {code}")));
        }

        let coupon = Coupon {
            id: CouponId::generate(),
            code,
            kind: new.kind,
            value: new.value,
            active: new.active,
            scope: new.scope,
            created_at: Utc::now(),
        };

        self.backend
            .put(stores::COUPONS, &coupon.id.to_string(), encode(&coupon)?)
            .await?;
        Ok(coupon)
    }

    /// # Errors
    ///
    /// `StoreError::NotFound` for an absent id.
    pub async fn update(&self, id: CouponId, patch: CouponPatch) -> Result<Coupon, StoreError> {
        let mut coupon = self.get(id).await?.ok_or(StoreError::NotFound)?;

        if let Some(kind) = patch.kind {
            coupon.kind = kind;
        }
        if let Some(value) = patch.value {
            coupon.value = value;
        }
        if let Some(active) = patch.active {
            coupon.active = active;
        }
        if let Some(scope) = patch.scope {
            coupon.scope = scope;
        }

        self.backend
            .put(stores::COUPONS, &id.to_string(), encode(&coupon)?)
            .await?;
        Ok(coupon)
    }

    /// # Errors
    ///
    /// Backend errors only.
    pub async fn remove(&self, id: CouponId) -> Result<bool, StoreError> {
        self.backend.remove(stores::COUPONS, &id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use ridegear_core::cart::Discount;
    use ridegear_core::Money;

    fn store() -> CouponStore {
        CouponStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn codes_are_uppercased_and_looked_up_case_insensitively() {
        let store = store();
        store
            .create(NewCoupon {
                code: "save10".into(),
                kind: CouponKind::Fixed,
                value: Decimal::from(1000),
                active: true,
                scope: None,
            })
            .await
            .expect("create");

        let coupon = store
            .get_by_code("Save10")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount(), Discount::Fixed(Money::from_cents(1000)));
    }

    #[tokio::test]
    async fn duplicate_code_conflicts() {
        let store = store();
        let new = NewCoupon {
            code: "FREE20".into(),
            kind: CouponKind::Percent,
            value: Decimal::from(20),
            active: true,
            scope: None,
        };
        store.create(new.clone()).await.expect("create");
        let err = store.create(new).await.expect_err("duplicate");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_code_is_none() {
        assert!(store()
            .get_by_code("NOPE")
            .await
            .expect("lookup")
            .is_none());
    }
}
