//! Product catalog client.
//!
//! Read access to the public product list plus seller product
//! management. The public list is cached in-memory via `moka` with a
//! 5-minute TTL; seller views and mutations always hit the backend, and
//! every mutation invalidates the cached list.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use market_core::ProductId;

use crate::api::MarketApi;
use crate::error::Result;
use crate::models::{NewProduct, Product, ProductUpdate};

const LIST_KEY: &str = "products";
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Client for the product catalog.
pub struct CatalogClient<A: MarketApi> {
    api: A,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl<A: MarketApi> CatalogClient<A> {
    /// Create a catalog client.
    #[must_use]
    pub fn new(api: A) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CACHE_TTL)
            .build();
        Self { api, cache }
    }

    /// The public product list, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Propagates backend errors on a cache miss.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Arc<Vec<Product>>> {
        if let Some(products) = self.cache.get(LIST_KEY).await {
            debug!("cache hit for product list");
            return Ok(products);
        }

        let products = Arc::new(self.api.list_products().await?);
        self.cache.insert(LIST_KEY, Arc::clone(&products)).await;
        Ok(products)
    }

    /// A single product from the public list, if it exists.
    ///
    /// # Errors
    ///
    /// Propagates backend errors on a cache miss.
    pub async fn get(&self, product_id: &ProductId) -> Result<Option<Product>> {
        let products = self.list().await?;
        Ok(products.iter().find(|p| &p.id == product_id).cloned())
    }

    /// Products belonging to the authenticated seller. Never cached -
    /// sellers expect to see their own edits immediately.
    ///
    /// # Errors
    ///
    /// Propagates backend errors, including 401 when anonymous.
    #[instrument(skip(self))]
    pub async fn my_store(&self) -> Result<Vec<Product>> {
        self.api.my_store_products().await
    }

    /// Create a product (seller only).
    ///
    /// # Errors
    ///
    /// Returns a validation error for incomplete input (no network call),
    /// otherwise propagates backend errors.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        let created = self.api.create_product(product).await?;
        self.invalidate().await;
        Ok(created)
    }

    /// Update a product (seller only).
    ///
    /// # Errors
    ///
    /// Propagates backend errors.
    #[instrument(skip(self, update), fields(product_id = %product_id))]
    pub async fn update(&self, product_id: &ProductId, update: &ProductUpdate) -> Result<Product> {
        let updated = self.api.update_product(product_id, update).await?;
        self.invalidate().await;
        Ok(updated)
    }

    /// Delete a product (seller only).
    ///
    /// # Errors
    ///
    /// Propagates backend errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete(&self, product_id: &ProductId) -> Result<()> {
        self.api.delete_product(product_id).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Drop the cached product list.
    pub async fn invalidate(&self) {
        self.cache.invalidate(LIST_KEY).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use rust_decimal::Decimal;

    use market_core::Role;

    use crate::api::fake::FakeApi;
    use crate::error::{ApiError, ValidationError};
    use crate::session::SessionStore;
    use crate::storage::MemoryStorage;

    fn new_product(name: &str, cents: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "a thing".to_string(),
            price: Decimal::new(cents, 2),
            image: None,
            category: None,
        }
    }

    async fn seller_setup() -> (FakeApi, CatalogClient<FakeApi>) {
        let storage = Arc::new(MemoryStorage::new());
        let api = FakeApi::new(storage.clone());
        api.seed_user("s@b.com", "secret", Role::Seller);
        let mut session = SessionStore::new(api.clone(), storage);
        session.login("s@b.com", "secret").await.unwrap();
        (api.clone(), CatalogClient::new(api))
    }

    #[tokio::test]
    async fn test_list_is_cached_until_invalidated() {
        let (api, catalog) = seller_setup().await;
        api.seed_product("p1", "Headphones", 9999);

        let first = catalog.list().await.unwrap();
        assert_eq!(first.len(), 1);

        // Seeded behind the cache's back: still the cached view
        api.seed_product("p2", "Smartwatch", 19999);
        let cached = catalog.list().await.unwrap();
        assert_eq!(cached.len(), 1);

        catalog.invalidate().await;
        let fresh = catalog.list().await.unwrap();
        assert_eq!(fresh.len(), 2);
    }

    #[tokio::test]
    async fn test_create_validates_locally_first() {
        let (_, catalog) = seller_setup().await;
        let error = catalog
            .create(&new_product("", 9999))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ApiError::Validation(ValidationError::MissingField("name"))
        ));
    }

    #[tokio::test]
    async fn test_create_appears_in_list_and_my_store() {
        let (_, catalog) = seller_setup().await;
        let before = catalog.list().await.unwrap();
        assert!(before.is_empty());

        let created = catalog.create(&new_product("Laptop", 99900)).await.unwrap();
        assert_eq!(created.name, "Laptop");
        assert!(created.seller.is_some());

        // Mutation invalidated the cached (empty) list
        let list = catalog.list().await.unwrap();
        assert_eq!(list.len(), 1);
        let mine = catalog.my_store().await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_round_trip() {
        let (_, catalog) = seller_setup().await;
        let created = catalog.create(&new_product("Laptop", 99900)).await.unwrap();

        let update = ProductUpdate {
            price: Some(Decimal::new(89900, 2)),
            ..ProductUpdate::default()
        };
        let updated = catalog.update(&created.id, &update).await.unwrap();
        assert_eq!(updated.price, Decimal::new(89900, 2));
        assert_eq!(updated.name, "Laptop");

        catalog.delete(&created.id).await.unwrap();
        assert!(catalog.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_my_store_requires_authentication() {
        let storage = Arc::new(MemoryStorage::new());
        let api = FakeApi::new(storage);
        let catalog = CatalogClient::new(api);
        let error = catalog.my_store().await.unwrap_err();
        assert!(matches!(error, ApiError::Auth(_)));
    }
}
