//! The top-level client facade.
//!
//! [`MarketClient`] owns one [`SessionStore`], one [`CartStore`] and one
//! [`CatalogClient`] over a shared API handle, and wires the cross-store
//! cascades: a successful login or registration pulls the server's cart,
//! logout resets it.

use std::sync::Arc;

use tracing::warn;

use crate::api::{MarketApi, RestApi};
use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::{ClientConfig, ConfigError};
use crate::error::Result;
use crate::models::{Identity, RegisterProfile};
use crate::session::SessionStore;
use crate::storage::StorageAdapter;

/// A complete storefront client: session, cart and catalog behind one
/// handle.
pub struct MarketClient<A: MarketApi = RestApi> {
    session: SessionStore<A>,
    cart: CartStore<A>,
    catalog: CatalogClient<A>,
}

impl MarketClient<RestApi> {
    /// Create a client backed by the REST API.
    ///
    /// A session persisted in `storage` by a previous run is restored.
    /// The cart is not fetched here; call [`Self::sync_cart`] when a
    /// fresh cart is needed before the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// constructed from this configuration.
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn StorageAdapter>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_api(RestApi::new(config, storage.clone())?, storage))
    }
}

impl<A: MarketApi> MarketClient<A> {
    /// Create a client over an arbitrary API implementation.
    #[must_use]
    pub fn with_api(api: A, storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            session: SessionStore::new(api.clone(), storage),
            cart: CartStore::new(api.clone()),
            catalog: CatalogClient::new(api),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in and pull the server's cart.
    ///
    /// When authentication succeeds but the cart fetch fails, the login
    /// stands; the failure is logged and left in the cart store's
    /// [`CartStore::last_error`].
    ///
    /// # Errors
    ///
    /// Propagates authentication errors from [`SessionStore::login`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.session.login(email, password).await?;
        if let Err(error) = self.cart.refresh(true).await {
            warn!(%error, "logged in but cart fetch failed");
        }
        Ok(identity)
    }

    /// Register a new account and pull the (empty) server cart.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`SessionStore::register`].
    pub async fn register(&mut self, profile: RegisterProfile) -> Result<Identity> {
        let identity = self.session.register(profile).await?;
        if let Err(error) = self.cart.refresh(true).await {
            warn!(%error, "registered but cart fetch failed");
        }
        Ok(identity)
    }

    /// End the session and drop the local cart.
    pub fn logout(&mut self) {
        self.session.logout();
        self.cart.reset();
    }

    /// Re-fetch the cart to match the current authentication state.
    ///
    /// # Errors
    ///
    /// Propagates backend errors; the previous cart is retained.
    pub async fn sync_cart(&mut self) -> Result<()> {
        let authenticated = self.session.is_authenticated();
        self.cart.refresh(authenticated).await
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore<A> {
        &self.session
    }

    /// The session store, mutably.
    pub const fn session_mut(&mut self) -> &mut SessionStore<A> {
        &mut self.session
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<A> {
        &self.cart
    }

    /// The cart store, mutably.
    pub const fn cart_mut(&mut self) -> &mut CartStore<A> {
        &mut self.cart
    }

    /// The catalog client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient<A> {
        &self.catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use rust_decimal::Decimal;

    use market_core::{ProductId, Role};

    use crate::api::fake::FakeApi;
    use crate::storage::MemoryStorage;

    fn setup() -> (FakeApi, Arc<MemoryStorage>, MarketClient<FakeApi>) {
        let storage = Arc::new(MemoryStorage::new());
        let api = FakeApi::new(storage.clone());
        api.seed_user("a@b.com", "secret", Role::User);
        api.seed_product("p1", "Headphones", 1000);
        let client = MarketClient::with_api(api.clone(), storage.clone());
        (api, storage, client)
    }

    #[tokio::test]
    async fn test_full_shopping_session() {
        let (_, _, mut client) = setup();

        let identity = client.login("a@b.com", "secret").await.unwrap();
        assert_eq!(identity.role, Role::User);
        assert!(client.session().is_authenticated());

        client
            .cart_mut()
            .add_item(&ProductId::new("p1"), 2)
            .await
            .unwrap();
        // 2 x 10.00
        assert_eq!(client.cart().total(), Decimal::new(2000, 2));

        client
            .cart_mut()
            .add_item(&ProductId::new("p1"), 3)
            .await
            .unwrap();
        // merged to 5 x 10.00
        assert_eq!(client.cart().items().len(), 1);
        assert_eq!(client.cart().total(), Decimal::new(5000, 2));

        client
            .cart_mut()
            .remove_item(&ProductId::new("p1"))
            .await
            .unwrap();
        assert_eq!(client.cart().total(), Decimal::ZERO);

        client.logout();
        assert!(!client.session().is_authenticated());
        assert!(client.cart().cart().is_empty());
    }

    #[tokio::test]
    async fn test_login_pulls_existing_server_cart() {
        let (api, storage, mut client) = setup();

        // A previous session left items in the server cart
        client.login("a@b.com", "secret").await.unwrap();
        client
            .cart_mut()
            .add_item(&ProductId::new("p1"), 2)
            .await
            .unwrap();
        client.logout();
        assert!(client.cart().cart().is_empty());

        let mut fresh = MarketClient::with_api(api.clone(), storage);
        fresh.login("a@b.com", "secret").await.unwrap();
        assert_eq!(fresh.cart().total(), Decimal::new(2000, 2));
    }

    #[tokio::test]
    async fn test_register_starts_with_empty_cart() {
        let (_, _, mut client) = setup();
        let profile = RegisterProfile {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            role: Role::User,
            store_info: None,
        };
        client.register(profile).await.unwrap();
        assert!(client.session().is_authenticated());
        assert!(client.cart().cart().is_empty());
    }

    #[tokio::test]
    async fn test_sync_cart_follows_authentication_state() {
        let (_, _, mut client) = setup();
        client.sync_cart().await.unwrap();
        assert!(client.cart().cart().is_empty());

        client.login("a@b.com", "secret").await.unwrap();
        client
            .cart_mut()
            .add_item(&ProductId::new("p1"), 1)
            .await
            .unwrap();
        client.sync_cart().await.unwrap();
        assert_eq!(client.cart().items().len(), 1);
    }
}
