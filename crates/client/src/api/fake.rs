//! In-memory fake backend for tests.
//!
//! Implements the same observable semantics as the real backend: bearer
//! tokens issued at login, auth-gated cart and seller endpoints, and
//! quantity merging on repeated adds.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use market_core::{Email, ProductId, Quantity, Role, UserId};
use rust_decimal::Decimal;

use crate::error::{ApiError, Result};
use crate::models::{
    Cart, CartLineItem, Identity, NewProduct, Product, ProductUpdate, RegisterProfile,
};
use crate::storage::{StorageAdapter, keys};

use super::{AuthResponse, MarketApi};

#[derive(Default)]
struct FakeState {
    /// email -> (password, identity)
    users: HashMap<String, (String, Identity)>,
    /// token -> user id
    sessions: HashMap<String, UserId>,
    carts: HashMap<UserId, Cart>,
    products: Vec<Product>,
    next_id: u32,
    /// Error injected into the next call, whatever it is.
    fail_next: Option<ApiError>,
}

/// Fake [`MarketApi`] sharing the storage adapter with the stores under
/// test, so token handling is exercised the same way as in production.
#[derive(Clone)]
pub(crate) struct FakeApi {
    state: Arc<Mutex<FakeState>>,
    storage: Arc<dyn StorageAdapter>,
}

impl FakeApi {
    pub(crate) fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
            storage,
        }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user directly, bypassing validation.
    pub(crate) fn seed_user(&self, email: &str, password: &str, role: Role) -> Identity {
        let mut state = self.state();
        state.next_id += 1;
        let identity = Identity {
            id: UserId::new(format!("u{}", state.next_id)),
            name: email.split('@').next().unwrap_or("user").to_owned(),
            email: Email::parse(email).unwrap_or_else(|_| panic!("seed email must be valid")),
            role,
            store_info: None,
        };
        state
            .users
            .insert(email.to_owned(), (password.to_owned(), identity.clone()));
        identity
    }

    /// Put a product into the catalog.
    pub(crate) fn seed_product(&self, id: &str, name: &str, price_cents: i64) -> Product {
        let product = Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: Decimal::new(price_cents, 2),
            image: None,
            category: None,
            seller: None,
            created_at: None,
        };
        self.state().products.push(product.clone());
        product
    }

    /// Make the next call fail with `error`, whatever the call is.
    pub(crate) fn fail_next(&self, error: ApiError) {
        self.state().fail_next = Some(error);
    }

    /// How many calls would currently be authenticated.
    pub(crate) fn session_count(&self) -> usize {
        self.state().sessions.len()
    }

    fn take_injected_failure(state: &mut FakeState) -> Result<()> {
        state.fail_next.take().map_or(Ok(()), Err)
    }

    fn authed_user(&self, state: &FakeState) -> Result<Identity> {
        let token = self
            .storage
            .get(keys::TOKEN)
            .ok_or_else(|| ApiError::Auth("No token provided".to_string()))?;
        let user_id = state
            .sessions
            .get(&token)
            .ok_or_else(|| ApiError::Auth("Invalid token".to_string()))?;
        state
            .users
            .values()
            .map(|(_, identity)| identity)
            .find(|identity| &identity.id == user_id)
            .cloned()
            .ok_or_else(|| ApiError::Auth("Invalid token".to_string()))
    }

    fn issue_token(state: &mut FakeState, user_id: UserId) -> String {
        state.next_id += 1;
        let token = format!("tok-{}", state.next_id);
        state.sessions.insert(token.clone(), user_id);
        token
    }
}

impl MarketApi for FakeApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;

        let identity = match state.users.get(email) {
            Some((stored, identity)) if stored == password => identity.clone(),
            _ => return Err(ApiError::Auth("Invalid credentials".to_string())),
        };
        let token = Self::issue_token(&mut state, identity.id.clone());
        Ok(AuthResponse {
            token,
            user: identity,
        })
    }

    async fn register(&self, profile: &RegisterProfile) -> Result<AuthResponse> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;

        if state.users.contains_key(&profile.email) {
            return Err(ApiError::Server {
                status: 409,
                message: "An account with this email already exists".to_string(),
            });
        }

        state.next_id += 1;
        let identity = Identity {
            id: UserId::new(format!("u{}", state.next_id)),
            name: profile.name.clone(),
            email: Email::parse(&profile.email)
                .map_err(|e| ApiError::Validation(e.into()))?,
            role: profile.role,
            store_info: profile.store_info.clone(),
        };
        state.users.insert(
            profile.email.clone(),
            (profile.password.clone(), identity.clone()),
        );
        let token = Self::issue_token(&mut state, identity.id.clone());
        Ok(AuthResponse {
            token,
            user: identity,
        })
    }

    async fn current_user(&self) -> Result<Identity> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        self.authed_user(&state)
    }

    async fn fetch_cart(&self) -> Result<Cart> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;
        Ok(state.carts.get(&identity.id).cloned().unwrap_or_default())
    }

    async fn add_cart_item(&self, product_id: &ProductId, quantity: Quantity) -> Result<Cart> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;

        let product = state
            .products
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Product not found".to_string(),
            })?;

        let cart = state.carts.entry(identity.id).or_default();
        if let Some(item) = cart
            .items
            .iter_mut()
            .find(|item| &item.product.id == product_id)
        {
            let merged = item.quantity.get().saturating_add(quantity.get());
            item.quantity = Quantity::new(merged).unwrap_or(Quantity::ONE);
        } else {
            cart.items.push(CartLineItem { product, quantity });
        }
        Ok(cart.clone())
    }

    async fn update_cart_item(&self, product_id: &ProductId, quantity: Quantity) -> Result<Cart> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;

        let cart = state.carts.entry(identity.id).or_default();
        let item = cart
            .items
            .iter_mut()
            .find(|item| &item.product.id == product_id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Item not in cart".to_string(),
            })?;
        item.quantity = quantity;
        Ok(cart.clone())
    }

    async fn remove_cart_item(&self, product_id: &ProductId) -> Result<Cart> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;

        let cart = state.carts.entry(identity.id).or_default();
        cart.items.retain(|item| &item.product.id != product_id);
        Ok(cart.clone())
    }

    async fn clear_cart(&self) -> Result<Cart> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;

        let cart = state.carts.entry(identity.id).or_default();
        cart.items.clear();
        Ok(cart.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        Ok(state.products.clone())
    }

    async fn my_store_products(&self) -> Result<Vec<Product>> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;
        Ok(state
            .products
            .iter()
            .filter(|p| p.seller.as_ref() == Some(&identity.id))
            .cloned()
            .collect())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;
        if !identity.is_seller() {
            return Err(ApiError::Server {
                status: 403,
                message: "Seller account required".to_string(),
            });
        }

        state.next_id += 1;
        let created = Product {
            id: ProductId::new(format!("p{}", state.next_id)),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            seller: Some(identity.id),
            created_at: None,
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        product_id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;

        let product = state
            .products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: "Product not found".to_string(),
            })?;
        if product.seller.as_ref() != Some(&identity.id) {
            return Err(ApiError::Server {
                status: 403,
                message: "Not your product".to_string(),
            });
        }

        if let Some(name) = &update.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &update.description {
            product.description.clone_from(description);
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(image) = &update.image {
            product.image = Some(image.clone());
        }
        if let Some(category) = &update.category {
            product.category = Some(category.clone());
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, product_id: &ProductId) -> Result<()> {
        let mut state = self.state();
        Self::take_injected_failure(&mut state)?;
        let identity = self.authed_user(&state)?;
        state
            .products
            .retain(|p| &p.id != product_id || p.seller.as_ref() != Some(&identity.id));
        Ok(())
    }
}
