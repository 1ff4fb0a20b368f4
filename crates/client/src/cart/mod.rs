//! Cart store: the authenticated cart and its synchronization.
//!
//! The store holds the last known-good cart. Every mutation goes to the
//! backend and, on success, the server's canonical cart replaces local
//! state wholesale - there is no optimistic merge. On failure the error
//! propagates and the cart stays exactly as it was.
//!
//! Mutations are not serialized against each other: if two calls race,
//! whichever response resolves last wins. Dropping a future mid-request
//! simply discards the eventual response.

#[cfg(feature = "guest-cart")]
mod guest;

#[cfg(feature = "guest-cart")]
pub use guest::GuestCart;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use market_core::{ProductId, Quantity};

use crate::api::MarketApi;
use crate::error::{ApiError, Result, ValidationError};
use crate::models::{Cart, CartLineItem};

/// Owns the cart for the current session.
pub struct CartStore<A: MarketApi> {
    api: A,
    cart: Cart,
    last_error: Option<String>,
}

impl<A: MarketApi> CartStore<A> {
    /// Create an empty cart store.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            cart: Cart::default(),
            last_error: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current cart lines.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.cart.items
    }

    /// Sum of unit price times quantity over all lines; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Message of the most recent failure, for display.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Synchronize with the session's authentication state: load the
    /// server's cart when authenticated, reset to empty when anonymous.
    ///
    /// Invoked by the facade on every authentication transition.
    ///
    /// # Errors
    ///
    /// Propagates backend errors; the previous cart is retained.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self, authenticated: bool) -> Result<()> {
        if !authenticated {
            self.reset();
            return Ok(());
        }
        let result = self.api.fetch_cart().await;
        self.store(result)
    }

    /// Add `quantity` units of a product. The backend merges the
    /// quantity into an existing line when the product is already
    /// in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a zero quantity (no network
    /// call), otherwise propagates backend errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_item(&mut self, product_id: &ProductId, quantity: u32) -> Result<()> {
        let quantity = self.positive(quantity)?;
        let result = self.api.add_cart_item(product_id, quantity).await;
        self.store(result)
    }

    /// Set the quantity of an existing line exactly.
    ///
    /// Zero is rejected as invalid rather than treated as removal;
    /// removal is its own operation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a zero quantity (no network
    /// call), otherwise propagates backend errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> Result<()> {
        let quantity = self.positive(quantity)?;
        let result = self.api.update_cart_item(product_id, quantity).await;
        self.store(result)
    }

    /// Remove a product's line. A product that is not in the cart is a
    /// no-op, not an error, and no request is made.
    ///
    /// # Errors
    ///
    /// Propagates backend errors; the previous cart is retained.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_item(&mut self, product_id: &ProductId) -> Result<()> {
        if !self.cart.contains(product_id) {
            debug!("product not in cart, nothing to remove");
            return Ok(());
        }
        let result = self.api.remove_cart_item(product_id).await;
        self.store(result)
    }

    /// Empty the cart on the backend.
    ///
    /// # Errors
    ///
    /// Propagates backend errors; the previous cart is retained.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<()> {
        let result = self.api.clear_cart().await;
        self.store(result)
    }

    /// Drop local state without a round trip. Used on logout.
    pub fn reset(&mut self) {
        self.cart = Cart::default();
        self.last_error = None;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn positive(&mut self, quantity: u32) -> Result<Quantity> {
        Quantity::new(quantity).map_err(|e| {
            let error = ApiError::Validation(ValidationError::InvalidQuantity(e));
            self.last_error = Some(error.to_string());
            error
        })
    }

    /// Install the server's canonical cart, or record the failure and
    /// keep the last known-good state.
    fn store(&mut self, result: Result<Cart>) -> Result<()> {
        match result {
            Ok(cart) => {
                debug!(lines = cart.len(), "cart replaced with server state");
                self.cart = cart;
                self.last_error = None;
                Ok(())
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }
}
