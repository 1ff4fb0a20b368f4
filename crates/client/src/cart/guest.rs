//! Purely local cart for anonymous sessions.

use rust_decimal::Decimal;

use market_core::{ProductId, Quantity};

use crate::error::ValidationError;
use crate::models::{Cart, CartLineItem, Product};

/// A cart that never talks to the backend.
///
/// Used when browsing anonymously: operations apply immediately against
/// full [`Product`] values, quantities obey the same invariants as the
/// authenticated cart, and nothing survives a restart. When the visitor
/// logs in, the server's cart takes over and this one is discarded.
#[derive(Debug, Default)]
pub struct GuestCart {
    cart: Cart,
}

impl GuestCart {
    /// Create an empty guest cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

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

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Add `quantity` units of `product`, merging into an existing line
    /// when the product is already present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantity`] for a zero quantity.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), ValidationError> {
        let quantity = Quantity::new(quantity)?;

        if let Some(item) = self
            .cart
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            let merged = item.quantity.get().saturating_add(quantity.get());
            item.quantity = Quantity::new(merged).unwrap_or(Quantity::ONE);
        } else {
            self.cart.items.push(CartLineItem {
                product: product.clone(),
                quantity,
            });
        }
        Ok(())
    }

    /// Set the quantity of an existing line exactly. A product that is
    /// not in the cart is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantity`] for a zero quantity.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ValidationError> {
        let quantity = Quantity::new(quantity)?;
        if let Some(item) = self
            .cart
            .items
            .iter_mut()
            .find(|item| &item.product.id == product_id)
        {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Remove a product's line; absent products are a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.cart
            .items
            .retain(|item| &item.product.id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.items.clear();
    }
}
