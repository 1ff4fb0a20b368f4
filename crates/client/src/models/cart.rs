//! Cart types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use market_core::{ProductId, Quantity};

use super::Product;

/// A (product, quantity) pair within a cart.
///
/// The quantity is always a positive integer by construction; a product
/// appears in at most one line per cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// The referenced product, embedded by the backend.
    pub product: Product,
    /// How many units of the product.
    pub quantity: Quantity,
}

impl CartLineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * self.quantity.as_decimal()
    }
}

/// An ordered collection of cart lines.
///
/// Replaced wholesale with the server's canonical cart on every
/// successful round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines, in server order.
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

impl Cart {
    /// Sum of all line totals. Zero for an empty cart, and independent
    /// of line ordering.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart contains a line for `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product.id == product_id)
    }

    /// Quantity of `product_id` in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> Option<Quantity> {
        self.items
            .iter()
            .find(|item| &item.product.id == product_id)
            .map(|item| item.quantity)
    }
}
