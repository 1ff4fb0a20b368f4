//! Domain types exchanged with the backend.
//!
//! These mirror the backend's JSON shapes (camelCase on the wire,
//! Mongo-style `_id` aliases accepted) while staying ergonomic on the
//! Rust side.

pub(crate) mod cart;
mod identity;
mod product;

pub use cart::{Cart, CartLineItem};
pub use identity::{Identity, RegisterProfile, StoreInfo};
pub use product::{NewProduct, Product, ProductUpdate};
