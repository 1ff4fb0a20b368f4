//! Backend API contract.
//!
//! [`MarketApi`] describes the fixed request/response contract of the
//! market backend; [`RestApi`] is the production implementation over
//! `reqwest`. The stores are generic over the trait so their logic can be
//! exercised against an in-memory fake with the same merge semantics.
//!
//! # Endpoints
//!
//! - `POST /auth/login {email, password} -> {token, user}`
//! - `POST /auth/register {name, email, password, role, storeInfo?} -> {token, user}`
//! - `GET /auth/me -> user`
//! - `GET /cart -> Cart`
//! - `POST /cart/add {productId, quantity} -> Cart`
//! - `PUT /cart/update/:productId {quantity} -> Cart`
//! - `DELETE /cart/remove/:productId -> Cart`
//! - `DELETE /cart/clear -> Cart`
//! - `GET /products -> [Product]`
//! - `GET /products/my-store -> [Product]` (seller)
//! - `POST /products` / `PUT /products/:id` (multipart, seller)
//! - `DELETE /products/:id` (seller)

mod rest;

#[cfg(test)]
pub(crate) mod fake;

pub use rest::RestApi;

use std::future::Future;

use serde::Deserialize;

use market_core::{ProductId, Quantity};

use crate::error::Result;
use crate::models::{Cart, Identity, NewProduct, Product, ProductUpdate, RegisterProfile};

/// Body of a successful login or register call.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account.
    pub user: Identity,
}

/// The backend's request/response contract.
///
/// Implementations are cheap to clone (the REST implementation shares an
/// `Arc` internally) so each store can hold its own handle.
pub trait MarketApi: Clone + Send + Sync {
    /// `POST /auth/login`.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    /// `POST /auth/register`.
    fn register(
        &self,
        profile: &RegisterProfile,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    /// `GET /auth/me`.
    fn current_user(&self) -> impl Future<Output = Result<Identity>> + Send;

    /// `GET /cart`.
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart>> + Send;

    /// `POST /cart/add`. The backend merges quantities when the product
    /// is already in the cart.
    fn add_cart_item(
        &self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> impl Future<Output = Result<Cart>> + Send;

    /// `PUT /cart/update/:productId`. Sets the quantity exactly.
    fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: Quantity,
    ) -> impl Future<Output = Result<Cart>> + Send;

    /// `DELETE /cart/remove/:productId`.
    fn remove_cart_item(&self, product_id: &ProductId)
    -> impl Future<Output = Result<Cart>> + Send;

    /// `DELETE /cart/clear`.
    fn clear_cart(&self) -> impl Future<Output = Result<Cart>> + Send;

    /// `GET /products`.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// `GET /products/my-store`.
    fn my_store_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// `POST /products`.
    fn create_product(&self, product: &NewProduct) -> impl Future<Output = Result<Product>> + Send;

    /// `PUT /products/:id`.
    fn update_product(
        &self,
        product_id: &ProductId,
        update: &ProductUpdate,
    ) -> impl Future<Output = Result<Product>> + Send;

    /// `DELETE /products/:id`.
    fn delete_product(&self, product_id: &ProductId) -> impl Future<Output = Result<()>> + Send;
}
