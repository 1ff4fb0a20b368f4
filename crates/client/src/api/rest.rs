//! REST implementation of the backend contract.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

use market_core::{ProductId, Quantity};

use crate::config::{ClientConfig, ConfigError};
use crate::error::{ApiError, Result};
use crate::models::{Cart, Identity, NewProduct, Product, ProductUpdate, RegisterProfile};
use crate::storage::{StorageAdapter, keys};

use super::{AuthResponse, MarketApi};

// =============================================================================
// RestApi
// =============================================================================

/// `reqwest`-backed implementation of [`MarketApi`].
///
/// The bearer token is read from the storage adapter on every request,
/// so a login performed through one handle is immediately visible to all
/// clones of it.
#[derive(Clone)]
pub struct RestApi {
    inner: Arc<RestApiInner>,
}

struct RestApiInner {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn StorageAdapter>,
}

impl RestApi {
    /// Create a new API handle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP client
    /// cannot be constructed from this configuration.
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn StorageAdapter>,
    ) -> std::result::Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(RestApiInner {
                http,
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                storage,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Build a request with the persisted bearer token attached, when
    /// one exists.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.inner.http.request(method, self.endpoint(path));
        if let Some(token) = self.inner.storage.get(keys::TOKEN) {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a request and decode the JSON body, classifying failures.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send_raw(request).await?;
        serde_json::from_str(&body).map_err(|error| {
            warn!(
                %error,
                body = %body.chars().take(200).collect::<String>(),
                "failed to decode response body"
            );
            ApiError::Parse(error)
        })
    }

    /// Send a request, keeping only the status classification.
    async fn send_unit(&self, request: RequestBuilder) -> Result<()> {
        self.send_raw(request).await.map(|_| ())
    }

    async fn send_raw(&self, request: RequestBuilder) -> Result<String> {
        // Send and body-read failures are both in-transit: the exchange
        // never completed
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth(error_message(&body)));
        }

        if !status.is_success() {
            warn!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }
}

/// Pull a display message out of an error body.
///
/// The backend answers errors with `{"message": "..."}`; anything else is
/// truncated and shown as-is.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| {
            let truncated: String = body.chars().take(200).collect();
            if truncated.is_empty() {
                "(no error details provided)".to_string()
            } else {
                truncated
            }
        },
        |parsed| parsed.message,
    )
}

// =============================================================================
// Request payloads
// =============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest<'a> {
    product_id: &'a ProductId,
    quantity: Quantity,
}

#[derive(Serialize)]
struct UpdateQuantityRequest {
    quantity: Quantity,
}

/// Build the multipart form the product endpoints expect.
fn new_product_form(product: &NewProduct) -> multipart::Form {
    let mut form = multipart::Form::new()
        .text("name", product.name.clone())
        .text("description", product.description.clone())
        .text("price", product.price.to_string());
    if let Some(image) = &product.image {
        form = form.text("image", image.clone());
    }
    if let Some(category) = &product.category {
        form = form.text("category", category.clone());
    }
    form
}

fn product_update_form(update: &ProductUpdate) -> multipart::Form {
    let mut form = multipart::Form::new();
    if let Some(name) = &update.name {
        form = form.text("name", name.clone());
    }
    if let Some(description) = &update.description {
        form = form.text("description", description.clone());
    }
    if let Some(price) = &update.price {
        form = form.text("price", price.to_string());
    }
    if let Some(image) = &update.image {
        form = form.text("image", image.clone());
    }
    if let Some(category) = &update.category {
        form = form.text("category", category.clone());
    }
    form
}

// =============================================================================
// MarketApi implementation
// =============================================================================

impl MarketApi for RestApi {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = self
            .request(Method::POST, "auth/login")
            .json(&LoginRequest { email, password });
        self.send(request).await
    }

    #[instrument(skip(self, profile), fields(email = %profile.email))]
    async fn register(&self, profile: &RegisterProfile) -> Result<AuthResponse> {
        let request = self.request(Method::POST, "auth/register").json(profile);
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Identity> {
        self.send(self.request(Method::GET, "auth/me")).await
    }

    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Cart> {
        self.send(self.request(Method::GET, "cart")).await
    }

    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    async fn add_cart_item(&self, product_id: &ProductId, quantity: Quantity) -> Result<Cart> {
        let request = self.request(Method::POST, "cart/add").json(&AddItemRequest {
            product_id,
            quantity,
        });
        self.send(request).await
    }

    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    async fn update_cart_item(&self, product_id: &ProductId, quantity: Quantity) -> Result<Cart> {
        let request = self
            .request(Method::PUT, &format!("cart/update/{product_id}"))
            .json(&UpdateQuantityRequest { quantity });
        self.send(request).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn remove_cart_item(&self, product_id: &ProductId) -> Result<Cart> {
        let request = self.request(Method::DELETE, &format!("cart/remove/{product_id}"));
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<Cart> {
        self.send(self.request(Method::DELETE, "cart/clear")).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.send(self.request(Method::GET, "products")).await
    }

    #[instrument(skip(self))]
    async fn my_store_products(&self) -> Result<Vec<Product>> {
        self.send(self.request(Method::GET, "products/my-store"))
            .await
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let request = self
            .request(Method::POST, "products")
            .multipart(new_product_form(product));
        self.send(request).await
    }

    #[instrument(skip(self, update), fields(product_id = %product_id))]
    async fn update_product(
        &self,
        product_id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product> {
        let request = self
            .request(Method::PUT, &format!("products/{product_id}"))
            .multipart(product_update_form(update));
        self.send(request).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn delete_product(&self, product_id: &ProductId) -> Result<()> {
        self.send_unit(self.request(Method::DELETE, &format!("products/{product_id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_message() {
        assert_eq!(
            error_message(r#"{"message":"Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(""), "(no error details provided)");
    }

    #[test]
    fn test_error_message_truncates_long_bodies() {
        let long = "x".repeat(1000);
        assert_eq!(error_message(&long).chars().count(), 200);
    }
}
