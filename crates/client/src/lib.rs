//! Market client SDK.
//!
//! A typed, async client for the market REST backend: session management
//! (login, register, logout), cart management, and the product catalog
//! including seller product management.
//!
//! # Architecture
//!
//! - The backend is the source of truth - every successful mutation replaces
//!   local state with the server's canonical response, never a partial merge
//! - The bearer token and identity are persisted through a narrow
//!   [`storage::StorageAdapter`] seam so core logic is testable without a
//!   real persistence backend
//! - The transport sits behind the [`api::MarketApi`] trait; [`api::RestApi`]
//!   is the `reqwest` implementation
//! - Product listings are cached in-memory via `moka` (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use market_client::{ClientConfig, MarketClient};
//! use market_client::storage::JsonFileStorage;
//!
//! let config = ClientConfig::from_env()?;
//! let storage = Arc::new(JsonFileStorage::open("session.json"));
//! let mut client = MarketClient::new(&config, storage)?;
//!
//! client.login("a@b.com", "secret").await?;
//! let products = client.catalog().list().await?;
//! client.cart_mut().add_item(&products[0].id, 2).await?;
//! tracing::info!("cart total: {}", client.cart().total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;

pub use client::MarketClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result, ValidationError};
