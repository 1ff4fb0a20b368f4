//! Command implementations.
//!
//! Every command builds a [`MarketClient`] over a [`JsonFileStorage`] so
//! the session survives between invocations, mirroring how a browser
//! storefront keeps its token in local storage.

pub mod auth;
pub mod cart;
pub mod products;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use market_client::config::ConfigError;
use market_client::storage::JsonFileStorage;
use market_client::{ApiError, ClientConfig, MarketClient};

const DEFAULT_SESSION_FILE: &str = "market-session.json";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded from the environment.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The command requires a session but none is active.
    #[error("not logged in; run `market auth login` first")]
    NotLoggedIn,
}

/// Where the session is persisted between invocations.
fn session_file() -> PathBuf {
    std::env::var("MARKET_SESSION_FILE")
        .map_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from)
}

/// Build a client with the persisted session restored.
pub(crate) fn client() -> Result<MarketClient, CliError> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env()?;
    let storage = Arc::new(JsonFileStorage::open(session_file()));
    Ok(MarketClient::new(&config, storage)?)
}

/// Build a client and fail early when no session is active.
pub(crate) fn authenticated_client() -> Result<MarketClient, CliError> {
    let client = client()?;
    if !client.session().is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }
    Ok(client)
}
