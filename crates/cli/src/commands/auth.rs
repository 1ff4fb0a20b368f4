//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! market auth login -e a@b.com -p secret
//! market auth whoami
//! market auth logout
//! ```

use tracing::info;

use market_client::models::{RegisterProfile, StoreInfo};
use market_core::Role;

use super::{CliError, authenticated_client, client};

/// Seller store details collected from the command line.
pub struct StoreArgs {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Log in and persist the session.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    let mut client = client()?;
    let identity = client.login(email, password).await?;

    info!("Logged in as {} <{}>", identity.name, identity.email);
    if identity.is_seller() {
        info!("Seller account");
    }
    if let Some(error) = client.cart().last_error() {
        info!("Cart could not be loaded yet: {error}");
    } else if !client.cart().cart().is_empty() {
        info!("Your cart has {} item(s)", client.cart().cart().len());
    }
    Ok(())
}

/// Create an account and persist the resulting session.
pub async fn register(
    name: &str,
    email: &str,
    password: &str,
    seller: bool,
    store: StoreArgs,
) -> Result<(), CliError> {
    let store_info = seller.then(|| StoreInfo {
        name: store.name.unwrap_or_default(),
        description: None,
        phone: store.phone.unwrap_or_default(),
        address: store.address.unwrap_or_default(),
    });
    let profile = RegisterProfile {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: password.to_owned(),
        role: if seller { Role::Seller } else { Role::User },
        store_info,
    };

    let mut client = client()?;
    let identity = client.register(profile).await?;
    info!("Registered and logged in as {} <{}>", identity.name, identity.email);
    Ok(())
}

/// End the session. Safe to run while already logged out.
pub fn logout() -> Result<(), CliError> {
    let mut client = client()?;
    client.logout();
    info!("Logged out");
    Ok(())
}

/// Confirm the persisted session against the backend and show who it
/// belongs to. A stale token is cleared, so the next `login` starts
/// clean.
pub async fn whoami() -> Result<(), CliError> {
    let mut client = authenticated_client()?;
    let identity = client.session_mut().verify().await?;
    info!(
        "{} <{}> ({:?})",
        identity.name, identity.email, identity.role
    );
    Ok(())
}
