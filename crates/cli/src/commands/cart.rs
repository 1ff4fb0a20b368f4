//! Cart commands.
//!
//! Every command synchronizes with the backend first, so the view always
//! reflects the server's canonical cart.
//!
//! # Usage
//!
//! ```bash
//! market cart show
//! market cart add <product-id> -q 2
//! market cart update <product-id> -q 5
//! market cart remove <product-id>
//! market cart clear
//! ```

use tracing::info;

use market_client::MarketClient;
use market_core::ProductId;

use super::{CliError, authenticated_client};

/// Show the cart and its total.
pub async fn show() -> Result<(), CliError> {
    let mut client = authenticated_client()?;
    client.sync_cart().await?;
    print_cart(&client);
    Ok(())
}

/// Add units of a product, merging with any existing line.
pub async fn add(product_id: &str, quantity: u32) -> Result<(), CliError> {
    let mut client = authenticated_client()?;
    client.sync_cart().await?;
    client
        .cart_mut()
        .add_item(&ProductId::new(product_id), quantity)
        .await?;
    print_cart(&client);
    Ok(())
}

/// Set the quantity of a product already in the cart.
pub async fn update(product_id: &str, quantity: u32) -> Result<(), CliError> {
    let mut client = authenticated_client()?;
    client.sync_cart().await?;
    client
        .cart_mut()
        .update_quantity(&ProductId::new(product_id), quantity)
        .await?;
    print_cart(&client);
    Ok(())
}

/// Remove a product's line from the cart.
pub async fn remove(product_id: &str) -> Result<(), CliError> {
    let mut client = authenticated_client()?;
    client.sync_cart().await?;
    client
        .cart_mut()
        .remove_item(&ProductId::new(product_id))
        .await?;
    print_cart(&client);
    Ok(())
}

/// Empty the cart.
pub async fn clear() -> Result<(), CliError> {
    let mut client = authenticated_client()?;
    client.cart_mut().clear().await?;
    info!("Cart cleared");
    Ok(())
}

fn print_cart(client: &MarketClient) {
    let cart = client.cart().cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }
    for item in &cart.items {
        info!(
            "{}  {} x{} = {}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.line_total()
        );
    }
    info!("Total: {}", client.cart().total());
}
