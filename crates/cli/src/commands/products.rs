//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! market products list
//! market products my-store
//! ```

use tracing::info;

use market_client::models::Product;

use super::{CliError, authenticated_client, client};

/// List the public catalog.
pub async fn list() -> Result<(), CliError> {
    let client = client()?;
    let products = client.catalog().list().await?;

    if products.is_empty() {
        info!("No products available");
        return Ok(());
    }
    for product in products.iter() {
        print_product(product);
    }
    Ok(())
}

/// List the authenticated seller's products.
pub async fn my_store() -> Result<(), CliError> {
    let client = authenticated_client()?;
    let products = client.catalog().my_store().await?;

    if products.is_empty() {
        info!("Your store has no products yet");
        return Ok(());
    }
    for product in &products {
        print_product(product);
    }
    Ok(())
}

fn print_product(product: &Product) {
    match &product.category {
        Some(category) => info!(
            "{}  {}  {} [{}]",
            product.id, product.name, product.price, category
        ),
        None => info!("{}  {}  {}", product.id, product.name, product.price),
    }
}
