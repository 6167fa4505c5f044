//! Cart commands.
//!
//! Each invocation loads the cart from the file store, applies at most one
//! mutation, and prints the resulting cart. Notices go to stderr so stdout
//! stays a clean listing.
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Catalog service base URL
//! - `CART_STORAGE_DIR` - Directory holding the cart snapshot

use rocketshoes_cart::{
    CartConfig, CartError, CartManager, CatalogClient, CatalogError, ConfigError, FileStore,
    Notice, NoticeLevel, Notifier,
};
use rocketshoes_core::{Cart, ProductId};
use thiserror::Error;
use tracing::info;

/// Cart manager as wired by the CLI.
pub type CliCart = CartManager<CatalogClient, FileStore, ConsoleNotifier>;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog client could not be built.
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),

    /// The cart operation did not complete.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Prints notices to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stderr)]
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => eprintln!("{}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

/// Build the cart manager from environment configuration.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the HTTP client cannot be built.
pub fn open() -> Result<CliCart, CartCommandError> {
    let config = CartConfig::from_env()?;
    info!(
        catalog = %config.catalog.base_url,
        storage = %config.storage.dir.display(),
        "Opening cart"
    );

    let catalog = CatalogClient::new(&config.catalog)?;
    let store = FileStore::new(config.storage.dir);

    Ok(CartManager::load_with_key(
        catalog,
        store,
        ConsoleNotifier,
        config.storage.key,
    ))
}

/// Print the cart.
pub fn show(cart: &CliCart) {
    if cart.cart().is_empty() {
        ConsoleNotifier.notify(Notice::info("Your cart is empty"));
        return;
    }
    print_cart(cart.cart());
}

/// Add one unit of `product_id` and print the cart.
///
/// # Errors
///
/// Returns the cart error after its notice has been printed.
pub async fn add(cart: &mut CliCart, product_id: ProductId) -> Result<(), CartCommandError> {
    let updated = cart.add_product(product_id).await?;
    print_cart(updated);
    Ok(())
}

/// Remove `product_id` and print the cart.
///
/// # Errors
///
/// Returns the cart error after its notice has been printed.
pub fn remove(cart: &mut CliCart, product_id: ProductId) -> Result<(), CartCommandError> {
    let updated = cart.remove_product(product_id)?;
    print_cart(updated);
    Ok(())
}

/// Set the quantity of `product_id` and print the cart.
///
/// # Errors
///
/// Returns the cart error after its notice has been printed.
pub async fn update(
    cart: &mut CliCart,
    product_id: ProductId,
    amount: i64,
) -> Result<(), CartCommandError> {
    let updated = cart.update_product_amount(product_id, amount).await?;
    print_cart(updated);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    for line in render_cart(cart) {
        println!("{line}");
    }
}

/// Format the cart as printable lines: one per item, then the totals.
fn render_cart(cart: &Cart) -> Vec<String> {
    let mut lines: Vec<String> = cart
        .iter()
        .map(|item| {
            format!(
                "#{:<4} {:<40} {:>10} x {:<3} {:>10}",
                item.id(),
                item.product.title,
                item.product.price,
                item.amount,
                item.subtotal()
            )
        })
        .collect();

    lines.push(format!(
        "{} item(s), total {}",
        cart.item_count(),
        cart.total()
    ));
    lines
}

#[cfg(test)]
mod tests {
    use rocketshoes_core::{CartItem, Price, Product};

    use super::*;

    #[test]
    fn test_render_cart() {
        let cart = Cart::from(vec![
            CartItem::new(
                Product {
                    id: ProductId::new(1),
                    title: "Runner".to_string(),
                    price: Price::from_cents(10000),
                    image: String::new(),
                },
                2,
            ),
            CartItem::new(
                Product {
                    id: ProductId::new(2),
                    title: "Trail".to_string(),
                    price: Price::from_cents(5050),
                    image: String::new(),
                },
                1,
            ),
        ]);

        let lines = render_cart(&cart);

        assert_eq!(lines.len(), 3);
        assert!(lines.first().is_some_and(|l| l.starts_with("#1")));
        assert!(lines.first().is_some_and(|l| l.contains("$200.00")));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("3 item(s), total $250.50")
        );
    }
}
