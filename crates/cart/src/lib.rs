//! RocketShoes cart library.
//!
//! Client-side shopping cart state: add, remove and re-quantify products,
//! validated against live stock and persisted to a key-value store after
//! every change.
//!
//! # Example
//!
//! ```rust,no_run
//! use rocketshoes_cart::{CartConfig, CartManager, CatalogClient, FileStore, TracingNotifier};
//! use rocketshoes_core::ProductId;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::from_env()?;
//! let catalog = CatalogClient::new(&config.catalog)?;
//! let store = FileStore::new(&config.storage.dir);
//!
//! let mut cart = CartManager::load_with_key(catalog, store, TracingNotifier, &config.storage.key);
//! let updated = cart.add_product(ProductId::new(1)).await?;
//! assert_eq!(updated.amount_of(ProductId::new(1)), 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod notify;
pub mod storage;

pub use catalog::{Catalog, CatalogClient, CatalogError};
pub use config::{CartConfig, CatalogConfig, ConfigError, StorageConfig};
pub use error::{CartError, CartOperation, OUT_OF_STOCK_MESSAGE};
pub use manager::CartManager;
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use storage::{CART_KEY, FileStore, KeyValueStore, MemoryStore, StorageError};
