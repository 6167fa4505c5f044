//! Remote catalog and stock service.
//!
//! # Endpoints
//!
//! - `GET {base}/products/{id}` - Product record
//! - `GET {base}/stock/{id}` - Units available
//!
//! # Caching
//!
//! Product records rarely change and are cached in-memory via `moka` with a
//! configurable TTL. Stock is never cached: every add or quantity change
//! checks the live value.

mod client;

pub use client::CatalogClient;

use std::future::Future;

use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Service returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of product records and live stock levels.
pub trait Catalog: Send + Sync {
    /// Fetch the catalog record for `id`.
    fn product(&self, id: ProductId)
    -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Fetch the current stock level for `id`.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send;
}

impl<T: Catalog> Catalog for &T {
    fn product(&self, id: ProductId)
    -> impl Future<Output = Result<Product, CatalogError>> + Send {
        (**self).product(id)
    }

    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CatalogError>> + Send {
        (**self).stock(id)
    }
}
