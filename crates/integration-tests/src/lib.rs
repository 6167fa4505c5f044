//! Integration tests for RocketShoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! The catalog service is replaced by a `wiremock` server, so no external
//! service is needed. This crate's library holds the shared fixtures.

#![allow(clippy::missing_panics_doc)]

use rocketshoes_cart::{CatalogClient, CatalogConfig};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock catalog service.
pub struct MockCatalog {
    /// Underlying mock server.
    pub server: MockServer,
}

impl MockCatalog {
    /// Start a mock catalog on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Catalog configuration pointing at the mock server.
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(Url::parse(&self.server.uri()).expect("mock server URI is a valid URL"))
    }

    /// Catalog client pointing at the mock server.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.config()).expect("Failed to create catalog client")
    }

    /// Serve `GET /products/{id}` with a product record.
    pub async fn mount_product(&self, id: i32, title: &str, price: f64) {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "title": title,
                "price": price,
                "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /stock/{id}` with an available amount.
    pub async fn mount_stock(&self, id: i32, amount: i64) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "amount": amount,
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /stock/{id}` with a bare status code and a short body.
    pub async fn mount_stock_status(&self, id: i32, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/stock/{id}")))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server received for `request_path`.
    pub async fn hits(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == request_path)
            .count()
    }
}
