//! Integration tests for the catalog HTTP client.

use rocketshoes_cart::CatalogError;
use rocketshoes_core::{Price, ProductId};
use rocketshoes_integration_tests::MockCatalog;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_get_product_decodes_record() {
    let catalog = MockCatalog::start().await;
    catalog.mount_product(1, "Tênis de Caminhada Leve Confortável", 179.9).await;

    let product = catalog.client().get_product(ProductId::new(1)).await.unwrap();

    assert_eq!(product.id, ProductId::new(1));
    assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
    assert_eq!(product.price, Price::from_cents(17990));
}

#[tokio::test]
async fn test_get_product_is_cached() {
    let catalog = MockCatalog::start().await;
    catalog.mount_product(2, "Tênis VR Caminhada Confortável", 139.9).await;
    let client = catalog.client();

    client.get_product(ProductId::new(2)).await.unwrap();
    client.get_product(ProductId::new(2)).await.unwrap();

    assert_eq!(catalog.hits("/products/2").await, 1);
}

#[tokio::test]
async fn test_invalidate_product_forces_refetch() {
    let catalog = MockCatalog::start().await;
    catalog.mount_product(2, "Tênis VR Caminhada Confortável", 139.9).await;
    let client = catalog.client();

    client.get_product(ProductId::new(2)).await.unwrap();
    client.invalidate_product(ProductId::new(2)).await;
    client.get_product(ProductId::new(2)).await.unwrap();

    assert_eq!(catalog.hits("/products/2").await, 2);
}

#[tokio::test]
async fn test_get_stock_is_never_cached() {
    let catalog = MockCatalog::start().await;
    catalog.mount_stock(3, 2).await;
    let client = catalog.client();

    let first = client.get_stock(ProductId::new(3)).await.unwrap();
    let second = client.get_stock(ProductId::new(3)).await.unwrap();

    assert_eq!(first.amount, 2);
    assert_eq!(second, first);
    assert_eq!(catalog.hits("/stock/3").await, 2);
}

#[tokio::test]
async fn test_missing_stock_is_not_found() {
    let catalog = MockCatalog::start().await;
    catalog.mount_stock_status(9, 404).await;

    let err = catalog.client().get_stock(ProductId::new(9)).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(p) if p == "stock/9"));
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let catalog = MockCatalog::start().await;
    catalog.mount_stock_status(4, 500).await;

    let err = catalog.client().get_stock(ProductId::new(4)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let catalog = MockCatalog::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/5"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&catalog.server)
        .await;

    let err = catalog.client().get_stock(ProductId::new(5)).await.unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited(7)));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let catalog = MockCatalog::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/6"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":6}"))
        .mount(&catalog.server)
        .await;

    let err = catalog.client().get_stock(ProductId::new(6)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let catalog = MockCatalog::start().await;
    Mock::given(method("GET"))
        .and(path("/stock/1"))
        .and(header("Authorization", "Bearer catalog-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "amount": 3})),
        )
        .mount(&catalog.server)
        .await;

    let mut config = catalog.config();
    config.api_token = Some("catalog-token".to_string().into());
    let client = rocketshoes_cart::CatalogClient::new(&config).unwrap();

    let stock = client.get_stock(ProductId::new(1)).await.unwrap();
    assert_eq!(stock.amount, 3);
}
