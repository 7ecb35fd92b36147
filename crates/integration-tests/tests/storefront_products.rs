//! End-to-end tests for the store page.
//!
//! Each test boots its own stub CMS and storefront on ephemeral ports, so
//! tests are independent and run in parallel.

use serde_json::json;

use driftwood_integration_tests::{
    http_client, sample_products, spawn_cms, spawn_failing_cms, spawn_storefront,
    unreachable_origin,
};

#[tokio::test]
async fn store_page_renders_products_from_the_cms() {
    let cms = spawn_cms(sample_products()).await;
    let storefront = spawn_storefront(&cms).await;
    let client = http_client();

    let response = client.get(&storefront).send().await.expect("store page");
    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("body");

    assert!(body.contains("Products From API Data"));
    assert!(body.contains("Harbor Armchair"));
    assert!(body.contains("Dune Table Lamp"));
    assert!(body.contains("$249.00"));
    assert!(body.contains("$89.00"));
    assert!(body.contains("Add to Cart"));
    // Tags render as chips
    assert!(body.contains("linen"));
    assert!(body.contains("lounge"));
}

#[tokio::test]
async fn discount_label_appears_only_for_positive_percentages() {
    let cms = spawn_cms(sample_products()).await;
    let storefront = spawn_storefront(&cms).await;
    let client = http_client();

    let body = client
        .get(&storefront)
        .send()
        .await
        .expect("store page")
        .text()
        .await
        .expect("body");

    // The armchair is 15% off; the lamp's 0% must not render a label
    assert!(body.contains("15% OFF"));
    assert!(!body.contains("0% OFF"));
}

#[tokio::test]
async fn fresh_visitors_see_an_empty_cart_panel() {
    let cms = spawn_cms(sample_products()).await;
    let storefront = spawn_storefront(&cms).await;
    let client = http_client();

    let body = client
        .get(&storefront)
        .send()
        .await
        .expect("store page")
        .text()
        .await
        .expect("body");

    assert!(body.contains("Cart Summary"));
    assert!(body.contains("Your Cart Is Empty. Please Add Products."));
}

#[tokio::test]
async fn long_descriptions_are_truncated_with_an_ellipsis() {
    let products = json!([
        {
            "_id": "prod-rug",
            "title": "Jute Rug",
            "price": 129.0,
            "description": "a".repeat(150),
            "tags": []
        }
    ]);
    let cms = spawn_cms(products).await;
    let storefront = spawn_storefront(&cms).await;
    let client = http_client();

    let body = client
        .get(&storefront)
        .send()
        .await
        .expect("store page")
        .text()
        .await
        .expect("body");

    let truncated = format!("{}...", "a".repeat(100));
    assert!(body.contains(&truncated));
    assert!(!body.contains(&"a".repeat(101)));
}

#[tokio::test]
async fn unreachable_cms_shows_the_connectivity_message() {
    let origin = unreachable_origin().await;
    let storefront = spawn_storefront(&origin).await;
    let client = http_client();

    let response = client.get(&storefront).send().await.expect("store page");
    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("body");

    assert!(body.contains("Network error occurred. Please check your connection."));
    // The heading stays; the grid and cart panel do not render
    assert!(body.contains("Products From API Data"));
    assert!(!body.contains("product-grid"));
    assert!(!body.contains("Cart Summary"));
}

#[tokio::test]
async fn rejected_queries_show_the_generic_message() {
    let cms = spawn_failing_cms().await;
    let storefront = spawn_storefront(&cms).await;
    let client = http_client();

    let response = client.get(&storefront).send().await.expect("store page");
    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("body");

    assert!(body.contains("Failed to load products. Please try again later."));
    assert!(!body.contains("Network error occurred"));
}

#[tokio::test]
async fn health_endpoints_report_liveness_and_readiness() {
    let cms = spawn_cms(sample_products()).await;
    let storefront = spawn_storefront(&cms).await;
    let client = http_client();

    let response = client
        .get(format!("{storefront}/health"))
        .send()
        .await
        .expect("health");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("body"), "ok");

    let response = client
        .get(format!("{storefront}/health/ready"))
        .send()
        .await
        .expect("readiness");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readiness_fails_when_the_cms_is_down() {
    let origin = unreachable_origin().await;
    let storefront = spawn_storefront(&origin).await;
    let client = http_client();

    let response = client
        .get(format!("{storefront}/health/ready"))
        .send()
        .await
        .expect("readiness");
    assert_eq!(response.status(), 503);
}
