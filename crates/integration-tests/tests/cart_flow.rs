//! Cart and checkout flows through the full router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use teees_integration_tests::{TEST_WHATSAPP_NUMBER, TestApp, numbered_catalog};

fn app() -> TestApp {
    TestApp::new(numbered_catalog(13))
}

#[tokio::test]
async fn test_add_redirects_back_to_catalog_page() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=2&page=2").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/?page=2#shop"));
}

#[tokio::test]
async fn test_add_without_page_returns_to_first_page() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=2").await;

    assert_eq!(response.location(), Some("/?page=1#shop"));
}

#[tokio::test]
async fn test_adding_twice_merges_into_one_line() {
    let mut app = app();

    app.post_form("/cart/add", "product_id=2").await;
    app.post_form("/cart/add", "product_id=2").await;

    let count = app.get("/cart/count").await;
    assert_eq!(count.status, StatusCode::OK);
    assert!(count.body.contains(">2</span>"), "body: {}", count.body);

    let cart = app.get("/cart").await;
    assert_eq!(cart.body.matches("name=\"product_id\" value=\"2\"").count(), 1);
    assert!(cart.body.contains("x2"));
    assert!(cart.body.contains("#4,000"));
}

#[tokio::test]
async fn test_badge_counts_units_across_lines() {
    let mut app = app();

    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=3").await;
    app.post_form("/cart/add", "product_id=3").await;

    let page = app.get("/").await;
    assert!(page.body.contains("id=\"cart-count\">3<"), "body: {}", page.body);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=99").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_product_id_is_rejected() {
    let mut app = app();

    let response = app.post_form("/cart/add", "product_id=wig").await;

    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_remove_drops_whole_line() {
    let mut app = app();

    app.post_form("/cart/add", "product_id=5").await;
    app.post_form("/cart/add", "product_id=5").await;
    app.post_form("/cart/add", "product_id=6").await;

    let response = app.post_form("/cart/remove", "product_id=5").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));

    let cart = app.get("/cart").await;
    assert!(!cart.body.contains("Wig 5"));
    assert!(cart.body.contains("Wig 6"));
    assert!(cart.body.contains("#6,000"));
}

#[tokio::test]
async fn test_remove_missing_product_is_noop() {
    let mut app = app();

    app.post_form("/cart/add", "product_id=1").await;
    let response = app.post_form("/cart/remove", "product_id=12").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_empty_cart_page() {
    let mut app = app();

    let cart = app.get("/cart").await;

    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Your bag is empty."));
    assert!(cart.body.contains("#0"));
    assert!(cart.body.contains("disabled"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_returns_to_cart() {
    let mut app = app();

    let response = app.get("/checkout").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
}

#[tokio::test]
async fn test_checkout_redirects_to_whatsapp_with_order() {
    let mut app = app();

    app.post_form("/cart/add", "product_id=2").await;
    app.post_form("/cart/add", "product_id=2").await;
    app.post_form("/cart/add", "product_id=10").await;

    let response = app.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let location = response.location().unwrap();
    assert!(location.starts_with(&format!("https://wa.me/{TEST_WHATSAPP_NUMBER}?text=")));
    // 2x Black Wig 2 - #2,000
    assert!(location.contains("2x%20Black%20Wig%202%20-%20%232%2C000%0A"));
    // 1x Black Wig 10 - #10,000
    assert!(location.contains("1x%20Black%20Wig%2010%20-%20%2310%2C000%0A"));
    // *Total Amount: #14,000*
    assert!(location.ends_with("%2ATotal%20Amount%3A%20%2314%2C000%2A"));
}

#[tokio::test]
async fn test_checkout_leaves_cart_intact() {
    let mut app = app();

    app.post_form("/cart/add", "product_id=4").await;
    app.get("/checkout").await;

    let count = app.get("/cart/count").await;
    assert!(count.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let mut alice = app();
    let mut bob = alice.new_visitor();

    alice.post_form("/cart/add", "product_id=1").await;

    let count = bob.get("/cart/count").await;
    assert!(!count.body.contains("cart-count"));

    let response = bob.get("/checkout").await;
    assert_eq!(response.location(), Some("/cart"));
}
