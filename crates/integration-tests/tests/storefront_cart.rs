//! Cart flows driven through the storefront's HTTP interface.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::Value;

use shopfront_core::{CartLineItem, ProductId};
use shopfront_integration_tests::TestContext;
use shopfront_storefront::storage::{FileStore, KeyValueStore};

fn items(cart: &Value) -> &Vec<Value> {
    cart["items"].as_array().unwrap()
}

#[tokio::test]
async fn test_add_after_loading_products() {
    let ctx = TestContext::new().await.unwrap();

    let page = ctx.get("/products").await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);

    let resp = ctx.client.post(ctx.url("/cart/add/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    let fragment = resp.text().await.unwrap();
    assert!(fragment.contains("id=\"cart-items\""));
    assert!(fragment.contains("$109.95"));

    ctx.client.post(ctx.url("/cart/add/1")).send().await.unwrap();
    ctx.client.post(ctx.url("/cart/add/9")).send().await.unwrap();

    let cart = ctx.cart_json().await.unwrap();
    assert_eq!(items(&cart).len(), 2);
    assert_eq!(items(&cart)[0]["id"], 1);
    assert_eq!(items(&cart)[0]["quantity"], 2);
    assert_eq!(items(&cart)[1]["id"], 9);
    assert_eq!(cart["totals"]["item_count"], 3);
    assert_eq!(cart["totals"]["price"], "283.90");
}

#[tokio::test]
async fn test_add_from_home_page() {
    let ctx = TestContext::new().await.unwrap();

    let home = ctx.get("/").await.unwrap().text().await.unwrap();
    assert!(home.contains("Trending products"));
    assert!(home.contains("Fits 15 Lapt..."));
    assert!(!home.contains("Fits 15 Laptops"));
    assert!(home.contains("class=\"category-badge\">jewelery</span>"));
    assert!(home.contains("4.1 (259)"));

    ctx.client.post(ctx.url("/cart/add/5")).send().await.unwrap();
    let cart = ctx.cart_json().await.unwrap();
    assert_eq!(cart["totals"]["item_count"], 1);
}

#[tokio::test]
async fn test_add_unknown_id_is_ignored() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/products").await.unwrap();

    let resp = ctx.client.post(ctx.url("/cart/add/999")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cart = ctx.cart_json().await.unwrap();
    assert!(items(&cart).is_empty());
    assert_eq!(cart["totals"]["item_count"], 0);
}

#[tokio::test]
async fn test_add_before_catalog_load_is_ignored() {
    let ctx = TestContext::new().await.unwrap();

    ctx.client.post(ctx.url("/cart/add/1")).send().await.unwrap();

    let cart = ctx.cart_json().await.unwrap();
    assert!(items(&cart).is_empty());
}

#[tokio::test]
async fn test_category_listing_does_not_replace_cache() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/").await.unwrap();

    let page = ctx
        .get("/products?category=jewelery")
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Naga Bracelet"));
    assert!(!page.contains("Hard Drive"));
    assert!(page.contains("aria-pressed=\"true\">Jewelery"));

    // Products from the trending load are still addable
    ctx.client.post(ctx.url("/cart/add/9")).send().await.unwrap();
    let cart = ctx.cart_json().await.unwrap();
    assert_eq!(items(&cart).len(), 1);
}

#[tokio::test]
async fn test_category_with_space_in_name() {
    let ctx = TestContext::new().await.unwrap();

    let page = ctx
        .get("/products?category=men%27s%20clothing")
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Slim Fit T-Shirts"));
    assert!(!page.contains("Naga Bracelet"));
}

#[tokio::test]
async fn test_decrease_removes_last_unit() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/products").await.unwrap();
    ctx.client.post(ctx.url("/cart/add/2")).send().await.unwrap();
    ctx.client.post(ctx.url("/cart/increase/2")).send().await.unwrap();

    ctx.client.post(ctx.url("/cart/decrease/2")).send().await.unwrap();
    let cart = ctx.cart_json().await.unwrap();
    assert_eq!(items(&cart)[0]["quantity"], 1);

    ctx.client.post(ctx.url("/cart/decrease/2")).send().await.unwrap();
    let cart = ctx.cart_json().await.unwrap();
    assert!(items(&cart).is_empty());
}

#[tokio::test]
async fn test_remove_line() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/products").await.unwrap();
    ctx.client.post(ctx.url("/cart/add/1")).send().await.unwrap();
    ctx.client.post(ctx.url("/cart/add/2")).send().await.unwrap();

    ctx.client.post(ctx.url("/cart/remove/1")).send().await.unwrap();

    let cart = ctx.cart_json().await.unwrap();
    assert_eq!(items(&cart).len(), 1);
    assert_eq!(items(&cart)[0]["id"], 2);
}

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/products").await.unwrap();
    ctx.client.post(ctx.url("/cart/add/1")).send().await.unwrap();

    let resp = ctx.post_form("/cart/clear", "").await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = ctx.post_form("/cart/clear", "confirm=no").await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(items(&ctx.cart_json().await.unwrap()).len(), 1);

    let resp = ctx.post_form("/cart/clear", "confirm=yes").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Your cart is empty."));
    assert!(items(&ctx.cart_json().await.unwrap()).is_empty());
}

#[tokio::test]
async fn test_invalid_actions_are_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let resp = ctx.client.post(ctx.url("/cart/checkout/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ctx.client.post(ctx.url("/cart/add/abc")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_persists_across_restart() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/products").await.unwrap();
    ctx.client.post(ctx.url("/cart/add/5")).send().await.unwrap();
    ctx.client.post(ctx.url("/cart/add/5")).send().await.unwrap();

    let store = FileStore::open(ctx.storage_path(), None).unwrap();
    let raw = store.get("cart").unwrap().unwrap();
    let saved: Vec<CartLineItem> = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id(), ProductId::new(5));
    assert_eq!(saved[0].quantity.get(), 2);

    let restarted = ctx.restart().await.unwrap();
    let cart: Value = ctx
        .client
        .get(format!("{restarted}/api/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["totals"]["item_count"], 2);
    assert_eq!(cart["totals"]["price"], "1390");
}

#[tokio::test]
async fn test_cart_page_and_count() {
    let ctx = TestContext::new().await.unwrap();
    ctx.get("/products").await.unwrap();
    ctx.client.post(ctx.url("/cart/add/2")).send().await.unwrap();
    ctx.client.post(ctx.url("/cart/add/2")).send().await.unwrap();

    let page = ctx.get("/cart").await.unwrap().text().await.unwrap();
    assert!(page.contains("Mens Casual Premium Slim Fit T-Shirts"));
    assert!(page.contains("$44.60"));
    assert!(page.contains("Category: men"));

    let badge = ctx.get("/cart/count").await.unwrap().text().await.unwrap();
    assert!(badge.contains(">2</span>"));
}
