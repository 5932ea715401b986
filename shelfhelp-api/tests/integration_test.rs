/// Integration tests for the ShelfHelp API
///
/// These tests drive the full router end-to-end against a real PostgreSQL
/// database (DATABASE_URL, defaulting to a local `shelfhelp_test`):
/// - Registration and login flow
/// - Catalog visibility (anonymous vs. authenticated)
/// - Cart merge-on-add, idempotent removal, clearing
/// - Checkout rendering and cart clearing

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use uuid::Uuid;

/// Register a new account, log in with it, and reject a duplicate email
#[tokio::test]
async fn test_register_and_login_flow() {
    let ctx = TestContext::new().await.unwrap();

    let email = format!("flow-{}@example.com", Uuid::new_v4());
    let register_body = json!({
        "email": email,
        "password": "a-long-enough-password",
        "name": "Flow Tester"
    });

    let response = common::send(&ctx, "POST", "/auth/register", None, Some(register_body.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let registered = common::body_json(response).await;
    assert!(registered["access_token"].is_string());
    assert!(registered["refresh_token"].is_string());

    // Same email again conflicts
    let response = common::send(&ctx, "POST", "/auth/register", None, Some(register_body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Login with the right password succeeds
    let response = common::send(
        &ctx,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "a-long-enough-password" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let logged_in = common::body_json(response).await;
    let access_token = logged_in["access_token"].as_str().unwrap();

    // ...and the issued token authenticates requests
    let response = common::send(
        &ctx,
        "GET",
        "/cart",
        Some(&format!("Bearer {}", access_token)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Wrong password is rejected
    let response = common::send(
        &ctx,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "not-the-password" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// The harness user's stored Argon2 hash verifies through the login route
#[tokio::test]
async fn test_harness_user_can_login() {
    let ctx = TestContext::new().await.unwrap();

    let response = common::send(
        &ctx,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": ctx.user.email, "password": common::TEST_PASSWORD })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// Anonymous catalog listing returns only recommended entries; an
/// authenticated user additionally sees their own, recommended first
#[tokio::test]
async fn test_catalog_visibility() {
    let ctx = TestContext::new().await.unwrap();

    let own_name = format!("Oat Milk {}", Uuid::new_v4());
    common::create_item(&ctx, &own_name, "Dairy").await;

    // Anonymous: recommended only, the new item is invisible
    let response = common::send(&ctx, "GET", "/items", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let items = common::body_json(response).await;
    let items = items.as_array().unwrap();
    assert!(!items.is_empty(), "seeded recommended items expected");
    assert!(items.iter().all(|i| i["is_recommended"] == true));
    assert!(items.iter().all(|i| i["name"] != own_name.as_str()));

    // Authenticated: own item appears, after the recommended block
    let response = common::send(&ctx, "GET", "/items", Some(&ctx.auth_header()), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let items = common::body_json(response).await;
    let items = items.as_array().unwrap();

    let own_index = items
        .iter()
        .position(|i| i["name"] == own_name.as_str())
        .expect("own item should be listed");
    let last_recommended = items
        .iter()
        .rposition(|i| i["is_recommended"] == true)
        .unwrap();
    assert!(
        last_recommended < own_index,
        "recommended entries must be ordered first"
    );

    ctx.cleanup().await.unwrap();
}

/// An invalid token is rejected even on the optionally-authenticated
/// listing routes
#[tokio::test]
async fn test_catalog_rejects_garbage_token() {
    let ctx = TestContext::new().await.unwrap();

    let response = common::send(&ctx, "GET", "/items", Some("Bearer garbage"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Adding the same item twice yields one cart entry with summed quantity
#[tokio::test]
async fn test_add_same_item_twice_merges_quantity() {
    let ctx = TestContext::new().await.unwrap();

    let item_id = common::create_item(&ctx, "Milk", "Dairy").await;

    let response = common::add_to_cart(&ctx, "item", item_id, 1).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = common::add_to_cart(&ctx, "item", item_id, 2).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send(&ctx, "GET", "/cart", Some(&ctx.auth_header()), None).await;
    let cart = common::body_json(response).await;
    let cart = cart.as_array().unwrap().clone();

    assert_eq!(cart.len(), 1, "repeated adds must merge, not duplicate");
    assert_eq!(cart[0]["quantity"], 3);
    assert_eq!(cart[0]["item_name"], "Milk");
    assert_eq!(cart[0]["category"], "Dairy");

    ctx.cleanup().await.unwrap();
}

/// Removing a nonexistent cart entry is a successful no-op
#[tokio::test]
async fn test_remove_nonexistent_entry_is_noop() {
    let ctx = TestContext::new().await.unwrap();

    let uri = format!("/cart?id={}", Uuid::new_v4());
    let response = common::send(&ctx, "DELETE", &uri, Some(&ctx.auth_header()), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// DELETE /cart without an id clears the whole cart, idempotently
#[tokio::test]
async fn test_clear_cart() {
    let ctx = TestContext::new().await.unwrap();

    let item_id = common::create_item(&ctx, "Bread", "Bakery").await;
    common::add_to_cart(&ctx, "item", item_id, 1).await;

    let response = common::send(&ctx, "DELETE", "/cart", Some(&ctx.auth_header()), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::send(&ctx, "GET", "/cart", Some(&ctx.auth_header()), None).await;
    let cart = common::body_json(response).await;
    assert!(cart.as_array().unwrap().is_empty());

    // Clearing an already-empty cart still succeeds
    let response = common::send(&ctx, "DELETE", "/cart", Some(&ctx.auth_header()), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// Cart additions referencing an unknown catalog row are rejected
#[tokio::test]
async fn test_add_unknown_reference_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let response = common::add_to_cart(&ctx, "item", Uuid::new_v4(), 1).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Mismatched reference field for the declared type
    let response = common::send(
        &ctx,
        "POST",
        "/cart",
        Some(&ctx.auth_header()),
        Some(json!({ "type": "recipe", "itemId": Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

/// Cart routes require authentication
#[tokio::test]
async fn test_cart_requires_authentication() {
    let ctx = TestContext::new().await.unwrap();

    let response = common::send(&ctx, "GET", "/cart", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Recipe creation without an ingredient list is a client error
#[tokio::test]
async fn test_recipe_requires_ingredients() {
    let ctx = TestContext::new().await.unwrap();

    let response = common::send(
        &ctx,
        "POST",
        "/recipes",
        Some(&ctx.auth_header()),
        Some(json!({ "name": "Mystery Dish", "ingredients": [] })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

/// Checkout on an empty cart returns the empty-cart error
#[tokio::test]
async fn test_checkout_empty_cart() {
    let ctx = TestContext::new().await.unwrap();

    let response = common::send(&ctx, "POST", "/checkout", Some(&ctx.auth_header()), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "empty_cart");

    ctx.cleanup().await.unwrap();
}

/// The full checkout scenario: item line, recipe block with ordered
/// ingredients, and an empty cart afterwards
#[tokio::test]
async fn test_checkout_renders_list_and_clears_cart() {
    let ctx = TestContext::new().await.unwrap();

    let milk_id = common::create_item(&ctx, "Milk", "Dairy").await;
    let omelet_id =
        common::create_recipe(&ctx, "Breakfast Omelet", &["3 eggs", "milk", "cheese"]).await;

    common::add_to_cart(&ctx, "item", milk_id, 1).await;
    common::add_to_cart(&ctx, "recipe", omelet_id, 1).await;

    let response = common::send(&ctx, "GET", "/cart", Some(&ctx.auth_header()), None).await;
    let cart = common::body_json(response).await;
    assert_eq!(cart.as_array().unwrap().len(), 2);

    let response = common::send(&ctx, "POST", "/checkout", Some(&ctx.auth_header()), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let preview = body["emailPreview"].as_str().unwrap();

    assert!(preview.contains("Milk (Dairy) x1"));

    let header = preview.find("Breakfast Omelet:").unwrap();
    let eggs = preview.find("  - 3 eggs").unwrap();
    let milk = preview.find("  - milk").unwrap();
    let cheese = preview.find("  - cheese").unwrap();
    assert!(
        header < eggs && eggs < milk && milk < cheese,
        "ingredients must render in stored order"
    );

    // Cart is empty after checkout, delivered or not (mailer is disabled here)
    let response = common::send(&ctx, "GET", "/cart", Some(&ctx.auth_header()), None).await;
    let cart = common::body_json(response).await;
    assert!(cart.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}
