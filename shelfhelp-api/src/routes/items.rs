/// Item catalog endpoints
///
/// # Endpoints
///
/// - `GET /items` - List visible items; anonymous or authenticated
/// - `POST /items` - Create an item; requires authentication
///
/// Listing visibility: recommended items always, plus the caller's own
/// items when authenticated, recommended first then newest first.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use shelfhelp_shared::{
    auth::middleware::AuthContext,
    models::item::{CreateItem, Item},
};
use validator::Validate;

/// Create item request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    /// Item name, required non-empty
    #[validate(length(min = 1, max = 255, message = "Item name is required"))]
    pub name: String,

    /// Optional store category
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
}

/// Lists items visible to the caller
///
/// The optional auth layer inserts an `AuthContext` only for authenticated
/// requests; anonymous callers see the recommended subset.
pub async fn list_items(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
) -> ApiResult<Json<Vec<Item>>> {
    let viewer_id = auth.map(|Extension(auth)| auth.user_id);

    let items = Item::list_visible(&state.db, viewer_id).await?;

    Ok(Json(items))
}

/// Creates a new item owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: Missing or empty name
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    req.validate()?;

    let item = Item::create(
        &state.db,
        CreateItem {
            owner_id: auth.user_id,
            name: req.name,
            category: req.category.unwrap_or_default(),
        },
    )
    .await?;

    tracing::debug!(item_id = %item.id, user_id = %auth.user_id, "Created item");

    Ok((StatusCode::CREATED, Json(item)))
}
