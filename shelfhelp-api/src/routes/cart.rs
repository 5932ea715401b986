/// Cart endpoints
///
/// # Endpoints
///
/// - `GET /cart` - List the caller's cart with resolved display fields
/// - `POST /cart` - Add an item or recipe; merges into an existing entry
/// - `DELETE /cart?id=<entryId>` - Remove one entry; omit `id` to clear all
///
/// Adding the same reference twice increments the existing entry's quantity
/// instead of inserting a second row (atomic upsert in the model layer).
/// Removal and clearing are idempotent.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shelfhelp_shared::{
    auth::middleware::AuthContext,
    models::{
        cart_entry::{CartEntry, CartEntryKind, ResolvedCartEntry},
        item::Item,
        recipe::Recipe,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Add-to-cart request
///
/// Exactly one of `itemId` / `recipeId` must be set, matching `type`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    /// What is being added: "item" or "recipe"
    #[serde(rename = "type")]
    pub kind: CartEntryKind,

    /// Referenced item (type = item)
    pub item_id: Option<Uuid>,

    /// Referenced recipe (type = recipe)
    pub recipe_id: Option<Uuid>,

    /// Quantity to add (default 1)
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
}

/// Delete-from-cart query parameters
#[derive(Debug, Deserialize)]
pub struct DeleteCartParams {
    /// Entry to remove; None clears the whole cart
    pub id: Option<Uuid>,
}

/// Simple confirmation response for cart mutations
#[derive(Debug, Serialize)]
pub struct CartMessageResponse {
    /// Human-readable result
    pub message: String,
}

/// Lists the caller's cart
///
/// Display fields are resolved from the referenced item or recipe; entries
/// whose reference was deleted carry nulls instead of failing.
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<ResolvedCartEntry>>> {
    let entries = CartEntry::list_resolved(&state.db, auth.user_id).await?;

    Ok(Json(entries))
}

/// Adds an item or recipe to the caller's cart
///
/// # Errors
///
/// - `400 Bad Request`: Reference missing, mismatched with `type`, unknown,
///   or quantity below 1
/// - `401 Unauthorized`: Missing or invalid token
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddToCartRequest>,
) -> ApiResult<Json<CartEntry>> {
    req.validate()?;

    let quantity = req.quantity.unwrap_or(1);

    // The reference must match the declared kind and actually exist;
    // existence is checked here because cart rows carry no foreign key.
    let ref_id = match req.kind {
        CartEntryKind::Item => {
            let item_id = req.item_id.ok_or_else(|| missing_ref("itemId"))?;
            if !Item::exists(&state.db, item_id).await? {
                return Err(ApiError::BadRequest("Item does not exist".to_string()));
            }
            item_id
        }
        CartEntryKind::Recipe => {
            let recipe_id = req.recipe_id.ok_or_else(|| missing_ref("recipeId"))?;
            if !Recipe::exists(&state.db, recipe_id).await? {
                return Err(ApiError::BadRequest("Recipe does not exist".to_string()));
            }
            recipe_id
        }
    };

    let entry = CartEntry::upsert(&state.db, auth.user_id, req.kind, ref_id, quantity).await?;

    tracing::debug!(
        user_id = %auth.user_id,
        kind = req.kind.as_str(),
        quantity = entry.quantity,
        "Added to cart"
    );

    Ok(Json(entry))
}

/// Removes one entry or clears the caller's cart
///
/// Both operations are idempotent: removing an unknown entry id (or one
/// owned by another user) and clearing an empty cart succeed quietly.
pub async fn delete_from_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<DeleteCartParams>,
) -> ApiResult<Json<CartMessageResponse>> {
    let message = match params.id {
        Some(entry_id) => {
            CartEntry::remove(&state.db, auth.user_id, entry_id).await?;
            "Entry removed".to_string()
        }
        None => {
            let removed = CartEntry::clear(&state.db, auth.user_id).await?;
            format!("Cart cleared ({} entries)", removed)
        }
    };

    Ok(Json(CartMessageResponse { message }))
}

fn missing_ref(field: &str) -> ApiError {
    ApiError::ValidationError(vec![ValidationErrorDetail {
        field: field.to_string(),
        message: format!("{} is required for this type", field),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_request_accepts_camel_case() {
        let req: AddToCartRequest = serde_json::from_value(json!({
            "type": "item",
            "itemId": "550e8400-e29b-41d4-a716-446655440000",
            "quantity": 2
        }))
        .unwrap();

        assert_eq!(req.kind, CartEntryKind::Item);
        assert!(req.item_id.is_some());
        assert_eq!(req.quantity, Some(2));
    }

    #[test]
    fn test_add_request_rejects_unknown_kind() {
        let result: Result<AddToCartRequest, _> = serde_json::from_value(json!({
            "type": "beverage",
            "itemId": "550e8400-e29b-41d4-a716-446655440000"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_add_request_quantity_validation() {
        let req: AddToCartRequest = serde_json::from_value(json!({
            "type": "item",
            "itemId": "550e8400-e29b-41d4-a716-446655440000",
            "quantity": 0
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
