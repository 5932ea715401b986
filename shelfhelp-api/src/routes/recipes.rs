/// Recipe catalog endpoints
///
/// # Endpoints
///
/// - `GET /recipes` - List visible recipes; anonymous or authenticated
/// - `POST /recipes` - Create a recipe; requires authentication
///
/// Same visibility rule as items. Recipe creation requires a name and a
/// non-empty ingredient list; the list's order is preserved through storage
/// and checkout rendering.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use shelfhelp_shared::{
    auth::middleware::AuthContext,
    models::recipe::{CreateRecipe, Recipe},
};
use validator::Validate;

/// Create recipe request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    /// Recipe name, required non-empty
    #[validate(length(min = 1, max = 255, message = "Recipe name is required"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Ordered ingredient list; an absent or empty list is a client error
    pub ingredients: Option<Vec<String>>,
}

/// Lists recipes visible to the caller
pub async fn list_recipes(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
) -> ApiResult<Json<Vec<Recipe>>> {
    let viewer_id = auth.map(|Extension(auth)| auth.user_id);

    let recipes = Recipe::list_visible(&state.db, viewer_id).await?;

    Ok(Json(recipes))
}

/// Creates a new recipe owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: Missing name or missing/empty ingredient list
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateRecipeRequest>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    req.validate()?;

    let ingredients = match req.ingredients {
        Some(list) if !list.is_empty() => list,
        _ => {
            return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "ingredients".to_string(),
                message: "Ingredient list is required".to_string(),
            }]))
        }
    };

    let recipe = Recipe::create(
        &state.db,
        CreateRecipe {
            owner_id: auth.user_id,
            name: req.name,
            description: req.description.unwrap_or_default(),
            ingredients,
        },
    )
    .await?;

    tracing::debug!(recipe_id = %recipe.id, user_id = %auth.user_id, "Created recipe");

    Ok((StatusCode::CREATED, Json(recipe)))
}
