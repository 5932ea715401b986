/// Recipe model and database operations
///
/// Same visibility rule as items: recommended rows are global, owned rows
/// are private to their creator. Ingredients are stored as a JSONB array of
/// strings whose order is preserved; the checkout renderer deserializes the
/// array back to `Vec<String>`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE recipes (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     ingredients JSONB NOT NULL DEFAULT '[]',
///     is_recommended BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// Recipe with an ordered ingredient list
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    /// Unique recipe ID
    pub id: Uuid,

    /// Owning user; None for recommended recipes
    pub owner_id: Option<Uuid>,

    /// Display name (e.g. "Breakfast Omelet")
    pub name: String,

    /// Short description; empty string when the client omits it
    pub description: String,

    /// Ordered ingredient list, stored as a JSONB array of strings
    pub ingredients: JsonValue,

    /// Whether the recipe is globally visible
    pub is_recommended: bool,

    /// When the recipe was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user-owned recipe
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    /// Owning user
    pub owner_id: Uuid,

    /// Display name, required non-empty (validated at the API boundary)
    pub name: String,

    /// Short description; empty string when the client omits it
    pub description: String,

    /// Ordered ingredient list
    pub ingredients: Vec<String>,
}

impl Recipe {
    /// Creates a new user-owned recipe
    ///
    /// The ingredient list is serialized to a JSONB array; its order is
    /// preserved exactly as submitted.
    pub async fn create(pool: &PgPool, data: CreateRecipe) -> Result<Self, sqlx::Error> {
        let ingredients = JsonValue::from(data.ingredients);

        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (owner_id, name, description, ingredients)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, description, ingredients, is_recommended, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.name)
        .bind(data.description)
        .bind(ingredients)
        .fetch_one(pool)
        .await?;

        Ok(recipe)
    }

    /// Lists recipes visible to the viewer
    ///
    /// Same shape as [`crate::models::item::Item::list_visible`]:
    /// recommended ∪ owned, recommended-first then newest-first.
    pub async fn list_visible(
        pool: &PgPool,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let recipes = match viewer_id {
            Some(viewer) => {
                sqlx::query_as::<_, Recipe>(
                    r#"
                    SELECT id, owner_id, name, description, ingredients, is_recommended, created_at
                    FROM recipes
                    WHERE is_recommended OR owner_id = $1
                    ORDER BY is_recommended DESC, created_at DESC
                    "#,
                )
                .bind(viewer)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Recipe>(
                    r#"
                    SELECT id, owner_id, name, description, ingredients, is_recommended, created_at
                    FROM recipes
                    WHERE is_recommended
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(recipes)
    }

    /// Checks whether a recipe with the given ID exists
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }
}
