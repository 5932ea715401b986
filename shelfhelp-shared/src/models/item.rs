/// Grocery item model and database operations
///
/// Items are either *recommended* (no owner, visible to everyone) or
/// *owned* (visible only to their creator). The visibility rule is
/// `is_recommended OR owner_id = viewer`, applied in SQL.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     category VARCHAR(100) NOT NULL DEFAULT '',
///     is_recommended BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Grocery item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID
    pub id: Uuid,

    /// Owning user; None for recommended items
    pub owner_id: Option<Uuid>,

    /// Display name (e.g. "Milk")
    pub name: String,

    /// Store category (e.g. "Dairy"); empty string when uncategorized
    pub category: String,

    /// Whether the item is globally visible
    pub is_recommended: bool,

    /// When the item was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user-owned item
#[derive(Debug, Clone)]
pub struct CreateItem {
    /// Owning user
    pub owner_id: Uuid,

    /// Display name, required non-empty (validated at the API boundary)
    pub name: String,

    /// Store category; empty string when the client omits it
    pub category: String,
}

impl Item {
    /// Creates a new user-owned item
    pub async fn create(pool: &PgPool, data: CreateItem) -> Result<Self, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (owner_id, name, category)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, category, is_recommended, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.name)
        .bind(data.category)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    /// Lists items visible to the viewer
    ///
    /// Result set = recommended rows ∪ rows owned by `viewer_id`, ordered
    /// recommended-first then newest-first. An anonymous viewer (None)
    /// receives only the recommended subset.
    pub async fn list_visible(
        pool: &PgPool,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let items = match viewer_id {
            Some(viewer) => {
                sqlx::query_as::<_, Item>(
                    r#"
                    SELECT id, owner_id, name, category, is_recommended, created_at
                    FROM items
                    WHERE is_recommended OR owner_id = $1
                    ORDER BY is_recommended DESC, created_at DESC
                    "#,
                )
                .bind(viewer)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Item>(
                    r#"
                    SELECT id, owner_id, name, category, is_recommended, created_at
                    FROM items
                    WHERE is_recommended
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(items)
    }

    /// Checks whether an item with the given ID exists
    ///
    /// Used to reject cart additions that reference a nonexistent item.
    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.is_some())
    }
}
