/// Cart entry model and database operations
///
/// A cart entry is a per-user reference to an item or a recipe with a
/// quantity. A user's cart holds at most one entry per distinct
/// (kind, reference) pair: repeated adds merge into the existing row via an
/// atomic upsert keyed on the partial unique indexes, so concurrent adds
/// for the same reference can never duplicate rows or lose an increment.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE cart_entry_kind AS ENUM ('item', 'recipe');
///
/// CREATE TABLE cart_entries (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     kind cart_entry_kind NOT NULL,
///     item_id UUID,
///     recipe_id UUID,
///     quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use shelfhelp_shared::models::cart_entry::{CartEntry, CartEntryKind};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid, milk_id: Uuid) -> Result<(), sqlx::Error> {
/// // Two adds of the same item leave one row with quantity 3
/// CartEntry::upsert(&pool, user_id, CartEntryKind::Item, milk_id, 1).await?;
/// CartEntry::upsert(&pool, user_id, CartEntryKind::Item, milk_id, 2).await?;
///
/// let cart = CartEntry::list_resolved(&pool, user_id).await?;
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart[0].quantity, 3);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// What a cart entry references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "cart_entry_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CartEntryKind {
    /// A grocery item
    Item,

    /// A recipe (expands to its ingredients at checkout)
    Recipe,
}

impl CartEntryKind {
    /// Kind as the string stored in the database enum
    pub fn as_str(&self) -> &'static str {
        match self {
            CartEntryKind::Item => "item",
            CartEntryKind::Recipe => "recipe",
        }
    }
}

/// A row in a user's cart
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartEntry {
    /// Unique entry ID
    pub id: Uuid,

    /// Cart owner
    pub user_id: Uuid,

    /// Whether this entry references an item or a recipe
    pub kind: CartEntryKind,

    /// Referenced item (set iff kind = item)
    pub item_id: Option<Uuid>,

    /// Referenced recipe (set iff kind = recipe)
    pub recipe_id: Option<Uuid>,

    /// Requested quantity, always >= 1
    pub quantity: i32,

    /// When the entry was first added
    pub created_at: DateTime<Utc>,
}

/// A cart entry with display fields resolved from the referenced row
///
/// Produced by a LEFT JOIN against items and recipes: an entry whose
/// reference no longer resolves carries None in every display field rather
/// than failing the listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResolvedCartEntry {
    /// Unique entry ID
    pub id: Uuid,

    /// Whether this entry references an item or a recipe
    pub kind: CartEntryKind,

    /// Referenced item (set iff kind = item)
    pub item_id: Option<Uuid>,

    /// Referenced recipe (set iff kind = recipe)
    pub recipe_id: Option<Uuid>,

    /// Requested quantity
    pub quantity: i32,

    /// Item name (item entries with a live reference only)
    pub item_name: Option<String>,

    /// Item category (item entries with a live reference only)
    pub category: Option<String>,

    /// Recipe name (recipe entries with a live reference only)
    pub recipe_name: Option<String>,

    /// Recipe description (recipe entries with a live reference only)
    pub description: Option<String>,

    /// Recipe ingredient array as stored (JSONB), deserialized at render time
    pub ingredients: Option<JsonValue>,
}

impl CartEntry {
    /// Adds a reference to the cart, merging with any existing entry
    ///
    /// Atomic upsert: if the user already has an entry for this
    /// (kind, reference), its quantity grows by `quantity`; otherwise a new
    /// row is inserted. Runs as a single statement against the partial
    /// unique index, so there is no read-then-write window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database rejects the row (e.g. the CHECK
    /// constraint on quantity) or the connection fails.
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        kind: CartEntryKind,
        ref_id: Uuid,
        quantity: i32,
    ) -> Result<Self, sqlx::Error> {
        let entry = match kind {
            CartEntryKind::Item => {
                sqlx::query_as::<_, CartEntry>(
                    r#"
                    INSERT INTO cart_entries (user_id, kind, item_id, quantity)
                    VALUES ($1, 'item', $2, $3)
                    ON CONFLICT (user_id, item_id) WHERE kind = 'item'
                    DO UPDATE SET quantity = cart_entries.quantity + EXCLUDED.quantity
                    RETURNING id, user_id, kind, item_id, recipe_id, quantity, created_at
                    "#,
                )
                .bind(user_id)
                .bind(ref_id)
                .bind(quantity)
                .fetch_one(pool)
                .await?
            }
            CartEntryKind::Recipe => {
                sqlx::query_as::<_, CartEntry>(
                    r#"
                    INSERT INTO cart_entries (user_id, kind, recipe_id, quantity)
                    VALUES ($1, 'recipe', $2, $3)
                    ON CONFLICT (user_id, recipe_id) WHERE kind = 'recipe'
                    DO UPDATE SET quantity = cart_entries.quantity + EXCLUDED.quantity
                    RETURNING id, user_id, kind, item_id, recipe_id, quantity, created_at
                    "#,
                )
                .bind(user_id)
                .bind(ref_id)
                .bind(quantity)
                .fetch_one(pool)
                .await?
            }
        };

        Ok(entry)
    }

    /// Removes one entry from the caller's cart
    ///
    /// Scoped to `user_id` so a user can never delete another user's rows.
    /// Idempotent: removing an ID that does not exist (or belongs to someone
    /// else) affects zero rows and returns false, not an error.
    pub async fn remove(pool: &PgPool, user_id: Uuid, entry_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clears the caller's entire cart, returning the number of rows removed
    ///
    /// Idempotent: clearing an empty cart is a successful no-op.
    pub async fn clear(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_entries WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lists the caller's cart with display fields resolved
    ///
    /// LEFT JOINs the catalog so dangling references survive as rows with
    /// null display fields. Ordered by insertion time.
    pub async fn list_resolved(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ResolvedCartEntry>, sqlx::Error> {
        let entries = sqlx::query_as::<_, ResolvedCartEntry>(
            r#"
            SELECT
                ce.id,
                ce.kind,
                ce.item_id,
                ce.recipe_id,
                ce.quantity,
                i.name AS item_name,
                i.category,
                r.name AS recipe_name,
                r.description,
                r.ingredients
            FROM cart_entries ce
            LEFT JOIN items i ON ce.item_id = i.id
            LEFT JOIN recipes r ON ce.recipe_id = r.id
            WHERE ce.user_id = $1
            ORDER BY ce.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}
