/// Recommended-catalog seeding
///
/// On a fresh database the catalog would be empty, which makes for a bleak
/// first visit. This module inserts a starter set of recommended items and
/// recipes once, at startup, if no recommended rows exist yet.
///
/// Recommended rows have no owner (`owner_id IS NULL`) and are visible to
/// every user, authenticated or not.

use serde_json::json;
use sqlx::PgPool;
use tracing::info;

/// Starter items: (name, category)
const RECOMMENDED_ITEMS: &[(&str, &str)] = &[
    ("Milk", "Dairy"),
    ("Bread", "Bakery"),
    ("Eggs", "Dairy"),
    ("Chicken Breast", "Meat"),
    ("Tomatoes", "Produce"),
    ("Lettuce", "Produce"),
    ("Cheese", "Dairy"),
    ("Rice", "Grains"),
];

/// Seeds the recommended catalog if it is empty
///
/// Idempotent: each of the two tables is seeded only when it contains no
/// recommended rows, so restarting the server never duplicates data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn seed_recommended(pool: &PgPool) -> Result<(), sqlx::Error> {
    let (item_count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM items WHERE is_recommended")
            .fetch_one(pool)
            .await?;

    if item_count == 0 {
        for (name, category) in RECOMMENDED_ITEMS {
            sqlx::query(
                r#"
                INSERT INTO items (owner_id, name, category, is_recommended)
                VALUES (NULL, $1, $2, TRUE)
                "#,
            )
            .bind(name)
            .bind(category)
            .execute(pool)
            .await?;
        }
        info!(count = RECOMMENDED_ITEMS.len(), "Seeded recommended items");
    }

    let (recipe_count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE is_recommended")
            .fetch_one(pool)
            .await?;

    if recipe_count == 0 {
        let recipes = [
            (
                "Classic Scrambled Eggs",
                "Quick and easy breakfast",
                json!(["3 eggs", "2 tbsp milk", "1 tbsp butter", "salt", "pepper"]),
            ),
            (
                "Chicken Caesar Salad",
                "Healthy lunch option",
                json!([
                    "2 chicken breasts",
                    "1 head romaine lettuce",
                    "1/2 cup caesar dressing",
                    "croutons",
                    "parmesan cheese"
                ]),
            ),
            (
                "Simple Fried Rice",
                "Easy dinner with leftovers",
                json!([
                    "2 cups cooked rice",
                    "2 eggs",
                    "1 cup mixed vegetables",
                    "3 tbsp soy sauce",
                    "2 tbsp vegetable oil"
                ]),
            ),
            (
                "Caprese Salad",
                "Fresh Italian appetizer",
                json!([
                    "2 large tomatoes",
                    "8 oz fresh mozzarella",
                    "fresh basil leaves",
                    "2 tbsp olive oil",
                    "balsamic vinegar",
                    "salt",
                    "pepper"
                ]),
            ),
        ];

        for (name, description, ingredients) in recipes {
            sqlx::query(
                r#"
                INSERT INTO recipes (owner_id, name, description, ingredients, is_recommended)
                VALUES (NULL, $1, $2, $3, TRUE)
                "#,
            )
            .bind(name)
            .bind(description)
            .bind(ingredients)
            .execute(pool)
            .await?;
        }
        info!("Seeded recommended recipes");
    }

    Ok(())
}
