/// Grocery-list rendering
///
/// Turns a resolved cart listing into the flat text document that checkout
/// emails to the user. Entries are partitioned by kind: item entries render
/// one line each, recipe entries render a header plus one line per
/// ingredient in the stored order.
///
/// Entries whose catalog reference no longer resolves (null display
/// fields) are skipped rather than failing the whole list.
///
/// # Example output
///
/// ```text
/// Hello Jane,
///
/// Here is your grocery list from ShelfHelp:
///
/// ITEMS:
/// Milk (Dairy) x2
///
/// RECIPES:
///
/// Breakfast Omelet:
///   - 3 eggs
///   - milk
///   - cheese
///
/// Thank you for using ShelfHelp!
/// ```

use crate::models::cart_entry::{CartEntryKind, ResolvedCartEntry};

/// Error type for grocery-list rendering
#[derive(Debug, thiserror::Error)]
pub enum GroceryListError {
    /// The cart has no entries; nothing to render or send
    #[error("Cart is empty")]
    EmptyCart,

    /// A recipe's stored ingredient array did not deserialize to strings
    #[error("Malformed ingredient list for recipe '{recipe}'")]
    MalformedIngredients {
        recipe: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Renders the grocery-list email body for a cart
///
/// `greeting` is the user's display name (or email when no name is set).
///
/// # Errors
///
/// - `EmptyCart` if `entries` is empty
/// - `MalformedIngredients` if a recipe's JSONB array is not a string array
pub fn render_grocery_list(
    greeting: &str,
    entries: &[ResolvedCartEntry],
) -> Result<String, GroceryListError> {
    if entries.is_empty() {
        return Err(GroceryListError::EmptyCart);
    }

    let mut item_lines = Vec::new();
    let mut recipe_blocks = Vec::new();

    for entry in entries {
        match entry.kind {
            CartEntryKind::Item => {
                // Dangling reference: no name to render, skip
                let Some(name) = &entry.item_name else {
                    continue;
                };
                let category = entry.category.as_deref().unwrap_or("");
                item_lines.push(format!("{} ({}) x{}", name, category, entry.quantity));
            }
            CartEntryKind::Recipe => {
                let (Some(name), Some(raw)) = (&entry.recipe_name, &entry.ingredients) else {
                    continue;
                };
                let ingredients: Vec<String> = serde_json::from_value(raw.clone()).map_err(
                    |source| GroceryListError::MalformedIngredients {
                        recipe: name.clone(),
                        source,
                    },
                )?;

                let mut block = format!("{}:\n", name);
                for ingredient in &ingredients {
                    block.push_str("  - ");
                    block.push_str(ingredient);
                    block.push('\n');
                }
                recipe_blocks.push(block);
            }
        }
    }

    let mut out = format!("Hello {},\n\nHere is your grocery list from ShelfHelp:\n", greeting);

    if !item_lines.is_empty() {
        out.push_str("\nITEMS:\n");
        out.push_str(&item_lines.join("\n"));
        out.push('\n');
    }

    if !recipe_blocks.is_empty() {
        out.push_str("\nRECIPES:\n");
        for block in &recipe_blocks {
            out.push('\n');
            out.push_str(block);
        }
    }

    out.push_str("\nThank you for using ShelfHelp!\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn item_entry(name: &str, category: &str, quantity: i32) -> ResolvedCartEntry {
        ResolvedCartEntry {
            id: Uuid::new_v4(),
            kind: CartEntryKind::Item,
            item_id: Some(Uuid::new_v4()),
            recipe_id: None,
            quantity,
            item_name: Some(name.to_string()),
            category: Some(category.to_string()),
            recipe_name: None,
            description: None,
            ingredients: None,
        }
    }

    fn recipe_entry(name: &str, ingredients: serde_json::Value) -> ResolvedCartEntry {
        ResolvedCartEntry {
            id: Uuid::new_v4(),
            kind: CartEntryKind::Recipe,
            item_id: None,
            recipe_id: Some(Uuid::new_v4()),
            quantity: 1,
            item_name: None,
            category: None,
            recipe_name: Some(name.to_string()),
            description: Some(String::new()),
            ingredients: Some(ingredients),
        }
    }

    fn dangling_entry(kind: CartEntryKind) -> ResolvedCartEntry {
        ResolvedCartEntry {
            id: Uuid::new_v4(),
            kind,
            item_id: matches!(kind, CartEntryKind::Item).then(Uuid::new_v4),
            recipe_id: matches!(kind, CartEntryKind::Recipe).then(Uuid::new_v4),
            quantity: 1,
            item_name: None,
            category: None,
            recipe_name: None,
            description: None,
            ingredients: None,
        }
    }

    #[test]
    fn test_empty_cart_is_an_error() {
        assert!(matches!(
            render_grocery_list("Jane", &[]),
            Err(GroceryListError::EmptyCart)
        ));
    }

    #[test]
    fn test_item_line_format() {
        let list = render_grocery_list("Jane", &[item_entry("Milk", "Dairy", 3)]).unwrap();
        assert!(list.contains("Milk (Dairy) x3"));
        assert!(list.starts_with("Hello Jane,"));
    }

    #[test]
    fn test_recipe_block_preserves_ingredient_order() {
        let entries = [recipe_entry(
            "Breakfast Omelet",
            json!(["3 eggs", "milk", "cheese"]),
        )];
        let list = render_grocery_list("Jane", &entries).unwrap();

        let header = list.find("Breakfast Omelet:").unwrap();
        let first = list.find("  - 3 eggs").unwrap();
        let second = list.find("  - milk").unwrap();
        let third = list.find("  - cheese").unwrap();
        assert!(header < first && first < second && second < third);
    }

    #[test]
    fn test_one_block_per_distinct_recipe() {
        let entries = [
            recipe_entry("Omelet", json!(["eggs"])),
            recipe_entry("Fried Rice", json!(["rice", "eggs"])),
        ];
        let list = render_grocery_list("Jane", &entries).unwrap();

        assert_eq!(list.matches("Omelet:").count(), 1);
        assert_eq!(list.matches("Fried Rice:").count(), 1);
    }

    #[test]
    fn test_items_and_recipes_partitioned() {
        let entries = [
            recipe_entry("Omelet", json!(["eggs"])),
            item_entry("Milk", "Dairy", 1),
        ];
        let list = render_grocery_list("Jane", &entries).unwrap();

        // Item lines come under ITEMS regardless of cart order
        let items_at = list.find("ITEMS:").unwrap();
        let recipes_at = list.find("RECIPES:").unwrap();
        let milk_at = list.find("Milk (Dairy) x1").unwrap();
        assert!(items_at < milk_at && milk_at < recipes_at);
    }

    #[test]
    fn test_dangling_references_are_skipped() {
        let entries = [
            dangling_entry(CartEntryKind::Item),
            dangling_entry(CartEntryKind::Recipe),
            item_entry("Bread", "Bakery", 1),
        ];
        let list = render_grocery_list("Jane", &entries).unwrap();

        assert!(list.contains("Bread (Bakery) x1"));
        assert!(!list.contains("RECIPES:"));
    }

    #[test]
    fn test_malformed_ingredients_error() {
        let entries = [recipe_entry("Broken", json!({"not": "an array"}))];
        match render_grocery_list("Jane", &entries) {
            Err(GroceryListError::MalformedIngredients { recipe, .. }) => {
                assert_eq!(recipe, "Broken");
            }
            other => panic!("Expected MalformedIngredients, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_sections_omitted_when_empty() {
        let list = render_grocery_list("Jane", &[item_entry("Milk", "Dairy", 1)]).unwrap();
        assert!(list.contains("ITEMS:"));
        assert!(!list.contains("RECIPES:"));
        assert!(list.trim_end().ends_with("Thank you for using ShelfHelp!"));
    }
}
