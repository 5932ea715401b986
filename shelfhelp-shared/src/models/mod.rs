/// Database models for ShelfHelp
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `item`: Grocery items (recommended or user-owned)
/// - `recipe`: Recipes with ordered ingredient lists
/// - `cart_entry`: Per-user cart rows referencing items or recipes

pub mod cart_entry;
pub mod item;
pub mod recipe;
pub mod user;
