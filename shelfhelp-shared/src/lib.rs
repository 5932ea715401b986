//! # ShelfHelp Shared Library
//!
//! This crate contains the types, database operations, and business logic
//! shared by the ShelfHelp API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, items, recipes, cart entries)
//! - `auth`: Password hashing, JWT tokens, and auth middleware types
//! - `db`: Connection pool, migrations, and recommended-catalog seeding
//! - `grocery`: Cart-to-shopping-list rendering
//! - `mail`: SMTP delivery of rendered grocery lists

pub mod auth;
pub mod db;
pub mod grocery;
pub mod mail;
pub mod models;

/// Current version of the ShelfHelp shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
