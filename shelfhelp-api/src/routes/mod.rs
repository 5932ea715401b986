/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `items`: Item catalog (list, create)
/// - `recipes`: Recipe catalog (list, create)
/// - `cart`: Cart management (list, add/merge, remove, clear)
/// - `checkout`: Cart aggregation, email delivery, cart clearing

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod items;
pub mod recipes;
