/// Database utilities
///
/// This module provides database infrastructure:
/// - `pool`: PostgreSQL connection pool creation and health checks
/// - `migrations`: Migration runner (sqlx embedded migrations)
/// - `seed`: Recommended-catalog seeding on first start

pub mod migrations;
pub mod pool;
pub mod seed;
