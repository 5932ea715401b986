/// Authentication utilities
///
/// This module provides the authentication primitives for ShelfHelp:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation (HS256 access/refresh)
/// - [`middleware`]: Request auth context and error types for Axum layers
///
/// # Example
///
/// ```no_run
/// use shelfhelp_shared::auth::password::{hash_password, verify_password};
/// use shelfhelp_shared::auth::jwt::{create_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), "user@example.com".to_string(), TokenType::Access);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
