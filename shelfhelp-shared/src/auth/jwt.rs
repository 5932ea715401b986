/// JWT token generation and validation
///
/// Tokens are signed with HS256 and carry the user's identity. Two token
/// types exist: short-lived access tokens for API calls, and long-lived
/// refresh tokens exchanged for new access tokens.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours for access, 30 days for refresh
/// - **Validation**: Signature, expiration, nbf, and issuer checks
/// - **Secret**: at least 32 bytes, supplied via configuration
///
/// # Example
///
/// ```
/// use shelfhelp_shared::auth::jwt::{create_token, validate_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, "user@example.com".to_string(), TokenType::Access);
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let validated = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim value
const ISSUER: &str = "shelfhelp";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,
}

/// Token type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token (short-lived, 24 hours)
    Access,

    /// Refresh token (long-lived, 30 days)
    Refresh,
}

impl TokenType {
    /// Default expiration duration for this token type
    pub fn default_expiration(&self) -> Duration {
        match self {
            TokenType::Access => Duration::hours(24),
            TokenType::Refresh => Duration::days(30),
        }
    }
}

/// JWT claims
///
/// Standard claims (`sub`, `iss`, `iat`, `exp`, `nbf`) plus the user's
/// email and the token type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always "shelfhelp"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// User email (custom claim); the checkout recipient address
    pub email: String,

    /// Token type (custom claim)
    pub token_type: TokenType,
}

impl Claims {
    /// Creates new claims with the default expiration for the token type
    pub fn new(user_id: Uuid, email: String, token_type: TokenType) -> Self {
        Self::with_expiration(user_id, email, token_type, token_type.default_expiration())
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(
        user_id: Uuid,
        email: String,
        token_type: TokenType,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            email,
            token_type,
        }
    }
}

/// Creates a JWT token from claims, signed with HS256
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts its claims
///
/// Verifies the signature, expiration, nbf window, and issuer.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Validates a token and ensures it is an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != TokenType::Access {
        return Err(JwtError::ValidationError(
            "Expected access token, got refresh token".to_string(),
        ));
    }

    Ok(claims)
}

/// Validates a token and ensures it is a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != TokenType::Refresh {
        return Err(JwtError::ValidationError(
            "Expected refresh token, got access token".to_string(),
        ));
    }

    Ok(claims)
}

/// Exchanges a valid refresh token for a new access token
///
/// # Errors
///
/// Returns an error if the refresh token is invalid, expired, or not a
/// refresh token.
pub fn refresh_access_token(refresh_token: &str, secret: &str) -> Result<String, JwtError> {
    let refresh_claims = validate_refresh_token(refresh_token, secret)?;

    let access_claims = Claims::new(refresh_claims.sub, refresh_claims.email, TokenType::Access);

    create_token(&access_claims, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "user@example.com".to_string(), TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.email, "user@example.com");
        assert_eq!(validated.token_type, TokenType::Access);
        assert_eq!(validated.iss, "shelfhelp");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.com".to_string(), TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        assert!(validate_token(&token, "another-secret-32-bytes-long....").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            TokenType::Access,
            Duration::seconds(-3600),
        );
        let token = create_token(&claims, SECRET).unwrap();

        match validate_token(&token, SECRET) {
            Err(JwtError::Expired) => {}
            other => panic!("Expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_access_token_type_enforced() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.com".to_string(), TokenType::Refresh);
        let token = create_token(&claims, SECRET).unwrap();

        assert!(validate_access_token(&token, SECRET).is_err());
        assert!(validate_refresh_token(&token, SECRET).is_ok());
    }

    #[test]
    fn test_refresh_flow_issues_access_token() {
        let user_id = Uuid::new_v4();
        let refresh_claims =
            Claims::new(user_id, "user@example.com".to_string(), TokenType::Refresh);
        let refresh_token = create_token(&refresh_claims, SECRET).unwrap();

        let access_token = refresh_access_token(&refresh_token, SECRET).unwrap();
        let access_claims = validate_access_token(&access_token, SECRET).unwrap();
        assert_eq!(access_claims.sub, user_id);
        assert_eq!(access_claims.email, "user@example.com");
    }

    #[test]
    fn test_access_token_cannot_refresh() {
        let claims = Claims::new(Uuid::new_v4(), "a@b.com".to_string(), TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        assert!(refresh_access_token(&token, SECRET).is_err());
    }
}
