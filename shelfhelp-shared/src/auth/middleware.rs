/// Authentication context and errors for Axum middleware
///
/// The API server's auth layers validate a Bearer token and insert an
/// [`AuthContext`] into the request extensions; handlers extract it with
/// Axum's `Extension` extractor. Catalog listing routes use an optional
/// variant of the layer, so handlers there extract
/// `Option<Extension<AuthContext>>` instead.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use shelfhelp_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {} <{}>", auth.user_id, auth.email)
/// }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;

/// Authentication context added to request extensions after a successful
/// token validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Email address carried in the token claims
    pub email: String,
}

impl AuthContext {
    /// Creates auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

/// Extracts the Bearer token from an Authorization header
///
/// # Errors
///
/// - `MissingCredentials` if the header is absent
/// - `InvalidFormat` if the header is not `Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;

    #[test]
    fn test_auth_context_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "user@example.com".to_string(), TokenType::Access);

        let ctx = AuthContext::from_claims(&claims);
        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.email, "user@example.com");
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().unwrap());
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }
}
