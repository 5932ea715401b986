/// Rate limiting middleware
///
/// Fixed-window request counting with Redis-backed state so limits hold
/// across server instances. Two request classes:
///
/// - **auth** (`/auth/*`): 5 requests per 15 minutes, keyed by client IP.
///   Registration and login are the brute-force surface.
/// - **api** (everything else): 100 requests per 15 minutes, keyed by the
///   authenticated user, falling back to client IP for anonymous catalog
///   reads.
///
/// Limits and window length come from [`crate::config::RateLimitConfig`].
///
/// # Storage
///
/// One Redis counter per (class, client) with the window as TTL, updated
/// atomically by a Lua script. Keys: `ratelimit:{class}:{client}`.
///
/// # Headers
///
/// Successful responses include:
/// - `X-RateLimit-Limit`: requests allowed per window
/// - `X-RateLimit-Remaining`: requests left in the current window
///
/// 429 responses include `Retry-After` in seconds.
///
/// # Failure mode
///
/// The limiter fails open: with no Redis configured, or Redis unreachable,
/// requests pass and a warning is logged. Availability of the grocery list
/// wins over strictness of the limiter.

use crate::app::AppState;
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use redis::aio::ConnectionManager;
use shelfhelp_shared::auth::middleware::AuthContext;
use tracing::warn;

/// Atomic fixed-window counter
///
/// INCRs the key and sets the window TTL on first touch; returns the count
/// and the remaining TTL in one round trip.
const COUNTER_SCRIPT: &str = r#"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
local ttl = redis.call('TTL', KEYS[1])
return {current, ttl}
"#;

/// Rate limit middleware for auth endpoints (register/login/refresh)
///
/// Keyed by client IP: these endpoints are reachable without credentials.
pub async fn auth_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = client_ip(&request);
    let limit = state.config.rate_limit.auth_limit;

    enforce(state, "auth", client, limit, request, next).await
}

/// Rate limit middleware for API endpoints
///
/// Keyed by the authenticated user when present (the auth layer runs
/// first), otherwise by client IP (anonymous catalog reads).
pub async fn api_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = match request.extensions().get::<AuthContext>() {
        Some(auth) => format!("user:{}", auth.user_id),
        None => client_ip(&request),
    };
    let limit = state.config.rate_limit.api_limit;

    enforce(state, "api", client, limit, request, next).await
}

/// Runs the counter and either forwards the request or rejects with 429
async fn enforce(
    state: AppState,
    class: &'static str,
    client: String,
    limit: u32,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(redis) = state.redis.clone() else {
        // No Redis configured: limiter disabled
        return Ok(next.run(request).await);
    };

    let window = state.config.rate_limit.window_seconds;
    let key = format!("ratelimit:{}:{}", class, client);

    let (count, ttl) = match run_counter(redis, &key, window).await {
        Ok(result) => result,
        Err(e) => {
            // Fail open: a Redis outage must not take the API down
            warn!(error = %e, key = %key, "Rate limit check failed, allowing request");
            return Ok(next.run(request).await);
        }
    };

    if count > limit as i64 {
        let retry_after = if ttl > 0 { ttl as u64 } else { window };
        return Err(ApiError::RateLimitExceeded {
            retry_after,
            message: "Too many requests, please try again later".to_string(),
        });
    }

    let remaining = (limit as i64 - count).max(0);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert("X-RateLimit-Limit", value);
    }
    if let Ok(value) = HeaderValue::from_str(&remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", value);
    }

    Ok(response)
}

/// Executes the counter script against Redis
async fn run_counter(
    mut redis: ConnectionManager,
    key: &str,
    window: u64,
) -> Result<(i64, i64), redis::RedisError> {
    redis::Script::new(COUNTER_SCRIPT)
        .key(key)
        .arg(window)
        .invoke_async(&mut redis)
        .await
}

/// Best-effort client IP for rate limit keying
///
/// Prefers the first hop in X-Forwarded-For (set by the reverse proxy),
/// then the socket peer address when the server was started with connect
/// info. Clients with neither share one bucket.
fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return format!("ip:{}", first);
            }
        }
    }

    if let Some(info) = request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
    {
        return format!("ip:{}", info.0.ip());
    }

    "ip:unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn empty_request() -> Request {
        axum::http::Request::builder().body(Body::empty()).unwrap()
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let request = axum::http::Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_ip(&request), "ip:203.0.113.7");
    }

    #[test]
    fn test_client_ip_uses_connect_info() {
        let mut request = empty_request();
        let addr: std::net::SocketAddr = "198.51.100.2:4242".parse().unwrap();
        request
            .extensions_mut()
            .insert(axum::extract::ConnectInfo(addr));

        assert_eq!(client_ip(&request), "ip:198.51.100.2");
    }

    #[test]
    fn test_client_ip_fallback() {
        assert_eq!(client_ip(&empty_request()), "ip:unknown");
    }
}
