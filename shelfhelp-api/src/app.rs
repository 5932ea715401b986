/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use shelfhelp_api::{app::AppState, config::Config};
/// use shelfhelp_shared::mail::Mailer;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config, None, Mailer::disabled());
/// let app = shelfhelp_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use redis::aio::ConnectionManager;
use shelfhelp_shared::auth::{
    jwt,
    middleware::{bearer_token, AuthContext},
};
use shelfhelp_shared::mail::Mailer;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Redis connection for rate limiting; None disables the limiter
    pub redis: Option<ConnectionManager>,

    /// Outbound mailer for checkout
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        db: PgPool,
        config: Config,
        redis: Option<ConnectionManager>,
        mailer: Mailer,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            redis,
            mailer: Arc::new(mailer),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                 # Health check (public)
/// ├── /auth/                  # Authentication (public, auth-class rate limit)
/// │   ├── POST /register
/// │   ├── POST /login
/// │   └── POST /refresh
/// ├── GET  /items             # Catalog listing (anonymous or authenticated)
/// ├── GET  /recipes
/// ├── POST /items             # Catalog creation (authenticated)
/// ├── POST /recipes
/// ├── GET/POST/DELETE /cart   # Cart (authenticated)
/// └── POST /checkout          # Checkout (authenticated)
/// ```
///
/// # Middleware Stack
///
/// Outermost to innermost: request tracing, CORS, then per-group auth and
/// rate limiting (auth routes are limited by client IP, API routes by
/// authenticated user).
pub fn build_router(state: AppState) -> Router {
    use crate::middleware::rate_limit;
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes: public, but aggressively rate limited per client IP
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::auth_rate_limit,
        ));

    // Catalog listings: visible anonymously, richer when authenticated
    let catalog_read_routes = Router::new()
        .route("/items", get(routes::items::list_items))
        .route("/recipes", get(routes::recipes::list_recipes))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::api_rate_limit,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            optional_jwt_auth_layer,
        ));

    // Everything else requires a valid access token
    let protected_routes = Router::new()
        .route("/items", post(routes::items::create_item))
        .route("/recipes", post(routes::recipes::create_recipe))
        .route(
            "/cart",
            get(routes::cart::get_cart)
                .post(routes::cart::add_to_cart)
                .delete(routes::cart::delete_from_cart),
        )
        .route("/checkout", post(routes::checkout::checkout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::api_rate_limit,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .merge(catalog_read_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the Bearer token, then injects an `AuthContext`
/// into request extensions. Missing or invalid tokens reject the request.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let token = bearer_token(req.headers())?;
    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}

/// Optional JWT authentication middleware layer
///
/// Used on catalog listings: an absent Authorization header means an
/// anonymous request and no `AuthContext` is inserted, but a header that is
/// present and invalid still rejects the request.
async fn optional_jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    if req.headers().contains_key(axum::http::header::AUTHORIZATION) {
        let token = bearer_token(req.headers())?;
        let claims = jwt::validate_access_token(token, state.jwt_secret())?;
        req.extensions_mut().insert(AuthContext::from_claims(&claims));
    }

    Ok(next.run(req).await)
}
