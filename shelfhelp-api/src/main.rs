//! # ShelfHelp API Server
//!
//! Grocery-list web service: users browse recommended and own items and
//! recipes, fill a cart, and check out by emailing themselves a
//! consolidated shopping list.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Catalog endpoints (items, recipes) with recommended-or-owned visibility
//! - Cart endpoints with merge-on-add semantics
//! - Checkout (aggregate, email via SMTP, clear)
//! - JWT authentication and Redis-backed rate limiting
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p shelfhelp-api
//! ```

use shelfhelp_api::{
    app::{build_router, AppState},
    config::Config,
};
use shelfhelp_shared::{
    db::{migrations, pool, seed},
    mail::Mailer,
};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfhelp_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "ShelfHelp API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // Database: pool, migrations, recommended-catalog seed
    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;
    seed::seed_recommended(&db).await?;

    // Redis is optional; without it the rate limiter is disabled
    let redis = match &config.redis.url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let manager = redis::aio::ConnectionManager::new(client).await?;
            tracing::info!("Connected to Redis, rate limiting enabled");
            Some(manager)
        }
        None => {
            tracing::warn!("REDIS_URL not set, rate limiting disabled");
            None
        }
    };

    // SMTP is optional; without it checkout logs the list instead
    let mailer = match &config.email.smtp_host {
        Some(host) => {
            let credentials = config
                .email
                .username
                .clone()
                .zip(config.email.password.clone());
            tracing::info!(host = %host, "SMTP delivery enabled");
            Mailer::smtp(host, config.email.smtp_port, credentials, &config.email.from)?
        }
        None => {
            tracing::warn!("EMAIL_HOST not set, grocery lists will be logged instead of sent");
            Mailer::disabled()
        }
    };

    let bind_address = config.bind_address();
    let state = AppState::new(db, config, redis, mailer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives a shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, draining connections...");
}
