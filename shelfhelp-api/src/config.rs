/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `JWT_SECRET`: Secret key for JWT signing, >= 32 chars (required)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `REDIS_URL`: Redis connection string; rate limiting is disabled when unset
/// - `EMAIL_HOST`: SMTP relay host; mail delivery is disabled when unset
/// - `EMAIL_PORT`: SMTP port (default: 587)
/// - `EMAIL_USER` / `EMAIL_PASS`: SMTP credentials (optional)
/// - `EMAIL_FROM`: Sender mailbox (default: "ShelfHelp <noreply@shelfhelp.com>")
/// - `RATE_LIMIT_AUTH`: Auth requests allowed per window (default: 5)
/// - `RATE_LIMIT_API`: API requests allowed per window (default: 100)
/// - `RATE_LIMIT_WINDOW_SECONDS`: Window length (default: 900)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use shelfhelp_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Redis configuration (rate limiting state)
    pub redis: RedisConfig,

    /// Outbound email configuration
    pub email: EmailConfig,

    /// Rate limit configuration
    pub rate_limit: RateLimitConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; ["*"] means permissive
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be kept secret and at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL; None disables rate limiting
    pub url: Option<String>,
}

/// Outbound email configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host; None disables delivery (lists are logged instead)
    pub smtp_host: Option<String>,

    /// SMTP port
    pub smtp_port: u16,

    /// SMTP username (paired with `password`)
    pub username: Option<String>,

    /// SMTP password
    pub password: Option<String>,

    /// Sender mailbox, e.g. "ShelfHelp <noreply@shelfhelp.com>"
    pub from: String,
}

/// Rate limit configuration
///
/// Two request classes share one window length: auth endpoints are limited
/// aggressively per client IP, the rest of the API per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Auth requests allowed per window
    pub auth_limit: u32,

    /// API requests allowed per window
    pub api_limit: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or values fail to
    /// parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let redis_url = env::var("REDIS_URL").ok();

        let smtp_host = env::var("EMAIL_HOST").ok();
        let smtp_port = env::var("EMAIL_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()?;
        let email_user = env::var("EMAIL_USER").ok();
        let email_pass = env::var("EMAIL_PASS").ok();
        let email_from = env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "ShelfHelp <noreply@shelfhelp.com>".to_string());

        let auth_limit = env::var("RATE_LIMIT_AUTH")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;
        let api_limit = env::var("RATE_LIMIT_API")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u32>()?;
        let window_seconds = env::var("RATE_LIMIT_WINDOW_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse::<u64>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig { secret: jwt_secret },
            redis: RedisConfig { url: redis_url },
            email: EmailConfig {
                smtp_host,
                smtp_port,
                username: email_user,
                password: email_pass,
                from: email_from,
            },
            rate_limit: RateLimitConfig {
                auth_limit,
                api_limit,
                window_seconds,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            redis: RedisConfig { url: None },
            email: EmailConfig {
                smtp_host: None,
                smtp_port: 587,
                username: None,
                password: None,
                from: "ShelfHelp <noreply@shelfhelp.com>".to_string(),
            },
            rate_limit: RateLimitConfig {
                auth_limit: 5,
                api_limit: 100,
                window_seconds: 900,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }
}
