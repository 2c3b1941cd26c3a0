/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables, with
 * development defaults where a value is safe to default and a warning where
 * it is not.
 *
 * The configuration is materialized once at startup into a `Config` value
 * that is passed down explicitly; no module reads the environment after
 * this point.
 */

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Runtime configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (`DATABASE_URL`)
    pub database_url: String,
    /// HMAC secret for session tokens (`JWT_SECRET`)
    pub jwt_secret: String,
    /// Session lifetime in days (`SESSION_TTL_DAYS`, default 30)
    pub session_ttl_days: u64,
    /// HTTP listen port (`SERVER_PORT`, default 3000)
    pub port: u16,
    /// Allowed browser origin for CORS (`CLIENT_ORIGIN`); unset means no
    /// cross-origin access
    pub client_origin: Option<String>,
    /// Gemini API key (`GEMINI_API_KEY`); unset disables the AI endpoints
    pub gemini_api_key: Option<String>,
    /// Gemini API base URL (`GEMINI_BASE_URL`), overridable for tests
    pub gemini_base_url: String,
    /// Gemini model name (`GEMINI_MODEL`)
    pub gemini_model: String,
    /// Whether session cookies are marked Secure (`APP_ENV=production`)
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:minigram.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using a development-only secret");
            "minigram-dev-secret-change-in-production".to_string()
        });

        let session_ttl_days = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        if gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, AI caption endpoints will fail");
        }

        Self {
            database_url,
            jwt_secret,
            session_ttl_days,
            port,
            client_origin: std::env::var("CLIENT_ORIGIN").ok(),
            gemini_api_key,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            secure_cookies: std::env::var("APP_ENV").as_deref() == Ok("production"),
        }
    }
}

/// Open the SQLite connection pool.
///
/// The database file is created on first start. Unlike a missing optional
/// service, a store that cannot be opened is fatal: the error propagates and
/// the server does not come up half-configured.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

impl Default for Config {
    /// Development defaults, also used as the base for test fixtures.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "minigram-dev-secret-change-in-production".to_string(),
            session_ttl_days: 30,
            port: 3000,
            client_origin: None,
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            secure_cookies: false,
        }
    }
}
