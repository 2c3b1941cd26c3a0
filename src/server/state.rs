/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * implementations for Axum state extraction.
 *
 * The state is the explicit, passed-down handle to everything a handler may
 * touch: the database pool, the resolved configuration, and the AI caption
 * client. There is no global connection singleton; the pool is opened at
 * startup and dropped at shutdown.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::ai::service::CaptionService;
use crate::server::config::Config;

/// Central state container for the Axum application.
///
/// All fields are cheap to clone: the pool and caption client are handles,
/// the config is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db: SqlitePool,
    /// Resolved runtime configuration
    pub config: Arc<Config>,
    /// Client for the generative-text provider
    pub captions: CaptionService,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let captions = CaptionService::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        );

        Self {
            db,
            config: Arc::new(config),
            captions,
        }
    }
}

/// Allow handlers to extract the pool directly via `State(SqlitePool)`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Allow handlers to extract the configuration directly.
impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// Allow the AI handlers to extract the caption client directly.
impl FromRef<AppState> for CaptionService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.captions.clone()
    }
}
