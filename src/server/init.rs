/**
 * Server Initialization
 *
 * This module assembles the application: it opens the database pool, runs
 * migrations, builds the shared state, and configures the router.
 *
 * # Initialization Steps
 *
 * 1. Open the SQLite pool (fatal on failure)
 * 2. Run pending migrations
 * 3. Build `AppState` (pool + config + caption client)
 * 4. Create the router
 *
 * The pool handle lives inside `AppState` for the process lifetime and is
 * dropped, closing its connections, when the server shuts down.
 */

use axum::Router;

use crate::routes::router::create_router;
use crate::server::config::{connect_database, Config};
use crate::server::state::AppState;

/// Create and configure the Axum application.
pub async fn create_app(config: Config) -> Result<Router, Box<dyn std::error::Error>> {
    let pool = connect_database(&config.database_url).await?;

    tracing::info!("Running database migrations");
    sqlx::migrate!().run(&pool).await?;

    let state = AppState::new(pool, config);
    Ok(create_router(state))
}
