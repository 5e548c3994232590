use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use resto_orderservice::{
    app_state::AppState,
    bootstrap, config,
    credentials::CredentialService,
    db, routes, seed,
    store::{PgStore, Store},
};

/// Migrations embedded into the binary which helps with streamlining image building process
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() -> Result<()> {
    let env_loaded = bootstrap::init_env();
    bootstrap::init_tracing();
    if !env_loaded {
        tracing::warn!(".env file not found, using process environment only");
    }

    let config = config::load()?;
    if config.auth.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set, signing tokens with the insecure default key");
    }

    tracing::info!("Running migrations...");
    let migrations_count = db::run_migrations_blocking(MIGRATIONS, &config.database.url).await?;
    tracing::info!("Run {} new migrations successfully", migrations_count);

    let pool = db::create_pool(&config.database).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
    let credentials = CredentialService::new(
        config.auth.jwt_secret.as_bytes(),
        Duration::hours(config.auth.token_ttl_hours),
    );
    let state = AppState::new(store, credentials);

    tracing::info!("Bootstrapping...");
    state
        .admins
        .ensure_default_admin(&config.auth.admin_username, &config.auth.admin_password)
        .await?;
    if config.seed_demo_data {
        seed::seed_demo_data(&state, &config.auth.admin_username).await?;
    }

    let app = routes::build_app(state);
    bootstrap::serve("OrderService", app, config.server.port).await
}
