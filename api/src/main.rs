use anyhow::{Context, Result};
use dotenv::dotenv;
use wantbox_api::config::{AppConfig, LogFormat};
use wantbox_api::observability::Observability;
use wantbox_api::state::AppState;
use wantbox_shared::WishlistStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init(LogFormat::from_env())?;
    let config = AppConfig::from_env()?;

    let store = WishlistStore::open(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to open database")?;
    store
        .init_schema()
        .await
        .context("Failed to initialize schema")?;

    tracing::info!("Database connected and schema ready");

    let state = AppState::new(store, obs.registry).context("Failed to load templates")?;
    let app = wantbox_api::build_router(state);

    tracing::info!("Wantbox listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
