use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_api::{
    config::{Config, StoreBackend},
    db::{self, InMemoryStore, InteractionStore, PgInteractionStore},
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn InteractionStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool =
                db::create_pool(&config.database_url, config.database_max_connections).await?;
            Arc::new(PgInteractionStore::new(pool))
        }
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
    };
    tracing::info!(store = store.name(), "Interaction store ready");

    if config.seed_sample_data {
        db::seed_sample_data(store.as_ref()).await?;
    }

    let state = Arc::new(AppState::new(store, &config));
    let app = create_router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %bind_address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
