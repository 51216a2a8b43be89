use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helio_api::{
    config::Config,
    db::{create_pool, run_migrations, PgStore},
    routes::{create_router, AppState},
    services::{catalog::Catalog, classifier::Classifier, SharedRng},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helio_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let catalog = Catalog::load(&config.data_dir);
    let classifier = Classifier::load(&config.model_dir).with_context(|| {
        format!(
            "Failed to load diet model from {}",
            config.model_dir.display()
        )
    })?;
    if let Err(e) = catalog.ensure_covers_model() {
        tracing::error!(error = %e, "Diet catalog does not cover every model category");
        return Err(e.into());
    }

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await?;

    let store = Arc::new(PgStore::new(pool));
    let state = Arc::new(AppState {
        catalog: Arc::new(catalog),
        classifier: Arc::new(classifier),
        profiles: store.clone(),
        plans: store,
        rng: SharedRng::from_seed(config.rng_seed),
    });

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
