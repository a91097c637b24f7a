use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use voyage_api::{app, AppState};
use voyage_catalog::TripCatalog;
use voyage_core::BookingBackend;
use voyage_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage_api=debug,voyage_core=debug,voyage_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Voyage on port {}", config.server.port);

    let catalog = TripCatalog::load(&config.catalog.path)
        .with_context(|| format!("Failed to load trip catalog from {}", config.catalog.path.display()))?;

    let store = voyage_store::connect(&config.data_store).context("Failed to build data store client")?;
    tracing::info!(
        "Bookings go to collection '{}' ({:?} backend)",
        config.data_store.collection,
        config.data_store.backend
    );

    let app_state = AppState {
        catalog: Arc::new(catalog),
        bookings: BookingBackend::new(store, config.data_store.collection.clone()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
