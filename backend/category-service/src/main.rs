use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use category_service::config::{Config, LogFormat};
use category_service::handlers::{self, AppState};
use category_service::{CategoryFeedService, MemoryStore};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.app.log_format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Text => fmt::layer().boxed(),
    };
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level)),
        )
        .init();

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    info!(
        "Starting category-service v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app.env
    );

    let store = match &config.ranking.catalog_path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read catalog {}", path))?;
            MemoryStore::from_json(&json)
                .with_context(|| format!("Failed to parse catalog {}", path))?
        }
        None => {
            warn!("RANKING_CATALOG_PATH not set - starting with an empty catalog");
            MemoryStore::default()
        }
    };

    let state = web::Data::new(AppState {
        feed: Arc::new(CategoryFeedService::new(Arc::new(store))),
        ranking: config.ranking.clone(),
    });

    let addr = config.bind_address();
    info!("HTTP server listening on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&addr)
    .with_context(|| format!("Failed to bind {}", addr))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
