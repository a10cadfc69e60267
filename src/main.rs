use anyhow::{Context, Result};
use axum::{Router, extract::FromRef};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::session::SearchSession;

// Declare modules
mod catalog;
mod config;
mod error;
mod models;
mod routes;
mod search;
mod session;

// Shared application state handed to the router.
#[derive(Clone, FromRef)]
struct AppState {
    settings: Arc<Settings>,
    session: Arc<SearchSession>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bikesearch_rust=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing bike search server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            Arc::new(s)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let http_client = Client::builder()
        .build()
        .context("Failed to build shared reqwest client")?;

    // One fetch per session; failures degrade to an empty catalog inside.
    let records = catalog::load_or_empty(&http_client, &settings.catalog_url).await;
    let session = SearchSession::new(records, settings.vocabulary.clone());

    // Hold the visible loading state for the fixed minimum duration.
    {
        let session = session.clone();
        tokio::spawn(async move { session.settle_initial_load().await });
    }

    let app_state = AppState {
        settings: settings.clone(),
        session,
    };

    let router: Router = routes::create_router(app_state);
    let app = router.nest_service("/static", ServeDir::new("static"));

    // Parse the server address from settings
    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
