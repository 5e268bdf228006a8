//! memo-api server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo_api::auth::IdentityClient;
use memo_api::{app, ApiConfig, AppState};
use memo_store::FirestoreBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    //
    // Environment variables:
    //   LOG_FORMAT - "json" or "text" (default: "text")
    //   RUST_LOG   - standard env filter (default: "memo_api=debug,tower_http=debug")
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memo_api=debug,tower_http=debug".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let config = ApiConfig::from_env()?;
    let store = Arc::new(FirestoreBackend::with_config(
        config.store_base_url.clone(),
        config.store_collection.clone(),
        config.store_token.clone(),
    ));
    let verifier = Arc::new(IdentityClient::with_config(
        config.identity_base_url.clone(),
    ));

    let state = AppState { store, verifier };
    let router = app(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("memo-api listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
