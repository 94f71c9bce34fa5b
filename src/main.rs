//! Tip pool engine server binary.

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tip_engine::api::{AppState, create_router};
use tip_engine::config::ConfigLoader;
use tip_engine::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load("./config/tip_pool")?;
    info!(
        default_role = config.roles().default_role(),
        house_share = %config.policy().house_share,
        denomination = %config.policy().denomination,
        "Configuration loaded"
    );

    let store = Store::init().await?;
    info!("Database ready");

    // Local dev frontends only.
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse::<HeaderValue>()?,
            "http://localhost:5173".parse::<HeaderValue>()?,
        ])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let state = AppState::new(config, store);
    let app = create_router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
