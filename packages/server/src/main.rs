use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing::{Level, info, warn};

use league_server::config::{AppConfig, CorsConfig};
use league_server::state::AppState;
use league_server::{database, seed};

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(e) => {
                warn!("CORS: ignoring invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("failed to connect to the store")?;

    seed::seed_admin(&db, &config.auth).await?;
    if config.seed.demo {
        seed::seed_demo_league(&db).await?;
    }
    seed::ensure_indexes(&db).await?;

    let cors = build_cors_layer(&config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState { db, config };
    let app = league_server::build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("League server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
